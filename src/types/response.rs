use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use warp::Reply;
use warp::http::StatusCode;

#[derive(Debug, Default)]
struct Parts {
    status: Option<StatusCode>,
    body: Option<Value>,
}

/// Response under construction. Clones share the same parts, so a handler can
/// fill it in while the caller keeps a handle to turn it into a reply.
#[derive(Debug, Clone, Default)]
pub struct Response {
    parts: Arc<Mutex<Parts>>,
}

impl Response {
    fn lock(&self) -> MutexGuard<'_, Parts> {
        self.parts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn status(&self, status: StatusCode) -> &Self {
        self.lock().status = Some(status);
        self
    }

    pub fn json(&self, body: Value) -> &Self {
        self.lock().body = Some(body);
        self
    }

    /// 200 unless a handler chose otherwise.
    pub fn status_code(&self) -> StatusCode {
        self.lock().status.unwrap_or(StatusCode::OK)
    }

    pub fn body(&self) -> Option<Value> {
        self.lock().body.clone()
    }

    pub fn into_reply(self) -> warp::reply::Response {
        let status = self.status_code();
        let body = self.lock().body.take();
        match body {
            Some(body) => {
                warp::reply::with_status(warp::reply::json(&body), status).into_response()
            }
            None => warp::reply::with_status(warp::reply(), status).into_response(),
        }
    }
}
