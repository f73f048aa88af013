use crate::types::response::Response;
use futures::future::BoxFuture;
use handle_errors::Error as CustomError;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use warp::Rejection;

/// Continuation handed to every request handler. Calling it passes an error on
/// to the centralized error stage. Clones share whether it has been called.
pub struct Next<E> {
    forward: Arc<dyn Fn(E) + Send + Sync>,
    called: Arc<AtomicBool>,
}

impl<E> Next<E> {
    pub fn new<F>(forward: F) -> Self
    where
        F: Fn(E) + Send + Sync + 'static,
    {
        Self {
            forward: Arc::new(forward),
            called: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn call(&self, err: E) {
        self.called.store(true, Ordering::SeqCst);
        (self.forward)(err)
    }

    pub fn is_called(&self) -> bool {
        self.called.load(Ordering::SeqCst)
    }
}

impl<E> Clone for Next<E> {
    fn clone(&self) -> Self {
        Self {
            forward: Arc::clone(&self.forward),
            called: Arc::clone(&self.called),
        }
    }
}

impl<E> fmt::Debug for Next<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next")
            .field("called", &self.is_called())
            .finish_non_exhaustive()
    }
}

/// Wraps an async `(request, response, next)` handler so that a failure is
/// passed to `next` instead of escaping to the caller.
///
/// The returned handler has the same shape as the one it wraps and always
/// resolves to `Ok(())`: on failure the error has already been forwarded.
/// A returned error is dropped when the handler already called `next` itself,
/// so `next` sees at most one error per request. Wrapping a wrapped handler is
/// therefore harmless.
pub fn async_handler<Req, Res, E, H, Fut>(
    handler: H,
) -> impl Fn(Req, Res, Next<E>) -> BoxFuture<'static, Result<(), E>> + Clone + Send + Sync + 'static
where
    Req: Send + 'static,
    Res: Send + 'static,
    E: Send + 'static,
    H: Fn(Req, Res, Next<E>) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<(), E>> + Send + 'static,
{
    move |req: Req, res: Res, next: Next<E>| -> BoxFuture<'static, Result<(), E>> {
        let fut = handler(req, res, next.clone());
        Box::pin(async move {
            if let Err(err) = fut.await {
                if !next.is_called() {
                    next.call(err);
                }
            }
            Ok(())
        })
    }
}

/// Turns a `(request, Response, Next)` handler into a function warp's
/// `and_then` accepts. The handler is wrapped with [`async_handler`]; an error
/// it forwards becomes a custom rejection for `recover(return_error)`,
/// otherwise the filled-in [`Response`] is the reply.
pub fn warp_handler<T, H, Fut>(
    handler: H,
) -> impl Fn(T) -> BoxFuture<'static, Result<warp::reply::Response, Rejection>>
+ Clone
+ Send
+ Sync
+ 'static
where
    T: Send + 'static,
    H: Fn(T, Response, Next<CustomError>) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<(), CustomError>> + Send + 'static,
{
    let wrapped = async_handler(handler);
    move |req: T| -> BoxFuture<'static, Result<warp::reply::Response, Rejection>> {
        let res = Response::default();
        let forwarded: Arc<Mutex<Option<CustomError>>> = Arc::new(Mutex::new(None));
        let next = Next::new({
            let forwarded = Arc::clone(&forwarded);
            move |err: CustomError| {
                let mut slot = forwarded.lock().unwrap_or_else(PoisonError::into_inner);
                // first error wins
                if slot.is_none() {
                    *slot = Some(err);
                }
            }
        });
        let fut = wrapped(req, res.clone(), next);
        Box::pin(async move {
            if let Err(err) = fut.await {
                return Err(warp::reject::custom(err));
            }
            let err = forwarded
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take();
            match err {
                Some(err) => Err(warp::reject::custom(err)),
                None => Ok(res.into_reply()),
            }
        })
    }
}
