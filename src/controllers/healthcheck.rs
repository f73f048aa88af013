use crate::Store;
use crate::handler::Next;
use crate::types::response::Response;
use handle_errors::Error as CustomError;
use std::sync::Arc;
use warp::http::StatusCode;

pub async fn healthcheck(
    store: Arc<Store>,
    res: Response,
    _next: Next<CustomError>,
) -> Result<(), CustomError> {
    store.ping().await?;
    res.status(StatusCode::OK).json(serde_json::json!({
        "success": true,
        "message": "OK",
        "host": store.host(),
    }));
    Ok(())
}
