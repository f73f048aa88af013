use config::ConfigError;
use mongodb::error::{Error as DBError, ErrorKind as DBErrorKind};
use warp::{
    Rejection, Reply, cors::CorsForbidden, filters::body::BodyDeserializeError, http::StatusCode,
    reject::Reject,
};

#[derive(Debug)]
pub enum Error {
    DbError(DBError),
    ConfigError(ConfigError),
    RequestError(StatusCode, String),
}

impl Error {
    /// HTTP status the error is answered with once it reaches `return_error`.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::RequestError(status, _) => *status,
            Error::DbError(e) => match e.kind.as_ref() {
                DBErrorKind::Authentication { .. } => StatusCode::UNAUTHORIZED,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Error::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message that is safe to hand back to a client.
    pub fn public_message(&self) -> String {
        match self {
            Error::RequestError(_, message) => message.clone(),
            Error::DbError(e) => match e.kind.as_ref() {
                DBErrorKind::Authentication { message, .. } => message.clone(),
                _ => "Internal Server Error".to_string(),
            },
            Error::ConfigError(_) => "Internal Server Error".to_string(),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::DbError(e) => write!(f, "There's a problem with the database: {}", e),
            Error::ConfigError(e) => write!(f, "Invalid configuration: {}", e),
            Error::RequestError(status, message) => write!(f, "{}: {}", status, message),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::DbError(e) => Some(e),
            Error::ConfigError(e) => Some(e),
            Error::RequestError(..) => None,
        }
    }
}

impl From<DBError> for Error {
    fn from(e: DBError) -> Self {
        Error::DbError(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::ConfigError(e)
    }
}

impl Reject for Error {}

fn error_reply(message: String, status: StatusCode) -> warp::reply::Response {
    warp::reply::with_status(
        warp::reply::json(&serde_json::json!({ "success": false, "message": message })),
        status,
    )
    .into_response()
}

// Global Error handler
pub async fn return_error(r: Rejection) -> Result<impl Reply, Rejection> {
    if let Some(e) = r.find::<Error>() {
        let status = e.status_code();
        if status.is_server_error() {
            tracing::event!(tracing::Level::ERROR, "{}", e);
        } else {
            tracing::event!(tracing::Level::WARN, "{}", e);
        }
        Ok(error_reply(e.public_message(), status))
    } else if let Some(e) = r.find::<CorsForbidden>() {
        tracing::event!(tracing::Level::WARN, "{}", e);
        Ok(error_reply(e.to_string(), StatusCode::FORBIDDEN))
    } else if let Some(e) = r.find::<BodyDeserializeError>() {
        tracing::event!(tracing::Level::WARN, "{}", e);
        Ok(error_reply(e.to_string(), StatusCode::UNPROCESSABLE_ENTITY))
    } else {
        Ok(error_reply(
            "Route not found".to_string(),
            StatusCode::NOT_FOUND,
        ))
    }
}
