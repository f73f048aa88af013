use crate::settings::Settings;
use crate::constants::DB_NAME;
use crate::store::Store;
use handle_errors::Error as CustomError;

pub fn connection_url(base: &str, db_name: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), db_name)
}

pub async fn try_connect(settings: &Settings) -> Result<Store, CustomError> {
    let url = connection_url(&settings.mongodb_url, DB_NAME);
    Store::new(&url, settings.connect_timeout()).await
}

/// Startup bootstrap. A database we cannot reach means the service cannot
/// start, so any failure is logged and the process exits with status 1.
pub async fn connect_db(settings: &Settings) -> Store {
    match try_connect(settings).await {
        Ok(store) => {
            tracing::info!("MongoDB connected, DB host: {}", store.host());
            store
        }
        Err(e) => {
            match std::error::Error::source(&e) {
                Some(cause) => tracing::error!("MongoDB connection error: {} ({:?})", e, cause),
                None => tracing::error!("MongoDB connection error: {}", e),
            }
            std::process::exit(1)
        }
    }
}
