use crate::constants::{APP_NAME, DB_NAME};
use handle_errors::Error as CustomError;
use mongodb::bson::doc;
use mongodb::options::{ClientOptions, ServerAddress};
use mongodb::{Client, Database};
use std::time::Duration;

/// Live session to the application database. Built once at startup and shared
/// behind an `Arc` for the rest of the process lifetime.
#[derive(Debug, Clone)]
pub struct Store {
    pub db: Database,
    host: String,
}

impl Store {
    /// Connects to `uri` and proves the session with a `ping`. The driver
    /// connects lazily, so a client alone says nothing about reachability.
    pub async fn new(uri: &str, timeout: Duration) -> Result<Self, CustomError> {
        let mut options = ClientOptions::parse(uri)
            .await
            .map_err(CustomError::DbError)?;
        options.app_name = Some(APP_NAME.to_string());
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);

        let host = resolved_host(&options);
        let db_name = options
            .default_database
            .clone()
            .unwrap_or_else(|| DB_NAME.to_string());

        let client = Client::with_options(options).map_err(CustomError::DbError)?;
        let store = Self {
            db: client.database(&db_name),
            host,
        };
        store.ping().await?;
        Ok(store)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub async fn ping(&self) -> Result<(), CustomError> {
        self.db
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(CustomError::DbError)?;
        Ok(())
    }
}

/// Host name of the first server the options point at, without the port.
pub fn resolved_host(options: &ClientOptions) -> String {
    match options.hosts.first() {
        Some(ServerAddress::Tcp { host, .. }) => host.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}
