use handle_errors::return_error;
use std::{env, sync::Arc};
use tracing_subscriber::fmt::format::FmtSpan;
use warp::{Filter, http::Method};
use warp_backend::{
    Settings, db::connect_db, routes,
    settings::log_filter_for,
};

#[tokio::main]
async fn main() {
    // Loading the env values
    dotenv::dotenv().ok();
    let settings = Settings::load();

    // Setting log level, even when the settings are unusable
    let log_filter = env::var("RUST_LOG").unwrap_or_else(|_| match &settings {
        Ok(settings) => settings.log_filter(),
        Err(_) => log_filter_for("info"),
    });
    tracing_subscriber::fmt()
        .with_env_filter(log_filter)
        .with_span_events(FmtSpan::CLOSE)
        .init();

    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("MongoDB connection error: {}", e);
            std::process::exit(1)
        }
    };

    // Exits the process when the database is unreachable
    let store = Arc::new(connect_db(&settings).await);

    let cors = warp::cors()
        .allow_any_origin()
        .allow_header("content-type")
        .allow_methods(&[Method::GET, Method::POST, Method::PUT, Method::DELETE]);

    let routes = routes::healthcheck::healthcheck_routes(store)
        .with(cors)
        .with(warp::trace::request())
        .recover(return_error);

    tracing::info!("Server listening on port {}", settings.port);
    warp::serve(routes).run(([127, 0, 0, 1], settings.port)).await;
}
