pub mod constants;
pub mod controllers;
pub mod db;
pub mod handler;
pub mod routes;
pub mod settings;
pub mod store;
pub mod types;

pub use handler::{Next, async_handler, warp_handler};
pub use settings::Settings;
pub use store::Store;
pub use types::response::Response;
