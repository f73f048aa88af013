/// Database name appended to `MONGODB_URL` when building the connection URL.
pub const DB_NAME: &str = "warp_backend";

pub const APP_NAME: &str = "warp_backend";
