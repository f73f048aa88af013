use config::{Config, Environment, File};
use handle_errors::Error as CustomError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    pub log_level: String,
    pub mongodb_url: String,
    pub port: u16,
    pub connect_timeout_ms: u64,
}

impl Settings {
    /// Defaults, then `setup.toml` (optional), then the process environment.
    pub fn load() -> Result<Self, CustomError> {
        Self::from_sources("setup", Environment::default())
    }

    fn from_sources(file_name: &str, env: Environment) -> Result<Self, CustomError> {
        let config = Config::builder()
            .set_default("log_level", "info")?
            .set_default("port", 8000)?
            .set_default("connect_timeout_ms", 10_000)?
            .add_source(File::with_name(file_name).required(false))
            .add_source(env.try_parsing(true))
            .build()?;
        Ok(config.try_deserialize::<Settings>()?)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn log_filter(&self) -> String {
        log_filter_for(&self.log_level)
    }
}

/// `RUST_LOG` style directive covering the crates that log on our behalf.
pub fn log_filter_for(level: &str) -> String {
    format!(
        "handle_errors={},warp_backend={},warp={}",
        level, level, level
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::default().source(Some(map))
    }

    #[test]
    fn applies_defaults() {
        let settings = Settings::from_sources(
            "no-such-setup-file",
            env_from(&[("MONGODB_URL", "mongodb://localhost:27017")]),
        )
        .unwrap();
        assert_eq!(settings.mongodb_url, "mongodb://localhost:27017");
        assert_eq!(settings.port, 8000);
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.connect_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn environment_overrides_defaults() {
        let settings = Settings::from_sources(
            "no-such-setup-file",
            env_from(&[
                ("MONGODB_URL", "mongodb://db:27017"),
                ("PORT", "9090"),
                ("LOG_LEVEL", "debug"),
                ("CONNECT_TIMEOUT_MS", "250"),
            ]),
        )
        .unwrap();
        assert_eq!(settings.port, 9090);
        assert_eq!(settings.connect_timeout(), Duration::from_millis(250));
        assert_eq!(
            settings.log_filter(),
            "handle_errors=debug,warp_backend=debug,warp=debug"
        );
    }

    #[test]
    fn missing_url_is_a_config_error() {
        let result = Settings::from_sources("no-such-setup-file", env_from(&[]));
        assert!(matches!(result, Err(CustomError::ConfigError(_))));
    }
}
