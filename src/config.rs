use std::env;
use std::path::PathBuf;

use crate::utils::AppError;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 2977;
pub const DEFAULT_DATABASE_URL: &str = "mongodb://localhost:27017";
pub const DEFAULT_DATABASE_NAME: &str = "local";
pub const DEFAULT_STORAGE_ROOT: &str = "/home/ubuntu/mediaServerStorage";
pub const DEFAULT_PUBLIC_DIR: &str = "./public";

/// 10 GiB
pub const DEFAULT_UPLOAD_MAX_BYTES: u64 = 1024 * 1024 * 1024 * 10;

/// Runtime settings, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_name: String,
    pub storage_root: PathBuf,
    pub public_dir: PathBuf,
    pub upload_max_bytes: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            host: var_or("HOST", DEFAULT_HOST),
            port: parse_var("PORT", DEFAULT_PORT)?,
            database_url: var_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            database_name: var_or("DATABASE_NAME", DEFAULT_DATABASE_NAME),
            storage_root: PathBuf::from(var_or("STORAGE_ROOT", DEFAULT_STORAGE_ROOT)),
            public_dir: PathBuf::from(var_or("PUBLIC_DIR", DEFAULT_PUBLIC_DIR)),
            upload_max_bytes: parse_var("UPLOAD_MAX_BYTES", DEFAULT_UPLOAD_MAX_BYTES)?,
        })
    }

    pub fn upload_dir(&self) -> PathBuf {
        self.storage_root.join("uploads")
    }

    pub fn vod_dir(&self) -> PathBuf {
        self.storage_root.join("VODs")
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            database_name: DEFAULT_DATABASE_NAME.to_string(),
            storage_root: PathBuf::from(DEFAULT_STORAGE_ROOT),
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
            upload_max_bytes: DEFAULT_UPLOAD_MAX_BYTES,
        }
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        log::debug!("{} not set, using default: {}", key, default);
        default.to_string()
    })
}

fn parse_var<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::ConfigError(format!("{} has invalid value '{}': {}", key, raw, e))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = AppConfig::default();
        assert_eq!(config.port, 2977);
        assert_eq!(config.database_name, "local");
        assert_eq!(config.upload_dir(), PathBuf::from("/home/ubuntu/mediaServerStorage/uploads"));
        assert_eq!(config.vod_dir(), PathBuf::from("/home/ubuntu/mediaServerStorage/VODs"));
        assert_eq!(config.upload_max_bytes, 10_737_418_240);
    }

    #[test]
    fn test_parse_var_rejects_garbage() {
        env::set_var("MEDIA_AUTH_TEST_PORT", "not-a-port");
        let result: Result<u16, _> = parse_var("MEDIA_AUTH_TEST_PORT", 1);
        env::remove_var("MEDIA_AUTH_TEST_PORT");

        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }

    #[test]
    fn test_parse_var_falls_back_to_default() {
        let result: u64 = parse_var("MEDIA_AUTH_TEST_UNSET_LIMIT", 42).unwrap();
        assert_eq!(result, 42);
    }
}
