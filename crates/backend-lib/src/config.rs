// ============================
// crates/backend-lib/src/config.rs
// ============================
//! Configuration management.
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::Result;
use figment::{Figment, providers::{Env, Format, Serialized, Toml}};
use serde::{Deserialize, Serialize};

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Data directory path for the flat-file credential store
    pub data_dir: PathBuf,
    /// Log level filter (tracing env-filter syntax)
    pub log_level: String,
    /// Session TTL in seconds
    pub session_ttl_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".parse().expect("static addr"),
            data_dir: PathBuf::from("data"),
            log_level: "info".to_string(),
            session_ttl_secs: 60 * 60 * 24 * 7, // 7 days
        }
    }
}

impl Settings {
    /// Load settings from `config.toml` (if present) and `GATEKEEPER_`
    /// environment variables, over the defaults.
    pub fn load() -> Result<Self> {
        Self::load_from("config.toml")
    }

    /// Load settings from an explicit config file path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let settings = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("GATEKEEPER_"))
            .extract()?;

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.bind_addr.port(), 3000);
        assert_eq!(settings.session_ttl_secs, 60 * 60 * 24 * 7);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bind_addr = \"0.0.0.0:8080\"").unwrap();
        writeln!(file, "session_ttl_secs = 3600").unwrap();

        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.bind_addr.port(), 8080);
        assert_eq!(settings.session_ttl_secs, 3600);
        // Untouched keys keep their defaults
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let settings = Settings::load_from("does/not/exist.toml").unwrap();
        assert_eq!(settings.bind_addr.port(), 3000);
    }
}
