//! Server configuration.
//!
//! Resolution order for the file: `--config`, then `VERDANT_CONFIG`, then
//! `./verdant.toml`, then `<config dir>/verdant/config.toml`. A missing file
//! means defaults. Environment overrides are applied last.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use verdant_core::{Error, Result};

/// Env var naming the config file.
pub const CONFIG_ENV: &str = "VERDANT_CONFIG";

/// Config file looked for in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "verdant.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerdantConfig {
    /// Listener and request limits.
    pub server: ServerConfig,
    /// Content and upload storage.
    pub storage: StorageConfig,
    /// Log filtering.
    pub logging: LoggingConfig,
}

/// `[server]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Largest accepted request body. Leaves room above the 10 MB image
    /// limit for multipart framing and form fields.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            max_body_bytes: 12 * 1024 * 1024,
        }
    }
}

/// Section storage backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Process-local; content is lost on restart.
    Memory,
    /// One JSON file per section under `data_dir`.
    #[default]
    File,
}

impl std::str::FromStr for Backend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Backend::Memory),
            "file" => Ok(Backend::File),
            other => Err(Error::config(format!(
                "unknown storage backend '{other}' (expected 'memory' or 'file')"
            ))),
        }
    }
}

/// `[storage]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Section storage backend.
    pub backend: Backend,
    /// Root for the file backend.
    pub data_dir: PathBuf,
    /// Where uploaded images are written.
    pub uploads_dir: PathBuf,
    /// URL prefix uploads are served under.
    pub public_upload_prefix: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: Backend::File,
            data_dir: PathBuf::from("data"),
            uploads_dir: PathBuf::from("uploads"),
            public_upload_prefix: "/uploads".to_string(),
        }
    }
}

/// `[logging]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info,verdant=debug".to_string(),
        }
    }
}

impl VerdantConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::config(format!("invalid config: {e}")))
    }

    /// Serialize as pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Resolve, read, and override the configuration from the process env.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        Self::load_with(explicit, |key| std::env::var(key).ok())
    }

    /// [`load`](Self::load) with an injectable environment.
    pub fn load_with<F>(explicit: Option<&str>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let explicit = explicit
            .map(str::to_string)
            .or_else(|| env(CONFIG_ENV).filter(|p| !p.is_empty()));
        let mut config = match resolve_config_path(explicit.as_deref()) {
            Some(path) => Self::read(&path, explicit.is_some())?,
            None => Self::default(),
        };
        config.apply_env(env)?;
        Ok(config)
    }

    fn read(path: &Path, required: bool) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                tracing::debug!(path = %path.display(), "Loaded config file");
                Self::from_toml_str(&text)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => Ok(Self::default()),
            Err(e) => Err(Error::io_with_path(e, path)),
        }
    }

    /// Apply `VERDANT_*` overrides.
    pub fn apply_env<F>(&mut self, env: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = env("VERDANT_HOST") {
            self.server.host = host;
        }
        if let Some(port) = env("VERDANT_PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| Error::config(format!("VERDANT_PORT '{port}' is not a port number")))?;
        }
        if let Some(dir) = env("VERDANT_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = env("VERDANT_UPLOADS_DIR") {
            self.storage.uploads_dir = PathBuf::from(dir);
        }
        if let Some(backend) = env("VERDANT_STORAGE_BACKEND") {
            self.storage.backend = backend.parse()?;
        }
        Ok(())
    }

    /// `host:port` for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// The config file that would be read, if any.
///
/// An explicit path is returned even when it does not exist, so that a typo
/// surfaces as an error instead of silently falling back to defaults.
pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(PathBuf::from(path));
    }
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|dir| dir.join("verdant").join("config.toml"))
        .filter(|path| path.exists())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = VerdantConfig::default();
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.storage.backend, Backend::File);
        assert_eq!(config.storage.public_upload_prefix, "/uploads");
        assert!(config.server.max_body_bytes > 10 * 1024 * 1024);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = VerdantConfig::from_toml_str(
            r#"
            [server]
            port = 8080

            [storage]
            backend = "memory"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.storage.backend, Backend::Memory);
        assert_eq!(config.logging.filter, "info,verdant=debug");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = VerdantConfig::from_toml_str("[server]\nport = \"nope\"").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = VerdantConfig::default();
        let text = config.to_toml_string().unwrap();
        assert_eq!(VerdantConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = VerdantConfig::default();
        config
            .apply_env(env(&[
                ("VERDANT_HOST", "0.0.0.0"),
                ("VERDANT_PORT", "9000"),
                ("VERDANT_DATA_DIR", "/srv/data"),
                ("VERDANT_STORAGE_BACKEND", "Memory"),
            ]))
            .unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:9000");
        assert_eq!(config.storage.data_dir, PathBuf::from("/srv/data"));
        assert_eq!(config.storage.backend, Backend::Memory);
    }

    #[test]
    fn test_bad_env_values() {
        let mut config = VerdantConfig::default();
        assert!(config.apply_env(env(&[("VERDANT_PORT", "http")])).is_err());
        assert!(
            config
                .apply_env(env(&[("VERDANT_STORAGE_BACKEND", "s3")]))
                .is_err()
        );
    }

    #[test]
    fn test_load_explicit_file_then_env() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("verdant.toml");
        std::fs::write(&path, "[server]\nport = 4000\nhost = \"0.0.0.0\"\n").unwrap();

        let config =
            VerdantConfig::load_with(path.to_str(), env(&[("VERDANT_PORT", "4001")])).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 4001);
    }

    #[test]
    fn test_load_config_env_var() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("site.toml");
        std::fs::write(&path, "[storage]\nbackend = \"memory\"\n").unwrap();

        let config =
            VerdantConfig::load_with(None, env(&[(CONFIG_ENV, path.to_str().unwrap())])).unwrap();
        assert_eq!(config.storage.backend, Backend::Memory);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(VerdantConfig::load_with(path.to_str(), env(&[])).is_err());
    }
}
