use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::session;

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds. Requests wait indefinitely when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "session::default_session_dir")]
    pub directory: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            directory: session::default_session_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default value functions
fn default_base_url() -> String { "https://anshuman365.pythonanywhere.com/api".to_string() }
fn default_log_level() -> String { "info".to_string() }

/// Get default config file path
/// Uses ~/.config/invoice-desk/config.toml
pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("invoice-desk")
        .join("config.toml")
}

fn read_config(path: &Path) -> anyhow::Result<Config> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Specified(PathBuf),
    Local(PathBuf),
    DefaultPath(PathBuf),
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Specified(p) | ConfigSource::Local(p) | ConfigSource::DefaultPath(p) => {
                write!(f, "{}", p.display())
            }
            ConfigSource::Defaults => f.write_str("built-in defaults"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: ConfigSource,
    /// Why ./config.toml was passed over, when it exists but could not be used
    pub skipped_local: Option<String>,
}

/// Load config from file, or return defaults if not found.
///
/// Loading order:
/// 1. Specified path (if provided)
/// 2. ./config.toml (if exists)
/// 3. default_config_path() (usually ~/.config/invoice-desk/config.toml)
pub fn load_config(path: Option<PathBuf>) -> anyhow::Result<LoadedConfig> {
    load_config_from(path, Path::new("config.toml"), &default_config_path())
}

fn load_config_from(
    path: Option<PathBuf>,
    local_config: &Path,
    default_path: &Path,
) -> anyhow::Result<LoadedConfig> {
    if let Some(config_path) = path {
        if config_path.exists() {
            let config = read_config(&config_path)?;
            tracing::info!("Loaded config from specified path {:?}", config_path);
            return Ok(LoadedConfig {
                config,
                source: ConfigSource::Specified(config_path),
                skipped_local: None,
            });
        } else {
            anyhow::bail!("Specified config file not found: {:?}", config_path);
        }
    }

    let mut skipped_local = None;
    if local_config.exists() {
        match read_config(local_config) {
            Ok(config) => {
                tracing::info!("Loaded config from current directory {:?}", local_config);
                return Ok(LoadedConfig {
                    config,
                    source: ConfigSource::Local(local_config.to_path_buf()),
                    skipped_local: None,
                });
            }
            Err(e) => {
                tracing::error!("Failed to load {:?}: {}. Falling back to default path.", local_config, e);
                skipped_local = Some(e.to_string());
            }
        }
    }

    if default_path.exists() {
        let config = read_config(default_path)?;
        tracing::info!("Loaded config from default path {:?}", default_path);
        Ok(LoadedConfig {
            config,
            source: ConfigSource::DefaultPath(default_path.to_path_buf()),
            skipped_local,
        })
    } else {
        tracing::info!("No config file found, using defaults");
        Ok(LoadedConfig {
            config: Config::default(),
            source: ConfigSource::Defaults,
            skipped_local,
        })
    }
}

/// Expand ~ in path to home directory
pub fn expand_path(path: &Path) -> PathBuf {
    if let Some(rest) = path.to_str().and_then(|s| s.strip_prefix("~/")) {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[test]
    fn partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [api]
            base_url = "http://localhost:5000/api"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "http://localhost:5000/api");
        assert_eq!(config.api.timeout(), None);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.session.directory, session::default_session_dir());
    }

    #[test]
    fn explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(load_config(Some(missing)).is_err());

        let present = dir.path().join("config.toml");
        std::fs::write(
            &present,
            "[api]\ntimeout_secs = 30\n[session]\ndirectory = \"~/sessions\"\n",
        )
        .unwrap();
        let loaded = load_config(Some(present.clone())).unwrap();
        assert_eq!(loaded.source, ConfigSource::Specified(present));
        let config = loaded.config;
        assert_eq!(config.api.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.api.base_url, default_base_url());
        assert_eq!(config.session.directory, PathBuf::from("~/sessions"));
    }

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn malformed_local_config_is_reported_and_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("config.toml");
        std::fs::write(&local, "[api]\nbase_url = 5\n").unwrap();
        let default_path = dir.path().join("home.toml");
        std::fs::write(&default_path, "[api]\nbase_url = \"http://home/api\"\n").unwrap();

        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let loaded = tracing::subscriber::with_default(subscriber, || {
            load_config_from(None, &local, &default_path).unwrap()
        });

        assert_eq!(loaded.source, ConfigSource::DefaultPath(default_path));
        assert_eq!(loaded.config.api.base_url, "http://home/api");
        assert!(loaded.skipped_local.is_some());

        let logged = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert!(logged.contains("ERROR"), "{}", logged);
        assert!(logged.contains("Falling back"), "{}", logged);
    }

    #[test]
    fn no_files_means_builtin_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config_from(
            None,
            &dir.path().join("config.toml"),
            &dir.path().join("home.toml"),
        )
        .unwrap();
        assert_eq!(loaded.source, ConfigSource::Defaults);
        assert_eq!(loaded.source.to_string(), "built-in defaults");
        assert!(loaded.skipped_local.is_none());
    }

    #[test]
    fn tilde_expansion() {
        let plain = PathBuf::from("/tmp/session");
        assert_eq!(expand_path(&plain), plain);
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_path(Path::new("~/x")), home.join("x"));
        }
    }
}
