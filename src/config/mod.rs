use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

static CONFIG: OnceCell<Config> = OnceCell::const_new();

mod config_dir;
pub use config_dir::{find_config_file, read_config, read_config_from};

mod error;
pub use error::{ConfigError, ConfigResult};
use tokio::sync::OnceCell;

#[derive(Debug, Deserialize)]
pub struct Config {
    host: Host,
    app: App,
    #[serde(default)]
    uploads: Uploads,
}

#[derive(Debug, Deserialize)]
pub struct Host {
    bindto: String,
}

#[derive(Debug, Deserialize)]
pub struct App {
    jwt: String,
    #[serde(default)]
    docs: bool,
    /// JSON course document to start from.
    course_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Disk,
    #[default]
    Simulated,
}

#[derive(Debug, Deserialize)]
pub struct Uploads {
    #[serde(default = "default_uploads_dir")]
    dir: PathBuf,
    #[serde(default)]
    backend: StorageBackend,
    #[serde(default = "default_simulated_delay_ms")]
    simulated_delay_ms: u64,
    /// Request body limit for uploads, in bytes.
    #[serde(default = "default_max_bytes")]
    max_bytes: usize,
}

fn default_uploads_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_max_bytes() -> usize {
    crate::uploader::DEFAULT_MAX_UPLOAD_BYTES
}

fn default_simulated_delay_ms() -> u64 {
    crate::uploader::DEFAULT_SIMULATED_DELAY.as_millis() as u64
}

impl Default for Uploads {
    fn default() -> Self {
        Self {
            dir: default_uploads_dir(),
            backend: StorageBackend::default(),
            simulated_delay_ms: default_simulated_delay_ms(),
            max_bytes: default_max_bytes(),
        }
    }
}

impl Config {
    #[tracing::instrument]
    pub async fn get_or_init(use_local: bool) -> &'static Config {
        CONFIG
            .get_or_init(|| async {
                let read_cfg = |use_local| -> ConfigResult<Self> {
                    let bytes = read_config(use_local)?;
                    Self::from_slice(&bytes)
                };

                let config = match read_cfg(use_local) {
                    Ok(c) => c,
                    Err(e) => {
                        if !matches!(e, error::ConfigError::ConfigNotFound(_)) {
                            crate::error::log_error(&e);
                        }
                        tracing::error!("Config not found.");
                        std::process::exit(1);
                    }
                };

                config
            })
            .await
    }

    pub fn from_slice(bytes: &[u8]) -> ConfigResult<Self> {
        let config: Self = toml::from_slice(bytes)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.host.bindto.trim().is_empty() {
            return Err(ConfigError::invalid("host.bindto", "must not be empty"));
        }
        if self.app.jwt.is_empty() {
            return Err(ConfigError::invalid("app.jwt", "a signing secret is required"));
        }
        if self.uploads.max_bytes == 0 {
            return Err(ConfigError::invalid("uploads.max_bytes", "must be greater than zero"));
        }
        if self.uploads.backend == StorageBackend::Disk && self.uploads.dir.as_os_str().is_empty() {
            return Err(ConfigError::invalid("uploads.dir", "disk storage needs a directory"));
        }
        Ok(())
    }

    #[inline]
    pub fn host(&self) -> &Host {
        &self.host
    }

    #[inline]
    pub fn app(&self) -> &App {
        &self.app
    }

    #[inline]
    pub fn uploads(&self) -> &Uploads {
        &self.uploads
    }
}

impl Host {
    #[inline]
    pub fn bindto(&self) -> &str {
        &self.bindto
    }
}

impl App {
    #[inline]
    pub fn jwt(&self) -> &str {
        &self.jwt
    }

    #[inline]
    pub fn docs(&self) -> bool {
        self.docs
    }

    #[inline]
    pub fn course_file(&self) -> Option<&Path> {
        self.course_file.as_deref()
    }
}

impl Uploads {
    #[inline]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[inline]
    pub fn backend(&self) -> StorageBackend {
        self.backend
    }

    #[inline]
    pub fn simulated_delay(&self) -> Duration {
        Duration::from_millis(self.simulated_delay_ms)
    }

    #[inline]
    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }
}
