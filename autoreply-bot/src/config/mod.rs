//! Configuration module for autoreply-bot.
//!
//! Loads the TOML config file, the stream parameters file and checks that
//! every file the pipeline needs is present before anything connects.

pub mod file;
pub mod params;

use crate::config::file::{ApiConfig, FileConfig};
use crate::config::params::ParamsFile;
use autoreply_core::config::PipelineConfig;
use autoreply_core::entities::DedupSettings;
use autoreply_sdk::config::{ClientSettings, Credentials};
use autoreply_sdk::objects::{StreamMode, StreamRequest, UnknownStreamMode};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("required file {0:?} does not exist")]
    MissingFile(PathBuf),

    #[error(transparent)]
    InvalidMode(#[from] UnknownStreamMode),

    #[error("validation error: {0}")]
    Validation(String),
}

/// Paths the bot works with after validation.
#[derive(Debug, Clone)]
pub struct FilesConfig {
    pub status_file: PathBuf,
    pub parameters_file: PathBuf,
}

/// Loaded configuration result containing all parts.
#[derive(Debug)]
pub struct LoadedConfig {
    pub credentials: Credentials,
    pub stream: StreamRequest,
    pub client: ClientSettings,
    pub files: FilesConfig,
    pub pipeline: PipelineConfig,
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Create a new config loader.
    pub fn new(config_path: impl AsRef<Path>) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
        }
    }

    /// Load and process the configuration.
    ///
    /// This will:
    /// 1. Check that the config, parameters and corpus files exist
    /// 2. Read and validate the TOML file
    /// 3. Parse the stream mode and, in filter mode, the parameters file
    /// 4. Build the loaded configuration
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        require_file(&self.config_path)?;
        let file_config: FileConfig = read_toml(&self.config_path)?;

        require_file(&file_config.files.parameters_file)?;
        require_file(&file_config.files.status_file)?;

        self.validate(&file_config)?;

        let mode: StreamMode = file_config.stream.mode.parse()?;
        let stream = match mode {
            StreamMode::Sample => StreamRequest::sample(),
            StreamMode::Filter => {
                let params: ParamsFile = read_toml(&file_config.files.parameters_file)?;
                let params = params.request_params();
                if params.is_empty() {
                    return Err(ConfigError::Validation(format!(
                        "filter mode needs at least one parameter in {:?}",
                        file_config.files.parameters_file
                    )));
                }
                StreamRequest::filter(params)
            }
        };

        Ok(self.build_loaded_config(file_config, stream))
    }

    fn validate(&self, config: &FileConfig) -> Result<(), ConfigError> {
        let fields = [
            ("api_key.key", &config.api_key.key),
            ("api_key.secret", &config.api_key.secret),
            ("token.key", &config.token.key),
            ("token.secret", &config.token.secret),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ConfigError::Validation(format!("{name} must not be empty")));
        }

        for (name, url) in [
            ("api.stream_url", &config.api.stream_url),
            ("api.rest_url", &config.api.rest_url),
        ] {
            match url {
                Some(url) if !url.path().ends_with('/') => {
                    return Err(ConfigError::Validation(format!(
                        "{name} must end with '/', got {url}"
                    )));
                }
                _ => {}
            }
        }

        if config.api.request_timeout_secs == Some(0) {
            return Err(ConfigError::Validation(
                "api.request_timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    fn build_loaded_config(&self, file_config: FileConfig, stream: StreamRequest) -> LoadedConfig {
        let pipeline = PipelineConfig {
            dedup: DedupSettings::new(file_config.files.mentioned_file),
            ..PipelineConfig::default()
        };

        LoadedConfig {
            credentials: Credentials::new(
                file_config.api_key.key,
                file_config.api_key.secret,
                file_config.token.key,
                file_config.token.secret,
            ),
            stream,
            client: convert_api(file_config.api),
            files: FilesConfig {
                status_file: file_config.files.status_file,
                parameters_file: file_config.files.parameters_file,
            },
            pipeline,
        }
    }
}

fn convert_api(api: ApiConfig) -> ClientSettings {
    let defaults = ClientSettings::default();
    ClientSettings {
        stream_url: api.stream_url.unwrap_or(defaults.stream_url),
        rest_url: api.rest_url.unwrap_or(defaults.rest_url),
        proxy: api.proxy,
        request_timeout: api
            .request_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout),
    }
}

fn require_file(path: &Path) -> Result<(), ConfigError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ConfigError::MissingFile(path.to_path_buf()))
    }
}

fn read_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
