use super::schema::QuillConfig;
use quill_common::QuillError;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

const LOCAL_FILE: &str = "./quill.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

impl From<ConfigError> for QuillError {
    fn from(e: ConfigError) -> Self {
        QuillError::Config(e.to_string())
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Config for a run: `explicit` when given, otherwise the first file
    /// found by [`ConfigLoader::search_path`], otherwise the defaults.
    pub async fn load(explicit: Option<&Path>) -> quill_common::Result<QuillConfig> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::search_path().into_iter().find(|p| p.exists()),
        };
        match path {
            Some(path) => {
                debug!("loading config from {}", path.display());
                Ok(Self::load_from(&path).await?)
            }
            None => {
                debug!("no config file found, using defaults");
                Ok(QuillConfig::default())
            }
        }
    }

    /// Candidate files in lookup order:
    /// 1. ./quill.yaml
    /// 2. ~/.quill/config.yaml
    pub fn search_path() -> Vec<PathBuf> {
        let mut candidates = vec![PathBuf::from(LOCAL_FILE)];
        if let Some(home) = dirs::home_dir() {
            candidates.push(home.join(".quill").join("config.yaml"));
        }
        candidates
    }

    pub async fn load_from(path: &Path) -> Result<QuillConfig, ConfigError> {
        let content = tokio::fs::read_to_string(path).await?;
        let config: QuillConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}
