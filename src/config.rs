use std::collections::HashMap;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;
use url::Url;

use crate::client::API_ENDPOINT;
use crate::error::{LinearError, Result};

#[derive(Deserialize, Default, Debug)]
pub struct Config {
    pub token: Option<String>,
    pub endpoint: Option<String>,
    /// Template variables available to every task input.
    #[serde(default)]
    pub vars: HashMap<String, String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(config_path).map_err(|e| LinearError::ConfigRead {
                path: config_path.to_path_buf(),
                source: e,
            })?;

        toml::from_str(&contents).map_err(|e| LinearError::ConfigParse {
            path: config_path.to_path_buf(),
            source: e,
        })
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "linear-tasks")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(LinearError::NoConfigDir)
    }

    /// Token template: explicit flag, then `LINEAR_TOKEN`, then the config file.
    pub fn token(&self, explicit: Option<&str>) -> Result<String> {
        if let Some(token) = explicit {
            return Ok(token.to_string());
        }

        if let Ok(token) = std::env::var("LINEAR_TOKEN") {
            return Ok(token);
        }

        self.token.clone().ok_or(LinearError::MissingToken)
    }

    /// GraphQL endpoint: `LINEAR_ENDPOINT`, then the config file, then Linear's API.
    pub fn endpoint(&self) -> Result<Url> {
        resolve_endpoint(std::env::var("LINEAR_ENDPOINT").ok(), self.endpoint.as_deref())
    }
}

fn resolve_endpoint(from_env: Option<String>, from_file: Option<&str>) -> Result<Url> {
    let raw = from_env
        .or_else(|| from_file.map(String::from))
        .unwrap_or_else(|| API_ENDPOINT.to_string());

    Ok(Url::parse(&raw)?)
}
