use anyhow::Context;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::paths;

pub const DEFAULT_BASE_URL: &str = "http://localhost:9000";
pub const DEFAULT_LOGIN_PATH: &str = "/api/login";
pub const DEFAULT_ARTICLES_PATH: &str = "/api/articles";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub base_url: String,
    pub login_path: String,
    pub articles_path: String,
    pub token_file: Option<String>,
    pub log_file: Option<String>,
}

impl Settings {
    pub fn new(base_url: Option<&str>) -> anyhow::Result<Self> {
        let user_config_path = paths::config_path()?;
        Self::load_from(&user_config_path, base_url).context("Could not load configuration")
    }

    pub fn load_from(user_config_path: &Path, base_url: Option<&str>) -> Result<Self, ConfigError> {
        let s = Config::builder()
            // 1. Built-in defaults.
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("login_path", DEFAULT_LOGIN_PATH)?
            .set_default("articles_path", DEFAULT_ARTICLES_PATH)?
            // 2. User's global config.
            .add_source(File::from(user_config_path.to_path_buf()).required(false))
            // 3. Local articles.toml from CWD.
            .add_source(File::with_name("articles.toml").required(false))
            // 4. ARTICLES_BASE_URL and friends.
            .add_source(Environment::with_prefix("ARTICLES"))
            // 5. --base-url
            .set_override_option("base_url", base_url.map(str::to_string))?
            .build()?;

        s.try_deserialize()
    }

    pub fn login_url(&self) -> String {
        join_url(&self.base_url, &self.login_path)
    }

    pub fn articles_url(&self) -> String {
        join_url(&self.base_url, &self.articles_path)
    }

    pub fn article_url(&self, article_id: u64) -> String {
        format!("{}/{}", self.articles_url(), article_id)
    }

    pub fn token_path(&self) -> anyhow::Result<PathBuf> {
        match &self.token_file {
            Some(raw) => paths::expand(raw),
            None => paths::default_token_path(),
        }
    }

    pub fn log_path(&self) -> anyhow::Result<PathBuf> {
        match &self.log_file {
            Some(raw) => paths::expand(raw),
            None => paths::default_log_path(),
        }
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Writes `base_url` into the user config file, keeping every other key.
pub fn save_base_url(user_config_path: &Path, base_url: &str) -> Result<(), anyhow::Error> {
    let config_str = fs::read_to_string(user_config_path).unwrap_or_default();
    let mut doc = config_str.parse::<toml::Table>()?;

    doc.insert("base_url".to_string(), toml::Value::String(base_url.to_string()));

    if let Some(parent) = user_config_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(user_config_path, doc.to_string())?;

    Ok(())
}
