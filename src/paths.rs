//! Path resolution for the articles home directory.
//!
//! ARTICLES_HOME resolution order:
//! 1. ARTICLES_HOME environment variable (if set)
//! 2. ~/.config/articles (default)

use anyhow::{Context, Result};
use std::path::PathBuf;

pub fn articles_home() -> Result<PathBuf> {
    if let Ok(home) = std::env::var("ARTICLES_HOME") {
        return Ok(PathBuf::from(home));
    }
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("articles"))
}

/// User config file, merged over the built-in defaults.
pub fn config_path() -> Result<PathBuf> {
    Ok(articles_home()?.join("config.toml"))
}

pub fn default_token_path() -> Result<PathBuf> {
    Ok(articles_home()?.join("session.toml"))
}

pub fn default_log_path() -> Result<PathBuf> {
    Ok(articles_home()?.join("articles.log"))
}

/// Expands `~` and `$VARS` in a configured path.
pub fn expand(raw: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(raw).with_context(|| format!("Could not expand path '{}'", raw))?;
    Ok(PathBuf::from(expanded.into_owned()))
}
