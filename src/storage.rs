//! Persistence for the bearer token.
//!
//! One key, `token`, in a small TOML file under the articles home.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<String>>;
    fn save(&self, token: &str) -> Result<()>;
    /// Removing a token that is not there is not an error.
    fn clear(&self) -> Result<()>;
}

pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_table(&self) -> Result<toml::Table> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(toml::Table::new()),
            Err(e) => return Err(e).with_context(|| format!("Could not read {}", self.path.display())),
        };
        content
            .parse::<toml::Table>()
            .with_context(|| format!("Could not parse {}", self.path.display()))
    }

    fn write_table(&self, doc: &toml::Table) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, doc.to_string())
            .with_context(|| format!("Could not write {}", self.path.display()))
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>> {
        let doc = self.read_table()?;
        Ok(doc
            .get("token")
            .and_then(|v| v.as_str())
            .filter(|t| !t.is_empty())
            .map(str::to_string))
    }

    fn save(&self, token: &str) -> Result<()> {
        let mut doc = self.read_table()?;
        doc.insert("token".to_string(), toml::Value::String(token.to_string()));
        self.write_table(&doc)
    }

    fn clear(&self) -> Result<()> {
        let mut doc = self.read_table()?;
        if doc.remove("token").is_none() {
            return Ok(());
        }
        self.write_table(&doc)
    }
}

/// Keeps the token for the lifetime of the process only.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryTokenStore {
    token: std::sync::Mutex<Option<String>>,
}

#[cfg(test)]
impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.token.lock().map_err(|_| anyhow::anyhow!("token store poisoned"))?.clone())
    }

    fn save(&self, token: &str) -> Result<()> {
        *self.token.lock().map_err(|_| anyhow::anyhow!("token store poisoned"))? = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.token.lock().map_err(|_| anyhow::anyhow!("token store poisoned"))? = None;
        Ok(())
    }
}
