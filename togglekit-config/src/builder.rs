// SettingsBuilder - compose a ConfigManager from several sources

use crate::{ConfigManager, FileFormat, Result};
use std::path::PathBuf;

/// Builder that loads settings in a fixed order: `.env`, environment
/// variables, then files in the order they were added. Later sources
/// overwrite earlier ones.
#[derive(Debug, Default)]
pub struct SettingsBuilder {
    prefix: Option<String>,
    load_env: bool,
    load_dotenv: bool,
    dotenv_path: Option<PathBuf>,
    files: Vec<(PathBuf, Option<FileFormat>)>,
}

impl SettingsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set environment variable prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Enable loading from environment variables
    pub fn load_env(mut self) -> Self {
        self.load_env = true;
        self
    }

    /// Enable loading from a .env file
    pub fn load_dotenv(mut self, path: Option<PathBuf>) -> Self {
        self.load_dotenv = true;
        self.dotenv_path = path;
        self
    }

    /// Add a settings file with an explicit format
    pub fn add_file(mut self, path: impl Into<PathBuf>, format: FileFormat) -> Self {
        self.files.push((path.into(), Some(format)));
        self
    }

    /// Add a settings file, detecting the format from its name
    pub fn add_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push((path.into(), None));
        self
    }

    pub fn build(self) -> Result<ConfigManager> {
        let manager = match self.prefix {
            Some(prefix) => ConfigManager::with_prefix(prefix),
            None => ConfigManager::new(),
        };

        // load_dotenv also reads the environment
        if self.load_dotenv {
            manager.load_dotenv(self.dotenv_path.as_deref())?;
        } else if self.load_env {
            manager.load_env()?;
        }

        for (path, format) in self.files {
            match format {
                Some(format) => manager.load_file(&path, format)?,
                None => manager.load_path(&path)?,
            }
        }

        Ok(manager)
    }
}
