//! Configuration for the chatbot

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Main chatbot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Path of the persisted knowledge base (default: knowledge_base.json in
    /// the working directory)
    #[serde(default = "default_knowledge_path")]
    pub knowledge_path: PathBuf,
}

fn default_knowledge_path() -> PathBuf {
    PathBuf::from("knowledge_base.json")
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            knowledge_path: default_knowledge_path(),
        }
    }
}

impl BotConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("cannot read '{}': {}", path.display(), e)))?;
        toml::from_str(&data)
            .map_err(|e| Error::config(format!("invalid config '{}': {}", path.display(), e)))
    }
}
