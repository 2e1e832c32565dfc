//! Flat-file persistence for the question/answer knowledge base

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Mapping from question text to answer text. Keys are unique and
/// case-sensitive as stored; iteration order is unspecified.
pub type KnowledgeBase = HashMap<String, String>;

/// Knowledge store that persists the base as one flat JSON object
pub struct KnowledgeStore {
    path: PathBuf,
}

impl KnowledgeStore {
    /// Create a store backed by the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the knowledge base from disk. A missing file is a first-run
    /// condition and yields an empty base; malformed JSON propagates.
    pub fn load(&self) -> Result<KnowledgeBase> {
        if !self.path.exists() {
            tracing::debug!("no knowledge base at {}, starting empty", self.path.display());
            return Ok(KnowledgeBase::new());
        }

        let data = fs::read_to_string(&self.path)?;
        let base: KnowledgeBase = serde_json::from_str(&data)?;
        tracing::info!("loaded {} entries from {}", base.len(), self.path.display());
        Ok(base)
    }

    /// Rewrite the whole base to disk. The new content lands in a temporary
    /// file in the same directory and replaces the target in one rename, so
    /// an interrupted write never truncates existing knowledge.
    pub fn save(&self, base: &KnowledgeBase) -> Result<()> {
        let data = serde_json::to_string_pretty(base)?;

        // Parent of a bare filename is the empty path.
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(data.as_bytes())?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        tracing::debug!("saved {} entries to {}", base.len(), self.path.display());
        Ok(())
    }
}

/// Distinct lower-cased whitespace tokens across all question keys. A pure
/// function of the base; recomputed in full whenever the base changes.
pub fn vocabulary(base: &KnowledgeBase) -> HashSet<String> {
    let mut vocab = HashSet::new();
    for key in base.keys() {
        vocab.extend(key.split_whitespace().map(str::to_lowercase));
    }
    vocab
}
