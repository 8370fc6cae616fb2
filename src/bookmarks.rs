//! Watch-list state (followed tickers and politicians)
//!
//! Membership lives in memory as two sets; every toggle flushes both sets
//! synchronously to an injected key-value collaborator. Single writer,
//! single process, so there is no conflict handling to do.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::TrackerError;

const TICKERS_KEY: &str = "saved_tickers";
const POLITICIANS_KEY: &str = "saved_politicians";

/// Minimal key-value collaborator the bookmark store persists through.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Vec<String>>>;
    fn set(&mut self, key: &str, values: &[String]) -> Result<()>;
}

/// JSON-file-backed key-value store. The whole map is rewritten on every
/// `set`; bookmark sets are tiny so that is fine.
pub struct JsonFileStore {
    path: PathBuf,
    entries: HashMap<String, Vec<String>>,
}

#[derive(Serialize, Deserialize, Default)]
struct StoreFile {
    entries: HashMap<String, Vec<String>>,
}

impl JsonFileStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read bookmark file {:?}", path))?;
            let file: StoreFile = serde_json::from_str(&text).map_err(|err| {
                TrackerError::BookmarkError(format!("{:?} is not valid JSON: {}", path, err))
            })?;
            file.entries
        } else {
            HashMap::new()
        };
        Ok(Self { path, entries })
    }

    /// Default location under the platform config directory.
    pub fn default_path() -> Result<PathBuf> {
        let config = dir_spec::config_home()
            .context("could not determine a config directory for bookmarks")?;
        Ok(config.join("congresswatch").join("bookmarks.json"))
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {:?}", parent))?;
        }
        let file = StoreFile {
            entries: self.entries.clone(),
        };
        let text = serde_json::to_string_pretty(&file)?;
        std::fs::write(&self.path, text)
            .with_context(|| format!("failed to write bookmark file {:?}", self.path))?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<String>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, values: &[String]) -> Result<()> {
        self.entries.insert(key.to_string(), values.to_vec());
        self.flush()
    }
}

/// In-memory store for tests and ephemeral runs.
#[derive(Default)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<String>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, values: &[String]) -> Result<()> {
        self.entries.insert(key.to_string(), values.to_vec());
        Ok(())
    }
}

pub struct BookmarkStore {
    tickers: HashSet<String>,
    politicians: HashSet<String>,
    store: Box<dyn KeyValueStore>,
}

impl BookmarkStore {
    /// Load both sets from the collaborator. Missing keys mean empty sets.
    pub fn load(store: Box<dyn KeyValueStore>) -> Result<Self> {
        let tickers = store
            .get(TICKERS_KEY)?
            .unwrap_or_default()
            .into_iter()
            .collect();
        let politicians = store
            .get(POLITICIANS_KEY)?
            .unwrap_or_default()
            .into_iter()
            .collect();
        Ok(Self {
            tickers,
            politicians,
            store,
        })
    }

    pub fn toggle_ticker(&mut self, ticker: &str) -> Result<bool> {
        let saved = toggle(&mut self.tickers, ticker);
        debug!("ticker {:?} saved={}", ticker, saved);
        self.persist()?;
        Ok(saved)
    }

    pub fn toggle_politician(&mut self, name: &str) -> Result<bool> {
        let saved = toggle(&mut self.politicians, name);
        debug!("politician {:?} saved={}", name, saved);
        self.persist()?;
        Ok(saved)
    }

    pub fn is_ticker_saved(&self, ticker: &str) -> bool {
        self.tickers.contains(ticker)
    }

    pub fn is_politician_saved(&self, name: &str) -> bool {
        self.politicians.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty() && self.politicians.is_empty()
    }

    pub fn saved_tickers(&self) -> impl Iterator<Item = &str> {
        self.tickers.iter().map(String::as_str)
    }

    pub fn saved_politicians(&self) -> impl Iterator<Item = &str> {
        self.politicians.iter().map(String::as_str)
    }

    fn persist(&mut self) -> Result<()> {
        let tickers: Vec<String> = self.tickers.iter().cloned().collect();
        let politicians: Vec<String> = self.politicians.iter().cloned().collect();
        self.store.set(TICKERS_KEY, &tickers)?;
        self.store.set(POLITICIANS_KEY, &politicians)?;
        Ok(())
    }
}

fn toggle(set: &mut HashSet<String>, value: &str) -> bool {
    if !set.remove(value) {
        set.insert(value.to_string());
        true
    } else {
        false
    }
}
