// Local overlay store using sled embedded database
// Holds webinars added or edited locally and the ids hidden by a local delete

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sled::Db;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::models::Webinar;

const WEBINARS_TREE: &str = "webinars";
const HIDDEN_TREE: &str = "hidden";

/// Environment override for the store location
pub const STORE_ENV: &str = "TALENTUP_DB_PATH";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OverlayEntry {
    webinar: Webinar,
    saved_at: DateTime<Utc>,
}

/// Storage manager for the local overlay
pub struct LocalStore {
    db: Db,
}

impl LocalStore {
    /// Store directory: $TALENTUP_DB_PATH, else next to the config file
    pub fn db_path(config: &Config) -> Result<PathBuf> {
        if let Ok(path) = std::env::var(STORE_ENV) {
            if !path.is_empty() {
                return Ok(PathBuf::from(path));
            }
        }

        config.data_dir()
    }

    /// Open the store for this config
    pub fn init(config: &Config) -> Result<Self> {
        Self::open(&Self::db_path(config)?)
    }

    pub fn open(path: &Path) -> Result<Self> {
        tracing::debug!("Opening sled database at {:?}", path);

        let db = sled::open(path).context("Failed to open sled database")?;

        Ok(Self { db })
    }

    /// Save an added or edited webinar, keyed by its id
    pub fn save_webinar(&self, webinar: &Webinar) -> Result<()> {
        let tree = self
            .db
            .open_tree(WEBINARS_TREE)
            .context("Failed to open webinars tree")?;

        // Editing keeps the original position among local additions
        let saved_at = match self.entry(&tree, &webinar.id)? {
            Some(existing) => existing.saved_at,
            None => Utc::now(),
        };

        let entry = OverlayEntry {
            webinar: webinar.clone(),
            saved_at,
        };
        let value = bincode::serialize(&entry).context("Failed to serialize webinar")?;

        tree.insert(webinar.id.as_bytes(), value)
            .context("Failed to insert webinar")?;

        // A re-saved record is visible again
        self.db
            .open_tree(HIDDEN_TREE)
            .context("Failed to open hidden tree")?
            .remove(webinar.id.as_bytes())
            .context("Failed to unhide webinar")?;

        self.db.flush().context("Failed to flush database")?;

        tracing::debug!("Saved webinar {} locally", webinar.id);
        Ok(())
    }

    fn entry(&self, tree: &sled::Tree, id: &str) -> Result<Option<OverlayEntry>> {
        match tree.get(id.as_bytes()).context("Failed to get webinar")? {
            Some(value) => Ok(Some(
                bincode::deserialize(&value).context("Failed to deserialize webinar")?,
            )),
            None => Ok(None),
        }
    }

    /// Get a locally saved webinar by ID
    pub fn get_webinar(&self, id: &str) -> Result<Option<Webinar>> {
        let tree = self
            .db
            .open_tree(WEBINARS_TREE)
            .context("Failed to open webinars tree")?;

        Ok(self.entry(&tree, id)?.map(|e| e.webinar))
    }

    /// Locally saved webinars, oldest first
    pub fn list_webinars(&self) -> Result<Vec<Webinar>> {
        let tree = self
            .db
            .open_tree(WEBINARS_TREE)
            .context("Failed to open webinars tree")?;

        let mut entries = Vec::new();

        for item in tree.iter() {
            let (_key, value) = item.context("Failed to iterate webinars")?;
            let entry: OverlayEntry =
                bincode::deserialize(&value).context("Failed to deserialize webinar")?;
            entries.push(entry);
        }

        entries.sort_by(|a, b| a.saved_at.cmp(&b.saved_at));

        Ok(entries.into_iter().map(|e| e.webinar).collect())
    }

    /// Hide a webinar from every list; returns false if it was already hidden
    pub fn hide_webinar(&self, id: &str) -> Result<bool> {
        let tree = self
            .db
            .open_tree(HIDDEN_TREE)
            .context("Failed to open hidden tree")?;

        let value = Utc::now().to_rfc3339();
        let newly_hidden = tree
            .insert(id.as_bytes(), value.as_bytes())
            .context("Failed to hide webinar")?
            .is_none();

        self.db.flush().context("Failed to flush database")?;

        tracing::debug!("Hid webinar {}", id);
        Ok(newly_hidden)
    }

    pub fn is_hidden(&self, id: &str) -> Result<bool> {
        let tree = self
            .db
            .open_tree(HIDDEN_TREE)
            .context("Failed to open hidden tree")?;

        tree.contains_key(id.as_bytes())
            .context("Failed to read hidden tree")
    }

    pub fn hidden_ids(&self) -> Result<Vec<String>> {
        let tree = self
            .db
            .open_tree(HIDDEN_TREE)
            .context("Failed to open hidden tree")?;

        let mut ids = Vec::new();
        for item in tree.iter() {
            let (key, _value) = item.context("Failed to iterate hidden ids")?;
            ids.push(String::from_utf8_lossy(&key).into_owned());
        }

        Ok(ids)
    }

    /// Drop every local edit
    pub fn reset(&self) -> Result<()> {
        for name in [WEBINARS_TREE, HIDDEN_TREE] {
            self.db
                .open_tree(name)
                .with_context(|| format!("Failed to open {} tree", name))?
                .clear()
                .with_context(|| format!("Failed to clear {} tree", name))?;
        }

        self.db.flush().context("Failed to flush database")?;

        tracing::info!("Local overlay cleared");
        Ok(())
    }

    /// Fetched collection with local edits applied: saved records replace by id
    /// in place, new ones are appended, hidden ids are dropped
    pub fn apply(&self, fetched: Vec<Webinar>) -> Result<Vec<Webinar>> {
        let mut local = self.list_webinars()?;
        let hidden = self.hidden_ids()?;

        let mut merged: Vec<Webinar> = fetched
            .into_iter()
            .map(|webinar| {
                match local.iter().position(|l| l.id == webinar.id) {
                    Some(idx) => local.remove(idx),
                    None => webinar,
                }
            })
            .collect();
        merged.extend(local);
        merged.retain(|w| !hidden.contains(&w.id));

        Ok(merged)
    }
}
