//! Signature-keyed metadata repositories.
//!
//! Saved charts and the recents list are keyed by dataset signature, so a
//! re-upload of a matching file reattaches to its configuration. Both stores
//! are explicit instances handed to the pipeline boundary, never ambient
//! singletons. Only metadata is persisted; row data never touches disk.

use crate::constants::MAX_RECENTS;
use crate::types::{ChartConfig, ChartSpec, DatasetMetadata, epoch_millis};
use parking_lot::RwLock;
use serde::{Serialize, de::DeserializeOwned};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

/// Saved chart specs grouped by dataset signature.
pub struct ChartStore {
    path: Option<PathBuf>,
    charts: RwLock<HashMap<String, Vec<ChartSpec>>>,
}

impl ChartStore {
    /// In-memory store (tests, ephemeral sessions)
    pub fn in_memory() -> Self {
        Self {
            path: None,
            charts: RwLock::new(HashMap::new()),
        }
    }

    /// Store backed by a JSON file, loading existing content when present.
    /// A missing or unreadable file starts empty rather than failing; the
    /// first save recreates it.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let charts = load_json(&path).unwrap_or_default();
        Self {
            path: Some(path),
            charts: RwLock::new(charts),
        }
    }

    /// Store at the platform data directory default location
    pub fn at_default_path() -> Self {
        Self::at_path(default_store_path("charts.json"))
    }

    /// Save a chart under `signature`. A blank id gets a fresh one; both
    /// timestamps are stamped now.
    pub fn add(&self, signature: &str, mut config: ChartConfig) -> ChartSpec {
        if config.id.is_empty() {
            config.id = Uuid::new_v4().to_string();
        }
        config.dataset_signature = signature.to_string();

        let now = epoch_millis();
        let spec = ChartSpec {
            config,
            created_at: now,
            updated_at: now,
        };

        self.charts
            .write()
            .entry(signature.to_string())
            .or_default()
            .push(spec.clone());
        debug!(signature, chart_id = %spec.config.id, "chart added");
        self.persist();
        spec
    }

    /// Edit a chart in place and bump its `updated_at`. Returns false when
    /// no chart with that id exists under the signature.
    pub fn update(
        &self,
        signature: &str,
        chart_id: &str,
        edit: impl FnOnce(&mut ChartConfig),
    ) -> bool {
        let mut charts = self.charts.write();
        let Some(spec) = charts
            .get_mut(signature)
            .and_then(|list| list.iter_mut().find(|s| s.config.id == chart_id))
        else {
            return false;
        };

        edit(&mut spec.config);
        spec.updated_at = epoch_millis();
        drop(charts);
        self.persist();
        true
    }

    pub fn delete(&self, signature: &str, chart_id: &str) -> bool {
        let mut charts = self.charts.write();
        let Some(list) = charts.get_mut(signature) else {
            return false;
        };
        let before = list.len();
        list.retain(|s| s.config.id != chart_id);
        let removed = list.len() != before;
        drop(charts);
        if removed {
            self.persist();
        }
        removed
    }

    /// Charts saved for this signature, oldest first
    pub fn get(&self, signature: &str) -> Vec<ChartSpec> {
        self.charts.read().get(signature).cloned().unwrap_or_default()
    }

    pub fn count(&self, signature: &str) -> usize {
        self.charts.read().get(signature).map_or(0, Vec::len)
    }

    /// Forget every chart under a signature
    pub fn clear(&self, signature: &str) {
        self.charts.write().remove(signature);
        self.persist();
    }

    fn persist(&self) {
        if let Some(path) = &self.path {
            save_json(path, &*self.charts.read());
        }
    }
}

/// Most recently opened datasets, newest first, deduplicated by signature.
pub struct RecentsStore {
    path: Option<PathBuf>,
    recents: RwLock<Vec<DatasetMetadata>>,
}

impl RecentsStore {
    pub fn in_memory() -> Self {
        Self {
            path: None,
            recents: RwLock::new(Vec::new()),
        }
    }

    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let recents = load_json(&path).unwrap_or_default();
        Self {
            path: Some(path),
            recents: RwLock::new(recents),
        }
    }

    pub fn at_default_path() -> Self {
        Self::at_path(default_store_path("recents.json"))
    }

    /// Record a dataset at the front of the list. An existing entry with the
    /// same signature moves to the front; the list never exceeds
    /// [`MAX_RECENTS`].
    pub fn add(&self, metadata: DatasetMetadata) {
        let mut recents = self.recents.write();
        recents.retain(|r| r.signature != metadata.signature);
        recents.insert(0, metadata);
        recents.truncate(MAX_RECENTS);
        drop(recents);
        self.persist();
    }

    /// Keep a recents entry's chart count in step with the chart store
    pub fn touch_chart_count(&self, signature: &str, chart_count: usize) {
        let mut recents = self.recents.write();
        for entry in recents.iter_mut() {
            if entry.signature == signature {
                entry.chart_count = chart_count;
            }
        }
        drop(recents);
        self.persist();
    }

    pub fn list(&self) -> Vec<DatasetMetadata> {
        self.recents.read().clone()
    }

    pub fn clear(&self) {
        self.recents.write().clear();
        self.persist();
    }

    fn persist(&self) {
        if let Some(path) = &self.path {
            save_json(path, &*self.recents.read());
        }
    }
}

fn default_store_path(file_name: &str) -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("plotstudio")
        .join(file_name)
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let content = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring corrupt store file");
            None
        }
    }
}

fn save_json<T: Serialize>(path: &Path, value: &T) {
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            warn!(path = %path.display(), error = %e, "failed to create store directory");
            return;
        }
    }
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            if let Err(e) = std::fs::write(path, json) {
                warn!(path = %path.display(), error = %e, "failed to save store");
            }
        }
        Err(e) => warn!(path = %path.display(), error = %e, "failed to serialize store"),
    }
}
