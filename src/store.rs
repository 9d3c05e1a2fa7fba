//! The destination key/value store.
//!
//! The loader only needs three things from a host store: read a value by
//! dotted path (for reference resolution), replace the subtree at a path
//! (for merging), and say whether its contents came from a prebuilt
//! snapshot. [`ConfigStore`] captures exactly that; [`MemoryStore`] is the
//! in-process implementation.

use std::path::Path;

use serde_yaml::Mapping;
use tracing::warn;

use crate::error::YamlfigError;
use crate::namespace::NamespacePath;
use crate::node::{self, ConfigNode};

/// Host-owned hierarchical configuration space.
pub trait ConfigStore {
    /// Value at a dotted path, if any.
    fn get(&self, dotted: &str) -> Option<ConfigNode>;

    /// Replace whatever lives at `path` with `node`. Sibling paths are left
    /// alone. The loader never passes an empty path.
    fn set(&mut self, path: &NamespacePath, node: ConfigNode);

    /// Whether the store was materialized from a snapshot, making file
    /// loading redundant.
    fn is_cached_from_snapshot(&self) -> bool {
        false
    }
}

/// In-memory store rooted at a single mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryStore {
    root: ConfigNode,
    cached: bool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            root: ConfigNode::Mapping(Mapping::new()),
            cached: false,
        }
    }

    /// Seed a value by dotted path, as a host would for its own settings.
    pub fn set_value(&mut self, dotted: &str, node: impl Into<ConfigNode>) {
        self.set(&NamespacePath::parse(dotted), node.into());
    }

    /// Mark the store as (not) materialized from a snapshot.
    pub fn set_cached(&mut self, cached: bool) {
        self.cached = cached;
    }

    pub fn tree(&self) -> &ConfigNode {
        &self.root
    }

    /// Rebuild a store from a JSON snapshot. The result reports itself as
    /// cached.
    pub fn load_snapshot(path: &Path) -> Result<Self, YamlfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| YamlfigError::io(path, e))?;
        let root: ConfigNode =
            serde_json::from_str(&content).map_err(|e| YamlfigError::Snapshot {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        if !root.is_mapping() {
            return Err(YamlfigError::Snapshot {
                path: path.to_path_buf(),
                reason: "snapshot root is not an object".into(),
            });
        }
        Ok(Self { root, cached: true })
    }

    /// Write the whole store as a JSON snapshot, creating parent directories.
    pub fn write_snapshot(&self, path: &Path) -> Result<(), YamlfigError> {
        let json = serde_json::to_string_pretty(&self.root).map_err(|e| {
            YamlfigError::Serialize {
                reason: e.to_string(),
            }
        })?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| YamlfigError::io(parent, e))?;
        }
        std::fs::write(path, json).map_err(|e| YamlfigError::io(path, e))
    }
}

impl ConfigStore for MemoryStore {
    fn get(&self, dotted: &str) -> Option<ConfigNode> {
        node::lookup(&self.root, dotted).cloned()
    }

    fn set(&mut self, path: &NamespacePath, node: ConfigNode) {
        if path.is_empty() {
            warn!("refusing to replace the store root");
            return;
        }
        node::insert_at(&mut self.root, path.segments(), node);
    }

    fn is_cached_from_snapshot(&self) -> bool {
        self.cached
    }
}
