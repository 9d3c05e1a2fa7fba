use std::collections::BTreeMap;
use std::path::Path;

use serde_yaml::Mapping;
use tracing::{debug, info};

use crate::codec::Codec;
use crate::error::{ParseError, YamlfigError};
use crate::namespace::{NamespacePath, compute_target_path};
use crate::node::{self, ConfigNode};
use crate::options::LoaderOptions;
use crate::placeholder::Resolver;
use crate::store::ConfigStore;
use crate::walk::{self, ConfigFiles};

/// Loads YAML files and trees into a [`ConfigStore`].
///
/// Built from [`LoaderOptions`] (see [`Loader::from_options`]) or through
/// [`Loader::builder`]. All operations are synchronous and run to completion.
pub struct Loader {
    codec: Box<dyn Codec>,
    options: LoaderOptions,
}

impl Default for Loader {
    fn default() -> Self {
        Self::from_options(LoaderOptions::default())
    }
}

impl std::fmt::Debug for Loader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Loader")
            .field("codec", &self.codec.name())
            .field("options", &self.options)
            .finish()
    }
}

impl Loader {
    pub fn builder() -> LoaderBuilder {
        LoaderBuilder::new()
    }

    /// Build a loader using the codec named in `options`.
    pub fn from_options(options: LoaderOptions) -> Self {
        Self {
            codec: options.codec.codec(),
            options,
        }
    }

    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }

    pub fn codec(&self) -> &dyn Codec {
        self.codec.as_ref()
    }

    /// Load every configuration file under `path` into `store`.
    ///
    /// Files are processed in walk order. Each one is parsed, has its
    /// references resolved against itself and then `store`, and replaces the
    /// subtree at its target path (see
    /// [`compute_target_path`](crate::compute_target_path)).
    ///
    /// The first invalid file aborts the load. Files merged before it stay
    /// in the store; the invalid file contributes nothing.
    ///
    /// If the store reports a cached snapshot, nothing is read and the
    /// result is empty.
    pub fn load_to_store<S: ConfigStore + ?Sized>(
        &self,
        store: &mut S,
        path: &Path,
        namespace_prefix: &str,
    ) -> Result<LoadResult, YamlfigError> {
        if store.is_cached_from_snapshot() {
            debug!(root = %path.display(), "store is cached, skipping load");
            return Ok(LoadResult::default());
        }

        let mut loaded = LoadResult::default();
        for file in self.list_files(path) {
            let document = self.parse_file(&file)?;
            let resolved = Resolver::new(&*store)
                .strict(self.options.strict_references)
                .resolve(document)?;
            let target = compute_target_path(path, &file, namespace_prefix);

            debug!(file = %file.display(), target = %target, "merging configuration file");
            store.set(&target, resolved.clone());
            loaded.insert(target, resolved);
        }

        info!(
            root = %path.display(),
            files = loaded.len(),
            codec = self.codec.name(),
            "configuration loaded"
        );
        Ok(loaded)
    }

    pub fn parse_text(&self, text: &str) -> Result<ConfigNode, YamlfigError> {
        self.codec.parse(text).map_err(|e| e.in_file(None))
    }

    /// Parse a single file. A missing file is an invalid configuration file,
    /// not an empty one.
    pub fn parse_file(&self, path: &Path) -> Result<ConfigNode, YamlfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ParseError::new("file does not exist").in_file(Some(path)));
            }
            Err(e) => return Err(YamlfigError::io(path, e)),
        };
        self.codec.parse(&text).map_err(|e| e.in_file(Some(path)))
    }

    /// Configuration files under `root`, lazily, in walk order.
    pub fn list_files(&self, root: &Path) -> ConfigFiles {
        walk::list_configuration_files(root, &self.options.extensions)
    }

    pub fn dump(&self, node: &ConfigNode) -> Result<String, YamlfigError> {
        self.codec.serialize(node)
    }

    /// Serialize `node` to `path`, creating parent directories.
    pub fn save_to_file(&self, node: &ConfigNode, path: &Path) -> Result<(), YamlfigError> {
        let text = self.dump(node)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| YamlfigError::io(parent, e))?;
        }
        std::fs::write(path, text).map_err(|e| YamlfigError::io(path, e))
    }
}

/// What one [`Loader::load_to_store`] call wrote, keyed by target path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadResult {
    entries: BTreeMap<NamespacePath, ConfigNode>,
}

impl LoadResult {
    fn insert(&mut self, path: NamespacePath, node: ConfigNode) {
        self.entries.insert(path, node);
    }

    /// Tree written at exactly `dotted`.
    pub fn get(&self, dotted: &str) -> Option<&ConfigNode> {
        self.entries.get(&NamespacePath::parse(dotted))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &NamespacePath> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NamespacePath, &ConfigNode)> {
        self.entries.iter()
    }

    /// Assemble all entries into one tree, as they sit relative to the
    /// store root.
    pub fn into_tree(self) -> ConfigNode {
        let mut root = ConfigNode::Mapping(Mapping::new());
        for (path, node) in self.entries {
            node::insert_at(&mut root, path.segments(), node);
        }
        root
    }
}

impl IntoIterator for LoadResult {
    type Item = (NamespacePath, ConfigNode);
    type IntoIter = std::collections::btree_map::IntoIter<NamespacePath, ConfigNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Builder for a [`Loader`] with a custom codec or settings.
pub struct LoaderBuilder {
    codec: Option<Box<dyn Codec>>,
    options: LoaderOptions,
}

impl LoaderBuilder {
    fn new() -> Self {
        Self {
            codec: None,
            options: LoaderOptions::default(),
        }
    }

    /// Start from existing options (e.g. [`LoaderOptions::from_env`]).
    pub fn options(mut self, options: LoaderOptions) -> Self {
        self.options = options;
        self
    }

    /// Use this codec instead of the one named in the options.
    pub fn codec(mut self, codec: impl Codec + 'static) -> Self {
        self.codec = Some(Box::new(codec));
        self
    }

    /// Replace the recognized extensions (default: `yml`, `yaml`).
    pub fn extensions(mut self, extensions: &[&str]) -> Self {
        self.options.extensions = extensions.iter().map(|e| e.to_string()).collect();
        self
    }

    /// See [`LoaderOptions::strict_references`].
    pub fn strict_references(mut self, strict: bool) -> Self {
        self.options.strict_references = strict;
        self
    }

    pub fn build(self) -> Loader {
        let codec = self.codec.unwrap_or_else(|| self.options.codec.codec());
        Loader {
            codec,
            options: self.options,
        }
    }
}
