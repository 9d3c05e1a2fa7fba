//! Dispatch of [`YamlAction`]s and the [`ActionResult`] returned to callers.

use std::fmt;
use std::path::PathBuf;

use crate::error::YamlfigError;
use crate::loader::{LoadResult, Loader};
use crate::node::ConfigNode;
use crate::store::ConfigStore;
use crate::types::YamlAction;

/// Result of an operation. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionResult {
    /// Trees written to the store, by target path.
    Loaded(LoadResult),
    /// A parsed document.
    Parsed(ConfigNode),
    /// Discovered configuration files, in walk order.
    Files(Vec<PathBuf>),
    /// Serialized text.
    Dumped(String),
    /// Confirmation that a document was written.
    Saved { path: PathBuf },
}

impl fmt::Display for ActionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionResult::Loaded(loaded) => {
                for (i, (path, _)) in loaded.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "Loaded {path}")?;
                }
                Ok(())
            }
            ActionResult::Parsed(node) => match serde_yaml::to_string(node) {
                Ok(text) => write!(f, "{}", text.trim_end()),
                Err(_) => write!(f, "{node:?}"),
            },
            ActionResult::Files(files) => {
                for (i, file) in files.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}", file.display())?;
                }
                Ok(())
            }
            ActionResult::Dumped(text) => write!(f, "{}", text.trim_end()),
            ActionResult::Saved { path } => write!(f, "Saved to {}", path.display()),
        }
    }
}

impl Loader {
    /// Run `action`. Only [`YamlAction::LoadToStore`] touches `store`.
    pub fn handle<S: ConfigStore + ?Sized>(
        &self,
        store: &mut S,
        action: &YamlAction,
    ) -> Result<ActionResult, YamlfigError> {
        match action {
            YamlAction::LoadToStore { path, namespace } => self
                .load_to_store(store, path, namespace)
                .map(ActionResult::Loaded),
            YamlAction::ParseText { text } => self.parse_text(text).map(ActionResult::Parsed),
            YamlAction::ParseFile { path } => self.parse_file(path).map(ActionResult::Parsed),
            YamlAction::ListFiles { root } => Ok(ActionResult::Files(self.list_files(root).collect())),
            YamlAction::Dump { node } => self.dump(node).map(ActionResult::Dumped),
            YamlAction::SaveToFile { node, path } => {
                self.save_to_file(node, path)?;
                Ok(ActionResult::Saved { path: path.clone() })
            }
        }
    }
}
