use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::YamlfigError;
use crate::node::ConfigNode;

/// A loader operation, independent of how the host invokes it.
/// Hosts that route commands by name convert through [`Operation`].
#[derive(Debug, Clone, PartialEq)]
pub enum YamlAction {
    LoadToStore { path: PathBuf, namespace: String },
    ParseText { text: String },
    ParseFile { path: PathBuf },
    ListFiles { root: PathBuf },
    Dump { node: ConfigNode },
    SaveToFile { node: ConfigNode, path: PathBuf },
}

impl YamlAction {
    pub fn operation(&self) -> Operation {
        match self {
            YamlAction::LoadToStore { .. } => Operation::LoadToStore,
            YamlAction::ParseText { .. } => Operation::ParseText,
            YamlAction::ParseFile { .. } => Operation::ParseFile,
            YamlAction::ListFiles { .. } => Operation::ListFiles,
            YamlAction::Dump { .. } => Operation::Dump,
            YamlAction::SaveToFile { .. } => Operation::SaveToFile,
        }
    }
}

/// The closed set of operation names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    LoadToStore,
    ParseText,
    ParseFile,
    ListFiles,
    Dump,
    SaveToFile,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::LoadToStore,
        Operation::ParseText,
        Operation::ParseFile,
        Operation::ListFiles,
        Operation::Dump,
        Operation::SaveToFile,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::LoadToStore => "load_to_store",
            Operation::ParseText => "parse_text",
            Operation::ParseFile => "parse_file",
            Operation::ListFiles => "list_files",
            Operation::Dump => "dump",
            Operation::SaveToFile => "save_to_file",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = YamlfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| YamlfigError::UnsupportedOperation(s.to_string()))
    }
}
