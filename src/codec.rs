//! YAML codecs: text to [`ConfigNode`] and back.
//!
//! Every codec hands the loader the same shape of tree: a mapping at the
//! root, string keys throughout, and no YAML tags. An empty document is an
//! empty mapping. Anything else at the root (a bare scalar such as
//! `version = 1`, a sequence) is a [`ParseError`], because a configuration
//! file must describe keys.

use serde::Deserialize;
use serde_yaml::Mapping;

use crate::error::{ParseError, YamlfigError};
use crate::node::ConfigNode;

/// Parses and serializes configuration text.
pub trait Codec: Send + Sync {
    /// Short identifier used in log events.
    fn name(&self) -> &'static str;

    fn parse(&self, text: &str) -> Result<ConfigNode, ParseError>;

    fn serialize(&self, node: &ConfigNode) -> Result<String, YamlfigError> {
        serde_yaml::to_string(node).map_err(|e| YamlfigError::Serialize {
            reason: e.to_string(),
        })
    }
}

/// Which codec a [`Loader`](crate::Loader) is built with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CodecKind {
    #[default]
    SerdeYaml,
    #[cfg(feature = "figment")]
    Figment,
}

impl CodecKind {
    pub fn codec(self) -> Box<dyn Codec> {
        match self {
            CodecKind::SerdeYaml => Box::new(SerdeYamlCodec),
            #[cfg(feature = "figment")]
            CodecKind::Figment => Box::new(FigmentCodec),
        }
    }
}

/// Codec backed by `serde_yaml`, whose event parser is a port of libyaml.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeYamlCodec;

impl Codec for SerdeYamlCodec {
    fn name(&self) -> &'static str {
        "serde-yaml"
    }

    fn parse(&self, text: &str) -> Result<ConfigNode, ParseError> {
        let value: ConfigNode = serde_yaml::from_str(text).map_err(|e| {
            let err = ParseError::new(e.to_string());
            match e.location() {
                Some(loc) => err.at(loc.line(), loc.column()),
                None => err,
            }
        })?;
        into_document(value)
    }
}

/// Codec that reads documents through figment's YAML [`Format`].
///
/// The document is deserialized straight into a [`ConfigNode`], so key
/// order, scalar keys and empty documents come out exactly as with
/// [`SerdeYamlCodec`]. Serialization is shared; figment only reads.
///
/// [`Format`]: figment::providers::Format
#[cfg(feature = "figment")]
#[derive(Debug, Clone, Copy, Default)]
pub struct FigmentCodec;

#[cfg(feature = "figment")]
impl Codec for FigmentCodec {
    fn name(&self) -> &'static str {
        "figment"
    }

    fn parse(&self, text: &str) -> Result<ConfigNode, ParseError> {
        use figment::providers::{Format, Yaml};

        let value: ConfigNode =
            Yaml::from_str(text).map_err(|e| ParseError::new(e.to_string()))?;
        into_document(value)
    }
}

/// Check the root shape and normalize keys and tags throughout.
fn into_document(value: ConfigNode) -> Result<ConfigNode, ParseError> {
    match value {
        ConfigNode::Null => Ok(ConfigNode::Mapping(Mapping::new())),
        ConfigNode::Mapping(_) => normalize(value),
        ConfigNode::Tagged(tagged) => into_document(tagged.value),
        other => Err(ParseError::new(format!(
            "expected a mapping at the document root, found {}",
            kind(&other)
        ))),
    }
}

fn normalize(value: ConfigNode) -> Result<ConfigNode, ParseError> {
    match value {
        ConfigNode::Mapping(map) => {
            let mut out = Mapping::with_capacity(map.len());
            for (key, child) in map {
                out.insert(ConfigNode::String(key_text(key)?), normalize(child)?);
            }
            Ok(ConfigNode::Mapping(out))
        }
        ConfigNode::Sequence(seq) => seq
            .into_iter()
            .map(normalize)
            .collect::<Result<Vec<_>, _>>()
            .map(ConfigNode::Sequence),
        ConfigNode::Tagged(tagged) => normalize(tagged.value),
        scalar => Ok(scalar),
    }
}

fn key_text(key: ConfigNode) -> Result<String, ParseError> {
    match key {
        ConfigNode::String(s) => Ok(s),
        ConfigNode::Bool(b) => Ok(b.to_string()),
        ConfigNode::Number(n) => Ok(n.to_string()),
        ConfigNode::Null => Ok("null".to_string()),
        ConfigNode::Tagged(tagged) => key_text(tagged.value),
        other => Err(ParseError::new(format!(
            "mapping keys must be scalars, found {}",
            kind(&other)
        ))),
    }
}

fn kind(node: &ConfigNode) -> &'static str {
    match node {
        ConfigNode::Null => "null",
        ConfigNode::Bool(_) => "a boolean",
        ConfigNode::Number(_) => "a number",
        ConfigNode::String(_) => "a string",
        ConfigNode::Sequence(_) => "a sequence",
        ConfigNode::Mapping(_) => "a mapping",
        ConfigNode::Tagged(_) => "a tagged value",
    }
}
