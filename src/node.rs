//! Helpers over [`ConfigNode`]: dotted-path lookup, subtree insertion, and
//! the text form used when a value is spliced into a string.

use serde_yaml::Mapping;

/// A parsed configuration tree: mappings, sequences and scalars.
pub type ConfigNode = serde_yaml::Value;

/// Navigate a node by dotted path (e.g. `"person.address.country"`).
///
/// Mapping segments match string keys. A numeric segment indexes into a
/// sequence. An empty path resolves to nothing.
pub fn lookup<'a>(node: &'a ConfigNode, dotted: &str) -> Option<&'a ConfigNode> {
    if dotted.is_empty() {
        return None;
    }
    dotted
        .split('.')
        .try_fold(node, |current, segment| match current {
            ConfigNode::Mapping(map) => map.get(segment),
            ConfigNode::Sequence(seq) => segment.parse::<usize>().ok().and_then(|i| seq.get(i)),
            ConfigNode::Tagged(tagged) => lookup(&tagged.value, segment),
            _ => None,
        })
}

/// Place `value` at `segments` under `root`, replacing whatever was there.
///
/// Intermediate mappings are created as needed; a non-mapping found on the
/// way is replaced by an empty mapping. An empty segment list replaces the
/// root itself.
pub fn insert_at<S: AsRef<str>>(root: &mut ConfigNode, segments: &[S], value: ConfigNode) {
    let Some((first, rest)) = segments.split_first() else {
        *root = value;
        return;
    };

    if !root.is_mapping() {
        *root = ConfigNode::Mapping(Mapping::new());
    }
    if let ConfigNode::Mapping(map) = root {
        let child = map
            .entry(ConfigNode::String(first.as_ref().to_string()))
            .or_insert(ConfigNode::Null);
        insert_at(child, rest, value);
    }
}

/// Render a node as the text substituted for a reference.
///
/// Scalars use their plain form, null renders empty, and collections render
/// as inline JSON (which is also valid YAML flow syntax).
pub fn to_text(node: &ConfigNode) -> String {
    match node {
        ConfigNode::Null => String::new(),
        ConfigNode::Bool(b) => b.to_string(),
        ConfigNode::Number(n) => n.to_string(),
        ConfigNode::String(s) => s.clone(),
        ConfigNode::Tagged(tagged) => to_text(&tagged.value),
        ConfigNode::Sequence(_) | ConfigNode::Mapping(_) => {
            serde_json::to_string(node).unwrap_or_else(|_| format!("{node:?}"))
        }
    }
}
