//! Placeholder resolution: `{{ path }}` and `{{ path | default }}`.
//!
//! A reference may appear anywhere inside a string value, alone or mixed
//! with literal text and other references:
//!
//! ```yaml
//! person:
//!   name: Antonio Carlos
//! recursive:
//!   name: '{{ person.name }} Brazil'        # "Antonio Carlos Brazil"
//! environment:
//!   app:
//!     name: '{{ app.name }}'                # from the host store
//!     default: '{{ app.missing | default }}' # "default"
//! ```
//!
//! Lookup order for a path:
//!
//! 1. The document being resolved, by root-relative dotted path. Lookups
//!    read the document as parsed, so declaration order never matters. A
//!    referenced string that holds references of its own is resolved first.
//! 2. The external store.
//! 3. The reference's default literal.
//! 4. Otherwise an empty string (with a warning), or
//!    [`YamlfigError::UnresolvedReference`] in strict mode.
//!
//! A reference to a mapping or sequence renders it as inline JSON, with the
//! references inside it resolved first.
//!
//! `null` counts as absent. Cycles such as `a: '{{ b }}'`, `b: '{{ a }}'`
//! fail with [`YamlfigError::ReferenceCycle`].

use std::collections::HashMap;
use std::sync::LazyLock;

use regex_lite::{Captures, Regex};
use tracing::warn;

use crate::error::YamlfigError;
use crate::node::{self, ConfigNode};
use crate::store::ConfigStore;

static REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([^{}|]*?)\s*(?:\|\s*([^{}]*?)\s*)?\}\}")
        .expect("reference pattern is valid")
});

/// A reference parsed out of a string value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub path: String,
    pub default: Option<String>,
}

impl Reference {
    fn from_captures(caps: &Captures<'_>) -> Option<Self> {
        let path = caps.get(1)?.as_str().trim();
        if path.is_empty() {
            return None;
        }
        Some(Self {
            path: path.to_string(),
            default: caps.get(2).map(|m| unquote(m.as_str().trim()).to_string()),
        })
    }
}

fn unquote(s: &str) -> &str {
    for quote in ['"', '\''] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            return &s[1..s.len() - 1];
        }
    }
    s
}

/// All references in `text`, in order of appearance.
pub fn references(text: &str) -> Vec<Reference> {
    REFERENCE
        .captures_iter(text)
        .filter_map(|caps| Reference::from_captures(&caps))
        .collect()
}

fn has_references(text: &str) -> bool {
    REFERENCE
        .captures_iter(text)
        .any(|caps| Reference::from_captures(&caps).is_some())
}

/// Rewrites the string values of a document, consulting a store for paths
/// the document itself does not define.
pub struct Resolver<'a, S: ConfigStore + ?Sized> {
    store: &'a S,
    strict: bool,
}

impl<'a, S: ConfigStore + ?Sized> Resolver<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            strict: false,
        }
    }

    /// Fail on references that resolve nowhere and have no default
    /// (default: `false`, substitute an empty string).
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Resolve every reference in `document`.
    pub fn resolve(&self, mut document: ConfigNode) -> Result<ConfigNode, YamlfigError> {
        let source = document.clone();
        let mut pass = Pass {
            resolver: self,
            source: &source,
            memo: HashMap::new(),
            stack: Vec::new(),
        };
        pass.rewrite(&mut document)?;
        Ok(document)
    }
}

/// State for one `resolve` call.
struct Pass<'r, 'a, S: ConfigStore + ?Sized> {
    resolver: &'r Resolver<'a, S>,
    source: &'r ConfigNode,
    /// Rendered text of document paths already resolved.
    memo: HashMap<String, String>,
    /// Document paths currently being resolved, outermost first.
    stack: Vec<String>,
}

impl<S: ConfigStore + ?Sized> Pass<'_, '_, S> {
    fn rewrite(&mut self, node: &mut ConfigNode) -> Result<(), YamlfigError> {
        match node {
            ConfigNode::String(text) => {
                if has_references(text) {
                    *text = self.render(text)?;
                }
            }
            ConfigNode::Mapping(map) => {
                for (_, child) in map.iter_mut() {
                    self.rewrite(child)?;
                }
            }
            ConfigNode::Sequence(seq) => {
                for child in seq.iter_mut() {
                    self.rewrite(child)?;
                }
            }
            ConfigNode::Tagged(tagged) => self.rewrite(&mut tagged.value)?,
            _ => {}
        }
        Ok(())
    }

    fn render(&mut self, text: &str) -> Result<String, YamlfigError> {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for caps in REFERENCE.captures_iter(text) {
            let Some(reference) = Reference::from_captures(&caps) else {
                continue;
            };
            let Some(whole) = caps.get(0) else {
                continue;
            };
            out.push_str(&text[last..whole.start()]);
            out.push_str(&self.substitute(&reference)?);
            last = whole.end();
        }
        out.push_str(&text[last..]);
        Ok(out)
    }

    fn substitute(&mut self, reference: &Reference) -> Result<String, YamlfigError> {
        if let Some(value) = self.lookup(&reference.path)? {
            return Ok(value);
        }
        if let Some(default) = &reference.default {
            return Ok(default.clone());
        }
        if self.resolver.strict {
            return Err(YamlfigError::UnresolvedReference {
                path: reference.path.clone(),
            });
        }
        warn!(path = %reference.path, "reference did not resolve, substituting empty string");
        Ok(String::new())
    }

    fn lookup(&mut self, path: &str) -> Result<Option<String>, YamlfigError> {
        if let Some(done) = self.memo.get(path) {
            return Ok(Some(done.clone()));
        }
        if self.stack.iter().any(|p| p == path) {
            let mut chain = self.stack.clone();
            chain.push(path.to_string());
            return Err(YamlfigError::ReferenceCycle {
                chain: chain.join(" -> "),
            });
        }

        match node::lookup(self.source, path) {
            Some(ConfigNode::Null) | None => {}
            Some(ConfigNode::String(text)) if has_references(text) => {
                self.stack.push(path.to_string());
                let rendered = self.render(text);
                self.stack.pop();
                let rendered = rendered?;
                self.memo.insert(path.to_string(), rendered.clone());
                return Ok(Some(rendered));
            }
            Some(found @ (ConfigNode::Mapping(_) | ConfigNode::Sequence(_))) => {
                let mut subtree = found.clone();
                self.stack.push(path.to_string());
                let rewritten = self.rewrite(&mut subtree);
                self.stack.pop();
                rewritten?;
                let rendered = node::to_text(&subtree);
                self.memo.insert(path.to_string(), rendered.clone());
                return Ok(Some(rendered));
            }
            Some(found) => return Ok(Some(node::to_text(found))),
        }

        Ok(self
            .resolver
            .store
            .get(path)
            .filter(|found| !found.is_null())
            .map(|found| node::to_text(&found)))
    }
}
