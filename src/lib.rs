//! Load directory trees of YAML files into a hierarchical configuration
//! store, resolving references between values on the way in.
//!
//! ```ignore
//! let mut store = MemoryStore::new();
//! store.set_value("app.name", "Laravel");
//!
//! let loaded = Loader::default().load_to_store(&mut store, Path::new("config/yaml"), "yaml")?;
//! ```
//!
//! That call walks `config/yaml/`, parses every `.yml`/`.yaml` file, resolves
//! `{{ ... }}` references, and writes each file's tree into the store under
//! a key derived from its location.
//!
//! # Files to keys
//!
//! A file's target key is the namespace prefix followed by its path relative
//! to the load root, extension dropped and separators turned into dots:
//!
//! ```text
//! config/yaml/app.yml                         → yaml.app
//! config/yaml/second-level/third-level/db.yml → yaml.second-level.third-level.db
//! ```
//!
//! Loading a single file puts its tree directly at the prefix (or at the
//! file's base name when the prefix is empty). See [`compute_target_path`].
//!
//! Files are discovered in sorted order (siblings by file name, a directory
//! before its children) so loads are reproducible across platforms. Files
//! with other extensions are ignored, and a missing root loads nothing.
//!
//! # Replace, not merge
//!
//! Each file **replaces** the subtree at its target key. Keys that already
//! lived under that exact key disappear; everything beside it is untouched.
//! This keeps loads idempotent: loading the same tree twice leaves the store
//! exactly as after the first load.
//!
//! # References
//!
//! String values may embed `{{ path }}` or `{{ path | default }}`:
//!
//! ```yaml
//! person:
//!   name: Antonio Carlos
//! recursive:
//!   name: '{{ person.name }} Brazil'
//! environment:
//!   app:
//!     name: '{{ app.name }}'
//!     default: '{{ app.missing | default }}'
//! ```
//!
//! A path is looked up in the file itself first (declaration order does not
//! matter), then in the store, which sees host settings plus everything
//! earlier files wrote. Unresolvable references without a default become
//! empty strings, or errors with
//! [`strict_references`](LoaderOptions::strict_references). Cycles are
//! detected and reported. See the [`placeholder`] module.
//!
//! # Stores and snapshots
//!
//! The destination is any [`ConfigStore`]. A store that reports it was
//! restored from a snapshot makes [`Loader::load_to_store`] a no-op, so a
//! host can skip YAML parsing entirely once its configuration is cached.
//! [`MemoryStore`] implements this with JSON snapshots.
//!
//! # Codecs
//!
//! Parsing is delegated to a [`Codec`]. [`SerdeYamlCodec`] is the default;
//! `FigmentCodec` (feature `figment`, on by default) reads through
//! figment's YAML provider and yields identical trees. Either way, a
//! document's root must be a mapping.
//!
//! # Errors
//!
//! Everything fallible returns [`YamlfigError`]. An unparsable file aborts
//! the load with [`YamlfigError::InvalidConfigurationFile`], naming the
//! file; files merged before it stay in the store.

pub mod codec;
pub mod error;
pub mod namespace;
pub mod node;
pub mod placeholder;
pub mod store;
pub mod types;

mod loader;
mod ops;
mod options;
mod walk;

#[cfg(test)]
mod fixtures;

#[cfg(feature = "figment")]
pub use codec::FigmentCodec;
pub use codec::{Codec, CodecKind, SerdeYamlCodec};
pub use error::{ParseError, YamlfigError};
pub use loader::{LoadResult, Loader, LoaderBuilder};
pub use namespace::{NamespacePath, compute_target_path};
pub use node::ConfigNode;
pub use ops::ActionResult;
pub use options::LoaderOptions;
pub use placeholder::{Reference, Resolver};
pub use store::{ConfigStore, MemoryStore};
pub use types::{Operation, YamlAction};
pub use walk::{ConfigFiles, list_configuration_files};
