//! Loader settings, defined with confique so they can come from defaults,
//! the environment, or a YAML options file.

use std::path::Path;

use confique::Config;

use crate::codec::CodecKind;
use crate::error::YamlfigError;

#[derive(Config, Debug, Clone, PartialEq)]
pub struct LoaderOptions {
    /// File extensions, without the leading dot, treated as configuration
    /// files during discovery.
    #[config(default = ["yml", "yaml"])]
    pub extensions: Vec<String>,

    /// Fail the load when a reference resolves nowhere and declares no
    /// default. When off, such references become empty strings.
    #[config(default = false, env = "YAMLFIG_STRICT_REFERENCES")]
    pub strict_references: bool,

    /// Parser backend: `serde-yaml`, or `figment` with the feature enabled.
    #[config(default = "serde-yaml")]
    pub codec: CodecKind,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            extensions: vec!["yml".into(), "yaml".into()],
            strict_references: false,
            codec: CodecKind::default(),
        }
    }
}

impl LoaderOptions {
    /// Defaults overridden by `YAMLFIG_*` environment variables.
    pub fn from_env() -> Result<Self, YamlfigError> {
        Ok(Self::builder().env().load()?)
    }

    /// Environment, then the YAML file at `path` (skipped if missing), then
    /// defaults.
    pub fn from_file(path: &Path) -> Result<Self, YamlfigError> {
        Ok(Self::builder().env().file(path).load()?)
    }
}
