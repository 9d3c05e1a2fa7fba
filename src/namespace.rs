//! Mapping from file locations to destination key paths.
//!
//! A file's target path is the namespace prefix followed by its location
//! relative to the load root, with the extension dropped:
//!
//! | root | file | prefix | target |
//! |------|------|--------|--------|
//! | `conf/` | `conf/app.yml` | `multiple` | `multiple.app` |
//! | `conf/` | `conf/a/b/alter.yml` | `multiple` | `multiple.a.b.alter` |
//! | `conf/` | `conf/top.yml` | *(empty)* | `top` |
//! | `conf/single.yml` | `conf/single.yml` | `single` | `single` |
//! | `conf/single.yml` | `conf/single.yml` | *(empty)* | `single` |
//!
//! Dots inside a file stem split into separate segments, so a target always
//! round-trips through its dotted form. A stem made only of dots falls back
//! to the whole file name (`conf/..yml` lands at `yml`), so a file never
//! targets the bare prefix or the store root.

use std::fmt;
use std::path::{Component, Path};

/// A dot-joined destination key path. Segments are never empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NamespacePath {
    segments: Vec<String>,
}

impl NamespacePath {
    /// Parse a dotted string, dropping empty segments (`"a..b."` is `a.b`).
    pub fn parse(dotted: &str) -> Self {
        let mut path = Self::default();
        path.extend_dotted(dotted);
        path
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Append every non-empty dot-separated piece of `dotted`.
    fn extend_dotted(&mut self, dotted: &str) {
        self.segments.extend(
            dotted
                .split('.')
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        );
    }
}

impl fmt::Display for NamespacePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl From<&str> for NamespacePath {
    fn from(dotted: &str) -> Self {
        Self::parse(dotted)
    }
}

/// Compute where the contents of `file` land in the store.
///
/// Pure: no file-system access. `root` is either the directory the file was
/// discovered under or the file itself.
pub fn compute_target_path(root: &Path, file: &Path, namespace_prefix: &str) -> NamespacePath {
    let mut target = NamespacePath::parse(namespace_prefix);

    match file.strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => {
            for component in rel.parent().into_iter().flat_map(Path::components) {
                if let Component::Normal(part) = component {
                    target.extend_dotted(&part.to_string_lossy());
                }
            }
            push_file(&mut target, file);
        }
        // The root is the file itself: a prefix names it on its own.
        _ if file == root && !target.is_empty() => {}
        // No prefix for a single-file root, or the file lives elsewhere.
        _ => push_file(&mut target, file),
    }
    target
}

/// Append the file's stem, or its whole name when the stem is only dots
/// (`..yml`), so a file always contributes at least one segment.
fn push_file(target: &mut NamespacePath, file: &Path) {
    let before = target.len();
    if let Some(stem) = file.file_stem() {
        target.extend_dotted(&stem.to_string_lossy());
    }
    if target.len() == before {
        if let Some(name) = file.file_name() {
            target.extend_dotted(&name.to_string_lossy());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(root: &str, file: &str, prefix: &str) -> String {
        compute_target_path(Path::new(root), Path::new(file), prefix).to_string()
    }

    #[test]
    fn top_level_file_with_prefix() {
        assert_eq!(target("/conf", "/conf/app.yml", "multiple"), "multiple.app");
    }

    #[test]
    fn nested_directories_become_segments() {
        assert_eq!(
            target(
                "/conf/multiple",
                "/conf/multiple/second-level/third-level/alter.yml",
                "multiple"
            ),
            "multiple.second-level.third-level.alter"
        );
    }

    #[test]
    fn empty_prefix_yields_relative_path() {
        assert_eq!(target("/conf/app", "/conf/app/top.yml", ""), "top");
        assert_eq!(target("/conf", "/conf/a/b.yaml", ""), "a.b");
    }

    #[test]
    fn dotted_prefix_contributes_several_segments() {
        let path = compute_target_path(Path::new("/c"), Path::new("/c/x.yml"), "vendor.pkg");
        assert_eq!(path.segments(), &["vendor", "pkg", "x"]);
    }

    #[test]
    fn single_file_root_uses_prefix_alone() {
        assert_eq!(
            target("/conf/single/single-app.yml", "/conf/single/single-app.yml", "single"),
            "single"
        );
    }

    #[test]
    fn single_file_root_without_prefix_uses_base_name() {
        assert_eq!(
            target("/conf/single/single-app.yml", "/conf/single/single-app.yml", ""),
            "single-app"
        );
    }

    #[test]
    fn file_outside_root_uses_base_name() {
        assert_eq!(target("/conf/a", "/elsewhere/extra.yml", "ns"), "ns.extra");
    }

    #[test]
    fn dots_in_stem_split_into_segments() {
        let path = compute_target_path(Path::new("/c"), Path::new("/c/app.prod.yml"), "");
        assert_eq!(path.segments(), &["app", "prod"]);
        assert_eq!(NamespacePath::parse(&path.to_string()), path);
    }

    #[test]
    fn dot_only_stem_uses_file_name() {
        assert_eq!(target("/c", "/c/..yml", ""), "yml");
        assert_eq!(target("/c", "/c/..yml", "ns"), "ns.yml");
        assert_eq!(target("/c", "/c/sub/..yml", "ns"), "ns.sub.yml");
        assert_eq!(target("/c/..yml", "/c/..yml", ""), "yml");
    }

    #[test]
    fn relative_paths_work_too() {
        assert_eq!(target("conf", "conf/sub/file.yml", "p"), "p.sub.file");
    }

    #[test]
    fn parse_drops_empty_segments() {
        let path = NamespacePath::parse(".a..b.");
        assert_eq!(path.segments(), &["a", "b"]);
        assert!(NamespacePath::parse("").is_empty());
    }
}
