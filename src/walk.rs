//! Discovery of configuration files under a load root.
//!
//! The walk is recursive and lazy. Siblings are visited in lexicographic
//! file-name order, and a directory's own entry precedes its children, so
//! two runs over the same tree always yield the same sequence regardless of
//! how the OS lists directories. Merge order depends on this: a later file
//! may overwrite an earlier one's target path.
//!
//! A root that is a single configuration file yields just that file; a root
//! that does not exist yields nothing. Entries that cannot be read are
//! skipped.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

/// Iterator over the configuration files below a root, in walk order.
pub struct ConfigFiles {
    inner: walkdir::IntoIter,
    extensions: Vec<String>,
}

impl Iterator for ConfigFiles {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    debug!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if entry.file_type().is_file() && has_extension(entry.path(), &self.extensions) {
                return Some(entry.into_path());
            }
        }
    }
}

/// Start a walk over `root`, yielding files whose extension is one of
/// `extensions` (compared case-insensitively, without the leading dot).
pub fn list_configuration_files(root: &Path, extensions: &[String]) -> ConfigFiles {
    ConfigFiles {
        inner: WalkDir::new(root)
            .follow_links(true)
            .sort_by(|a, b| a.file_name().cmp(b.file_name()))
            .into_iter(),
        extensions: extensions.to_vec(),
    }
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    extensions
        .iter()
        .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{default_extensions, stub_tree};
    use std::fs;
    use tempfile::TempDir;

    fn names(root: &Path, files: ConfigFiles) -> Vec<String> {
        files
            .map(|p| {
                p.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn non_existent_root_is_empty() {
        let dir = TempDir::new().unwrap();
        let files = list_configuration_files(&dir.path().join("non-existent"), &default_extensions());
        assert_eq!(files.count(), 0);
    }

    #[test]
    fn empty_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            list_configuration_files(dir.path(), &default_extensions()).count(),
            0
        );
    }

    #[test]
    fn counts_files_at_every_depth() {
        let tree = stub_tree();
        let ext = default_extensions();
        assert_eq!(list_configuration_files(&tree.path().join("multiple"), &ext).count(), 4);
        assert_eq!(list_configuration_files(&tree.path().join("single"), &ext).count(), 2);
    }

    #[test]
    fn sibling_order_is_lexicographic() {
        let tree = stub_tree();
        let root = tree.path().join("multiple");
        let found = names(&root, list_configuration_files(&root, &default_extensions()));
        assert_eq!(
            found,
            vec![
                "alter.yml",
                "app.yml",
                "second-level/third-level/alter.yml",
                "second-level/third-level/app.yml",
            ]
        );
    }

    #[test]
    fn single_file_root_yields_itself() {
        let tree = stub_tree();
        let file = tree.path().join("single").join("single-app.yml");
        let found: Vec<PathBuf> = list_configuration_files(&file, &default_extensions()).collect();
        assert_eq!(found, vec![file]);
    }

    #[test]
    fn unrecognized_extensions_are_skipped() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        fs::write(dir.path().join("README"), "x").unwrap();
        fs::write(dir.path().join("app.YAML"), "a: 1\n").unwrap();
        fs::write(dir.path().join("db.yml"), "a: 1\n").unwrap();
        let found = names(
            dir.path(),
            list_configuration_files(dir.path(), &default_extensions()),
        );
        assert_eq!(found, vec!["app.YAML", "db.yml"]);
    }

    #[test]
    fn custom_extensions() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.conf"), "a: 1\n").unwrap();
        fs::write(dir.path().join("b.yml"), "a: 1\n").unwrap();
        let found = names(
            dir.path(),
            list_configuration_files(dir.path(), &[".conf".to_string()]),
        );
        assert_eq!(found, vec!["a.conf"]);
    }

    #[test]
    fn walk_is_repeatable() {
        let tree = stub_tree();
        let ext = default_extensions();
        let first: Vec<PathBuf> = list_configuration_files(tree.path(), &ext).collect();
        let second: Vec<PathBuf> = list_configuration_files(tree.path(), &ext).collect();
        assert_eq!(first, second);
    }
}
