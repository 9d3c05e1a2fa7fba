#[cfg(test)]
pub mod test {
    use std::fs;
    use std::path::Path;

    use tempfile::TempDir;

    use crate::codec::CodecKind;
    use crate::loader::Loader;
    use crate::options::LoaderOptions;
    use crate::store::MemoryStore;

    pub const SINGLE_APP: &str = "\
person:
  name: Brett
  address:
    country: united kingdom
environment:
  app:
    name: Some App
";

    pub const REPLACEABLE: &str = "\
person:
  name: Antonio Carlos
  address:
    country: Brazil
environment:
  app:
    name: '{{ app.name }}'
    names: '{{ app.name }} {{ app.name }}'
    default: '{{ app.undefined | default }}'
recursive:
  name: '{{ person.name }} {{ person.address.country }}'
";

    const ALTER: &str = "\
person:
  name: Benoit
  address:
    country: france
environment:
  app:
    name: Not Laravel
";

    const THIRD_LEVEL_APP: &str = "\
person:
  name: Antonio Carlos
  address:
    country: Brazil Third Level
";

    const TOP: &str = "\
person:
  name: Antonio Carlos
  address:
    country: Brazil
";

    const INVALID: &str = "\
person:
  name: {Brett
  address: [united kingdom
";

    /// Writes this layout into a fresh temp dir:
    ///
    /// ```text
    /// single/single-app.yml
    /// single/replaceable.yml
    /// multiple/alter.yml
    /// multiple/app.yml
    /// multiple/second-level/third-level/alter.yml
    /// multiple/second-level/third-level/app.yml
    /// app/top.yml
    /// wrong/invalid.yml
    /// ```
    pub fn stub_tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "single/single-app.yml", SINGLE_APP);
        write(root, "single/replaceable.yml", REPLACEABLE);
        write(root, "multiple/alter.yml", ALTER);
        write(root, "multiple/app.yml", REPLACEABLE);
        write(root, "multiple/second-level/third-level/alter.yml", ALTER);
        write(root, "multiple/second-level/third-level/app.yml", THIRD_LEVEL_APP);
        write(root, "app/top.yml", TOP);
        write(root, "wrong/invalid.yml", INVALID);
        dir
    }

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    /// A host store that already knows the application name.
    pub fn host_store() -> MemoryStore {
        let mut store = MemoryStore::new();
        store.set_value("app.name", "Laravel");
        store
    }

    /// Every codec compiled into this build.
    pub fn codec_kinds() -> Vec<CodecKind> {
        vec![
            CodecKind::SerdeYaml,
            #[cfg(feature = "figment")]
            CodecKind::Figment,
        ]
    }

    /// One default-configured loader per codec.
    pub fn loaders() -> Vec<Loader> {
        codec_kinds()
            .into_iter()
            .map(|codec| {
                Loader::from_options(LoaderOptions {
                    codec,
                    ..LoaderOptions::default()
                })
            })
            .collect()
    }

    pub fn default_extensions() -> Vec<String> {
        vec!["yml".to_string(), "yaml".to_string()]
    }

    #[test]
    fn stub_tree_has_expected_files() {
        let tree = stub_tree();
        assert!(tree.path().join("single/single-app.yml").is_file());
        assert!(tree.path().join("multiple/second-level/third-level/app.yml").is_file());
        assert!(tree.path().join("wrong/invalid.yml").is_file());
    }
}
