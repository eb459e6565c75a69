//! Collector - gather YAML sources into one namespaced mapping
//!
//! Each YAML file contributes one top-level entry keyed by its file stem:
//! `conf/db.yaml` becomes namespace `db`. Directories are scanned
//! recursively for `*.yaml`. A later source with the same namespace
//! replaces the earlier one.

use std::path::{Path, PathBuf};
use serde_yaml::{Mapping, Value};
use crate::value::deserialize_document;
use crate::{Error, Result};

/// Extension accepted for direct file inputs (compared case-insensitively)
pub const YAML_EXTENSION: &str = "yaml";

/// Glob appended to a directory input during recursive discovery
pub const DIRECTORY_PATTERN: &str = "**/*.yaml";

/// Result of collecting a set of sources
#[derive(Debug, Clone, Default)]
pub struct Collection {
    /// Namespace -> parsed document, in first-insertion order
    pub documents: Mapping,
    /// YAML files that were parsed, in processing order
    pub files: Vec<PathBuf>,
    /// Inputs that were neither a file nor a directory
    pub skipped: Vec<PathBuf>,
}

impl Collection {
    fn insert(&mut self, path: &Path, document: Value) {
        let namespace = namespace_of(path);
        tracing::debug!("Loaded {} as namespace '{}'", path.display(), namespace);
        if self.documents.insert(Value::String(namespace.clone()), document).is_some() {
            tracing::debug!("Namespace '{}' replaced by {}", namespace, path.display());
        }
        self.files.push(path.to_path_buf());
    }
}

/// Collect every source into a single combined mapping.
///
/// Invalid inputs print a warning and are recorded in
/// [`Collection::skipped`]; a malformed document aborts the whole collection.
pub fn collect_sources<P: AsRef<Path>>(sources: &[P]) -> Result<Collection> {
    let mut collection = Collection::default();

    for source in sources {
        let source = source.as_ref();
        if source.is_file() {
            if has_yaml_extension(source) {
                let document = load_document(source)?;
                collection.insert(source, document);
            } else {
                tracing::debug!("Ignoring non-YAML file {}", source.display());
            }
        } else if source.is_dir() {
            for path in discover_yaml_files(source)? {
                let document = load_document(&path)?;
                collection.insert(&path, document);
            }
        } else {
            tracing::debug!("Skipping invalid source {}", source.display());
            crate::ui::warn_invalid_source(source);
            collection.skipped.push(source.to_path_buf());
        }
    }

    tracing::info!(
        "Collected {} documents from {} files ({} skipped)",
        collection.documents.len(),
        collection.files.len(),
        collection.skipped.len()
    );
    Ok(collection)
}

/// Parse one YAML document, resolving `<<` merge keys.
///
/// An empty file (or one holding only comments) yields `null`. A file with
/// more than one `---` document is rejected.
pub fn load_document(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let yaml_error = |source| Error::Yaml {
        path: path.to_path_buf(),
        source,
    };

    let mut documents = Vec::new();
    for document in serde_yaml::Deserializer::from_str(&content) {
        documents.push(deserialize_document(document).map_err(yaml_error)?);
    }
    if documents.len() > 1 {
        return Err(Error::MultipleDocuments(path.to_path_buf()));
    }

    let mut value = documents.pop().unwrap_or(Value::Null);
    value.apply_merge().map_err(yaml_error)?;
    Ok(value)
}

/// Find every `*.yaml` file beneath `dir`, sorted by path.
///
/// Sorting makes namespace collisions between subdirectories resolve the
/// same way on every run: the lexicographically last path wins.
pub fn discover_yaml_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let root = glob::Pattern::escape(&dir.to_string_lossy());
    let pattern = format!("{}/{}", root.trim_end_matches('/'), DIRECTORY_PATTERN);

    let mut files = Vec::new();
    for entry in glob::glob(&pattern)? {
        let path = entry?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Whether `path` ends in `.yaml`, ignoring case
pub fn has_yaml_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(YAML_EXTENSION))
}

/// Namespace for a source file: its base name without the extension
pub fn namespace_of(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, relative: &str, content: &str) -> PathBuf {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    fn namespace<'a>(collection: &'a Collection, name: &str) -> Option<&'a Value> {
        collection.documents.get(name)
    }

    #[test]
    fn test_extension_check() {
        assert!(has_yaml_extension(Path::new("a/config.yaml")));
        assert!(has_yaml_extension(Path::new("CONFIG.YAML")));
        assert!(has_yaml_extension(Path::new("x.Yaml")));
        assert!(!has_yaml_extension(Path::new("config.yml")));
        assert!(!has_yaml_extension(Path::new("config.json")));
        assert!(!has_yaml_extension(Path::new("yaml")));
    }

    #[test]
    fn test_namespace_strips_last_extension() {
        assert_eq!(namespace_of(Path::new("dir/config.yaml")), "config");
        assert_eq!(namespace_of(Path::new("app.prod.yaml")), "app.prod");
    }

    #[test]
    fn test_single_file() {
        let tmp = TempDir::new().unwrap();
        let file = write(tmp.path(), "config.yaml", "a:\n  b: 1\n");

        let collection = collect_sources(&[file]).unwrap();
        assert_eq!(collection.documents.len(), 1);
        assert_eq!(collection.files.len(), 1);
        let doc = namespace(&collection, "config").unwrap();
        assert_eq!(doc["a"]["b"], Value::from(1));
    }

    #[test]
    fn test_uppercase_extension_accepted() {
        let tmp = TempDir::new().unwrap();
        let file = write(tmp.path(), "Upper.YAML", "k: v\n");

        let collection = collect_sources(&[file]).unwrap();
        assert!(namespace(&collection, "Upper").is_some());
    }

    #[test]
    fn test_non_yaml_file_ignored_silently() {
        let tmp = TempDir::new().unwrap();
        let file = write(tmp.path(), "notes.txt", "k: v\n");

        let collection = collect_sources(&[file]).unwrap();
        assert!(collection.documents.is_empty());
        assert!(collection.skipped.is_empty());
    }

    #[test]
    fn test_directory_scan_recurses() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "sub1/x.yaml", "k: 1\n");
        write(tmp.path(), "sub2/deeper/y.yaml", "k: 2\n");
        write(tmp.path(), "top.yaml", "k: 3\n");
        write(tmp.path(), "sub1/skip.yml", "k: 4\n");
        write(tmp.path(), "sub1/skip.txt", "k: 5\n");

        let collection = collect_sources(&[tmp.path()]).unwrap();
        assert_eq!(collection.documents.len(), 3);
        assert!(namespace(&collection, "x").is_some());
        assert!(namespace(&collection, "y").is_some());
        assert!(namespace(&collection, "top").is_some());
        assert!(namespace(&collection, "skip").is_none());
    }

    #[test]
    fn test_directory_collision_resolved_by_path_order() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "a/app.yaml", "from: a\n");
        write(tmp.path(), "b/app.yaml", "from: b\n");

        let collection = collect_sources(&[tmp.path()]).unwrap();
        assert_eq!(collection.documents.len(), 1);
        assert_eq!(collection.files.len(), 2);
        let doc = namespace(&collection, "app").unwrap();
        assert_eq!(doc["from"], Value::from("b"));
    }

    #[test]
    fn test_later_source_overwrites_namespace() {
        let tmp = TempDir::new().unwrap();
        let first = write(tmp.path(), "one/svc.yaml", "port: 1\n");
        let second = write(tmp.path(), "two/svc.yaml", "host: h\n");

        let collection = collect_sources(&[first, second]).unwrap();
        let doc = namespace(&collection, "svc").unwrap();
        assert!(doc.get("port").is_none());
        assert_eq!(doc["host"], Value::from("h"));
    }

    #[test]
    fn test_missing_path_is_skipped() {
        let tmp = TempDir::new().unwrap();
        let file = write(tmp.path(), "ok.yaml", "k: v\n");
        let missing = tmp.path().join("nope");

        let collection = collect_sources(&[missing.clone(), file]).unwrap();
        assert_eq!(collection.skipped, vec![missing]);
        assert!(namespace(&collection, "ok").is_some());
    }

    #[test]
    fn test_malformed_yaml_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let file = write(tmp.path(), "broken.yaml", "a: [1, 2\n");

        let err = collect_sources(&[file]).unwrap_err();
        assert!(matches!(err, Error::Yaml { .. }));
        assert!(err.to_string().contains("broken.yaml"));
    }

    #[test]
    fn test_unreadable_file_names_path() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("latin1.yaml");
        fs::write(&file, b"name: caf\xe9\n").unwrap();

        let err = collect_sources(&[file]).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
        assert!(err.to_string().contains("latin1.yaml"));
    }

    #[test]
    fn test_empty_document_is_null() {
        let tmp = TempDir::new().unwrap();
        let file = write(tmp.path(), "empty.yaml", "");

        let collection = collect_sources(&[file]).unwrap();
        assert_eq!(namespace(&collection, "empty"), Some(&Value::Null));
    }

    #[test]
    fn test_comment_only_document_is_null() {
        let tmp = TempDir::new().unwrap();
        let file = write(tmp.path(), "blank.yaml", "# nothing here\n");

        let collection = collect_sources(&[file]).unwrap();
        assert_eq!(namespace(&collection, "blank"), Some(&Value::Null));
    }

    #[test]
    fn test_multiple_documents_rejected() {
        let tmp = TempDir::new().unwrap();
        let file = write(tmp.path(), "multi.yaml", "a: 1\n---\nb: 2\n");

        let err = collect_sources(&[file]).unwrap_err();
        assert!(matches!(err, Error::MultipleDocuments(_)));
    }

    #[test]
    fn test_merge_keys_applied() {
        let tmp = TempDir::new().unwrap();
        let file = write(
            tmp.path(),
            "env.yaml",
            "base: &base\n  timeout: 30\nprod:\n  <<: *base\n  host: p\n",
        );

        let collection = collect_sources(&[file]).unwrap();
        let doc = namespace(&collection, "env").unwrap();
        assert_eq!(doc["prod"]["timeout"], Value::from(30));
        assert_eq!(doc["prod"]["host"], Value::from("p"));
    }
}
