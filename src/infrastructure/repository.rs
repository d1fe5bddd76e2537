//! File system vault: the document store backing every operation

use crate::domain::tags::rewrite::metadata_tags;
use crate::domain::tags::{scan_inline_tags, strip_marker, MARKER};
use crate::error::{Result, TagnormError};
use crate::infrastructure::config::{Settings, VAULT_DIR};
use crate::infrastructure::frontmatter;
use serde_yaml::Mapping;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Scoped access to a collection of documents.
///
/// Documents are addressed by vault-relative ids; nothing holds on to a
/// document between calls.
pub trait DocumentStore {
    /// Ids of every document, in a stable order
    fn list_documents(&self) -> Result<Vec<String>>;

    /// Read-modify-write a document's frontmatter. Returns whether it was persisted.
    fn with_metadata<F>(&self, id: &str, mutator: F) -> Result<bool>
    where
        F: FnOnce(&mut Mapping);

    /// Read-modify-write a document's body. Returns whether it was persisted.
    fn with_raw_text<F>(&self, id: &str, mutator: F) -> Result<bool>
    where
        F: FnOnce(&str) -> String;

    /// Every tag in the collection, `#`-prefixed
    fn list_distinct_tags(&self) -> Result<BTreeSet<String>>;

    /// Write a whole document, replacing any existing one
    fn create_or_overwrite(&self, name: &str, content: &str) -> Result<()>;
}

/// A directory of Markdown documents marked by a `.tagnorm` directory
#[derive(Debug, Clone)]
pub struct FileSystemVault {
    pub root: PathBuf,
    skip_code: bool,
}

impl FileSystemVault {
    /// Create a new vault with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemVault {
            root,
            skip_code: false,
        }
    }

    /// Leave inline tags in code spans and blocks out of tag enumeration
    pub fn with_skip_code(mut self, skip_code: bool) -> Self {
        self.skip_code = skip_code;
        self
    }

    /// Discover the vault root by walking up from the current directory.
    /// TAGNORM_ROOT takes precedence when set.
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var("TAGNORM_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_vault_dir(&path) {
                return Ok(FileSystemVault::new(path));
            } else {
                return Err(TagnormError::Config(format!(
                    "TAGNORM_ROOT is set to '{}' but no .tagnorm directory found. \
                    Run 'tagnorm init' in that directory or unset TAGNORM_ROOT.",
                    path.display()
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover the vault root by walking up from a specific starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_vault_dir(&current) {
                return Ok(FileSystemVault::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Err(TagnormError::NotVaultDirectory(start.to_path_buf())),
            }
        }
    }

    fn has_vault_dir(path: &Path) -> bool {
        path.join(VAULT_DIR).is_dir()
    }

    pub fn is_initialized(&self) -> bool {
        Self::has_vault_dir(&self.root)
    }

    /// Create the .tagnorm directory
    pub fn initialize(&self) -> Result<()> {
        let vault_dir = self.root.join(VAULT_DIR);

        if vault_dir.exists() {
            return Err(TagnormError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir(&vault_dir)?;
        Ok(())
    }

    pub fn load_settings(&self) -> Result<Settings> {
        Settings::load_from_dir(&self.root)
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        settings.save_to_dir(&self.root)
    }

    /// Resolve a document id to a path inside the vault
    fn document_path(&self, id: &str) -> Result<PathBuf> {
        let relative = Path::new(id);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if id.is_empty() || escapes {
            return Err(TagnormError::DocumentNotFound(id.to_string()));
        }
        Ok(self.root.join(relative))
    }

    fn read_document(&self, id: &str) -> Result<String> {
        let path = self.document_path(id)?;
        fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TagnormError::DocumentNotFound(id.to_string())
            } else {
                TagnormError::Io(e)
            }
        })
    }

    /// Write a document using a best-effort atomic replace:
    /// write to a temp file in the same directory, then rename into place.
    ///
    /// On Windows, `rename` does not overwrite existing files, so we remove the destination first.
    fn write_document_atomic(&self, id: &str, content: &str) -> Result<()> {
        let path = self.document_path(id)?;

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_name = format!(
            "{}.tagnorm-tmp-{}",
            path.file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("document.md"),
            std::process::id()
        );
        let tmp_path = path.with_file_name(tmp_name);

        fs::write(&tmp_path, content)?;

        if cfg!(windows) && path.exists() {
            fs::remove_file(&path)?;
        }

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    fn normalize_relative_path(path: &Path) -> Option<String> {
        let parts: Vec<&str> = path
            .iter()
            .map(|part| part.to_str())
            .collect::<Option<_>>()?;
        Some(parts.join("/"))
    }

    fn collect_document_tags(&self, id: &str, tags: &mut BTreeSet<String>) -> Result<()> {
        let content = self.read_document(id)?;
        let split = frontmatter::split(&content);

        match frontmatter::parse(id, split.yaml) {
            Ok(metadata) => {
                for value in metadata_tags(&metadata) {
                    let tag = strip_marker(&value).1;
                    if !tag.is_empty() {
                        tags.insert(format!("{}{}", MARKER, tag));
                    }
                }
            }
            Err(e) => tracing::warn!("Skipping frontmatter tags: {}", e),
        }

        for span in scan_inline_tags(split.body, self.skip_code) {
            tags.insert(format!("{}{}", MARKER, span.body(split.body)));
        }

        Ok(())
    }
}

impl DocumentStore for FileSystemVault {
    /// Every `.md` file below the root, skipping hidden directories, sorted by path
    fn list_documents(&self) -> Result<Vec<String>> {
        let mut documents = Vec::new();

        let walker = WalkDir::new(&self.root).into_iter().filter_entry(|entry| {
            if entry.depth() == 0 {
                return true;
            }
            if !entry.file_type().is_dir() {
                return true;
            }
            entry
                .file_name()
                .to_str()
                .is_none_or(|name| !name.starts_with('.'))
        });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(rel) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            let Some(id) = Self::normalize_relative_path(rel) else {
                continue;
            };
            if id.ends_with(".md") {
                documents.push(id);
            }
        }

        documents.sort();
        Ok(documents)
    }

    fn with_metadata<F>(&self, id: &str, mutator: F) -> Result<bool>
    where
        F: FnOnce(&mut Mapping),
    {
        let content = self.read_document(id)?;
        let split = frontmatter::split(&content);
        let original = frontmatter::parse(id, split.yaml)?;

        let mut metadata = original.clone();
        mutator(&mut metadata);
        if metadata == original {
            return Ok(false);
        }

        let rendered = frontmatter::render(&metadata, split.body)?;
        self.write_document_atomic(id, &rendered)?;
        tracing::debug!("Updated frontmatter of {}", id);
        Ok(true)
    }

    fn with_raw_text<F>(&self, id: &str, mutator: F) -> Result<bool>
    where
        F: FnOnce(&str) -> String,
    {
        let content = self.read_document(id)?;
        let split = frontmatter::split(&content);

        let body = mutator(split.body);
        if body == split.body {
            return Ok(false);
        }

        self.write_document_atomic(id, &format!("{}{}", split.header, body))?;
        tracing::debug!("Updated body of {}", id);
        Ok(true)
    }

    fn list_distinct_tags(&self) -> Result<BTreeSet<String>> {
        let mut tags = BTreeSet::new();
        for id in self.list_documents()? {
            if let Err(e) = self.collect_document_tags(&id, &mut tags) {
                tracing::warn!("Skipping {}: {}", id, e);
            }
        }
        Ok(tags)
    }

    fn create_or_overwrite(&self, name: &str, content: &str) -> Result<()> {
        self.write_document_atomic(name, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::sync::{Mutex, OnceLock};
    use tempfile::TempDir;

    fn env_test_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }

    struct EnvVarRestore {
        key: &'static str,
        previous: Option<OsString>,
    }

    impl EnvVarRestore {
        fn capture(key: &'static str) -> Self {
            Self {
                key,
                previous: std::env::var_os(key),
            }
        }
    }

    impl Drop for EnvVarRestore {
        fn drop(&mut self) {
            if let Some(value) = &self.previous {
                std::env::set_var(self.key, value);
            } else {
                std::env::remove_var(self.key);
            }
        }
    }

    fn vault_with(files: &[(&str, &str)]) -> (TempDir, FileSystemVault) {
        let temp = TempDir::new().unwrap();
        for (name, content) in files {
            let path = temp.path().join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        let vault = FileSystemVault::new(temp.path().to_path_buf());
        (temp, vault)
    }

    #[test]
    fn test_initialize_twice_fails() {
        let temp = TempDir::new().unwrap();
        let vault = FileSystemVault::new(temp.path().to_path_buf());

        assert!(!vault.is_initialized());
        vault.initialize().unwrap();
        assert!(vault.is_initialized());
        assert!(vault.initialize().is_err());
    }

    #[test]
    fn test_discover_from_subdirectory() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".tagnorm")).unwrap();
        let subdir = temp.path().join("sub").join("deep");
        fs::create_dir_all(&subdir).unwrap();

        let vault = FileSystemVault::discover_from(&subdir).unwrap();
        assert_eq!(vault.root, temp.path());
    }

    #[test]
    fn test_discover_fails_when_no_vault() {
        let temp = TempDir::new().unwrap();

        match FileSystemVault::discover_from(temp.path()) {
            Err(TagnormError::NotVaultDirectory(_)) => {}
            other => panic!("Expected NotVaultDirectory error, got {:?}", other),
        }
    }

    #[test]
    fn test_discover_with_tagnorm_root_env() {
        let _env_lock = env_test_lock().lock().unwrap();
        let _restore = EnvVarRestore::capture("TAGNORM_ROOT");

        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".tagnorm")).unwrap();
        std::env::set_var("TAGNORM_ROOT", temp.path());

        let vault = FileSystemVault::discover().unwrap();
        assert_eq!(vault.root, temp.path());
    }

    #[test]
    fn test_discover_tagnorm_root_not_initialized() {
        let _env_lock = env_test_lock().lock().unwrap();
        let _restore = EnvVarRestore::capture("TAGNORM_ROOT");

        let temp = TempDir::new().unwrap();
        std::env::set_var("TAGNORM_ROOT", temp.path());

        match FileSystemVault::discover() {
            Err(TagnormError::Config(msg)) => assert!(msg.contains("no .tagnorm directory")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_list_documents_recursive_and_skips_dot_dirs() {
        let (_temp, vault) = vault_with(&[
            ("b.md", ""),
            ("a.md", ""),
            ("notes.txt", ""),
            ("projects/alpha/plan.md", ""),
            (".hidden/secret.md", ""),
            (".tagnorm/config.toml", ""),
            ("projects/.cache/x.md", ""),
        ]);

        assert_eq!(
            vault.list_documents().unwrap(),
            vec!["a.md", "b.md", "projects/alpha/plan.md"]
        );
    }

    #[test]
    fn test_with_metadata_persists_only_changes() {
        let original = "---\ntags:\n- Old\n---\nBody stays\n";
        let (temp, vault) = vault_with(&[("a.md", original)]);

        let persisted = vault.with_metadata("a.md", |_| {}).unwrap();
        assert!(!persisted);
        assert_eq!(fs::read_to_string(temp.path().join("a.md")).unwrap(), original);

        let persisted = vault
            .with_metadata("a.md", |metadata| {
                metadata.insert("tags".into(), vec!["new"].into());
            })
            .unwrap();
        assert!(persisted);
        assert_eq!(
            fs::read_to_string(temp.path().join("a.md")).unwrap(),
            "---\ntags:\n- new\n---\nBody stays\n"
        );
    }

    #[test]
    fn test_with_metadata_rejects_invalid_yaml() {
        let (_temp, vault) = vault_with(&[("bad.md", "---\ntags: [oops\n---\nbody\n")]);

        assert!(matches!(
            vault.with_metadata("bad.md", |_| {}),
            Err(TagnormError::Frontmatter { .. })
        ));
    }

    #[test]
    fn test_with_raw_text_keeps_frontmatter_bytes() {
        let original = "---\ntitle:   spaced   # comment\n---\nHello #World\n";
        let (temp, vault) = vault_with(&[("a.md", original)]);

        let persisted = vault
            .with_raw_text("a.md", |body| body.replace("#World", "#world"))
            .unwrap();
        assert!(persisted);
        assert_eq!(
            fs::read_to_string(temp.path().join("a.md")).unwrap(),
            "---\ntitle:   spaced   # comment\n---\nHello #world\n"
        );

        let persisted = vault.with_raw_text("a.md", str::to_string).unwrap();
        assert!(!persisted);
    }

    #[test]
    fn test_missing_and_escaping_documents() {
        let (_temp, vault) = vault_with(&[]);

        assert!(matches!(
            vault.with_raw_text("missing.md", str::to_string),
            Err(TagnormError::DocumentNotFound(_))
        ));
        assert!(matches!(
            vault.with_raw_text("../outside.md", str::to_string),
            Err(TagnormError::DocumentNotFound(_))
        ));
    }

    #[test]
    fn test_list_distinct_tags_from_metadata_and_body() {
        let (_temp, vault) = vault_with(&[
            ("a.md", "---\ntags: [Alpha, '#beta']\ntag: gamma/x\n---\nText #delta and `#code`\n"),
            ("b.md", "#Alpha again\n"),
            ("bad.md", "---\ntags: [unclosed\n---\n#epsilon\n"),
        ]);

        let tags: Vec<String> = vault.list_distinct_tags().unwrap().into_iter().collect();
        assert_eq!(
            tags,
            vec!["#Alpha", "#beta", "#delta", "#epsilon", "#gamma/x"]
        );
    }

    #[test]
    fn test_list_distinct_tags_skips_unreadable_documents() {
        let (temp, vault) = vault_with(&[("a.md", "#Good\n")]);
        fs::write(temp.path().join("b.md"), b"#Bad \xff\xfe\n").unwrap();

        let tags: Vec<String> = vault.list_distinct_tags().unwrap().into_iter().collect();
        assert_eq!(tags, vec!["#Good"]);
    }

    #[test]
    fn test_list_distinct_tags_skip_code() {
        let (_temp, vault) = vault_with(&[("a.md", "#live\n\n```\n#fenced\n```\n")]);

        let all = vault.list_distinct_tags().unwrap();
        assert!(all.contains("#fenced"));

        let vault = vault.with_skip_code(true);
        let skipped = vault.list_distinct_tags().unwrap();
        assert_eq!(skipped.into_iter().collect::<Vec<_>>(), vec!["#live"]);
    }

    #[test]
    fn test_create_or_overwrite() {
        let (temp, vault) = vault_with(&[("Tags.md", "old")]);

        vault.create_or_overwrite("Tags.md", "#a\n").unwrap();
        vault.create_or_overwrite("lists/new.md", "#b\n").unwrap();

        assert_eq!(fs::read_to_string(temp.path().join("Tags.md")).unwrap(), "#a\n");
        assert_eq!(
            fs::read_to_string(temp.path().join("lists/new.md")).unwrap(),
            "#b\n"
        );
    }
}
