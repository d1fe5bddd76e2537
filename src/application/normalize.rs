//! Bulk normalization use case

use crate::application::driver::{run_documents, DocumentChange, RunReport};
use crate::application::notice::Notifier;
use crate::domain::tags::rewrite::{normalize_metadata, normalize_text};
use crate::domain::TransformConfig;
use crate::error::{Result, TagnormError};
use crate::infrastructure::{DocumentStore, Settings};

#[derive(Debug, Clone, Default)]
pub struct NormalizeOptions {
    /// Vault-relative documents to process; empty means every document
    pub documents: Vec<String>,
    pub dry_run: bool,
}

/// Apply the configured transformer to every tag in the selected documents.
pub fn normalize_tags<S: DocumentStore>(
    store: &S,
    settings: &Settings,
    options: &NormalizeOptions,
    notifier: &mut dyn Notifier,
) -> Result<RunReport> {
    let documents = resolve_documents(store, &options.documents)?;
    let config = settings.transform();
    let skip_code = settings.skip_code;
    let dry_run = options.dry_run;

    Ok(run_documents(
        store,
        &documents,
        dry_run,
        notifier,
        |store, document| normalize_document(store, document, config, skip_code, dry_run),
    ))
}

fn normalize_document<S: DocumentStore>(
    store: &S,
    document: &str,
    config: TransformConfig,
    skip_code: bool,
    dry_run: bool,
) -> Result<DocumentChange> {
    let mut metadata_changed = false;
    store.with_metadata(document, |metadata| {
        let mut updated = metadata.clone();
        metadata_changed = normalize_metadata(&mut updated, config);
        if metadata_changed && !dry_run {
            *metadata = updated;
        }
    })?;

    let mut replacements = 0usize;
    store.with_raw_text(document, |text| {
        let result = normalize_text(text, config, skip_code);
        replacements = result.replacements;
        if dry_run {
            text.to_string()
        } else {
            result.content
        }
    })?;

    Ok(DocumentChange {
        document: document.to_string(),
        metadata_changed,
        replacements,
    })
}

/// Map requested names onto document ids. A name may omit the `.md` suffix.
pub(crate) fn resolve_documents<S: DocumentStore>(
    store: &S,
    requested: &[String],
) -> Result<Vec<String>> {
    let all = store.list_documents()?;
    if requested.is_empty() {
        return Ok(all);
    }

    requested
        .iter()
        .map(|name| {
            let name = name.replace('\\', "/");
            let name = name.trim_start_matches("./");
            [name.to_string(), format!("{}.md", name)]
                .into_iter()
                .find(|candidate| all.contains(candidate))
                .ok_or_else(|| TagnormError::DocumentNotFound(name.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::notice::Notice;
    use crate::domain::SeparatorStrategy;
    use crate::infrastructure::FileSystemVault;
    use std::fs;
    use tempfile::TempDir;

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

    fn kebab_settings() -> Settings {
        Settings {
            separator: SeparatorStrategy::Kebab,
            ..Settings::default()
        }
    }

    fn read(temp: &TempDir, name: &str) -> String {
        fs::read_to_string(temp.path().join(name)).unwrap()
    }

    #[test]
    fn normalizes_frontmatter_and_inline_tags() {
        let (temp, vault) = vault_with(&[
            ("a.md", "---\ntags:\n- My_Tag\n- '#Other'\n---\nSee #Area/Sub_Area here.\n"),
            ("b.md", "already #fine\n"),
        ]);
        let mut notices = Vec::new();

        let report = normalize_tags(
            &vault,
            &kebab_settings(),
            &NormalizeOptions::default(),
            &mut notices,
        )
        .unwrap();

        assert_eq!(
            read(&temp, "a.md"),
            "---\ntags:\n- my-tag\n- '#other'\n---\nSee #area/sub-area here.\n"
        );
        assert_eq!(read(&temp, "b.md"), "already #fine\n");
        assert_eq!(report.scanned, 2);
        assert_eq!(report.processed, 2);
        assert_eq!(report.changed_files(), 1);
        assert_eq!(report.total_replacements, 1);
        assert!(report.changes[0].metadata_changed);
        assert_eq!(
            notices,
            vec![
                Notice::RunStarted { documents: 2 },
                Notice::RunCompleted {
                    processed: 2,
                    modified: 1,
                    dry_run: false
                },
            ]
        );
    }

    #[test]
    fn second_run_changes_nothing() {
        let (_temp, vault) = vault_with(&[("a.md", "---\ntag: Big_One\n---\n#Big_One\n")]);
        let settings = kebab_settings();

        normalize_tags(&vault, &settings, &NormalizeOptions::default(), &mut Vec::new()).unwrap();
        let again =
            normalize_tags(&vault, &settings, &NormalizeOptions::default(), &mut Vec::new())
                .unwrap();

        assert_eq!(again.changed_files(), 0);
    }

    #[test]
    fn dry_run_writes_nothing() {
        let original = "---\ntags: [Loud]\n---\n#Loud\n";
        let (temp, vault) = vault_with(&[("a.md", original)]);
        let options = NormalizeOptions {
            dry_run: true,
            ..NormalizeOptions::default()
        };

        let report =
            normalize_tags(&vault, &Settings::default(), &options, &mut Vec::new()).unwrap();

        assert_eq!(read(&temp, "a.md"), original);
        assert!(report.dry_run);
        assert_eq!(report.changed_files(), 1);
        assert_eq!(report.total_replacements, 1);
    }

    #[test]
    fn failing_document_does_not_abort_run() {
        let (temp, vault) = vault_with(&[
            ("a.md", "#First\n"),
            ("b.md", "---\ntags: [broken\n---\n#Second\n"),
            ("c.md", "#Third\n"),
        ]);
        let mut notices = Vec::new();

        let report = normalize_tags(
            &vault,
            &Settings::default(),
            &NormalizeOptions::default(),
            &mut notices,
        )
        .unwrap();

        assert_eq!(read(&temp, "a.md"), "#first\n");
        assert_eq!(read(&temp, "b.md"), "---\ntags: [broken\n---\n#Second\n");
        assert_eq!(read(&temp, "c.md"), "#third\n");
        assert_eq!(report.processed, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(
            notices.last(),
            Some(&Notice::RunCompleted {
                processed: 2,
                modified: 2,
                dry_run: false
            })
        );
    }

    #[test]
    fn restricts_to_named_documents() {
        let (temp, vault) = vault_with(&[("a.md", "#One\n"), ("sub/b.md", "#Two\n")]);
        let options = NormalizeOptions {
            documents: vec!["sub/b".to_string()],
            dry_run: false,
        };

        let report =
            normalize_tags(&vault, &Settings::default(), &options, &mut Vec::new()).unwrap();

        assert_eq!(report.scanned, 1);
        assert_eq!(read(&temp, "a.md"), "#One\n");
        assert_eq!(read(&temp, "sub/b.md"), "#two\n");
    }

    #[test]
    fn unknown_document_is_rejected_before_any_write() {
        let (temp, vault) = vault_with(&[("a.md", "#One\n")]);
        let options = NormalizeOptions {
            documents: vec!["a.md".to_string(), "missing.md".to_string()],
            dry_run: false,
        };
        let mut notices = Vec::new();

        let result = normalize_tags(&vault, &Settings::default(), &options, &mut notices);

        assert!(matches!(result, Err(TagnormError::DocumentNotFound(_))));
        assert!(notices.is_empty());
        assert_eq!(read(&temp, "a.md"), "#One\n");
    }
}
