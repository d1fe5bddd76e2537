//! Collection-wide run loop shared by normalize and rename

use crate::application::notice::{Notice, Notifier};
use crate::error::Result;
use crate::infrastructure::DocumentStore;

/// What one document run changed (or would change, in a dry run)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentChange {
    pub document: String,
    pub metadata_changed: bool,
    pub replacements: usize,
}

impl DocumentChange {
    pub fn is_modified(&self) -> bool {
        self.metadata_changed || self.replacements > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub scanned: usize,
    /// Documents handled without error
    pub processed: usize,
    pub failed: usize,
    pub total_replacements: usize,
    pub dry_run: bool,
    pub changes: Vec<DocumentChange>,
}

impl RunReport {
    pub fn changed_files(&self) -> usize {
        self.changes.len()
    }
}

/// Run `process` over each document in order.
///
/// A failing document is logged and counted, and the run moves on.
pub(crate) fn run_documents<S, F>(
    store: &S,
    documents: &[String],
    dry_run: bool,
    notifier: &mut dyn Notifier,
    mut process: F,
) -> RunReport
where
    S: DocumentStore,
    F: FnMut(&S, &str) -> Result<DocumentChange>,
{
    notifier.notify(Notice::RunStarted {
        documents: documents.len(),
    });

    let mut processed = 0usize;
    let mut failed = 0usize;
    let mut total_replacements = 0usize;
    let mut changes = Vec::new();

    for document in documents {
        match process(store, document) {
            Ok(change) => {
                processed += 1;
                if change.is_modified() {
                    tracing::info!(
                        "{} {} ({} inline replacement(s))",
                        if dry_run { "Would update" } else { "Updated" },
                        change.document,
                        change.replacements
                    );
                    total_replacements += change.replacements;
                    changes.push(change);
                }
            }
            Err(e) => {
                failed += 1;
                tracing::warn!("Failed to process {}: {}", document, e);
            }
        }
    }

    notifier.notify(Notice::RunCompleted {
        processed,
        modified: changes.len(),
        dry_run,
    });

    RunReport {
        scanned: documents.len(),
        processed,
        failed,
        total_replacements,
        dry_run,
        changes,
    }
}
