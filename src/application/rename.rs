//! Targeted rename use case

use crate::application::driver::{run_documents, DocumentChange, RunReport};
use crate::application::notice::{Notice, Notifier};
use crate::domain::tags::rewrite::{rename_metadata, rename_text};
use crate::domain::RenameRequest;
use crate::error::Result;
use crate::infrastructure::{DocumentStore, Settings};

#[derive(Debug, Clone)]
pub struct RenameOptions {
    pub old_tag: String,
    pub new_tag: String,
    pub dry_run: bool,
}

/// Rename one tag, and every tag nested under it, across the whole collection.
///
/// Empty input is rejected before any document is read.
pub fn rename_tag<S: DocumentStore>(
    store: &S,
    settings: &Settings,
    options: &RenameOptions,
    notifier: &mut dyn Notifier,
) -> Result<RunReport> {
    let request = match RenameRequest::new(&options.old_tag, &options.new_tag) {
        Ok(request) => request,
        Err(e) => {
            notifier.notify(Notice::InvalidRename {
                old_tag: options.old_tag.clone(),
                new_tag: options.new_tag.clone(),
            });
            return Err(e);
        }
    };

    tracing::info!("Renaming #{} to #{}", request.search(), request.replace());

    let documents = store.list_documents()?;
    let skip_code = settings.skip_code;
    let dry_run = options.dry_run;

    Ok(run_documents(
        store,
        &documents,
        dry_run,
        notifier,
        |store, document| rename_in_document(store, document, &request, skip_code, dry_run),
    ))
}

fn rename_in_document<S: DocumentStore>(
    store: &S,
    document: &str,
    request: &RenameRequest,
    skip_code: bool,
    dry_run: bool,
) -> Result<DocumentChange> {
    let mut metadata_changed = false;
    store.with_metadata(document, |metadata| {
        let mut updated = metadata.clone();
        metadata_changed = rename_metadata(&mut updated, request);
        if metadata_changed && !dry_run {
            *metadata = updated;
        }
    })?;

    let mut replacements = 0usize;
    store.with_raw_text(document, |text| {
        let result = rename_text(text, request, skip_code);
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
