//! Tag enumeration use cases: preview and listing document

use crate::application::notice::{Notice, Notifier};
use crate::domain::tags::enumerate::{distinct_tags, render_listing, summarize};
use crate::domain::tags::TagSummary;
use crate::error::Result;
use crate::infrastructure::{DocumentStore, Settings};

/// Outcome of generating the listing document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingReport {
    /// Distinct tags, marker-less, in code-point order
    pub tags: Vec<String>,
    /// Name of the document written, if any
    pub written: Option<String>,
}

/// Service for reporting on the tags used in a collection.
pub struct ListTagsService<'a, S: DocumentStore> {
    store: &'a S,
    settings: &'a Settings,
}

impl<'a, S: DocumentStore> ListTagsService<'a, S> {
    pub fn new(store: &'a S, settings: &'a Settings) -> Self {
        Self { store, settings }
    }

    /// Distinct tags, marker-less, in code-point order.
    pub fn tags(&self) -> Result<Vec<String>> {
        let tags = distinct_tags(self.store.list_distinct_tags()?);
        Ok(tags.into_iter().collect())
    }

    /// Count how many distinct tags the current settings would rewrite.
    pub fn preview(&self) -> Result<TagSummary> {
        let tags = self.store.list_distinct_tags()?;
        Ok(summarize(tags, self.settings.transform()))
    }

    /// Write every distinct tag, one per line, to the configured listing document.
    pub fn write_listing(&self, notifier: &mut dyn Notifier) -> Result<ListingReport> {
        let tags = distinct_tags(self.store.list_distinct_tags()?);
        if tags.is_empty() {
            notifier.notify(Notice::NoTagsFound);
            return Ok(ListingReport {
                tags: Vec::new(),
                written: None,
            });
        }

        let name = self.settings.listing_name.clone();
        self.store.create_or_overwrite(&name, &render_listing(&tags))?;
        notifier.notify(Notice::ListingWritten {
            name: name.clone(),
            tags: tags.len(),
        });

        Ok(ListingReport {
            tags: tags.into_iter().collect(),
            written: Some(name),
        })
    }
}
