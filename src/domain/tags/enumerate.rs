//! Read-only summary of the tags known to a collection.

use super::scanner::{strip_marker, MARKER};
use super::transform::{transform_tag, TransformConfig};
use std::collections::BTreeSet;

/// A tag whose normalized form differs from how it is written today.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagChange {
    pub from: String,
    pub to: String,
}

/// How many distinct tags exist and how many normalization would change.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagSummary {
    /// Every distinct tag, marker-less, in code-point order
    pub tags: Vec<String>,
    pub total: usize,
    pub would_change: usize,
    pub changes: Vec<TagChange>,
}

/// Marker-less, deduplicated tags in code-point order.
pub fn distinct_tags<I, S>(tags: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .map(|tag| strip_marker(tag.as_ref()).1.to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Count the tags that `config` would rewrite. Nothing is mutated.
pub fn summarize<I, S>(tags: I, config: TransformConfig) -> TagSummary
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let tags = distinct_tags(tags);
    let changes: Vec<TagChange> = tags
        .iter()
        .filter_map(|tag| {
            let normalized = transform_tag(tag, config);
            (normalized != *tag).then(|| TagChange {
                from: tag.clone(),
                to: normalized,
            })
        })
        .collect();

    TagSummary {
        total: tags.len(),
        would_change: changes.len(),
        changes,
        tags: tags.into_iter().collect(),
    }
}

/// Render the listing document: one `#tag` per line.
pub fn render_listing(tags: &BTreeSet<String>) -> String {
    let mut output = String::new();
    for tag in tags {
        output.push(MARKER);
        output.push_str(tag);
        output.push('\n');
    }
    output
}
