//! Tag rewriting for frontmatter metadata and document bodies.

use super::scanner::{find_tag_references, scan_inline_tags, strip_marker, MARKER};
use super::transform::{transform_tag, TransformConfig};
use crate::error::{Result, TagnormError};
use serde_yaml::{Mapping, Value};

/// Frontmatter fields that hold tags: the primary field and its alias.
pub const TAG_FIELDS: [&str; 2] = ["tags", "tag"];

/// Result of rewriting a document body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRewrite {
    pub content: String,
    pub replacements: usize,
}

/// A validated request to rename one tag (and its nested tags) to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameRequest {
    search: String,
    replace: String,
}

impl RenameRequest {
    /// Build a request from user input; a leading `#` on either side is dropped.
    pub fn new(old_tag: &str, new_tag: &str) -> Result<Self> {
        let search = strip_marker(old_tag.trim()).1;
        let replace = strip_marker(new_tag.trim()).1;

        if search.is_empty() || replace.is_empty() {
            return Err(TagnormError::InvalidRename(format!(
                "'{}' -> '{}'",
                old_tag, new_tag
            )));
        }

        Ok(Self {
            search: search.to_string(),
            replace: replace.to_string(),
        })
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn replace(&self) -> &str {
        &self.replace
    }

    /// Renamed form of a marker-less tag, or `None` when it is not `search`
    /// or nested under it.
    pub fn apply(&self, raw: &str) -> Option<String> {
        if raw == self.search {
            return Some(self.replace.clone());
        }
        let rest = raw.strip_prefix(self.search.as_str())?;
        if rest.starts_with('/') {
            Some(format!("{}{}", self.replace, rest))
        } else {
            None
        }
    }
}

fn with_marker(marked: bool, tag: String) -> String {
    if marked {
        format!("{}{}", MARKER, tag)
    } else {
        tag
    }
}

/// Normalize a metadata tag value, keeping its marker if it had one.
pub fn normalize_value(value: &str, config: TransformConfig) -> String {
    let (marked, tag) = strip_marker(value);
    with_marker(marked, transform_tag(tag, config))
}

/// Rename a metadata tag value, keeping its marker if it had one.
pub fn rename_value(value: &str, request: &RenameRequest) -> Option<String> {
    let (marked, tag) = strip_marker(value);
    request.apply(tag).map(|renamed| with_marker(marked, renamed))
}

/// Apply `rewrite` to every string in the tag fields. Returns whether anything changed.
fn rewrite_tag_fields<F>(metadata: &mut Mapping, mut rewrite: F) -> bool
where
    F: FnMut(&str) -> Option<String>,
{
    let mut changed = false;
    let mut update = |slot: &mut String| {
        if let Some(new_value) = rewrite(slot.as_str()) {
            if new_value != *slot {
                *slot = new_value;
                changed = true;
            }
        }
    };

    for field in TAG_FIELDS {
        match metadata.get_mut(field) {
            Some(Value::String(value)) => update(value),
            Some(Value::Sequence(items)) => {
                for item in items.iter_mut() {
                    if let Value::String(value) = item {
                        update(value);
                    }
                }
            }
            _ => {}
        }
    }

    changed
}

/// Normalize the `tags`/`tag` fields in place.
pub fn normalize_metadata(metadata: &mut Mapping, config: TransformConfig) -> bool {
    rewrite_tag_fields(metadata, |value| Some(normalize_value(value, config)))
}

/// Rename matching `tags`/`tag` values in place.
pub fn rename_metadata(metadata: &mut Mapping, request: &RenameRequest) -> bool {
    rewrite_tag_fields(metadata, |value| rename_value(value, request))
}

/// Collect the string values of the tag fields, as written.
pub fn metadata_tags(metadata: &Mapping) -> Vec<String> {
    let mut tags = Vec::new();
    for field in TAG_FIELDS {
        match metadata.get(field) {
            Some(Value::String(value)) => tags.push(value.clone()),
            Some(Value::Sequence(items)) => {
                tags.extend(items.iter().filter_map(Value::as_str).map(str::to_string));
            }
            _ => {}
        }
    }
    tags
}

/// Normalize every inline tag in a document body.
pub fn normalize_text(text: &str, config: TransformConfig, skip_code: bool) -> TextRewrite {
    let mut rewritten = String::with_capacity(text.len());
    let mut replacements = 0usize;
    let mut cursor = 0usize;

    for span in scan_inline_tags(text, skip_code) {
        let body = span.body(text);
        let normalized = transform_tag(body, config);
        if normalized == body {
            continue;
        }

        rewritten.push_str(&text[cursor..span.marker]);
        rewritten.push(MARKER);
        rewritten.push_str(&normalized);
        cursor = span.body.end;
        replacements += 1;
    }
    rewritten.push_str(&text[cursor..]);

    TextRewrite {
        content: rewritten,
        replacements,
    }
}

/// Rename `#search` (and `#search/...`) in a document body.
///
/// Only the `#search` span is replaced, so nested suffixes stay as written.
pub fn rename_text(text: &str, request: &RenameRequest, skip_code: bool) -> TextRewrite {
    if request.search == request.replace {
        return TextRewrite {
            content: text.to_string(),
            replacements: 0,
        };
    }

    let mut rewritten = String::with_capacity(text.len());
    let mut replacements = 0usize;
    let mut cursor = 0usize;

    for range in find_tag_references(text, &request.search, skip_code) {
        rewritten.push_str(&text[cursor..range.start]);
        rewritten.push(MARKER);
        rewritten.push_str(&request.replace);
        cursor = range.end;
        replacements += 1;
    }
    rewritten.push_str(&text[cursor..]);

    TextRewrite {
        content: rewritten,
        replacements,
    }
}
