//! Inline tag scanning over raw document text.
//!
//! Produces byte spans so callers can rewrite the text around them without
//! touching anything outside a match.

use super::transform::is_tag_char;
use pulldown_cmark::{Event, Parser as MdParser, Tag, TagEnd};
use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

/// Leading character of an inline or metadata tag.
pub const MARKER: char = '#';

/// `#` after start-of-text or whitespace, then one or more tag-body chars.
/// The body class is `is_tag_char` plus `/`.
fn inline_tag_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?:^|\s)#([\p{Alphabetic}\p{N}_/-]+)").unwrap())
}

/// Split a leading marker off a tag value.
pub fn strip_marker(value: &str) -> (bool, &str) {
    match value.strip_prefix(MARKER) {
        Some(rest) => (true, rest),
        None => (false, value),
    }
}

/// An inline tag occurrence: `marker..end` covers `#body`, `body` covers the tag itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSpan {
    pub marker: usize,
    pub body: Range<usize>,
}

impl TagSpan {
    pub fn range(&self) -> Range<usize> {
        self.marker..self.body.end
    }

    pub fn body<'a>(&self, text: &'a str) -> &'a str {
        &text[self.body.clone()]
    }
}

/// Find every inline tag in `text`, left to right.
pub fn scan_inline_tags(text: &str, skip_code: bool) -> Vec<TagSpan> {
    let excluded = if skip_code {
        excluded_ranges(text)
    } else {
        Vec::new()
    };

    inline_tag_regex()
        .captures_iter(text)
        .filter_map(|captures| {
            let body = captures.get(1)?;
            let marker = body.start() - MARKER.len_utf8();
            if in_ranges(&excluded, marker) {
                return None;
            }
            Some(TagSpan {
                marker,
                body: body.range(),
            })
        })
        .collect()
}

/// Find `#search` occurrences that name exactly `search` or one of its nested tags.
///
/// The marker must follow start-of-text or whitespace, and the character after
/// `search` must not continue the segment: end-of-text, `/`, whitespace and
/// punctuation all qualify. `search` is matched literally.
pub fn find_tag_references(text: &str, search: &str, skip_code: bool) -> Vec<Range<usize>> {
    if search.is_empty() {
        return Vec::new();
    }

    let excluded = if skip_code {
        excluded_ranges(text)
    } else {
        Vec::new()
    };
    let needle = format!("{}{}", MARKER, search);

    text.match_indices(&needle)
        .map(|(start, _)| start..start + needle.len())
        .filter(|range| {
            let preceded = text[..range.start]
                .chars()
                .next_back()
                .is_none_or(char::is_whitespace);
            let followed = text[range.end..]
                .chars()
                .next()
                .is_none_or(|ch| !is_tag_char(ch));
            preceded && followed && !in_ranges(&excluded, range.start)
        })
        .collect()
}

fn in_ranges(ranges: &[Range<usize>], offset: usize) -> bool {
    ranges.iter().any(|range| range.contains(&offset))
}

/// Byte ranges of fenced/indented code blocks and inline code spans.
fn excluded_ranges(markdown: &str) -> Vec<Range<usize>> {
    let mut ranges: Vec<Range<usize>> = Vec::new();
    let mut code_block_start: Option<usize> = None;

    for (event, range) in MdParser::new(markdown).into_offset_iter() {
        match event {
            Event::Start(Tag::CodeBlock(_)) => {
                code_block_start = Some(range.start);
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some(start) = code_block_start.take() {
                    ranges.push(start..range.end);
                }
            }
            Event::Code(_) => {
                ranges.push(range.start..range.end);
            }
            _ => {}
        }
    }

    if let Some(start) = code_block_start.take() {
        ranges.push(start..markdown.len());
    }

    merge_ranges(ranges)
}

fn merge_ranges(mut ranges: Vec<Range<usize>>) -> Vec<Range<usize>> {
    ranges.sort_by(|a, b| a.start.cmp(&b.start).then(a.end.cmp(&b.end)));

    let mut merged: Vec<Range<usize>> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if range.start <= last.end => {
                last.end = last.end.max(range.end);
            }
            _ => merged.push(range),
        }
    }

    merged
}
