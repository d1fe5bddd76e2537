//! Tag segment transformation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Letter case applied to a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CaseStrategy {
    #[default]
    Lowercase,
    Uppercase,
    None,
}

/// How hyphens and underscores inside a segment are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SeparatorStrategy {
    /// Leave separators as written
    #[default]
    Preserve,
    /// Hyphens become underscores
    Snake,
    /// Underscores become hyphens
    Kebab,
}

impl FromStr for CaseStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lowercase" | "lower" => Ok(CaseStrategy::Lowercase),
            "uppercase" | "upper" => Ok(CaseStrategy::Uppercase),
            "none" => Ok(CaseStrategy::None),
            _ => Err(format!(
                "Invalid case: '{}'. Valid values are: lowercase, uppercase, none",
                s
            )),
        }
    }
}

impl FromStr for SeparatorStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "preserve" => Ok(SeparatorStrategy::Preserve),
            "snake" => Ok(SeparatorStrategy::Snake),
            "kebab" => Ok(SeparatorStrategy::Kebab),
            _ => Err(format!(
                "Invalid separator: '{}'. Valid values are: preserve, snake, kebab",
                s
            )),
        }
    }
}

impl fmt::Display for CaseStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CaseStrategy::Lowercase => "lowercase",
            CaseStrategy::Uppercase => "uppercase",
            CaseStrategy::None => "none",
        };
        f.write_str(name)
    }
}

impl fmt::Display for SeparatorStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SeparatorStrategy::Preserve => "preserve",
            SeparatorStrategy::Snake => "snake",
            SeparatorStrategy::Kebab => "kebab",
        };
        f.write_str(name)
    }
}

/// Rules applied to every tag during bulk normalization.
///
/// Passed by value into each operation, so a run never sees it change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransformConfig {
    pub case: CaseStrategy,
    pub separator: SeparatorStrategy,
    pub remove_special_chars: bool,
    pub apply_to_nested: bool,
}

/// Characters allowed inside a single tag segment.
pub fn is_tag_char(ch: char) -> bool {
    ch.is_alphabetic() || ch.is_numeric() || ch == '_' || ch == '-'
}

fn retain_tag_chars(segment: &str) -> String {
    segment.chars().filter(|&ch| is_tag_char(ch)).collect()
}

/// Transform a single segment: strip specials, then separators, then case.
pub fn transform_segment(segment: &str, config: TransformConfig) -> String {
    let mut out = if config.remove_special_chars {
        retain_tag_chars(segment)
    } else {
        segment.to_string()
    };

    out = match config.separator {
        SeparatorStrategy::Preserve => out,
        SeparatorStrategy::Snake => out.replace('-', "_"),
        SeparatorStrategy::Kebab => out.replace('_', "-"),
    };

    out = match config.case {
        CaseStrategy::Lowercase => out.to_lowercase(),
        CaseStrategy::Uppercase => out.to_uppercase(),
        CaseStrategy::None => out,
    };

    // Full case mapping can expand to combining marks (e.g. 'İ' -> "i\u{307}").
    if config.remove_special_chars && config.case != CaseStrategy::None {
        out = retain_tag_chars(&out);
    }

    out
}

/// Transform every segment of a `/`-separated tag.
///
/// Segment 0 is always transformed; the rest only with `apply_to_nested`.
/// Empty segments keep their positions.
pub fn transform_tag(content: &str, config: TransformConfig) -> String {
    content
        .split('/')
        .enumerate()
        .map(|(index, segment)| {
            if index == 0 || config.apply_to_nested {
                transform_segment(segment, config)
            } else {
                segment.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}
