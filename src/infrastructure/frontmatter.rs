//! YAML frontmatter splitting and rendering

use crate::error::{Result, TagnormError};
use serde_yaml::{Mapping, Value};

const FENCE: &str = "---";

/// A Markdown document cut at the end of its frontmatter block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitDocument<'a> {
    /// Everything up to and including the closing fence line (empty without frontmatter)
    pub header: &'a str,
    /// YAML between the fences, if the document has a frontmatter block
    pub yaml: Option<&'a str>,
    pub body: &'a str,
}

fn is_fence(line: &str) -> bool {
    line.trim_end() == FENCE
}

/// Split `content` into frontmatter and body.
///
/// Frontmatter must open on the first line and be closed by a later `---`
/// line; anything else is treated as body only.
pub fn split(content: &str) -> SplitDocument<'_> {
    let no_frontmatter = SplitDocument {
        header: "",
        yaml: None,
        body: content,
    };

    let Some(first_end) = content.find('\n') else {
        return no_frontmatter;
    };
    if !is_fence(&content[..first_end]) {
        return no_frontmatter;
    }

    let yaml_start = first_end + 1;
    let mut pos = yaml_start;
    while pos < content.len() {
        let line_end = content[pos..].find('\n').map(|i| pos + i);
        let line = &content[pos..line_end.unwrap_or(content.len())];
        if is_fence(line) {
            let body_start = line_end.map_or(content.len(), |end| end + 1);
            return SplitDocument {
                header: &content[..body_start],
                yaml: Some(&content[yaml_start..pos]),
                body: &content[body_start..],
            };
        }
        match line_end {
            Some(end) => pos = end + 1,
            None => break,
        }
    }

    no_frontmatter
}

/// Parse frontmatter YAML into a mapping. A missing or empty block is an empty mapping.
pub fn parse(document: &str, yaml: Option<&str>) -> Result<Mapping> {
    let Some(yaml) = yaml.filter(|text| !text.trim().is_empty()) else {
        return Ok(Mapping::new());
    };

    let invalid = |source| TagnormError::Frontmatter {
        document: document.to_string(),
        source,
    };

    match serde_yaml::from_str::<Value>(yaml).map_err(invalid)? {
        Value::Mapping(mapping) => Ok(mapping),
        Value::Null => Ok(Mapping::new()),
        _ => Err(invalid(<serde_yaml::Error as serde::de::Error>::custom(
            "frontmatter is not a mapping",
        ))),
    }
}

/// Render a document from a metadata mapping and a body.
pub fn render(metadata: &Mapping, body: &str) -> Result<String> {
    let yaml = if metadata.is_empty() {
        String::new()
    } else {
        serde_yaml::to_string(metadata)?
    };
    Ok(format!("{FENCE}\n{yaml}{FENCE}\n{body}"))
}
