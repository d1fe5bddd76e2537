//! Advisory status messages emitted while operations run

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    RunStarted {
        documents: usize,
    },
    RunCompleted {
        processed: usize,
        modified: usize,
        dry_run: bool,
    },
    InvalidRename {
        old_tag: String,
        new_tag: String,
    },
    NoTagsFound,
    ListingWritten {
        name: String,
        tags: usize,
    },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::RunStarted { documents } => {
                write!(f, "Processing {} document(s)...", documents)
            }
            Notice::RunCompleted {
                processed,
                modified,
                dry_run: false,
            } => write!(
                f,
                "Processed {} document(s), {} updated.",
                processed, modified
            ),
            Notice::RunCompleted {
                processed,
                modified,
                dry_run: true,
            } => write!(
                f,
                "Dry run: processed {} document(s), {} would be updated.",
                processed, modified
            ),
            Notice::InvalidRename { old_tag, new_tag } => write!(
                f,
                "Both tags are required (got '{}' -> '{}').",
                old_tag, new_tag
            ),
            Notice::NoTagsFound => f.write_str("No tags found"),
            Notice::ListingWritten { name, tags } => {
                write!(f, "Wrote {} tag(s) to {}", tags, name)
            }
        }
    }
}

/// Receiver of notices. Delivery never affects the operation.
pub trait Notifier {
    fn notify(&mut self, notice: Notice);
}

/// Collects notices in order
impl Notifier for Vec<Notice> {
    fn notify(&mut self, notice: Notice) {
        self.push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_messages() {
        assert_eq!(
            Notice::RunStarted { documents: 3 }.to_string(),
            "Processing 3 document(s)..."
        );
        assert_eq!(
            Notice::RunCompleted {
                processed: 2,
                modified: 1,
                dry_run: true
            }
            .to_string(),
            "Dry run: processed 2 document(s), 1 would be updated."
        );
        assert_eq!(
            Notice::ListingWritten {
                name: "Tag List.md".to_string(),
                tags: 4
            }
            .to_string(),
            "Wrote 4 tag(s) to Tag List.md"
        );
    }

    #[test]
    fn test_vec_notifier_records_in_order() {
        let mut notices: Vec<Notice> = Vec::new();
        notices.notify(Notice::NoTagsFound);
        notices.notify(Notice::RunStarted { documents: 0 });
        assert_eq!(
            notices,
            vec![Notice::NoTagsFound, Notice::RunStarted { documents: 0 }]
        );
    }
}
