//! Output formatting utilities

use crate::application::{Notice, Notifier, RunReport};
use crate::domain::tags::TagSummary;

/// Prints notices to stdout as they arrive
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, notice: Notice) {
        println!("{}", notice);
    }
}

/// Format the per-document lines of a normalize or rename run.
pub fn format_run_report(report: &RunReport) -> String {
    let mut output = String::new();
    for change in &report.changes {
        let mut parts = Vec::new();
        if change.metadata_changed {
            parts.push("frontmatter".to_string());
        }
        if change.replacements > 0 {
            parts.push(format!("{} inline", change.replacements));
        }
        output.push_str(&format!("  {}  ({})\n", change.document, parts.join(", ")));
    }
    if report.failed > 0 {
        output.push_str(&format!(
            "{} document(s) could not be processed (run with -v for details)\n",
            report.failed
        ));
    }
    output
}

/// Format a preview summary for display. With `all`, unchanged tags are listed too.
pub fn format_tag_summary(summary: &TagSummary, all: bool) -> String {
    if summary.total == 0 {
        return "No tags found".to_string();
    }

    let mut output = format!(
        "{} tag(s), {} would change\n",
        summary.total, summary.would_change
    );

    if all {
        for tag in &summary.tags {
            match summary.changes.iter().find(|change| &change.from == tag) {
                Some(change) => output.push_str(&format!("  #{} -> #{}\n", tag, change.to)),
                None => output.push_str(&format!("  #{}\n", tag)),
            }
        }
    } else {
        for change in &summary.changes {
            output.push_str(&format!("  #{} -> #{}\n", change.from, change.to));
        }
    }

    output
}

/// Format a list of tags for display.
pub fn format_tag_list(tags: &[String]) -> String {
    if tags.is_empty() {
        return "No tags found".to_string();
    }

    let mut output = String::new();
    for tag in tags {
        output.push_str(&format!("#{}\n", tag));
    }

    output
}
