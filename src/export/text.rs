// src/export/text.rs
//! Plain-text export

use crate::entity::{ExportTemplate, LogEntry};

use super::format_date_short;

/// Newline-delimited document: title line, optional header, one block per
/// entry, optional footer.
pub fn render(logs: &[LogEntry], template: &ExportTemplate) -> String {
    let mut content = format!("{} 출력 문서\n\n", template.name);

    if template.include_header {
        if let Some(header) = &template.header_text {
            content.push_str(&format!("{}\n\n", header));
        }
    }

    for (index, log) in logs.iter().enumerate() {
        content.push_str(&format!("{}. {}\n", index + 1, log.title));
        content.push_str(&format!("작성일: {}\n", format_date_short(&log.created_at)));
        content.push_str(&format!("{}\n\n", log.content));
    }

    if template.include_footer {
        if let Some(footer) = &template.footer_text {
            content.push_str(&format!("\n{}", footer));
        }
    }

    content
}
