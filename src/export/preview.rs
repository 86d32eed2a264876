// src/export/preview.rs
//! Plain-text preview of a single entry under an export template.
//!
//! The detail view the original showed before exporting: header/footer per
//! flags (with the app's fallback strings), checklist with ☑/☐ marks and a
//! `*` on required items, attachments with KiB sizes.

use crate::entity::{ExportTemplate, LogEntry};

use super::format_date_long;

const HEADER_FALLBACK: &str = "일지 관리 시스템";
const FOOTER_FALLBACK: &str = "© 일지 관리 시스템";

pub fn render_preview(log: &LogEntry, template: &ExportTemplate) -> String {
    let mut out = String::new();

    if template.include_header {
        let header = template.header_text.as_deref().unwrap_or(HEADER_FALLBACK);
        out.push_str(&format!("{}\n\n", header));
    }

    out.push_str(&format!("{}\n", log.title));
    out.push_str(&format!("작성일: {}\n\n", format_date_long(&log.created_at)));

    if log.content.is_empty() {
        out.push_str("내용 없음\n");
    } else {
        out.push_str(&format!("{}\n", log.content));
    }

    if template.include_checklist && !log.checklist_items.is_empty() {
        out.push_str("\n체크리스트\n");
        for item in &log.checklist_items {
            let mark = if item.checked { "☑" } else { "☐" };
            let star = if item.required { " *" } else { "" };
            out.push_str(&format!("{} {}{}\n", mark, item.text, star));
        }
    }

    if template.include_attachments && !log.attachments.is_empty() {
        out.push_str("\n첨부파일\n");
        for file in &log.attachments {
            let kib = (file.size_bytes as f64 / 1024.0).round() as u64;
            out.push_str(&format!("• {} ({} KB)\n", file.name, kib));
        }
    }

    if template.include_footer {
        let footer = template.footer_text.as_deref().unwrap_or(FOOTER_FALLBACK);
        out.push_str(&format!("\n{}\n", footer));
    }

    out
}
