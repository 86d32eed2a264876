// src/export/docx.rs
//! DOCX export via docx-rs

use std::io::Cursor;

use docx_rs::{AlignmentType, Docx, LineSpacing, Paragraph, Run};

use crate::entity::{ExportTemplate, LogEntry};
use crate::error::{IljiError, Result};

use super::format_date_short;

/// Heading-1 centered title, optional centered header, then per entry a
/// heading-2 title, an italic date line and a body paragraph; optional
/// centered footer last.
pub fn render(logs: &[LogEntry], template: &ExportTemplate) -> Result<Vec<u8>> {
    let mut doc = Docx::new().add_paragraph(
        Paragraph::new()
            .add_run(Run::new().add_text(template.name.as_str()))
            .style("Heading1")
            .align(AlignmentType::Center),
    );

    if template.include_header {
        if let Some(header) = &template.header_text {
            doc = doc.add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text(header.as_str()))
                    .align(AlignmentType::Center),
            );
        }
    }

    for (index, log) in logs.iter().enumerate() {
        doc = doc
            .add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text(format!("{}. {}", index + 1, log.title)))
                    .style("Heading2")
                    .line_spacing(LineSpacing::new().before(400).after(200)),
            )
            .add_paragraph(
                Paragraph::new()
                    .add_run(
                        Run::new()
                            .add_text(format!("작성일: {}", format_date_short(&log.created_at)))
                            .italic(),
                    )
                    .line_spacing(LineSpacing::new().after(200)),
            )
            .add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text(log.content.as_str()))
                    .line_spacing(LineSpacing::new().after(300)),
            );
    }

    if template.include_footer {
        if let Some(footer) = &template.footer_text {
            doc = doc.add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text(footer.as_str()))
                    .align(AlignmentType::Center)
                    .line_spacing(LineSpacing::new().before(400)),
            );
        }
    }

    let mut cursor = Cursor::new(Vec::new());
    doc.build()
        .pack(&mut cursor)
        .map_err(|e| IljiError::ExportFailed(format!("docx: {}", e)))?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{mock_entry, mock_template};
    use super::*;
    use crate::entity::ExportFormat;

    #[test]
    fn test_renders_zip_container() {
        let logs = vec![mock_entry("일지", "내용")];
        let template = mock_template("주간 보고", ExportFormat::Docx);

        let bytes = render(&logs, &template).unwrap();
        // DOCX is a zip archive.
        assert!(bytes.starts_with(b"PK\x03\x04"));
    }

    #[test]
    fn test_zero_entries_render() {
        let template = mock_template("빈 보고서", ExportFormat::Docx);
        let bytes = render(&[], &template).unwrap();
        assert!(!bytes.is_empty());
    }

    #[test]
    fn test_header_footer_grow_the_document() {
        let logs = vec![mock_entry("일지", "내용")];

        let plain = mock_template("보고", ExportFormat::Docx);
        let without = render(&logs, &plain).unwrap();

        let mut decorated = mock_template("보고", ExportFormat::Docx);
        decorated.include_header = true;
        decorated.header_text = Some("일지 보고서 헤더입니다".to_string());
        decorated.include_footer = true;
        decorated.footer_text = Some("Confidential".to_string());
        let with = render(&logs, &decorated).unwrap();

        assert!(with.len() > without.len());
    }
}
