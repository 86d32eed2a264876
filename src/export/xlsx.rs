// src/export/xlsx.rs
//! XLSX export via rust_xlsxwriter

use rust_xlsxwriter::{Workbook, XlsxError};

use crate::entity::{ExportTemplate, LogEntry};
use crate::error::{IljiError, Result};

use super::format_date_short;

fn xlsx_err(e: XlsxError) -> IljiError {
    IljiError::ExportFailed(format!("xlsx: {}", e))
}

/// Excel rejects worksheet names over 31 chars or containing `[ ] : * ? / \`.
fn sanitize_sheet_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .take(31)
        .collect();
    let cleaned = cleaned.trim().to_string();
    if cleaned.is_empty() {
        "Sheet1".to_string()
    } else {
        cleaned
    }
}

/// One worksheet named after the template: a header row, one row per entry
/// with the full untruncated content, fixed column width hints.
pub fn render(logs: &[LogEntry], template: &ExportTemplate) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet
        .set_name(sanitize_sheet_name(&template.name))
        .map_err(xlsx_err)?;

    sheet.write_string(0, 0, "No").map_err(xlsx_err)?;
    sheet.write_string(0, 1, "제목").map_err(xlsx_err)?;
    sheet.write_string(0, 2, "작성일").map_err(xlsx_err)?;
    sheet.write_string(0, 3, "내용").map_err(xlsx_err)?;

    for (index, log) in logs.iter().enumerate() {
        let row = index as u32 + 1;
        sheet
            .write_number(row, 0, (index + 1) as f64)
            .map_err(xlsx_err)?;
        sheet
            .write_string(row, 1, log.title.as_str())
            .map_err(xlsx_err)?;
        sheet
            .write_string(row, 2, format_date_short(&log.created_at))
            .map_err(xlsx_err)?;
        sheet
            .write_string(row, 3, log.content.as_str())
            .map_err(xlsx_err)?;
    }

    sheet.set_column_width(0, 5).map_err(xlsx_err)?;
    sheet.set_column_width(1, 30).map_err(xlsx_err)?;
    sheet.set_column_width(2, 15).map_err(xlsx_err)?;
    sheet.set_column_width(3, 80).map_err(xlsx_err)?;

    workbook.save_to_buffer().map_err(xlsx_err)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{mock_entry, mock_template};
    use super::*;
    use crate::entity::ExportFormat;

    #[test]
    fn test_renders_zip_container() {
        let logs = vec![mock_entry("일지", "내용")];
        let template = mock_template("주간 보고", ExportFormat::Xlsx);

        let bytes = render(&logs, &template).unwrap();
        assert!(bytes.starts_with(b"PK\x03\x04"));
    }

    #[test]
    fn test_zero_entries_render() {
        let template = mock_template("빈 보고서", ExportFormat::Xlsx);
        let bytes = render(&[], &template).unwrap();
        assert!(!bytes.is_empty());
    }

    #[test]
    fn test_long_content_is_not_truncated() {
        // The xlsx rows carry full content; only the PDF summary cuts at 100.
        let long = "a".repeat(400);
        let logs = vec![mock_entry("긴 일지", &long)];
        let template = mock_template("보고", ExportFormat::Xlsx);

        let short_logs = vec![mock_entry("긴 일지", &"a".repeat(100))];
        let full = render(&logs, &template).unwrap();
        let cut = render(&short_logs, &template).unwrap();
        // A 400-char cell compresses differently from a 100-char one; the
        // documents must differ if the content survived untruncated.
        assert_ne!(full, cut);
    }

    #[test]
    fn test_sheet_name_sanitized() {
        assert_eq!(sanitize_sheet_name("주간/보고[1]"), "주간보고1");
        assert_eq!(sanitize_sheet_name("???"), "Sheet1");
        assert_eq!(sanitize_sheet_name(&"a".repeat(40)), "a".repeat(31));

        let logs = vec![mock_entry("일지", "내용")];
        let template = mock_template("아주 긴 이름의 보고서 템플릿: 2024년도 상반기*", ExportFormat::Xlsx);
        assert!(render(&logs, &template).is_ok());
    }
}
