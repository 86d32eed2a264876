// src/export/mod.rs
//! Document export module
//!
//! Renders a selection of log entries plus one export template into a
//! deliverable payload, dispatching on the template's format. The format
//! encoders (printpdf, docx-rs, rust_xlsxwriter) are treated as opaque;
//! their errors surface as a single `ExportFailed`.

mod docx;
mod pdf;
mod preview;
mod text;
mod xlsx;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, Utc};
use tracing::info;

use crate::entity::{ExportFormat, ExportTemplate, LogEntry};
use crate::error::{IljiError, Result};

pub use self::preview::render_preview;

/// A rendered export document, ready for delivery.
#[derive(Debug, Clone)]
pub enum ExportPayload {
    Text(String),
    Binary(Vec<u8>),
}

impl ExportPayload {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            ExportPayload::Text(s) => s.as_bytes(),
            ExportPayload::Binary(b) => b,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

/// Render the given entries with the template, in the template's format.
///
/// Zero entries yield a well-formed empty document in every format.
pub fn render(logs: &[LogEntry], template: &ExportTemplate) -> Result<ExportPayload> {
    match template.format {
        ExportFormat::Text => Ok(ExportPayload::Text(text::render(logs, template))),
        ExportFormat::Pdf => Ok(ExportPayload::Binary(pdf::render(logs, template)?)),
        ExportFormat::Docx => Ok(ExportPayload::Binary(docx::render(logs, template)?)),
        ExportFormat::Xlsx => Ok(ExportPayload::Binary(xlsx::render(logs, template)?)),
    }
}

/// Write a rendered payload to `<out_dir>/<stem>.<ext>` and return the path.
///
/// The stem must be non-empty; the extension comes from the format. This is
/// the download step of the original, reduced to a file write.
pub fn deliver(
    payload: &ExportPayload,
    out_dir: &Path,
    stem: &str,
    format: ExportFormat,
) -> Result<PathBuf> {
    let stem = stem.trim();
    if stem.is_empty() {
        return Err(IljiError::Validation(
            "file name must not be empty".to_string(),
        ));
    }

    fs::create_dir_all(out_dir)?;
    let path = out_dir.join(format!("{}.{}", stem, format.extension()));
    fs::write(&path, payload.as_bytes())?;
    info!(path = %path.display(), bytes = payload.len(), "delivered export");
    Ok(path)
}

/// Default file-name stem for an export run: `일지_YYYY-MM-DD`.
pub fn default_file_stem(now: DateTime<Utc>) -> String {
    format!("일지_{}", now.format("%Y-%m-%d"))
}

/// ko-KR short date: `2024. 1. 15.`
pub fn format_date_short(dt: &DateTime<Utc>) -> String {
    format!("{}. {}. {}.", dt.year(), dt.month(), dt.day())
}

/// ko-KR long date: `2024년 1월 15일`
pub fn format_date_long(dt: &DateTime<Utc>) -> String {
    format!("{}년 {}월 {}일", dt.year(), dt.month(), dt.day())
}

/// Display width of one char in wrap units. CJK and other wide glyphs take
/// two units, everything else one.
fn char_units(c: char) -> usize {
    if c.is_ascii() {
        1
    } else {
        2
    }
}

/// Total wrap units of a string.
pub fn text_units(text: &str) -> usize {
    text.chars().map(char_units).sum()
}

/// Greedy width-aware line wrap, the stand-in for jsPDF's splitTextToSize.
///
/// Respects embedded newlines; a char landing past the budget starts a new
/// line, and a space at a break point is swallowed.
pub fn wrap_text(text: &str, max_units: usize) -> Vec<String> {
    let max_units = max_units.max(1);
    let mut lines = Vec::new();

    for raw in text.split('\n') {
        let mut line = String::new();
        let mut units = 0usize;
        for c in raw.chars() {
            let w = char_units(c);
            if units + w > max_units && !line.is_empty() {
                lines.push(std::mem::take(&mut line).trim_end().to_string());
                units = 0;
                if c == ' ' {
                    continue;
                }
            }
            line.push(c);
            units += w;
        }
        lines.push(line.trim_end().to_string());
    }

    lines
}

/// Truncate to `max` chars, appending `...` when anything was cut.
pub fn truncate_content(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    format!("{}...", cut)
}
