// src/export/pdf.rs
//! PDF export via printpdf
//!
//! A4 portrait, laid out top-down in millimeters: centered title, optional
//! header, a shaded summary table (index / title / date / truncated content),
//! then one detail block per entry. The cursor breaks to a new page past
//! 270 mm and resumes at 20 mm.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Rect, Rgb,
};

use crate::entity::{ExportTemplate, LogEntry};
use crate::error::{IljiError, Result};

use super::{format_date_long, truncate_content, wrap_text};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_X: f32 = 10.0;
const BREAK_Y: f32 = 270.0;
const RESUME_Y: f32 = 20.0;

// Wrap budgets per column/block, in wrap units (ASCII 1, wide glyphs 2).
const SUMMARY_TITLE_UNITS: usize = 24;
const SUMMARY_CONTENT_UNITS: usize = 44;
const DETAIL_CONTENT_UNITS: usize = 84;

/// How many chars of content the summary table shows before cutting.
const SUMMARY_CONTENT_CHARS: usize = 100;

fn pdf_err<E: std::fmt::Display>(e: E) -> IljiError {
    IljiError::ExportFailed(format!("pdf: {}", e))
}

/// Render entries to PDF bytes. The font is the builtin Helvetica unless
/// `ILJI_FONT` names a TTF to embed.
pub fn render(logs: &[LogEntry], template: &ExportTemplate) -> Result<Vec<u8>> {
    let font_path = std::env::var_os("ILJI_FONT").map(PathBuf::from);
    render_with_font(logs, template, font_path.as_deref())
}

pub(crate) fn render_with_font(
    logs: &[LogEntry],
    template: &ExportTemplate,
    font_path: Option<&Path>,
) -> Result<Vec<u8>> {
    let (doc, _pages) = build(logs, template, font_path)?;
    doc.save_to_bytes().map_err(pdf_err)
}

/// Tracks the current page/layer and a top-down cursor in mm.
struct PageWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    font: IndirectFontRef,
    y: f32,
    pages: usize,
}

impl PageWriter {
    fn break_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = RESUME_Y;
        self.pages += 1;
    }

    fn ensure_room(&mut self) {
        if self.y > BREAK_Y {
            self.break_page();
        }
    }

    fn text(&self, text: &str, size: f32, x: f32) {
        self.text_at(text, size, x, self.y);
    }

    fn text_at(&self, text: &str, size: f32, x: f32, y: f32) {
        self.layer
            .use_text(text, size, Mm(x), Mm(PAGE_HEIGHT - y), &self.font);
    }

    fn text_centered(&self, text: &str, size: f32, y: f32) {
        let x = ((PAGE_WIDTH - approx_width_mm(text, size)) / 2.0).max(MARGIN_X);
        self.text_at(text, size, x, y);
    }

    fn set_gray_fill(&self) {
        self.layer
            .set_fill_color(Color::Rgb(Rgb::new(0.94, 0.94, 0.94, None)));
    }

    fn set_black_fill(&self) {
        self.layer
            .set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    }
}

/// Rough glyph-width estimate for centering; printpdf exposes no text
/// metrics. Half an em per unit, 1 pt = 0.3528 mm.
fn approx_width_mm(text: &str, size: f32) -> f32 {
    super::text_units(text) as f32 * 0.5 * size * 0.3528
}

fn build(
    logs: &[LogEntry],
    template: &ExportTemplate,
    font_path: Option<&Path>,
) -> Result<(PdfDocumentReference, usize)> {
    let (doc, page, layer) = PdfDocument::new(
        &template.name,
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1",
    );

    let font = match font_path {
        Some(path) => {
            let file = File::open(path)
                .map_err(|e| IljiError::ExportFailed(format!("font {}: {}", path.display(), e)))?;
            doc.add_external_font(BufReader::new(file)).map_err(pdf_err)?
        }
        None => doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?,
    };

    let layer = doc.get_page(page).get_layer(layer);
    let mut writer = PageWriter {
        doc,
        layer,
        font,
        y: 0.0,
        pages: 1,
    };

    // Title page head: centered name, optional header line.
    writer.text_centered(&template.name, 18.0, 15.0);
    if template.include_header {
        if let Some(header) = &template.header_text {
            writer.text_centered(header, 12.0, 25.0);
        }
    }

    render_summary_table(&mut writer, logs);
    render_detail_blocks(&mut writer, logs, template);

    // Footer sits at a fixed offset from the bottom of the final page.
    if template.include_footer {
        if let Some(footer) = &template.footer_text {
            writer.text_centered(footer, 10.0, PAGE_HEIGHT - 10.0);
        }
    }

    let pages = writer.pages;
    Ok((writer.doc, pages))
}

/// Shaded header band at 35–45 mm, then one row per entry with the content
/// cut to 100 chars.
fn render_summary_table(writer: &mut PageWriter, logs: &[LogEntry]) {
    writer.set_gray_fill();
    writer.layer.add_rect(
        Rect::new(
            Mm(MARGIN_X),
            Mm(PAGE_HEIGHT - 45.0),
            Mm(PAGE_WIDTH - MARGIN_X),
            Mm(PAGE_HEIGHT - 35.0),
        )
        .with_mode(PaintMode::Fill),
    );
    writer.set_black_fill();

    writer.text_at("No", 11.0, 15.0, 41.0);
    writer.text_at("제목", 11.0, 40.0, 41.0);
    writer.text_at("작성일", 11.0, 85.0, 41.0);
    writer.text_at("내용", 11.0, 120.0, 41.0);

    writer.y = 50.0;
    for (index, log) in logs.iter().enumerate() {
        let title_lines = wrap_text(&log.title, SUMMARY_TITLE_UNITS);
        let content_lines = wrap_text(
            &truncate_content(&log.content, SUMMARY_CONTENT_CHARS),
            SUMMARY_CONTENT_UNITS,
        );
        let rows = title_lines.len().max(content_lines.len()).max(1);
        let row_height = rows as f32 * 5.0 + 2.0;

        if writer.y + row_height > BREAK_Y {
            writer.break_page();
        }

        writer.text(&format!("{}", index + 1), 10.0, 15.0);
        writer.text(&format_date_long(&log.created_at), 10.0, 85.0);
        for (i, line) in title_lines.iter().enumerate() {
            writer.text_at(line, 10.0, 40.0, writer.y + i as f32 * 5.0);
        }
        for (i, line) in content_lines.iter().enumerate() {
            writer.text_at(line, 10.0, 120.0, writer.y + i as f32 * 5.0);
        }

        writer.y += row_height;
    }
    writer.y += 10.0;
}

/// Full per-entry blocks: title, date, wrapped content, plus checklist and
/// attachment sections when the template includes them.
fn render_detail_blocks(writer: &mut PageWriter, logs: &[LogEntry], template: &ExportTemplate) {
    for (index, log) in logs.iter().enumerate() {
        writer.ensure_room();
        writer.text(&format!("{}. {}", index + 1, log.title), 14.0, MARGIN_X);
        writer.y += 8.0;

        writer.ensure_room();
        writer.text(
            &format!("작성일: {}", format_date_long(&log.created_at)),
            10.0,
            15.0,
        );
        writer.y += 6.0;

        for line in wrap_text(&log.content, DETAIL_CONTENT_UNITS) {
            writer.ensure_room();
            writer.text(&line, 12.0, 15.0);
            writer.y += 6.0;
        }

        if template.include_checklist && !log.checklist_items.is_empty() {
            writer.y += 4.0;
            writer.ensure_room();
            writer.text("체크리스트", 14.0, 15.0);
            writer.y += 7.0;
            for item in &log.checklist_items {
                writer.ensure_room();
                let mark = if item.checked { "☑" } else { "☐" };
                let star = if item.required { " *" } else { "" };
                writer.text(&format!("{} {}{}", mark, item.text, star), 12.0, 15.0);
                writer.y += 7.0;
            }
        }

        if template.include_attachments && !log.attachments.is_empty() {
            writer.y += 4.0;
            writer.ensure_room();
            writer.text("첨부파일", 14.0, 15.0);
            writer.y += 7.0;
            for file in &log.attachments {
                writer.ensure_room();
                let kib = (file.size_bytes as f64 / 1024.0).round() as u64;
                writer.text(&format!("• {} ({} KB)", file.name, kib), 12.0, 15.0);
                writer.y += 7.0;
            }
        }

        writer.y += 12.0;
    }
}
