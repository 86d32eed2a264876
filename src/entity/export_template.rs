// src/entity/export_template.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Pdf,
    Docx,
    Xlsx,
    Text,
}

impl ExportFormat {
    /// File extension used by the delivery step.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Text => "txt",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Text => "text/plain",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Pdf => write!(f, "pdf"),
            ExportFormat::Docx => write!(f, "docx"),
            ExportFormat::Xlsx => write!(f, "xlsx"),
            ExportFormat::Text => write!(f, "text"),
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "docx" => Ok(ExportFormat::Docx),
            "xlsx" => Ok(ExportFormat::Xlsx),
            "text" | "txt" => Ok(ExportFormat::Text),
            _ => Err(format!("Invalid export format: {}", s)),
        }
    }
}

/// Output styling for an export run: target format plus header/footer text
/// and section toggles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportTemplate {
    pub id: Uuid,
    pub name: String,
    pub format: ExportFormat,
    pub include_header: bool,
    #[serde(default)]
    pub header_text: Option<String>,
    pub include_footer: bool,
    #[serde(default)]
    pub footer_text: Option<String>,
    pub include_checklist: bool,
    pub include_attachments: bool,
    pub created_at: DateTime<Utc>,
}

impl ExportTemplate {
    pub fn new(name: String, format: ExportFormat) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            format,
            include_header: false,
            header_text: None,
            include_footer: false,
            footer_text: None,
            include_checklist: false,
            include_attachments: false,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_round_trips_through_str() {
        for fmt in [
            ExportFormat::Pdf,
            ExportFormat::Docx,
            ExportFormat::Xlsx,
            ExportFormat::Text,
        ] {
            assert_eq!(fmt.to_string().parse::<ExportFormat>(), Ok(fmt));
        }
        assert!("hwp".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn text_format_uses_txt_extension() {
        assert_eq!(ExportFormat::Text.extension(), "txt");
        assert_eq!(ExportFormat::Text.mime_type(), "text/plain");
    }
}
