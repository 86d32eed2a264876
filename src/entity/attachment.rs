use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// File metadata attached to a log entry. Only the reference is stored;
/// the bytes live wherever `url` points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: Uuid,
    pub name: String,
    pub mime_type: String,
    pub url: String,
    pub size_bytes: u64,
}

impl Attachment {
    pub fn new(name: String, mime_type: String, url: String, size_bytes: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            mime_type,
            url,
            size_bytes,
        }
    }
}

/// Best-effort MIME lookup from a file extension.
pub fn guess_mime_type(name: &str) -> &'static str {
    let ext = name.rsplit('.').next().unwrap_or("").to_lowercase();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "txt" => "text/plain",
        "md" => "text/markdown",
        "csv" => "text/csv",
        "json" => "application/json",
        "zip" => "application/zip",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guesses_common_extensions() {
        assert_eq!(guess_mime_type("report.PDF"), "application/pdf");
        assert_eq!(guess_mime_type("photo.jpeg"), "image/jpeg");
        assert_eq!(guess_mime_type("notes"), "application/octet-stream");
    }
}
