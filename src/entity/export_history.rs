use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ExportFormat;

/// Audit row appended after each successful export. The referenced template
/// or logs may be deleted later; rows are never cleaned up to match.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportHistory {
    pub id: Uuid,
    pub log_ids: Vec<Uuid>,
    pub template_id: Uuid,
    pub format: ExportFormat,
    pub file_name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub url: Option<String>,
}

impl ExportHistory {
    pub fn new(
        log_ids: Vec<Uuid>,
        template_id: Uuid,
        format: ExportFormat,
        file_name: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            log_ids,
            template_id,
            format,
            file_name,
            created_at: Utc::now(),
            url: None,
        }
    }
}
