// src/entity/log_entry.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Attachment, ChecklistItem};

/// A journal entry. The draft slot of the store holds one of these with
/// `is_draft` set; committed entries always carry `is_draft = false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub checklist_items: Vec<ChecklistItem>,
    #[serde(default)]
    pub template_id: Option<Uuid>,
    pub attachments: Vec<Attachment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_draft: bool,
}

impl LogEntry {
    pub fn new(title: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            content: String::new(),
            checklist_items: Vec::new(),
            template_id: None,
            attachments: Vec::new(),
            created_at: now,
            updated_at: now,
            is_draft: false,
        }
    }

    /// Required checklist items that are still unchecked, in list order.
    pub fn unchecked_required_items(&self) -> Vec<&ChecklistItem> {
        self.checklist_items
            .iter()
            .filter(|item| item.required && !item.checked)
            .collect()
    }
}
