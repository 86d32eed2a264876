use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ChecklistItem;

/// A reusable checklist blueprint applied to log entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogTemplate {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub checklist_items: Vec<ChecklistItem>,
    pub created_at: DateTime<Utc>,
}

impl LogTemplate {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            description: String::new(),
            checklist_items: Vec::new(),
            created_at: Utc::now(),
        }
    }
}
