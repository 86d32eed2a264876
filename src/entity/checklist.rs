// src/entity/checklist.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single checklist row, owned by the log entry or template that holds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: Uuid,
    pub text: String,
    pub checked: bool,
    pub required: bool,
}

impl ChecklistItem {
    pub fn new(text: String, required: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            checked: false,
            required,
        }
    }
}

/// Merges template items into an existing checklist.
///
/// Items are matched by text: texts already present keep their current item
/// untouched (including its `required` flag), new texts are appended in
/// template order as fresh unchecked copies. Applying the same template
/// twice is therefore a no-op.
pub fn merge_template_items(
    existing: &[ChecklistItem],
    template_items: &[ChecklistItem],
) -> Vec<ChecklistItem> {
    let known: std::collections::HashSet<&str> =
        existing.iter().map(|item| item.text.as_str()).collect();

    let mut merged = existing.to_vec();
    for item in template_items {
        if known.contains(item.text.as_str()) {
            continue;
        }
        merged.push(ChecklistItem::new(item.text.clone(), item.required));
    }
    merged
}
