// src/store/journal_store.rs
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::entity::{
    merge_template_items, Attachment, ChecklistItem, ExportFormat, ExportHistory, ExportTemplate,
    LogEntry, LogTemplate,
};
use crate::error::{IljiError, Result};

const ILJI_DIR: &str = ".ilji";
// File name doubles as the storage namespace key; renaming it orphans
// existing journals.
const STORE_FILE: &str = "log-storage.json";

/// Update payload for a log entry
#[derive(Debug, Clone, Default)]
pub struct LogEntryPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub checklist_items: Option<Vec<ChecklistItem>>,
    pub template_id: Option<Option<Uuid>>, // Some(None) to clear, Some(Some(id)) to set
    pub attachments: Option<Vec<Attachment>>,
}

impl LogEntryPatch {
    /// Overlays `newer` onto this patch; later edits win per field.
    pub fn merge(mut self, newer: LogEntryPatch) -> LogEntryPatch {
        if newer.title.is_some() {
            self.title = newer.title;
        }
        if newer.content.is_some() {
            self.content = newer.content;
        }
        if newer.checklist_items.is_some() {
            self.checklist_items = newer.checklist_items;
        }
        if newer.template_id.is_some() {
            self.template_id = newer.template_id;
        }
        if newer.attachments.is_some() {
            self.attachments = newer.attachments;
        }
        self
    }

    fn apply(self, entry: &mut LogEntry) {
        if let Some(title) = self.title {
            entry.title = title;
        }
        if let Some(content) = self.content {
            entry.content = content;
        }
        if let Some(items) = self.checklist_items {
            entry.checklist_items = items;
        }
        if let Some(template_id) = self.template_id {
            entry.template_id = template_id;
        }
        if let Some(attachments) = self.attachments {
            entry.attachments = attachments;
        }
    }
}

/// Update payload for a checklist template
#[derive(Debug, Clone, Default)]
pub struct LogTemplatePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub checklist_items: Option<Vec<ChecklistItem>>,
}

/// Update payload for an export template
#[derive(Debug, Clone, Default)]
pub struct ExportTemplatePatch {
    pub name: Option<String>,
    pub format: Option<ExportFormat>,
    pub include_header: Option<bool>,
    pub header_text: Option<Option<String>>, // Some(None) to clear, Some(Some(s)) to set
    pub include_footer: Option<bool>,
    pub footer_text: Option<Option<String>>,
    pub include_checklist: Option<bool>,
    pub include_attachments: Option<bool>,
}

/// Where a checklist or attachment mutation lands: the draft slot or a
/// persisted entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    Draft,
    Persisted(Uuid),
}

/// Emitted to subscribers after a mutation has been applied and persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    LogsChanged,
    TemplatesChanged,
    DraftChanged,
    ExportTemplatesChanged,
    HistoryChanged,
}

type Subscriber = Box<dyn Fn(StoreEvent)>;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreState {
    logs: Vec<LogEntry>,
    templates: Vec<LogTemplate>,
    #[serde(default)]
    draft_log: Option<LogEntry>,
    export_templates: Vec<ExportTemplate>,
    export_history: Vec<ExportHistory>,
}

/// The journal store: all entities in memory, snapshotted to one JSON file
/// after every mutation. Single writer; `&mut self` keeps access serialized.
pub struct JournalStore {
    state: StoreState,
    path: PathBuf,
    subscribers: Vec<Subscriber>,
}

impl JournalStore {
    /// Initialize a new ilji project
    pub fn init(root: &Path) -> Result<Self> {
        let ilji_dir = root.join(ILJI_DIR);

        if ilji_dir.exists() {
            return Err(IljiError::AlreadyInitialized);
        }

        fs::create_dir_all(&ilji_dir)?;

        let store = Self {
            state: StoreState::default(),
            path: ilji_dir.join(STORE_FILE),
            subscribers: Vec::new(),
        };
        store.save()?;

        Ok(store)
    }

    /// Open an existing ilji project
    pub fn open(root: &Path) -> Result<Self> {
        let path = root.join(ILJI_DIR).join(STORE_FILE);

        if !path.exists() {
            return Err(IljiError::NotInitialized);
        }

        // An unreadable snapshot must not take the journal down with it;
        // keep running on an empty store and let the next write replace it.
        let state = match fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(state) => state,
                Err(e) => {
                    warn!("store file {} is corrupt, starting empty: {}", path.display(), e);
                    StoreState::default()
                }
            },
            Err(e) => {
                warn!("store file {} is unreadable, starting empty: {}", path.display(), e);
                StoreState::default()
            }
        };

        Ok(Self {
            state,
            path,
            subscribers: Vec::new(),
        })
    }

    /// Write the full state snapshot to disk
    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.state)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Register an observer called after every committed mutation
    pub fn subscribe(&mut self, subscriber: impl Fn(StoreEvent) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    fn commit(&mut self, event: StoreEvent) {
        if let Err(e) = self.save() {
            warn!("failed to persist store to {}: {}", self.path.display(), e);
        }
        for subscriber in &self.subscribers {
            subscriber(event);
        }
    }

    // ========== Log Entry Methods ==========

    /// Add a log entry to the store. Newest entries come first; a pending
    /// draft is considered consumed by the new entry.
    pub fn add_log(&mut self, entry: LogEntry) -> Uuid {
        let id = entry.id;
        self.state.logs.insert(0, entry);
        self.state.draft_log = None;
        self.commit(StoreEvent::LogsChanged);
        id
    }

    /// Get a log entry by UUID
    pub fn get_log(&self, id: &Uuid) -> Option<&LogEntry> {
        self.state.logs.iter().find(|l| l.id == *id)
    }

    /// List all log entries, newest first
    pub fn list_logs(&self) -> &[LogEntry] {
        &self.state.logs
    }

    /// Update an existing log entry. Unknown ids are ignored.
    pub fn update_log(&mut self, id: &Uuid, patch: LogEntryPatch) {
        let Some(entry) = self.state.logs.iter_mut().find(|l| l.id == *id) else {
            return;
        };
        patch.apply(entry);
        entry.updated_at = chrono::Utc::now();
        self.commit(StoreEvent::LogsChanged);
    }

    /// Delete a log entry by UUID. Unknown ids are ignored.
    pub fn delete_log(&mut self, id: &Uuid) {
        let before = self.state.logs.len();
        self.state.logs.retain(|l| l.id != *id);
        if self.state.logs.len() != before {
            self.commit(StoreEvent::LogsChanged);
        }
    }

    // ========== Draft Methods ==========

    /// Merge a patch into the draft slot, seeding an empty draft on first use
    pub fn save_draft(&mut self, patch: LogEntryPatch) {
        let mut draft = match self.state.draft_log.take() {
            Some(draft) => draft,
            None => LogEntry::new(String::new()),
        };
        patch.apply(&mut draft);
        draft.is_draft = true;
        draft.updated_at = chrono::Utc::now();
        self.state.draft_log = Some(draft);
        self.commit(StoreEvent::DraftChanged);
    }

    /// Get the current draft, if any
    pub fn get_draft(&self) -> Option<&LogEntry> {
        self.state.draft_log.as_ref()
    }

    /// Discard the draft slot
    pub fn clear_draft(&mut self) {
        if self.state.draft_log.take().is_some() {
            self.commit(StoreEvent::DraftChanged);
        }
    }

    // ========== Checklist / Attachment Methods ==========

    fn target_entry_mut(&mut self, target: EditTarget) -> Option<&mut LogEntry> {
        match target {
            EditTarget::Draft => self.state.draft_log.as_mut(),
            EditTarget::Persisted(id) => self.state.logs.iter_mut().find(|l| l.id == id),
        }
    }

    fn target_event(target: EditTarget) -> StoreEvent {
        match target {
            EditTarget::Draft => StoreEvent::DraftChanged,
            EditTarget::Persisted(_) => StoreEvent::LogsChanged,
        }
    }

    /// Flip an item's checked flag. Missing targets or items are ignored.
    pub fn toggle_checklist_item(&mut self, target: EditTarget, item_id: &Uuid) {
        let Some(entry) = self.target_entry_mut(target) else {
            return;
        };
        let Some(item) = entry.checklist_items.iter_mut().find(|i| i.id == *item_id) else {
            return;
        };
        item.checked = !item.checked;
        entry.updated_at = chrono::Utc::now();
        self.commit(Self::target_event(target));
    }

    /// Append a checklist item. Missing targets are ignored.
    pub fn add_checklist_item(&mut self, target: EditTarget, item: ChecklistItem) {
        let Some(entry) = self.target_entry_mut(target) else {
            return;
        };
        entry.checklist_items.push(item);
        entry.updated_at = chrono::Utc::now();
        self.commit(Self::target_event(target));
    }

    /// Remove a checklist item by id. Missing targets or items are ignored.
    pub fn remove_checklist_item(&mut self, target: EditTarget, item_id: &Uuid) {
        let Some(entry) = self.target_entry_mut(target) else {
            return;
        };
        let before = entry.checklist_items.len();
        entry.checklist_items.retain(|i| i.id != *item_id);
        if entry.checklist_items.len() == before {
            return;
        }
        entry.updated_at = chrono::Utc::now();
        self.commit(Self::target_event(target));
    }

    /// Append an attachment. Missing targets are ignored.
    pub fn add_attachment(&mut self, target: EditTarget, attachment: Attachment) {
        let Some(entry) = self.target_entry_mut(target) else {
            return;
        };
        entry.attachments.push(attachment);
        entry.updated_at = chrono::Utc::now();
        self.commit(Self::target_event(target));
    }

    /// Remove an attachment by id. Missing targets or ids are ignored.
    pub fn remove_attachment(&mut self, target: EditTarget, attachment_id: &Uuid) {
        let Some(entry) = self.target_entry_mut(target) else {
            return;
        };
        let before = entry.attachments.len();
        entry.attachments.retain(|a| a.id != *attachment_id);
        if entry.attachments.len() == before {
            return;
        }
        entry.updated_at = chrono::Utc::now();
        self.commit(Self::target_event(target));
    }

    /// Merge a checklist template into the target entry and return how many
    /// items were added. Targeting the draft seeds one when none exists.
    pub fn apply_template(&mut self, target: EditTarget, template_id: &Uuid) -> Result<usize> {
        let template = self
            .get_template(template_id)
            .ok_or_else(|| IljiError::EntityNotFound(template_id.to_string()))?;
        let template_items = template.checklist_items.clone();
        let template_id = template.id;

        if target == EditTarget::Draft && self.state.draft_log.is_none() {
            let mut draft = LogEntry::new(String::new());
            draft.is_draft = true;
            self.state.draft_log = Some(draft);
        }

        let Some(entry) = self.target_entry_mut(target) else {
            return Ok(0);
        };
        let merged = merge_template_items(&entry.checklist_items, &template_items);
        let added = merged.len() - entry.checklist_items.len();
        entry.checklist_items = merged;
        entry.template_id = Some(template_id);
        entry.updated_at = chrono::Utc::now();
        self.commit(Self::target_event(target));
        Ok(added)
    }

    // ========== Checklist Template Methods ==========

    /// Add a checklist template to the store
    pub fn add_template(&mut self, template: LogTemplate) -> Uuid {
        let id = template.id;
        self.state.templates.insert(0, template);
        self.commit(StoreEvent::TemplatesChanged);
        id
    }

    /// Get a checklist template by UUID
    pub fn get_template(&self, id: &Uuid) -> Option<&LogTemplate> {
        self.state.templates.iter().find(|t| t.id == *id)
    }

    /// List all checklist templates, newest first
    pub fn list_templates(&self) -> &[LogTemplate] {
        &self.state.templates
    }

    /// Update an existing checklist template. Unknown ids are ignored.
    pub fn update_template(&mut self, id: &Uuid, patch: LogTemplatePatch) {
        let Some(template) = self.state.templates.iter_mut().find(|t| t.id == *id) else {
            return;
        };
        if let Some(name) = patch.name {
            template.name = name;
        }
        if let Some(description) = patch.description {
            template.description = description;
        }
        if let Some(items) = patch.checklist_items {
            template.checklist_items = items;
        }
        self.commit(StoreEvent::TemplatesChanged);
    }

    /// Delete a checklist template by UUID. Unknown ids are ignored.
    /// Entries created from it keep their dangling template reference.
    pub fn delete_template(&mut self, id: &Uuid) {
        let before = self.state.templates.len();
        self.state.templates.retain(|t| t.id != *id);
        if self.state.templates.len() != before {
            self.commit(StoreEvent::TemplatesChanged);
        }
    }

    // ========== Export Template Methods ==========

    /// Add an export template to the store
    pub fn add_export_template(&mut self, template: ExportTemplate) -> Uuid {
        let id = template.id;
        self.state.export_templates.insert(0, template);
        self.commit(StoreEvent::ExportTemplatesChanged);
        id
    }

    /// Get an export template by UUID
    pub fn get_export_template(&self, id: &Uuid) -> Option<&ExportTemplate> {
        self.state.export_templates.iter().find(|t| t.id == *id)
    }

    /// List all export templates, newest first
    pub fn list_export_templates(&self) -> &[ExportTemplate] {
        &self.state.export_templates
    }

    /// Update an existing export template. Unknown ids are ignored.
    pub fn update_export_template(&mut self, id: &Uuid, patch: ExportTemplatePatch) {
        let Some(template) = self.state.export_templates.iter_mut().find(|t| t.id == *id) else {
            return;
        };
        if let Some(name) = patch.name {
            template.name = name;
        }
        if let Some(format) = patch.format {
            template.format = format;
        }
        if let Some(include_header) = patch.include_header {
            template.include_header = include_header;
        }
        if let Some(header_text) = patch.header_text {
            template.header_text = header_text;
        }
        if let Some(include_footer) = patch.include_footer {
            template.include_footer = include_footer;
        }
        if let Some(footer_text) = patch.footer_text {
            template.footer_text = footer_text;
        }
        if let Some(include_checklist) = patch.include_checklist {
            template.include_checklist = include_checklist;
        }
        if let Some(include_attachments) = patch.include_attachments {
            template.include_attachments = include_attachments;
        }
        self.commit(StoreEvent::ExportTemplatesChanged);
    }

    /// Delete an export template by UUID. Unknown ids are ignored; history
    /// rows referencing it stay as they are.
    pub fn delete_export_template(&mut self, id: &Uuid) {
        let before = self.state.export_templates.len();
        self.state.export_templates.retain(|t| t.id != *id);
        if self.state.export_templates.len() != before {
            self.commit(StoreEvent::ExportTemplatesChanged);
        }
    }

    // ========== Export History Methods ==========

    /// Append an export history row, newest first
    pub fn add_export_history(&mut self, row: ExportHistory) -> Uuid {
        let id = row.id;
        self.state.export_history.insert(0, row);
        self.commit(StoreEvent::HistoryChanged);
        id
    }

    /// Get an export history row by UUID
    pub fn get_export_history(&self, id: &Uuid) -> Option<&ExportHistory> {
        self.state.export_history.iter().find(|h| h.id == *id)
    }

    /// List all export history rows, newest first
    pub fn list_export_history(&self) -> &[ExportHistory] {
        &self.state.export_history
    }

    /// Delete an export history row by UUID. Unknown ids are ignored.
    pub fn delete_export_history(&mut self, id: &Uuid) {
        let before = self.state.export_history.len();
        self.state.export_history.retain(|h| h.id != *id);
        if self.state.export_history.len() != before {
            self.commit(StoreEvent::HistoryChanged);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::TempDir;

    fn mock_entry(title: &str) -> LogEntry {
        LogEntry::new(title.to_string())
    }

    fn mock_template(name: &str, items: &[(&str, bool)]) -> LogTemplate {
        let mut template = LogTemplate::new(name.to_string());
        template.checklist_items = items
            .iter()
            .map(|(text, required)| ChecklistItem::new(text.to_string(), *required))
            .collect();
        template
    }

    #[test]
    fn test_init_creates_ilji_directory() {
        let tmp = TempDir::new().unwrap();
        let _store = JournalStore::init(tmp.path()).unwrap();

        assert!(tmp.path().join(".ilji").exists());
        assert!(tmp.path().join(".ilji/log-storage.json").exists());
    }

    #[test]
    fn test_init_fails_if_already_initialized() {
        let tmp = TempDir::new().unwrap();
        JournalStore::init(tmp.path()).unwrap();

        let result = JournalStore::init(tmp.path());
        assert!(matches!(result, Err(IljiError::AlreadyInitialized)));
    }

    #[test]
    fn test_open_fails_if_not_initialized() {
        let tmp = TempDir::new().unwrap();

        let result = JournalStore::open(tmp.path());
        assert!(matches!(result, Err(IljiError::NotInitialized)));
    }

    #[test]
    fn test_open_recovers_from_corrupt_snapshot() {
        let tmp = TempDir::new().unwrap();
        JournalStore::init(tmp.path()).unwrap();
        std::fs::write(tmp.path().join(".ilji/log-storage.json"), "not json").unwrap();

        let store = JournalStore::open(tmp.path()).unwrap();
        assert!(store.list_logs().is_empty());
    }

    #[test]
    fn test_add_log_prepends_and_survives_reopen() {
        let tmp = TempDir::new().unwrap();
        let mut store = JournalStore::init(tmp.path()).unwrap();

        store.add_log(mock_entry("첫 번째"));
        store.add_log(mock_entry("두 번째"));

        let store2 = JournalStore::open(tmp.path()).unwrap();
        let logs = store2.list_logs();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].title, "두 번째");
        assert_eq!(logs[1].title, "첫 번째");
    }

    #[test]
    fn test_get_log_returns_none_for_unknown_id() {
        let tmp = TempDir::new().unwrap();
        let store = JournalStore::init(tmp.path()).unwrap();

        assert!(store.get_log(&Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_duplicate_titles_are_allowed() {
        let tmp = TempDir::new().unwrap();
        let mut store = JournalStore::init(tmp.path()).unwrap();

        let first = store.add_log(mock_entry("점검 일지"));
        let second = store.add_log(mock_entry("점검 일지"));

        assert_ne!(first, second);
        assert_eq!(store.list_logs().len(), 2);
    }

    #[test]
    fn test_update_log_merges_fields_and_refreshes_updated_at() {
        let tmp = TempDir::new().unwrap();
        let mut store = JournalStore::init(tmp.path()).unwrap();

        let id = store.add_log(mock_entry("원래 제목"));
        let created_at = store.get_log(&id).unwrap().created_at;

        store.update_log(
            &id,
            LogEntryPatch {
                content: Some("오늘 작업 내용".to_string()),
                ..Default::default()
            },
        );

        let entry = store.get_log(&id).unwrap();
        assert_eq!(entry.title, "원래 제목");
        assert_eq!(entry.content, "오늘 작업 내용");
        assert_eq!(entry.created_at, created_at);
        assert!(entry.updated_at >= entry.created_at);
    }

    #[test]
    fn test_update_log_with_unknown_id_is_a_no_op() {
        let tmp = TempDir::new().unwrap();
        let mut store = JournalStore::init(tmp.path()).unwrap();
        store.add_log(mock_entry("그대로"));

        let before = serde_json::to_value(&store.state).unwrap();
        store.update_log(
            &Uuid::new_v4(),
            LogEntryPatch {
                title: Some("새 제목".to_string()),
                ..Default::default()
            },
        );

        assert_eq!(serde_json::to_value(&store.state).unwrap(), before);
    }

    #[test]
    fn test_delete_log_ignores_unknown_id() {
        let tmp = TempDir::new().unwrap();
        let mut store = JournalStore::init(tmp.path()).unwrap();

        let id = store.add_log(mock_entry("지울 일지"));
        store.delete_log(&Uuid::new_v4());
        assert_eq!(store.list_logs().len(), 1);

        store.delete_log(&id);
        assert!(store.list_logs().is_empty());
    }

    #[test]
    fn test_save_draft_merges_into_single_slot() {
        let tmp = TempDir::new().unwrap();
        let mut store = JournalStore::init(tmp.path()).unwrap();

        store.save_draft(LogEntryPatch {
            title: Some("A".to_string()),
            ..Default::default()
        });
        store.save_draft(LogEntryPatch {
            content: Some("B".to_string()),
            ..Default::default()
        });

        let draft = store.get_draft().unwrap();
        assert_eq!(draft.title, "A");
        assert_eq!(draft.content, "B");
        assert!(draft.is_draft);
        assert!(store.list_logs().is_empty());
    }

    #[test]
    fn test_add_log_consumes_draft() {
        let tmp = TempDir::new().unwrap();
        let mut store = JournalStore::init(tmp.path()).unwrap();

        store.save_draft(LogEntryPatch {
            title: Some("임시".to_string()),
            ..Default::default()
        });
        store.add_log(mock_entry("확정"));

        assert!(store.get_draft().is_none());
        assert_eq!(store.list_logs().len(), 1);
    }

    #[test]
    fn test_clear_draft() {
        let tmp = TempDir::new().unwrap();
        let mut store = JournalStore::init(tmp.path()).unwrap();

        store.save_draft(LogEntryPatch {
            title: Some("버릴 초안".to_string()),
            ..Default::default()
        });
        store.clear_draft();

        assert!(store.get_draft().is_none());
    }

    #[test]
    fn test_toggle_checklist_item_on_draft_and_persisted() {
        let tmp = TempDir::new().unwrap();
        let mut store = JournalStore::init(tmp.path()).unwrap();

        let mut entry = mock_entry("점검");
        entry
            .checklist_items
            .push(ChecklistItem::new("장비 점검".to_string(), false));
        let item_id = entry.checklist_items[0].id;
        let log_id = store.add_log(entry);

        store.toggle_checklist_item(EditTarget::Persisted(log_id), &item_id);
        assert!(store.get_log(&log_id).unwrap().checklist_items[0].checked);

        store.save_draft(LogEntryPatch {
            checklist_items: Some(vec![ChecklistItem::new("초안 항목".to_string(), false)]),
            ..Default::default()
        });
        let draft_item_id = store.get_draft().unwrap().checklist_items[0].id;
        store.toggle_checklist_item(EditTarget::Draft, &draft_item_id);
        assert!(store.get_draft().unwrap().checklist_items[0].checked);
    }

    #[test]
    fn test_sub_mutators_ignore_missing_targets_and_items() {
        let tmp = TempDir::new().unwrap();
        let mut store = JournalStore::init(tmp.path()).unwrap();

        // No draft, no matching entry: nothing should change or panic.
        store.toggle_checklist_item(EditTarget::Draft, &Uuid::new_v4());
        store.remove_checklist_item(EditTarget::Persisted(Uuid::new_v4()), &Uuid::new_v4());

        let log_id = store.add_log(mock_entry("항목 없음"));
        store.toggle_checklist_item(EditTarget::Persisted(log_id), &Uuid::new_v4());
        store.remove_attachment(EditTarget::Persisted(log_id), &Uuid::new_v4());

        assert!(store.get_log(&log_id).unwrap().checklist_items.is_empty());
    }

    #[test]
    fn test_add_and_remove_checklist_item() {
        let tmp = TempDir::new().unwrap();
        let mut store = JournalStore::init(tmp.path()).unwrap();

        let log_id = store.add_log(mock_entry("점검"));
        let item = ChecklistItem::new("안전모 착용".to_string(), true);
        let item_id = item.id;

        store.add_checklist_item(EditTarget::Persisted(log_id), item);
        assert_eq!(store.get_log(&log_id).unwrap().checklist_items.len(), 1);

        store.remove_checklist_item(EditTarget::Persisted(log_id), &item_id);
        assert!(store.get_log(&log_id).unwrap().checklist_items.is_empty());
    }

    #[test]
    fn test_add_and_remove_attachment() {
        let tmp = TempDir::new().unwrap();
        let mut store = JournalStore::init(tmp.path()).unwrap();

        let log_id = store.add_log(mock_entry("보고서"));
        let attachment = Attachment::new(
            "report.pdf".to_string(),
            "application/pdf".to_string(),
            "file:///tmp/report.pdf".to_string(),
            2048,
        );
        let attachment_id = attachment.id;

        store.add_attachment(EditTarget::Persisted(log_id), attachment);
        assert_eq!(store.get_log(&log_id).unwrap().attachments.len(), 1);

        store.remove_attachment(EditTarget::Persisted(log_id), &attachment_id);
        assert!(store.get_log(&log_id).unwrap().attachments.is_empty());
    }

    #[test]
    fn test_apply_template_merges_and_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let mut store = JournalStore::init(tmp.path()).unwrap();

        let template_id = store.add_template(mock_template(
            "안전 점검",
            &[("장비 점검", false), ("안전 교육", true)],
        ));
        let log_id = store.add_log(mock_entry("월요일"));

        let added = store
            .apply_template(EditTarget::Persisted(log_id), &template_id)
            .unwrap();
        assert_eq!(added, 2);

        let added_again = store
            .apply_template(EditTarget::Persisted(log_id), &template_id)
            .unwrap();
        assert_eq!(added_again, 0);

        let entry = store.get_log(&log_id).unwrap();
        assert_eq!(entry.checklist_items.len(), 2);
        assert_eq!(entry.template_id, Some(template_id));
    }

    #[test]
    fn test_apply_template_with_unknown_template_fails() {
        let tmp = TempDir::new().unwrap();
        let mut store = JournalStore::init(tmp.path()).unwrap();
        let log_id = store.add_log(mock_entry("일지"));

        let result = store.apply_template(EditTarget::Persisted(log_id), &Uuid::new_v4());
        assert!(matches!(result, Err(IljiError::EntityNotFound(_))));
    }

    #[test]
    fn test_apply_template_seeds_draft_when_empty() {
        let tmp = TempDir::new().unwrap();
        let mut store = JournalStore::init(tmp.path()).unwrap();

        let template_id = store.add_template(mock_template("점검", &[("항목", false)]));
        let added = store.apply_template(EditTarget::Draft, &template_id).unwrap();

        assert_eq!(added, 1);
        let draft = store.get_draft().unwrap();
        assert!(draft.is_draft);
        assert_eq!(draft.checklist_items.len(), 1);
    }

    #[test]
    fn test_template_crud() {
        let tmp = TempDir::new().unwrap();
        let mut store = JournalStore::init(tmp.path()).unwrap();

        let id = store.add_template(mock_template("일일 점검", &[("항목 A", false)]));
        assert!(store.get_template(&id).is_some());

        store.update_template(
            &id,
            LogTemplatePatch {
                description: Some("매일 아침 수행".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(store.get_template(&id).unwrap().description, "매일 아침 수행");

        store.delete_template(&id);
        assert!(store.get_template(&id).is_none());
    }

    #[test]
    fn test_export_template_patch_can_clear_header_text() {
        let tmp = TempDir::new().unwrap();
        let mut store = JournalStore::init(tmp.path()).unwrap();

        let mut template = ExportTemplate::new("주간 보고".to_string(), ExportFormat::Pdf);
        template.include_header = true;
        template.header_text = Some("주간 업무 보고서".to_string());
        let id = store.add_export_template(template);

        store.update_export_template(
            &id,
            ExportTemplatePatch {
                header_text: Some(None),
                ..Default::default()
            },
        );

        let updated = store.get_export_template(&id).unwrap();
        assert!(updated.include_header);
        assert_eq!(updated.header_text, None);
    }

    #[test]
    fn test_history_rows_survive_template_deletion() {
        let tmp = TempDir::new().unwrap();
        let mut store = JournalStore::init(tmp.path()).unwrap();

        let template_id =
            store.add_export_template(ExportTemplate::new("보고".to_string(), ExportFormat::Xlsx));
        let log_id = store.add_log(mock_entry("일지"));
        let history_id = store.add_export_history(ExportHistory::new(
            vec![log_id],
            template_id,
            ExportFormat::Xlsx,
            "보고.xlsx".to_string(),
        ));

        store.delete_export_template(&template_id);

        let row = store.get_export_history(&history_id).unwrap();
        assert_eq!(row.template_id, template_id);
        assert!(store.get_export_template(&template_id).is_none());
    }

    #[test]
    fn test_snapshot_reload_round_trips() {
        let tmp = TempDir::new().unwrap();
        let mut store = JournalStore::init(tmp.path()).unwrap();

        let template_id = store.add_template(mock_template("점검", &[("항목", true)]));
        let mut entry = mock_entry("금요일 일지");
        entry.content = "마감 작업".to_string();
        entry.template_id = Some(template_id);
        let log_id = store.add_log(entry);
        store.save_draft(LogEntryPatch {
            title: Some("다음 주 초안".to_string()),
            ..Default::default()
        });
        store.add_export_template(ExportTemplate::new("텍스트".to_string(), ExportFormat::Text));
        store.add_export_history(ExportHistory::new(
            vec![log_id],
            template_id,
            ExportFormat::Text,
            "일지.txt".to_string(),
        ));

        let reloaded = JournalStore::open(tmp.path()).unwrap();
        assert_eq!(
            serde_json::to_value(&reloaded.state).unwrap(),
            serde_json::to_value(&store.state).unwrap()
        );
    }

    #[test]
    fn test_subscribers_receive_events() {
        let tmp = TempDir::new().unwrap();
        let mut store = JournalStore::init(tmp.path()).unwrap();

        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        store.subscribe(move |event| sink.borrow_mut().push(event));

        store.add_log(mock_entry("일지"));
        store.save_draft(LogEntryPatch::default());

        assert_eq!(
            *events.borrow(),
            vec![StoreEvent::LogsChanged, StoreEvent::DraftChanged]
        );
    }

    #[test]
    fn test_failed_persist_keeps_store_usable() {
        let tmp = TempDir::new().unwrap();
        let mut store = JournalStore::init(tmp.path()).unwrap();

        // Remove the backing directory so every snapshot write fails.
        std::fs::remove_dir_all(tmp.path().join(".ilji")).unwrap();

        let id = store.add_log(mock_entry("메모리 전용"));
        assert!(store.get_log(&id).is_some());
    }
}
