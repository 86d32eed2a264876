mod attachment;
mod checklist;
mod export_history;
mod export_template;
mod log_entry;
mod template;

pub use attachment::{guess_mime_type, Attachment};
pub use checklist::{merge_template_items, ChecklistItem};
pub use export_history::ExportHistory;
pub use export_template::{ExportFormat, ExportTemplate};
pub use log_entry::LogEntry;
pub use template::LogTemplate;
