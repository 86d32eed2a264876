mod autosave;
mod journal_store;

pub use autosave::DraftAutosave;
pub use journal_store::{
    EditTarget, ExportTemplatePatch, JournalStore, LogEntryPatch, LogTemplatePatch, StoreEvent,
};
