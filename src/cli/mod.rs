mod commands;
mod handlers;

pub use commands::{
    Cli, Commands, DraftAction, DraftCommand, ExportAction, ExportCommand, ExportTemplateAction,
    ExportTemplateCommand, HistoryAction, HistoryCommand, LogAction, LogCommand, TemplateAction,
    TemplateCommand,
};
pub use handlers::{
    handle_draft_add_item, handle_draft_apply, handle_draft_attach, handle_draft_check,
    handle_draft_clear, handle_draft_commit, handle_draft_detach, handle_draft_remove_item,
    handle_draft_save, handle_draft_show, handle_export_preview, handle_export_run,
    handle_export_template_add, handle_export_template_delete, handle_export_template_list,
    handle_export_template_show, handle_export_template_update, handle_history_delete,
    handle_history_download, handle_history_list, handle_history_show, handle_init,
    handle_log_add, handle_log_add_item, handle_log_apply, handle_log_attach, handle_log_check,
    handle_log_delete, handle_log_detach, handle_log_list, handle_log_remove_item,
    handle_log_show, handle_log_update, handle_serve, handle_template_add, handle_template_delete,
    handle_template_list, handle_template_show, handle_template_update,
};
