use clap::Parser;
use ilji::cli::{
    handle_draft_add_item, handle_draft_apply, handle_draft_attach, handle_draft_check,
    handle_draft_clear, handle_draft_commit, handle_draft_detach, handle_draft_remove_item,
    handle_draft_save, handle_draft_show, handle_export_preview, handle_export_run,
    handle_export_template_add, handle_export_template_delete, handle_export_template_list,
    handle_export_template_show, handle_export_template_update, handle_history_delete,
    handle_history_download, handle_history_list, handle_history_show, handle_init,
    handle_log_add, handle_log_add_item, handle_log_apply, handle_log_attach, handle_log_check,
    handle_log_delete, handle_log_detach, handle_log_list, handle_log_remove_item,
    handle_log_show, handle_log_update, handle_serve, handle_template_add, handle_template_delete,
    handle_template_list, handle_template_show, handle_template_update, Cli, Commands,
    DraftAction, ExportAction, ExportTemplateAction, HistoryAction, LogAction, TemplateAction,
};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("ILJI_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => handle_init(),
        Commands::Log(log) => match log.action {
            LogAction::Add {
                title,
                content,
                stdin,
                template,
                json,
            } => handle_log_add(title, content, stdin, template, json),
            LogAction::List { json } => handle_log_list(json),
            LogAction::Show { id, json } => handle_log_show(id, json),
            LogAction::Update {
                id,
                title,
                content,
                stdin,
                json,
            } => handle_log_update(id, title, content, stdin, json),
            LogAction::Delete { id, force } => handle_log_delete(id, force),
            LogAction::Check { id, item } => handle_log_check(id, item),
            LogAction::AddItem { id, text, required } => handle_log_add_item(id, text, required),
            LogAction::RemoveItem { id, item } => handle_log_remove_item(id, item),
            LogAction::Attach {
                id,
                name,
                url,
                mime,
                size,
            } => handle_log_attach(id, name, url, mime, size),
            LogAction::Detach { id, attachment } => handle_log_detach(id, attachment),
            LogAction::Apply { id, template } => handle_log_apply(id, template),
        },
        Commands::Draft(draft) => match draft.action {
            DraftAction::Save {
                title,
                content,
                template,
            } => handle_draft_save(title, content, template),
            DraftAction::Show { json } => handle_draft_show(json),
            DraftAction::Commit { json } => handle_draft_commit(json),
            DraftAction::Clear => handle_draft_clear(),
            DraftAction::Check { item } => handle_draft_check(item),
            DraftAction::AddItem { text, required } => handle_draft_add_item(text, required),
            DraftAction::RemoveItem { item } => handle_draft_remove_item(item),
            DraftAction::Attach {
                name,
                url,
                mime,
                size,
            } => handle_draft_attach(name, url, mime, size),
            DraftAction::Detach { attachment } => handle_draft_detach(attachment),
            DraftAction::Apply { template } => handle_draft_apply(template),
        },
        Commands::Template(template) => match template.action {
            TemplateAction::Add {
                name,
                description,
                items,
                required_items,
                json,
            } => handle_template_add(name, description, items, required_items, json),
            TemplateAction::List { json } => handle_template_list(json),
            TemplateAction::Show { id, json } => handle_template_show(id, json),
            TemplateAction::Update {
                id,
                name,
                description,
            } => handle_template_update(id, name, description),
            TemplateAction::Delete { id, force } => handle_template_delete(id, force),
        },
        Commands::ExportTemplate(template) => match template.action {
            ExportTemplateAction::Add {
                name,
                format,
                header,
                footer,
                checklist,
                attachments,
                json,
            } => handle_export_template_add(
                name,
                format,
                header,
                footer,
                checklist,
                attachments,
                json,
            ),
            ExportTemplateAction::List { json } => handle_export_template_list(json),
            ExportTemplateAction::Show { id, json } => handle_export_template_show(id, json),
            ExportTemplateAction::Update {
                id,
                name,
                format,
                header,
                no_header,
                footer,
                no_footer,
                checklist,
                no_checklist,
                attachments,
                no_attachments,
            } => handle_export_template_update(
                id,
                name,
                format,
                header,
                no_header,
                footer,
                no_footer,
                checklist,
                no_checklist,
                attachments,
                no_attachments,
            ),
            ExportTemplateAction::Delete { id, force } => handle_export_template_delete(id, force),
        },
        Commands::Export(export) => match export.action {
            ExportAction::Run {
                template,
                logs,
                from,
                to,
                query,
                name,
                out,
            } => handle_export_run(template, logs, from, to, query, name, out),
            ExportAction::Preview { log, template } => handle_export_preview(log, template),
        },
        Commands::History(history) => match history.action {
            HistoryAction::List { json } => handle_history_list(json),
            HistoryAction::Show { id, json } => handle_history_show(id, json),
            HistoryAction::Download { id, out } => handle_history_download(id, out),
            HistoryAction::Delete { id, force } => handle_history_delete(id, force),
        },
        Commands::Serve { addr } => handle_serve(addr),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
