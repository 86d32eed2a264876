use std::env;
use std::io::{self, Read};
use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::entity::{
    guess_mime_type, merge_template_items, Attachment, ChecklistItem, ExportFormat, ExportHistory,
    ExportTemplate, LogEntry, LogTemplate,
};
use crate::error::{IljiError, Result};
use crate::export;
use crate::store::{EditTarget, ExportTemplatePatch, JournalStore, LogEntryPatch, LogTemplatePatch};

/// Find the project root by looking for .ilji/ or .git/
fn find_project_root() -> PathBuf {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let mut current = cwd.as_path();
    loop {
        if current.join(".ilji").exists() || current.join(".git").exists() {
            return current.to_path_buf();
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return cwd,
        }
    }
}

fn open_store() -> Result<JournalStore> {
    JournalStore::open(&find_project_root())
}

fn short(id: &Uuid) -> String {
    id.to_string()[..7].to_string()
}

/// Interactive delete confirmation, bypassed by --force. Refuses to guess
/// in non-interactive sessions.
fn confirm_delete(prompt: &str, force: bool) -> Result<bool> {
    if force {
        return Ok(true);
    }

    eprintln!("{} [y/N] ", prompt);
    if atty::is(atty::Stream::Stdin) {
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        if input.trim().eq_ignore_ascii_case("y") {
            Ok(true)
        } else {
            println!("Cancelled.");
            Ok(false)
        }
    } else {
        Err(IljiError::Validation(
            "use --force to delete in non-interactive mode".to_string(),
        ))
    }
}

// ========== ID resolution (full UUID or prefix) ==========

fn matches_id(id: &Uuid, needle: &str) -> bool {
    id.to_string().starts_with(needle)
}

fn resolve_log(store: &JournalStore, needle: &str) -> Result<LogEntry> {
    store
        .list_logs()
        .iter()
        .find(|l| matches_id(&l.id, needle))
        .cloned()
        .ok_or_else(|| IljiError::EntityNotFound(needle.to_string()))
}

fn resolve_template(store: &JournalStore, needle: &str) -> Result<LogTemplate> {
    store
        .list_templates()
        .iter()
        .find(|t| matches_id(&t.id, needle))
        .cloned()
        .ok_or_else(|| IljiError::EntityNotFound(needle.to_string()))
}

fn resolve_export_template(store: &JournalStore, needle: &str) -> Result<ExportTemplate> {
    store
        .list_export_templates()
        .iter()
        .find(|t| matches_id(&t.id, needle))
        .cloned()
        .ok_or_else(|| IljiError::EntityNotFound(needle.to_string()))
}

fn resolve_history(store: &JournalStore, needle: &str) -> Result<ExportHistory> {
    store
        .list_export_history()
        .iter()
        .find(|h| matches_id(&h.id, needle))
        .cloned()
        .ok_or_else(|| IljiError::EntityNotFound(needle.to_string()))
}

fn resolve_item(entry: &LogEntry, needle: &str) -> Result<Uuid> {
    entry
        .checklist_items
        .iter()
        .find(|i| matches_id(&i.id, needle))
        .map(|i| i.id)
        .ok_or_else(|| IljiError::EntityNotFound(needle.to_string()))
}

fn resolve_attachment(entry: &LogEntry, needle: &str) -> Result<Uuid> {
    entry
        .attachments
        .iter()
        .find(|a| matches_id(&a.id, needle))
        .map(|a| a.id)
        .ok_or_else(|| IljiError::EntityNotFound(needle.to_string()))
}

fn target_entry(store: &JournalStore, target: EditTarget) -> Result<LogEntry> {
    match target {
        EditTarget::Draft => store
            .get_draft()
            .cloned()
            .ok_or_else(|| IljiError::EntityNotFound("draft".to_string())),
        EditTarget::Persisted(id) => store
            .get_log(&id)
            .cloned()
            .ok_or_else(|| IljiError::EntityNotFound(short(&id))),
    }
}

// ========== Shared validation ==========

/// The original form refuses submission with an empty title or an unchecked
/// required item; add/commit enforce the same.
fn validate_submission(entry: &LogEntry) -> Result<()> {
    if entry.title.trim().is_empty() {
        return Err(IljiError::Validation("title must not be empty".to_string()));
    }
    let open = entry.unchecked_required_items();
    if !open.is_empty() {
        return Err(IljiError::Validation(format!(
            "{} required checklist item(s) unchecked: {}",
            open.len(),
            open.iter()
                .map(|i| i.text.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )));
    }
    Ok(())
}

fn read_stdin_content() -> Result<Option<String>> {
    let mut content = String::new();
    io::stdin().read_to_string(&mut content)?;
    if content.is_empty() {
        Ok(None)
    } else {
        Ok(Some(content))
    }
}

// ========== Init ==========

pub fn handle_init() -> Result<()> {
    let root = env::current_dir()?;

    let _store = JournalStore::init(&root)?;

    println!("Initialized ilji journal in {}", root.display());

    Ok(())
}

// ========== Log entries ==========

pub fn handle_log_add(
    title: String,
    content: Option<String>,
    stdin: bool,
    template: Option<String>,
    json: bool,
) -> Result<()> {
    let mut store = open_store()?;

    let mut entry = LogEntry::new(title);
    if stdin {
        if let Some(content) = read_stdin_content()? {
            entry.content = content;
        }
    } else if let Some(content) = content {
        entry.content = content;
    }

    if let Some(template_ref) = template {
        let template = resolve_template(&store, &template_ref)?;
        entry.checklist_items =
            merge_template_items(&entry.checklist_items, &template.checklist_items);
        entry.template_id = Some(template.id);
    }

    validate_submission(&entry)?;

    let printable = entry.clone();
    store.add_log(entry);

    if json {
        println!("{}", serde_json::to_string_pretty(&printable)?);
    } else {
        println!("Created log ({}) - {}", short(&printable.id), printable.title);
    }

    Ok(())
}

pub fn handle_log_list(json: bool) -> Result<()> {
    let store = open_store()?;
    let logs = store.list_logs();

    if json {
        println!("{}", serde_json::to_string_pretty(logs)?);
    } else if logs.is_empty() {
        println!("No log entries yet.");
    } else {
        for log in logs {
            println!(
                "  ({}) {} - {} [{} item(s), {} file(s)]",
                short(&log.id),
                log.created_at.format("%Y-%m-%d"),
                log.title,
                log.checklist_items.len(),
                log.attachments.len(),
            );
        }
    }

    Ok(())
}

pub fn handle_log_show(id: String, json: bool) -> Result<()> {
    let store = open_store()?;
    let log = resolve_log(&store, &id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&log)?);
        return Ok(());
    }

    println!("{}", log.title);
    println!("  id: {}", log.id);
    println!("  created: {}", log.created_at.format("%Y-%m-%d %H:%M"));
    println!("  updated: {}", log.updated_at.format("%Y-%m-%d %H:%M"));
    if let Some(template_id) = &log.template_id {
        println!("  template: {}", short(template_id));
    }
    if !log.content.is_empty() {
        println!("\n{}", log.content);
    }
    if !log.checklist_items.is_empty() {
        println!("\nChecklist:");
        for item in &log.checklist_items {
            let mark = if item.checked { "[x]" } else { "[ ]" };
            let star = if item.required { " *" } else { "" };
            println!("  {} ({}) {}{}", mark, short(&item.id), item.text, star);
        }
    }
    if !log.attachments.is_empty() {
        println!("\nAttachments:");
        for file in &log.attachments {
            println!(
                "  ({}) {} [{}] {} bytes",
                short(&file.id),
                file.name,
                file.mime_type,
                file.size_bytes
            );
        }
    }

    Ok(())
}

pub fn handle_log_update(
    id: String,
    title: Option<String>,
    content: Option<String>,
    stdin: bool,
    json: bool,
) -> Result<()> {
    let mut store = open_store()?;
    let log = resolve_log(&store, &id)?;

    let content = if stdin { read_stdin_content()? } else { content };

    if let Some(title) = &title {
        if title.trim().is_empty() {
            return Err(IljiError::Validation("title must not be empty".to_string()));
        }
    }

    store.update_log(
        &log.id,
        LogEntryPatch {
            title,
            content,
            ..Default::default()
        },
    );

    let updated = resolve_log(&store, &id)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&updated)?);
    } else {
        println!("Updated log ({}) - {}", short(&updated.id), updated.title);
    }

    Ok(())
}

pub fn handle_log_delete(id: String, force: bool) -> Result<()> {
    let mut store = open_store()?;
    let log = resolve_log(&store, &id)?;

    let prompt = format!("Delete log ({}) - {}?", short(&log.id), log.title);
    if !confirm_delete(&prompt, force)? {
        return Ok(());
    }

    store.delete_log(&log.id);
    println!("Deleted log ({}) - {}", short(&log.id), log.title);

    Ok(())
}

fn handle_check(target_ref: Option<String>, item: String) -> Result<()> {
    let mut store = open_store()?;
    let target = match &target_ref {
        Some(id) => EditTarget::Persisted(resolve_log(&store, id)?.id),
        None => EditTarget::Draft,
    };
    let entry = target_entry(&store, target)?;
    let item_id = resolve_item(&entry, &item)?;

    store.toggle_checklist_item(target, &item_id);

    let entry = target_entry(&store, target)?;
    let item = entry.checklist_items.iter().find(|i| i.id == item_id);
    if let Some(item) = item {
        let state = if item.checked { "checked" } else { "unchecked" };
        println!("{} ({}) {}", state, short(&item.id), item.text);
    }

    Ok(())
}

pub fn handle_log_check(id: String, item: String) -> Result<()> {
    handle_check(Some(id), item)
}

fn handle_add_item(target_ref: Option<String>, text: String, required: bool) -> Result<()> {
    if text.trim().is_empty() {
        return Err(IljiError::Validation(
            "checklist item text must not be empty".to_string(),
        ));
    }

    let mut store = open_store()?;
    let target = match &target_ref {
        Some(id) => EditTarget::Persisted(resolve_log(&store, id)?.id),
        None => EditTarget::Draft,
    };
    if target == EditTarget::Draft && store.get_draft().is_none() {
        store.save_draft(LogEntryPatch::default());
    }

    let item = ChecklistItem::new(text, required);
    let item_id = item.id;
    let text = item.text.clone();
    store.add_checklist_item(target, item);

    println!("Added item ({}) {}", short(&item_id), text);
    Ok(())
}

pub fn handle_log_add_item(id: String, text: String, required: bool) -> Result<()> {
    handle_add_item(Some(id), text, required)
}

fn handle_remove_item(target_ref: Option<String>, item: String) -> Result<()> {
    let mut store = open_store()?;
    let target = match &target_ref {
        Some(id) => EditTarget::Persisted(resolve_log(&store, id)?.id),
        None => EditTarget::Draft,
    };
    let entry = target_entry(&store, target)?;
    let item_id = resolve_item(&entry, &item)?;

    store.remove_checklist_item(target, &item_id);
    println!("Removed item ({})", short(&item_id));
    Ok(())
}

pub fn handle_log_remove_item(id: String, item: String) -> Result<()> {
    handle_remove_item(Some(id), item)
}

fn handle_attach(
    target_ref: Option<String>,
    name: String,
    url: String,
    mime: Option<String>,
    size: u64,
) -> Result<()> {
    let mut store = open_store()?;
    let target = match &target_ref {
        Some(id) => EditTarget::Persisted(resolve_log(&store, id)?.id),
        None => EditTarget::Draft,
    };
    if target == EditTarget::Draft && store.get_draft().is_none() {
        store.save_draft(LogEntryPatch::default());
    }

    let mime = mime.unwrap_or_else(|| guess_mime_type(&name).to_string());
    let attachment = Attachment::new(name, mime, url, size);
    let attachment_id = attachment.id;
    let name = attachment.name.clone();
    store.add_attachment(target, attachment);

    println!("Attached ({}) {}", short(&attachment_id), name);
    Ok(())
}

pub fn handle_log_attach(
    id: String,
    name: String,
    url: String,
    mime: Option<String>,
    size: u64,
) -> Result<()> {
    handle_attach(Some(id), name, url, mime, size)
}

fn handle_detach(target_ref: Option<String>, attachment: String) -> Result<()> {
    let mut store = open_store()?;
    let target = match &target_ref {
        Some(id) => EditTarget::Persisted(resolve_log(&store, id)?.id),
        None => EditTarget::Draft,
    };
    let entry = target_entry(&store, target)?;
    let attachment_id = resolve_attachment(&entry, &attachment)?;

    store.remove_attachment(target, &attachment_id);
    println!("Detached ({})", short(&attachment_id));
    Ok(())
}

pub fn handle_log_detach(id: String, attachment: String) -> Result<()> {
    handle_detach(Some(id), attachment)
}

fn handle_apply(target_ref: Option<String>, template: String) -> Result<()> {
    let mut store = open_store()?;
    let target = match &target_ref {
        Some(id) => EditTarget::Persisted(resolve_log(&store, id)?.id),
        None => EditTarget::Draft,
    };
    let template = resolve_template(&store, &template)?;

    let added = store.apply_template(target, &template.id)?;
    println!(
        "Applied template ({}) - {} ({} new item(s))",
        short(&template.id),
        template.name,
        added
    );
    Ok(())
}

pub fn handle_log_apply(id: String, template: String) -> Result<()> {
    handle_apply(Some(id), template)
}

// ========== Draft ==========

pub fn handle_draft_save(
    title: Option<String>,
    content: Option<String>,
    template: Option<String>,
) -> Result<()> {
    let mut store = open_store()?;

    store.save_draft(LogEntryPatch {
        title,
        content,
        ..Default::default()
    });

    if let Some(template_ref) = template {
        let template = resolve_template(&store, &template_ref)?;
        let added = store.apply_template(EditTarget::Draft, &template.id)?;
        println!(
            "Applied template ({}) - {} ({} new item(s))",
            short(&template.id),
            template.name,
            added
        );
    }

    if let Some(draft) = store.get_draft() {
        println!("Saved draft - {}", draft.title);
    }
    Ok(())
}

pub fn handle_draft_show(json: bool) -> Result<()> {
    let store = open_store()?;
    match store.get_draft() {
        Some(draft) if json => println!("{}", serde_json::to_string_pretty(draft)?),
        Some(draft) => {
            println!("Draft - {}", draft.title);
            if !draft.content.is_empty() {
                println!("\n{}", draft.content);
            }
            for item in &draft.checklist_items {
                let mark = if item.checked { "[x]" } else { "[ ]" };
                let star = if item.required { " *" } else { "" };
                println!("  {} ({}) {}{}", mark, short(&item.id), item.text, star);
            }
            for file in &draft.attachments {
                println!("  file ({}) {}", short(&file.id), file.name);
            }
        }
        None => println!("No draft."),
    }
    Ok(())
}

pub fn handle_draft_commit(json: bool) -> Result<()> {
    let mut store = open_store()?;
    let draft = store
        .get_draft()
        .cloned()
        .ok_or_else(|| IljiError::EntityNotFound("draft".to_string()))?;

    validate_submission(&draft)?;

    let mut entry = draft;
    entry.is_draft = false;
    entry.updated_at = Utc::now();
    let printable = entry.clone();
    store.add_log(entry);

    if json {
        println!("{}", serde_json::to_string_pretty(&printable)?);
    } else {
        println!(
            "Committed draft as log ({}) - {}",
            short(&printable.id),
            printable.title
        );
    }
    Ok(())
}

pub fn handle_draft_clear() -> Result<()> {
    let mut store = open_store()?;
    store.clear_draft();
    println!("Draft cleared.");
    Ok(())
}

pub fn handle_draft_check(item: String) -> Result<()> {
    handle_check(None, item)
}

pub fn handle_draft_add_item(text: String, required: bool) -> Result<()> {
    handle_add_item(None, text, required)
}

pub fn handle_draft_remove_item(item: String) -> Result<()> {
    handle_remove_item(None, item)
}

pub fn handle_draft_attach(
    name: String,
    url: String,
    mime: Option<String>,
    size: u64,
) -> Result<()> {
    handle_attach(None, name, url, mime, size)
}

pub fn handle_draft_detach(attachment: String) -> Result<()> {
    handle_detach(None, attachment)
}

pub fn handle_draft_apply(template: String) -> Result<()> {
    handle_apply(None, template)
}

// ========== Checklist templates ==========

pub fn handle_template_add(
    name: String,
    description: Option<String>,
    items: Vec<String>,
    required_items: Vec<String>,
    json: bool,
) -> Result<()> {
    if name.trim().is_empty() {
        return Err(IljiError::Validation(
            "template name must not be empty".to_string(),
        ));
    }
    if items.is_empty() && required_items.is_empty() {
        return Err(IljiError::Validation(
            "template needs at least one checklist item".to_string(),
        ));
    }

    let mut store = open_store()?;

    let mut template = LogTemplate::new(name);
    if let Some(description) = description {
        template.description = description;
    }
    for text in items {
        template.checklist_items.push(ChecklistItem::new(text, false));
    }
    for text in required_items {
        template.checklist_items.push(ChecklistItem::new(text, true));
    }

    let printable = template.clone();
    store.add_template(template);

    if json {
        println!("{}", serde_json::to_string_pretty(&printable)?);
    } else {
        println!(
            "Created template ({}) - {} [{} item(s)]",
            short(&printable.id),
            printable.name,
            printable.checklist_items.len()
        );
    }
    Ok(())
}

pub fn handle_template_list(json: bool) -> Result<()> {
    let store = open_store()?;
    let templates = store.list_templates();

    if json {
        println!("{}", serde_json::to_string_pretty(templates)?);
    } else if templates.is_empty() {
        println!("No checklist templates yet.");
    } else {
        for template in templates {
            println!(
                "  ({}) {} [{} item(s)]",
                short(&template.id),
                template.name,
                template.checklist_items.len()
            );
        }
    }
    Ok(())
}

pub fn handle_template_show(id: String, json: bool) -> Result<()> {
    let store = open_store()?;
    let template = resolve_template(&store, &id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&template)?);
        return Ok(());
    }

    println!("{}", template.name);
    println!("  id: {}", template.id);
    if !template.description.is_empty() {
        println!("  {}", template.description);
    }
    for item in &template.checklist_items {
        let star = if item.required { " *" } else { "" };
        println!("  - {}{}", item.text, star);
    }
    Ok(())
}

pub fn handle_template_update(
    id: String,
    name: Option<String>,
    description: Option<String>,
) -> Result<()> {
    let mut store = open_store()?;
    let template = resolve_template(&store, &id)?;

    if let Some(name) = &name {
        if name.trim().is_empty() {
            return Err(IljiError::Validation(
                "template name must not be empty".to_string(),
            ));
        }
    }

    store.update_template(
        &template.id,
        LogTemplatePatch {
            name,
            description,
            ..Default::default()
        },
    );

    let updated = resolve_template(&store, &id)?;
    println!("Updated template ({}) - {}", short(&updated.id), updated.name);
    Ok(())
}

pub fn handle_template_delete(id: String, force: bool) -> Result<()> {
    let mut store = open_store()?;
    let template = resolve_template(&store, &id)?;

    let prompt = format!(
        "Delete template ({}) - {}?",
        short(&template.id),
        template.name
    );
    if !confirm_delete(&prompt, force)? {
        return Ok(());
    }

    // Entries keep the items they already copied; nothing cascades.
    store.delete_template(&template.id);
    println!("Deleted template ({}) - {}", short(&template.id), template.name);
    Ok(())
}

// ========== Export templates ==========

fn parse_format(s: &str) -> Result<ExportFormat> {
    s.parse().map_err(|_| IljiError::InvalidFormat(s.to_string()))
}

pub fn handle_export_template_add(
    name: String,
    format: String,
    header: Option<String>,
    footer: Option<String>,
    checklist: bool,
    attachments: bool,
    json: bool,
) -> Result<()> {
    if name.trim().is_empty() {
        return Err(IljiError::Validation(
            "export template name must not be empty".to_string(),
        ));
    }

    let mut store = open_store()?;

    let mut template = ExportTemplate::new(name, parse_format(&format)?);
    if let Some(header) = header {
        template.include_header = true;
        template.header_text = Some(header);
    }
    if let Some(footer) = footer {
        template.include_footer = true;
        template.footer_text = Some(footer);
    }
    template.include_checklist = checklist;
    template.include_attachments = attachments;

    let printable = template.clone();
    store.add_export_template(template);

    if json {
        println!("{}", serde_json::to_string_pretty(&printable)?);
    } else {
        println!(
            "Created export template ({}) - {} [{}]",
            short(&printable.id),
            printable.name,
            printable.format
        );
    }
    Ok(())
}

pub fn handle_export_template_list(json: bool) -> Result<()> {
    let store = open_store()?;
    let templates = store.list_export_templates();

    if json {
        println!("{}", serde_json::to_string_pretty(templates)?);
    } else if templates.is_empty() {
        println!("No export templates yet.");
    } else {
        for template in templates {
            println!(
                "  ({}) {} [{}]",
                short(&template.id),
                template.name,
                template.format
            );
        }
    }
    Ok(())
}

pub fn handle_export_template_show(id: String, json: bool) -> Result<()> {
    let store = open_store()?;
    let template = resolve_export_template(&store, &id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&template)?);
        return Ok(());
    }

    println!("{} [{}]", template.name, template.format);
    println!("  id: {}", template.id);
    if template.include_header {
        println!("  header: {}", template.header_text.as_deref().unwrap_or("(default)"));
    }
    if template.include_footer {
        println!("  footer: {}", template.footer_text.as_deref().unwrap_or("(default)"));
    }
    println!("  checklist: {}", template.include_checklist);
    println!("  attachments: {}", template.include_attachments);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn handle_export_template_update(
    id: String,
    name: Option<String>,
    format: Option<String>,
    header: Option<String>,
    no_header: bool,
    footer: Option<String>,
    no_footer: bool,
    checklist: bool,
    no_checklist: bool,
    attachments: bool,
    no_attachments: bool,
) -> Result<()> {
    let mut store = open_store()?;
    let template = resolve_export_template(&store, &id)?;

    let format = match format {
        Some(s) => Some(parse_format(&s)?),
        None => None,
    };

    let mut patch = ExportTemplatePatch {
        name,
        format,
        ..Default::default()
    };
    if let Some(header) = header {
        patch.include_header = Some(true);
        patch.header_text = Some(Some(header));
    } else if no_header {
        patch.include_header = Some(false);
        patch.header_text = Some(None);
    }
    if let Some(footer) = footer {
        patch.include_footer = Some(true);
        patch.footer_text = Some(Some(footer));
    } else if no_footer {
        patch.include_footer = Some(false);
        patch.footer_text = Some(None);
    }
    if checklist {
        patch.include_checklist = Some(true);
    } else if no_checklist {
        patch.include_checklist = Some(false);
    }
    if attachments {
        patch.include_attachments = Some(true);
    } else if no_attachments {
        patch.include_attachments = Some(false);
    }

    store.update_export_template(&template.id, patch);

    let updated = resolve_export_template(&store, &id)?;
    println!(
        "Updated export template ({}) - {} [{}]",
        short(&updated.id),
        updated.name,
        updated.format
    );
    Ok(())
}

pub fn handle_export_template_delete(id: String, force: bool) -> Result<()> {
    let mut store = open_store()?;
    let template = resolve_export_template(&store, &id)?;

    let prompt = format!(
        "Delete export template ({}) - {}?",
        short(&template.id),
        template.name
    );
    if !confirm_delete(&prompt, force)? {
        return Ok(());
    }

    // History rows keep their template_id even once it dangles.
    store.delete_export_template(&template.id);
    println!(
        "Deleted export template ({}) - {}",
        short(&template.id),
        template.name
    );
    Ok(())
}

// ========== Export runs ==========

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| IljiError::Validation(format!("invalid date '{}': {}", s, e)))
}

/// Entry selection for an export run: explicit ids win, otherwise a calendar
/// range on created_at; a query filters either way by title/content.
fn select_logs(
    store: &JournalStore,
    log_refs: &[String],
    from: Option<&str>,
    to: Option<&str>,
    query: Option<&str>,
) -> Result<Vec<LogEntry>> {
    let mut logs = if !log_refs.is_empty() {
        log_refs
            .iter()
            .map(|r| resolve_log(store, r))
            .collect::<Result<Vec<_>>>()?
    } else {
        let from = match from {
            Some(s) => parse_date(s)?,
            None => Utc::now().date_naive(),
        };
        let to = match to {
            Some(s) => parse_date(s)?,
            None => from + chrono::Duration::days(7),
        };
        store
            .list_logs()
            .iter()
            .filter(|l| {
                let date = l.created_at.date_naive();
                date >= from && date <= to
            })
            .cloned()
            .collect()
    };

    if let Some(query) = query {
        let query = query.to_lowercase();
        logs.retain(|l| {
            l.title.to_lowercase().contains(&query) || l.content.to_lowercase().contains(&query)
        });
    }

    Ok(logs)
}

#[allow(clippy::too_many_arguments)]
pub fn handle_export_run(
    template: String,
    logs: Vec<String>,
    from: Option<String>,
    to: Option<String>,
    query: Option<String>,
    name: Option<String>,
    out: PathBuf,
) -> Result<()> {
    let mut store = open_store()?;
    let template = resolve_export_template(&store, &template)?;

    let stem = name.unwrap_or_else(|| export::default_file_stem(Utc::now()));
    if stem.trim().is_empty() {
        return Err(IljiError::Validation(
            "file name must not be empty".to_string(),
        ));
    }

    let selected = select_logs(&store, &logs, from.as_deref(), to.as_deref(), query.as_deref())?;
    if selected.is_empty() {
        return Err(IljiError::Validation("no entries to export".to_string()));
    }

    let payload = export::render(&selected, &template)?;
    let path = export::deliver(&payload, &out, &stem, template.format)?;

    // History records only after a successful delivery.
    let file_name = format!("{}.{}", stem.trim(), template.format.extension());
    store.add_export_history(ExportHistory::new(
        selected.iter().map(|l| l.id).collect(),
        template.id,
        template.format,
        file_name,
    ));

    println!("Exported {} log(s) to {}", selected.len(), path.display());
    Ok(())
}

pub fn handle_export_preview(log: String, template: String) -> Result<()> {
    let store = open_store()?;
    let log = resolve_log(&store, &log)?;
    let template = resolve_export_template(&store, &template)?;

    print!("{}", export::render_preview(&log, &template));
    Ok(())
}

// ========== Export history ==========

pub fn handle_history_list(json: bool) -> Result<()> {
    let store = open_store()?;
    let rows = store.list_export_history();

    if json {
        println!("{}", serde_json::to_string_pretty(rows)?);
    } else if rows.is_empty() {
        println!("No exports yet.");
    } else {
        for row in rows {
            println!(
                "  ({}) {} - {} [{}] {} log(s)",
                short(&row.id),
                row.created_at.format("%Y-%m-%d %H:%M"),
                row.file_name,
                row.format,
                row.log_ids.len()
            );
        }
    }
    Ok(())
}

pub fn handle_history_show(id: String, json: bool) -> Result<()> {
    let store = open_store()?;
    let row = resolve_history(&store, &id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&row)?);
        return Ok(());
    }

    println!("{} [{}]", row.file_name, row.format);
    println!("  id: {}", row.id);
    println!("  exported: {}", row.created_at.format("%Y-%m-%d %H:%M"));
    println!("  template: {}", short(&row.template_id));
    for log_id in &row.log_ids {
        match store.get_log(log_id) {
            Some(log) => println!("  log ({}) {}", short(log_id), log.title),
            None => println!("  log ({}) [deleted]", short(log_id)),
        }
    }
    Ok(())
}

/// Re-render a past export from its history row. The row's format wins over
/// whatever the template says today; the row itself is not duplicated.
pub fn handle_history_download(id: String, out: PathBuf) -> Result<()> {
    let store = open_store()?;
    let row = resolve_history(&store, &id)?;

    let mut template = store
        .get_export_template(&row.template_id)
        .cloned()
        .ok_or_else(|| IljiError::EntityNotFound(short(&row.template_id)))?;
    template.format = row.format;

    let logs: Vec<LogEntry> = row
        .log_ids
        .iter()
        .filter_map(|id| store.get_log(id).cloned())
        .collect();
    if logs.is_empty() {
        return Err(IljiError::EntityNotFound(
            "none of the exported logs still exist".to_string(),
        ));
    }

    let stem = row
        .file_name
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(row.file_name.as_str());

    let payload = export::render(&logs, &template)?;
    let path = export::deliver(&payload, &out, stem, row.format)?;

    println!("Re-exported {} log(s) to {}", logs.len(), path.display());
    Ok(())
}

pub fn handle_history_delete(id: String, force: bool) -> Result<()> {
    let mut store = open_store()?;
    let row = resolve_history(&store, &id)?;

    let prompt = format!("Delete export record ({}) - {}?", short(&row.id), row.file_name);
    if !confirm_delete(&prompt, force)? {
        return Ok(());
    }

    store.delete_export_history(&row.id);
    println!("Deleted export record ({})", short(&row.id));
    Ok(())
}

// ========== Serve ==========

pub fn handle_serve(addr: String) -> Result<()> {
    let addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| IljiError::Validation(format!("invalid address '{}': {}", addr, e)))?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(crate::server::serve(addr))
}
