use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ilji")]
#[command(version, about = "A template-driven work journal with multi-format document export")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new ilji journal in the current directory
    Init,

    /// Manage log entries
    Log(LogCommand),

    /// Work on the draft entry
    Draft(DraftCommand),

    /// Manage checklist templates
    Template(TemplateCommand),

    /// Manage export templates
    #[command(name = "export-template")]
    ExportTemplate(ExportTemplateCommand),

    /// Render and deliver export documents
    Export(ExportCommand),

    /// Browse and re-download past exports
    History(HistoryCommand),

    /// Run the HTTP PDF render endpoint
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8090")]
        addr: String,
    },
}

#[derive(Args, Debug)]
pub struct LogCommand {
    #[command(subcommand)]
    pub action: LogAction,
}

#[derive(Subcommand, Debug)]
pub enum LogAction {
    /// Add a new log entry
    Add {
        title: String,

        /// Entry content
        #[arg(long, conflicts_with = "stdin")]
        content: Option<String>,

        /// Read content from stdin
        #[arg(long)]
        stdin: bool,

        /// Checklist template to apply (ID or prefix)
        #[arg(long)]
        template: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List log entries, newest first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single log entry
    Show {
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Update a log entry
    Update {
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New content
        #[arg(long, conflicts_with = "stdin")]
        content: Option<String>,

        /// Read new content from stdin
        #[arg(long)]
        stdin: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a log entry
    Delete {
        id: String,

        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },

    /// Toggle a checklist item
    Check {
        id: String,
        /// Checklist item ID or prefix
        item: String,
    },

    /// Append a checklist item
    AddItem {
        id: String,
        text: String,

        /// Mark the item as required
        #[arg(long)]
        required: bool,
    },

    /// Remove a checklist item
    RemoveItem {
        id: String,
        /// Checklist item ID or prefix
        item: String,
    },

    /// Attach a file reference
    Attach {
        id: String,
        name: String,

        /// Reference URL of the file content
        #[arg(long)]
        url: String,

        /// MIME type (guessed from the name when omitted)
        #[arg(long)]
        mime: Option<String>,

        /// Size in bytes
        #[arg(long, default_value_t = 0)]
        size: u64,
    },

    /// Remove an attachment
    Detach {
        id: String,
        /// Attachment ID or prefix
        attachment: String,
    },

    /// Apply a checklist template to an entry
    Apply {
        id: String,
        /// Checklist template ID or prefix
        template: String,
    },
}

#[derive(Args, Debug)]
pub struct DraftCommand {
    #[command(subcommand)]
    pub action: DraftAction,
}

#[derive(Subcommand, Debug)]
pub enum DraftAction {
    /// Merge fields into the draft slot
    Save {
        /// Draft title
        #[arg(long)]
        title: Option<String>,

        /// Draft content
        #[arg(long)]
        content: Option<String>,

        /// Checklist template to apply after saving (ID or prefix)
        #[arg(long)]
        template: Option<String>,
    },

    /// Show the current draft
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Promote the draft to a log entry
    Commit {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Discard the draft
    Clear,

    /// Toggle a draft checklist item
    Check {
        /// Checklist item ID or prefix
        item: String,
    },

    /// Append a checklist item to the draft
    AddItem {
        text: String,

        /// Mark the item as required
        #[arg(long)]
        required: bool,
    },

    /// Remove a draft checklist item
    RemoveItem {
        /// Checklist item ID or prefix
        item: String,
    },

    /// Attach a file reference to the draft
    Attach {
        name: String,

        /// Reference URL of the file content
        #[arg(long)]
        url: String,

        /// MIME type (guessed from the name when omitted)
        #[arg(long)]
        mime: Option<String>,

        /// Size in bytes
        #[arg(long, default_value_t = 0)]
        size: u64,
    },

    /// Remove a draft attachment
    Detach {
        /// Attachment ID or prefix
        attachment: String,
    },

    /// Apply a checklist template to the draft
    Apply {
        /// Checklist template ID or prefix
        template: String,
    },
}

#[derive(Args, Debug)]
pub struct TemplateCommand {
    #[command(subcommand)]
    pub action: TemplateAction,
}

#[derive(Subcommand, Debug)]
pub enum TemplateAction {
    /// Add a checklist template
    Add {
        name: String,

        /// Template description
        #[arg(long)]
        description: Option<String>,

        /// Optional checklist item text (repeatable)
        #[arg(long = "item")]
        items: Vec<String>,

        /// Required checklist item text (repeatable)
        #[arg(long = "required-item")]
        required_items: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List checklist templates
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a checklist template
    Show {
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Update a checklist template
    Update {
        id: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a checklist template
    Delete {
        id: String,

        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug)]
pub struct ExportTemplateCommand {
    #[command(subcommand)]
    pub action: ExportTemplateAction,
}

#[derive(Subcommand, Debug)]
pub enum ExportTemplateAction {
    /// Add an export template
    Add {
        name: String,

        /// Target format: pdf, docx, xlsx or text
        #[arg(long)]
        format: String,

        /// Header text (enables the header section)
        #[arg(long)]
        header: Option<String>,

        /// Footer text (enables the footer section)
        #[arg(long)]
        footer: Option<String>,

        /// Include checklist detail in previews and PDF detail blocks
        #[arg(long)]
        checklist: bool,

        /// Include attachment detail in previews and PDF detail blocks
        #[arg(long)]
        attachments: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List export templates
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show an export template
    Show {
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Update an export template
    Update {
        id: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New format: pdf, docx, xlsx or text
        #[arg(long)]
        format: Option<String>,

        /// New header text (enables the header section)
        #[arg(long, conflicts_with = "no_header")]
        header: Option<String>,

        /// Drop the header section
        #[arg(long)]
        no_header: bool,

        /// New footer text (enables the footer section)
        #[arg(long, conflicts_with = "no_footer")]
        footer: Option<String>,

        /// Drop the footer section
        #[arg(long)]
        no_footer: bool,

        /// Include checklist detail
        #[arg(long, conflicts_with = "no_checklist")]
        checklist: bool,

        /// Exclude checklist detail
        #[arg(long)]
        no_checklist: bool,

        /// Include attachment detail
        #[arg(long, conflicts_with = "no_attachments")]
        attachments: bool,

        /// Exclude attachment detail
        #[arg(long)]
        no_attachments: bool,
    },

    /// Delete an export template
    Delete {
        id: String,

        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug)]
pub struct ExportCommand {
    #[command(subcommand)]
    pub action: ExportAction,
}

#[derive(Subcommand, Debug)]
pub enum ExportAction {
    /// Render selected entries and record the export
    Run {
        /// Export template ID or prefix
        #[arg(long)]
        template: String,

        /// Explicit entry selection (repeatable; wins over the date range)
        #[arg(long = "log")]
        logs: Vec<String>,

        /// Range start, YYYY-MM-DD (default today)
        #[arg(long)]
        from: Option<String>,

        /// Range end, YYYY-MM-DD (default a week from the start)
        #[arg(long)]
        to: Option<String>,

        /// Case-insensitive title/content filter
        #[arg(long)]
        query: Option<String>,

        /// File name stem (default 일지_YYYY-MM-DD)
        #[arg(long)]
        name: Option<String>,

        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },

    /// Print the preview of one entry under a template
    Preview {
        /// Log entry ID or prefix
        #[arg(long)]
        log: String,

        /// Export template ID or prefix
        #[arg(long)]
        template: String,
    },
}

#[derive(Args, Debug)]
pub struct HistoryCommand {
    #[command(subcommand)]
    pub action: HistoryAction,
}

#[derive(Subcommand, Debug)]
pub enum HistoryAction {
    /// List export history rows, newest first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one export history row
    Show {
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Re-render and deliver a past export
    Download {
        id: String,

        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },

    /// Delete an export history row
    Delete {
        id: String,

        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}
