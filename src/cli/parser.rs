use crate::export::ExportFormat;
use crate::models::status::Status;
use clap::{ArgGroup, Parser, Subcommand};

/// Command-line interface definition for rollcall
#[derive(Parser)]
#[command(
    name = "rollcall",
    version = env!("CARGO_PKG_VERSION"),
    about = "Reconcile club attendance and volunteer hours from form responses into overview sheets",
    long_about = None
)]
pub struct Cli {
    /// Override the configuration file path
    #[arg(global = true, long = "config")]
    pub config: Option<String>,

    /// Override the workbook directory (useful for tests or a shared drive)
    #[arg(global = true, long = "workbook")]
    pub workbook: Option<String>,

    /// Pretend today is the given date (YYYY-MM-DD)
    #[arg(global = true, long = "today", hide = true)]
    pub today: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the configuration file and the workbook directory
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Take attendance, then update the attendance overview
    #[command(group(
        ArgGroup::new("mode")
            .required(true)
            .args(["scanner", "manual", "excused", "backfill"])
    ))]
    Take {
        /// Read member ids from the serial scanner
        #[arg(long)]
        scanner: bool,

        /// Scanner device path (overrides the configuration)
        #[arg(long, requires = "scanner")]
        device: Option<String>,

        /// Type member emails, marked present
        #[arg(long)]
        manual: bool,

        /// Type member emails, marked excused
        #[arg(long)]
        excused: bool,

        /// Record a past session (requires --date and --status)
        #[arg(long)]
        backfill: bool,

        /// Session date (YYYY-MM-DD) for --backfill
        #[arg(long, requires = "backfill")]
        date: Option<String>,

        /// Status to record with --backfill
        #[arg(long, value_enum, requires = "backfill")]
        status: Option<Status>,
    },

    /// Aggregate attendance responses and rewrite the overview sheet
    Attendance,

    /// Aggregate logged hours and update the overview and detail sheets
    Hours,

    /// Export the attendance overview to a local file
    Export {
        /// Export format
        #[arg(long, value_enum, value_name = "FORMAT", default_value = "csv")]
        format: ExportFormat,

        /// Output file path (absolute path required)
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// List or delete spreadsheets of the workbook
    #[command(group(
        ArgGroup::new("action")
            .required(true)
            .args(["list", "delete"])
    ))]
    Sheets {
        #[arg(long, help = "List every spreadsheet with its id")]
        list: bool,

        #[arg(long, value_name = "ID", help = "Delete the spreadsheet with this id")]
        delete: Option<String>,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}
