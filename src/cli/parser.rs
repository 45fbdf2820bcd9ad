use crate::export::ExportFormat;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for hourboard
/// CLI dashboard for worked hours pulled from Google Sheets
#[derive(Parser)]
#[command(
    name = "hourboard",
    version = env!("CARGO_PKG_VERSION"),
    about = "Pull an hours worksheet from Google Sheets, store it locally and report on it",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Print debug logs (same as RUST_LOG=debug)
    #[arg(global = true, long, short = 'v')]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Dashboard filters. Repeat a flag to select several values; omit it to select all.
#[derive(Args, Clone, Debug, Default)]
pub struct FilterArgs {
    #[arg(long = "professional", short = 'p', value_name = "NAME")]
    pub professionals: Vec<String>,

    #[arg(long = "client", short = 'c', value_name = "CLIENT")]
    pub clients: Vec<String>,

    #[arg(long = "period", value_name = "MM/YYYY")]
    pub periods: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

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

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,

        #[arg(long = "tables", help = "List stored tables with row counts")]
        tables: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        #[arg(long = "last", value_name = "N", help = "Only the newest N rows")]
        last: Option<usize>,
    },

    /// Show when data was last updated and what is stored
    Status,

    /// List the worksheets of the configured spreadsheet
    Sheets,

    /// Fetch the hours worksheet, normalize it and replace the local copy
    Fetch {
        /// Worksheet name (default: `worksheet` from the config)
        #[arg(long, short = 'w')]
        worksheet: Option<String>,

        /// Read a CSV export of the worksheet instead of calling the API
        #[arg(long = "from-file", value_name = "FILE")]
        from_file: Option<String>,
    },

    /// Upload an allocation CSV (delimiter auto-detected), replacing the current one
    Upload {
        #[arg(value_name = "FILE")]
        file: String,

        #[arg(long, help = "Only show the first rows, do not save")]
        preview: bool,
    },

    /// KPIs and hour totals by professional, client, period and area
    Summary {
        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long, help = "Also print the filtered rows")]
        rows: bool,
    },

    /// Allocated vs spent hours per professional and client
    Compare {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Explore any stored table with per-column filters
    Show {
        /// Table name (see `db --tables`)
        table: String,

        /// COL=a,b | COL~text | COL>=n | COL<=n (repeatable)
        #[arg(long = "filter", short = 'f', value_name = "EXPR")]
        filters: Vec<String>,

        /// Comma-separated list of columns to display
        #[arg(long, value_delimiter = ',')]
        columns: Vec<String>,

        /// Maximum rows to print (0 = all)
        #[arg(long, default_value_t = 100)]
        limit: usize,

        /// Print the distinct values of a column instead of rows
        #[arg(long, value_name = "COL")]
        distinct: Option<String>,
    },

    /// Export a stored table
    Export {
        /// Table name (see `db --tables`)
        table: String,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        /// COL=a,b | COL~text | COL>=n | COL<=n (repeatable)
        #[arg(long = "filter", short = 'f', value_name = "EXPR")]
        filters: Vec<String>,

        #[arg(long, short = 'F')]
        force: bool,
    },

    /// Write the dashboard as a self-contained HTML report
    Report {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long, short = 'F')]
        force: bool,
    },
}

impl From<&FilterArgs> for crate::core::dashboard::Filters {
    fn from(a: &FilterArgs) -> Self {
        Self {
            professionals: a.professionals.clone(),
            clients: a.clients.clone(),
            periods: a.periods.clone(),
        }
    }
}
