use crate::export::ExportFormat;
use crate::models::{TimeCorrection, TimeField};
use clap::{Parser, Subcommand, ValueEnum};

/// Command-line interface definition for rAttendance
/// QR check-in/check-out attendance tracking with SQLite
#[derive(Parser)]
#[command(
    name = "rattendance",
    version = env!("CARGO_PKG_VERSION"),
    about = "Attendance tracking CLI: QR check-in/out, weekly timetable and hour summaries, stored in SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Direction of a QR scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ScanMode {
    In,
    Out,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
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
    },

    /// Check a student in
    Checkin {
        student_id: String,

        first_name: String,

        last_name: String,

        #[arg(long, help = "Where the student checks in (default from config)")]
        location: Option<String>,
    },

    /// Check a student out (closes the open check-in)
    Checkout { student_id: String },

    /// Process a scanned QR payload
    Scan {
        #[arg(value_enum)]
        mode: ScanMode,

        /// JSON payload, e.g. {"studentId":"1","firstName":"Max","lastName":"Mustermann"}
        payload: String,
    },

    /// Show students currently checked in
    Active,

    /// List attendance records
    List {
        #[arg(long = "today", help = "Only records checked in today")]
        today: bool,

        #[arg(long, value_name = "YYYY-MM-DD", help = "Only records of the given day")]
        date: Option<String>,

        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,

        #[arg(long, value_name = "ID", help = "Only records of one student")]
        student: Option<String>,
    },

    /// Attendance statistics for one day (default today)
    Stats {
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<String>,
    },

    /// Correct a recorded time (admin)
    Correct {
        record_id: String,

        #[arg(long, value_enum, default_value = "in")]
        field: TimeField,

        #[arg(
            long,
            value_enum,
            conflicts_with = "time",
            help = "Round to a preset minute within the recorded hour"
        )]
        round: Option<TimeCorrection>,

        #[arg(long, value_name = "HH:MM", help = "Set an explicit local time on the recorded day")]
        time: Option<String>,
    },

    /// Delete an attendance record (admin)
    Del {
        record_id: String,

        #[arg(long, short = 'f', help = "Do not ask for confirmation")]
        force: bool,
    },

    /// Export a student's hours summary (admin)
    Export {
        student_id: String,

        #[arg(long, value_name = "YYYY-MM-DD", help = "Restrict to a single day")]
        date: Option<String>,

        #[arg(long, value_enum, default_value = "pdf")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Manage the weekly timetable and the student list
    Timetable {
        #[command(subcommand)]
        action: TimetableAction,
    },

    /// Administrator session
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum TimetableAction {
    /// Show the week, or a single day (0 = Sunday .. 6 = Saturday)
    Show {
        #[arg(long)]
        day: Option<u8>,
    },

    /// Add a weekly slot (admin)
    Add {
        #[arg(long)]
        day: u8,

        #[arg(long = "start", value_name = "HH:MM")]
        start: String,

        #[arg(long = "end", value_name = "HH:MM")]
        end: String,

        #[arg(long, value_name = "ID")]
        student: Option<String>,

        #[arg(long)]
        subject: Option<String>,

        #[arg(long)]
        location: Option<String>,
    },

    /// Change fields of a slot (admin)
    Update {
        id: String,

        #[arg(long)]
        day: Option<u8>,

        #[arg(long = "start", value_name = "HH:MM")]
        start: Option<String>,

        #[arg(long = "end", value_name = "HH:MM")]
        end: Option<String>,

        #[arg(long, value_name = "ID")]
        student: Option<String>,

        #[arg(long)]
        subject: Option<String>,

        #[arg(long)]
        location: Option<String>,
    },

    /// Remove a slot (admin)
    Del { id: String },

    /// List known students
    Students,

    /// Register a student (admin)
    AddStudent { name: String },
}

#[derive(Subcommand)]
pub enum AdminAction {
    Login { password: String },
    Logout,
    Status,
}
