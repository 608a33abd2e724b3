use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::TimetableService;
use crate::errors::AppResult;
use crate::store::{SqliteStorage, Storage};
use crate::ui::messages::{success, warning};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database with all pending migrations
///  - the default student list
pub fn handle(cli: &Cli) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.clone(), cli.test)?;
    let db_path = db_path.to_string_lossy().to_string();

    println!("⚙️  Initializing rAttendance…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", &db_path);

    let storage = SqliteStorage::open(&db_path)?;

    if let Err(e) = storage.audit(
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &db_path),
    ) {
        warning(format!("Failed to write internal log: {e}"));
    }

    // seeds the students list on first open
    let timetable = TimetableService::new(storage);
    success(format!(
        "Database initialized at {} ({} students known)",
        &db_path,
        timetable.students().len()
    ));

    println!("🎉 rAttendance initialization completed!");
    Ok(())
}
