use crate::errors::AppResult;
use crate::store::{ATTENDANCE_KEY, SqliteStorage, STUDENTS_KEY, Storage, TIMETABLE_KEY};
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use std::fs;

/// Number of entries in a JSON array stored under `key` (`None` if absent
/// or not an array).
fn entry_count(storage: &SqliteStorage, key: &str) -> AppResult<Option<usize>> {
    let raw = match storage.get_item(key)? {
        Some(raw) => raw,
        None => return Ok(None),
    };
    let value: serde_json::Value = serde_json::from_str(&raw)?;
    Ok(value.as_array().map(Vec::len))
}

pub fn print_db_info(storage: &SqliteStorage, db_path: &str) -> AppResult<()> {
    println!();

    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    for (label, key) in [
        ("Attendance records", ATTENDANCE_KEY),
        ("Time slots", TIMETABLE_KEY),
        ("Students", STUDENTS_KEY),
    ] {
        let shown = match entry_count(storage, key)? {
            Some(n) => format!("{GREEN}{n}{RESET}"),
            None => format!("{GREY}--{RESET}"),
        };
        println!("{}• {}:{} {}", CYAN, label, RESET, shown);
    }

    let sizes = storage.sizes()?;
    if !sizes.is_empty() {
        println!("{}• Keys:{}", CYAN, RESET);
        for (key, len, updated_at) in sizes {
            println!("    {key:<22} {len:>8} bytes  {GREY}{updated_at}{RESET}");
        }
    }

    println!();
    Ok(())
}
