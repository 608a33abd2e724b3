use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use rattendance::core::TimetableService;
use rattendance::store::SqliteStorage;

mod common;
use common::{init_db, login, rat, setup_test_db};

fn timetable(db_path: &str) -> TimetableService<SqliteStorage> {
    TimetableService::new(SqliteStorage::open(db_path).expect("open db"))
}

#[test]
fn test_default_students_are_seeded() {
    let db_path = setup_test_db("timetable_students");
    init_db(&db_path);

    rat()
        .args(["--db", &db_path, "timetable", "students"])
        .assert()
        .success()
        .stdout(contains("Max Mustermann"))
        .stdout(contains("Anna Schmidt"))
        .stdout(contains("Tom Weber"));
}

#[test]
fn test_slot_changes_require_login() {
    let db_path = setup_test_db("timetable_gate");
    init_db(&db_path);

    rat()
        .args([
            "--db", &db_path, "timetable", "add", "--day", "1", "--start", "08:00", "--end",
            "09:00",
        ])
        .assert()
        .failure()
        .stderr(contains("Administrator login required"));

    rat()
        .args(["--db", &db_path, "timetable", "show"])
        .assert()
        .success()
        .stdout(contains("Sunday"))
        .stdout(contains("no appointments"));
}

#[test]
fn test_day_view_is_sorted_by_start_time() {
    let db_path = setup_test_db("timetable_sorted");
    init_db(&db_path);
    login(&db_path);

    for (start, end, subject) in [("14:00", "15:00", "Physics"), ("9:30", "10:15", "Maths")] {
        rat()
            .args([
                "--db", &db_path, "timetable", "add", "--day", "2", "--start", start, "--end",
                end, "--student", "2", "--subject", subject,
            ])
            .assert()
            .success()
            .stdout(contains("Tuesday"));
    }

    let out = rat()
        .args(["--db", &db_path, "timetable", "show", "--day", "2"])
        .assert()
        .success()
        .stdout(contains("Anna Schmidt"))
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8_lossy(&out);
    let maths = text.find("09:30-10:15").expect("maths slot");
    let physics = text.find("14:00-15:00").expect("physics slot");
    assert!(maths < physics);

    rat()
        .args(["--db", &db_path, "timetable", "show", "--day", "3"])
        .assert()
        .success()
        .stdout(contains("no appointments"));
}

#[test]
fn test_update_and_delete_slot() {
    let db_path = setup_test_db("timetable_update_delete");
    init_db(&db_path);
    login(&db_path);

    rat()
        .args([
            "--db", &db_path, "timetable", "add", "--day", "5", "--start", "10:00", "--end",
            "11:00", "--location", "Room 1",
        ])
        .assert()
        .success();

    let id = timetable(&db_path).time_slots()[0].id.clone();

    rat()
        .args(["--db", &db_path, "timetable", "update", &id, "--location", "Room 2"])
        .assert()
        .success()
        .stdout(contains("updated"));

    let slot = timetable(&db_path).time_slots()[0].clone();
    assert_eq!(slot.location.as_deref(), Some("Room 2"));
    assert_eq!(slot.start_time, "10:00");
    assert_eq!(slot.day_of_week, 5);

    rat()
        .args(["--db", &db_path, "timetable", "update", "nope", "--day", "1"])
        .assert()
        .failure()
        .stderr(contains("Time slot not found: nope"));

    rat()
        .args(["--db", &db_path, "timetable", "del", &id])
        .assert()
        .success()
        .stdout(contains("deleted"));

    assert!(timetable(&db_path).time_slots().is_empty());
}

#[test]
fn test_invalid_slot_input() {
    let db_path = setup_test_db("timetable_invalid");
    init_db(&db_path);
    login(&db_path);

    rat()
        .args([
            "--db", &db_path, "timetable", "add", "--day", "7", "--start", "10:00", "--end",
            "11:00",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid day of week: 7"));

    rat()
        .args([
            "--db", &db_path, "timetable", "add", "--day", "1", "--start", "25:00", "--end",
            "11:00",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid time format"));

    assert!(timetable(&db_path).time_slots().is_empty());
}

#[test]
fn test_add_student() {
    let db_path = setup_test_db("timetable_add_student");
    init_db(&db_path);
    login(&db_path);

    rat()
        .args(["--db", &db_path, "timetable", "add-student", "Lena Fischer"])
        .assert()
        .success()
        .stdout(contains("Student Lena Fischer added"));

    rat()
        .args(["--db", &db_path, "timetable", "students"])
        .assert()
        .success()
        .stdout(contains("Lena Fischer").and(contains("Tom Weber")));
}
