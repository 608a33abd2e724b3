use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{check_in, init_db, rat, service, setup_test_db};

#[test]
fn test_checkin_then_checkout() {
    let db_path = setup_test_db("checkin_checkout");
    init_db(&db_path);

    rat()
        .args([
            "--db",
            &db_path,
            "checkin",
            "12345",
            "Max",
            "Mustermann",
            "--location",
            "Room A",
        ])
        .assert()
        .success()
        .stdout(contains("Max Mustermann checked in at"))
        .stdout(contains("Room A"));

    rat()
        .args(["--db", &db_path, "active"])
        .assert()
        .success()
        .stdout(contains("Max Mustermann"))
        .stdout(contains("Active"));

    rat()
        .args(["--db", &db_path, "checkout", "12345"])
        .assert()
        .success()
        .stdout(contains("Max Mustermann checked out at"));

    rat()
        .args(["--db", &db_path, "active"])
        .assert()
        .success()
        .stdout(contains("No students are currently checked in."));

    let svc = service(&db_path);
    assert_eq!(svc.records().len(), 1);
    assert!(svc.records()[0].check_out_time.is_some());
    assert_eq!(svc.records()[0].location, "Room A");
}

#[test]
fn test_second_checkin_is_refused() {
    let db_path = setup_test_db("double_checkin");
    init_db(&db_path);
    check_in(&db_path, "7", "Anna", "Schmidt");

    rat()
        .args(["--db", &db_path, "checkin", "7", "Anna", "Schmidt"])
        .assert()
        .failure()
        .stderr(contains("Anna Schmidt is already checked in since"));

    assert_eq!(service(&db_path).records().len(), 1);
}

#[test]
fn test_checkout_without_checkin_fails() {
    let db_path = setup_test_db("checkout_nothing_open");
    init_db(&db_path);

    rat()
        .args(["--db", &db_path, "checkout", "99"])
        .assert()
        .failure()
        .stderr(contains("No active check-in found for student 99"));
}

#[test]
fn test_checkin_uses_default_location() {
    let db_path = setup_test_db("checkin_default_location");
    init_db(&db_path);
    check_in(&db_path, "3", "Tom", "Weber");

    assert_eq!(service(&db_path).records()[0].location, "Classroom");
}

#[test]
fn test_scan_in_and_out() {
    let db_path = setup_test_db("scan_in_out");
    init_db(&db_path);

    let payload = r#"{"studentId": 42, "firstName": "Jürgen", "lastName": "Müller", "location": "Lab"}"#;

    rat()
        .args(["--db", &db_path, "scan", "in", payload])
        .assert()
        .success()
        .stdout(contains("Jürgen Müller checked in"));

    // scanning again reports the open session instead of failing
    rat()
        .args(["--db", &db_path, "scan", "in", payload])
        .assert()
        .success()
        .stdout(contains("already checked in since"));

    rat()
        .args(["--db", &db_path, "scan", "out", payload])
        .assert()
        .success()
        .stdout(contains("Jürgen Müller checked out"));

    rat()
        .args(["--db", &db_path, "scan", "out", payload])
        .assert()
        .success()
        .stdout(contains("is not checked in"));

    let svc = service(&db_path);
    assert_eq!(svc.records().len(), 1);
    assert_eq!(svc.records()[0].student_id, "42");
}

#[test]
fn test_scan_rejects_bad_codes() {
    let db_path = setup_test_db("scan_bad_codes");
    init_db(&db_path);

    rat()
        .args(["--db", &db_path, "scan", "in", "hello world"])
        .assert()
        .failure()
        .stderr(contains("Expected format"));

    rat()
        .args(["--db", &db_path, "scan", "in", r#"{"studentId":"1","firstName":"Max"}"#])
        .assert()
        .failure()
        .stderr(contains("incomplete data"));

    assert!(service(&db_path).records().is_empty());
}

#[test]
fn test_list_filters() {
    let db_path = setup_test_db("list_filters");
    init_db(&db_path);
    check_in(&db_path, "1", "Max", "Mustermann");
    check_in(&db_path, "2", "Anna", "Schmidt");

    rat()
        .args(["--db", &db_path, "list", "--today"])
        .assert()
        .success()
        .stdout(contains("Max Mustermann"))
        .stdout(contains("Anna Schmidt"));

    rat()
        .args(["--db", &db_path, "list", "--student", "2"])
        .assert()
        .success()
        .stdout(contains("Anna Schmidt").and(contains("Max Mustermann").not()));

    rat()
        .args(["--db", &db_path, "list", "--date", "1999-01-01"])
        .assert()
        .success()
        .stdout(contains("No attendance records found."));

    rat()
        .args(["--db", &db_path, "list", "--date", "01.01.1999"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));
}

#[test]
fn test_stats_for_today() {
    let db_path = setup_test_db("stats_today");
    init_db(&db_path);
    check_in(&db_path, "1", "Max", "Mustermann");
    check_in(&db_path, "2", "Anna", "Schmidt");

    rat()
        .args(["--db", &db_path, "checkout", "2"])
        .assert()
        .success();

    rat()
        .args(["--db", &db_path, "stats"])
        .assert()
        .success()
        .stdout(contains("Records:"))
        .stdout(contains("Present now:"))
        .stdout(contains("Students overall:"));
}
