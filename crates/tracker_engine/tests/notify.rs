use std::fs;

use tempfile::TempDir;
use tracker_engine::NotificationLog;

#[test]
fn messages_are_appended_in_order() {
    engine_logging::initialize_for_tests();
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("notification.log");
    fs::write(&path, "from an earlier pass\n").unwrap();

    let log = NotificationLog::new(&path);
    log.record("New conference updated in the filter: ICSE");
    log.record("New events found in the following conferences: ICSE 2026");

    assert_eq!(
        fs::read_to_string(log.path()).unwrap(),
        "from an earlier pass\n\
         New conference updated in the filter: ICSE\n\
         New events found in the following conferences: ICSE 2026\n"
    );
}

#[test]
fn unwritable_log_does_not_panic() {
    let temp = TempDir::new().unwrap();
    let log = NotificationLog::new(temp.path().join("missing").join("notification.log"));
    log.record("New content updated in the filter: Notification");
    assert!(!log.path().exists());
}
