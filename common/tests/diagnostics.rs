//! Checks the diagnostics the injector logs for soft failures.
//!
//! `logtest` installs a process-wide logger, so every assertion lives in a
//! single test to keep the captured records deterministic.

use blueprint_common::{Injector, MatchMode, SkipReason};
use camino::Utf8PathBuf;
use log::Level;
use logtest::Logger;

fn drain(logger: &mut Logger) -> Vec<(Level, String)> {
    std::iter::from_fn(|| logger.pop())
        .map(|record| (record.level(), record.args().to_owned()))
        .collect()
}

#[test]
fn soft_failures_warn_unless_suppressed() {
    let mut logger = Logger::start();
    let dir = tempfile::tempdir().expect("temp dir");
    let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).expect("utf-8 temp dir");
    let path = root.join("CMakeLists.txt");
    std::fs::write(&path, "project(demo)\n").expect("seed file");

    let mut injector = Injector::open(path.clone()).expect("open injector");
    injector.set_match_mode(MatchMode::Contains);
    injector.set_force(false);

    let outcome = injector
        .inject_after("add_subdirectory(src/a)\n", "# Plugin Subdirectories")
        .expect("inject");
    assert_eq!(outcome.skip_reason(), Some(SkipReason::AnchorNotFound));

    let records = drain(&mut logger);
    assert!(
        records
            .iter()
            .any(|(level, message)| *level == Level::Warn
                && message.contains("line not found")
                && message.contains("CMakeLists.txt")),
        "expected a warning, got {records:?}"
    );

    injector.set_suppress_warnings(true);
    let outcome = injector
        .inject_after("add_subdirectory(src/a)\n", "# Plugin Subdirectories")
        .expect("inject");
    assert!(!outcome.is_applied());
    assert!(
        drain(&mut logger)
            .iter()
            .all(|(level, _)| *level != Level::Warn),
        "suppressed warnings must not be logged"
    );

    injector.set_suppress_warnings(false);
    injector.set_force(true);
    let outcome = injector
        .inject_after("add_subdirectory(src/a)\n", "# Plugin Subdirectories")
        .expect("inject");
    assert!(outcome.is_applied());
    assert!(
        drain(&mut logger)
            .iter()
            .any(|(level, message)| *level == Level::Info
                && message.contains("Injecting at the end of the file")),
        "expected an info record for the fallback"
    );
}
