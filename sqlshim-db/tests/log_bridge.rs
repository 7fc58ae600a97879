//! Engine diagnostics re-emitted through the `log` facade.

use std::sync::Mutex;

use sqlshim_db::logging::{self, ENGINE_LOG_TARGET};
use sqlshim_db::{config, Connection};

struct CaptureLogger;

static RECORDS: Mutex<Vec<(String, log::Level, String)>> = Mutex::new(Vec::new());

impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        RECORDS.lock().expect("records lock").push((
            record.target().to_string(),
            record.level(),
            record.args().to_string(),
        ));
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;

#[test]
fn test_engine_errors_reach_log_facade() {
    log::set_logger(&LOGGER).expect("install logger");
    log::set_max_level(log::LevelFilter::Trace);
    logging::try_forward_engine_log().expect("engine not yet initialized");

    let conn = Connection::open_in_memory().expect("open in-memory db");
    assert!(conn.prepare("SELECT * FROM x").is_err());
    config::emit_log_event(28, "autoindex on t(x)");

    let records = RECORDS.lock().expect("records lock").clone();
    let engine: Vec<_> = records
        .iter()
        .filter(|(target, _, _)| target == ENGINE_LOG_TARGET)
        .collect();

    assert!(
        engine.iter().any(|(_, level, message)| *level == log::Level::Error
            && message.starts_with("(1) no such table: x")),
        "{records:?}"
    );
    assert!(
        engine
            .iter()
            .any(|(_, level, message)| *level == log::Level::Warn
                && message == "(28) autoindex on t(x)"),
        "{records:?}"
    );
}
