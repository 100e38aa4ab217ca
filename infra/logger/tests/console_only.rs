use herald_logger::{LevelFilter, Logger, LoggerConfig};

#[test]
fn init_console_only_has_no_guard() {
    let config = LoggerConfig::named("integration-console-only").with_level(LevelFilter::INFO);
    let logger = Logger::init(&config).expect("logger should initialize");

    assert!(logger.guard().is_none(), "console-only logger should not create a file guard");
}
