use home_copilot::config::LoggingConfig;
use home_copilot::error::CopilotError;
use home_copilot::logging::init_logging;

#[test]
fn console_logging_reports_existing_subscriber() {
    // Another subscriber owns the process before ours is installed
    tracing_subscriber::fmt().with_writer(std::io::sink).try_init().unwrap();

    let config = LoggingConfig::default();
    assert!(config.file.is_none());
    let err = init_logging(&config).unwrap_err();
    assert!(matches!(err, CopilotError::Config { .. }));
    assert!(err.to_string().contains("already initialized"));

    // Later calls report the same first outcome
    assert!(init_logging(&config).is_err());
}
