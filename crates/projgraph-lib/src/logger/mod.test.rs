use super::*;
use clap::ValueEnum;

#[test]
fn test_default_directives_scope_our_crates() {
    assert_eq!(
        default_directives(LogLevel::Debug),
        "projgraph_lib=debug,projgraph=debug,warn"
    );
    assert_eq!(
        default_directives(LogLevel::Error),
        "projgraph_lib=error,projgraph=error,warn"
    );
}

#[test]
fn test_default_directives_parse() {
    for level in LogLevel::value_variants() {
        assert!(EnvFilter::try_new(default_directives(*level)).is_ok());
    }
}

#[test]
fn test_init_once() {
    let config = LoggerConfig {
        level: LogLevel::Trace,
        format: LogFormat::Text,
        output: LogOutput::Stderr,
        ansi: false,
    };

    let logger = Logger::init(config.clone()).unwrap();
    assert_eq!(logger.config().level, LogLevel::Trace);

    assert!(matches!(
        Logger::init(config),
        Err(LoggerError::AlreadyInitialized)
    ));
    assert!(Logger::is_initialized());
    assert!(Logger::global().is_some());
}
