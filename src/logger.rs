use std::{fs::OpenOptions, io, path::Path};

use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, SharedLogger, TermLogger,
    TerminalMode, WriteLogger,
};

use crate::IS_PROD;

const LOG_LEVEL: LevelFilter = if IS_PROD {
    LevelFilter::Info
} else {
    LevelFilter::Debug
};

/// Log to terminal and append the same lines to `log_file`
pub(crate) fn init_logger(log_file: &Path) -> Result<(), LoggerError> {
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .add_filter_ignore_str("h2")
        .add_filter_ignore_str("hyper")
        .add_filter_ignore_str("reqwest")
        .add_filter_ignore_str("rustls")
        .build();

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;

    let loggers: Vec<Box<dyn SharedLogger>> = vec![
        TermLogger::new(
            LOG_LEVEL,
            config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LOG_LEVEL, config, file),
    ];
    CombinedLogger::init(loggers)?;
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum LoggerError {
    #[error("failed to open log file: {0}")]
    File(#[from] io::Error),
    #[error("logger is already set: {0}")]
    Set(#[from] log::SetLoggerError),
}
