//! Logging setup
//!
//! The library only emits `tracing` events. Binaries and tests that want to
//! see them call `init_logging` once at startup.
//!
//! ```rust,no_run
//! use genstudio::telemetry::{LoggingConfig, init_logging};
//!
//! let _guard = init_logging(&LoggingConfig::default().with_filter("genstudio=debug"))?;
//! # Ok::<(), genstudio::StudioError>(())
//! ```

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::error::StudioError;

const LOG_FILE_PREFIX: &str = "genstudio.log";

/// Subscriber configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `EnvFilter` directives, e.g. `genstudio=debug,reqwest=warn`
    pub filter: String,
    /// JSON lines on stdout instead of human-readable text
    pub json: bool,
    /// Also write JSON logs to a daily rolling file in this directory
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "genstudio=info".to_string(),
            json: false,
            directory: None,
        }
    }
}

impl LoggingConfig {
    /// Read `GENSTUDIO_LOG`, `GENSTUDIO_LOG_FORMAT` (`json` or `text`) and
    /// `GENSTUDIO_LOG_DIR`; unset variables keep the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(filter) = std::env::var("GENSTUDIO_LOG")
            && !filter.trim().is_empty()
        {
            config.filter = filter;
        }
        if let Ok(format) = std::env::var("GENSTUDIO_LOG_FORMAT") {
            config.json = format.trim().eq_ignore_ascii_case("json");
        }
        if let Ok(dir) = std::env::var("GENSTUDIO_LOG_DIR")
            && !dir.trim().is_empty()
        {
            config.directory = Some(PathBuf::from(dir));
        }
        config
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }
}

/// Install the global subscriber.
///
/// Returns the file writer's guard when a directory is configured; keep it
/// alive for as long as logs should be flushed. Fails if the filter does not
/// parse or a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>, StudioError> {
    let filter = EnvFilter::try_new(&config.filter).map_err(|e| {
        StudioError::ConfigurationError(format!("Invalid log filter '{}': {e}", config.filter))
    })?;

    let (file_layer, guard) = match &config.directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let text_layer = (!config.json).then(|| fmt::layer().with_target(true));
    let json_layer = config.json.then(|| fmt::layer().json().with_target(true));

    tracing_subscriber::registry()
        .with(filter)
        .with(text_layer)
        .with(json_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| StudioError::ConfigurationError(format!("Failed to initialize logging: {e}")))?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_filter_is_a_configuration_error() {
        let config = LoggingConfig::default().with_filter("genstudio=loudest");
        assert!(matches!(
            init_logging(&config),
            Err(StudioError::ConfigurationError(_))
        ));
    }

    #[test]
    fn second_init_is_rejected() {
        let config = LoggingConfig::default().with_filter("genstudio=warn");
        // The first call may race another test for the global slot.
        let _ = init_logging(&config);
        assert!(matches!(
            init_logging(&config),
            Err(StudioError::ConfigurationError(_))
        ));
    }
}
