use std::sync::OnceLock;
use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

pub struct Logger {
    prefix: Option<String>,
    enabled: bool,
}

impl Logger {
    fn new(prefix: Option<String>, enabled: bool) -> Self {
        Self { prefix, enabled }
    }

    fn format_line(&self, timestamp: &str, message: &str) -> String {
        match self.prefix {
            Some(ref prefix) => format!("[{}][{}] {}", timestamp, prefix, message),
            None => format!("[{}] {}", timestamp, message),
        }
    }

    /// Writes to stderr so log lines never interleave with a board drawn on stdout.
    pub fn log(&self, message: &str) {
        if !self.enabled {
            return;
        }
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        eprintln!("{}", self.format_line(&timestamp, message));
    }
}

/// First call wins; later calls are ignored.
pub fn init_logger(prefix: Option<String>, enabled: bool) {
    LOGGER.get_or_init(|| Logger::new(prefix, enabled));
}

pub fn is_enabled() -> bool {
    LOGGER.get().is_some_and(|logger| logger.enabled)
}

pub fn log(message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(message);
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        if $crate::logger::is_enabled() {
            $crate::logger::log(&format!($($arg)*))
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line_with_prefix() {
        let logger = Logger::new(Some("Game".to_string()), true);
        assert_eq!(
            logger.format_line("2026-01-02 03:04:05", "X played 4"),
            "[2026-01-02 03:04:05][Game] X played 4"
        );
    }

    #[test]
    fn test_format_line_without_prefix() {
        let logger = Logger::new(None, true);
        assert_eq!(logger.format_line("ts", "draw"), "[ts] draw");
    }

    #[test]
    fn test_log_before_init_is_silent() {
        assert!(!is_enabled());
        crate::log!("nothing happens {}", 1);
    }
}
