//! stderr logging via flexi_logger. `RUST_LOG` overrides the CLI level.

use flexi_logger::{DeferredNow, Logger, LoggerHandle};

/// Start the global logger. Keep the returned handle alive for the life of
/// the process.
pub fn init_logging(level: &str) -> Result<LoggerHandle, String> {
    Logger::try_with_env_or_str(level)
        .map_err(|e| format!("invalid log level '{}': {}", level, e))?
        .log_to_stderr()
        .format(simple_format)
        .start()
        .map_err(|e| format!("cannot start logger: {}", e))
}

fn level_abbr(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => "ERR",
        log::Level::Warn => "WRN",
        log::Level::Info => "INF",
        log::Level::Debug => "DBG",
        log::Level::Trace => "TRC",
    }
}

// "YYYY-MM-DD HH:mm:ss.fff INF message"
fn simple_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {} {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        level_abbr(record.level()),
        record.args()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vg050_level_abbreviations() {
        assert_eq!(level_abbr(log::Level::Error), "ERR");
        assert_eq!(level_abbr(log::Level::Warn), "WRN");
        assert_eq!(level_abbr(log::Level::Trace), "TRC");
    }

    #[test]
    fn test_vg050_simple_format_layout() {
        let mut out = Vec::new();
        let mut now = DeferredNow::new();
        simple_format(
            &mut out,
            &mut now,
            &log::Record::builder()
                .args(format_args!("saved state"))
                .level(log::Level::Info)
                .target("vigil::core::state")
                .build(),
        )
        .unwrap();
        let line = String::from_utf8(out).unwrap();
        assert!(line.ends_with(" INF saved state"), "{}", line);
    }
}
