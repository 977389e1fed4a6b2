//! Rolling file logging for the admin core.
//!
//! # Responsibility
//! - Start the `flexi_logger` file backend at most once per process.
//! - Record panics as metadata-only log events.
//!
//! # Invariants
//! - Re-initializing with the same level and directory is a no-op.
//! - Re-initializing with a different level or directory is an error.
//! - Log events never carry passwords or student contact fields; panic
//!   payloads have email addresses masked before they are written.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info, Level};
use once_cell::sync::{Lazy, OnceCell};
use regex::Regex;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "schoolhub";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;
const MAX_PANIC_PAYLOAD_CHARS: usize = 160;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();
static PANIC_HOOK_INSTALLED: OnceCell<()> = OnceCell::new();
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\s@]+@[^\s@]+").expect("valid email regex"));

struct LoggingState {
    level: &'static str,
    log_dir: PathBuf,
    _logger: LoggerHandle,
}

impl LoggingState {
    fn ensure_compatible(&self, level: &str, log_dir: &Path) -> Result<(), String> {
        if self.log_dir != log_dir {
            return Err(format!(
                "logging already initialized at `{}`; refusing to switch to `{}`",
                self.log_dir.display(),
                log_dir.display()
            ));
        }
        if self.level != level {
            return Err(format!(
                "logging already initialized with level `{}`; refusing to switch to `{}`",
                self.level, level
            ));
        }
        Ok(())
    }
}

/// Starts file logging at `level` under the absolute directory `log_dir`.
///
/// # Errors
/// - Unsupported level, empty or relative directory.
/// - Directory creation or logger backend failure.
/// - A previous call already configured a different level or directory.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), String> {
    let level = normalize_level(level)?;
    let log_dir = normalize_log_dir(log_dir)?;

    if let Some(state) = LOGGING_STATE.get() {
        return state.ensure_compatible(level, &log_dir);
    }

    let state = LOGGING_STATE.get_or_try_init(|| start_logger(level, log_dir.clone()))?;
    state.ensure_compatible(level, &log_dir)
}

fn start_logger(level: &'static str, log_dir: PathBuf) -> Result<LoggingState, String> {
    std::fs::create_dir_all(&log_dir).map_err(|err| {
        format!(
            "failed to create log directory `{}`: {err}",
            log_dir.display()
        )
    })?;

    let logger = Logger::try_with_str(level)
        .map_err(|err| format!("invalid log level `{level}`: {err}"))?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir.as_path())
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        // Format: [YYYY-MM-DD HH:MM:SS.ffffff TZ] LEVEL [module] file:line: message
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    install_panic_hook_once();

    let build = if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    };
    info!(
        "event=app_start module=logging status=ok version={} build={} os={}",
        env!("CARGO_PKG_VERSION"),
        build,
        std::env::consts::OS
    );
    info!(
        "event=logging_init module=logging status=ok level={} log_dir={}",
        level,
        log_dir.display()
    );

    Ok(LoggingState {
        level,
        log_dir,
        _logger: logger,
    })
}

/// Returns `(level, log_dir)` of the active logger, or `None` before init.
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    LOGGING_STATE
        .get()
        .map(|state| (state.level, state.log_dir.clone()))
}

/// `debug` for debug builds, `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

/// Maps a user-supplied level name onto the spelling `flexi_logger` expects.
///
/// Accepts any case, surrounding whitespace and `warning` for `warn`.
pub(crate) fn normalize_level(level: &str) -> Result<&'static str, String> {
    let trimmed = level.trim();
    let candidate = if trimmed.eq_ignore_ascii_case("warning") {
        "warn"
    } else {
        trimmed
    };
    match candidate.parse::<Level>() {
        Ok(Level::Trace) => Ok("trace"),
        Ok(Level::Debug) => Ok("debug"),
        Ok(Level::Info) => Ok("info"),
        Ok(Level::Warn) => Ok("warn"),
        Ok(Level::Error) => Ok("error"),
        Err(_) => Err(format!(
            "unsupported log level `{trimmed}`; expected trace|debug|info|warn|error"
        )),
    }
}

fn normalize_log_dir(log_dir: &str) -> Result<PathBuf, String> {
    match log_dir.trim() {
        "" => Err("log_dir cannot be empty".to_string()),
        dir if Path::new(dir).is_absolute() => Ok(PathBuf::from(dir)),
        dir => Err(format!("log_dir must be an absolute path, got `{dir}`")),
    }
}

fn install_panic_hook_once() {
    PANIC_HOOK_INSTALLED.get_or_init(|| {
        let previous_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let location = panic_info.location().map_or_else(
                || "unknown".to_string(),
                |loc| format!("{}:{}", loc.file(), loc.line()),
            );
            error!(
                "event=panic_captured module=logging status=error thread={} at={} payload={}",
                std::thread::current().name().unwrap_or("unnamed"),
                location,
                panic_payload_summary(panic_info.payload())
            );
            previous_hook(panic_info);
        }));
    });
}

fn panic_payload_summary(payload: &(dyn std::any::Any + Send)) -> String {
    let text: &str = if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    };
    redact_for_log(text, MAX_PANIC_PAYLOAD_CHARS)
}

/// Prepares free text for a single log line.
///
/// Student and staff email addresses are masked, line breaks are flattened
/// and the result is capped at `max_chars` characters.
fn redact_for_log(value: &str, max_chars: usize) -> String {
    let masked = EMAIL_RE.replace_all(value, "<email>");
    let flattened = masked.replace(['\n', '\r'], " ");
    if flattened.chars().count() <= max_chars {
        return flattened;
    }
    let mut truncated: String = flattened.chars().take(max_chars).collect();
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use super::{
        init_logging, logging_status, normalize_level, normalize_log_dir, panic_payload_summary,
        redact_for_log,
    };

    #[test]
    fn normalize_level_accepts_known_values() {
        assert_eq!(normalize_level("DEBUG").expect("DEBUG should normalize"), "debug");
        assert_eq!(normalize_level(" warning ").expect("warning should normalize"), "warn");
        assert_eq!(normalize_level("Error").expect("Error should normalize"), "error");
    }

    #[test]
    fn normalize_level_rejects_unknown_values() {
        let err = normalize_level("verbose").expect_err("verbose is not a level");
        assert!(err.contains("unsupported log level `verbose`"));
        assert!(normalize_level("off").is_err());
    }

    #[test]
    fn normalize_log_dir_rejects_relative_and_empty_paths() {
        assert!(normalize_log_dir("logs/dev")
            .expect_err("relative paths must be rejected")
            .contains("absolute"));
        assert!(normalize_log_dir("   ")
            .expect_err("empty paths must be rejected")
            .contains("empty"));
    }

    #[test]
    fn redact_for_log_flattens_and_truncates() {
        assert_eq!(redact_for_log("line1\nline2\rline3", 8), "line1 li...");
        assert_eq!(redact_for_log("short", 8), "short");
    }

    #[test]
    fn redact_for_log_masks_email_addresses() {
        let redacted = redact_for_log("bad roll for asha@x.com in Grade 9", 160);
        assert_eq!(redacted, "bad roll for <email> in Grade 9");
    }

    #[test]
    fn panic_payload_summary_handles_each_payload_kind() {
        let owned: Box<dyn std::any::Any + Send> =
            Box::new(format!("lookup failed for {}", "rahul.sharma@school.com"));
        assert_eq!(panic_payload_summary(owned.as_ref()), "lookup failed for <email>");

        let borrowed: Box<dyn std::any::Any + Send> = Box::new("static message");
        assert_eq!(panic_payload_summary(borrowed.as_ref()), "static message");

        let opaque: Box<dyn std::any::Any + Send> = Box::new(42_u32);
        assert_eq!(panic_payload_summary(opaque.as_ref()), "non-string panic payload");
    }

    #[test]
    fn init_logging_is_idempotent_and_rejects_conflicts() {
        let first = tempfile::tempdir().expect("temp dir");
        let second = tempfile::tempdir().expect("temp dir");
        let first_str = first.path().to_str().expect("utf-8 temp dir").to_string();
        let second_str = second.path().to_str().expect("utf-8 temp dir").to_string();

        init_logging("info", &first_str).expect("first init should succeed");
        init_logging("INFO", &first_str).expect("same config should be idempotent");

        let level_error = init_logging("debug", &first_str).expect_err("level conflict");
        assert!(level_error.contains("refusing to switch"));

        let dir_error = init_logging("info", &second_str).expect_err("directory conflict");
        assert!(dir_error.contains("refusing to switch"));

        let (level, dir) = logging_status().expect("logging should be active");
        assert_eq!(level, "info");
        assert_eq!(dir, first.path());
    }
}
