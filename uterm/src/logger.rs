//! Internal diagnostics logger, independent of the user-facing terminal transcript.
//! Modeled on `ushell_logger`'s global `critical_section`-guarded writer, trimmed to
//! what the core needs: a single slot for a diagnostic sink, set once at startup. Used
//! for things that are not part of any command's output (ring overflow, rejected
//! scheduler registrations) — command output always goes through [`crate::ByteSink`].

use core::cell::RefCell;
use critical_section::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub const fn label(self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

type Sink = fn(LogLevel, &str);

static LOG_SINK: Mutex<RefCell<Option<Sink>>> = Mutex::new(RefCell::new(None));

/// Installs the diagnostic sink. Call once during startup; later calls replace it.
pub fn set_sink(sink: Sink) {
    critical_section::with(|cs| {
        *LOG_SINK.borrow(cs).borrow_mut() = Some(sink);
    });
}

/// Removes any installed sink, so subsequent `log` calls are no-ops.
pub fn clear_sink() {
    critical_section::with(|cs| {
        *LOG_SINK.borrow(cs).borrow_mut() = None;
    });
}

pub fn log(level: LogLevel, message: &str) {
    critical_section::with(|cs| {
        if let Some(sink) = *LOG_SINK.borrow(cs).borrow() {
            sink(level, message);
        }
    });
}

/// Formats `$($arg)*` into a fixed 96-byte buffer and logs it at `Warn`. Truncates
/// silently on overflow rather than panicking — a diagnostic message is never allowed
/// to crash the thing it is diagnosing.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        let mut buf: heapless::String<96> = heapless::String::new();
        let _ = core::fmt::Write::write_fmt(&mut buf, format_args!($($arg)*));
        $crate::logger::log($crate::logger::LogLevel::Warn, buf.as_str());
    }};
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        let mut buf: heapless::String<96> = heapless::String::new();
        let _ = core::fmt::Write::write_fmt(&mut buf, format_args!($($arg)*));
        $crate::logger::log($crate::logger::LogLevel::Error, buf.as_str());
    }};
}
