//! Structured logging with box-drawing output.
//!
//! Every line bannerwatch prints to the terminal goes through the macros in this
//! module so the output keeps one visual style:
//!
//! ```text
//! ┏ bannerwatch v0.1.0 ━━╸
//! ┃
//! ┣ Loading configuration...
//! ┃   Time zone: America/Chicago
//! ┣[WARNING] Unrecognized time zone 'Not/AZone', using local time
//! ╹
//! ```
//!
//! ## Conventions
//!
//! - `log_block_start!` opens a new conceptual block (adds an empty `┃` line first).
//! - `log_decorated!` continues the current block, `log_indented!` nests details under it.
//! - `log_pipe!` inserts spacing, mainly before a semantic message that starts a block.
//! - `log_info!`, `log_warning!`, `log_error!`, `log_debug!`, `log_critical!` carry a
//!   `[LEVEL]` tag instead of plain box drawing.
//! - `log_version!` opens the output once per process and `log_end!` closes it.
//!
//! When the process time source is simulated (`--at` or `simulate`), each line is
//! prefixed with the simulated wall-clock time so replayed runs stay readable.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

static LOGGING_ENABLED: AtomicBool = AtomicBool::new(true);

/// Logging facade holding the process-wide output switch.
pub struct Log;

impl Log {
    /// Enable or disable all log output.
    ///
    /// JSON status output disables logging so stdout stays machine readable.
    pub fn set_enabled(enabled: bool) {
        LOGGING_ENABLED.store(enabled, Ordering::SeqCst);
    }

    pub fn is_enabled() -> bool {
        LOGGING_ENABLED.load(Ordering::SeqCst)
    }

    /// Timestamp prefix for simulated runs, empty otherwise.
    ///
    /// Only consults the time source once it has been installed so that logging
    /// never initializes it as a side effect.
    pub fn timestamp_prefix() -> String {
        if crate::time_source::is_initialized() && crate::time_source::is_simulated() {
            let now = crate::time_source::now().with_timezone(&chrono::Local);
            format!("[{}] ", now.format("%a %H:%M:%S"))
        } else {
            String::new()
        }
    }
}

/// Write one already formatted chunk to stdout.
pub fn write_output(text: &str) {
    let mut stdout = std::io::stdout().lock();
    let _ = stdout.write_all(text.as_bytes());
    let _ = stdout.flush();
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_line {
    ($lead:expr, $marker:expr, $($arg:tt)+) => {{
        use $crate::common::logger::Log;
        if Log::is_enabled() {
            let prefix = Log::timestamp_prefix();
            let message = format!($($arg)+);
            let lead: &str = $lead;
            let formatted = if lead.is_empty() {
                format!("{prefix}{}{message}\n", $marker)
            } else {
                format!("{prefix}{lead}\n{prefix}{}{message}\n", $marker)
            };
            $crate::common::logger::write_output(&formatted);
        }
    }};
}

/// Continue the current block: `┣ message`.
#[macro_export]
macro_rules! log_decorated {
    ($($arg:tt)+) => { $crate::__log_line!("", "┣ ", $($arg)+) };
}

/// Nested detail line: `┃   message`.
#[macro_export]
macro_rules! log_indented {
    ($($arg:tt)+) => { $crate::__log_line!("", "┃   ", $($arg)+) };
}

/// Open a new block: an empty `┃` followed by `┣ message`.
#[macro_export]
macro_rules! log_block_start {
    ($($arg:tt)+) => { $crate::__log_line!("┃", "┣ ", $($arg)+) };
}

/// Empty `┃` spacer line.
#[macro_export]
macro_rules! log_pipe {
    () => {{
        use $crate::common::logger::Log;
        if Log::is_enabled() {
            let prefix = Log::timestamp_prefix();
            $crate::common::logger::write_output(&format!("{prefix}┃\n"));
        }
    }};
}

/// Output header: `┏ bannerwatch vX.Y.Z ━━╸`.
#[macro_export]
macro_rules! log_version {
    () => {{
        use $crate::common::logger::Log;
        if Log::is_enabled() {
            let prefix = Log::timestamp_prefix();
            let version = env!("CARGO_PKG_VERSION");
            $crate::common::logger::write_output(&format!("{prefix}┏ bannerwatch v{version} ━━╸\n"));
        }
    }};
}

/// Output terminator: `╹`.
#[macro_export]
macro_rules! log_end {
    () => {{
        use $crate::common::logger::Log;
        if Log::is_enabled() {
            let prefix = Log::timestamp_prefix();
            $crate::common::logger::write_output(&format!("{prefix}╹\n"));
        }
    }};
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)+) => { $crate::__log_line!("", "┣[\x1b[32mINFO\x1b[0m] ", $($arg)+) };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)+) => { $crate::__log_line!("", "┣[\x1b[32mDEBUG\x1b[0m] ", $($arg)+) };
}

#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)+) => { $crate::__log_line!("", "┣[\x1b[33mWARNING\x1b[0m] ", $($arg)+) };
}

/// Warning without the box-drawing frame, for output outside a block.
#[macro_export]
macro_rules! log_warning_standalone {
    ($($arg:tt)+) => { $crate::__log_line!("", "[\x1b[33mWARNING\x1b[0m] ", $($arg)+) };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)+) => { $crate::__log_line!("", "┣[\x1b[31mERROR\x1b[0m] ", $($arg)+) };
}

/// Error that terminates the output: `┃` then `┗[ERROR] message`.
#[macro_export]
macro_rules! log_error_exit {
    ($($arg:tt)+) => { $crate::__log_line!("┃", "┗[\x1b[31mERROR\x1b[0m] ", $($arg)+) };
}

#[macro_export]
macro_rules! log_critical {
    ($($arg:tt)+) => { $crate::__log_line!("", "┣[\x1b[31mCRITICAL\x1b[0m] ", $($arg)+) };
}
