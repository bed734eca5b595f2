//! Application-wide constants and configuration defaults.
//!
//! Defaults mirror the values a freshly placed banner starts with, so a missing
//! config key behaves exactly like an untouched setting.

use crate::schedule::{ManualOverride, VisibleDays};
use crate::state::HideMode;

// # Application Metadata

pub const APP_NAME: &str = "bannerwatch";
pub const CONFIG_FILE_NAME: &str = "bannerwatch.toml";
pub const LOCK_FILE_NAME: &str = "bannerwatch.lock";

// # Schedule Defaults

pub const DEFAULT_SCHEDULE_ENABLED: bool = true;
/// Zone used when the configured time zone is empty.
pub const DEFAULT_TIMEZONE: &str = "America/Chicago";
pub const DEFAULT_VISIBLE_DAYS: VisibleDays = VisibleDays::Monday;
pub const DEFAULT_MANUAL_OVERRIDE: ManualOverride = ManualOverride::Auto;

// # Display Defaults

pub const DEFAULT_HIDE_MODE: HideMode = HideMode::Hidden;
pub const DEFAULT_ALLOW_COLLAPSE: bool = true;
pub const DEFAULT_DEFAULT_COLLAPSED: bool = false;
pub const DEFAULT_DIAGNOSTICS: bool = false;

// # Banner Text

/// Shown wherever a title is needed but none is configured.
pub const FALLBACK_TITLE: &str = "Monday Message";
pub const EXPIRED_SUFFIX: &str = "(Expired)";
pub const FALLBACK_HEADER_ALT: &str = "Header";
/// Longest accepted value for any free-text config field, in characters.
pub const MAXIMUM_TEXT_LENGTH: usize = 256;

// # Runtime

/// Quiet period after the last config file event before reloading.
pub const CONFIG_RELOAD_DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_SIMULATION_STEP_MINUTES: i64 = 60;
pub const MAXIMUM_SIMULATION_STEPS: usize = 100_000;

// # Exit Codes

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
/// `status` exit code when the banner is not showing any content.
pub const EXIT_BANNER_HIDDEN: i32 = 3;

#[cfg(test)]
pub mod test_constants {
    /// Monday 2024-01-15 12:00 in America/Chicago.
    pub const TEST_CHICAGO_MONDAY_NOON: &str = "2024-01-15T18:00:00Z";
    /// Tuesday 2024-01-16 12:00 in America/Chicago.
    pub const TEST_CHICAGO_TUESDAY_NOON: &str = "2024-01-16T18:00:00Z";
    /// Monday 03:00 UTC, still Sunday evening in America/Chicago.
    pub const TEST_UTC_MONDAY_CHICAGO_SUNDAY: &str = "2024-01-15T03:00:00Z";
    /// Tuesday 05:00 UTC, still Monday night in America/Chicago.
    pub const TEST_UTC_TUESDAY_CHICAGO_MONDAY: &str = "2024-01-16T05:00:00Z";
    pub const TEST_INVALID_TIMEZONE: &str = "Not/AZone";
}
