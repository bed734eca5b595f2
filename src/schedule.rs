//! Schedule evaluation.
//!
//! Turns the schedule half of the configuration into the schedule verdict: the
//! single boolean saying whether the banner is meant to be showing right now,
//! before hide mode or collapse are considered.
//!
//! ## Precedence
//!
//! The first matching rule decides:
//! 1. `manual_override = ForceShow` → visible
//! 2. `manual_override = ForceHide` → not visible
//! 3. `schedule_enabled = false` → visible
//! 4. otherwise → visible only while it is Monday in the configured zone
//!
//! `visible_days` is carried along but never changes the verdict. An enabled
//! schedule is Monday-only for every variant, including `Always` and `Custom`.

use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::common::constants::DEFAULT_TIMEZONE;
use crate::timezone::{ResolvedWeekday, resolve_weekday, resolve_weekday_quietly};

/// Day rule selected for the banner.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum VisibleDays {
    #[serde(alias = "monday")]
    Monday,
    #[serde(alias = "always")]
    Always,
    /// Reserved; evaluates exactly like `Monday`.
    #[serde(alias = "custom")]
    Custom,
}

impl VisibleDays {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisibleDays::Monday => "Monday",
            VisibleDays::Always => "Always",
            VisibleDays::Custom => "Custom",
        }
    }
}

/// Manual override that bypasses the schedule entirely.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum ManualOverride {
    #[serde(alias = "auto")]
    Auto,
    #[serde(alias = "force_show")]
    ForceShow,
    #[serde(alias = "force_hide")]
    ForceHide,
}

impl ManualOverride {
    pub fn as_str(&self) -> &'static str {
        match self {
            ManualOverride::Auto => "Auto",
            ManualOverride::ForceShow => "ForceShow",
            ManualOverride::ForceHide => "ForceHide",
        }
    }
}

/// Which override, if any, produced the verdict.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum OverrideApplied {
    None,
    ForceShow,
    ForceHide,
}

impl fmt::Display for OverrideApplied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OverrideApplied::None => "None",
            OverrideApplied::ForceShow => "ForceShow",
            OverrideApplied::ForceHide => "ForceHide",
        };
        f.write_str(name)
    }
}

/// Inputs to a single schedule evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleConfig {
    pub schedule_enabled: bool,
    /// IANA zone name. May be invalid; empty selects [`DEFAULT_TIMEZONE`].
    pub timezone: String,
    pub visible_days: VisibleDays,
    pub manual_override: ManualOverride,
}

impl ScheduleConfig {
    /// The zone name the evaluator will actually resolve.
    pub fn effective_timezone(&self) -> &str {
        let trimmed = self.timezone.trim();
        if trimmed.is_empty() {
            DEFAULT_TIMEZONE
        } else {
            trimmed
        }
    }
}

/// Schedule verdict and how it was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationResult {
    pub scheduled_visible: bool,
    pub override_applied: OverrideApplied,
    /// Set only when the weekday rule decided the verdict.
    pub checked_weekday: Option<ResolvedWeekday>,
}

impl EvaluationResult {
    fn decided_by(scheduled_visible: bool, override_applied: OverrideApplied) -> Self {
        Self {
            scheduled_visible,
            override_applied,
            checked_weekday: None,
        }
    }
}

/// Evaluate the schedule at `now`.
pub fn evaluate(config: &ScheduleConfig, now: DateTime<Utc>) -> EvaluationResult {
    evaluate_with(config, now, resolve_weekday)
}

/// Evaluate without warning about an unrecognized time zone.
pub fn evaluate_quietly(config: &ScheduleConfig, now: DateTime<Utc>) -> EvaluationResult {
    evaluate_with(config, now, resolve_weekday_quietly)
}

fn evaluate_with(
    config: &ScheduleConfig,
    now: DateTime<Utc>,
    resolve: fn(&str, DateTime<Utc>) -> ResolvedWeekday,
) -> EvaluationResult {
    match config.manual_override {
        ManualOverride::ForceShow => EvaluationResult::decided_by(true, OverrideApplied::ForceShow),
        ManualOverride::ForceHide => {
            EvaluationResult::decided_by(false, OverrideApplied::ForceHide)
        }
        ManualOverride::Auto if !config.schedule_enabled => {
            EvaluationResult::decided_by(true, OverrideApplied::None)
        }
        ManualOverride::Auto => {
            // Every visible_days variant is Monday-only while scheduling is enabled
            let resolved = resolve(config.effective_timezone(), now);
            EvaluationResult {
                scheduled_visible: resolved.weekday == Weekday::Mon,
                override_applied: OverrideApplied::None,
                checked_weekday: Some(resolved),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::constants::test_constants::*;
    use crate::timezone::WeekdaySource;

    fn instant(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn schedule(enabled: bool, timezone: &str, manual_override: ManualOverride) -> ScheduleConfig {
        ScheduleConfig {
            schedule_enabled: enabled,
            timezone: timezone.to_string(),
            visible_days: VisibleDays::Monday,
            manual_override,
        }
    }

    #[test]
    fn test_force_show_wins_over_schedule() {
        let config = schedule(true, "America/Chicago", ManualOverride::ForceShow);
        let result = evaluate(&config, instant(TEST_CHICAGO_TUESDAY_NOON));

        assert!(result.scheduled_visible);
        assert_eq!(result.override_applied, OverrideApplied::ForceShow);
        assert_eq!(result.checked_weekday, None);
    }

    #[test]
    fn test_force_hide_wins_on_monday() {
        let config = schedule(true, "America/Chicago", ManualOverride::ForceHide);
        let result = evaluate(&config, instant(TEST_CHICAGO_MONDAY_NOON));

        assert!(!result.scheduled_visible);
        assert_eq!(result.override_applied, OverrideApplied::ForceHide);
    }

    #[test]
    fn test_force_hide_ignores_disabled_schedule() {
        let config = schedule(false, "America/Chicago", ManualOverride::ForceHide);
        assert!(!evaluate(&config, instant(TEST_CHICAGO_MONDAY_NOON)).scheduled_visible);
    }

    #[test]
    fn test_disabled_schedule_is_always_visible() {
        let config = schedule(false, TEST_INVALID_TIMEZONE, ManualOverride::Auto);
        let result = evaluate(&config, instant(TEST_CHICAGO_TUESDAY_NOON));

        assert!(result.scheduled_visible);
        assert_eq!(result.override_applied, OverrideApplied::None);
        assert_eq!(result.checked_weekday, None);
    }

    #[test]
    fn test_enabled_schedule_follows_zone_weekday() {
        let config = schedule(true, "America/Chicago", ManualOverride::Auto);

        let monday = evaluate(&config, instant(TEST_CHICAGO_MONDAY_NOON));
        assert!(monday.scheduled_visible);
        assert_eq!(
            monday.checked_weekday.map(|w| w.source),
            Some(WeekdaySource::Zone(chrono_tz::America::Chicago))
        );

        assert!(!evaluate(&config, instant(TEST_CHICAGO_TUESDAY_NOON)).scheduled_visible);
        assert!(!evaluate(&config, instant(TEST_UTC_MONDAY_CHICAGO_SUNDAY)).scheduled_visible);
        assert!(evaluate(&config, instant(TEST_UTC_TUESDAY_CHICAGO_MONDAY)).scheduled_visible);
    }

    #[test]
    fn test_visible_days_never_changes_verdict() {
        let tuesday = instant(TEST_CHICAGO_TUESDAY_NOON);
        for visible_days in [VisibleDays::Monday, VisibleDays::Always, VisibleDays::Custom] {
            let config = ScheduleConfig {
                visible_days,
                ..schedule(true, "America/Chicago", ManualOverride::Auto)
            };
            assert!(
                !evaluate(&config, tuesday).scheduled_visible,
                "{visible_days:?} should still be Monday-only"
            );
        }
    }

    #[test]
    fn test_empty_timezone_uses_default_zone() {
        let config = schedule(true, "   ", ManualOverride::Auto);
        assert_eq!(config.effective_timezone(), DEFAULT_TIMEZONE);

        // Monday in UTC, Sunday in the default zone
        let result = evaluate(&config, instant(TEST_UTC_MONDAY_CHICAGO_SUNDAY));
        assert!(!result.scheduled_visible);
    }

    #[test]
    fn test_invalid_timezone_still_produces_result() {
        let config = schedule(true, TEST_INVALID_TIMEZONE, ManualOverride::Auto);
        let at = instant(TEST_CHICAGO_MONDAY_NOON);
        let result = evaluate(&config, at);

        let resolved = result.checked_weekday.expect("weekday rule decided");
        assert!(resolved.is_fallback());
        assert_eq!(result.scheduled_visible, resolved.weekday == Weekday::Mon);
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let config = schedule(true, "Europe/Berlin", ManualOverride::Auto);
        let at = instant(TEST_UTC_TUESDAY_CHICAGO_MONDAY);
        assert_eq!(evaluate(&config, at), evaluate(&config, at));
    }

    #[test]
    fn test_quiet_evaluation_agrees() {
        let at = instant(TEST_UTC_MONDAY_CHICAGO_SUNDAY);
        for zone in ["America/Chicago", TEST_INVALID_TIMEZONE] {
            for manual_override in [ManualOverride::Auto, ManualOverride::ForceHide] {
                let config = schedule(true, zone, manual_override);
                assert_eq!(evaluate_quietly(&config, at), evaluate(&config, at));
            }
        }
    }

    #[test]
    fn test_enum_names_match_config_keys() {
        assert_eq!(ManualOverride::ForceShow.as_str(), "ForceShow");
        assert_eq!(VisibleDays::Custom.as_str(), "Custom");
        assert_eq!(OverrideApplied::None.to_string(), "None");
    }
}
