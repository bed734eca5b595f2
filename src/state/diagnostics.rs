//! Diagnostic report for banner troubleshooting.
//!
//! Lists every input to the decision next to the derived values so an editor can
//! see why a banner is or is not showing. The report is internal-only: in the
//! fully hidden state it replaces the (empty) normal output and is never meant
//! for end users.

use chrono::{DateTime, Local, Utc};
use std::fmt::Write;

use super::display::{BannerContent, normalize_image_url};
use super::{BannerState, RenderState};
use crate::timezone::{WeekdaySource, try_weekday_in, weekday_name};

pub fn diagnostic_report(state: &BannerState, content: &BannerContent, now: DateTime<Utc>) -> String {
    let schedule = state.schedule();
    let display = state.display();
    let evaluation = state.evaluation();
    let timezone = schedule.effective_timezone();

    let weekday_line = match evaluation.checked_weekday {
        Some(resolved) => match resolved.source {
            WeekdaySource::Zone(tz) => format!("{} (in {tz})", weekday_name(resolved.weekday)),
            WeekdaySource::LocalFallback => {
                format!("{} (local fallback)", weekday_name(resolved.weekday))
            }
        },
        // Not consulted by the verdict, computed for reference only
        None => match try_weekday_in(timezone, now) {
            Ok(weekday) => format!("{} (not consulted)", weekday_name(weekday)),
            Err(_) => "unknown time zone (not consulted)".to_string(),
        },
    };

    let mut report = String::new();
    let mut line = |label: &str, value: &dyn std::fmt::Display| {
        let _ = writeln!(report, "{label}: {value}");
    };

    line("Diagnostics", &"On");
    line(
        "Time (Local)",
        &now.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S %Z"),
    );
    line("Time Zone", &timezone);
    line("Manual Override", &schedule.manual_override.as_str());
    line("Applied Override", &evaluation.override_applied);
    line("Schedule Enabled", &schedule.schedule_enabled);
    line("Visible Days", &schedule.visible_days.as_str());
    line("Weekday (Calc)", &weekday_line);
    line("Scheduled Visible", &evaluation.scheduled_visible);
    line("Hide Mode", &display.hide_mode.as_str());
    line("Allow Collapse", &display.allow_collapse);
    line("Default Collapsed", &display.default_collapsed);
    line("Current Collapsed", &state.is_collapsed());
    line("Render State", &state.render_state());
    line(
        "Header URL (Raw)",
        &content.header_image_url.as_deref().unwrap_or(""),
    );
    line(
        "Header URL (Norm)",
        &normalize_image_url(content.header_image_url.as_deref()).unwrap_or_default(),
    );

    if state.render_state() == RenderState::FullyHidden {
        report.push_str("HIDDEN (internal diagnostic view)\n");
    }

    report
}
