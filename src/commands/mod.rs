//! Command handlers for bannerwatch.
//!
//! Each command lives in its own submodule. The helpers here are shared by the
//! commands that print a banner view.

pub mod control;
pub mod help;
pub mod simulate;
pub mod status;
pub mod watch;

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::schedule::ScheduleConfig;
use crate::state::{BannerView, CollapseAffordance};
use crate::time_source;
use crate::timezone::parse_timezone;

/// Parse a user-supplied instant.
///
/// RFC 3339 timestamps carry their own offset. `YYYY-MM-DD HH:MM:SS` is read as
/// wall-clock time in the schedule's time zone, or local time when that zone is
/// not recognized.
pub(crate) fn parse_instant(input: &str, schedule: &ScheduleConfig) -> Result<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(input.trim()) {
        return Ok(instant.with_timezone(&Utc));
    }

    let parsed = match parse_timezone(schedule.effective_timezone()) {
        Ok(tz) => time_source::parse_datetime_in_tz(input, tz),
        Err(_) => time_source::parse_datetime(input),
    };
    parsed.map_err(|e| anyhow::anyhow!("Invalid time '{input}': {e}"))
}

/// Log a banner view as an indented block.
pub(crate) fn log_banner_view(view: &BannerView) {
    log_block_start!("Banner: {}", view.state);

    match &view.text {
        Some(text) => log_indented!("Text: {text}"),
        None => log_indented!("Nothing is rendered"),
    }
    if let Some(affordance) = view.affordance {
        log_indented!(
            "Control: {}",
            match affordance {
                CollapseAffordance::Expand => "expand",
                CollapseAffordance::Collapse => "collapse",
            }
        );
    }
    if let Some(url) = &view.header_image_url {
        log_indented!("Header image: {url}");
    }
    if let Some(body) = &view.body {
        if let Some(quote) = &body.quote {
            log_indented!("Quote: {quote}");
        }
        if let Some(header) = &body.reflection_header {
            log_indented!("Reflection: {header}");
        }
        if let Some(text) = &body.reflection_text {
            log_indented!("  {text}");
        }
        if let Some(link) = &body.core_behavior {
            match &link.url {
                Some(url) => log_indented!("Core behavior: {} <{url}>", link.text),
                None => log_indented!("Core behavior: {}", link.text),
            }
        }
        if let Some(image) = &body.mid_image {
            log_indented!("Mid image: {}", image.url);
        }
        for signature in &body.signatures {
            match &signature.title {
                Some(title) => log_indented!("Signed: {}, {title}", signature.name),
                None => log_indented!("Signed: {}", signature.name),
            }
        }
        if let Some(image) = &body.footer_image {
            log_indented!("Footer image: {}", image.url);
        }
    }

    if let Some(report) = &view.diagnostics {
        log_block_start!("Diagnostics");
        for line in report.lines() {
            log_indented!("{line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn schedule(timezone: &str) -> ScheduleConfig {
        ScheduleConfig {
            timezone: timezone.to_string(),
            ..crate::config::Config::default().schedule()
        }
    }

    #[test]
    fn test_parse_instant_uses_schedule_zone() {
        let instant = parse_instant("2024-01-15 12:00:00", &schedule("America/Chicago")).unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2024, 1, 15, 18, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_instant_rfc3339_ignores_zone() {
        let instant = parse_instant("2024-01-15T03:00:00Z", &schedule("Asia/Tokyo")).unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2024, 1, 15, 3, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_instant_rejects_garbage() {
        assert!(parse_instant("next monday", &schedule("America/Chicago")).is_err());
    }
}
