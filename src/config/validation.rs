//! Configuration validation.
//!
//! Only text length is fatal. Everything that could make a banner behave
//! unexpectedly but still deterministically is reported as a warning: an
//! unrecognized time zone (evaluation falls back to local time), day rules that
//! the schedule does not implement, and collapse defaults that cannot apply.

use anyhow::Result;

use super::Config;
use crate::common::constants::*;
use crate::schedule::VisibleDays;
use crate::timezone::parse_timezone;

/// A non-fatal configuration problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    UnknownTimezone(String),
    CustomDaysUnimplemented,
    AlwaysDaysIgnored,
    DefaultCollapsedWithoutCollapse,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigWarning::UnknownTimezone(tz) => write!(
                f,
                "timezone '{tz}' is not a recognized IANA zone; the local weekday will be used"
            ),
            ConfigWarning::CustomDaysUnimplemented => write!(
                f,
                "visible_days = \"Custom\" is not implemented and behaves like \"Monday\""
            ),
            ConfigWarning::AlwaysDaysIgnored => write!(
                f,
                "visible_days = \"Always\" does not bypass the schedule; set schedule_enabled = false to show the banner every day"
            ),
            ConfigWarning::DefaultCollapsedWithoutCollapse => write!(
                f,
                "default_collapsed has no effect while allow_collapse = false"
            ),
        }
    }
}

/// Validate a parsed configuration, logging any warnings.
pub fn validate_config(config: &Config) -> Result<()> {
    let text_fields = [
        ("title_text", &config.title_text),
        ("collapsed_label", &config.collapsed_label),
        ("header_image_url", &config.header_image_url),
        ("header_image_alt", &config.header_image_alt),
        ("quote_text", &config.quote_text),
        ("reflection_header", &config.reflection_header),
        ("reflection_text", &config.reflection_text),
        ("core_behavior_text", &config.core_behavior_text),
        ("core_behavior_url", &config.core_behavior_url),
        ("sig_left_name", &config.sig_left_name),
        ("sig_left_title", &config.sig_left_title),
        ("sig_right_name", &config.sig_right_name),
        ("sig_right_title", &config.sig_right_title),
        ("mid_image_url", &config.mid_image_url),
        ("mid_image_alt", &config.mid_image_alt),
        ("footer_image_url", &config.footer_image_url),
        ("footer_image_alt", &config.footer_image_alt),
        ("timezone", &config.timezone),
    ];
    for (name, value) in text_fields {
        if let Some(value) = value
            && value.chars().count() > MAXIMUM_TEXT_LENGTH
        {
            anyhow::bail!(
                "{} is {} characters long (maximum {})",
                name,
                value.chars().count(),
                MAXIMUM_TEXT_LENGTH
            );
        }
    }

    let warnings = collect_warnings(config);
    if !warnings.is_empty() {
        log_pipe!();
        for warning in &warnings {
            log_warning!("{warning}");
        }
    }

    Ok(())
}

/// All non-fatal problems in a configuration.
pub fn collect_warnings(config: &Config) -> Vec<ConfigWarning> {
    let schedule = config.schedule();
    let display = config.display();
    let mut warnings = Vec::new();

    if schedule.schedule_enabled {
        let timezone = schedule.effective_timezone();
        if parse_timezone(timezone).is_err() {
            warnings.push(ConfigWarning::UnknownTimezone(timezone.to_string()));
        }

        match schedule.visible_days {
            VisibleDays::Custom => warnings.push(ConfigWarning::CustomDaysUnimplemented),
            VisibleDays::Always => warnings.push(ConfigWarning::AlwaysDaysIgnored),
            VisibleDays::Monday => {}
        }
    }

    if display.default_collapsed && !display.allow_collapse {
        warnings.push(ConfigWarning::DefaultCollapsedWithoutCollapse);
    }

    warnings
}
