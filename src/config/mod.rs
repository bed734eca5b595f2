//! Configuration system for bannerwatch.
//!
//! Settings live in `bannerwatch.toml`, found in the directory given with
//! `--config <dir>` or in `$XDG_CONFIG_HOME/bannerwatch/`. A commented default file
//! is created the first time bannerwatch runs without one.
//!
//! ```toml
//! #[Schedule]
//! schedule_enabled = true           # Only show the banner on scheduled days
//! timezone = "America/Chicago"      # IANA time zone the schedule follows
//! visible_days = "Monday"           # "Monday", "Always" or "Custom" (schedule is Monday-only)
//! manual_override = "Auto"          # "Auto", "ForceShow" or "ForceHide"
//!
//! #[Display]
//! hide_mode = "Hidden"              # Off-schedule: "Hidden" or "Collapsed" (expired stub)
//! allow_collapse = true             # Let viewers collapse the banner
//! default_collapsed = false         # Start collapsed
//!
//! #[Content]
//! title_text = "Monday Message"
//! collapsed_label = ""
//! header_image_url = ""
//! header_image_alt = ""
//! diagnostics = false
//!
//! #[Body]
//! quote_text = ""
//! reflection_header = ""
//! reflection_text = ""
//! core_behavior_text = ""
//! core_behavior_url = ""                # Link text falls back to the URL
//!
//! #[Signatures]
//! sig_left_name = ""
//! sig_left_title = ""
//! sig_right_name = ""
//! sig_right_title = ""
//!
//! #[Images]
//! mid_image_url = ""
//! mid_image_alt = ""
//! footer_image_url = ""
//! footer_image_alt = ""
//! ```
//!
//! Body, signature and image fields only appear while the banner is fully
//! expanded.
//!
//! Every field is optional; missing fields take the defaults from
//! `common::constants`. Loading never fails because of an unknown time zone: that
//! only produces a warning, matching how evaluation falls back to local time.

pub mod builder;
pub mod loading;
pub mod validation;
pub mod watcher;

use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::common::constants::*;
use crate::schedule::{ManualOverride, ScheduleConfig, VisibleDays};
use crate::state::{BannerContent, DisplayConfig, HideMode};

pub use builder::create_default_config;
pub use loading::{get_config_path, get_custom_config_dir, load, load_from_path, set_config_dir};
pub use watcher::start_config_watcher;

/// Settings loaded from `bannerwatch.toml`.
///
/// ## Configuration Categories
///
/// - **Schedule**: `schedule_enabled`, `timezone`, `visible_days`, `manual_override`
/// - **Display**: `hide_mode`, `allow_collapse`, `default_collapsed`
/// - **Content**: `title_text`, `collapsed_label`, `header_image_url`, `header_image_alt`,
///   `diagnostics`
/// - **Body**: `quote_text`, `reflection_header`, `reflection_text`, `core_behavior_text`,
///   `core_behavior_url`
/// - **Signatures**: `sig_left_name`, `sig_left_title`, `sig_right_name`, `sig_right_title`
/// - **Images**: `mid_image_url`, `mid_image_alt`, `footer_image_url`, `footer_image_alt`
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// When false the banner ignores the weekday rule and is always scheduled.
    pub schedule_enabled: Option<bool>,
    pub timezone: Option<String>,
    /// Accepted for compatibility; an enabled schedule is Monday-only regardless.
    pub visible_days: Option<VisibleDays>,
    pub manual_override: Option<ManualOverride>,

    pub hide_mode: Option<HideMode>,
    pub allow_collapse: Option<bool>,
    pub default_collapsed: Option<bool>,

    pub title_text: Option<String>,
    pub collapsed_label: Option<String>,
    pub header_image_url: Option<String>,
    pub header_image_alt: Option<String>,
    /// Attach the internal diagnostic report to every view.
    pub diagnostics: Option<bool>,

    pub quote_text: Option<String>,
    pub reflection_header: Option<String>,
    pub reflection_text: Option<String>,
    pub core_behavior_text: Option<String>,
    pub core_behavior_url: Option<String>,

    pub sig_left_name: Option<String>,
    pub sig_left_title: Option<String>,
    pub sig_right_name: Option<String>,
    pub sig_right_title: Option<String>,

    pub mid_image_url: Option<String>,
    pub mid_image_alt: Option<String>,
    pub footer_image_url: Option<String>,
    pub footer_image_alt: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        loading::load()
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        loading::load_from_path(path)
    }

    pub fn get_config_path() -> Result<PathBuf> {
        loading::get_config_path()
    }

    pub fn create_default_config(path: &Path) -> Result<()> {
        builder::create_default_config(path)
    }

    /// Schedule inputs with defaults filled in.
    pub fn schedule(&self) -> ScheduleConfig {
        ScheduleConfig {
            schedule_enabled: self.schedule_enabled.unwrap_or(DEFAULT_SCHEDULE_ENABLED),
            timezone: self
                .timezone
                .clone()
                .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string()),
            visible_days: self.visible_days.unwrap_or(DEFAULT_VISIBLE_DAYS),
            manual_override: self.manual_override.unwrap_or(DEFAULT_MANUAL_OVERRIDE),
        }
    }

    /// Display inputs with defaults filled in.
    pub fn display(&self) -> DisplayConfig {
        DisplayConfig {
            hide_mode: self.hide_mode.unwrap_or(DEFAULT_HIDE_MODE),
            allow_collapse: self.allow_collapse.unwrap_or(DEFAULT_ALLOW_COLLAPSE),
            default_collapsed: self.default_collapsed.unwrap_or(DEFAULT_DEFAULT_COLLAPSED),
        }
    }

    pub fn content(&self) -> BannerContent {
        BannerContent {
            title_text: self.title_text.clone(),
            collapsed_label: self.collapsed_label.clone(),
            header_image_url: self.header_image_url.clone(),
            header_image_alt: self.header_image_alt.clone(),
            quote_text: self.quote_text.clone(),
            reflection_header: self.reflection_header.clone(),
            reflection_text: self.reflection_text.clone(),
            core_behavior_text: self.core_behavior_text.clone(),
            core_behavior_url: self.core_behavior_url.clone(),
            sig_left_name: self.sig_left_name.clone(),
            sig_left_title: self.sig_left_title.clone(),
            sig_right_name: self.sig_right_name.clone(),
            sig_right_title: self.sig_right_title.clone(),
            mid_image_url: self.mid_image_url.clone(),
            mid_image_alt: self.mid_image_alt.clone(),
            footer_image_url: self.footer_image_url.clone(),
            footer_image_alt: self.footer_image_alt.clone(),
            diagnostics_enabled: self.diagnostics.unwrap_or(DEFAULT_DIAGNOSTICS),
        }
    }

    /// Log the effective configuration as an indented block.
    pub fn log_config(&self) {
        let schedule = self.schedule();
        let display = self.display();
        let content = self.content();

        log_block_start!("Loaded configuration");

        if !schedule.schedule_enabled {
            log_indented!("Schedule: disabled (always visible)");
        } else {
            log_indented!(
                "Schedule: Monday in {} (visible days: {})",
                schedule.effective_timezone(),
                schedule.visible_days.as_str()
            );
        }
        if schedule.manual_override != ManualOverride::Auto {
            log_indented!("Manual override: {}", schedule.manual_override.as_str());
        }

        log_indented!("Hide mode: {}", display.hide_mode.as_str());
        if display.allow_collapse {
            log_indented!(
                "Collapse: allowed, starts {}",
                if display.default_collapsed {
                    "collapsed"
                } else {
                    "expanded"
                }
            );
        } else {
            log_indented!("Collapse: disabled");
        }

        if let Some(title) = content.title_text.as_deref().filter(|t| !t.is_empty()) {
            log_indented!("Title: {title}");
        }
        if content.diagnostics_enabled {
            log_indented!("Diagnostics: on");
        }
    }
}
