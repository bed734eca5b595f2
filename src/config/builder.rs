//! Default configuration file generation.
//!
//! Writes a commented `bannerwatch.toml` with every setting at its default value.
//! Comments are column-aligned across the whole file so the generated file stays
//! tidy when default values change.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::common::constants::*;

/// Create the default config file at `path`, creating parent directories.
pub fn create_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    fs::write(path, default_config_content())
        .with_context(|| format!("Failed to write default config to {}", path.display()))
}

/// Text of the default configuration file.
pub fn default_config_content() -> String {
    let mut content = ConfigBuilder::new()
        .add_section("Schedule")
        .add_setting(
            "schedule_enabled",
            &DEFAULT_SCHEDULE_ENABLED.to_string(),
            "Only show the banner on scheduled days",
        )
        .add_setting(
            "timezone",
            &quoted(DEFAULT_TIMEZONE),
            "IANA time zone the schedule follows",
        )
        .add_setting(
            "visible_days",
            &quoted(DEFAULT_VISIBLE_DAYS.as_str()),
            "\"Monday\" | \"Always\" | \"Custom\" (schedule is Monday-only)",
        )
        .add_setting(
            "manual_override",
            &quoted(DEFAULT_MANUAL_OVERRIDE.as_str()),
            "\"Auto\" | \"ForceShow\" | \"ForceHide\"",
        )
        .add_section("Display")
        .add_setting(
            "hide_mode",
            &quoted(DEFAULT_HIDE_MODE.as_str()),
            "Off schedule: \"Hidden\" | \"Collapsed\" (expired stub)",
        )
        .add_setting(
            "allow_collapse",
            &DEFAULT_ALLOW_COLLAPSE.to_string(),
            "Let viewers collapse the banner",
        )
        .add_setting(
            "default_collapsed",
            &DEFAULT_DEFAULT_COLLAPSED.to_string(),
            "Start collapsed (needs allow_collapse)",
        )
        .add_section("Content")
        .add_setting(
            "title_text",
            &quoted(FALLBACK_TITLE),
            "Banner title",
        )
        .add_setting(
            "collapsed_label",
            &quoted(""),
            "Collapsed banner text (empty = title)",
        )
        .add_setting(
            "header_image_url",
            &quoted(""),
            "Header image, SharePoint links get download=1",
        )
        .add_setting(
            "header_image_alt",
            &quoted(""),
            "Header image alt text (empty = \"Header\")",
        )
        .add_setting(
            "diagnostics",
            &DEFAULT_DIAGNOSTICS.to_string(),
            "Attach the internal diagnostic report",
        )
        .add_section("Body")
        .add_setting("quote_text", &quoted(""), "Quote under the header")
        .add_setting("reflection_header", &quoted(""), "Reflection heading")
        .add_setting("reflection_text", &quoted(""), "Reflection paragraph")
        .add_setting("core_behavior_text", &quoted(""), "Core behavior of the week")
        .add_setting(
            "core_behavior_url",
            &quoted(""),
            "Core behavior link (text falls back to it)",
        )
        .add_section("Signatures")
        .add_setting("sig_left_name", &quoted(""), "Left signature, omitted without a name")
        .add_setting("sig_left_title", &quoted(""), "Left signer's title")
        .add_setting("sig_right_name", &quoted(""), "Right signature, omitted without a name")
        .add_setting("sig_right_title", &quoted(""), "Right signer's title")
        .add_section("Images")
        .add_setting("mid_image_url", &quoted(""), "Image between body and signatures")
        .add_setting("mid_image_alt", &quoted(""), "Mid image alt text")
        .add_setting("footer_image_url", &quoted(""), "Image at the bottom")
        .add_setting("footer_image_alt", &quoted(""), "Footer image alt text")
        .build();
    content.push('\n');
    content
}

fn quoted(value: &str) -> String {
    format!("\"{value}\"")
}

/// Builder for config text with aligned trailing comments.
struct ConfigBuilder {
    entries: Vec<ConfigEntry>,
}

enum ConfigEntry {
    Section(String),
    Setting { line: String, comment: String },
}

impl ConfigBuilder {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn add_section(mut self, title: &str) -> Self {
        self.entries.push(ConfigEntry::Section(format!("#[{title}]")));
        self
    }

    fn add_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        self.entries.push(ConfigEntry::Setting {
            line: format!("{key} = {value}"),
            comment: format!("# {comment}"),
        });
        self
    }

    fn build(self) -> String {
        let column = self
            .entries
            .iter()
            .filter_map(|entry| match entry {
                ConfigEntry::Setting { line, .. } => Some(line.len()),
                ConfigEntry::Section(_) => None,
            })
            .max()
            .unwrap_or(0)
            + 1;

        let mut lines = Vec::new();
        for entry in self.entries {
            match entry {
                ConfigEntry::Section(header) => {
                    if !lines.is_empty() {
                        lines.push(String::new());
                    }
                    lines.push(header);
                }
                ConfigEntry::Setting { line, comment } => {
                    let padding = " ".repeat(column - line.len());
                    lines.push(format!("{line}{padding}{comment}"));
                }
            }
        }

        lines.join("\n")
    }
}
