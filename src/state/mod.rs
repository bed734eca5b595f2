//! Visibility and collapse state for one banner.
//!
//! [`BannerState`] combines the schedule verdict with the display configuration
//! and the collapse flag to derive one of four [`RenderState`]s. The render state
//! is never stored: it is recomputed from the three inputs on every read, so a
//! configuration change and a toggle can never leave it stale.
//!
//! ## Render states
//!
//! | verdict | hide mode | allow collapse | collapsed | state          |
//! |---------|-----------|----------------|-----------|----------------|
//! | false   | Hidden    | any            | any       | FullyHidden    |
//! | false   | Collapsed | any            | any       | ExpiredBanner  |
//! | true    | any       | true           | true      | UserCollapsed  |
//! | true    | any       | false / true   | any / false | FullyExpanded |
//!
//! ## Collapse flag
//!
//! The flag starts from `default_collapsed` (forced off when collapsing is not
//! allowed) and is reset the same way whenever `default_collapsed` or
//! `allow_collapse` changes. Between resets only [`BannerState::toggle_collapse`]
//! moves it. It is session state and is never written anywhere.

pub mod diagnostics;
pub mod display;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::Config;
use crate::schedule::{EvaluationResult, ScheduleConfig, evaluate, evaluate_quietly};

pub use display::{
    BannerBody, BannerContent, BannerView, CollapseAffordance, Image, Link, Signature,
    normalize_image_url,
};

/// What to show when the schedule verdict is false.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum HideMode {
    /// Render nothing.
    #[serde(alias = "hidden")]
    Hidden,
    /// Render a static "expired" stub.
    #[serde(alias = "collapsed")]
    Collapsed,
}

impl HideMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            HideMode::Hidden => "Hidden",
            HideMode::Collapsed => "Collapsed",
        }
    }
}

/// Display half of the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    pub hide_mode: HideMode,
    pub allow_collapse: bool,
    pub default_collapsed: bool,
}

/// The four presentations a banner can be in.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    FullyHidden,
    ExpiredBanner,
    UserCollapsed,
    FullyExpanded,
}

impl RenderState {
    /// True for the states where the schedule verdict was positive.
    pub fn is_visible(&self) -> bool {
        matches!(self, Self::UserCollapsed | Self::FullyExpanded)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::FullyHidden => "Fully hidden",
            Self::ExpiredBanner => "Expired banner",
            Self::UserCollapsed => "Collapsed",
            Self::FullyExpanded => "Expanded",
        }
    }
}

impl fmt::Display for RenderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Collapse flag plus the configuration it was last reconciled against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollapseState {
    is_collapsed: bool,
    last_applied_default: bool,
    last_allow_collapse: bool,
}

impl CollapseState {
    pub fn new(display: &DisplayConfig) -> Self {
        Self {
            is_collapsed: Self::initial_value(display),
            last_applied_default: display.default_collapsed,
            last_allow_collapse: display.allow_collapse,
        }
    }

    fn initial_value(display: &DisplayConfig) -> bool {
        display.allow_collapse && display.default_collapsed
    }

    /// Reset the flag if `default_collapsed` or `allow_collapse` changed since the
    /// last reconciliation. Returns whether a reset happened.
    pub fn reconcile(&mut self, display: &DisplayConfig) -> bool {
        if display.default_collapsed == self.last_applied_default
            && display.allow_collapse == self.last_allow_collapse
        {
            return false;
        }
        *self = Self::new(display);
        true
    }

    pub fn is_collapsed(&self) -> bool {
        self.is_collapsed
    }

    fn flip(&mut self) {
        self.is_collapsed = !self.is_collapsed;
    }
}

/// Why a toggle request changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredToggle {
    /// `allow_collapse` is off.
    CollapseDisallowed,
    /// The banner is hidden or expired, so there is nothing to collapse.
    NotVisible,
}

impl fmt::Display for IgnoredToggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IgnoredToggle::CollapseDisallowed => f.write_str("collapsing is disabled"),
            IgnoredToggle::NotVisible => f.write_str("the banner is not showing its content"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Toggled(RenderState),
    Ignored(IgnoredToggle),
}

/// Derive the render state. Pure: no input other than the three arguments.
pub fn derive_render_state(
    evaluation: &EvaluationResult,
    display: &DisplayConfig,
    collapse: &CollapseState,
) -> RenderState {
    if !evaluation.scheduled_visible {
        return match display.hide_mode {
            HideMode::Hidden => RenderState::FullyHidden,
            HideMode::Collapsed => RenderState::ExpiredBanner,
        };
    }
    if display.allow_collapse && collapse.is_collapsed() {
        RenderState::UserCollapsed
    } else {
        RenderState::FullyExpanded
    }
}

/// Decision state for a single banner.
#[derive(Debug, Clone)]
pub struct BannerState {
    schedule: ScheduleConfig,
    display: DisplayConfig,
    evaluation: EvaluationResult,
    collapse: CollapseState,
}

impl BannerState {
    pub fn new(schedule: ScheduleConfig, display: DisplayConfig, now: DateTime<Utc>) -> Self {
        let evaluation = evaluate(&schedule, now);
        Self {
            collapse: CollapseState::new(&display),
            schedule,
            display,
            evaluation,
        }
    }

    pub fn from_config(config: &Config, now: DateTime<Utc>) -> Self {
        Self::new(config.schedule(), config.display(), now)
    }

    /// Apply a (possibly) changed configuration and return the new render state.
    pub fn apply_config(&mut self, config: &Config, now: DateTime<Utc>) -> RenderState {
        self.set_schedule(config.schedule(), now);
        self.set_display(config.display());
        self.render_state()
    }

    /// Replace the schedule inputs and re-run the evaluator.
    pub fn set_schedule(&mut self, schedule: ScheduleConfig, now: DateTime<Utc>) {
        self.evaluation = evaluate(&schedule, now);
        self.schedule = schedule;
    }

    /// Replace the display inputs, resetting the collapse flag when its
    /// configuration changed.
    pub fn set_display(&mut self, display: DisplayConfig) {
        self.collapse.reconcile(&display);
        self.display = display;
    }

    /// Re-run the evaluator with unchanged inputs, as a host re-mount would.
    pub fn refresh(&mut self, now: DateTime<Utc>) -> RenderState {
        self.evaluation = evaluate(&self.schedule, now);
        self.render_state()
    }

    /// [`refresh`](Self::refresh) without the unknown time zone warning.
    pub fn refresh_quietly(&mut self, now: DateTime<Utc>) -> RenderState {
        self.evaluation = evaluate_quietly(&self.schedule, now);
        self.render_state()
    }

    /// Handle a user toggle of the collapse affordance.
    pub fn toggle_collapse(&mut self) -> ToggleOutcome {
        if !self.display.allow_collapse {
            return ToggleOutcome::Ignored(IgnoredToggle::CollapseDisallowed);
        }
        if !self.render_state().is_visible() {
            return ToggleOutcome::Ignored(IgnoredToggle::NotVisible);
        }
        self.collapse.flip();
        ToggleOutcome::Toggled(self.render_state())
    }

    pub fn render_state(&self) -> RenderState {
        derive_render_state(&self.evaluation, &self.display, &self.collapse)
    }

    pub fn evaluation(&self) -> &EvaluationResult {
        &self.evaluation
    }

    pub fn schedule(&self) -> &ScheduleConfig {
        &self.schedule
    }

    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    /// Observable collapse flag; always false while collapsing is disallowed.
    pub fn is_collapsed(&self) -> bool {
        self.display.allow_collapse && self.collapse.is_collapsed()
    }
}
