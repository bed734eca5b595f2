//! Watch command: the long-running banner process.
//!
//! Holds the instance lock, prints the current banner, and then blocks on one
//! channel fed by the config watcher and the signal listener. The banner state
//! is only touched from this loop. There is no timer: the weekday is re-resolved
//! when a reload arrives, never by polling.

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::sync::atomic::Ordering;

use crate::common::utils::private_path;
use crate::config::{self, Config};
use crate::io::lock;
use crate::io::signals::{SignalMessage, setup_signal_handler};
use crate::state::{BannerState, BannerView, RenderState, ToggleOutcome};
use crate::time_source::{self, RealTimeSource};

/// Configuration and decision state owned by the watch loop.
pub struct WatchSession {
    config: Config,
    state: BannerState,
}

impl WatchSession {
    pub fn new(config: Config, now: DateTime<Utc>) -> Self {
        let state = BannerState::from_config(&config, now);
        Self { config, state }
    }

    pub fn view(&self, now: DateTime<Utc>) -> BannerView {
        BannerView::build(&self.state, &self.config.content(), now)
    }

    pub fn render_state(&self) -> RenderState {
        self.state.render_state()
    }

    /// Swap in a freshly loaded configuration and re-evaluate.
    ///
    /// Returns true when the render state changed.
    pub fn apply_reload(&mut self, config: Config, now: DateTime<Utc>) -> bool {
        let before = self.state.render_state();
        let after = self.state.apply_config(&config, now);
        self.config = config;
        before != after
    }

    pub fn toggle(&mut self) -> ToggleOutcome {
        self.state.toggle_collapse()
    }
}

pub fn handle_watch_command(debug_enabled: bool) -> Result<()> {
    log_version!();

    let instance_lock = lock::acquire_lock()?;
    if debug_enabled {
        log_pipe!();
        log_debug!("Lock acquired at {}", private_path(instance_lock.path()));
    }

    time_source::init_time_source(Arc::new(RealTimeSource));

    let config_path = Config::get_config_path()?;
    let initial_config = Config::load()?;
    initial_config.log_config();

    let signal_state = setup_signal_handler(debug_enabled)?;
    if let Err(e) = config::start_config_watcher(
        signal_state.signal_sender.clone(),
        config_path.clone(),
        debug_enabled,
    ) {
        log_pipe!();
        log_warning!("Configuration changes will not be picked up automatically: {e}");
    }

    let mut session = WatchSession::new(initial_config, time_source::now());
    super::log_banner_view(&session.view(time_source::now()));

    while signal_state.running.load(Ordering::SeqCst) {
        let Ok(message) = signal_state.signal_receiver.recv() else {
            break;
        };

        match message {
            SignalMessage::Reload => match Config::load_from_path(&config_path) {
                Ok(new_config) => {
                    let now = time_source::now();
                    if session.apply_reload(new_config, now) {
                        super::log_banner_view(&session.view(now));
                    } else {
                        log_block_start!(
                            "Configuration reloaded, banner unchanged ({})",
                            session.render_state()
                        );
                    }
                }
                Err(e) => {
                    log_pipe!();
                    log_warning!("Keeping previous configuration: {e:#}");
                }
            },
            SignalMessage::Toggle => match session.toggle() {
                ToggleOutcome::Toggled(_) => {
                    super::log_banner_view(&session.view(time_source::now()));
                }
                ToggleOutcome::Ignored(reason) => {
                    log_pipe!();
                    log_info!("Toggle ignored: {reason}");
                }
            },
            SignalMessage::Shutdown => break,
        }
    }

    log_block_start!("Shutting down...");
    drop(instance_lock);
    log_end!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loading::parse_config;
    use crate::state::IgnoredToggle;
    use chrono::TimeZone;

    fn monday_noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 18, 0, 0).unwrap()
    }

    #[test]
    fn test_reload_reports_render_state_changes() {
        let mut session = WatchSession::new(Config::default(), monday_noon());
        assert_eq!(session.render_state(), RenderState::FullyExpanded);

        let hide = parse_config("manual_override = \"ForceHide\"\n").unwrap();
        assert!(session.apply_reload(hide.clone(), monday_noon()));
        assert_eq!(session.render_state(), RenderState::FullyHidden);

        assert!(!session.apply_reload(hide, monday_noon()));
    }

    #[test]
    fn test_reload_re_resolves_weekday() {
        let mut session = WatchSession::new(Config::default(), monday_noon());
        let tuesday = Utc.with_ymd_and_hms(2024, 1, 16, 18, 0, 0).unwrap();

        assert!(session.apply_reload(Config::default(), tuesday));
        assert_eq!(session.render_state(), RenderState::FullyHidden);
    }

    #[test]
    fn test_toggle_survives_unrelated_reload() {
        let mut session = WatchSession::new(Config::default(), monday_noon());
        assert_eq!(
            session.toggle(),
            ToggleOutcome::Toggled(RenderState::UserCollapsed)
        );

        let retitled = parse_config("title_text = \"Week ahead\"\n").unwrap();
        assert!(!session.apply_reload(retitled, monday_noon()));
        assert_eq!(session.render_state(), RenderState::UserCollapsed);
        assert_eq!(
            session.view(monday_noon()).text.as_deref(),
            Some("Week ahead")
        );
    }

    #[test]
    fn test_toggle_ignored_when_disallowed() {
        let config = parse_config("allow_collapse = false\n").unwrap();
        let mut session = WatchSession::new(config, monday_noon());
        assert_eq!(
            session.toggle(),
            ToggleOutcome::Ignored(IgnoredToggle::CollapseDisallowed)
        );
    }
}
