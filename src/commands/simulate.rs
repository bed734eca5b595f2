//! Simulate command: step a simulated clock through a time range.
//!
//! The banner state is created once at the start instant and then refreshed at
//! every step, the same way a host re-mount would refresh it. Only changes of the
//! render state are logged, so a week-long run prints a handful of lines.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::sync::Arc;

use crate::common::constants::*;
use crate::config::Config;
use crate::state::{BannerContent, BannerState, BannerView};
use crate::time_source::{self, SimulatedTimeSource};

/// A render-state change observed during a simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub at: DateTime<Utc>,
    pub view: BannerView,
}

pub fn handle_simulate_command(
    start_time: &str,
    end_time: &str,
    step_minutes: i64,
    debug_enabled: bool,
) -> Result<()> {
    log_version!();

    let step = simulation_step(step_minutes)?;
    let config = Config::load()?;
    let schedule = config.schedule();

    let start = super::parse_instant(start_time, &schedule)?;
    let end = super::parse_instant(end_time, &schedule)?;
    if end <= start {
        anyhow::bail!("End time must be after start time");
    }

    let steps = (end - start).num_minutes() / step.num_minutes();
    if steps > MAXIMUM_SIMULATION_STEPS as i64 {
        anyhow::bail!(
            "Simulation would take {steps} steps (maximum {MAXIMUM_SIMULATION_STEPS}); use a larger --step"
        );
    }

    time_source::init_time_source(Arc::new(SimulatedTimeSource::new(start)));

    log_block_start!("Simulation Mode");
    log_indented!("From: {}", start.format("%Y-%m-%d %H:%M:%S UTC"));
    log_indented!("To: {}", end.format("%Y-%m-%d %H:%M:%S UTC"));
    log_indented!("Step: {step_minutes} minutes ({steps} steps)");
    if debug_enabled {
        config.log_config();
    }

    let content = config.content();
    // Reports an unknown time zone once; the steps below resolve it quietly
    let mut state = BannerState::from_config(&config, start);
    super::log_banner_view(&BannerView::build(&state, &content, start));

    let transitions = simulate_transitions(&mut state, &content, start, end, step);

    for transition in &transitions {
        // Move the clock so the log prefix shows when the change happened
        time_source::advance(transition.at - time_source::now());
        super::log_banner_view(&transition.view);
    }

    log_block_start!("Simulation complete: {} state changes", transitions.len());
    log_end!();
    Ok(())
}

fn simulation_step(step_minutes: i64) -> Result<ChronoDuration> {
    if step_minutes <= 0 {
        anyhow::bail!("--step must be a positive number of minutes");
    }
    ChronoDuration::try_minutes(step_minutes).context("--step is too large")
}

/// Refresh `state` at every step after `start` up to and including `end`,
/// collecting the views at which the render state changed.
///
/// An unrecognized time zone is not reported again at each step.
pub fn simulate_transitions(
    state: &mut BannerState,
    content: &BannerContent,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    step: ChronoDuration,
) -> Vec<Transition> {
    let mut transitions = Vec::new();
    if step <= ChronoDuration::zero() {
        return transitions;
    }

    let mut previous = state.render_state();
    let mut at = start;
    while let Some(next) = at.checked_add_signed(step).filter(|next| *next <= end) {
        at = next;
        let current = state.refresh_quietly(at);
        if current != previous {
            transitions.push(Transition {
                at,
                view: BannerView::build(state, content, at),
            });
            previous = current;
        }
    }

    transitions
}
