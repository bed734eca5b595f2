//! Status command: evaluate once and print the banner view.

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::common::constants::*;
use crate::common::logger::Log;
use crate::config::Config;
use crate::state::{BannerState, BannerView, RenderState};
use crate::time_source::{self, RealTimeSource, SimulatedTimeSource};

/// Evaluate the banner once and print it.
///
/// With `at`, evaluation happens at that instant instead of now. Returns the exit
/// code: `EXIT_BANNER_HIDDEN` when nothing would be rendered, so scripts can test
/// visibility without parsing output.
pub fn handle_status_command(json: bool, at: Option<&str>, debug_enabled: bool) -> Result<i32> {
    if json {
        Log::set_enabled(false);
    } else {
        log_version!();
    }

    let config = Config::load()?;
    let schedule = config.schedule();

    match at {
        Some(input) => {
            let instant = super::parse_instant(input, &schedule)?;
            time_source::init_time_source(Arc::new(SimulatedTimeSource::new(instant)));
        }
        None => time_source::init_time_source(Arc::new(RealTimeSource)),
    }
    let now = time_source::now();

    let state = BannerState::from_config(&config, now);
    let view = BannerView::build(&state, &config.content(), now);

    if json {
        let output = serde_json::to_string_pretty(&view).context("Failed to serialize status")?;
        println!("{output}");
    } else {
        if debug_enabled {
            config.log_config();
        }
        super::log_banner_view(&view);
        log_end!();
    }

    Ok(exit_code_for(view.state))
}

fn exit_code_for(state: RenderState) -> i32 {
    match state {
        RenderState::FullyHidden => EXIT_BANNER_HIDDEN,
        _ => EXIT_SUCCESS,
    }
}
