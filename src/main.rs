//! Entry point: parse arguments and dispatch to a command.

use anyhow::Result;

use bannerwatch::args::{self, CliAction, ParsedArgs};
use bannerwatch::commands;
use bannerwatch::common::constants::{EXIT_FAILURE, EXIT_SUCCESS};
use bannerwatch::config;
use bannerwatch::common::logger::Log;
use bannerwatch::log_error_exit;

fn main() {
    let exit_code = match run(ParsedArgs::from_env().action) {
        Ok(code) => code,
        Err(e) => {
            // JSON output silences the logger; errors are always shown
            Log::set_enabled(true);
            log_error_exit!("{e:#}");
            EXIT_FAILURE
        }
    };
    std::process::exit(exit_code);
}

fn run(action: CliAction) -> Result<i32> {
    match action {
        CliAction::ShowVersion => {
            args::display_version_info();
            Ok(EXIT_SUCCESS)
        }
        CliAction::ShowHelp => {
            args::display_help();
            Ok(EXIT_SUCCESS)
        }
        CliAction::ShowHelpDueToError => {
            args::display_help();
            Ok(EXIT_FAILURE)
        }
        CliAction::Help(command) => {
            commands::help::run_help_command(command.as_deref());
            Ok(EXIT_SUCCESS)
        }
        CliAction::Watch {
            debug_enabled,
            config_dir,
        } => {
            config::set_config_dir(config_dir)?;
            commands::watch::handle_watch_command(debug_enabled)?;
            Ok(EXIT_SUCCESS)
        }
        CliAction::Status {
            debug_enabled,
            config_dir,
            json,
            at,
        } => {
            config::set_config_dir(config_dir)?;
            commands::status::handle_status_command(json, at.as_deref(), debug_enabled)
        }
        CliAction::Simulate {
            debug_enabled,
            config_dir,
            start_time,
            end_time,
            step_minutes,
        } => {
            config::set_config_dir(config_dir)?;
            commands::simulate::handle_simulate_command(
                &start_time,
                &end_time,
                step_minutes,
                debug_enabled,
            )?;
            Ok(EXIT_SUCCESS)
        }
        CliAction::Reload { debug_enabled } => {
            commands::control::handle_reload_command(debug_enabled)?;
            Ok(EXIT_SUCCESS)
        }
        CliAction::Toggle { debug_enabled } => {
            commands::control::handle_toggle_command(debug_enabled)?;
            Ok(EXIT_SUCCESS)
        }
    }
}
