//! Command-line argument parsing.
//!
//! Arguments are parsed by hand into a [`CliAction`]. Global flags (`--debug`,
//! `--config <dir>`, `--help`, `--version`) may appear anywhere; the first
//! non-flag argument selects the command, and `watch` runs when none is given.

use crate::common::constants::DEFAULT_SIMULATION_STEP_MINUTES;

/// What the process should do after argument parsing.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Run the long-lived watch loop
    Watch {
        debug_enabled: bool,
        config_dir: Option<String>,
    },
    /// Evaluate once and print the banner view
    Status {
        debug_enabled: bool,
        config_dir: Option<String>,
        json: bool,
        at: Option<String>,
    },
    /// Step a simulated clock between two instants
    Simulate {
        debug_enabled: bool,
        config_dir: Option<String>,
        start_time: String,
        end_time: String,
        step_minutes: i64,
    },
    /// Ask the running instance to reload its configuration
    Reload { debug_enabled: bool },
    /// Ask the running instance to flip the collapse flag
    Toggle { debug_enabled: bool },
    /// Show help for one command, or the command overview
    Help(Option<String>),

    ShowHelp,
    ShowVersion,
    /// Show help because the arguments could not be parsed
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

impl ParsedArgs {
    /// Parse command-line arguments. The first item is the program name.
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        ParsedArgs {
            action: parse_action(&args_vec),
        }
    }

    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }
}

fn parse_action(args: &[String]) -> CliAction {
    let mut debug_enabled = false;
    let mut display_help = false;
    let mut display_version = false;
    let mut config_dir: Option<String> = None;
    let mut json = false;
    let mut at: Option<String> = None;
    let mut step: Option<String> = None;
    let mut positional: Vec<String> = Vec::new();

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "--help" | "-h" => display_help = true,
            "--version" | "-V" | "-v" => display_version = true,
            "--debug" | "-d" => debug_enabled = true,
            "--json" | "-j" => json = true,
            "--config" | "-c" | "--at" | "-a" | "--step" => {
                let Some(value) = args.get(i + 1).filter(|v| !v.starts_with('-')) else {
                    log_warning_standalone!("Missing value for {}", arg);
                    return CliAction::ShowHelpDueToError;
                };
                match arg {
                    "--config" | "-c" => config_dir = Some(value.clone()),
                    "--at" | "-a" => at = Some(value.clone()),
                    _ => step = Some(value.clone()),
                }
                i += 1;
            }
            _ if arg.starts_with('-') => {
                log_warning_standalone!("Unknown argument: {}", arg);
                return CliAction::ShowHelpDueToError;
            }
            _ => positional.push(args[i].clone()),
        }
        i += 1;
    }

    // Version and help take precedence over everything else
    if display_version {
        return CliAction::ShowVersion;
    }
    if display_help {
        return CliAction::ShowHelp;
    }

    let command = positional.first().map(String::as_str).unwrap_or("watch");
    let operands = positional.get(1..).unwrap_or_default();

    let flag_misused = |flag: &str, present: bool| {
        if present {
            log_warning_standalone!("{} is only valid for {}", flag, usage_for(command));
        }
        present
    };

    match command {
        "watch" | "w" => {
            if !operands.is_empty()
                || flag_misused("--json", json)
                || flag_misused("--at", at.is_some())
                || flag_misused("--step", step.is_some())
            {
                return too_many_arguments(command, operands);
            }
            CliAction::Watch {
                debug_enabled,
                config_dir,
            }
        }
        "status" | "s" => {
            if !operands.is_empty() || flag_misused("--step", step.is_some()) {
                return too_many_arguments(command, operands);
            }
            CliAction::Status {
                debug_enabled,
                config_dir,
                json,
                at,
            }
        }
        "simulate" | "S" => {
            if flag_misused("--json", json) || flag_misused("--at", at.is_some()) {
                return CliAction::ShowHelpDueToError;
            }
            let [start_time, end_time] = operands else {
                log_warning_standalone!("Usage: {}", usage_for(command));
                return CliAction::ShowHelpDueToError;
            };
            let step_minutes = match step.as_deref().map(str::parse::<i64>) {
                None => DEFAULT_SIMULATION_STEP_MINUTES,
                Some(Ok(minutes)) if minutes > 0 => minutes,
                Some(_) => {
                    log_warning_standalone!("--step must be a positive number of minutes");
                    return CliAction::ShowHelpDueToError;
                }
            };
            CliAction::Simulate {
                debug_enabled,
                config_dir,
                start_time: start_time.clone(),
                end_time: end_time.clone(),
                step_minutes,
            }
        }
        "reload" | "r" | "toggle" | "t" => {
            if !operands.is_empty()
                || flag_misused("--json", json)
                || flag_misused("--at", at.is_some())
                || flag_misused("--step", step.is_some())
            {
                return too_many_arguments(command, operands);
            }
            if matches!(command, "reload" | "r") {
                CliAction::Reload { debug_enabled }
            } else {
                CliAction::Toggle { debug_enabled }
            }
        }
        "help" => match operands {
            [] => CliAction::Help(None),
            [topic] => CliAction::Help(Some(topic.clone())),
            _ => too_many_arguments(command, &operands[1..]),
        },
        unknown => {
            log_warning_standalone!("Unknown command: {}", unknown);
            CliAction::ShowHelpDueToError
        }
    }
}

fn too_many_arguments(command: &str, extra: &[String]) -> CliAction {
    if let Some(first) = extra.first() {
        log_warning_standalone!("Unexpected argument '{}' for {}", first, command);
    }
    CliAction::ShowHelpDueToError
}

/// One-line usage for a command name or alias.
pub fn usage_for(command: &str) -> &'static str {
    match command {
        "watch" | "w" => "bannerwatch watch",
        "status" | "s" => "bannerwatch status [--json] [--at <time>]",
        "simulate" | "S" => "bannerwatch simulate <start> <end> [--step <minutes>]",
        "reload" | "r" => "bannerwatch reload",
        "toggle" | "t" => "bannerwatch toggle",
        "help" => "bannerwatch help [COMMAND]",
        _ => "bannerwatch [OPTIONS] [COMMAND]",
    }
}

pub fn display_version_info() {
    log_version!();
    log_pipe!();
    crate::common::logger::write_output(&format!("┗ {}\n", env!("CARGO_PKG_DESCRIPTION")));
}

pub fn display_help() {
    log_version!();
    log_block_start!(env!("CARGO_PKG_DESCRIPTION"));
    log_block_start!("Usage:");
    log_indented!("bannerwatch [OPTIONS] [COMMAND]");
    log_block_start!("Options:");
    log_indented!("-c, --config <dir>     Use custom configuration directory");
    log_indented!("-d, --debug            Enable detailed debug output");
    log_indented!("-h, --help             Print help information");
    log_indented!("-V, --version          Print version information");
    log_block_start!("Commands:");
    log_indented!("watch, w               Watch configuration and signals (default)");
    log_indented!("status, s              Print the banner as it renders now");
    log_indented!("simulate, S <start> <end>  Step through time and log state changes");
    log_indented!("reload, r              Re-evaluate the running instance");
    log_indented!("toggle, t              Collapse or expand the running instance's banner");
    log_indented!("help [COMMAND]         Show detailed help for a command");
    log_end!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliAction {
        let mut full = vec!["bannerwatch"];
        full.extend_from_slice(args);
        ParsedArgs::parse(full).action
    }

    #[test]
    fn test_parse_no_args_runs_watch() {
        assert_eq!(
            parse(&[]),
            CliAction::Watch {
                debug_enabled: false,
                config_dir: None,
            }
        );
    }

    #[test]
    fn test_global_flags_before_and_after_command() {
        let expected = CliAction::Status {
            debug_enabled: true,
            config_dir: Some("/tmp/bw".to_string()),
            json: true,
            at: None,
        };
        assert_eq!(parse(&["-d", "--config", "/tmp/bw", "status", "--json"]), expected);
        assert_eq!(parse(&["status", "--json", "-c", "/tmp/bw", "--debug"]), expected);
    }

    #[test]
    fn test_status_at() {
        assert_eq!(
            parse(&["s", "--at", "2024-01-15 12:00:00"]),
            CliAction::Status {
                debug_enabled: false,
                config_dir: None,
                json: false,
                at: Some("2024-01-15 12:00:00".to_string()),
            }
        );
    }

    #[test]
    fn test_simulate_default_step() {
        assert_eq!(
            parse(&["simulate", "2024-01-14 00:00:00", "2024-01-16 00:00:00"]),
            CliAction::Simulate {
                debug_enabled: false,
                config_dir: None,
                start_time: "2024-01-14 00:00:00".to_string(),
                end_time: "2024-01-16 00:00:00".to_string(),
                step_minutes: DEFAULT_SIMULATION_STEP_MINUTES,
            }
        );
    }

    #[test]
    fn test_simulate_custom_step() {
        let action = parse(&["S", "a", "b", "--step", "15"]);
        assert!(matches!(action, CliAction::Simulate { step_minutes: 15, .. }));
    }

    #[test]
    fn test_simulate_rejects_bad_step_and_missing_operands() {
        assert_eq!(parse(&["simulate", "a", "b", "--step", "0"]), CliAction::ShowHelpDueToError);
        assert_eq!(parse(&["simulate", "a", "b", "--step", "x"]), CliAction::ShowHelpDueToError);
        assert_eq!(parse(&["simulate", "a"]), CliAction::ShowHelpDueToError);
    }

    #[test]
    fn test_toggle_and_reload() {
        assert_eq!(parse(&["toggle"]), CliAction::Toggle { debug_enabled: false });
        assert_eq!(parse(&["t", "-d"]), CliAction::Toggle { debug_enabled: true });
        assert_eq!(parse(&["reload"]), CliAction::Reload { debug_enabled: false });
        assert_eq!(parse(&["toggle", "extra"]), CliAction::ShowHelpDueToError);
    }

    #[test]
    fn test_help_command() {
        assert_eq!(parse(&["help"]), CliAction::Help(None));
        assert_eq!(parse(&["help", "status"]), CliAction::Help(Some("status".to_string())));
    }

    #[test]
    fn test_version_takes_precedence() {
        assert_eq!(parse(&["--help", "--version"]), CliAction::ShowVersion);
        assert_eq!(parse(&["status", "-h"]), CliAction::ShowHelp);
    }

    #[test]
    fn test_unknown_input() {
        assert_eq!(parse(&["--bogus"]), CliAction::ShowHelpDueToError);
        assert_eq!(parse(&["frobnicate"]), CliAction::ShowHelpDueToError);
        assert_eq!(parse(&["--config"]), CliAction::ShowHelpDueToError);
    }

    #[test]
    fn test_flags_rejected_outside_their_command() {
        assert_eq!(parse(&["watch", "--json"]), CliAction::ShowHelpDueToError);
        assert_eq!(parse(&["status", "--step", "5"]), CliAction::ShowHelpDueToError);
    }
}
