//! Help command: general or per-command help.

use crate::args::usage_for;

pub fn run_help_command(command: Option<&str>) {
    match command {
        None => display_general_help(),
        Some("watch" | "w") => display_watch_help(),
        Some("status" | "s") => display_status_help(),
        Some("simulate" | "S") => display_simulate_help(),
        Some("reload" | "r") => display_reload_help(),
        Some("toggle" | "t") => display_toggle_help(),
        Some("help") => display_help_help(),
        Some(unknown) => {
            log_warning_standalone!("Unknown command: {}", unknown);
            display_general_help();
        }
    }
}

fn display_general_help() {
    log_version!();
    log_block_start!("Available Commands:");
    log_indented!("watch, w                 Watch configuration and signals (default)");
    log_indented!("status, s                Print the banner as it renders now");
    log_indented!("simulate, S <start> <end>  Step through time and log state changes");
    log_indented!("reload, r                Re-evaluate the running instance");
    log_indented!("toggle, t                Collapse or expand the running instance's banner");
    log_indented!("help [COMMAND]           Show detailed help for a command");
    log_pipe!();
    log_info!("Use 'bannerwatch help <command>' to see detailed help for a specific command.");
    log_indented!("Use 'bannerwatch --help' to see all options and general usage.");
    log_end!();
}

fn display_watch_help() {
    log_version!();
    log_block_start!("watch - Keep the banner decision live");
    log_block_start!("Usage: {}", usage_for("watch"));
    log_block_start!("Re-evaluates when:");
    log_indented!("bannerwatch.toml changes on disk");
    log_indented!("SIGHUP or SIGUSR2 arrives (see 'bannerwatch reload')");
    log_block_start!("SIGUSR1 toggles the collapse state (see 'bannerwatch toggle').");
    log_indented!("Only one watch instance runs at a time.");
    log_end!();
}

fn display_status_help() {
    log_version!();
    log_block_start!("status - Evaluate the banner once");
    log_block_start!("Usage: {}", usage_for("status"));
    log_block_start!("Options:");
    log_indented!("-j, --json        Print the banner view as JSON");
    log_indented!("-a, --at <time>   Evaluate at 'YYYY-MM-DD HH:MM:SS' in the configured");
    log_indented!("                  time zone, or at an RFC 3339 timestamp");
    log_block_start!("Exit status is 3 when the banner is fully hidden.");
    log_end!();
}

fn display_simulate_help() {
    log_version!();
    log_block_start!("simulate - Step through time and log render-state changes");
    log_block_start!("Usage: {}", usage_for("simulate"));
    log_block_start!("Arguments:");
    log_indented!("start, end        'YYYY-MM-DD HH:MM:SS' in the configured time zone,");
    log_indented!("                  or RFC 3339 timestamps");
    log_indented!("--step <minutes>  Minutes between evaluations (default: 60)");
    log_block_start!("Examples:");
    log_indented!("bannerwatch simulate \"2024-01-14 00:00:00\" \"2024-01-21 00:00:00\"");
    log_indented!("bannerwatch simulate \"2024-01-15 23:00:00\" \"2024-01-16 01:00:00\" --step 5");
    log_end!();
}

fn display_reload_help() {
    log_version!();
    log_block_start!("reload - Re-evaluate the running instance");
    log_block_start!("Usage: {}", usage_for("reload"));
    log_indented!("Rereads bannerwatch.toml and recomputes the weekday.");
    log_end!();
}

fn display_toggle_help() {
    log_version!();
    log_block_start!("toggle - Collapse or expand the banner");
    log_block_start!("Usage: {}", usage_for("toggle"));
    log_indented!("Ignored while the banner is hidden or expired, or when");
    log_indented!("allow_collapse = false.");
    log_end!();
}

fn display_help_help() {
    log_version!();
    log_block_start!("help - Display help information");
    log_block_start!("Usage: {}", usage_for("help"));
    log_block_start!("Examples:");
    log_indented!("bannerwatch help");
    log_indented!("bannerwatch help status");
    log_end!();
}
