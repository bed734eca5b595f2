//! Commands that signal a running watch instance.

use anyhow::Result;

use crate::io::lock;

/// Ask the running instance to flip its collapse flag.
pub fn handle_toggle_command(debug_enabled: bool) -> Result<()> {
    log_version!();
    let pid = lock::get_running_instance_pid()?;
    lock::send_toggle_signal(pid)?;
    if debug_enabled {
        log_pipe!();
        log_debug!("SIGUSR1 sent to process {pid}");
    }
    log_block_start!("Collapse toggle sent to bannerwatch (PID: {pid})");
    log_end!();
    Ok(())
}

/// Ask the running instance to reload its config and re-evaluate the schedule.
pub fn handle_reload_command(debug_enabled: bool) -> Result<()> {
    log_version!();
    let pid = lock::get_running_instance_pid()?;
    lock::send_reload_signal(pid)?;
    if debug_enabled {
        log_pipe!();
        log_debug!("SIGUSR2 sent to process {pid}");
    }
    log_block_start!("Reload sent to bannerwatch (PID: {pid})");
    log_end!();
    Ok(())
}
