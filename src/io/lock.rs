//! Single-instance lock for the watch loop.
//!
//! The lock file lives in the runtime directory and holds the PID of the
//! running `watch` process. The `toggle` command uses it to find that process.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::common::constants::LOCK_FILE_NAME;
use crate::common::utils::{is_process_running, runtime_dir};

/// Held lock; the file is removed when dropped.
pub struct InstanceLock {
    file: File,
    path: PathBuf,
}

impl InstanceLock {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for InstanceLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
        let _ = std::fs::remove_file(&self.path);
    }
}

pub fn lock_path() -> PathBuf {
    runtime_dir().join(LOCK_FILE_NAME)
}

/// Acquire the instance lock at the default location.
pub fn acquire_lock() -> Result<InstanceLock> {
    acquire_lock_at(&lock_path())
}

/// Acquire an exclusive lock at `path` and record our PID in it.
///
/// Fails if another live process holds the lock.
pub fn acquire_lock_at(path: &Path) -> Result<InstanceLock> {
    let mut file = open_lock_file(path)?;

    if FileExt::try_lock_exclusive(&file).is_err() {
        match read_pid(path) {
            Some(pid) if is_process_running(pid) => {
                anyhow::bail!("bannerwatch is already running (PID: {pid})");
            }
            _ => {
                log_warning!("Removing stale lock file");
                let _ = std::fs::remove_file(path);
                file = open_lock_file(path)?;
                FileExt::try_lock_exclusive(&file)
                    .context("Failed to acquire lock after removing stale lock file")?;
            }
        }
    }

    file.set_len(0)?;
    file.seek(SeekFrom::Start(0))?;
    writeln!(file, "{}", std::process::id())?;
    file.flush()?;

    Ok(InstanceLock {
        file,
        path: path.to_path_buf(),
    })
}

/// PID of the running watch instance.
pub fn get_running_instance_pid() -> Result<u32> {
    running_instance_pid_at(&lock_path())
}

pub fn running_instance_pid_at(path: &Path) -> Result<u32> {
    let file = File::open(path).context("No bannerwatch instance running")?;

    // A lock we can take ourselves is not held by anyone
    if FileExt::try_lock_shared(&file).is_ok() {
        let _ = FileExt::unlock(&file);
        anyhow::bail!("No bannerwatch instance running");
    }

    read_pid(path)
        .filter(|&pid| is_process_running(pid))
        .context("Lock file does not point at a running process")
}

/// Ask the running instance to flip its collapse flag.
pub fn send_toggle_signal(pid: u32) -> Result<()> {
    use nix::sys::signal::{Signal, kill};
    use nix::unistd::Pid;

    kill(Pid::from_raw(pid as i32), Signal::SIGUSR1)
        .map_err(|e| anyhow::anyhow!("Failed to send toggle signal: {e}"))
}

/// Ask the running instance to reload its config and re-evaluate.
pub fn send_reload_signal(pid: u32) -> Result<()> {
    use nix::sys::signal::{Signal, kill};
    use nix::unistd::Pid;

    kill(Pid::from_raw(pid as i32), Signal::SIGUSR2)
        .map_err(|e| anyhow::anyhow!("Failed to send reload signal: {e}"))
}

fn open_lock_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .with_context(|| format!("Failed to open lock file {}", path.display()))
}

fn read_pid(path: &Path) -> Option<u32> {
    std::fs::read_to_string(path)
        .ok()?
        .lines()
        .next()?
        .trim()
        .parse()
        .ok()
}
