//! Config file watching for live re-evaluation.
//!
//! Editing `bannerwatch.toml` while `watch` runs counts as a configuration change:
//! the watcher sends a reload message and the main loop re-evaluates the banner.
//! A reload is sent only once file events have stopped for
//! `CONFIG_RELOAD_DEBOUNCE_MS`, so a truncate followed by a write is read once,
//! after the write.

use anyhow::{Context, Result};
use notify::{
    Config as NotifyConfig, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher,
};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use crate::common::constants::CONFIG_RELOAD_DEBOUNCE_MS;
use crate::common::utils::private_path;
use crate::io::signals::SignalMessage;

/// Watches one config file and forwards changes as reload messages.
pub struct ConfigWatcher {
    signal_sender: Sender<SignalMessage>,
    config_path: PathBuf,
    debug_enabled: bool,
}

impl ConfigWatcher {
    pub fn new(signal_sender: Sender<SignalMessage>, config_path: PathBuf, debug_enabled: bool) -> Self {
        Self {
            signal_sender,
            config_path,
            debug_enabled,
        }
    }

    /// Spawn the watcher thread.
    ///
    /// The parent directory is watched rather than the file so that editors that
    /// save by replacing the file are still noticed.
    pub fn start(self) -> Result<()> {
        let watch_dir = self
            .config_path
            .parent()
            .context("Config path has no parent directory")?
            .to_path_buf();

        let (tx, rx) = std::sync::mpsc::channel();
        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                if let Ok(event) = res
                    && matches!(
                        event.kind,
                        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
                    )
                {
                    let _ = tx.send(event);
                }
            },
            NotifyConfig::default(),
        )
        .context("Failed to create file watcher")?;

        watcher
            .watch(&watch_dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch directory: {}", private_path(&watch_dir)))?;

        if self.debug_enabled {
            log_pipe!();
            log_debug!("Watching {} for changes", private_path(&self.config_path));
        }

        let ConfigWatcher {
            signal_sender,
            config_path,
            debug_enabled,
        } = self;

        thread::spawn(move || {
            // The watcher stops when dropped, so it lives in this thread
            let _watcher = watcher;
            let debounce = Duration::from_millis(CONFIG_RELOAD_DEBOUNCE_MS);

            while wait_for_settled_change(&rx, &config_path, debounce) {
                if debug_enabled {
                    log_pipe!();
                    log_debug!("Configuration file change detected");
                }

                if signal_sender.send(SignalMessage::Reload).is_err() {
                    // Main loop is gone
                    break;
                }
            }
        });

        Ok(())
    }
}

/// Whether a file event touches the config file.
fn affects_config(event: &Event, config_path: &Path) -> bool {
    let Some(config_name) = config_path.file_name() else {
        return false;
    };
    event.paths.iter().any(|path| {
        path == config_path
            || (path.parent() == config_path.parent()
                && path.file_name() == Some(config_name))
    })
}

/// Block until the config file changed and then saw no further events for
/// `quiet`. Returns false once the event channel is closed with nothing pending.
fn wait_for_settled_change(rx: &Receiver<Event>, config_path: &Path, quiet: Duration) -> bool {
    loop {
        match rx.recv() {
            Ok(event) if affects_config(&event, config_path) => break,
            Ok(_) => continue,
            Err(_) => return false,
        }
    }

    // Every further config event restarts the quiet period
    let mut deadline = Instant::now() + quiet;
    loop {
        match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
            Ok(event) => {
                if affects_config(&event, config_path) {
                    deadline = Instant::now() + quiet;
                }
            }
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => return true,
        }
    }
}

/// Start watching the config file, sending reload messages on `signal_sender`.
pub fn start_config_watcher(
    signal_sender: Sender<SignalMessage>,
    config_path: PathBuf,
    debug_enabled: bool,
) -> Result<()> {
    ConfigWatcher::new(signal_sender, config_path, debug_enabled).start()
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, DataChange, ModifyKind};
    use std::sync::mpsc;

    #[test]
    fn test_affects_config_matches_only_config_file() {
        let config_path = PathBuf::from("/home/user/.config/bannerwatch/bannerwatch.toml");

        let touched = Event::new(EventKind::Modify(ModifyKind::Any)).add_path(config_path.clone());
        assert!(affects_config(&touched, &config_path));

        let other = Event::new(EventKind::Create(CreateKind::File))
            .add_path(PathBuf::from("/home/user/.config/bannerwatch/notes.txt"));
        assert!(!affects_config(&other, &config_path));
    }

    fn config_path() -> PathBuf {
        PathBuf::from("/home/user/.config/bannerwatch/bannerwatch.toml")
    }

    fn write_event(path: &Path) -> Event {
        Event::new(EventKind::Modify(ModifyKind::Data(DataChange::Content)))
            .add_path(path.to_path_buf())
    }

    #[test]
    fn test_truncate_then_write_reloads_once() {
        let path = config_path();
        let (tx, rx) = mpsc::channel();
        tx.send(write_event(&path)).unwrap();
        tx.send(write_event(&path)).unwrap();

        assert!(wait_for_settled_change(&rx, &path, Duration::from_millis(50)));
        assert!(rx.try_recv().is_err());

        drop(tx);
        assert!(!wait_for_settled_change(&rx, &path, Duration::from_millis(50)));
    }

    #[test]
    fn test_late_write_extends_quiet_period() {
        let path = config_path();
        let (tx, rx) = mpsc::channel();
        tx.send(write_event(&path)).unwrap();

        let started = Instant::now();
        let writer_path = path.clone();
        let writer = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            tx.send(write_event(&writer_path)).unwrap();
            // Keep the channel open past the quiet period
            thread::sleep(Duration::from_millis(1500));
        });

        assert!(wait_for_settled_change(&rx, &path, Duration::from_millis(500)));
        assert!(started.elapsed() >= Duration::from_millis(550));
        assert!(rx.try_recv().is_err());
        writer.join().unwrap();
    }

    #[test]
    fn test_unrelated_events_do_not_reload() {
        let path = config_path();
        let (tx, rx) = mpsc::channel();
        tx.send(write_event(Path::new("/home/user/.config/bannerwatch/notes.txt")))
            .unwrap();
        drop(tx);

        assert!(!wait_for_settled_change(&rx, &path, Duration::from_millis(50)));
    }
}
