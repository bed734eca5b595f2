//! Signal handling for the watch loop.
//!
//! Signals are translated into [`SignalMessage`]s on the same channel the config
//! watcher uses, so the main loop has a single place where state can change.
//!
//! | signal            | message    |
//! |-------------------|------------|
//! | `SIGINT`, `SIGTERM` | `Shutdown` |
//! | `SIGHUP`, `SIGUSR2` | `Reload`   |
//! | `SIGUSR1`           | `Toggle`   |

use anyhow::{Context, Result};
use signal_hook::{
    consts::signal::{SIGHUP, SIGINT, SIGTERM, SIGUSR1, SIGUSR2},
    iterator::Signals,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;

/// Messages consumed by the watch loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalMessage {
    /// Reload the config and re-evaluate the schedule.
    Reload,
    /// Flip the collapse flag.
    Toggle,
    Shutdown,
}

impl SignalMessage {
    /// Message for a raw signal number, if it is one we handle.
    pub fn from_signal(signal: i32) -> Option<Self> {
        match signal {
            SIGINT | SIGTERM => Some(Self::Shutdown),
            SIGHUP | SIGUSR2 => Some(Self::Reload),
            SIGUSR1 => Some(Self::Toggle),
            _ => None,
        }
    }
}

/// Channel endpoints and run flag shared with the watch loop.
pub struct SignalState {
    pub running: Arc<AtomicBool>,
    pub signal_receiver: Receiver<SignalMessage>,
    /// Cloned into other producers such as the config watcher.
    pub signal_sender: Sender<SignalMessage>,
}

/// Register handlers and spawn the signal listener thread.
pub fn setup_signal_handler(debug_enabled: bool) -> Result<SignalState> {
    let running = Arc::new(AtomicBool::new(true));
    let (signal_sender, signal_receiver) = channel::<SignalMessage>();

    let mut signals = Signals::new([SIGINT, SIGTERM, SIGHUP, SIGUSR1, SIGUSR2])
        .context("failed to register signal handlers")?;

    let running_clone = running.clone();
    let sender_clone = signal_sender.clone();

    thread::spawn(move || {
        for sig in signals.forever() {
            let Some(message) = SignalMessage::from_signal(sig) else {
                continue;
            };

            if debug_enabled {
                log_pipe!();
                log_debug!("Received signal {sig} ({message:?})");
            }

            if message == SignalMessage::Shutdown {
                running_clone.store(false, Ordering::SeqCst);
            }
            if sender_clone.send(message).is_err() || message == SignalMessage::Shutdown {
                break;
            }
        }
    });

    Ok(SignalState {
        running,
        signal_receiver,
        signal_sender,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_mapping() {
        assert_eq!(SignalMessage::from_signal(SIGTERM), Some(SignalMessage::Shutdown));
        assert_eq!(SignalMessage::from_signal(SIGINT), Some(SignalMessage::Shutdown));
        assert_eq!(SignalMessage::from_signal(SIGHUP), Some(SignalMessage::Reload));
        assert_eq!(SignalMessage::from_signal(SIGUSR2), Some(SignalMessage::Reload));
        assert_eq!(SignalMessage::from_signal(SIGUSR1), Some(SignalMessage::Toggle));
        assert_eq!(SignalMessage::from_signal(0), None);
    }
}
