//! # bannerwatch
//!
//! Decides whether a weekly "Monday" announcement banner is shown, and how.
//!
//! The decision is split into three layers, each usable on its own:
//!
//! - **Weekday resolution** (`timezone`): the weekday of an instant in an IANA
//!   zone, with a logged local-time fallback for unknown zones.
//! - **Schedule evaluation** (`schedule`): override, schedule switch and
//!   Monday rule, applied in a fixed precedence.
//! - **Visibility state** (`state`): combines the verdict with the display
//!   settings and a session collapse flag into a render state and a view.
//!
//! Around that core sit the TOML configuration (`config`), the time source used
//! for "now" (`time_source`), process plumbing (`io`) and the CLI commands
//! (`args`, `commands`).

// Logger macros must be visible to every module declared below
#[macro_use]
pub mod common;

pub mod args;
pub mod commands;
pub mod config;
pub mod io;
pub mod schedule;
pub mod state;
pub mod time_source;
pub mod timezone;
