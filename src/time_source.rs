//! Time source abstraction for real and simulated clocks.
//!
//! The decision engine itself takes the evaluation instant as a parameter; this
//! module decides what "now" means for the commands. A real clock is used by
//! default, while `--at` and `simulate` install a simulated clock that only moves
//! when told to.

use chrono::{DateTime, Duration as ChronoDuration, Local, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use once_cell::sync::OnceCell;
use std::sync::{Arc, Mutex};

static TIME_SOURCE: OnceCell<Arc<dyn TimeSource>> = OnceCell::new();

/// Format accepted by `--at` and the `simulate` bounds.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub trait TimeSource: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn is_simulated(&self) -> bool;

    /// Move a simulated clock forward. Real clocks ignore this.
    fn advance(&self, _by: ChronoDuration) {}
}

/// Wall-clock time.
pub struct RealTimeSource;

impl TimeSource for RealTimeSource {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn is_simulated(&self) -> bool {
        false
    }
}

/// Manually driven clock.
///
/// Starts at a fixed instant and only changes through [`TimeSource::advance`],
/// which makes it usable both for pinning a single evaluation and for stepping
/// through a range.
pub struct SimulatedTimeSource {
    current: Mutex<DateTime<Utc>>,
}

impl SimulatedTimeSource {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            current: Mutex::new(start),
        }
    }
}

impl TimeSource for SimulatedTimeSource {
    fn now(&self) -> DateTime<Utc> {
        match self.current.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    fn is_simulated(&self) -> bool {
        true
    }

    fn advance(&self, by: ChronoDuration) {
        let mut guard = match self.current.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard += by;
    }
}

/// Install the process time source. Only the first call has an effect.
pub fn init_time_source(source: Arc<dyn TimeSource>) {
    TIME_SOURCE.set(source).ok();
}

pub fn is_initialized() -> bool {
    TIME_SOURCE.get().is_some()
}

fn source() -> &'static Arc<dyn TimeSource> {
    TIME_SOURCE.get_or_init(|| Arc::new(RealTimeSource))
}

/// Current instant according to the installed source.
pub fn now() -> DateTime<Utc> {
    source().now()
}

pub fn is_simulated() -> bool {
    source().is_simulated()
}

pub fn advance(by: ChronoDuration) {
    source().advance(by)
}

/// Parse `YYYY-MM-DD HH:MM:SS` as local wall-clock time.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, String> {
    let naive = NaiveDateTime::parse_from_str(s.trim(), DATETIME_FORMAT)
        .map_err(|e| format!("Invalid datetime format: {e}. Use YYYY-MM-DD HH:MM:SS"))?;
    Local
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| "Ambiguous or invalid local time".to_string())
}

/// Parse `YYYY-MM-DD HH:MM:SS` as wall-clock time in a specific zone.
pub fn parse_datetime_in_tz(s: &str, tz: Tz) -> Result<DateTime<Utc>, String> {
    let naive = NaiveDateTime::parse_from_str(s.trim(), DATETIME_FORMAT)
        .map_err(|e| format!("Invalid datetime format: {e}. Use YYYY-MM-DD HH:MM:SS"))?;
    tz.from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| format!("Ambiguous or invalid time in timezone {tz}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_source_only_moves_when_advanced() {
        let start = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let source = SimulatedTimeSource::new(start);

        assert_eq!(source.now(), start);
        assert_eq!(source.now(), start);

        source.advance(ChronoDuration::hours(36));
        assert_eq!(
            source.now(),
            Utc.with_ymd_and_hms(2024, 1, 17, 0, 0, 0).unwrap()
        );
        assert!(source.is_simulated());
    }

    #[test]
    fn test_real_source_is_not_simulated() {
        assert!(!RealTimeSource.is_simulated());
    }

    #[test]
    fn test_parse_datetime_in_tz() {
        let parsed = parse_datetime_in_tz("2024-01-15 00:30:00", chrono_tz::America::Chicago)
            .unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 15, 6, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_datetime_rejects_bad_format() {
        let err = parse_datetime("2024/01/15 00:30").unwrap_err();
        assert!(err.contains("YYYY-MM-DD HH:MM:SS"));
    }

    #[test]
    fn test_parse_datetime_accepts_local_time() {
        assert!(parse_datetime(" 2024-06-03 12:00:00 ").is_ok());
    }
}
