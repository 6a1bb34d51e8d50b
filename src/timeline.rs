//! Projection of block start/end times onto a fixed 24 hour scale.

use std::str::FromStr;

use datetime::{day_after, extract_time, parse_transport, time_to_minutes};
use error::{ConfigError, FormatError, ProjectionError};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// How to treat a block that runs past the end of its start day, e.g.
/// 23:00 - 01:00, or 09:00 to 10:00 the day after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OvernightPolicy {
    /// Draw the block up to the end of the day.
    Clip,
    /// Refuse to place the block.
    Reject,
}

impl Default for OvernightPolicy {
    fn default() -> Self {
        OvernightPolicy::Clip
    }
}

impl FromStr for OvernightPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "clip" => Ok(OvernightPolicy::Clip),
            "reject" => Ok(OvernightPolicy::Reject),
            other => Err(ConfigError {
                key: String::from("timeblocks.overnight"),
                value: other.to_owned(),
            }),
        }
    }
}

/// Where a block sits on the timeline, in percent of the day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineInterval {
    pub start_percent: f64,
    pub end_percent: f64,
    pub height_percent: f64,
    /// The end was pulled to the end of the day.
    pub clipped: bool,
}

impl TimelineInterval {
    /// Length of the drawn interval in minutes.
    pub fn minutes(&self) -> f64 {
        self.height_percent / 100.0 * f64::from(MINUTES_PER_DAY)
    }
}

/// Position of an `HH:MM` time on the day, 0.0 at midnight and 100.0 at the
/// following midnight. An end time of `00:00` is the end of the day.
pub fn position(time: &str, is_start: bool) -> Result<f64, FormatError> {
    let minutes = match time_to_minutes(time)? {
        0 if !is_start => MINUTES_PER_DAY,
        minutes => minutes,
    };
    Ok(f64::from(minutes) / f64::from(MINUTES_PER_DAY) * 100.0)
}

/// Projects a block's transport start/end strings with the default
/// [`OvernightPolicy::Clip`].
pub fn interval(start: &str, end: &str) -> Result<TimelineInterval, ProjectionError> {
    interval_with(start, end, OvernightPolicy::default())
}

pub fn interval_with(
    start: &str,
    end: &str,
    policy: OvernightPolicy,
) -> Result<TimelineInterval, ProjectionError> {
    let start_percent = position(&extract_time(start)?, true)?;
    let mut end_percent = position(&extract_time(end)?, false)?;
    let mut clipped = false;

    if end_percent < start_percent || ends_after_start_day(start, end)? {
        match policy {
            OvernightPolicy::Clip => {
                end_percent = 100.0;
                clipped = true;
            }
            OvernightPolicy::Reject => {
                return Err(ProjectionError::Overnight {
                    start: start.to_owned(),
                    end: end.to_owned(),
                })
            }
        }
    }

    trace!(
        "Projected {} - {} to {:.2}% - {:.2}%{}",
        start,
        end,
        start_percent,
        end_percent,
        if clipped { " (clipped)" } else { "" }
    );

    Ok(TimelineInterval {
        start_percent,
        end_percent,
        height_percent: end_percent - start_percent,
        clipped,
    })
}

/// Whether `end` lies past the midnight that closes the day `start` is on.
/// Ending exactly on that midnight still fits the day.
fn ends_after_start_day(start: &str, end: &str) -> Result<bool, FormatError> {
    let start = parse_transport(start)?;
    let end = parse_transport(end)?;

    Ok(match day_after(start.date()).and_hms_opt(0, 0, 0) {
        Some(midnight) => end > midnight,
        None => false,
    })
}
