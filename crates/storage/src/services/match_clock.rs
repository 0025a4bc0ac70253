//! Elapsed match time derived from half markers.
//!
//! A match is tracked either live, against wall-clock markers recorded when
//! each half starts and ends, or from a recording, against the video-player
//! offsets at which each half starts. Both yield whole seconds since kick-off,
//! with the second half continuing from [`HALF_DURATION_SECONDS`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{Result, StorageError};
use crate::models::MatchStatus;

pub const HALF_DURATION_SECONDS: i32 = 30 * 60;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LiveClock {
    pub first_half_start: Option<DateTime<Utc>>,
    pub first_half_end: Option<DateTime<Utc>>,
    pub second_half_start: Option<DateTime<Utc>>,
    pub second_half_end: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VideoClock {
    pub first_half_start: Option<f64>,
    pub second_half_start: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MatchPeriod {
    NotStarted,
    FirstHalf,
    HalfTime,
    SecondHalf,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ClockAction {
    StartFirstHalf,
    EndFirstHalf,
    StartSecondHalf,
    EndSecondHalf,
}

fn whole_seconds(from: DateTime<Utc>, to: DateTime<Utc>) -> i32 {
    let seconds = (to - from).num_seconds().max(0);
    i32::try_from(seconds).unwrap_or(i32::MAX)
}

impl LiveClock {
    /// Seconds since kick-off at `now`, or `None` while the clock has not
    /// been started.
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> Option<i32> {
        if let Some(start) = self.second_half_start
            && now >= start
        {
            let until = self.second_half_end.map_or(now, |end| end.min(now));
            return Some(HALF_DURATION_SECONDS.saturating_add(whole_seconds(start, until)));
        }

        let start = self.first_half_start?;
        let until = self.first_half_end.map_or(now, |end| end.min(now));
        Some(whole_seconds(start, until))
    }

    pub fn period(&self, now: DateTime<Utc>) -> MatchPeriod {
        let reached = |marker: Option<DateTime<Utc>>| marker.is_some_and(|m| m <= now);

        if reached(self.second_half_end) {
            MatchPeriod::Finished
        } else if reached(self.second_half_start) {
            MatchPeriod::SecondHalf
        } else if reached(self.first_half_end) {
            MatchPeriod::HalfTime
        } else if reached(self.first_half_start) {
            MatchPeriod::FirstHalf
        } else {
            MatchPeriod::NotStarted
        }
    }

    pub fn is_running(&self, now: DateTime<Utc>) -> bool {
        matches!(
            self.period(now),
            MatchPeriod::FirstHalf | MatchPeriod::SecondHalf
        )
    }

    /// Records `now` into the marker named by `action`.
    ///
    /// Halves run in order and a recorded marker is never overwritten.
    /// Starting the second half closes a first half left open.
    pub fn apply(&mut self, action: ClockAction, now: DateTime<Utc>) -> Result<()> {
        match action {
            ClockAction::StartFirstHalf => {
                if self.first_half_start.is_some() {
                    return Err(invalid("first half has already started"));
                }
                self.first_half_start = Some(now);
            }
            ClockAction::EndFirstHalf => {
                if self.first_half_start.is_none() {
                    return Err(invalid("first half has not started"));
                }
                if self.first_half_end.is_some() {
                    return Err(invalid("first half has already ended"));
                }
                if self.second_half_start.is_some() {
                    return Err(invalid("second half has already started"));
                }
                self.first_half_end = Some(now);
            }
            ClockAction::StartSecondHalf => {
                if self.first_half_start.is_none() {
                    return Err(invalid("first half has not started"));
                }
                if self.second_half_start.is_some() {
                    return Err(invalid("second half has already started"));
                }
                if self.first_half_end.is_none() {
                    self.first_half_end = Some(now);
                }
                self.second_half_start = Some(now);
            }
            ClockAction::EndSecondHalf => {
                if self.second_half_start.is_none() {
                    return Err(invalid("second half has not started"));
                }
                if self.second_half_end.is_some() {
                    return Err(invalid("second half has already ended"));
                }
                self.second_half_end = Some(now);
            }
        }

        Ok(())
    }
}

impl ClockAction {
    /// Status a match moves to once this action is recorded.
    pub fn next_status(self, current: MatchStatus) -> MatchStatus {
        match (self, current) {
            (ClockAction::StartFirstHalf, MatchStatus::Pending) => MatchStatus::InProgress,
            (ClockAction::EndSecondHalf, _) => MatchStatus::Completed,
            _ => current,
        }
    }
}

fn invalid(message: &str) -> StorageError {
    StorageError::InvalidState(message.to_string())
}

impl VideoClock {
    /// Seconds since kick-off at video-player position `video_time`, or
    /// `None` when no half has been marked on the recording.
    pub fn elapsed_seconds(&self, video_time: f64) -> Option<i32> {
        if let Some(start) = self.second_half_start
            && video_time >= start
        {
            return Some(HALF_DURATION_SECONDS.saturating_add(floor_seconds(video_time - start)));
        }

        let start = self.first_half_start?;
        Some(floor_seconds(video_time - start))
    }
}

fn floor_seconds(seconds: f64) -> i32 {
    if seconds.is_nan() || seconds <= 0.0 {
        0
    } else if seconds >= i32::MAX as f64 {
        i32::MAX
    } else {
        seconds.floor() as i32
    }
}

/// Whole video-player seconds stored on an event, `None` for a negative or
/// non-finite player position.
pub fn video_timestamp(video_time: f64) -> Option<i32> {
    if !video_time.is_finite() || video_time < 0.0 {
        return None;
    }
    Some(floor_seconds(video_time))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventTimestamps {
    pub timestamp: i32,
    pub video_timestamp: Option<i32>,
}

/// Picks the timestamps for a newly recorded event.
///
/// An explicit `timestamp` wins. Otherwise a supplied video position is
/// resolved against the video markers, and without one the live clock is
/// read at `now`. A clock that was never started stamps 0.
pub fn resolve_event_timestamps(
    live: &LiveClock,
    video: &VideoClock,
    explicit_timestamp: Option<i32>,
    video_time: Option<f64>,
    now: DateTime<Utc>,
) -> Result<EventTimestamps> {
    let video_timestamp = match video_time {
        Some(t) => Some(video_timestamp(t).ok_or_else(|| {
            StorageError::InvalidState(format!("video time {} is not a valid position", t))
        })?),
        None => None,
    };

    let derived = match video_time {
        Some(t) => video.elapsed_seconds(t),
        None => live.elapsed_seconds(now),
    };

    Ok(EventTimestamps {
        timestamp: explicit_timestamp.or(derived).unwrap_or(0),
        video_timestamp,
    })
}

/// `MM:SS` rendering of elapsed seconds; minutes keep counting past 59.
pub fn format_clock(seconds: i32) -> String {
    let seconds = seconds.max(0);
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn kick_off() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 8, 18, 0, 0).unwrap()
    }

    #[test]
    fn test_first_half_elapsed() {
        let clock = LiveClock {
            first_half_start: Some(kick_off()),
            ..Default::default()
        };
        assert_eq!(clock.elapsed_seconds(kick_off() + Duration::seconds(60)), Some(60));
        assert_eq!(clock.period(kick_off() + Duration::seconds(60)), MatchPeriod::FirstHalf);
    }

    #[test]
    fn test_clock_not_started() {
        let clock = LiveClock::default();
        assert_eq!(clock.elapsed_seconds(kick_off()), None);
        assert_eq!(clock.period(kick_off()), MatchPeriod::NotStarted);
        assert!(!clock.is_running(kick_off()));
    }

    #[test]
    fn test_subsecond_precision_is_truncated() {
        let clock = LiveClock {
            first_half_start: Some(kick_off()),
            ..Default::default()
        };
        let now = kick_off() + Duration::milliseconds(59_999);
        assert_eq!(clock.elapsed_seconds(now), Some(59));
    }

    #[test]
    fn test_clock_before_start_reads_zero() {
        let clock = LiveClock {
            first_half_start: Some(kick_off()),
            ..Default::default()
        };
        assert_eq!(clock.elapsed_seconds(kick_off() - Duration::seconds(5)), Some(0));
    }

    #[test]
    fn test_half_time_freezes_clock() {
        let clock = LiveClock {
            first_half_start: Some(kick_off()),
            first_half_end: Some(kick_off() + Duration::minutes(31)),
            ..Default::default()
        };
        let now = kick_off() + Duration::minutes(40);
        assert_eq!(clock.elapsed_seconds(now), Some(31 * 60));
        assert_eq!(clock.period(now), MatchPeriod::HalfTime);
    }

    #[test]
    fn test_second_half_offsets_by_half_duration() {
        let second = kick_off() + Duration::minutes(45);
        let clock = LiveClock {
            first_half_start: Some(kick_off()),
            first_half_end: Some(kick_off() + Duration::minutes(30)),
            second_half_start: Some(second),
            second_half_end: None,
        };
        assert_eq!(clock.elapsed_seconds(second + Duration::seconds(30)), Some(1830));
        assert_eq!(clock.period(second + Duration::seconds(30)), MatchPeriod::SecondHalf);
    }

    #[test]
    fn test_finished_match_stops_at_final_whistle() {
        let second = kick_off() + Duration::minutes(45);
        let clock = LiveClock {
            first_half_start: Some(kick_off()),
            first_half_end: Some(kick_off() + Duration::minutes(30)),
            second_half_start: Some(second),
            second_half_end: Some(second + Duration::minutes(30)),
        };
        let later = second + Duration::hours(2);
        assert_eq!(clock.elapsed_seconds(later), Some(3600));
        assert_eq!(clock.period(later), MatchPeriod::Finished);
    }

    #[test]
    fn test_actions_run_in_order() {
        let mut clock = LiveClock::default();
        assert!(clock.apply(ClockAction::EndFirstHalf, kick_off()).is_err());
        assert!(clock.apply(ClockAction::StartSecondHalf, kick_off()).is_err());

        clock.apply(ClockAction::StartFirstHalf, kick_off()).unwrap();
        assert!(matches!(
            clock.apply(ClockAction::StartFirstHalf, kick_off()),
            Err(StorageError::InvalidState(_))
        ));
        assert!(clock.apply(ClockAction::EndSecondHalf, kick_off()).is_err());

        let second = kick_off() + Duration::minutes(40);
        clock.apply(ClockAction::StartSecondHalf, second).unwrap();
        assert_eq!(clock.first_half_end, Some(second));
        assert_eq!(clock.second_half_start, Some(second));

        clock
            .apply(ClockAction::EndSecondHalf, second + Duration::minutes(30))
            .unwrap();
        assert!(clock.apply(ClockAction::EndSecondHalf, second).is_err());
    }

    #[test]
    fn test_first_half_cannot_end_after_second_half_started() {
        let second = kick_off() + Duration::minutes(45);
        let mut clock = LiveClock {
            first_half_start: Some(kick_off()),
            second_half_start: Some(second),
            ..Default::default()
        };
        let result = clock.apply(ClockAction::EndFirstHalf, second + Duration::minutes(5));
        assert!(matches!(result, Err(StorageError::InvalidState(_))));
        assert_eq!(clock.first_half_end, None);
    }

    #[test]
    fn test_actions_drive_match_status() {
        assert_eq!(
            ClockAction::StartFirstHalf.next_status(MatchStatus::Pending),
            MatchStatus::InProgress
        );
        assert_eq!(
            ClockAction::StartSecondHalf.next_status(MatchStatus::InProgress),
            MatchStatus::InProgress
        );
        assert_eq!(
            ClockAction::EndSecondHalf.next_status(MatchStatus::InProgress),
            MatchStatus::Completed
        );
    }

    #[test]
    fn test_video_clock_halves() {
        let clock = VideoClock {
            first_half_start: Some(100.0),
            second_half_start: Some(2500.0),
        };
        assert_eq!(clock.elapsed_seconds(160.0), Some(60));
        assert_eq!(clock.elapsed_seconds(50.0), Some(0));
        assert_eq!(clock.elapsed_seconds(2530.7), Some(1830));
        assert_eq!(VideoClock::default().elapsed_seconds(160.0), None);
    }

    #[test]
    fn test_video_timestamp_is_whole_player_seconds() {
        assert_eq!(video_timestamp(160.0), Some(160));
        assert_eq!(video_timestamp(160.9), Some(160));
        assert_eq!(video_timestamp(-1.0), None);
        assert_eq!(video_timestamp(f64::NAN), None);
    }

    #[test]
    fn test_resolve_prefers_explicit_timestamp() {
        let live = LiveClock {
            first_half_start: Some(kick_off()),
            ..Default::default()
        };
        let resolved = resolve_event_timestamps(
            &live,
            &VideoClock::default(),
            Some(42),
            None,
            kick_off() + Duration::seconds(600),
        )
        .unwrap();
        assert_eq!(resolved.timestamp, 42);
        assert_eq!(resolved.video_timestamp, None);
    }

    #[test]
    fn test_resolve_from_live_clock() {
        let live = LiveClock {
            first_half_start: Some(kick_off()),
            ..Default::default()
        };
        let resolved = resolve_event_timestamps(
            &live,
            &VideoClock::default(),
            None,
            None,
            kick_off() + Duration::seconds(60),
        )
        .unwrap();
        assert_eq!(resolved.timestamp, 60);
    }

    #[test]
    fn test_resolve_from_video_position() {
        let video = VideoClock {
            first_half_start: Some(40.0),
            second_half_start: None,
        };
        let resolved =
            resolve_event_timestamps(&LiveClock::default(), &video, None, Some(160.0), kick_off())
                .unwrap();
        assert_eq!(resolved.video_timestamp, Some(160));
        assert_eq!(resolved.timestamp, 120);
    }

    #[test]
    fn test_resolve_with_stopped_clock_stamps_zero() {
        let resolved = resolve_event_timestamps(
            &LiveClock::default(),
            &VideoClock::default(),
            None,
            Some(160.0),
            kick_off(),
        )
        .unwrap();
        assert_eq!(resolved.timestamp, 0);
        assert_eq!(resolved.video_timestamp, Some(160));
    }

    #[test]
    fn test_resolve_rejects_negative_video_time() {
        let result = resolve_event_timestamps(
            &LiveClock::default(),
            &VideoClock::default(),
            None,
            Some(-3.0),
            kick_off(),
        );
        assert!(matches!(result, Err(StorageError::InvalidState(_))));
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(1830), "30:30");
        assert_eq!(format_clock(3725), "62:05");
    }
}
