//! Clock state representation.
//!
//! Match phase and timer state enums, the read-only snapshot projection,
//! the per-half stoppage record, and the append-only timer event type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Coarse stage of the match.
///
/// Monotonic: no phase is revisited once advanced past, except via an
/// explicit reset back to `PreMatch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    /// Pre-match data entered, clock never started.
    #[default]
    PreMatch,
    /// 3-2-1 countdown before first-half kickoff.
    CountdownFirst,
    /// First half, regulation or stoppage.
    FirstHalf,
    /// Half-time interval.
    Halftime,
    /// 3-2-1 countdown before second-half kickoff.
    CountdownSecond,
    /// Second half, regulation or stoppage.
    SecondHalf,
    /// Full time.
    Complete,
}

impl MatchPhase {
    /// Wire name of the phase (e.g. `"first_half"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PreMatch => "pre_match",
            Self::CountdownFirst => "countdown_first",
            Self::FirstHalf => "first_half",
            Self::Halftime => "halftime",
            Self::CountdownSecond => "countdown_second",
            Self::SecondHalf => "second_half",
            Self::Complete => "complete",
        }
    }

    /// Whether the match has reached full time.
    #[must_use]
    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }

    /// Display label for reports and confirmation prompts.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PreMatch => "Pre-Match",
            Self::CountdownFirst | Self::FirstHalf => "1st Half",
            Self::Halftime => "Half-Time",
            Self::CountdownSecond | Self::SecondHalf => "2nd Half",
            Self::Complete => "Match Complete",
        }
    }
}

impl std::fmt::Display for MatchPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fine-grained run/pause status of the clock, orthogonal to [`MatchPhase`]
/// but constrained by it (the halftime interval pins the state to `Idle`).
///
/// `Halftime` is never produced by the engine; it is retained for session
/// mirror wire compatibility with external writers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimerState {
    /// Not ticking; waiting for a start action.
    #[default]
    Idle,
    /// Counting 3-2-1 down to kickoff.
    Countdown,
    /// Regulation time ticking.
    Running,
    /// Paused by the referee.
    Paused,
    /// Stoppage time ticking (counts up to the recorded total).
    Stoppage,
    /// Half-time interval (mirror-only, see type docs).
    Halftime,
    /// Full time reached.
    Complete,
}

impl TimerState {
    /// Wire name of the state (e.g. `"running"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Countdown => "countdown",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Stoppage => "stoppage",
            Self::Halftime => "halftime",
            Self::Complete => "complete",
        }
    }
}

impl std::fmt::Display for TimerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only projection of the clock for display and mirroring.
///
/// Owned exclusively by the clock engine and rebuilt after each mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockSnapshot {
    /// Regulation seconds elapsed since first-half kickoff.
    pub elapsed_seconds: u32,
    /// Current match phase.
    pub phase: MatchPhase,
    /// Current timer state.
    pub state: TimerState,
    /// Whether the clock is inside stoppage time.
    pub in_stoppage: bool,
    /// Seconds counted up within the current stoppage period.
    pub stoppage_elapsed: u32,
}

/// Accumulated stoppage time per half, in seconds.
///
/// Fed by pause durations observed while the corresponding half is
/// active; cleared on reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StoppageRecord {
    /// Stoppage accumulated during the first half.
    pub first_half_seconds: u32,
    /// Stoppage accumulated during the second half.
    pub second_half_seconds: u32,
}

impl StoppageRecord {
    /// Total stoppage across both halves.
    #[must_use]
    pub const fn total_seconds(self) -> u32 {
        self.first_half_seconds + self.second_half_seconds
    }
}

/// Closed set of clock lifecycle markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerEventType {
    /// Kickoff; the match clock started for the first time.
    MatchStart,
    /// First half began ticking.
    FirstHalfStart,
    /// Clock paused by the referee.
    TimerPause,
    /// Clock resumed after a pause.
    TimerResume,
    /// First half reached the regulation boundary.
    FirstHalfEnd,
    /// A stoppage period played out in full.
    StoppageTimeEnd,
    /// Half-time interval began.
    HalftimeStart,
    /// Second half began ticking.
    SecondHalfStart,
    /// Second half reached the regulation boundary.
    SecondHalfEnd,
    /// Full time.
    MatchComplete,
}

impl TimerEventType {
    /// Wire name of the event type (e.g. `"first_half_end"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MatchStart => "match_start",
            Self::FirstHalfStart => "first_half_start",
            Self::TimerPause => "timer_pause",
            Self::TimerResume => "timer_resume",
            Self::FirstHalfEnd => "first_half_end",
            Self::StoppageTimeEnd => "stoppage_time_end",
            Self::HalftimeStart => "halftime_start",
            Self::SecondHalfStart => "second_half_start",
            Self::SecondHalfEnd => "second_half_end",
            Self::MatchComplete => "match_complete",
        }
    }

    /// Display label used in reports (e.g. `"First Half End"`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MatchStart => "Match Start",
            Self::FirstHalfStart => "First Half Start",
            Self::TimerPause => "Timer Pause",
            Self::TimerResume => "Timer Resume",
            Self::FirstHalfEnd => "First Half End",
            Self::StoppageTimeEnd => "Stoppage Time End",
            Self::HalftimeStart => "Half-Time",
            Self::SecondHalfStart => "Second Half Start",
            Self::SecondHalfEnd => "Second Half End",
            Self::MatchComplete => "Match Complete",
        }
    }
}

impl std::fmt::Display for TimerEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single entry in the append-only clock lifecycle log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerEvent {
    /// Unique event identifier.
    pub id: Uuid,
    /// Lifecycle marker kind.
    pub event_type: TimerEventType,
    /// Match time at emission, in seconds.
    pub match_time_seconds: u32,
    /// Wall-clock time at emission.
    pub timestamp: DateTime<Utc>,
    /// Pause duration for `timer_resume` events, in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u32>,
    /// Free-form annotation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl TimerEvent {
    /// Creates a new event stamped with a fresh id.
    #[must_use]
    pub fn new(event_type: TimerEventType, match_time_seconds: u32, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type,
            match_time_seconds,
            timestamp: now,
            duration_seconds: None,
            notes: None,
        }
    }

    /// Attaches a duration (used by pause/resume markers).
    #[must_use]
    pub const fn with_duration(mut self, seconds: u32) -> Self {
        self.duration_seconds = Some(seconds);
        self
    }
}

/// Formats seconds as `MM:SS` match time (e.g. `2700` → `"45:00"`).
#[must_use]
pub fn format_match_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Formats seconds as `HH:MM:SS` for whole-match durations.
#[must_use]
pub fn format_match_duration(seconds: u32) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}
