//! The match clock state machine.
//!
//! `ClockEngine` owns the `(phase, state)` pair, the regulation and
//! stoppage counters, countdown sequencing, and the append-only lifecycle
//! log. All mutation goes through `start`/`pause`/`reset`/`tick`; each
//! call either applies fully and returns the events it emitted, or rejects
//! with an invalid-transition error and changes nothing.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::config::MatchSettings;
use crate::error::ActionError;

use super::state::{
    ClockSnapshot, MatchPhase, StoppageRecord, TimerEvent, TimerEventType, TimerState,
};

/// The clock state machine.
///
/// One logical tick represents one second of match time. Exactly one of
/// the regulation counter and the stoppage counter increments per tick,
/// selected by `in_stoppage`. While counting down to kickoff no other
/// counter mutates.
#[derive(Debug, Clone)]
pub struct ClockEngine {
    settings: MatchSettings,
    phase: MatchPhase,
    state: TimerState,
    elapsed_seconds: u32,
    in_stoppage: bool,
    stoppage_elapsed: u32,
    stoppage: StoppageRecord,
    countdown_remaining: u32,
    pause_started_at: Option<DateTime<Utc>>,
    events: Vec<TimerEvent>,
}

impl ClockEngine {
    /// Creates an engine in `pre_match/idle`.
    #[must_use]
    pub const fn new(settings: MatchSettings) -> Self {
        Self {
            settings,
            phase: MatchPhase::PreMatch,
            state: TimerState::Idle,
            elapsed_seconds: 0,
            in_stoppage: false,
            stoppage_elapsed: 0,
            stoppage: StoppageRecord {
                first_half_seconds: 0,
                second_half_seconds: 0,
            },
            countdown_remaining: 0,
            pause_started_at: None,
            events: Vec::new(),
        }
    }

    /// Returns the current read-only snapshot.
    #[must_use]
    pub const fn snapshot(&self) -> ClockSnapshot {
        ClockSnapshot {
            elapsed_seconds: self.elapsed_seconds,
            phase: self.phase,
            state: self.state,
            in_stoppage: self.in_stoppage,
            stoppage_elapsed: self.stoppage_elapsed,
        }
    }

    /// Returns the per-half stoppage record.
    #[must_use]
    pub const fn stoppage(&self) -> StoppageRecord {
        self.stoppage
    }

    /// Returns the lifecycle log emitted since creation or the last reset.
    #[must_use]
    pub fn events(&self) -> &[TimerEvent] {
        &self.events
    }

    /// Remaining countdown ticks, or 0 outside a countdown.
    #[must_use]
    pub const fn countdown_remaining(&self) -> u32 {
        self.countdown_remaining
    }

    /// Whether the clock consumes ticks in its current state.
    #[must_use]
    pub const fn is_ticking(&self) -> bool {
        matches!(
            self.state,
            TimerState::Countdown | TimerState::Running | TimerState::Stoppage
        )
    }

    /// Match time for event stamping: regulation elapsed, plus the
    /// stoppage counter while inside stoppage.
    #[must_use]
    pub const fn current_match_time(&self) -> u32 {
        if self.in_stoppage {
            self.elapsed_seconds + self.stoppage_elapsed
        } else {
            self.elapsed_seconds
        }
    }

    /// Applies a confirmed start action.
    ///
    /// From `pre_match/idle` or `halftime/idle` this begins the kickoff
    /// countdown; from `paused` it resumes the clock and credits the pause
    /// duration to the stoppage accumulator of the current half.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::InvalidTransition`] in any other state.
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<Vec<TimerEvent>, ActionError> {
        match (self.phase, self.state) {
            (MatchPhase::PreMatch, TimerState::Idle) => {
                self.begin_countdown(MatchPhase::CountdownFirst);
                Ok(Vec::new())
            }
            (MatchPhase::Halftime, TimerState::Idle) => {
                self.begin_countdown(MatchPhase::CountdownSecond);
                Ok(Vec::new())
            }
            (_, TimerState::Paused) => Ok(self.resume(now)),
            _ => Err(self.invalid("start")),
        }
    }

    /// Applies a confirmed pause action.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::InvalidTransition`] unless the clock is
    /// running or in stoppage.
    pub fn pause(&mut self, now: DateTime<Utc>) -> Result<Vec<TimerEvent>, ActionError> {
        if !matches!(self.state, TimerState::Running | TimerState::Stoppage) {
            return Err(self.invalid("pause"));
        }

        self.state = TimerState::Paused;
        self.pause_started_at = Some(now);
        info!(phase = %self.phase, match_time = self.current_match_time(), "clock paused");

        let event = self.emit(TimerEventType::TimerPause, self.current_match_time(), now);
        Ok(vec![event])
    }

    /// Applies a confirmed reset action.
    ///
    /// Returns the clock to `pre_match/idle` and clears every counter, the
    /// stoppage record, pause bookkeeping, and the engine's lifecycle log.
    /// Scores live outside the engine and are unaffected.
    pub fn reset(&mut self) {
        info!(phase = %self.phase, elapsed = self.elapsed_seconds, "clock reset");
        self.phase = MatchPhase::PreMatch;
        self.state = TimerState::Idle;
        self.elapsed_seconds = 0;
        self.in_stoppage = false;
        self.stoppage_elapsed = 0;
        self.stoppage = StoppageRecord::default();
        self.countdown_remaining = 0;
        self.pause_started_at = None;
        self.events.clear();
    }

    /// Advances the clock by one logical second.
    ///
    /// A no-op outside the countdown, running, and stoppage states, so a
    /// stray tick from a source that lost the teardown race cannot corrupt
    /// the counters.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Vec<TimerEvent> {
        match self.state {
            TimerState::Countdown => self.tick_countdown(now),
            TimerState::Running => self.tick_running(now),
            TimerState::Stoppage => self.tick_stoppage(now),
            _ => Vec::new(),
        }
    }

    fn begin_countdown(&mut self, phase: MatchPhase) {
        self.phase = phase;
        self.state = TimerState::Countdown;
        self.countdown_remaining = self.settings.countdown_seconds;
        info!(phase = %self.phase, from = self.countdown_remaining, "kickoff countdown started");
    }

    fn resume(&mut self, now: DateTime<Utc>) -> Vec<TimerEvent> {
        let pause_duration = self.pause_started_at.take().map_or(0, |started| {
            u32::try_from((now - started).num_seconds().max(0)).unwrap_or(u32::MAX)
        });

        match self.phase {
            MatchPhase::FirstHalf => self.stoppage.first_half_seconds += pause_duration,
            MatchPhase::SecondHalf => self.stoppage.second_half_seconds += pause_duration,
            _ => {}
        }

        self.state = if self.in_stoppage {
            TimerState::Stoppage
        } else {
            TimerState::Running
        };
        info!(
            phase = %self.phase,
            pause_duration,
            first_half_stoppage = self.stoppage.first_half_seconds,
            second_half_stoppage = self.stoppage.second_half_seconds,
            "clock resumed"
        );

        let event = TimerEvent::new(TimerEventType::TimerResume, self.current_match_time(), now)
            .with_duration(pause_duration);
        self.events.push(event.clone());
        vec![event]
    }

    fn tick_countdown(&mut self, now: DateTime<Utc>) -> Vec<TimerEvent> {
        self.countdown_remaining = self.countdown_remaining.saturating_sub(1);
        debug!(remaining = self.countdown_remaining, "countdown tick");
        if self.countdown_remaining > 0 {
            return Vec::new();
        }

        match self.phase {
            MatchPhase::CountdownFirst => {
                self.phase = MatchPhase::FirstHalf;
                self.state = TimerState::Running;
                self.elapsed_seconds = 0;
                info!("first half kicked off");
                vec![
                    self.emit(TimerEventType::MatchStart, 0, now),
                    self.emit(TimerEventType::FirstHalfStart, 0, now),
                ]
            }
            MatchPhase::CountdownSecond => {
                self.phase = MatchPhase::SecondHalf;
                self.state = TimerState::Running;
                info!(elapsed = self.elapsed_seconds, "second half kicked off");
                vec![self.emit(TimerEventType::SecondHalfStart, self.elapsed_seconds, now)]
            }
            // Countdown state outside a countdown phase cannot be reached.
            _ => Vec::new(),
        }
    }

    fn tick_running(&mut self, now: DateTime<Utc>) -> Vec<TimerEvent> {
        self.elapsed_seconds += 1;

        match self.phase {
            MatchPhase::FirstHalf if self.elapsed_seconds == self.settings.half_duration_secs => {
                let mut events = vec![self.emit(
                    TimerEventType::FirstHalfEnd,
                    self.elapsed_seconds,
                    now,
                )];
                if self.stoppage.first_half_seconds > 0 {
                    self.enter_stoppage();
                } else {
                    self.phase = MatchPhase::Halftime;
                    self.state = TimerState::Idle;
                    info!("half-time (no stoppage)");
                    events.push(self.emit(TimerEventType::HalftimeStart, self.elapsed_seconds, now));
                }
                events
            }
            MatchPhase::SecondHalf if self.elapsed_seconds == self.settings.full_duration_secs() => {
                let mut events = vec![self.emit(
                    TimerEventType::SecondHalfEnd,
                    self.elapsed_seconds,
                    now,
                )];
                if self.stoppage.second_half_seconds > 0 {
                    self.enter_stoppage();
                } else {
                    self.complete(&mut events, now);
                }
                events
            }
            _ => Vec::new(),
        }
    }

    fn tick_stoppage(&mut self, now: DateTime<Utc>) -> Vec<TimerEvent> {
        self.stoppage_elapsed += 1;
        let total = match self.phase {
            MatchPhase::FirstHalf => self.stoppage.first_half_seconds,
            _ => self.stoppage.second_half_seconds,
        };

        if self.stoppage_elapsed < total {
            return Vec::new();
        }

        self.in_stoppage = false;
        let mut events = vec![self.emit(
            TimerEventType::StoppageTimeEnd,
            self.elapsed_seconds + self.stoppage_elapsed,
            now,
        )];

        if self.phase == MatchPhase::FirstHalf {
            self.phase = MatchPhase::Halftime;
            self.state = TimerState::Idle;
            info!(played = self.stoppage_elapsed, "first-half stoppage complete");
            events.push(self.emit(TimerEventType::HalftimeStart, self.elapsed_seconds, now));
        } else {
            info!(played = self.stoppage_elapsed, "second-half stoppage complete");
            self.complete(&mut events, now);
        }
        events
    }

    fn enter_stoppage(&mut self) {
        self.in_stoppage = true;
        self.stoppage_elapsed = 0;
        self.state = TimerState::Stoppage;
        info!(phase = %self.phase, "entering stoppage time");
    }

    fn complete(&mut self, events: &mut Vec<TimerEvent>, now: DateTime<Utc>) {
        self.phase = MatchPhase::Complete;
        self.state = TimerState::Complete;
        info!(elapsed = self.elapsed_seconds, "full time");
        events.push(self.emit(
            TimerEventType::MatchComplete,
            self.elapsed_seconds + self.stoppage_elapsed,
            now,
        ));
    }

    fn emit(
        &mut self,
        event_type: TimerEventType,
        match_time: u32,
        now: DateTime<Utc>,
    ) -> TimerEvent {
        let event = TimerEvent::new(event_type, match_time, now);
        debug!(event = %event_type, match_time, "timer event");
        self.events.push(event.clone());
        event
    }

    fn invalid(&self, action: &str) -> ActionError {
        ActionError::InvalidTransition {
            action: action.to_string(),
            phase: self.phase.to_string(),
            state: self.state.to_string(),
        }
    }
}
