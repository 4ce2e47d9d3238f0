//! The session mirror.
//!
//! A [`MatchSession`] is an external persisted projection of the live
//! match: pre-match data, clock-derived fields, stoppage record, scores,
//! and the two append-only event logs. The mirror is never authoritative
//! over the live clock.

pub mod store;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::{ClockSnapshot, MatchPhase, StoppageRecord, TimerEvent, TimerState};
use crate::prematch::PreMatchData;
use crate::score::ScoreEvent;

pub use store::{MemoryStore, SessionStore};

/// Persisted projection of one match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSession {
    /// Session identifier.
    pub id: Uuid,
    /// Immutable pre-match record.
    pub pre_match: PreMatchData,

    /// Current match phase.
    pub current_phase: MatchPhase,
    /// Current timer state.
    pub timer_state: TimerState,
    /// Regulation seconds elapsed.
    pub elapsed_seconds: u32,
    /// Whether the clock is inside stoppage time.
    pub in_stoppage: bool,
    /// Seconds counted within the current stoppage period.
    pub stoppage_elapsed: u32,
    /// Per-half stoppage record.
    pub stoppage: StoppageRecord,

    /// Home goals.
    pub home_score: u32,
    /// Away goals.
    pub away_score: u32,

    /// Append-only clock lifecycle log.
    pub timer_events: Vec<TimerEvent>,
    /// Append-only score change log.
    pub score_events: Vec<ScoreEvent>,

    /// Notes recorded after full time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_match_notes: Option<String>,
    /// When the match completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
}

impl MatchSession {
    /// Creates a fresh pre-match session around validated pre-match data.
    #[must_use]
    pub fn new(pre_match: PreMatchData, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            pre_match,
            current_phase: MatchPhase::PreMatch,
            timer_state: TimerState::Idle,
            elapsed_seconds: 0,
            in_stoppage: false,
            stoppage_elapsed: 0,
            stoppage: StoppageRecord::default(),
            home_score: 0,
            away_score: 0,
            timer_events: Vec::new(),
            score_events: Vec::new(),
            post_match_notes: None,
            completed_at: None,
            created_at: now,
        }
    }
}

/// Partial update for a session: every field optional, merged with
/// last-write-wins semantics per field. Event logs are not patchable —
/// they only grow through the append operations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionPatch {
    /// New match phase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_phase: Option<MatchPhase>,
    /// New timer state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timer_state: Option<TimerState>,
    /// New regulation elapsed seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_seconds: Option<u32>,
    /// New in-stoppage flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_stoppage: Option<bool>,
    /// New stoppage counter value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stoppage_elapsed: Option<u32>,
    /// New stoppage record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stoppage: Option<StoppageRecord>,
    /// New home score.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_score: Option<u32>,
    /// New away score.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub away_score: Option<u32>,
    /// New post-match notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_match_notes: Option<String>,
    /// Completion timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl SessionPatch {
    /// Builds a patch mirroring a clock snapshot and score pair.
    #[must_use]
    pub const fn from_clock(
        snapshot: ClockSnapshot,
        stoppage: StoppageRecord,
        home_score: u32,
        away_score: u32,
    ) -> Self {
        Self {
            current_phase: Some(snapshot.phase),
            timer_state: Some(snapshot.state),
            elapsed_seconds: Some(snapshot.elapsed_seconds),
            in_stoppage: Some(snapshot.in_stoppage),
            stoppage_elapsed: Some(snapshot.stoppage_elapsed),
            stoppage: Some(stoppage),
            home_score: Some(home_score),
            away_score: Some(away_score),
            post_match_notes: None,
            completed_at: None,
        }
    }

    /// Applies the patch to a session, field by field.
    pub fn apply(&self, session: &mut MatchSession) {
        if let Some(phase) = self.current_phase {
            session.current_phase = phase;
        }
        if let Some(state) = self.timer_state {
            session.timer_state = state;
        }
        if let Some(elapsed) = self.elapsed_seconds {
            session.elapsed_seconds = elapsed;
        }
        if let Some(in_stoppage) = self.in_stoppage {
            session.in_stoppage = in_stoppage;
        }
        if let Some(stoppage_elapsed) = self.stoppage_elapsed {
            session.stoppage_elapsed = stoppage_elapsed;
        }
        if let Some(stoppage) = self.stoppage {
            session.stoppage = stoppage;
        }
        if let Some(home) = self.home_score {
            session.home_score = home;
        }
        if let Some(away) = self.away_score {
            session.away_score = away;
        }
        if let Some(notes) = &self.post_match_notes {
            session.post_match_notes = Some(notes.clone());
        }
        if let Some(completed_at) = self.completed_at {
            session.completed_at = Some(completed_at);
        }
    }
}
