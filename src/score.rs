//! Score tracking.
//!
//! Per-team scores with clamped single-step adjustments and an
//! append-only score event log. Score events are stamped with the
//! clock's regulation elapsed time, never stoppage time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::ActionError;

/// Side of the scoreboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    /// Home side.
    Home,
    /// Away side.
    Away,
}

impl Team {
    /// Wire name (`"home"` / `"away"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Away => "away",
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single-step score adjustment. The reference UI exposes no arbitrary
/// deltas, so the type admits none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreDelta {
    /// +1 goal.
    Increase,
    /// −1 goal (clamped at zero).
    Decrease,
}

impl ScoreDelta {
    /// Display label used in confirmation prompts.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Increase => "Increase",
            Self::Decrease => "Decrease",
        }
    }

    /// The score this delta would produce, or `None` when a decrement
    /// hits the zero boundary.
    #[must_use]
    pub const fn apply(self, current: u32) -> Option<u32> {
        match self {
            Self::Increase => Some(current + 1),
            Self::Decrease => match current.checked_sub(1) {
                Some(next) => Some(next),
                None => None,
            },
        }
    }
}

/// Current score pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreState {
    /// Home goals.
    pub home_score: u32,
    /// Away goals.
    pub away_score: u32,
}

/// A committed score change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEvent {
    /// Unique event identifier.
    pub id: Uuid,
    /// Team whose score changed.
    pub team: Team,
    /// Regulation match time at the change, in seconds.
    pub match_time_seconds: u32,
    /// Wall-clock time of the change.
    pub timestamp: DateTime<Utc>,
    /// Home score after the change.
    pub home_score: u32,
    /// Away score after the change.
    pub away_score: u32,
}

/// Maintains both scores and the score event log.
#[derive(Debug, Clone, Default)]
pub struct ScoreTracker {
    home_score: u32,
    away_score: u32,
    events: Vec<ScoreEvent>,
}

impl ScoreTracker {
    /// Creates a 0-0 tracker.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            home_score: 0,
            away_score: 0,
            events: Vec::new(),
        }
    }

    /// Current score for one team.
    #[must_use]
    pub const fn score(&self, team: Team) -> u32 {
        match team {
            Team::Home => self.home_score,
            Team::Away => self.away_score,
        }
    }

    /// Current score pair.
    #[must_use]
    pub const fn state(&self) -> ScoreState {
        ScoreState {
            home_score: self.home_score,
            away_score: self.away_score,
        }
    }

    /// Score events committed so far, in commit order.
    #[must_use]
    pub fn events(&self) -> &[ScoreEvent] {
        &self.events
    }

    /// Whether the delta is applicable (a decrement at zero is not;
    /// the UI disables the button, the tracker guards regardless).
    #[must_use]
    pub const fn can_apply(&self, team: Team, delta: ScoreDelta) -> bool {
        delta.apply(self.score(team)).is_some()
    }

    /// Commits an adjustment and appends the score event.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::ScoreAtZero`] for a decrement at zero;
    /// no event is produced and the score is unchanged.
    pub fn commit(
        &mut self,
        team: Team,
        delta: ScoreDelta,
        match_time_seconds: u32,
        now: DateTime<Utc>,
    ) -> Result<ScoreEvent, ActionError> {
        let next = delta
            .apply(self.score(team))
            .ok_or_else(|| ActionError::ScoreAtZero {
                team: team.to_string(),
            })?;

        match team {
            Team::Home => self.home_score = next,
            Team::Away => self.away_score = next,
        }

        info!(
            %team,
            home = self.home_score,
            away = self.away_score,
            match_time = match_time_seconds,
            "score committed"
        );

        let event = ScoreEvent {
            id: Uuid::new_v4(),
            team,
            match_time_seconds,
            timestamp: now,
            home_score: self.home_score,
            away_score: self.away_score,
        };
        self.events.push(event.clone());
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tracker_is_nil_nil() {
        let tracker = ScoreTracker::new();
        assert_eq!(tracker.state(), ScoreState::default());
        assert!(tracker.events().is_empty());
    }

    #[test]
    fn test_increase_commits_and_logs() {
        let mut tracker = ScoreTracker::new();
        let event = tracker
            .commit(Team::Home, ScoreDelta::Increase, 754, Utc::now())
            .unwrap();

        assert_eq!(tracker.score(Team::Home), 1);
        assert_eq!(tracker.score(Team::Away), 0);
        assert_eq!(event.home_score, 1);
        assert_eq!(event.away_score, 0);
        assert_eq!(event.match_time_seconds, 754);
        assert_eq!(tracker.events().len(), 1);
    }

    #[test]
    fn test_decrease_at_zero_rejected_without_event() {
        let mut tracker = ScoreTracker::new();
        let err = tracker
            .commit(Team::Home, ScoreDelta::Decrease, 100, Utc::now())
            .unwrap_err();

        assert_eq!(
            err,
            ActionError::ScoreAtZero {
                team: "home".to_string()
            }
        );
        assert_eq!(tracker.score(Team::Home), 0);
        assert!(tracker.events().is_empty());
    }

    #[test]
    fn test_can_apply_boundary() {
        let mut tracker = ScoreTracker::new();
        assert!(tracker.can_apply(Team::Away, ScoreDelta::Increase));
        assert!(!tracker.can_apply(Team::Away, ScoreDelta::Decrease));

        tracker
            .commit(Team::Away, ScoreDelta::Increase, 0, Utc::now())
            .unwrap();
        assert!(tracker.can_apply(Team::Away, ScoreDelta::Decrease));
    }

    #[test]
    fn test_decrease_after_increase() {
        let mut tracker = ScoreTracker::new();
        tracker
            .commit(Team::Away, ScoreDelta::Increase, 60, Utc::now())
            .unwrap();
        tracker
            .commit(Team::Away, ScoreDelta::Decrease, 75, Utc::now())
            .unwrap();

        assert_eq!(tracker.score(Team::Away), 0);
        assert_eq!(tracker.events().len(), 2);
        assert_eq!(tracker.events()[1].away_score, 0);
    }

    #[test]
    fn test_events_carry_post_commit_pair() {
        let mut tracker = ScoreTracker::new();
        tracker
            .commit(Team::Home, ScoreDelta::Increase, 10, Utc::now())
            .unwrap();
        let event = tracker
            .commit(Team::Away, ScoreDelta::Increase, 20, Utc::now())
            .unwrap();

        assert_eq!(event.home_score, 1);
        assert_eq!(event.away_score, 1);
    }

    #[test]
    fn test_team_serde_wire_names() {
        assert_eq!(serde_json::to_string(&Team::Home).unwrap(), "\"home\"");
        let team: Team = serde_json::from_str("\"away\"").unwrap();
        assert_eq!(team, Team::Away);
    }
}
