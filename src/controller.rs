//! Match orchestration.
//!
//! [`MatchController`] wires the confirmation gate in front of the clock
//! engine and score tracker, appends the events they produce, and pushes
//! every committed change to the session mirror when one is attached.
//! The mirror is write-behind: a push failure is logged and the live
//! match state carries on unaffected.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::clock::{
    ClockEngine, ClockSnapshot, StoppageRecord, TickSource, TimerEvent, format_match_time,
};
use crate::config::MatchSettings;
use crate::confirm::{ActionKind, ConfirmationGate, PendingAction, PromptVariant};
use crate::error::ActionError;
use crate::score::{ScoreDelta, ScoreEvent, ScoreState, ScoreTracker, Team};
use crate::session::{SessionPatch, SessionStore};

/// Attachment point for the persisted session projection.
struct Mirror {
    store: Arc<dyn SessionStore>,
    session_id: Uuid,
}

impl std::fmt::Debug for Mirror {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mirror")
            .field("session_id", &self.session_id)
            .finish_non_exhaustive()
    }
}

/// Owns the live match: clock, scores, confirmation gate, and the
/// optional session mirror.
#[derive(Debug)]
pub struct MatchController {
    engine: ClockEngine,
    tracker: ScoreTracker,
    gate: ConfirmationGate,
    mirror: Option<Mirror>,
    home_team: String,
    away_team: String,
}

impl MatchController {
    /// Creates a controller with no mirror and placeholder team labels.
    #[must_use]
    pub fn new(settings: MatchSettings) -> Self {
        Self {
            engine: ClockEngine::new(settings),
            tracker: ScoreTracker::new(),
            gate: ConfirmationGate::new(),
            mirror: None,
            home_team: "Home".to_string(),
            away_team: "Away".to_string(),
        }
    }

    /// Sets the team labels used in confirmation prompts.
    #[must_use]
    pub fn with_teams(mut self, home: impl Into<String>, away: impl Into<String>) -> Self {
        self.home_team = home.into();
        self.away_team = away.into();
        self
    }

    /// Attaches a session mirror; every committed change is pushed to it.
    #[must_use]
    pub fn with_mirror(mut self, store: Arc<dyn SessionStore>, session_id: Uuid) -> Self {
        self.mirror = Some(Mirror { store, session_id });
        self
    }

    // ========================================================================
    // Read side
    // ========================================================================

    /// Current clock snapshot.
    #[must_use]
    pub const fn snapshot(&self) -> ClockSnapshot {
        self.engine.snapshot()
    }

    /// Per-half stoppage record.
    #[must_use]
    pub const fn stoppage(&self) -> StoppageRecord {
        self.engine.stoppage()
    }

    /// Current score pair.
    #[must_use]
    pub const fn scores(&self) -> ScoreState {
        self.tracker.state()
    }

    /// Clock lifecycle log, in emission order.
    #[must_use]
    pub fn timer_events(&self) -> &[TimerEvent] {
        self.engine.events()
    }

    /// Score change log, in commit order.
    #[must_use]
    pub fn score_events(&self) -> &[ScoreEvent] {
        self.tracker.events()
    }

    /// The staged action awaiting confirmation, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<&PendingAction> {
        self.gate.pending()
    }

    /// Whether the clock consumes ticks right now.
    #[must_use]
    pub const fn is_ticking(&self) -> bool {
        self.engine.is_ticking()
    }

    const fn team_label(&self, team: Team) -> &String {
        match team {
            Team::Home => &self.home_team,
            Team::Away => &self.away_team,
        }
    }

    // ========================================================================
    // Request side: stage an action, mutate nothing
    // ========================================================================

    /// Stages a start (kickoff countdown or resume).
    pub fn request_start(&mut self, now: DateTime<Utc>) -> &PendingAction {
        self.gate.request(PendingAction {
            kind: ActionKind::Start,
            title: "Start Timer".to_string(),
            description: "Are you sure you want to START the timer?".to_string(),
            variant: PromptVariant::Question,
            requested_at: now,
        })
    }

    /// Stages a pause.
    pub fn request_pause(&mut self, now: DateTime<Utc>) -> &PendingAction {
        self.gate.request(PendingAction {
            kind: ActionKind::Pause,
            title: "Pause Timer".to_string(),
            description: "Are you sure you want to PAUSE the timer?".to_string(),
            variant: PromptVariant::Question,
            requested_at: now,
        })
    }

    /// Stages a reset. Styled as a warning: the timer log is cleared.
    pub fn request_reset(&mut self, now: DateTime<Utc>) -> &PendingAction {
        self.gate.request(PendingAction {
            kind: ActionKind::Reset,
            title: "Reset Timer".to_string(),
            description: "Are you sure you want to RESET the timer? All timer logs will be cleared."
                .to_string(),
            variant: PromptVariant::Warning,
            requested_at: now,
        })
    }

    /// Stages a score adjustment.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::ScoreAtZero`] when a decrement would cross
    /// zero; an inapplicable change is never staged.
    pub fn request_score(
        &mut self,
        team: Team,
        delta: ScoreDelta,
        now: DateTime<Utc>,
    ) -> Result<&PendingAction, ActionError> {
        let next = delta
            .apply(self.tracker.score(team))
            .ok_or_else(|| ActionError::ScoreAtZero {
                team: team.to_string(),
            })?;

        let description = format!(
            "{} {} score to {} at match time {}?",
            delta.label(),
            self.team_label(team),
            next,
            format_match_time(self.engine.snapshot().elapsed_seconds),
        );
        Ok(self.gate.request(PendingAction {
            kind: ActionKind::Score { team, delta },
            title: format!("{} Score", delta.label()),
            description,
            variant: PromptVariant::Question,
            requested_at: now,
        }))
    }

    /// Discards the staged action without applying it.
    pub fn cancel(&mut self) -> Option<PendingAction> {
        self.gate.cancel()
    }

    // ========================================================================
    // Commit side
    // ========================================================================

    /// Confirms and applies the staged action, then mirrors the result.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::NoPendingAction`] when nothing is staged,
    /// or the engine/tracker rejection when the action is no longer
    /// applicable. A rejected action leaves all state unchanged.
    pub async fn confirm(&mut self, now: DateTime<Utc>) -> Result<ActionKind, ActionError> {
        let kind = self.gate.confirm()?;
        match kind {
            ActionKind::Start => {
                let events = self.engine.start(now)?;
                self.mirror_timer_events(&events).await;
            }
            ActionKind::Pause => {
                let events = self.engine.pause(now)?;
                self.mirror_timer_events(&events).await;
            }
            ActionKind::Reset => {
                self.engine.reset();
                self.mirror_state().await;
            }
            ActionKind::Score { team, delta } => {
                let event =
                    self.tracker
                        .commit(team, delta, self.engine.snapshot().elapsed_seconds, now)?;
                self.mirror_score_event(&event).await;
            }
        }
        Ok(kind)
    }

    /// Advances the clock by one tick and mirrors whatever it produced.
    pub async fn tick(&mut self, now: DateTime<Utc>) {
        let events = self.engine.tick(now);
        if events.is_empty() {
            // Plain second: mirror the counter, skip the event append.
            if self.engine.is_ticking() {
                self.mirror_state().await;
            }
        } else {
            self.mirror_timer_events(&events).await;
        }
    }

    // ========================================================================
    // Mirror pushes (write-behind, failures logged)
    // ========================================================================

    async fn mirror_timer_events(&self, events: &[TimerEvent]) {
        let Some(mirror) = &self.mirror else { return };
        for event in events {
            if let Err(error) = mirror
                .store
                .append_timer_event(mirror.session_id, event.clone())
                .await
            {
                warn!(%error, session_id = %mirror.session_id, "timer event mirror push failed");
            }
        }
        self.mirror_state().await;
    }

    async fn mirror_score_event(&self, event: &ScoreEvent) {
        let Some(mirror) = &self.mirror else { return };
        if let Err(error) = mirror
            .store
            .append_score_event(mirror.session_id, event.clone())
            .await
        {
            warn!(%error, session_id = %mirror.session_id, "score event mirror push failed");
        }
        self.mirror_state().await;
    }

    async fn mirror_state(&self) {
        let Some(mirror) = &self.mirror else { return };
        let scores = self.tracker.state();
        let patch = SessionPatch::from_clock(
            self.engine.snapshot(),
            self.engine.stoppage(),
            scores.home_score,
            scores.away_score,
        );
        match mirror.store.update(mirror.session_id, patch).await {
            Ok(_) => debug!(session_id = %mirror.session_id, "session mirrored"),
            Err(error) => {
                warn!(%error, session_id = %mirror.session_id, "session mirror push failed");
            }
        }
    }
}

/// Installs `source` to tick a shared controller once per interval.
///
/// The source owns the schedule; the controller stays behind its mutex so
/// confirmed actions and ticks serialize on the same state.
pub fn drive_clock(
    source: &mut TickSource,
    controller: &Arc<tokio::sync::Mutex<MatchController>>,
    tick_interval: std::time::Duration,
) {
    let controller = Arc::clone(controller);
    source.install(tick_interval, move || {
        let controller = Arc::clone(&controller);
        async move {
            controller.lock().await.tick(Utc::now()).await;
        }
    });
}
