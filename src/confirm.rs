//! The confirmation gate.
//!
//! Every mutating timer or score action is staged here first. Requesting
//! an action mutates nothing; the staged action is applied exactly once
//! when confirmed, and discarded without a trace when cancelled. A second
//! request while one is pending replaces the pending request with the
//! newest.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ActionError;
use crate::score::{ScoreDelta, Team};

/// The mutating actions that pass through the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ActionKind {
    /// Start the clock (kickoff countdown or resume from pause).
    Start,
    /// Pause the clock.
    Pause,
    /// Reset the clock to pre-match.
    Reset,
    /// Adjust one team's score by a single step.
    Score {
        /// Team whose score changes.
        team: Team,
        /// Direction of the change.
        delta: ScoreDelta,
    },
}

/// Visual weight of the confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptVariant {
    /// Routine confirmation.
    #[default]
    Question,
    /// Destructive action (reset).
    Warning,
}

/// A staged action awaiting confirmation.
#[derive(Debug, Clone, Serialize)]
pub struct PendingAction {
    /// What will happen on confirm.
    pub kind: ActionKind,
    /// Short prompt title (e.g. `"Pause Timer"`).
    pub title: String,
    /// Human-readable description of the consequence.
    pub description: String,
    /// Prompt styling hint.
    pub variant: PromptVariant,
    /// When the request was staged.
    pub requested_at: DateTime<Utc>,
}

/// Serializes access to state mutation: at most one action is pending,
/// and the single commit point is [`ConfirmationGate::confirm`].
#[derive(Debug, Default)]
pub struct ConfirmationGate {
    pending: Option<PendingAction>,
}

impl ConfirmationGate {
    /// Creates a gate with nothing pending.
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Stages an action, replacing any previously pending one.
    pub fn request(&mut self, action: PendingAction) -> &PendingAction {
        if let Some(previous) = &self.pending {
            warn!(
                replaced = ?previous.kind,
                new = ?action.kind,
                "pending confirmation replaced by newer request"
            );
        }
        debug!(kind = ?action.kind, title = %action.title, "action staged");
        self.pending.insert(action)
    }

    /// The currently staged action, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    /// Confirms the staged action, handing its kind to the caller for
    /// application. The gate is empty afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::NoPendingAction`] if nothing is staged.
    pub fn confirm(&mut self) -> Result<ActionKind, ActionError> {
        self.pending
            .take()
            .map(|action| action.kind)
            .ok_or(ActionError::NoPendingAction)
    }

    /// Discards the staged action with no state change.
    pub fn cancel(&mut self) -> Option<PendingAction> {
        let cancelled = self.pending.take();
        if let Some(action) = &cancelled {
            debug!(kind = ?action.kind, "action cancelled");
        }
        cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(kind: ActionKind) -> PendingAction {
        PendingAction {
            kind,
            title: "Test".to_string(),
            description: "Test action".to_string(),
            variant: PromptVariant::Question,
            requested_at: Utc::now(),
        }
    }

    #[test]
    fn test_request_then_confirm() {
        let mut gate = ConfirmationGate::new();
        gate.request(pending(ActionKind::Start));
        assert!(gate.pending().is_some());

        let kind = gate.confirm().unwrap();
        assert_eq!(kind, ActionKind::Start);
        assert!(gate.pending().is_none());
    }

    #[test]
    fn test_cancel_discards() {
        let mut gate = ConfirmationGate::new();
        gate.request(pending(ActionKind::Pause));
        let cancelled = gate.cancel().unwrap();
        assert_eq!(cancelled.kind, ActionKind::Pause);
        assert!(gate.pending().is_none());
        assert_eq!(gate.confirm().unwrap_err(), ActionError::NoPendingAction);
    }

    #[test]
    fn test_confirm_without_request_is_error() {
        let mut gate = ConfirmationGate::new();
        assert_eq!(gate.confirm().unwrap_err(), ActionError::NoPendingAction);
    }

    #[test]
    fn test_newest_request_replaces_pending() {
        let mut gate = ConfirmationGate::new();
        gate.request(pending(ActionKind::Start));
        gate.request(pending(ActionKind::Reset));

        let kind = gate.confirm().unwrap();
        assert_eq!(kind, ActionKind::Reset);
        // The replaced request is gone, not queued
        assert_eq!(gate.confirm().unwrap_err(), ActionError::NoPendingAction);
    }

    #[test]
    fn test_confirm_is_single_shot() {
        let mut gate = ConfirmationGate::new();
        gate.request(pending(ActionKind::Start));
        assert!(gate.confirm().is_ok());
        assert!(gate.confirm().is_err());
    }

    #[test]
    fn test_cancel_when_empty_is_none() {
        let mut gate = ConfirmationGate::new();
        assert!(gate.cancel().is_none());
    }
}
