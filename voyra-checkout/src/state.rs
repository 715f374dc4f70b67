use serde::{Deserialize, Serialize};

/// Phase of one booking submission. Strictly sequential; PriceConfirm is
/// entered only when the backend reports a changed price on a successful
/// PreBook.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionState {
    Idle,
    Validating,
    PreBooking,
    PriceConfirm,
    CheckingOut,
    Redirecting,
}

impl SubmissionState {
    pub fn can_advance_to(self, next: SubmissionState) -> bool {
        use SubmissionState::*;
        matches!(
            (self, next),
            (Idle, Validating)
                | (Validating, PreBooking)
                | (PreBooking, PriceConfirm)
                | (PreBooking, CheckingOut)
                | (PriceConfirm, CheckingOut)
                | (CheckingOut, Redirecting)
        )
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Invalid submission transition from {from:?} to {to:?}")]
pub struct InvalidTransition {
    pub from: SubmissionState,
    pub to: SubmissionState,
}

/// Tracks the lifecycle of the in-flight submission. Any failure drops back
/// to Idle; there is no retry transition, the user re-triggers from scratch.
#[derive(Debug)]
pub struct SubmissionTracker {
    state: SubmissionState,
}

impl SubmissionTracker {
    pub fn new() -> Self {
        Self {
            state: SubmissionState::Idle,
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn advance(&mut self, next: SubmissionState) -> Result<(), InvalidTransition> {
        if !self.state.can_advance_to(next) {
            return Err(InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }

    /// Abort the submission; returns the stage it failed at.
    pub fn fail(&mut self) -> SubmissionState {
        let failed_at = self.state;
        self.state = SubmissionState::Idle;
        failed_at
    }

    /// Terminal success: the browser is leaving for the hosted payment page,
    /// so the engine itself returns to Idle.
    pub fn finish(&mut self) {
        self.state = SubmissionState::Idle;
    }
}

impl Default for SubmissionTracker {
    fn default() -> Self {
        Self::new()
    }
}
