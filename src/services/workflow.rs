//! Inspection status transition table

use crate::{
    error::{AppError, AppResult},
    models::enums::{InspectionStatus, SignoffOutcome},
};

/// Status-changing actions on an inspection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Complete,
    Approve,
    Reject,
    /// Administrative reopen of a rejected inspection
    Reopen,
}

impl Transition {
    pub fn label(self) -> &'static str {
        match self {
            Transition::Complete => "complete",
            Transition::Approve => "approve",
            Transition::Reject => "reject",
            Transition::Reopen => "reopen",
        }
    }
}

/// Transition requested by a sign-off outcome
pub fn signoff_transition(outcome: SignoffOutcome) -> Option<Transition> {
    match outcome {
        SignoffOutcome::Approve => Some(Transition::Approve),
        SignoffOutcome::Reject => Some(Transition::Reject),
        SignoffOutcome::Acknowledge => None,
    }
}

/// Status reached by applying `transition` in `current`, if allowed
pub fn next_status(current: InspectionStatus, transition: Transition) -> Option<InspectionStatus> {
    use InspectionStatus::*;

    match (current, transition) {
        (InProgress, Transition::Complete) => Some(Completed),
        (Completed, Transition::Approve) => Some(Approved),
        (Completed, Transition::Reject) => Some(Rejected),
        (Rejected, Transition::Reopen) => Some(InProgress),
        (InProgress | Completed | Approved | Rejected, _) => None,
    }
}

/// Status after a sign-off with `outcome`; acknowledgements keep the status
pub fn status_after_signoff(
    current: InspectionStatus,
    outcome: SignoffOutcome,
) -> AppResult<InspectionStatus> {
    match signoff_transition(outcome) {
        None => Ok(current),
        Some(transition) => apply(current, transition),
    }
}

/// Like `next_status` but reports a refused transition as an error
pub fn apply(current: InspectionStatus, transition: Transition) -> AppResult<InspectionStatus> {
    next_status(current, transition).ok_or_else(|| {
        AppError::InvalidTransition(format!(
            "cannot {} an inspection that is {}",
            transition.label(),
            current
        ))
    })
}
