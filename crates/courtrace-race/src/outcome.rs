//! Flow and race outcome types

use courtrace_core::{BookingConfirmation, BookingStep, Candidate};
use courtrace_http::GatewayError;
use thiserror::Error;

/// Why a step failed.
#[derive(Debug, Error)]
pub enum FlowError {
    /// Transport failure, timeout, or non-2xx status from the gateway.
    #[error("Request failed: {0}")]
    Request(#[from] GatewayError),

    /// Slot discovery returned no entry matching the candidate's
    /// time-constraint identifier.
    #[error("Time slot {time_constraint_id} not found in discovery response")]
    SlotNotFound { time_constraint_id: i64 },

    /// The commit call completed but the server refused the booking.
    #[error("Commit rejected (code {code:?}): {message}")]
    CommitRejected { code: Option<i64>, message: String },
}

/// A flow's terminal failure: which step failed and why.
#[derive(Debug, Error)]
#[error("{step} failed: {error}")]
pub struct FlowFailure {
    pub step: BookingStep,
    pub error: FlowError,
}

impl FlowFailure {
    pub fn new(step: BookingStep, error: impl Into<FlowError>) -> Self {
        Self {
            step,
            error: error.into(),
        }
    }
}

/// Terminal outcome of one candidate flow. Produced once per flow, consumed
/// by the orchestrator.
#[derive(Debug)]
pub struct FlowResult {
    pub candidate: Candidate,
    pub outcome: Result<BookingConfirmation, FlowFailure>,
}

impl FlowResult {
    /// Whether this flow committed a booking.
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Process-level terminal state of the race. The only value the caller
/// observes.
#[derive(Debug)]
pub enum RaceOutcome {
    /// The first candidate (in completion order) whose commit was accepted.
    /// `rest` holds every other flow's result for diagnostics, including any
    /// success that arrived after the winner latched.
    Won {
        winner: FlowResult,
        rest: Vec<FlowResult>,
    },

    /// Every flow completed without a committed booking; one result per
    /// candidate.
    AllFailed(Vec<FlowResult>),
}

impl RaceOutcome {
    pub fn is_won(&self) -> bool {
        matches!(self, RaceOutcome::Won { .. })
    }

    /// All flow results, winner first when there is one.
    pub fn results(&self) -> Vec<&FlowResult> {
        match self {
            RaceOutcome::Won { winner, rest } => {
                std::iter::once(winner).chain(rest.iter()).collect()
            }
            RaceOutcome::AllFailed(results) => results.iter().collect(),
        }
    }
}
