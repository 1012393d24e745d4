// ********* Public data structures ***********

use std::error::Error;
use std::fmt::Display;

/// One nominee for one department seat.
///
/// Created once by the roster parser; the vote count is only ever
/// mutated through [`crate::TallySession::adjust_vote`].
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Candidate {
    /// Opaque identifier, unique within a session.
    pub id: String,
    pub department: String,
    pub name: String,
    pub class_name: String,
    pub votes: u64,
}

/// The session-wide stage. It gates which operations are legal.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Phase {
    Setup,
    Voting,
    Results,
}

impl Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Setup => write!(f, "setup"),
            Phase::Voting => write!(f, "voting"),
            Phase::Results => write!(f, "results"),
        }
    }
}

// ******** Derived views *********

/// A department bucket. Candidate order is input order, buckets are in
/// first-seen order.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DepartmentGroup {
    pub name: String,
    pub candidates: Vec<Candidate>,
}

/// The outcome for one department: the set of candidates sharing the
/// maximum vote count. The set is empty when the maximum is zero, which
/// means "no winner yet" rather than an arbitrary zero-vote pick.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct WinnerRecord {
    pub department: String,
    pub candidates: Vec<Candidate>,
    pub max_votes: u64,
}

/// Summary totals over a final snapshot.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TallySummary {
    pub total_votes: u64,
    pub total_departments: usize,
}

// ******** Errors *********

/// Errors raised by the tally session operations.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum TallyError {
    /// The roster text parsed to zero candidates. Recoverable: the
    /// session stays in setup and the operator resubmits.
    EmptyRoster,
    /// A vote adjustment referenced an id that is not in the session.
    /// Ids are internal, so this is a referential-integrity fault.
    CandidateNotFound(String),
    /// The operation is not legal in the current phase.
    PhaseMismatch {
        operation: &'static str,
        phase: Phase,
    },
}

impl Error for TallyError {}

impl Display for TallyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TallyError::EmptyRoster => {
                write!(f, "no candidates could be parsed from the roster")
            }
            TallyError::CandidateNotFound(id) => {
                write!(f, "no candidate with id {}", id)
            }
            TallyError::PhaseMismatch { operation, phase } => {
                write!(f, "operation {} is not legal in phase {}", operation, phase)
            }
        }
    }
}
