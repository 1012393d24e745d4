mod matcher;
mod model;
mod parser;
mod results;
mod romanize;

use log::{debug, info, warn};

pub use crate::matcher::match_candidates;
pub use crate::model::*;
pub use crate::parser::{parse_roster, UNKNOWN_CLASS};
pub use crate::results::{compute_winners, group_by_department, summarize};
pub use crate::romanize::{NullRomanizer, PinyinRomanizer, Romanizer};

/// The authoritative session state: the candidate collection, the
/// current phase and the frozen results snapshot.
///
/// All mutation is funneled through the operations below; every other
/// component works on read-only views handed out for the duration of a
/// single synchronous computation. Operations run to completion on one
/// logical thread, so no two of them ever interleave.
#[derive(Debug, Clone, Default)]
pub struct TallySession {
    phase: PhaseState,
    candidates: Vec<Candidate>,
    snapshot: Option<Vec<Candidate>>,
}

// Wrapper so that Default lands on Setup.
#[derive(Debug, Clone, Copy)]
struct PhaseState(Phase);

impl Default for PhaseState {
    fn default() -> Self {
        PhaseState(Phase::Setup)
    }
}

impl TallySession {
    pub fn new() -> TallySession {
        TallySession::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase.0
    }

    /// The live candidate collection.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// The immutable snapshot taken by [`finish`](Self::finish), if the
    /// session is in the results phase.
    pub fn snapshot(&self) -> Option<&[Candidate]> {
        self.snapshot.as_deref()
    }

    /// Parses the roster text and moves the session into voting.
    ///
    /// A roster that parses to zero candidates fails with
    /// [`TallyError::EmptyRoster`] and leaves the phase untouched, so
    /// the operator can fix the input and resubmit.
    pub fn load(&mut self, text: &str) -> Result<usize, TallyError> {
        self.expect_phase(Phase::Setup, "load")?;
        let parsed = parse_roster(text);
        if parsed.is_empty() {
            return Err(TallyError::EmptyRoster);
        }
        info!("load: {} candidates, entering voting phase", parsed.len());
        let n = parsed.len();
        self.candidates = parsed;
        self.phase = PhaseState(Phase::Voting);
        Ok(n)
    }

    /// Applies a vote delta to one candidate and returns the new count.
    /// The count is clamped at zero, no matter how many decrements are
    /// applied.
    pub fn adjust_vote(&mut self, id: &str, delta: i64) -> Result<u64, TallyError> {
        self.expect_phase(Phase::Voting, "adjust_vote")?;
        let candidate = self
            .candidates
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| TallyError::CandidateNotFound(id.to_string()))?;
        candidate.votes = if delta < 0 {
            candidate.votes.saturating_sub(delta.unsigned_abs())
        } else {
            candidate.votes + delta as u64
        };
        debug!(
            "adjust_vote: {} ({}) delta {} -> {}",
            candidate.name, candidate.id, delta, candidate.votes
        );
        Ok(candidate.votes)
    }

    /// Matches the query against the live candidates. Voting-phase
    /// convenience for the quick-vote box.
    pub fn search<'a>(&'a self, query: &str, romanizer: &dyn Romanizer) -> Vec<&'a Candidate> {
        match_candidates(query, &self.candidates, romanizer)
    }

    /// Freezes the tally and moves into the results phase.
    ///
    /// The returned slice is a snapshot: any vote adjustment issued
    /// after a later [`reopen`](Self::reopen) leaves an already-taken
    /// snapshot untouched.
    pub fn finish(&mut self) -> Result<&[Candidate], TallyError> {
        self.expect_phase(Phase::Voting, "finish")?;
        info!(
            "finish: freezing tally of {} candidates",
            self.candidates.len()
        );
        self.snapshot = Some(self.candidates.clone());
        self.phase = PhaseState(Phase::Results);
        Ok(self.snapshot.as_deref().unwrap_or_default())
    }

    /// Returns from results to voting to correct the tally. Candidate
    /// data is kept; the frozen snapshot is superseded by the next
    /// [`finish`](Self::finish).
    pub fn reopen(&mut self) -> Result<(), TallyError> {
        self.expect_phase(Phase::Results, "reopen")?;
        info!("reopen: back to voting");
        self.snapshot = None;
        self.phase = PhaseState(Phase::Voting);
        Ok(())
    }

    /// Discards everything and returns to setup. Legal in any phase.
    pub fn reset(&mut self) {
        if !self.candidates.is_empty() {
            warn!(
                "reset: discarding {} candidates from phase {}",
                self.candidates.len(),
                self.phase.0
            );
        }
        self.candidates.clear();
        self.snapshot = None;
        self.phase = PhaseState(Phase::Setup);
    }

    fn expect_phase(&self, expected: Phase, operation: &'static str) -> Result<(), TallyError> {
        if self.phase.0 == expected {
            Ok(())
        } else {
            Err(TallyError::PhaseMismatch {
                operation,
                phase: self.phase.0,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROSTER: &str = "学习部 - 张三 (高二1班)\n文体部 - 王五 (高一2班)";

    #[test]
    fn empty_roster_keeps_setup_phase() {
        let mut session = TallySession::new();
        assert_eq!(session.load(""), Err(TallyError::EmptyRoster));
        assert_eq!(session.load("   \n  \n"), Err(TallyError::EmptyRoster));
        assert_eq!(session.phase(), Phase::Setup);
        assert!(session.candidates().is_empty());
    }

    #[test]
    fn load_enters_voting() {
        let mut session = TallySession::new();
        assert_eq!(session.load(ROSTER), Ok(2));
        assert_eq!(session.phase(), Phase::Voting);
        assert_eq!(session.candidates().len(), 2);
    }

    #[test]
    fn load_is_setup_only() {
        let mut session = TallySession::new();
        session.load(ROSTER).unwrap();
        assert!(matches!(
            session.load(ROSTER),
            Err(TallyError::PhaseMismatch { .. })
        ));
    }

    #[test]
    fn votes_never_go_negative() {
        let mut session = TallySession::new();
        session.load(ROSTER).unwrap();
        let id = session.candidates()[0].id.clone();
        assert_eq!(session.adjust_vote(&id, -1), Ok(0));
        assert_eq!(session.adjust_vote(&id, 1), Ok(1));
        assert_eq!(session.adjust_vote(&id, -1), Ok(0));
        assert_eq!(session.adjust_vote(&id, -1), Ok(0));
    }

    #[test]
    fn unknown_id_is_reported() {
        let mut session = TallySession::new();
        session.load(ROSTER).unwrap();
        assert_eq!(
            session.adjust_vote("no-such-id", 1),
            Err(TallyError::CandidateNotFound("no-such-id".to_string()))
        );
    }

    #[test]
    fn voting_is_gated_by_phase() {
        let mut session = TallySession::new();
        assert!(matches!(
            session.adjust_vote("x", 1),
            Err(TallyError::PhaseMismatch { .. })
        ));
        session.load(ROSTER).unwrap();
        session.finish().unwrap();
        let id = session.candidates()[0].id.clone();
        assert!(matches!(
            session.adjust_vote(&id, 1),
            Err(TallyError::PhaseMismatch { .. })
        ));
    }

    #[test]
    fn finish_freezes_a_snapshot() {
        let mut session = TallySession::new();
        session.load(ROSTER).unwrap();
        let id = session.candidates()[0].id.clone();
        session.adjust_vote(&id, 1).unwrap();
        let frozen: Vec<Candidate> = session.finish().unwrap().to_vec();
        assert_eq!(frozen[0].votes, 1);

        // Correct the tally and freeze again: the first snapshot does
        // not move.
        session.reopen().unwrap();
        session.adjust_vote(&id, 5).unwrap();
        assert_eq!(frozen[0].votes, 1);
        let second: Vec<Candidate> = session.finish().unwrap().to_vec();
        assert_eq!(second[0].votes, 6);
    }

    #[test]
    fn reopen_keeps_data() {
        let mut session = TallySession::new();
        session.load(ROSTER).unwrap();
        session.finish().unwrap();
        session.reopen().unwrap();
        assert_eq!(session.phase(), Phase::Voting);
        assert_eq!(session.candidates().len(), 2);
        assert!(session.snapshot().is_none());
    }

    #[test]
    fn reset_from_any_phase() {
        let mut session = TallySession::new();
        session.load(ROSTER).unwrap();
        let id = session.candidates()[0].id.clone();
        session.adjust_vote(&id, 3).unwrap();
        session.reset();
        assert_eq!(session.phase(), Phase::Setup);
        assert!(session.candidates().is_empty());

        session.load(ROSTER).unwrap();
        session.finish().unwrap();
        session.reset();
        assert_eq!(session.phase(), Phase::Setup);
        assert!(session.snapshot().is_none());
    }
}
