use log::debug;

use crate::model::Candidate;
use crate::romanize::Romanizer;

/// Returns the candidates whose name matches the query, preserving the
/// input order. No relevance re-ranking happens here: during a live
/// tally the operator expects a stable listing.
///
/// A candidate matches when the query (case-insensitive) is a substring
/// of the name itself, of the joined romanized form ("zhangsan"), or of
/// the syllable initials ("zs"). The initials form is the one that
/// matters operationally: two or three keystrokes narrow a roster of
/// hundreds while votes are being called out.
///
/// An empty or whitespace-only query matches nothing; the quick-vote
/// box must not list everyone by default.
pub fn match_candidates<'a>(
    query: &str,
    candidates: &'a [Candidate],
    romanizer: &dyn Romanizer,
) -> Vec<&'a Candidate> {
    let term = query.trim().to_lowercase();
    if term.is_empty() {
        return Vec::new();
    }

    let matched: Vec<&Candidate> = candidates
        .iter()
        .filter(|c| candidate_matches(&term, c, romanizer))
        .collect();
    debug!(
        "match_candidates: query {:?} matched {} of {}",
        term,
        matched.len(),
        candidates.len()
    );
    matched
}

fn candidate_matches(term: &str, candidate: &Candidate, romanizer: &dyn Romanizer) -> bool {
    if candidate.name.to_lowercase().contains(term) {
        return true;
    }
    if let Some(syllables) = romanizer.syllables(&candidate.name) {
        let full = syllables.concat();
        if full.contains(term) {
            return true;
        }
        let initials: String = syllables
            .iter()
            .filter_map(|s| s.chars().next())
            .collect();
        if initials.contains(term) {
            return true;
        }
    }
    false
}
