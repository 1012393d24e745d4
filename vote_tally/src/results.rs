use log::debug;

use crate::model::{Candidate, DepartmentGroup, TallySummary, WinnerRecord};

/// Partitions candidates by department.
///
/// Buckets appear in first-occurrence order and candidates keep their
/// input order inside a bucket. Nothing is sorted: the roster author
/// decided the display order.
pub fn group_by_department(candidates: &[Candidate]) -> Vec<DepartmentGroup> {
    let mut groups: Vec<DepartmentGroup> = Vec::new();
    for c in candidates.iter() {
        match groups.iter_mut().find(|g| g.name == c.department) {
            Some(g) => g.candidates.push(c.clone()),
            None => groups.push(DepartmentGroup {
                name: c.department.clone(),
                candidates: vec![c.clone()],
            }),
        }
    }
    groups
}

/// Computes the winner set of every department, in grouping order.
///
/// A department where nobody received a vote reports `max_votes == 0`
/// and an empty winner set. Ties are preserved: every candidate at the
/// maximum is a winner, and no arbitrary pick is made.
pub fn compute_winners(groups: &[DepartmentGroup]) -> Vec<WinnerRecord> {
    groups
        .iter()
        .map(|g| {
            let max_votes = g.candidates.iter().map(|c| c.votes).max().unwrap_or(0);
            let winning: Vec<Candidate> = if max_votes > 0 {
                g.candidates
                    .iter()
                    .filter(|c| c.votes == max_votes)
                    .cloned()
                    .collect()
            } else {
                Vec::new()
            };
            debug!(
                "compute_winners: department {:?} max {} winners {}",
                g.name,
                max_votes,
                winning.len()
            );
            WinnerRecord {
                department: g.name.clone(),
                candidates: winning,
                max_votes,
            }
        })
        .collect()
}

/// Summary totals for the results display.
pub fn summarize(candidates: &[Candidate], groups: &[DepartmentGroup]) -> TallySummary {
    TallySummary {
        total_votes: candidates.iter().map(|c| c.votes).sum(),
        total_departments: groups.len(),
    }
}
