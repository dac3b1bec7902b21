use std::cmp::Ordering;

use super::domain::CandidateRecord;
use super::evaluation::calculate_final_score;

/// Top `limit` candidates by final score, descending; ties keep input order.
///
/// Final scores are recomputed here with 0.0 standing in for a missing
/// recruiting score, so an unevaluated candidate ranks on half its similarity.
/// This differs from the pass-through used when deciding.
pub fn rank(mut candidates: Vec<CandidateRecord>, limit: i64) -> Vec<CandidateRecord> {
    if limit <= 0 {
        return Vec::new();
    }

    for candidate in &mut candidates {
        candidate.final_score = calculate_final_score(
            Some(candidate.similarity_score),
            Some(candidate.recruiting_score.unwrap_or(0.0)),
        );
    }

    candidates.sort_by(|a, b| {
        let left = a.final_score.unwrap_or(0.0);
        let right = b.final_score.unwrap_or(0.0);
        right.partial_cmp(&left).unwrap_or(Ordering::Equal)
    });

    let limit = usize::try_from(limit).unwrap_or(usize::MAX);
    candidates.truncate(limit);
    candidates
}
