use serde::Serialize;
use std::io::Write;

use super::domain::CandidateRecord;

#[derive(Debug, Serialize)]
struct ShortlistRow<'a> {
    rank: usize,
    candidate_id: &'a str,
    name: &'a str,
    similarity_score: String,
    recruiting_score: String,
    final_score: String,
    shortlisting_reason: &'a str,
}

fn format_score(score: Option<f64>) -> String {
    score.map(|value| format!("{value:.2}")).unwrap_or_default()
}

/// Write ranked candidates as CSV, one row per candidate in the given order.
pub fn write_shortlist_csv<W: Write>(
    writer: W,
    ranked: &[CandidateRecord],
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for (index, candidate) in ranked.iter().enumerate() {
        csv_writer.serialize(ShortlistRow {
            rank: index + 1,
            candidate_id: &candidate.candidate_id.0,
            name: candidate.display_name(),
            similarity_score: format_score(Some(candidate.similarity_score)),
            recruiting_score: format_score(candidate.recruiting_score),
            final_score: format_score(candidate.final_score),
            shortlisting_reason: &candidate.shortlisting_reason,
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}
