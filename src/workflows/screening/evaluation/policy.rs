use serde::{Deserialize, Serialize};

use super::super::similarity::clamp_score;
use super::threshold::ThresholdPolicy;

/// Which score settled the decision and how it compared to the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "basis", rename_all = "snake_case")]
pub enum DecisionBasis {
    SimilarityBelowThreshold { similarity_score: f64 },
    FinalBelowThreshold { final_score: f64 },
    FinalMeetsThreshold { final_score: f64 },
    SimilarityMeetsThreshold { similarity_score: f64 },
}

impl DecisionBasis {
    pub fn summary(&self, threshold: f64) -> String {
        match self {
            DecisionBasis::SimilarityBelowThreshold { similarity_score } => format!(
                "Similarity score ({similarity_score:.1}) below threshold ({threshold:.1})"
            ),
            DecisionBasis::FinalBelowThreshold { final_score } => {
                format!("Final score ({final_score:.1}) below threshold ({threshold:.1})")
            }
            DecisionBasis::FinalMeetsThreshold { final_score } => format!(
                "Final score ({final_score:.1}) meets or exceeds threshold ({threshold:.1})"
            ),
            DecisionBasis::SimilarityMeetsThreshold { similarity_score } => format!(
                "Similarity score ({similarity_score:.1}) meets or exceeds threshold ({threshold:.1})"
            ),
        }
    }
}

/// Shortlist outcome for one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortlistDecision {
    pub accepted: bool,
    pub reason: String,
    pub threshold: f64,
    pub basis: DecisionBasis,
}

impl ShortlistDecision {
    fn new(accepted: bool, threshold: f64, basis: DecisionBasis) -> Self {
        Self {
            accepted,
            reason: basis.summary(threshold),
            threshold,
            basis,
        }
    }

    /// Final score implied by the decision, if the recruiting score was blended in.
    pub fn final_score(&self) -> Option<f64> {
        match self.basis {
            DecisionBasis::FinalBelowThreshold { final_score }
            | DecisionBasis::FinalMeetsThreshold { final_score } => Some(final_score),
            _ => None,
        }
    }
}

/// Mean of the two scores when both are known, otherwise whichever one is present.
pub fn calculate_final_score(similarity: Option<f64>, recruiting: Option<f64>) -> Option<f64> {
    match (similarity, recruiting) {
        (Some(similarity), Some(recruiting)) => Some(clamp_score((similarity + recruiting) / 2.0)),
        (Some(score), None) | (None, Some(score)) => Some(clamp_score(score)),
        (None, None) => None,
    }
}

pub(crate) fn decide_outcome(
    policy: &ThresholdPolicy,
    similarity_score: f64,
    recruiting_score: Option<f64>,
    job_title: Option<&str>,
) -> ShortlistDecision {
    let threshold = policy.threshold(job_title);
    let similarity_score = clamp_score(similarity_score);
    let recruiting_score = recruiting_score.map(clamp_score);

    // Below threshold the recruiting score is never consulted.
    if similarity_score < threshold {
        return ShortlistDecision::new(
            false,
            threshold,
            DecisionBasis::SimilarityBelowThreshold { similarity_score },
        );
    }

    match calculate_final_score(Some(similarity_score), recruiting_score) {
        Some(final_score) if recruiting_score.is_some() => {
            if final_score >= threshold {
                ShortlistDecision::new(
                    true,
                    threshold,
                    DecisionBasis::FinalMeetsThreshold { final_score },
                )
            } else {
                ShortlistDecision::new(
                    false,
                    threshold,
                    DecisionBasis::FinalBelowThreshold { final_score },
                )
            }
        }
        _ => ShortlistDecision::new(
            true,
            threshold,
            DecisionBasis::SimilarityMeetsThreshold { similarity_score },
        ),
    }
}
