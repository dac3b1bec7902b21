mod escalation;
mod policy;
mod threshold;

pub use escalation::{EscalationPolicy, EvaluatorError, RecruitingEvaluator};
pub use policy::{calculate_final_score, DecisionBasis, ShortlistDecision};
pub use threshold::{JobCategory, ThresholdPolicy};

use tracing::debug;

use super::domain::{CandidateRecord, CandidateStatus, JobRecord, ShortlistPartition};
use policy::decide_outcome;

/// Stateless engine applying the threshold policy to candidate scores.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortlistDecisionEngine {
    policy: ThresholdPolicy,
}

impl ShortlistDecisionEngine {
    pub fn new(policy: ThresholdPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ThresholdPolicy {
        &self.policy
    }

    pub fn decide(
        &self,
        similarity_score: f64,
        recruiting_score: Option<f64>,
        job_title: Option<&str>,
    ) -> ShortlistDecision {
        decide_outcome(&self.policy, similarity_score, recruiting_score, job_title)
    }

    /// Decide every candidate and split them into shortlisted and rejected, preserving input order.
    pub fn shortlist_candidates(
        &self,
        candidates: Vec<CandidateRecord>,
        job: &JobRecord,
    ) -> ShortlistPartition {
        let mut partition = ShortlistPartition::default();

        for mut candidate in candidates {
            let decision = self.decide(
                candidate.similarity_score,
                candidate.recruiting_score,
                job.job_title(),
            );
            debug!(
                candidate = %candidate.candidate_id.0,
                accepted = decision.accepted,
                reason = %decision.reason,
                "shortlist decision"
            );

            candidate.final_score =
                calculate_final_score(Some(candidate.similarity_score), candidate.recruiting_score);
            candidate.shortlisted = decision.accepted;
            candidate.shortlisting_reason = decision.reason;

            if decision.accepted {
                candidate.status = CandidateStatus::Shortlisted;
                partition.shortlisted.push(candidate);
            } else {
                candidate.status = CandidateStatus::Rejected;
                partition.rejected.push(candidate);
            }
        }

        partition
    }
}
