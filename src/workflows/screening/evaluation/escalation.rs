use super::super::domain::{EvaluationReport, JobRecord, ResumeRecord};

/// Gate for the expensive recruiting evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EscalationPolicy {
    threshold: f64,
}

impl Default for EscalationPolicy {
    fn default() -> Self {
        Self { threshold: 8.0 }
    }
}

impl EscalationPolicy {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn should_escalate(&self, similarity_score: f64) -> bool {
        similarity_score >= self.threshold
    }
}

/// Secondary evaluator (typically a language-model adapter) consulted for escalated candidates.
pub trait RecruitingEvaluator: Send + Sync {
    fn evaluate(
        &self,
        job: &JobRecord,
        resume: &ResumeRecord,
    ) -> Result<EvaluationReport, EvaluatorError>;
}

#[derive(Debug, thiserror::Error)]
pub enum EvaluatorError {
    #[error("evaluator unavailable: {0}")]
    Unavailable(String),
    #[error("evaluator returned malformed output: {0}")]
    Malformed(String),
}
