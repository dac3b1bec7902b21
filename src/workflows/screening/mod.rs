//! Candidate screening: fit scoring, shortlisting, ranking and notifications.
//!
//! Scoring and decision functions are pure and never fail on malformed resume
//! data; the service layer adds persistence, the escalation gate and delivery.

pub mod domain;
pub mod evaluation;
pub mod export;
pub mod normalizer;
pub mod notifications;
pub mod postings;
pub mod ranking;
pub mod repository;
pub mod router;
pub mod service;
pub mod similarity;

#[cfg(test)]
mod tests;

pub use domain::{
    CandidateId, CandidateRecord, CandidateStatus, CandidateStatusView, EvaluationReport, JobId,
    JobRecord, QuestionScore, RequirementMatch, ResumeField, ResumeRecord, ShortlistPartition,
};
pub use evaluation::{
    calculate_final_score, DecisionBasis, EscalationPolicy, EvaluatorError, JobCategory,
    RecruitingEvaluator, ShortlistDecision, ShortlistDecisionEngine, ThresholdPolicy,
};
pub use export::write_shortlist_csv;
pub use notifications::{
    CandidateNotification, EmailMessage, InterviewInvitation, NotificationError,
    NotificationPublisher, RejectionNotice,
};
pub use postings::{JobImportError, JobPosting, JobPostingImporter};
pub use ranking::rank;
pub use repository::{CandidateRepository, RepositoryError};
pub use router::{screening_router, ScreeningRunRequest, SimilarityRequest, SimilarityResponse};
pub use service::{
    CandidateSubmission, ScreeningOptions, ScreeningReport, ScreeningService,
    ScreeningServiceError,
};
pub use similarity::SimilarityScorer;
