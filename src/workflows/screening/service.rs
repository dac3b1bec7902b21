use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::ScreeningConfig;

use super::domain::{
    CandidateId, CandidateRecord, CandidateStatus, JobId, JobRecord, ResumeRecord,
    ShortlistPartition,
};
use super::evaluation::{
    EscalationPolicy, JobCategory, RecruitingEvaluator, ShortlistDecisionEngine, ThresholdPolicy,
};
use super::notifications::{
    interview_invitation, rejection_notice, CandidateNotification, InvitationSchedule,
    NotificationError, NotificationPublisher,
};
use super::ranking::rank;
use super::repository::{CandidateRepository, RepositoryError};
use super::similarity::{clamp_score, SimilarityScorer};

/// Resume handed to the pipeline, optionally with a recruiting score computed upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateSubmission {
    #[serde(default)]
    pub candidate_id: Option<CandidateId>,
    #[serde(default)]
    pub resume: ResumeRecord,
    #[serde(default)]
    pub recruiting_score: Option<f64>,
}

/// Knobs for an end-to-end screening run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreeningOptions {
    pub limit: i64,
    pub notify: bool,
    pub today: NaiveDate,
}

/// Outcome of an end-to-end screening run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningReport {
    pub job_id: JobId,
    pub job_category: JobCategory,
    pub threshold: f64,
    pub candidates_scored: usize,
    pub escalated: usize,
    pub shortlisted: Vec<CandidateRecord>,
    pub rejected: Vec<CandidateRecord>,
    pub top_candidates: Vec<CandidateRecord>,
    pub notifications_sent: usize,
}

/// Service composing the scorer, escalation gate, decision engine, ranker and notifications.
pub struct ScreeningService<R, N> {
    scorer: SimilarityScorer,
    escalation: EscalationPolicy,
    engine: ShortlistDecisionEngine,
    evaluator: Option<Arc<dyn RecruitingEvaluator>>,
    repository: Arc<R>,
    notifications: Arc<N>,
    config: ScreeningConfig,
}

static CANDIDATE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_candidate_id() -> CandidateId {
    let id = CANDIDATE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    CandidateId(format!("cand-{id:06}"))
}

impl<R, N> ScreeningService<R, N>
where
    R: CandidateRepository + 'static,
    N: NotificationPublisher + 'static,
{
    pub fn new(repository: Arc<R>, notifications: Arc<N>, config: ScreeningConfig) -> Self {
        Self {
            scorer: SimilarityScorer::new(),
            escalation: EscalationPolicy::new(config.escalation_threshold),
            engine: ShortlistDecisionEngine::new(ThresholdPolicy::with_default(
                config.default_threshold,
            )),
            evaluator: None,
            repository,
            notifications,
            config,
        }
    }

    pub fn with_evaluator(mut self, evaluator: Arc<dyn RecruitingEvaluator>) -> Self {
        self.evaluator = Some(evaluator);
        self
    }

    pub fn config(&self) -> &ScreeningConfig {
        &self.config
    }

    pub fn scorer(&self) -> &SimilarityScorer {
        &self.scorer
    }

    pub fn engine(&self) -> &ShortlistDecisionEngine {
        &self.engine
    }

    /// Score one resume against the job and persist the candidate.
    pub fn score_candidate(
        &self,
        job: &JobRecord,
        submission: CandidateSubmission,
    ) -> Result<CandidateRecord, ScreeningServiceError> {
        let CandidateSubmission {
            candidate_id,
            resume,
            recruiting_score,
        } = submission;

        let candidate_id = candidate_id.unwrap_or_else(next_candidate_id);
        let similarity_score = self.scorer.score_records(job, &resume);
        let requirement_matches = self.scorer.requirement_matches(job, &resume);

        let mut record = CandidateRecord::new(candidate_id, similarity_score);
        record.job_id = job.job_id.clone();
        record.requirement_matches = requirement_matches;

        if self.escalation.should_escalate(similarity_score) {
            match recruiting_score {
                Some(score) => record.recruiting_score = Some(clamp_score(score)),
                None => self.run_evaluator(job, &resume, &mut record),
            }
        } else if recruiting_score.is_some() {
            debug!(
                candidate = %record.candidate_id.0,
                similarity_score,
                "ignoring recruiting score below escalation threshold"
            );
        }

        record.resume = resume;
        let stored = self.repository.insert(record)?;
        Ok(stored)
    }

    fn run_evaluator(&self, job: &JobRecord, resume: &ResumeRecord, record: &mut CandidateRecord) {
        let Some(evaluator) = &self.evaluator else {
            return;
        };
        if job.evaluation_questions.is_empty() {
            debug!(job = %job.job_id.0, "no evaluation questions; skipping recruiting evaluation");
            return;
        }

        match evaluator.evaluate(job, resume) {
            Ok(mut report) => {
                report.overall_score = clamp_score(report.overall_score);
                record.recruiting_score = Some(report.overall_score);
                record.evaluation = Some(report);
            }
            Err(err) => {
                warn!(candidate = %record.candidate_id.0, %err, "recruiting evaluation failed");
            }
        }
    }

    /// Decide every candidate scored for the job and persist the outcome.
    pub fn shortlist(&self, job: &JobRecord) -> Result<ShortlistPartition, ScreeningServiceError> {
        let candidates = self.repository.for_job(&job.job_id)?;
        self.decide(job, candidates)
    }

    fn decide(
        &self,
        job: &JobRecord,
        candidates: Vec<CandidateRecord>,
    ) -> Result<ShortlistPartition, ScreeningServiceError> {
        let partition = self.engine.shortlist_candidates(candidates, job);

        for candidate in partition.shortlisted.iter().chain(partition.rejected.iter()) {
            self.repository.update(candidate.clone())?;
        }

        info!(
            job = %job.job_id.0,
            shortlisted = partition.shortlisted.len(),
            rejected = partition.rejected.len(),
            "shortlisting complete"
        );
        Ok(partition)
    }

    /// Highest ranked shortlisted candidates for the job.
    pub fn top_candidates(
        &self,
        job: &JobRecord,
        limit: i64,
    ) -> Result<Vec<CandidateRecord>, ScreeningServiceError> {
        let shortlisted = self
            .repository
            .for_job(&job.job_id)?
            .into_iter()
            .filter(|candidate| candidate.status == CandidateStatus::Shortlisted)
            .collect();
        Ok(rank(shortlisted, limit))
    }

    /// Send invitations to shortlisted candidates and rejections to the rest.
    pub fn notify(
        &self,
        job: &JobRecord,
        partition: &ShortlistPartition,
        today: NaiveDate,
    ) -> Result<Vec<CandidateNotification>, ScreeningServiceError> {
        let schedule = InvitationSchedule::new(
            today,
            self.config.interview_lead_days,
            self.config.interview_slots,
        );

        let invitations = partition
            .shortlisted
            .iter()
            .map(|candidate| CandidateNotification::Invitation {
                candidate_id: candidate.candidate_id.clone(),
                invitation: interview_invitation(job, candidate, &schedule),
            });
        let rejections = partition
            .rejected
            .iter()
            .map(|candidate| CandidateNotification::Rejection {
                candidate_id: candidate.candidate_id.clone(),
                rejection: rejection_notice(candidate),
            });

        let mut sent = Vec::with_capacity(partition.len());
        for notification in invitations.chain(rejections) {
            self.notifications.publish(notification.clone())?;
            sent.push(notification);
        }
        Ok(sent)
    }

    /// Score, shortlist, rank, and optionally notify a batch of resumes for one job.
    pub fn screen(
        &self,
        job: &JobRecord,
        submissions: Vec<CandidateSubmission>,
        options: &ScreeningOptions,
    ) -> Result<ScreeningReport, ScreeningServiceError> {
        let submissions = self.claim_candidate_ids(submissions)?;
        let candidates_scored = submissions.len();
        let mut escalated = 0;
        let mut scored = Vec::with_capacity(candidates_scored);
        for submission in submissions {
            let record = self.score_candidate(job, submission)?;
            if self.escalation.should_escalate(record.similarity_score) {
                escalated += 1;
            }
            scored.push(record);
        }

        let partition = self.decide(job, scored)?;
        let top_candidates = rank(partition.shortlisted.clone(), options.limit);
        let notifications_sent = if options.notify {
            self.notify(job, &partition, options.today)?.len()
        } else {
            0
        };

        info!(
            job = %job.job_id.0,
            candidates_scored,
            escalated,
            notifications_sent,
            "screening run complete"
        );

        Ok(ScreeningReport {
            job_id: job.job_id.clone(),
            job_category: JobCategory::classify(job.job_title()),
            threshold: self.engine.policy().threshold(job.job_title()),
            candidates_scored,
            escalated,
            shortlisted: partition.shortlisted,
            rejected: partition.rejected,
            top_candidates,
            notifications_sent,
        })
    }

    /// Fill in missing ids and reject the whole batch before anything is stored
    /// when an id repeats within it or already belongs to a stored candidate.
    fn claim_candidate_ids(
        &self,
        submissions: Vec<CandidateSubmission>,
    ) -> Result<Vec<CandidateSubmission>, ScreeningServiceError> {
        let mut seen = HashSet::with_capacity(submissions.len());
        let mut claimed = Vec::with_capacity(submissions.len());

        for mut submission in submissions {
            let candidate_id = submission
                .candidate_id
                .get_or_insert_with(next_candidate_id)
                .clone();
            if !seen.insert(candidate_id.clone())
                || self.repository.fetch(&candidate_id)?.is_some()
            {
                debug!(candidate = %candidate_id.0, "candidate id already in use; batch rejected");
                return Err(RepositoryError::Conflict.into());
            }
            claimed.push(submission);
        }

        Ok(claimed)
    }

    pub fn get(&self, candidate_id: &CandidateId) -> Result<CandidateRecord, ScreeningServiceError> {
        let record = self
            .repository
            .fetch(candidate_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }
}

/// Error raised by the screening service.
#[derive(Debug, thiserror::Error)]
pub enum ScreeningServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Notification(#[from] NotificationError),
}
