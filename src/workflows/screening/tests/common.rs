use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::config::ScreeningConfig;
use crate::workflows::screening::domain::{
    CandidateId, CandidateRecord, EvaluationReport, JobId, JobRecord, QuestionScore, ResumeField,
    ResumeRecord,
};
use crate::workflows::screening::evaluation::{EvaluatorError, RecruitingEvaluator};
use crate::workflows::screening::notifications::{
    CandidateNotification, NotificationError, NotificationPublisher,
};
use crate::workflows::screening::repository::{CandidateRepository, RepositoryError};
use crate::workflows::screening::service::{CandidateSubmission, ScreeningService};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date")
}

pub(super) fn rust_job() -> JobRecord {
    JobRecord {
        job_id: JobId("job-rust".to_string()),
        title: "Senior Rust Engineer".to_string(),
        summary: Some("Build distributed storage services in Rust with Tokio".to_string()),
        key_requirements: vec![
            "Rust async services with Tokio".to_string(),
            "Distributed storage design".to_string(),
        ],
        evaluation_questions: vec!["Has the candidate shipped async Rust?".to_string()],
    }
}

/// Resume mirroring the job vocabulary; scores well above every threshold.
pub(super) fn strong_resume(name: &str) -> ResumeRecord {
    ResumeRecord {
        name: Some(name.to_string()),
        skills: Some(ResumeField::list(["Rust", "Tokio", "distributed storage"])),
        experience: Some(ResumeField::entries([json!({
            "title": "Senior Rust Engineer",
            "company": "Storage",
            "description": "Build distributed storage services in Rust with Tokio async services design"
        })])),
        ..ResumeRecord::default()
    }
}

/// Resume sharing no vocabulary with the job.
pub(super) fn weak_resume(name: &str) -> ResumeRecord {
    ResumeRecord {
        name: Some(name.to_string()),
        skills: Some(ResumeField::list(["watercolor", "pottery"])),
        education: Some(ResumeField::text("Fine arts academy")),
        ..ResumeRecord::default()
    }
}

pub(super) fn submission(id: &str, resume: ResumeRecord) -> CandidateSubmission {
    CandidateSubmission {
        candidate_id: Some(CandidateId(id.to_string())),
        resume,
        recruiting_score: None,
    }
}

pub(super) fn candidate(
    id: &str,
    similarity: f64,
    recruiting: Option<f64>,
) -> CandidateRecord {
    let mut record = CandidateRecord::new(CandidateId(id.to_string()), similarity);
    record.job_id = rust_job().job_id;
    record.recruiting_score = recruiting;
    record
}

pub(super) fn build_service() -> (
    ScreeningService<MemoryRepository, MemoryNotifications>,
    Arc<MemoryRepository>,
    Arc<MemoryNotifications>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let notifications = Arc::new(MemoryNotifications::default());
    let service = ScreeningService::new(
        repository.clone(),
        notifications.clone(),
        ScreeningConfig::default(),
    );
    (service, repository, notifications)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<HashMap<CandidateId, CandidateRecord>>>,
    order: Arc<Mutex<Vec<CandidateId>>>,
}

impl CandidateRepository for MemoryRepository {
    fn insert(&self, record: CandidateRecord) -> Result<CandidateRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.candidate_id) {
            return Err(RepositoryError::Conflict);
        }
        self.order
            .lock()
            .expect("order mutex poisoned")
            .push(record.candidate_id.clone());
        guard.insert(record.candidate_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: CandidateRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.candidate_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &CandidateId) -> Result<Option<CandidateRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn for_job(&self, job_id: &JobId) -> Result<Vec<CandidateRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let order = self.order.lock().expect("order mutex poisoned");
        Ok(order
            .iter()
            .filter_map(|id| guard.get(id))
            .filter(|record| &record.job_id == job_id)
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailableRepository;

impl CandidateRepository for UnavailableRepository {
    fn insert(&self, _record: CandidateRecord) -> Result<CandidateRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: CandidateRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &CandidateId) -> Result<Option<CandidateRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn for_job(&self, _job_id: &JobId) -> Result<Vec<CandidateRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifications {
    events: Arc<Mutex<Vec<CandidateNotification>>>,
}

impl MemoryNotifications {
    pub(super) fn events(&self) -> Vec<CandidateNotification> {
        self.events.lock().expect("notification mutex poisoned").clone()
    }
}

impl NotificationPublisher for MemoryNotifications {
    fn publish(&self, notification: CandidateNotification) -> Result<(), NotificationError> {
        self.events
            .lock()
            .expect("notification mutex poisoned")
            .push(notification);
        Ok(())
    }
}

/// Evaluator returning a fixed overall score and counting invocations.
#[derive(Default)]
pub(super) struct FixedEvaluator {
    pub(super) overall_score: f64,
    pub(super) calls: Mutex<usize>,
}

impl FixedEvaluator {
    pub(super) fn new(overall_score: f64) -> Self {
        Self {
            overall_score,
            calls: Mutex::new(0),
        }
    }

    pub(super) fn calls(&self) -> usize {
        *self.calls.lock().expect("evaluator mutex poisoned")
    }
}

impl RecruitingEvaluator for FixedEvaluator {
    fn evaluate(
        &self,
        job: &JobRecord,
        _resume: &ResumeRecord,
    ) -> Result<EvaluationReport, EvaluatorError> {
        *self.calls.lock().expect("evaluator mutex poisoned") += 1;
        Ok(EvaluationReport {
            question_scores: job
                .evaluation_questions
                .iter()
                .map(|question| QuestionScore {
                    question: question.clone(),
                    score: self.overall_score,
                    feedback: "consistent with resume".to_string(),
                })
                .collect(),
            overall_score: self.overall_score,
            general_feedback: "fixed evaluation".to_string(),
        })
    }
}

pub(super) struct FailingEvaluator;

impl RecruitingEvaluator for FailingEvaluator {
    fn evaluate(
        &self,
        _job: &JobRecord,
        _resume: &ResumeRecord,
    ) -> Result<EvaluationReport, EvaluatorError> {
        Err(EvaluatorError::Unavailable("rate limited".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
