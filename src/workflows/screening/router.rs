use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{CandidateId, JobRecord, RequirementMatch, ResumeRecord};
use super::evaluation::JobCategory;
use super::notifications::NotificationPublisher;
use super::repository::{CandidateRepository, RepositoryError};
use super::service::{
    CandidateSubmission, ScreeningOptions, ScreeningService, ScreeningServiceError,
};

/// Batch request: one job and the resumes to screen against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningRunRequest {
    pub job: JobRecord,
    #[serde(default)]
    pub candidates: Vec<CandidateSubmission>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub notify: bool,
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityRequest {
    pub job: JobRecord,
    pub resume: ResumeRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityResponse {
    pub similarity_score: f64,
    pub requirement_matches: Vec<RequirementMatch>,
    pub job_category: JobCategory,
    pub threshold: f64,
}

/// Router builder exposing HTTP endpoints for screening runs and candidate lookups.
pub fn screening_router<R, N>(service: Arc<ScreeningService<R, N>>) -> Router
where
    R: CandidateRepository + 'static,
    N: NotificationPublisher + 'static,
{
    Router::new()
        .route("/api/v1/screening/runs", post(run_handler::<R, N>))
        .route(
            "/api/v1/screening/similarity",
            post(similarity_handler::<R, N>),
        )
        .route(
            "/api/v1/screening/candidates/:candidate_id",
            get(candidate_handler::<R, N>),
        )
        .with_state(service)
}

pub(crate) async fn run_handler<R, N>(
    State(service): State<Arc<ScreeningService<R, N>>>,
    axum::Json(request): axum::Json<ScreeningRunRequest>,
) -> Response
where
    R: CandidateRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let ScreeningRunRequest {
        job,
        candidates,
        limit,
        notify,
        today,
    } = request;

    let options = ScreeningOptions {
        limit: limit.unwrap_or(service.config().shortlist_limit),
        notify,
        today: today.unwrap_or_else(|| Local::now().date_naive()),
    };

    match service.screen(&job, candidates, &options) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(ScreeningServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({
                "error": "candidate already exists",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn similarity_handler<R, N>(
    State(service): State<Arc<ScreeningService<R, N>>>,
    axum::Json(request): axum::Json<SimilarityRequest>,
) -> Response
where
    R: CandidateRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let SimilarityRequest { job, resume } = request;
    let scorer = service.scorer();

    let response = SimilarityResponse {
        similarity_score: scorer.score_records(&job, &resume),
        requirement_matches: scorer.requirement_matches(&job, &resume),
        job_category: JobCategory::classify(job.job_title()),
        threshold: service.engine().policy().threshold(job.job_title()),
    };

    (StatusCode::OK, axum::Json(response)).into_response()
}

pub(crate) async fn candidate_handler<R, N>(
    State(service): State<Arc<ScreeningService<R, N>>>,
    Path(candidate_id): Path<String>,
) -> Response
where
    R: CandidateRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let id = CandidateId(candidate_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(ScreeningServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "candidate_id": id.0,
                "error": "candidate not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
