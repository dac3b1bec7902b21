use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use screening_ai::error::AppError;
use screening_ai::workflows::screening::{
    screening_router, CandidateRepository, JobCategory, JobPosting, JobPostingImporter,
    NotificationPublisher, ScreeningService, ThresholdPolicy,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct PostingPreviewRequest {
    pub(crate) csv: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct PostingPreview {
    pub(crate) title: String,
    pub(crate) category: JobCategory,
    pub(crate) threshold: f64,
    pub(crate) description_chars: usize,
}

pub(crate) fn with_screening_routes<R, N>(service: Arc<ScreeningService<R, N>>) -> axum::Router
where
    R: CandidateRepository + 'static,
    N: NotificationPublisher + 'static,
{
    screening_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/screening/postings/preview",
            axum::routing::post(posting_preview_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn posting_preview_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<PostingPreviewRequest>,
) -> Result<Json<Vec<PostingPreview>>, AppError> {
    let postings = JobPostingImporter::from_reader(Cursor::new(payload.csv.into_bytes()))?;
    Ok(Json(preview_postings(&postings, &state.thresholds)))
}

pub(crate) fn preview_postings(
    postings: &[JobPosting],
    policy: &ThresholdPolicy,
) -> Vec<PostingPreview> {
    postings
        .iter()
        .map(|posting| PostingPreview {
            title: posting.title.clone(),
            category: posting.category(),
            threshold: posting.threshold(policy),
            description_chars: posting.description.chars().count(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{InMemoryCandidateRepository, InMemoryNotificationPublisher};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use screening_ai::config::ScreeningConfig;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn app_state(ready: bool) -> AppState {
        let recorder = PrometheusBuilder::new().build_recorder();
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(recorder.handle()),
            thresholds: ThresholdPolicy::default(),
        }
    }

    #[tokio::test]
    async fn posting_preview_classifies_rows() {
        let request = PostingPreviewRequest {
            csv: "Job Title,Job Description\n\
                  Backend Developer,Build APIs\n\
                  Operations Director,Run the floor\n\
                  Barista,\n\
                  ,Greet visitors\n"
                .to_string(),
        };

        let Json(previews) = posting_preview_endpoint(Extension(app_state(true)), Json(request))
            .await
            .expect("preview builds");

        assert_eq!(previews.len(), 3);
        assert_eq!(previews[0].category, JobCategory::Technical);
        assert_eq!(previews[0].threshold, 7.5);
        assert_eq!(previews[1].category, JobCategory::Leadership);
        assert_eq!(previews[1].threshold, 8.5);
        assert_eq!(previews[2].title, "Unknown Position");
        assert_eq!(previews[2].threshold, 8.0);
        assert_eq!(previews[2].description_chars, "Greet visitors".len());
    }

    #[tokio::test]
    async fn posting_preview_rejects_malformed_csv() {
        let request = PostingPreviewRequest {
            csv: "Job Title,Job Description\nA,B,C\n".to_string(),
        };

        let err = posting_preview_endpoint(Extension(app_state(true)), Json(request))
            .await
            .expect_err("malformed csv");

        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn readiness_reflects_startup_flag() {
        let service = Arc::new(ScreeningService::new(
            Arc::new(InMemoryCandidateRepository::default()),
            Arc::new(InMemoryNotificationPublisher::default()),
            ScreeningConfig::default(),
        ));
        let app = with_screening_routes(service).layer(Extension(app_state(false)));

        let response = app
            .clone()
            .oneshot(
                Request::get("/ready")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = app
            .oneshot(
                Request::get("/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 1024).await.expect("body");
        let payload: serde_json::Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(payload, json!({ "status": "ok" }));
    }
}
