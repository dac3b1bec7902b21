use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use screening_ai::workflows::screening::{
    CandidateId, CandidateNotification, CandidateRecord, CandidateRepository, JobId,
    NotificationError, NotificationPublisher, RepositoryError, ThresholdPolicy,
};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) thresholds: ThresholdPolicy,
}

#[derive(Default)]
struct CandidateTable {
    records: HashMap<CandidateId, CandidateRecord>,
    order: Vec<CandidateId>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryCandidateRepository {
    table: Arc<Mutex<CandidateTable>>,
}

impl CandidateRepository for InMemoryCandidateRepository {
    fn insert(&self, record: CandidateRecord) -> Result<CandidateRecord, RepositoryError> {
        let mut guard = self.table.lock().expect("repository mutex poisoned");
        if guard.records.contains_key(&record.candidate_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.order.push(record.candidate_id.clone());
        guard
            .records
            .insert(record.candidate_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: CandidateRecord) -> Result<(), RepositoryError> {
        let mut guard = self.table.lock().expect("repository mutex poisoned");
        match guard.records.get_mut(&record.candidate_id) {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &CandidateId) -> Result<Option<CandidateRecord>, RepositoryError> {
        let guard = self.table.lock().expect("repository mutex poisoned");
        Ok(guard.records.get(id).cloned())
    }

    fn for_job(&self, job_id: &JobId) -> Result<Vec<CandidateRecord>, RepositoryError> {
        let guard = self.table.lock().expect("repository mutex poisoned");
        Ok(guard
            .order
            .iter()
            .filter_map(|id| guard.records.get(id))
            .filter(|record| &record.job_id == job_id)
            .cloned()
            .collect())
    }
}

/// Outbox that records notifications instead of delivering them.
#[derive(Default, Clone)]
pub(crate) struct InMemoryNotificationPublisher {
    events: Arc<Mutex<Vec<CandidateNotification>>>,
}

impl NotificationPublisher for InMemoryNotificationPublisher {
    fn publish(&self, notification: CandidateNotification) -> Result<(), NotificationError> {
        info!(
            candidate = %notification.candidate_id().0,
            subject = %notification.email().subject,
            "notification queued"
        );
        let mut guard = self.events.lock().expect("notification mutex poisoned");
        guard.push(notification);
        Ok(())
    }
}

impl InMemoryNotificationPublisher {
    pub(crate) fn events(&self) -> Vec<CandidateNotification> {
        self.events
            .lock()
            .expect("notification mutex poisoned")
            .clone()
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_lists_job_candidates_in_insertion_order() {
        let repository = InMemoryCandidateRepository::default();
        let job = JobId("job-1".to_string());
        for id in ["c", "a", "b"] {
            let mut record = CandidateRecord::new(CandidateId(id.to_string()), 5.0);
            record.job_id = job.clone();
            repository.insert(record).expect("insert succeeds");
        }

        let ids: Vec<String> = repository
            .for_job(&job)
            .expect("listing succeeds")
            .into_iter()
            .map(|record| record.candidate_id.0)
            .collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
        assert!(repository
            .for_job(&JobId("other".to_string()))
            .expect("listing succeeds")
            .is_empty());
    }

    #[test]
    fn repository_rejects_unknown_updates() {
        let repository = InMemoryCandidateRepository::default();
        let record = CandidateRecord::new(CandidateId("ghost".to_string()), 1.0);
        assert!(matches!(
            repository.update(record),
            Err(RepositoryError::NotFound)
        ));
    }

    #[test]
    fn parse_date_reports_bad_input() {
        assert!(parse_date("2026-10-19").is_ok());
        assert!(parse_date("19/10/2026")
            .expect_err("invalid date")
            .contains("YYYY-MM-DD"));
    }
}
