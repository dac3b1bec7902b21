//! Resume-to-job fit scoring on a 0-10 scale.
//!
//! Every comparison fits its own two-document TF-IDF space, so the scorer keeps
//! no state between calls and can be shared freely across threads. A side effect
//! is that requirement scores are only comparable within one requirement/resume
//! pair, not across jobs.

mod stop_words;
mod tfidf;

use tracing::debug;

use super::domain::{JobRecord, RequirementMatch, ResumeRecord};
use super::normalizer;

pub const MAX_SCORE: f64 = 10.0;

/// Clamp any score into `[0, 10]`, mapping NaN to 0.0.
pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, MAX_SCORE)
    }
}

/// Stateless TF-IDF cosine scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityScorer;

impl SimilarityScorer {
    pub fn new() -> Self {
        Self
    }

    /// Fit score between two free texts. Degenerate input scores 0.0.
    pub fn score(&self, job_text: &str, resume_text: &str) -> f64 {
        match tfidf::fit_transform(&[job_text, resume_text]) {
            Ok(vectors) => clamp_score(tfidf::cosine(&vectors[0], &vectors[1]) * MAX_SCORE),
            Err(err) => {
                debug!(%err, "similarity undefined, scoring 0.0");
                0.0
            }
        }
    }

    /// Score each requirement independently against the resume text, preserving order.
    pub fn score_requirements(
        &self,
        requirements: &[String],
        resume_text: &str,
    ) -> Vec<RequirementMatch> {
        requirements
            .iter()
            .map(|requirement| RequirementMatch {
                requirement: requirement.clone(),
                score: self.score(requirement, resume_text),
            })
            .collect()
    }

    /// Normalize both records and score them.
    pub fn score_records(&self, job: &JobRecord, resume: &ResumeRecord) -> f64 {
        self.score(&normalizer::job_text(job), &normalizer::resume_text(resume))
    }

    /// Requirement matches for a job's key requirements against a resume record.
    pub fn requirement_matches(
        &self,
        job: &JobRecord,
        resume: &ResumeRecord,
    ) -> Vec<RequirementMatch> {
        if job.key_requirements.is_empty() {
            return Vec::new();
        }
        let resume_text = normalizer::resume_text(resume);
        self.score_requirements(&job.key_requirements, &resume_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_texts_score_ten() {
        let scorer = SimilarityScorer::new();
        let score = scorer.score("rust backend engineer", "rust backend engineer");
        assert!((score - 10.0).abs() < 1e-9);
    }

    #[test]
    fn disjoint_texts_score_zero() {
        let scorer = SimilarityScorer::new();
        assert_eq!(scorer.score("rust kafka", "watercolor painting"), 0.0);
    }

    #[test]
    fn degenerate_inputs_score_zero() {
        let scorer = SimilarityScorer::new();
        assert_eq!(scorer.score("", ""), 0.0);
        assert_eq!(scorer.score("rust developer", ""), 0.0);
        assert_eq!(scorer.score("the and of", "it is"), 0.0);
    }

    #[test]
    fn partial_overlap_is_bounded_and_repeatable() {
        let scorer = SimilarityScorer::new();
        let job = "Senior Rust engineer building distributed storage";
        let resume = "Go engineer with distributed systems and storage background";

        let first = scorer.score(job, resume);
        let second = scorer.score(job, resume);

        assert!(first > 0.0 && first < 10.0, "score {first}");
        assert_eq!(first, second);
    }

    #[test]
    fn requirement_scores_preserve_order() {
        let scorer = SimilarityScorer::new();
        let requirements = vec![
            "Rust experience".to_string(),
            "Kubernetes operations".to_string(),
        ];

        let matches = scorer.score_requirements(&requirements, "Skills: Rust Tokio");

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].requirement, "Rust experience");
        assert!(matches[0].score > 0.0);
        assert_eq!(matches[1].score, 0.0);
        assert!(scorer.score_requirements(&[], "anything").is_empty());
    }

    #[test]
    fn clamp_score_handles_out_of_range_values() {
        assert_eq!(clamp_score(f64::NAN), 0.0);
        assert_eq!(clamp_score(-1.0), 0.0);
        assert_eq!(clamp_score(12.5), 10.0);
        assert_eq!(clamp_score(7.25), 7.25);
    }
}
