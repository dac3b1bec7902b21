use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier wrapper for a job posting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

/// Identifier wrapper for a screened candidate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CandidateId(pub String);

/// Summarized job description as produced by the summarization collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(default)]
    pub job_id: JobId,
    #[serde(default, alias = "job_title")]
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub key_requirements: Vec<String>,
    #[serde(default)]
    pub evaluation_questions: Vec<String>,
}

impl JobRecord {
    /// The title when one was supplied; an empty title counts as absent.
    pub fn job_title(&self) -> Option<&str> {
        if self.title.trim().is_empty() {
            None
        } else {
            Some(self.title.as_str())
        }
    }
}

/// Resume field as emitted by the extraction collaborator: a list, a bare string,
/// or any other JSON value that must be coerced to text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResumeField {
    List(Vec<Value>),
    Text(String),
    Other(Value),
}

impl ResumeField {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(
            items
                .into_iter()
                .map(|item| Value::String(item.into()))
                .collect(),
        )
    }

    pub fn entries<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Self::List(items.into_iter().collect())
    }
}

/// Structured resume data. Every section is optional and may take any [`ResumeField`] shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub source_file: Option<String>,
    #[serde(default)]
    pub skills: Option<ResumeField>,
    #[serde(default)]
    pub experience: Option<ResumeField>,
    #[serde(default)]
    pub education: Option<ResumeField>,
    #[serde(default)]
    pub qualifications: Option<ResumeField>,
    #[serde(default)]
    pub certifications: Option<ResumeField>,
}

/// Fit score for a single key requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementMatch {
    pub requirement: String,
    pub score: f64,
}

/// Per-question feedback returned by the recruiting evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionScore {
    pub question: String,
    pub score: f64,
    #[serde(default)]
    pub feedback: String,
}

/// Secondary evaluation produced for escalated candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    #[serde(default)]
    pub question_scores: Vec<QuestionScore>,
    pub overall_score: f64,
    #[serde(default)]
    pub general_feedback: String,
}

/// Candidate accumulating scores as the pipeline stages complete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub candidate_id: CandidateId,
    #[serde(default)]
    pub job_id: JobId,
    #[serde(default)]
    pub resume: ResumeRecord,
    pub similarity_score: f64,
    #[serde(default)]
    pub requirement_matches: Vec<RequirementMatch>,
    #[serde(default)]
    pub recruiting_score: Option<f64>,
    #[serde(default)]
    pub evaluation: Option<EvaluationReport>,
    #[serde(default)]
    pub final_score: Option<f64>,
    #[serde(default)]
    pub shortlisted: bool,
    #[serde(default)]
    pub shortlisting_reason: String,
    #[serde(default)]
    pub status: CandidateStatus,
}

impl CandidateRecord {
    pub fn new(candidate_id: CandidateId, similarity_score: f64) -> Self {
        Self {
            candidate_id,
            job_id: JobId::default(),
            resume: ResumeRecord::default(),
            similarity_score,
            requirement_matches: Vec::new(),
            recruiting_score: None,
            evaluation: None,
            final_score: None,
            shortlisted: false,
            shortlisting_reason: String::new(),
            status: CandidateStatus::Scored,
        }
    }

    pub fn display_name(&self) -> &str {
        self.resume
            .name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or("Candidate")
    }

    pub fn status_view(&self) -> CandidateStatusView {
        CandidateStatusView {
            candidate_id: self.candidate_id.clone(),
            status: self.status.label(),
            similarity_score: self.similarity_score,
            recruiting_score: self.recruiting_score,
            final_score: self.final_score,
            shortlisting_reason: if self.shortlisting_reason.is_empty() {
                "pending shortlisting".to_string()
            } else {
                self.shortlisting_reason.clone()
            },
        }
    }
}

/// Lifecycle of a candidate through the pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStatus {
    #[default]
    Scored,
    Shortlisted,
    Rejected,
}

impl CandidateStatus {
    pub const fn label(self) -> &'static str {
        match self {
            CandidateStatus::Scored => "scored",
            CandidateStatus::Shortlisted => "shortlisted",
            CandidateStatus::Rejected => "rejected",
        }
    }
}

/// Public projection of a candidate for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateStatusView {
    pub candidate_id: CandidateId,
    pub status: &'static str,
    pub similarity_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recruiting_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_score: Option<f64>,
    pub shortlisting_reason: String,
}

/// Disjoint split of evaluated candidates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShortlistPartition {
    pub shortlisted: Vec<CandidateRecord>,
    pub rejected: Vec<CandidateRecord>,
}

impl ShortlistPartition {
    pub fn len(&self) -> usize {
        self.shortlisted.len() + self.rejected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shortlisted.is_empty() && self.rejected.is_empty()
    }
}
