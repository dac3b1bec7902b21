use serde::{Deserialize, Serialize};

const TECHNICAL_KEYWORDS: [&str; 4] = ["software", "developer", "engineer", "programmer"];
const LEADERSHIP_KEYWORDS: [&str; 4] = ["manager", "director", "executive", "lead"];

pub const DEFAULT_THRESHOLD: f64 = 8.0;
pub const TECHNICAL_THRESHOLD: f64 = 7.5;
pub const LEADERSHIP_THRESHOLD: f64 = 8.5;

/// Job category inferred from title keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobCategory {
    Technical,
    Leadership,
    General,
}

impl JobCategory {
    /// Technical keywords are checked before leadership keywords.
    pub fn classify(job_title: Option<&str>) -> Self {
        let Some(title) = job_title else {
            return Self::General;
        };
        let lowered = title.to_lowercase();

        if TECHNICAL_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
            Self::Technical
        } else if LEADERSHIP_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
            Self::Leadership
        } else {
            Self::General
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Technical => "technical",
            Self::Leadership => "leadership",
            Self::General => "general",
        }
    }
}

/// Maps a job title to the minimum score required for shortlisting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdPolicy {
    default_threshold: f64,
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self {
            default_threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl ThresholdPolicy {
    pub fn with_default(default_threshold: f64) -> Self {
        Self { default_threshold }
    }

    pub fn threshold(&self, job_title: Option<&str>) -> f64 {
        match JobCategory::classify(job_title) {
            JobCategory::Technical => TECHNICAL_THRESHOLD,
            JobCategory::Leadership => LEADERSHIP_THRESHOLD,
            JobCategory::General => self.default_threshold,
        }
    }
}
