//! Raw job postings loaded from a `Job Title` / `Job Description` CSV export.

use serde::{Deserialize, Deserializer, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::evaluation::{JobCategory, ThresholdPolicy};

const UNKNOWN_POSITION: &str = "Unknown Position";

/// Unsummarized job description awaiting the summarization collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub description: String,
}

impl JobPosting {
    pub fn category(&self) -> JobCategory {
        JobCategory::classify(Some(&self.title))
    }

    pub fn threshold(&self, policy: &ThresholdPolicy) -> f64 {
        policy.threshold(Some(&self.title))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JobImportError {
    #[error("unable to open job postings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed job postings csv: {0}")]
    Csv(#[from] csv::Error),
}

pub struct JobPostingImporter;

impl JobPostingImporter {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Vec<JobPosting>, JobImportError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Rows without a description are skipped; a blank title becomes "Unknown Position".
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<JobPosting>, JobImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut postings = Vec::new();

        for record in csv_reader.deserialize::<PostingRow>() {
            let row = record?;
            let Some(description) = row.description else {
                continue;
            };
            postings.push(JobPosting {
                title: row.title.unwrap_or_else(|| UNKNOWN_POSITION.to_string()),
                description,
            });
        }

        Ok(postings)
    }
}

#[derive(Debug, Deserialize)]
struct PostingRow {
    #[serde(rename = "Job Title", default, deserialize_with = "empty_string_as_none")]
    title: Option<String>,
    #[serde(
        rename = "Job Description",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    description: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
