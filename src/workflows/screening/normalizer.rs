//! Flattens job and resume records into the single text blobs the scorer consumes.

use serde_json::Value;

use super::domain::{JobRecord, ResumeField, ResumeRecord};

/// How structured list entries of a resume section are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryLayout {
    Plain,
    Experience,
    Education,
}

/// Job text: labeled title, summary, and space-joined requirements, in that order.
pub fn job_text(job: &JobRecord) -> String {
    let mut segments = Vec::new();

    if let Some(title) = job.job_title() {
        segments.push(format!("Job Title: {title}"));
    }

    if let Some(summary) = job.summary.as_deref().filter(|s| !s.is_empty()) {
        segments.push(format!("Summary: {summary}"));
    }

    if !job.key_requirements.is_empty() {
        segments.push(format!("Requirements: {}", job.key_requirements.join(" ")));
    }

    segments.join(" ")
}

/// Resume text: labeled skills, experience, education, qualifications, certifications.
pub fn resume_text(resume: &ResumeRecord) -> String {
    let sections = [
        ("Skills", &resume.skills, EntryLayout::Plain),
        ("Experience", &resume.experience, EntryLayout::Experience),
        ("Education", &resume.education, EntryLayout::Education),
        ("Qualifications", &resume.qualifications, EntryLayout::Plain),
        ("Certifications", &resume.certifications, EntryLayout::Plain),
    ];

    sections
        .iter()
        .filter_map(|(label, field, layout)| {
            let body = field.as_ref().map(|f| flatten_field(f, *layout))?;
            if body.is_empty() {
                None
            } else {
                Some(format!("{label}: {body}"))
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn flatten_field(field: &ResumeField, layout: EntryLayout) -> String {
    match field {
        ResumeField::List(items) => items
            .iter()
            .map(|item| flatten_entry(item, layout))
            .collect::<Vec<_>>()
            .join(" "),
        ResumeField::Text(text) => text.clone(),
        ResumeField::Other(value) => coerce_text(value),
    }
}

fn flatten_entry(item: &Value, layout: EntryLayout) -> String {
    let Value::Object(entry) = item else {
        return coerce_text(item);
    };
    let field = |key: &str| entry.get(key).map(coerce_text).unwrap_or_default();

    match layout {
        EntryLayout::Experience => format!(
            "{} at {} {}",
            field("title"),
            field("company"),
            field("description")
        ),
        EntryLayout::Education => format!("{} from {}", field("degree"), field("institution")),
        EntryLayout::Plain => coerce_text(item),
    }
}

/// String coercion for values of unexpected shape; never fails.
pub(crate) fn coerce_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Array(items) => join_non_empty(items.iter().map(coerce_text)),
        Value::Object(map) => join_non_empty(map.values().map(coerce_text)),
    }
}

fn join_non_empty(parts: impl Iterator<Item = String>) -> String {
    parts
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
