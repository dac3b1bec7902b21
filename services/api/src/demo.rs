use crate::infra::{parse_date, InMemoryCandidateRepository, InMemoryNotificationPublisher};
use crate::routes::preview_postings;
use chrono::{Local, NaiveDate};
use clap::Args;
use screening_ai::config::{AppConfig, ScreeningConfig};
use screening_ai::error::AppError;
use screening_ai::workflows::screening::{
    write_shortlist_csv, CandidateId, CandidateNotification, CandidateSubmission, JobId,
    JobPostingImporter, JobRecord, ResumeField, ResumeRecord, ScreeningOptions, ScreeningReport,
    ScreeningRunRequest, ScreeningService, ThresholdPolicy,
};
use serde_json::json;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScreenArgs {
    /// JSON file holding a job and the candidate resumes to screen
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Maximum number of ranked candidates to report (defaults to the configured limit)
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) limit: Option<i64>,
    /// Write the ranked shortlist to this CSV file
    #[arg(long)]
    pub(crate) csv_out: Option<PathBuf>,
    /// Reference date for interview scheduling (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct JobsArgs {
    /// Job postings CSV export with "Job Title" and "Job Description" columns
    #[arg(long)]
    pub(crate) csv: PathBuf,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Reference date for interview scheduling (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Print the rendered notification e-mails
    #[arg(long)]
    pub(crate) show_emails: bool,
}

pub(crate) struct BatchOutcome {
    pub(crate) report: ScreeningReport,
    pub(crate) notifications: Vec<CandidateNotification>,
}

/// Screen one batch against a fresh in-memory repository and outbox.
pub(crate) fn screen_batch(
    request: ScreeningRunRequest,
    config: ScreeningConfig,
    today: NaiveDate,
) -> Result<BatchOutcome, AppError> {
    let ScreeningRunRequest {
        job,
        candidates,
        limit,
        notify,
        today: requested_today,
    } = request;

    let notifications = Arc::new(InMemoryNotificationPublisher::default());
    let service = ScreeningService::new(
        Arc::new(InMemoryCandidateRepository::default()),
        notifications.clone(),
        config,
    );
    let options = ScreeningOptions {
        limit: limit.unwrap_or(service.config().shortlist_limit),
        notify,
        today: requested_today.unwrap_or(today),
    };

    let report = service.screen(&job, candidates, &options)?;
    Ok(BatchOutcome {
        report,
        notifications: notifications.events(),
    })
}

pub(crate) fn run_screen(args: ScreenArgs) -> Result<(), AppError> {
    let ScreenArgs {
        input,
        limit,
        csv_out,
        today,
    } = args;

    let config = AppConfig::load()?;
    let mut request: ScreeningRunRequest = serde_json::from_reader(File::open(&input)?)?;
    if limit.is_some() {
        request.limit = limit;
    }

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let outcome = screen_batch(request, config.screening, today)?;
    render_report(&outcome.report);

    if let Some(path) = csv_out {
        let file = BufWriter::new(File::create(&path)?);
        write_shortlist_csv(file, &outcome.report.top_candidates)?;
        println!("\nShortlist written to {}", path.display());
    }

    Ok(())
}

pub(crate) fn run_jobs(args: JobsArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let policy = ThresholdPolicy::with_default(config.screening.default_threshold);
    let postings = JobPostingImporter::from_path(&args.csv)?;

    println!("Job postings from {}", args.csv.display());
    if postings.is_empty() {
        println!("  No postings with a description were found");
        return Ok(());
    }

    for preview in preview_postings(&postings, &policy) {
        println!(
            "  - {} | category: {} | threshold: {:.1} | description: {} chars",
            preview.title,
            preview.category.label(),
            preview.threshold,
            preview.description_chars
        );
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let outcome = screen_batch(demo_request(), ScreeningConfig::default(), today)?;

    println!("Candidate screening demo");
    render_report(&outcome.report);

    println!("\nNotifications");
    for notification in &outcome.notifications {
        println!(
            "  - {} -> {}",
            notification.candidate_id().0,
            notification.email().subject
        );
        if args.show_emails {
            println!("{}", indent(&notification.email().body));
        }
    }
    Ok(())
}

fn render_report(report: &ScreeningReport) {
    println!(
        "Job {} ({} role, threshold {:.1})",
        report.job_id.0,
        report.job_category.label(),
        report.threshold
    );
    println!(
        "Scored {} candidates, escalated {}, shortlisted {}, rejected {}",
        report.candidates_scored,
        report.escalated,
        report.shortlisted.len(),
        report.rejected.len()
    );

    if report.top_candidates.is_empty() {
        println!("\nTop candidates: none");
    } else {
        println!("\nTop candidates");
        for (index, candidate) in report.top_candidates.iter().enumerate() {
            println!(
                "  {}. {} ({}) similarity {:.2} | recruiting {} | final {}",
                index + 1,
                candidate.display_name(),
                candidate.candidate_id.0,
                candidate.similarity_score,
                format_optional(candidate.recruiting_score),
                format_optional(candidate.final_score)
            );
        }
    }

    if !report.rejected.is_empty() {
        println!("\nRejected");
        for candidate in &report.rejected {
            println!(
                "  - {} ({}): {}",
                candidate.display_name(),
                candidate.candidate_id.0,
                candidate.shortlisting_reason
            );
        }
    }
}

fn format_optional(score: Option<f64>) -> String {
    score
        .map(|value| format!("{value:.2}"))
        .unwrap_or_else(|| "n/a".to_string())
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("      {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn demo_request() -> ScreeningRunRequest {
    let job = JobRecord {
        job_id: JobId("demo-backend".to_string()),
        title: "Backend Software Engineer".to_string(),
        summary: Some(
            "Design and operate Rust web services backed by PostgreSQL and Kafka".to_string(),
        ),
        key_requirements: vec![
            "Rust web services".to_string(),
            "PostgreSQL schema design".to_string(),
            "Kafka event pipelines".to_string(),
        ],
        evaluation_questions: vec!["Has the candidate operated Kafka in production?".to_string()],
    };

    let candidates = vec![
        CandidateSubmission {
            candidate_id: Some(CandidateId("demo-ada".to_string())),
            resume: ResumeRecord {
                name: Some("Ada Byron".to_string()),
                skills: Some(ResumeField::list([
                    "Rust web services",
                    "PostgreSQL schema design",
                    "Kafka event pipelines",
                ])),
                experience: Some(ResumeField::entries([json!({
                    "title": "Backend Software Engineer",
                    "company": "Ledger",
                    "description": "Design and operate Rust web services backed by PostgreSQL and Kafka"
                })])),
                ..ResumeRecord::default()
            },
            recruiting_score: Some(9.0),
        },
        CandidateSubmission {
            candidate_id: Some(CandidateId("demo-grace".to_string())),
            resume: ResumeRecord {
                name: Some("Grace Hopper".to_string()),
                skills: Some(ResumeField::list(["COBOL", "compilers", "PostgreSQL"])),
                education: Some(ResumeField::entries([json!({
                    "degree": "PhD Mathematics",
                    "institution": "Yale"
                })])),
                ..ResumeRecord::default()
            },
            recruiting_score: None,
        },
        CandidateSubmission {
            candidate_id: None,
            resume: ResumeRecord {
                skills: Some(ResumeField::text("Watercolor, ceramics")),
                ..ResumeRecord::default()
            },
            recruiting_score: None,
        },
    ];

    ScreeningRunRequest {
        job,
        candidates,
        limit: Some(5),
        notify: true,
        today: None,
    }
}
