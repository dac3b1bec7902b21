use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::domain::{CandidateId, CandidateRecord, JobRecord};

const INTERVIEW_TIME_SLOTS: [&str; 5] = ["10:00 AM", "11:30 AM", "2:00 PM", "3:30 PM", "5:00 PM"];
pub const DEFAULT_INTERVIEW_FORMAT: &str = "video";

/// Rendered e-mail ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewInvitation {
    pub email: EmailMessage,
    pub candidate_name: String,
    pub job_title: String,
    pub interview_format: String,
    pub proposed_dates: Vec<NaiveDate>,
    pub proposed_times: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionNotice {
    pub email: EmailMessage,
    pub candidate_name: String,
}

/// Outbound message for one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CandidateNotification {
    Invitation {
        candidate_id: CandidateId,
        invitation: InterviewInvitation,
    },
    Rejection {
        candidate_id: CandidateId,
        rejection: RejectionNotice,
    },
}

impl CandidateNotification {
    pub fn candidate_id(&self) -> &CandidateId {
        match self {
            CandidateNotification::Invitation { candidate_id, .. }
            | CandidateNotification::Rejection { candidate_id, .. } => candidate_id,
        }
    }

    pub fn email(&self) -> &EmailMessage {
        match self {
            CandidateNotification::Invitation { invitation, .. } => &invitation.email,
            CandidateNotification::Rejection { rejection, .. } => &rejection.email,
        }
    }
}

/// Delivery hook for rendered notifications (SMTP, queue, or in-memory adapters).
pub trait NotificationPublisher: Send + Sync {
    fn publish(&self, notification: CandidateNotification) -> Result<(), NotificationError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// The first `count` weekdays starting `lead_days` after `today`.
///
/// Stops early rather than overflowing when the calendar runs out.
pub fn interview_dates(today: NaiveDate, count: usize, lead_days: u32) -> Vec<NaiveDate> {
    let mut dates = Vec::with_capacity(count);
    let mut next = today.checked_add_signed(Duration::days(i64::from(lead_days)));

    while dates.len() < count {
        let Some(current) = next else {
            break;
        };
        if !matches!(current.weekday(), Weekday::Sat | Weekday::Sun) {
            dates.push(current);
        }
        next = current.succ_opt();
    }

    dates
}

/// The first `count` standard time slots.
pub fn interview_times(count: usize) -> Vec<String> {
    INTERVIEW_TIME_SLOTS
        .iter()
        .take(count)
        .map(|slot| slot.to_string())
        .collect()
}

/// Settings for rendering invitations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvitationSchedule {
    pub today: NaiveDate,
    pub lead_days: u32,
    pub slots: usize,
    pub interview_format: String,
}

impl InvitationSchedule {
    pub fn new(today: NaiveDate, lead_days: u32, slots: usize) -> Self {
        Self {
            today,
            lead_days,
            slots,
            interview_format: DEFAULT_INTERVIEW_FORMAT.to_string(),
        }
    }
}

pub fn interview_invitation(
    job: &JobRecord,
    candidate: &CandidateRecord,
    schedule: &InvitationSchedule,
) -> InterviewInvitation {
    let candidate_name = candidate.display_name().to_string();
    let job_title = job.job_title().unwrap_or("the position").to_string();
    let proposed_dates = interview_dates(schedule.today, schedule.slots, schedule.lead_days);
    let proposed_times = interview_times(schedule.slots);

    let date_options = proposed_dates
        .iter()
        .map(|date| date.format("%Y-%m-%d").to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let time_options = proposed_times.join(", ");
    let format_label = capitalize(&schedule.interview_format);

    let body = format!(
        "Dear {candidate_name},\n\n\
         We are pleased to inform you that your application for the {job_title} position has been shortlisted. \
         We would like to invite you for an interview to further discuss your qualifications and experience.\n\n\
         Interview Details:\n\
         - Format: {format_label} Interview\n\
         - Potential Dates: {date_options}\n\
         - Potential Times: {time_options}\n\n\
         Please reply to this email with your preferred date and time from the options above, and we will confirm the details.\n\n\
         If you have any questions or need to reschedule, please don't hesitate to contact us.\n\n\
         We look forward to speaking with you!\n\n\
         Best regards,\n\
         Recruitment Team\n"
    );

    InterviewInvitation {
        email: EmailMessage {
            subject: format!("Interview Invitation: {job_title} Position"),
            body,
        },
        candidate_name,
        job_title,
        interview_format: schedule.interview_format.clone(),
        proposed_dates,
        proposed_times,
    }
}

pub fn rejection_notice(candidate: &CandidateRecord) -> RejectionNotice {
    let candidate_name = candidate.display_name().to_string();
    let body = format!(
        "Dear {candidate_name},\n\n\
         Thank you for your interest in our company and for taking the time to apply for the position.\n\n\
         After careful consideration of your application, we regret to inform you that we have decided not to move forward with your candidacy at this time. \
         We received many qualified applications, and the selection process was highly competitive.\n\n\
         We appreciate your interest in our organization and encourage you to apply for future positions that match your qualifications and experience.\n\n\
         We wish you the best in your job search and future professional endeavors.\n\n\
         Best regards,\n\
         Recruitment Team\n"
    );

    RejectionNotice {
        email: EmailMessage {
            subject: "Application Status Update".to_string(),
            body,
        },
        candidate_name,
    }
}

/// First character upper-cased, the rest lower-cased.
fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
