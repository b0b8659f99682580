//! Notifier: mails a submission summary to the configured recipient.
//!
//! Pluggable and trait-based. `AppState` carries an `Arc<dyn Notifier>`:
//! `MailApiNotifier` when mail is configured, `DisabledNotifier` otherwise.
//! Notifiers never return errors; every failure is folded into
//! `NotifyOutcome::Failed` so the caller can log it and carry on.

pub mod mail_api;

use async_trait::async_trait;
use serde::Serialize;

use crate::submission::models::{Submission, TempPhoto};

pub use mail_api::MailApiNotifier;

pub const SUBJECT: &str = "New Resume Submission";

/// Result of one delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NotifyOutcome {
    Sent,
    Skipped { reason: String },
    Failed { reason: String },
}

impl NotifyOutcome {
    /// Short label for response headers and logs.
    pub fn label(&self) -> &'static str {
        match self {
            NotifyOutcome::Sent => "sent",
            NotifyOutcome::Skipped { .. } => "skipped",
            NotifyOutcome::Failed { .. } => "failed",
        }
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Attempts delivery exactly once.
    async fn notify(&self, submission: &Submission, photo: Option<&TempPhoto>) -> NotifyOutcome;
}

/// Used when no mail API is configured.
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn notify(&self, _submission: &Submission, _photo: Option<&TempPhoto>) -> NotifyOutcome {
        NotifyOutcome::Skipped {
            reason: "mail delivery is not configured".to_string(),
        }
    }
}

/// Plain-text mail body: one labelled line per field.
pub fn format_message(submission: &Submission) -> String {
    format!(
        "Name: {}\nEmail: {}\nPhone: {}\nSkills: {}\nEducation: {}\nExperience: {}\nProjects: {}\n",
        submission.name,
        submission.email,
        submission.phone,
        submission.skills_line(),
        submission.education,
        submission.experience,
        submission.projects,
    )
}
