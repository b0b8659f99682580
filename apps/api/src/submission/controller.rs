//! One submission cycle.
//!
//! Flow: validate → notify → render (blocking thread) → publish → cleanup.
//!
//! The temp photo is removed on every exit path, including validation and
//! render failures. Notification never blocks the cycle: its outcome is
//! logged and reported alongside the document.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::errors::AppError;
use crate::notify::NotifyOutcome;
use crate::render::{render_resume, RenderError};
use crate::state::AppState;
use crate::storage::remove_temp_file;
use crate::submission::models::{RawSubmission, Submission, SubmissionId, TempPhoto};
use crate::submission::validation::validate;

/// What a successful cycle hands back to the caller.
#[derive(Debug)]
pub struct CycleOutput {
    pub id: SubmissionId,
    pub pdf: Vec<u8>,
    pub published_path: PathBuf,
    pub notification: NotifyOutcome,
}

pub async fn run_cycle(
    state: &AppState,
    id: SubmissionId,
    raw: RawSubmission,
    photo: Option<TempPhoto>,
) -> Result<CycleOutput, AppError> {
    let result = process(state, id, raw, photo.as_ref()).await;

    if let Some(photo) = &photo {
        remove_temp_file(&photo.path).await;
    }

    match &result {
        Ok(output) => info!(
            submission_id = %id,
            notification = output.notification.label(),
            bytes = output.pdf.len(),
            path = %output.published_path.display(),
            "Resume generated"
        ),
        Err(AppError::Validation { field, message }) => {
            info!(submission_id = %id, field = *field, "Submission rejected: {message}")
        }
        Err(AppError::Render(RenderError::PhotoUnreadable { path, source })) => warn!(
            submission_id = %id,
            path = %path.display(),
            "Photo unreadable at render time: {source}"
        ),
        Err(e) => warn!(submission_id = %id, "Submission failed: {e}"),
    }
    result
}

async fn process(
    state: &AppState,
    id: SubmissionId,
    raw: RawSubmission,
    photo: Option<&TempPhoto>,
) -> Result<CycleOutput, AppError> {
    validate(&raw)?;
    let submission = Submission::from_validated(raw);

    let notification = state.notifier.notify(&submission, photo).await;

    let photo_path = photo.map(|p| p.path.clone());
    let pdf = tokio::task::spawn_blocking(move || {
        render_resume(&submission, photo_path.as_deref())
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("render task failed: {e}")))??;

    let published_path = state
        .store
        .publish(id, pdf.clone())
        .await
        .map_err(|e| AppError::Storage(format!("{e:#}")))?;

    Ok(CycleOutput {
        id,
        pdf,
        published_path,
        notification,
    })
}
