//! Axum route handlers for the resume form.

use axum::{
    extract::{Multipart, State},
    http::{header, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::errors::AppError;
use crate::state::AppState;
use crate::storage::{TempFileGuard, OUTPUT_FILE_NAME};
use crate::submission::controller::run_cycle;
use crate::submission::models::{RawSubmission, SubmissionId};
use crate::submission::upload::{save_temp_photo, PhotoUpload};

pub const SUBMISSION_ID_HEADER: &str = "x-submission-id";
pub const NOTIFICATION_HEADER: &str = "x-notification";

/// Multipart name of the photo file input.
const PHOTO_FIELD: &str = "photo";

/// Everything the form sent, before any validation.
#[derive(Debug, Default)]
pub struct FormInput {
    pub fields: RawSubmission,
    pub photo: Option<PhotoUpload>,
}

/// POST /api/v1/resumes
///
/// Runs one submission cycle and answers with the PDF as a download.
pub async fn handle_submit(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let id = SubmissionId::new();
    let form = read_form(&mut multipart).await?;

    let photo = match form.photo {
        Some(upload) => Some(save_temp_photo(&state.store, id, upload).await?),
        None => None,
    };
    // Removes the upload if this future is dropped before the cycle cleans up.
    let _cleanup = photo.as_ref().map(|p| TempFileGuard::new(&p.path));

    let output = run_cycle(&state, id, form.fields, photo).await?;

    let mut response = pdf_download(output.pdf)?;
    let headers = response.headers_mut();
    headers.insert(
        HeaderName::from_static(SUBMISSION_ID_HEADER),
        header_value(output.id.to_string())?,
    );
    headers.insert(
        HeaderName::from_static(NOTIFICATION_HEADER),
        HeaderValue::from_static(output.notification.label()),
    );
    Ok(response)
}

/// GET /api/v1/resumes/latest
///
/// Serves the most recently published resume.
pub async fn handle_latest(State(state): State<AppState>) -> Result<Response, AppError> {
    let pdf = state
        .store
        .read_latest()
        .await
        .map_err(|e| AppError::Storage(format!("{e:#}")))?
        .ok_or_else(|| AppError::NotFound("No resume has been generated yet".to_string()))?;
    pdf_download(pdf)
}

async fn read_form(multipart: &mut Multipart) -> Result<FormInput, AppError> {
    let mut form = FormInput::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed form data: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == PHOTO_FIELD {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read photo: {e}")))?;
            // Browsers send an empty part when no file was chosen.
            if !file_name.is_empty() && !bytes.is_empty() {
                form.photo = Some(PhotoUpload { file_name, bytes });
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read field '{name}': {e}")))?;
        if !form.fields.set_field(&name, &value) {
            debug!("Ignoring unknown form field '{name}'");
        }
    }

    Ok(form)
}

fn pdf_download(pdf: Vec<u8>) -> Result<Response, AppError> {
    let mut response = pdf.into_response();
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/pdf"));
    headers.insert(
        header::CONTENT_DISPOSITION,
        header_value(format!("attachment; filename=\"{OUTPUT_FILE_NAME}\""))?,
    );
    Ok(response)
}

fn header_value(value: String) -> Result<HeaderValue, AppError> {
    HeaderValue::try_from(value)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("invalid header value: {e}")))
}
