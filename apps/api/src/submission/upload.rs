use std::path::Path;

use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;
use crate::storage::OutputStore;
use crate::submission::models::{SubmissionId, TempPhoto};

/// A photo as received from the form, before it touches the disk.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub file_name: String,
    pub bytes: Bytes,
}

/// MIME type for an accepted photo extension (jpg, jpeg, png; any case).
pub fn photo_content_type(file_name: &str) -> Option<&'static str> {
    let ext = Path::new(file_name).extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        _ => None,
    }
}

/// Writes the upload to its per-submission temp path.
pub async fn save_temp_photo(
    store: &OutputStore,
    id: SubmissionId,
    upload: PhotoUpload,
) -> Result<TempPhoto, AppError> {
    let content_type = photo_content_type(&upload.file_name).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Photo '{}' must be a jpg, jpeg or png file",
            upload.file_name
        ))
    })?;

    let path = store.temp_photo_path(id, &upload.file_name);
    tokio::fs::write(&path, &upload.bytes)
        .await
        .map_err(|e| {
            AppError::Storage(format!("Failed to store photo at {}: {e}", path.display()))
        })?;

    debug!(
        submission_id = %id,
        path = %path.display(),
        bytes = upload.bytes.len(),
        "Photo stored"
    );

    Ok(TempPhoto {
        path,
        original_name: upload.file_name,
        content_type,
    })
}
