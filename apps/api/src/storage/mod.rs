//! Output store: the well-known resume file and per-submission temp photos.
//!
//! Intermediates are namespaced by submission id. The published resume is
//! written to a staging file in the output directory and atomically renamed
//! over the well-known path, so readers never see a torn file and the last
//! completed submission wins.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::submission::models::SubmissionId;

/// Download name and on-disk name of the published resume.
pub const OUTPUT_FILE_NAME: &str = "stylish_resume_with_photo.pdf";

/// Marker prefixed to every stored upload.
pub const TEMP_PREFIX: &str = "temp_";

#[derive(Debug, Clone)]
pub struct OutputStore {
    upload_dir: PathBuf,
    output_dir: PathBuf,
}

impl OutputStore {
    /// Creates both directories if they do not exist yet.
    pub fn new(upload_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Result<Self> {
        let store = Self {
            upload_dir: upload_dir.into(),
            output_dir: output_dir.into(),
        };
        std::fs::create_dir_all(&store.upload_dir).with_context(|| {
            format!("Failed to create upload dir {}", store.upload_dir.display())
        })?;
        std::fs::create_dir_all(&store.output_dir).with_context(|| {
            format!("Failed to create output dir {}", store.output_dir.display())
        })?;
        Ok(store)
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(OUTPUT_FILE_NAME)
    }

    /// `temp_<submission-id>_<original-file-name>` inside the upload dir.
    /// Only the last component of the client-supplied name is kept.
    pub fn temp_photo_path(&self, id: SubmissionId, original_name: &str) -> PathBuf {
        let file_name = Path::new(original_name)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("photo");
        self.upload_dir.join(format!("{TEMP_PREFIX}{id}_{file_name}"))
    }

    /// Atomically replaces the published resume with `pdf`.
    pub async fn publish(&self, id: SubmissionId, pdf: Vec<u8>) -> Result<PathBuf> {
        let output_dir = self.output_dir.clone();
        let target = self.output_path();
        tokio::task::spawn_blocking(move || atomic_write(&output_dir, &target, id, &pdf))
            .await
            .context("publish task panicked")?
    }

    /// Reads the most recently published resume, if any.
    pub async fn read_latest(&self) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(self.output_path()).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).context("Failed to read published resume"),
        }
    }
}

fn atomic_write(dir: &Path, target: &Path, id: SubmissionId, data: &[u8]) -> Result<PathBuf> {
    let mut staging = tempfile::Builder::new()
        .prefix(&format!(".{id}_"))
        .suffix(".pdf.part")
        .tempfile_in(dir)
        .with_context(|| format!("Failed to create staging file in {}", dir.display()))?;

    write_and_flush(&mut staging, data)
        .with_context(|| format!("Failed to write staging file for {}", target.display()))?;

    staging
        .persist(target)
        .with_context(|| format!("Failed to persist resume to {}", target.display()))?;

    debug!(submission_id = %id, path = %target.display(), "Resume published");
    Ok(target.to_path_buf())
}

fn write_and_flush(file: &mut NamedTempFile, data: &[u8]) -> std::io::Result<()> {
    file.write_all(data)?;
    file.flush()
}

/// Deletes a temp photo. A file that is already gone is nothing to do.
/// Returns whether a file was removed.
pub async fn remove_temp_file(path: &Path) -> bool {
    match tokio::fs::remove_file(path).await {
        Ok(()) => true,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "Temp file already gone");
            false
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), "Failed to remove temp file: {e}");
            false
        }
    }
}

/// Deletes a temp file when dropped, so an abandoned request cannot leave
/// its upload behind. Removal after the file is already gone is a no-op.
#[derive(Debug)]
pub struct TempFileGuard {
    path: PathBuf,
}

impl TempFileGuard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Abandoned temp file removed"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "Failed to remove temp file: {e}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(dir: &Path) -> OutputStore {
        OutputStore::new(dir.join("uploads"), dir.join("out")).unwrap()
    }

    #[test]
    fn test_new_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        store(dir.path());
        assert!(dir.path().join("uploads").is_dir());
        assert!(dir.path().join("out").is_dir());
    }

    #[test]
    fn test_temp_photo_path_is_prefixed_and_namespaced() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        let id = SubmissionId::new();

        let path = store.temp_photo_path(id, "me.png");
        let name = path.file_name().unwrap().to_str().unwrap();
        assert_eq!(name, format!("temp_{id}_me.png"));
        assert!(path.starts_with(dir.path().join("uploads")));
    }

    #[test]
    fn test_temp_photo_path_strips_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        let path = store.temp_photo_path(SubmissionId::new(), "../../etc/me.jpg");
        assert!(path.starts_with(dir.path().join("uploads")));
        assert!(path.to_str().unwrap().ends_with("_me.jpg"));
    }

    #[test]
    fn test_distinct_submissions_get_distinct_temp_paths() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        assert_ne!(
            store.temp_photo_path(SubmissionId::new(), "me.png"),
            store.temp_photo_path(SubmissionId::new(), "me.png")
        );
    }

    #[tokio::test]
    async fn test_publish_last_write_wins() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        store.publish(SubmissionId::new(), b"first".to_vec()).await.unwrap();
        store.publish(SubmissionId::new(), b"second".to_vec()).await.unwrap();

        assert_eq!(store.read_latest().await.unwrap().unwrap(), b"second");
        let files: Vec<_> = std::fs::read_dir(dir.path().join("out"))
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(files, vec![std::ffi::OsString::from(OUTPUT_FILE_NAME)]);
    }

    #[tokio::test]
    async fn test_read_latest_before_any_publish() {
        let dir = tempfile::tempdir().unwrap();
        assert!(store(dir.path()).read_latest().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove_temp_file_tolerates_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("temp_x.png");
        std::fs::write(&path, b"x").unwrap();

        assert!(remove_temp_file(&path).await);
        assert!(!path.exists());
        assert!(!remove_temp_file(&path).await);
    }

    #[test]
    fn test_guard_removes_file_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("temp_y.png");
        std::fs::write(&path, b"y").unwrap();

        drop(TempFileGuard::new(&path));
        assert!(!path.exists());
    }

    #[test]
    fn test_guard_tolerates_already_removed_file() {
        let dir = tempfile::tempdir().unwrap();
        drop(TempFileGuard::new(dir.path().join("temp_never_written.png")));
    }
}
