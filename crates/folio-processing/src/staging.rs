//! Scoped on-disk staging for decoders that need random access to a file.
//!
//! A `StagedFile` owns a uniquely named temp file and removes it when dropped, so
//! every exit path (early return, `?`, panic unwinding, a cancelled request whose
//! blocking task finishes later) releases the file without explicit cleanup.

use folio_core::AppError;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const STAGING_PREFIX: &str = "folio-";

/// Factory for staged files, optionally rooted in a configured directory.
#[derive(Debug, Clone, Default)]
pub struct TempStaging {
    dir: Option<PathBuf>,
}

impl TempStaging {
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }

    /// Directory staged files are created in.
    pub fn dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(std::env::temp_dir)
    }

    /// Write `data` to a fresh temp file and hand back its scoped owner.
    ///
    /// Failures are logged with their paths here; the returned error carries none.
    pub fn stage(&self, data: &[u8], suffix: &str) -> Result<StagedFile, AppError> {
        let dir = self.dir();
        let file = write_temp_file(&dir, data, suffix).map_err(|e| {
            tracing::error!(
                dir = %dir.display(),
                error = %e,
                "Failed to stage upload to temp file"
            );
            AppError::Internal("failed to stage upload".to_string())
        })?;

        tracing::debug!(
            path = %file.path().display(),
            size = data.len(),
            "Staged upload to temp file"
        );

        Ok(StagedFile { file: Some(file) })
    }
}

fn write_temp_file(dir: &Path, data: &[u8], suffix: &str) -> io::Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .suffix(suffix)
        .tempfile_in(dir)?;
    file.write_all(data)?;
    file.flush()?;
    Ok(file)
}

/// A temp file that lives exactly as long as this value.
#[derive(Debug)]
pub struct StagedFile {
    file: Option<NamedTempFile>,
}

impl StagedFile {
    pub fn path(&self) -> &Path {
        // `file` is only taken in `drop`
        self.file
            .as_ref()
            .map(|f| f.path())
            .unwrap_or_else(|| Path::new(""))
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        let Some(file) = self.file.take() else {
            return;
        };
        let path = file.path().to_path_buf();
        match file.close() {
            Ok(()) => tracing::debug!(path = %path.display(), "Removed staged temp file"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                path = %path.display(),
                error = %e,
                "Failed to remove staged temp file"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::ErrorMetadata;
    use tempfile::TempDir;

    fn entries(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn test_stage_writes_payload() {
        let dir = TempDir::new().unwrap();
        let staging = TempStaging::new(Some(dir.path().to_path_buf()));

        let staged = staging.stage(b"hello", ".txt").unwrap();
        assert_eq!(std::fs::read(staged.path()).unwrap(), b"hello");
        assert!(staged
            .path()
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with(STAGING_PREFIX));
        assert_eq!(entries(dir.path()), 1);
    }

    #[test]
    fn test_drop_removes_file() {
        let dir = TempDir::new().unwrap();
        let staging = TempStaging::new(Some(dir.path().to_path_buf()));

        {
            let _staged = staging.stage(b"data", ".pdf").unwrap();
            assert_eq!(entries(dir.path()), 1);
        }
        assert_eq!(entries(dir.path()), 0);
    }

    #[test]
    fn test_drop_tolerates_already_removed_file() {
        let dir = TempDir::new().unwrap();
        let staging = TempStaging::new(Some(dir.path().to_path_buf()));

        let staged = staging.stage(b"data", ".pdf").unwrap();
        std::fs::remove_file(staged.path()).unwrap();
        drop(staged);
        assert_eq!(entries(dir.path()), 0);
    }

    #[test]
    fn test_stage_failure_hides_paths() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("vanished");
        let staging = TempStaging::new(Some(missing.clone()));

        let err = staging.stage(b"data", ".pdf").unwrap_err();
        assert!(matches!(err, AppError::Internal(_)), "{:?}", err);
        let detail = err.client_message();
        assert!(!detail.contains(&*dir.path().to_string_lossy()), "{}", detail);
        assert_eq!(detail, "Error processing file: failed to stage upload");
    }

    #[test]
    fn test_concurrent_stages_get_unique_names() {
        let dir = TempDir::new().unwrap();
        let staging = TempStaging::new(Some(dir.path().to_path_buf()));

        let a = staging.stage(b"a", ".pdf").unwrap();
        let b = staging.stage(b"b", ".pdf").unwrap();
        assert_ne!(a.path(), b.path());
        assert_eq!(entries(dir.path()), 2);
    }

    #[test]
    fn test_removed_on_panic_unwind() {
        let dir = TempDir::new().unwrap();
        let staging = TempStaging::new(Some(dir.path().to_path_buf()));

        let result = std::panic::catch_unwind(|| {
            let _staged = staging.stage(b"data", ".docx").unwrap();
            panic!("decoder blew up");
        });
        assert!(result.is_err());
        assert_eq!(entries(dir.path()), 0);
    }
}
