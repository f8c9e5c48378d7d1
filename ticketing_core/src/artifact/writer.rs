//! QR artifact encoding and filesystem output.

use std::fs;
use std::path::{Path, PathBuf};

use image::Luma;
use log::debug;
use qrcode::{EcLevel, QrCode};

use super::payload::TicketPayload;

/// Error type for artifact generation.
///
/// Nothing in this module panics past its boundary; the issuance
/// orchestrator decides whether a failed artifact skips the passenger or
/// aborts the batch.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to write ticket artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode ticket payload: {0}")]
    Encoding(#[from] qrcode::types::QrError),

    #[error("failed to render artifact image: {0}")]
    Image(#[from] image::ImageError),
}

/// A successfully written artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredArtifact {
    /// Uniqueness key derived from the encoded payload.
    pub artifact_id: String,
    /// Where the image was written.
    pub location: PathBuf,
}

/// Injectable encoding boundary between payload construction and I/O.
///
/// The real implementation writes QR images; tests substitute stubs to
/// exercise issuance failure paths without touching the filesystem.
pub trait ArtifactEncoder: Send + Sync {
    /// Encode one payload into a stored artifact.
    ///
    /// A successful call produces exactly one artifact; a failed call
    /// produces none.
    fn encode(&self, payload: &TicketPayload) -> Result<StoredArtifact, ArtifactError>;
}

/// Writes each ticket payload as a QR code PNG into an output directory.
///
/// The directory is created on demand. Encoding uses the highest error
/// correction level so a crumpled or partially obscured ticket still
/// scans.
#[derive(Debug, Clone)]
pub struct QrArtifactWriter {
    output_dir: PathBuf,
}

impl QrArtifactWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

impl ArtifactEncoder for QrArtifactWriter {
    fn encode(&self, payload: &TicketPayload) -> Result<StoredArtifact, ArtifactError> {
        fs::create_dir_all(&self.output_dir)?;

        let text = payload.render_text();
        let code = QrCode::with_error_correction_level(text.as_bytes(), EcLevel::H)?;
        let image = code.render::<Luma<u8>>().module_dimensions(10, 10).build();

        let location = self.output_dir.join(format!("{}.png", payload.file_stem()));
        image.save(&location)?;
        debug!(
            "wrote ticket artifact serial={} to {}",
            payload.serial,
            location.display()
        );

        Ok(StoredArtifact {
            artifact_id: payload.artifact_id(),
            location,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tempfile::tempdir;

    use super::*;

    fn payload() -> TicketPayload {
        TicketPayload::new(
            1,
            "Asha Rao",
            30,
            "Origin",
            "Edge",
            75,
            NaiveDate::from_ymd_opt(2025, 3, 14)
                .unwrap()
                .and_hms_opt(9, 26, 53)
                .unwrap(),
        )
    }

    #[test]
    fn writes_one_png_per_call() {
        let dir = tempdir().unwrap();
        let writer = QrArtifactWriter::new(dir.path());

        let artifact = writer.encode(&payload()).unwrap();

        assert!(artifact.location.exists());
        assert_eq!(
            artifact.location.file_name().unwrap().to_str().unwrap(),
            "Asha_Rao_Origin_Edge_20250314092653_01.png"
        );
        assert_eq!(artifact.artifact_id, payload().artifact_id());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn creates_output_directory_on_demand() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("artifacts").join("qrcodes");
        let writer = QrArtifactWriter::new(&nested);

        writer.encode(&payload()).unwrap();

        assert!(nested.is_dir());
    }

    #[test]
    fn unwritable_output_fails_without_panicking() {
        let dir = tempdir().unwrap();
        // A regular file where the output directory should be.
        let blocked = dir.path().join("qrcodes");
        fs::write(&blocked, b"not a directory").unwrap();
        let writer = QrArtifactWriter::new(&blocked);

        let result = writer.encode(&payload());
        assert!(matches!(result, Err(ArtifactError::Io(_))));
    }
}
