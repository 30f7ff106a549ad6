//! Clip store backed by a session-scoped temporary directory

use async_trait::async_trait;
use tempfile::TempDir;
use tokio::fs;
use tracing::debug;

use crate::application::ports::{ClipStore, ClipStoreError};
use crate::domain::audio::AudioData;
use crate::domain::recording::{AudioRef, RecordingId};

/// Writes each clip to `<tempdir>/<short id>.wav`.
///
/// The directory and anything left in it are removed when the store drops.
pub struct TempClipStore {
    dir: TempDir,
}

impl TempClipStore {
    pub fn new() -> Result<Self, ClipStoreError> {
        let dir = tempfile::Builder::new()
            .prefix("voice-sampler-")
            .tempdir()
            .map_err(|e| ClipStoreError::Unavailable(e.to_string()))?;
        debug!(dir = %dir.path().display(), "clip directory created");
        Ok(Self { dir })
    }

    #[cfg(test)]
    pub(crate) fn dir(&self) -> &std::path::Path {
        self.dir.path()
    }

    fn owns(&self, reference: &AudioRef) -> bool {
        reference.path().starts_with(self.dir.path())
    }
}

#[async_trait]
impl ClipStore for TempClipStore {
    async fn publish(&self, id: RecordingId, audio: &AudioData) -> Result<AudioRef, ClipStoreError> {
        let path = self.dir.path().join(format!("{}.wav", id.short()));
        fs::write(&path, audio.data())
            .await
            .map_err(|e| ClipStoreError::WriteFailed(format!("{}: {}", path.display(), e)))?;
        Ok(AudioRef::new(path))
    }

    async fn revoke(&self, reference: &AudioRef) -> Result<(), ClipStoreError> {
        if !self.owns(reference) {
            return Ok(());
        }
        match fs::remove_file(reference.path()).await {
            Ok(()) => {
                debug!(%reference, "clip revoked");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClipStoreError::RemoveFailed(e.to_string())),
        }
    }
}
