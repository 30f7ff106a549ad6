//! Clip store port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::audio::AudioData;
use crate::domain::recording::{AudioRef, RecordingId};

/// Clip store errors
#[derive(Debug, Clone, Error)]
pub enum ClipStoreError {
    #[error("Failed to prepare clip storage: {0}")]
    Unavailable(String),

    #[error("Failed to write clip: {0}")]
    WriteFailed(String),

    #[error("Failed to remove clip: {0}")]
    RemoveFailed(String),
}

/// Port for turning clip bytes into a playable reference.
///
/// References stay valid until revoked or until the store is dropped;
/// nothing outlives the session.
#[async_trait]
pub trait ClipStore: Send + Sync {
    async fn publish(&self, id: RecordingId, audio: &AudioData) -> Result<AudioRef, ClipStoreError>;

    /// Forget a reference. Revoking an unknown reference is not an error.
    async fn revoke(&self, reference: &AudioRef) -> Result<(), ClipStoreError>;
}
