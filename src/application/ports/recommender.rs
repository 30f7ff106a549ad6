//! Song recommendation port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::recommendation::Recommendation;
use crate::domain::session::VoiceSamples;

/// Recommendation errors
#[derive(Debug, Clone, Error)]
pub enum RecommendationError {
    #[error("Invalid service endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Failed to build request: {0}")]
    InvalidRequest(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Service returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Failed to parse service response: {0}")]
    ParseError(String),
}

/// Port for the remote song recommendation service
#[async_trait]
pub trait SongRecommender: Send + Sync {
    /// Send the three voice samples and return the recommended songs in
    /// the order the service ranked them.
    async fn recommend(
        &self,
        samples: &VoiceSamples,
    ) -> Result<Vec<Recommendation>, RecommendationError>;
}
