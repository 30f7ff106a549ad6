//! HTTP song recommender adapter
//!
//! Sends the three clips as one `multipart/form-data` POST and reads back a
//! JSON array of `{ "name", "artist" }` objects.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

use crate::application::ports::{RecommendationError, SongRecommender};
use crate::domain::recommendation::Recommendation;
use crate::domain::session::VoiceSamples;

// Response types for the recommendation service

#[derive(Debug, Deserialize)]
struct SongDto {
    name: String,
    artist: String,
}

impl From<SongDto> for Recommendation {
    fn from(dto: SongDto) -> Self {
        Recommendation::new(dto.name, dto.artist)
    }
}

/// Recommendation service client
pub struct HttpRecommender {
    endpoint: Url,
    client: reqwest::Client,
}

impl HttpRecommender {
    pub fn new(endpoint: &str) -> Result<Self, RecommendationError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| RecommendationError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;
        Ok(Self {
            endpoint,
            client: reqwest::Client::new(),
        })
    }

    /// One file part per slot, in slot order
    fn build_form(samples: &VoiceSamples) -> Result<Form, RecommendationError> {
        let mut form = Form::new();
        for (slot, audio) in samples.parts() {
            let part = Part::bytes(audio.data().to_vec())
                .file_name(slot.file_name())
                .mime_str(audio.mime_type())
                .map_err(|e| RecommendationError::InvalidRequest(e.to_string()))?;
            form = form.part(slot.field_name(), part);
        }
        Ok(form)
    }

    fn parse_body(body: &str) -> Result<Vec<Recommendation>, RecommendationError> {
        let songs: Vec<SongDto> =
            serde_json::from_str(body).map_err(|e| RecommendationError::ParseError(e.to_string()))?;
        Ok(songs.into_iter().map(Recommendation::from).collect())
    }
}

#[async_trait]
impl SongRecommender for HttpRecommender {
    async fn recommend(
        &self,
        samples: &VoiceSamples,
    ) -> Result<Vec<Recommendation>, RecommendationError> {
        let form = Self::build_form(samples)?;
        debug!(endpoint = %self.endpoint, "posting voice samples");

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| RecommendationError::RequestFailed(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RecommendationError::RequestFailed(e.to_string()))?;

        if !status.is_success() {
            return Err(RecommendationError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        Self::parse_body(&body)
    }
}
