use async_trait::async_trait;
use practice_core::model::{Review, ReviewOutcome};
use reqwest::Method;

use super::HttpRepository;
use super::payload::{ReviewPayload, ReviewRequest};
use crate::repository::{ReviewHistory, ReviewRecorder, StorageError};

#[async_trait]
impl ReviewRecorder for HttpRepository {
    async fn record_review(&self, outcome: &ReviewOutcome) -> Result<(), StorageError> {
        let url = self.config.endpoint("api/reviews/")?;
        let body = ReviewRequest {
            problem_id: outcome.problem_id.value(),
            correct: outcome.correct,
        };
        self.send_unit(Method::POST, url, Some(&body)).await
    }
}

#[async_trait]
impl ReviewHistory for HttpRepository {
    async fn list_reviews(&self, skip: u32, limit: u32) -> Result<Vec<Review>, StorageError> {
        let mut url = self.config.endpoint("api/reviews/")?;
        url.query_pairs_mut()
            .append_pair("skip", &skip.to_string())
            .append_pair("limit", &limit.to_string());
        let payloads: Vec<ReviewPayload> = self.get_json(url).await?;
        payloads.into_iter().map(Review::try_from).collect()
    }
}
