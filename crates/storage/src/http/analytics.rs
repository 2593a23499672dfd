use async_trait::async_trait;
use practice_core::model::AnalyticsReport;

use super::HttpRepository;
use super::payload::AnalyticsPayload;
use crate::repository::{AnalyticsSource, StorageError};

#[async_trait]
impl AnalyticsSource for HttpRepository {
    async fn analytics(&self) -> Result<AnalyticsReport, StorageError> {
        let url = self.config.endpoint("api/analytics/")?;
        let payload: AnalyticsPayload = self.get_json(url).await?;
        AnalyticsReport::try_from(payload)
    }
}
