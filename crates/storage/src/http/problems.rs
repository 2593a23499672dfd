use async_trait::async_trait;
use practice_core::model::{Problem, ProblemEntry, ProblemId, TagName};
use reqwest::Method;
use serde_json::Value;

use super::HttpRepository;
use super::payload::{
    ProblemEntryPayload, SuspendRequest, TagRequest, decode_due_problem, decode_problem,
    map_entries,
};
use crate::repository::{ProblemCatalog, ProblemSource, ProblemSuspension, StorageError};

fn problem_path(id: ProblemId, action: &str) -> String {
    format!("api/problems/{}/{action}", id.value())
}

#[async_trait]
impl ProblemSource for HttpRepository {
    async fn next_due(&self) -> Result<Option<Problem>, StorageError> {
        let url = self.config.endpoint("api/problems/")?;
        let body: Value = self.get_json(url).await?;
        let problem = decode_due_problem(&body)?;
        tracing::debug!(problem = ?problem.as_ref().map(Problem::id), "next due problem");
        Ok(problem)
    }
}

#[async_trait]
impl ProblemSuspension for HttpRepository {
    async fn suspend(
        &self,
        id: ProblemId,
        reason: Option<&str>,
    ) -> Result<ProblemEntry, StorageError> {
        let url = self.config.endpoint(&problem_path(id, "suspend"))?;
        let payload: ProblemEntryPayload = self
            .send_json(Method::POST, url, Some(&SuspendRequest { reason }))
            .await?;
        ProblemEntry::try_from(payload)
    }

    async fn unsuspend(&self, id: ProblemId) -> Result<ProblemEntry, StorageError> {
        let url = self.config.endpoint(&problem_path(id, "unsuspend"))?;
        let payload: ProblemEntryPayload = self
            .send_json(Method::POST, url, None::<&Value>)
            .await?;
        ProblemEntry::try_from(payload)
    }

    async fn list_suspended(&self) -> Result<Vec<ProblemEntry>, StorageError> {
        let url = self.config.endpoint("api/problems/suspended")?;
        map_entries(self.get_json(url).await?)
    }
}

#[async_trait]
impl ProblemCatalog for HttpRepository {
    async fn list_all(&self) -> Result<Vec<ProblemEntry>, StorageError> {
        let url = self.config.endpoint("api/problems/all")?;
        map_entries(self.get_json(url).await?)
    }

    async fn add_tag(&self, id: ProblemId, tag: &TagName) -> Result<(), StorageError> {
        let url = self.config.endpoint(&problem_path(id, "tags"))?;
        let body = TagRequest {
            tag_name: tag.as_str(),
        };
        self.send_unit(Method::POST, url, Some(&body)).await
    }

    async fn remove_tag(&self, id: ProblemId, tag: &TagName) -> Result<(), StorageError> {
        let url = self.config.endpoint(&problem_path(id, "tags"))?;
        let body = TagRequest {
            tag_name: tag.as_str(),
        };
        self.send_unit(Method::DELETE, url, Some(&body)).await
    }

    async fn demo(&self, id: ProblemId) -> Result<Problem, StorageError> {
        let url = self.config.endpoint(&problem_path(id, "demo"))?;
        let body: Value = self.get_json(url).await?;
        decode_problem(&body)
    }
}
