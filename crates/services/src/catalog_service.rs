use std::sync::Arc;

use practice_core::model::{Problem, ProblemEntry, ProblemId, TagName};
use storage::repository::{ProblemCatalog, ProblemSuspension};

use crate::error::CatalogError;

/// Browsing and administration of the problem catalog.
#[derive(Clone)]
pub struct CatalogService {
    catalog: Arc<dyn ProblemCatalog>,
    suspensions: Arc<dyn ProblemSuspension>,
}

impl CatalogService {
    #[must_use]
    pub fn new(catalog: Arc<dyn ProblemCatalog>, suspensions: Arc<dyn ProblemSuspension>) -> Self {
        Self {
            catalog,
            suspensions,
        }
    }

    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if repository access fails.
    pub async fn list_all(&self) -> Result<Vec<ProblemEntry>, CatalogError> {
        Ok(self.catalog.list_all().await?)
    }

    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if repository access fails.
    pub async fn list_suspended(&self) -> Result<Vec<ProblemEntry>, CatalogError> {
        Ok(self.suspensions.list_suspended().await?)
    }

    /// Suspend a problem from the catalog views.
    ///
    /// Blank reasons are sent as no reason at all.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if repository access fails.
    pub async fn suspend(
        &self,
        id: ProblemId,
        reason: Option<&str>,
    ) -> Result<ProblemEntry, CatalogError> {
        let reason = reason.map(str::trim).filter(|text| !text.is_empty());
        Ok(self.suspensions.suspend(id, reason).await?)
    }

    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if repository access fails.
    pub async fn unsuspend(&self, id: ProblemId) -> Result<ProblemEntry, CatalogError> {
        Ok(self.suspensions.unsuspend(id).await?)
    }

    /// Flip the suspension state of an entry, keeping its stored reason.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if repository access fails.
    pub async fn toggle_suspended(
        &self,
        entry: &ProblemEntry,
    ) -> Result<ProblemEntry, CatalogError> {
        if entry.suspended {
            self.unsuspend(entry.id).await
        } else {
            self.suspend(entry.id, entry.suspend_reason.as_deref()).await
        }
    }

    /// Attach a tag, validating the name first.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Tag` for blank names.
    /// Returns `CatalogError::Storage` if repository access fails.
    pub async fn add_tag(&self, id: ProblemId, name: &str) -> Result<TagName, CatalogError> {
        let tag = TagName::new(name)?;
        self.catalog.add_tag(id, &tag).await?;
        Ok(tag)
    }

    /// # Errors
    ///
    /// Returns `CatalogError::Tag` for blank names.
    /// Returns `CatalogError::Storage` if repository access fails.
    pub async fn remove_tag(&self, id: ProblemId, name: &str) -> Result<(), CatalogError> {
        let tag = TagName::new(name)?;
        self.catalog.remove_tag(id, &tag).await?;
        Ok(())
    }

    /// Generate a preview instance of a problem.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if repository access fails.
    pub async fn demo(&self, id: ProblemId) -> Result<Problem, CatalogError> {
        Ok(self.catalog.demo(id).await?)
    }
}
