use chrono::{DateTime, Utc};

use crate::model::ids::ProblemId;
use crate::model::tag::TagName;

/// Administrative view of a problem, as listed by browse and suspended views.
///
/// Unlike `Problem`, an entry carries no generated question; `name` identifies
/// the problem generator on the remote side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemEntry {
    pub id: ProblemId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub suspended: bool,
    pub suspend_reason: Option<String>,
    pub tags: Vec<TagName>,
}

impl ProblemEntry {
    #[must_use]
    pub fn new(id: ProblemId, name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.into(),
            created_at,
            suspended: false,
            suspend_reason: None,
            tags: Vec::new(),
        }
    }

    /// Mark the entry suspended. Blank reasons are stored as `None`.
    pub fn suspend(&mut self, reason: Option<&str>) {
        self.suspended = true;
        self.suspend_reason = reason
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(ToOwned::to_owned);
    }

    pub fn unsuspend(&mut self) {
        self.suspended = false;
        self.suspend_reason = None;
    }

    #[must_use]
    pub fn has_tag(&self, tag: &TagName) -> bool {
        self.tags.iter().any(|existing| existing == tag)
    }

    /// Add a tag; returns `false` if it was already present.
    pub fn add_tag(&mut self, tag: TagName) -> bool {
        if self.has_tag(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// Remove a tag; returns `false` if it was not present.
    pub fn remove_tag(&mut self, tag: &TagName) -> bool {
        let before = self.tags.len();
        self.tags.retain(|existing| existing != tag);
        before != self.tags.len()
    }
}
