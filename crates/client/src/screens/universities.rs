//! Universities screen: partition toggle, search and details

use super::{filter_by_term, signed_in};
use crate::api::AdmissionApi;
use crate::errors::Result;
use crate::session::{Access, SessionStore};
use admission_common::{api::UniversityView, db::models::Partition};
use std::sync::Arc;

/// Shown for any detail the record lacks
pub const NOT_AVAILABLE: &str = "N/A";

/// Detail panel for a selected university
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniversityDetails {
    pub name: String,
    pub location: String,
    pub kind: String,
    pub website: String,
}

impl From<&UniversityView> for UniversityDetails {
    fn from(view: &UniversityView) -> Self {
        fn or_na(value: Option<&str>) -> String {
            match value {
                Some(v) if !v.is_empty() => v.to_string(),
                _ => NOT_AVAILABLE.to_string(),
            }
        }

        Self {
            name: or_na(Some(&view.name)),
            location: or_na(view.location.as_deref()),
            kind: or_na(Some(&view.kind)),
            website: or_na(view.website.as_deref()),
        }
    }
}

pub struct UniversitiesScreen {
    api: Arc<dyn AdmissionApi>,
    session: SessionStore,
    partition: Partition,
    universities: Vec<UniversityView>,
    search_term: String,
    selected: Option<UniversityDetails>,
}

impl UniversitiesScreen {
    pub fn new(api: Arc<dyn AdmissionApi>, session: SessionStore) -> Self {
        Self {
            api,
            session,
            partition: Partition::Public,
            universities: Vec::new(),
            search_term: String::new(),
            selected: None,
        }
    }

    /// Run the guard and, when signed in, load the public partition
    pub async fn mount(&mut self) -> Result<Access> {
        let access = self.session.require_session();
        if matches!(access, Access::Granted(_)) {
            self.show(Partition::Public).await?;
        }
        Ok(access)
    }

    /// Re-fetch and switch to `partition`; the search term is reset.
    /// On failure the previous list stays on screen.
    pub async fn show(&mut self, partition: Partition) -> Result<()> {
        signed_in(&self.session)?;

        let response = self.api.list_universities().await.map_err(|e| {
            tracing::warn!(%partition, error = %e, "Failed to load universities");
            e
        })?;

        self.universities = response.universities.get(partition).to_vec();
        self.partition = partition;
        self.search_term.clear();
        self.selected = None;

        Ok(())
    }

    pub fn partition(&self) -> Partition {
        self.partition
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// The fetched list narrowed by the search term
    pub fn visible(&self) -> Vec<&UniversityView> {
        filter_by_term(&self.universities, &self.search_term)
    }

    /// Select a university by record id and return its details
    pub fn select(&mut self, id: &str) -> Option<&UniversityDetails> {
        self.selected = self
            .universities
            .iter()
            .find(|u| u.id == id)
            .map(UniversityDetails::from);
        self.selected.as_ref()
    }

    pub fn selected(&self) -> Option<&UniversityDetails> {
        self.selected.as_ref()
    }

    pub fn close_details(&mut self) {
        self.selected = None;
    }
}
