//! Notes screen: newest-first list, search and note upload

use super::{filter_by_term, signed_in};
use crate::api::AdmissionApi;
use crate::errors::{ClientError, Result};
use crate::session::{Access, SessionStore};
use admission_common::api::{CreateNoteRequest, CreateNoteResponse, NoteView};
use std::sync::Arc;

/// Uploader recorded when the session carries no email
pub const ANONYMOUS_UPLOADER: &str = "anonymous";

/// Unsaved note being composed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() || self.content.trim().is_empty() {
            return Err(ClientError::validation(
                "Both title and content are required",
            ));
        }
        Ok(())
    }
}

pub struct NotesScreen {
    api: Arc<dyn AdmissionApi>,
    session: SessionStore,
    notes: Vec<NoteView>,
    search_term: String,
    draft: NoteDraft,
    selected: Option<NoteView>,
}

impl NotesScreen {
    pub fn new(api: Arc<dyn AdmissionApi>, session: SessionStore) -> Self {
        Self {
            api,
            session,
            notes: Vec::new(),
            search_term: String::new(),
            draft: NoteDraft::default(),
            selected: None,
        }
    }

    /// Run the guard and, when signed in, load the notes
    pub async fn mount(&mut self) -> Result<Access> {
        let access = self.session.require_session();
        if matches!(access, Access::Granted(_)) {
            self.refresh().await?;
        }
        Ok(access)
    }

    /// Fetch every note, newest first
    pub async fn refresh(&mut self) -> Result<()> {
        signed_in(&self.session)?;

        let mut notes = self.api.list_notes().await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to load notes");
            e
        })?;
        notes.reverse();
        self.notes = notes;

        Ok(())
    }

    pub fn draft(&self) -> &NoteDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut NoteDraft {
        &mut self.draft
    }

    /// Upload the draft, then clear it and re-fetch.
    ///
    /// A blank title or content is rejected before any request is made.
    /// On failure the draft is kept so it can be retried.
    pub async fn submit(&mut self) -> Result<CreateNoteResponse> {
        self.draft.validate()?;
        let session = signed_in(&self.session)?;

        let uploader = if session.email.is_empty() {
            ANONYMOUS_UPLOADER.to_string()
        } else {
            session.email
        };

        let request = CreateNoteRequest::new(&self.draft.title, &self.draft.content, uploader);
        let response = self.api.create_note(&request).await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to save note");
            e
        })?;

        tracing::info!(note_id = %response.inserted_id, "Note saved");
        self.draft = NoteDraft::default();
        self.refresh().await?;

        Ok(response)
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Notes narrowed by the search term on title
    pub fn visible(&self) -> Vec<&NoteView> {
        filter_by_term(&self.notes, &self.search_term)
    }

    pub fn select(&mut self, id: &str) -> Option<&NoteView> {
        self.selected = self.notes.iter().find(|n| n.id == id).cloned();
        self.selected.as_ref()
    }

    pub fn selected(&self) -> Option<&NoteView> {
        self.selected.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::test_support::FakeApi;
    use crate::session::Session;

    fn screen_for(email: &str) -> (NotesScreen, Arc<FakeApi>) {
        let api = Arc::new(FakeApi::default());
        let store = SessionStore::new();
        store.set(Session::new(email));
        (NotesScreen::new(api.clone(), store), api)
    }

    #[tokio::test]
    async fn test_submit_refetches_and_shows_newest_first() {
        let (mut screen, api) = screen_for("a@b.com");
        screen.mount().await.unwrap();

        *screen.draft_mut() = NoteDraft::new("first", "one");
        screen.submit().await.unwrap();
        *screen.draft_mut() = NoteDraft::new("second", "two");
        screen.submit().await.unwrap();

        // One fetch on mount, one after each upload
        assert_eq!(api.note_fetches(), 3);
        let titles: Vec<_> = screen.visible().iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["second", "first"]);
        assert_eq!(screen.draft(), &NoteDraft::default());

        let stamps: Vec<_> = screen.visible().iter().map(|n| n.uploaded_at).collect();
        assert!(stamps[0] > stamps[1]);
    }

    #[tokio::test]
    async fn test_blank_draft_never_reaches_server() {
        let (mut screen, api) = screen_for("a@b.com");
        screen.mount().await.unwrap();

        *screen.draft_mut() = NoteDraft::new("   ", "content");
        let err = screen.submit().await.unwrap_err();

        assert_eq!(err.to_string(), "Both title and content are required");
        assert!(api.created_notes().is_empty());
        assert_eq!(api.note_fetches(), 1);
        assert_eq!(screen.draft().content, "content");
    }

    #[tokio::test]
    async fn test_uploader_is_session_email() {
        let (mut screen, api) = screen_for("a@b.com");
        screen.mount().await.unwrap();

        *screen.draft_mut() = NoteDraft::new("T", "C");
        screen.submit().await.unwrap();

        let sent = api.created_notes();
        assert_eq!(sent[0].uploader_email.as_deref(), Some("a@b.com"));
    }

    #[tokio::test]
    async fn test_uploader_falls_back_to_anonymous() {
        let (mut screen, api) = screen_for("");
        screen.mount().await.unwrap();

        *screen.draft_mut() = NoteDraft::new("T", "C");
        screen.submit().await.unwrap();

        assert_eq!(
            api.created_notes()[0].uploader_email.as_deref(),
            Some(ANONYMOUS_UPLOADER)
        );
    }

    #[tokio::test]
    async fn test_search_and_select() {
        let (mut screen, _) = screen_for("a@b.com");
        screen.mount().await.unwrap();
        for (title, content) in [("Physics formulas", "F = ma"), ("Admission tips", "Start early")] {
            *screen.draft_mut() = NoteDraft::new(title, content);
            screen.submit().await.unwrap();
        }

        screen.set_search_term("PHYSICS");
        let hits = screen.visible();
        assert_eq!(hits.len(), 1);
        let id = hits[0].id.clone();

        let note = screen.select(&id).unwrap();
        assert_eq!(note.content, "F = ma");
        assert_eq!(note.uploader_email, "a@b.com");
    }

    #[tokio::test]
    async fn test_mount_without_session_redirects() {
        let api = Arc::new(FakeApi::default());
        let store = SessionStore::new();
        store.clear();
        let mut screen = NotesScreen::new(api.clone(), store);

        assert_eq!(screen.mount().await.unwrap(), Access::RedirectToLogin);
        assert_eq!(api.note_fetches(), 0);
    }

    #[tokio::test]
    async fn test_mount_while_checking_waits() {
        let api = Arc::new(FakeApi::default());
        let mut screen = NotesScreen::new(api.clone(), SessionStore::new());

        assert_eq!(screen.mount().await.unwrap(), Access::Pending);
        assert_eq!(api.note_fetches(), 0);
    }
}
