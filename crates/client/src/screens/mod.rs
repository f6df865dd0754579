//! Screen controllers
//!
//! Each controller owns the state one screen renders: the fetched list,
//! the search term and any selection. Filtering is local; the server is
//! only asked for whole collections.

pub mod notes;
pub mod universities;

#[cfg(test)]
pub(crate) mod test_support;

pub use notes::{NoteDraft, NotesScreen, ANONYMOUS_UPLOADER};
pub use universities::{UniversitiesScreen, UniversityDetails, NOT_AVAILABLE};

use crate::errors::{ClientError, Result};
use crate::session::{Access, Session, SessionStore};
use admission_common::api::{NoteView, UniversityView};

/// Records a list screen can search
pub trait Searchable {
    /// Text matched against the search term
    fn search_key(&self) -> &str;
}

impl Searchable for UniversityView {
    fn search_key(&self) -> &str {
        &self.name
    }
}

impl Searchable for NoteView {
    fn search_key(&self) -> &str {
        &self.title
    }
}

/// Case-insensitive substring filter. A blank term keeps everything.
pub fn filter_by_term<'a, T: Searchable>(items: &'a [T], term: &str) -> Vec<&'a T> {
    if term.trim().is_empty() {
        return items.iter().collect();
    }

    let needle = term.to_lowercase();
    items
        .iter()
        .filter(|item| item.search_key().to_lowercase().contains(&needle))
        .collect()
}

/// Session for an action that needs one
fn signed_in(store: &SessionStore) -> Result<Session> {
    match store.require_session() {
        Access::Granted(session) => Ok(session),
        _ => Err(ClientError::Unauthenticated),
    }
}
