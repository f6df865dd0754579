//! Session state and route gating
//!
//! A `SessionStore` is created once and handed to every protected screen.
//! Observers subscribe through a `watch` channel; dropping the
//! `SessionSubscription` is the unsubscribe.

use std::sync::Arc;
use tokio::sync::watch;

/// Route protected screens redirect to
pub const LOGIN_ROUTE: &str = "/profile/login";

/// The signed-in identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub email: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

impl Session {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            display_name: None,
            photo_url: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_photo_url(mut self, url: impl Into<String>) -> Self {
        self.photo_url = Some(url.into());
        self
    }
}

/// What the store currently knows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// The identity provider has not answered yet
    Checking,
    SignedOut,
    SignedIn(Session),
}

impl AuthState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::SignedIn(session) => Some(session),
            _ => None,
        }
    }
}

/// Outcome of the guard on a protected screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Granted(Session),
    /// Show a loader; the auth check is still running
    Pending,
    RedirectToLogin,
}

impl Access {
    pub fn redirect_target(&self) -> Option<&'static str> {
        match self {
            Self::RedirectToLogin => Some(LOGIN_ROUTE),
            _ => None,
        }
    }
}

/// Observable session holder. Clones share the same state.
#[derive(Clone)]
pub struct SessionStore {
    tx: Arc<watch::Sender<AuthState>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// A store that is still waiting for the identity provider
    pub fn new() -> Self {
        let (tx, _) = watch::channel(AuthState::Checking);
        Self { tx: Arc::new(tx) }
    }

    pub fn state(&self) -> AuthState {
        self.tx.borrow().clone()
    }

    pub fn current(&self) -> Option<Session> {
        self.tx.borrow().session().cloned()
    }

    pub fn set(&self, session: Session) {
        tracing::debug!(email = %session.email, "Session established");
        self.tx.send_replace(AuthState::SignedIn(session));
    }

    pub fn clear(&self) {
        tracing::debug!("Session cleared");
        self.tx.send_replace(AuthState::SignedOut);
    }

    pub fn subscribe(&self) -> SessionSubscription {
        SessionSubscription {
            rx: self.tx.subscribe(),
        }
    }

    /// Live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Guard for protected screens
    pub fn require_session(&self) -> Access {
        match self.state() {
            AuthState::SignedIn(session) => Access::Granted(session),
            AuthState::Checking => Access::Pending,
            AuthState::SignedOut => {
                tracing::debug!(target_route = LOGIN_ROUTE, "No session, redirecting");
                Access::RedirectToLogin
            }
        }
    }
}

/// Handle on session changes; drop it to unsubscribe
pub struct SessionSubscription {
    rx: watch::Receiver<AuthState>,
}

impl SessionSubscription {
    pub fn current(&self) -> AuthState {
        self.rx.borrow().clone()
    }

    /// Wait for the next change. `None` once the store is gone.
    pub async fn changed(&mut self) -> Option<AuthState> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}
