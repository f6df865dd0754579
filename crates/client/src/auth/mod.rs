//! Identity provider seam and account flows
//!
//! Authentication is delegated to an external provider behind the
//! `IdentityProvider` trait. `AuthService` validates form input, calls the
//! provider and keeps the `SessionStore` in step with the result.

use crate::errors::{ClientError, Result};
use crate::session::{Session, SessionStore};
use async_trait::async_trait;
use std::sync::Arc;

/// Profile attached to a new account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUp {
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub photo_url: String,
}

/// Trait for external identity providers
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Session persisted by the provider, if any
    async fn restore(&self) -> Result<Option<Session>>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session>;

    async fn sign_up(&self, request: &SignUp) -> Result<Session>;

    async fn sign_out(&self) -> Result<()>;
}

/// Registration form as entered
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub full_name: String,
    pub photo_url: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    /// Every field filled and both passwords equal
    pub fn validate(&self) -> Result<()> {
        let fields = [
            &self.full_name,
            &self.photo_url,
            &self.email,
            &self.password,
            &self.confirm_password,
        ];
        if fields.iter().any(|field| field.is_empty()) {
            return Err(ClientError::validation("Please fill in all fields."));
        }

        if self.password != self.confirm_password {
            return Err(ClientError::validation("Passwords do not match."));
        }

        Ok(())
    }

    fn to_sign_up(&self) -> SignUp {
        SignUp {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            display_name: self.full_name.clone(),
            photo_url: self.photo_url.clone(),
        }
    }
}

/// Account flows over a provider and a session store
#[derive(Clone)]
pub struct AuthService {
    provider: Arc<dyn IdentityProvider>,
    store: SessionStore,
}

impl AuthService {
    pub fn new(provider: Arc<dyn IdentityProvider>, store: SessionStore) -> Self {
        Self { provider, store }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Resolve the initial `Checking` state from the provider
    pub async fn restore(&self) -> Result<()> {
        match self.provider.restore().await {
            Ok(Some(session)) => self.store.set(session),
            Ok(None) => self.store.clear(),
            Err(e) => {
                self.store.clear();
                return Err(e);
            }
        }
        Ok(())
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(ClientError::validation("Email and password are required."));
        }

        let session = self.provider.sign_in(email.trim(), password).await?;
        self.store.set(session.clone());
        tracing::info!(email = %session.email, "Signed in");

        Ok(session)
    }

    /// Validate the form, then create the account with the provider
    pub async fn register(&self, form: &RegistrationForm) -> Result<Session> {
        form.validate()?;

        let session = self.provider.sign_up(&form.to_sign_up()).await?;
        self.store.set(session.clone());
        tracing::info!(email = %session.email, "Account registered");

        Ok(session)
    }

    /// The store is cleared even if the provider call fails
    pub async fn sign_out(&self) -> Result<()> {
        let result = self.provider.sign_out().await;
        self.store.clear();
        tracing::info!("Signed out");
        result
    }
}

/// In-memory provider for tests
#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockProvider {
        accounts: Mutex<HashMap<String, (String, Session)>>,
        pub persisted: Mutex<Option<Session>>,
        pub sign_up_calls: AtomicUsize,
        pub fail_sign_out: bool,
    }

    impl MockProvider {
        pub fn with_account(email: &str, password: &str) -> Self {
            let provider = Self::default();
            provider.accounts.lock().unwrap().insert(
                email.to_string(),
                (password.to_string(), Session::new(email)),
            );
            provider
        }

        pub fn failing_sign_out() -> Self {
            Self {
                fail_sign_out: true,
                ..Self::default()
            }
        }

        pub fn sign_ups(&self) -> usize {
            self.sign_up_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl IdentityProvider for MockProvider {
        async fn restore(&self) -> Result<Option<Session>> {
            Ok(self.persisted.lock().unwrap().clone())
        }

        async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
            match self.accounts.lock().unwrap().get(email) {
                Some((stored, session)) if stored == password => Ok(session.clone()),
                _ => Err(ClientError::Identity {
                    message: "invalid credentials".to_string(),
                }),
            }
        }

        async fn sign_up(&self, request: &SignUp) -> Result<Session> {
            self.sign_up_calls.fetch_add(1, Ordering::SeqCst);
            let session = Session::new(&request.email)
                .with_display_name(&request.display_name)
                .with_photo_url(&request.photo_url);
            self.accounts.lock().unwrap().insert(
                request.email.clone(),
                (request.password.clone(), session.clone()),
            );
            Ok(session)
        }

        async fn sign_out(&self) -> Result<()> {
            if self.fail_sign_out {
                return Err(ClientError::Identity {
                    message: "network unreachable".to_string(),
                });
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockProvider;
    use super::*;
    use crate::session::{Access, AuthState};

    fn form() -> RegistrationForm {
        RegistrationForm {
            full_name: "Rahim Uddin".to_string(),
            photo_url: "https://example.com/rahim.png".to_string(),
            email: " rahim@example.com ".to_string(),
            password: "s3cret".to_string(),
            confirm_password: "s3cret".to_string(),
        }
    }

    #[test]
    fn test_form_requires_every_field() {
        tokio_test::assert_ok!(form().validate());

        let mut missing = form();
        missing.photo_url.clear();
        let err = tokio_test::assert_err!(missing.validate());
        assert_eq!(err.to_string(), "Please fill in all fields.");
    }

    #[test]
    fn test_form_requires_matching_passwords() {
        let mut mismatched = form();
        mismatched.confirm_password = "other".to_string();

        let err = mismatched.validate().unwrap_err();
        assert_eq!(err.to_string(), "Passwords do not match.");
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_provider() {
        let provider = Arc::new(MockProvider::default());
        let auth = AuthService::new(provider.clone(), SessionStore::new());

        let mut mismatched = form();
        mismatched.confirm_password = "other".to_string();

        assert!(matches!(
            auth.register(&mismatched).await,
            Err(ClientError::Validation { .. })
        ));
        assert_eq!(provider.sign_ups(), 0);
        assert!(auth.store().current().is_none());
    }

    #[tokio::test]
    async fn test_register_signs_in_with_trimmed_email() {
        let provider = Arc::new(MockProvider::default());
        let auth = AuthService::new(provider.clone(), SessionStore::new());

        let session = auth.register(&form()).await.unwrap();

        assert_eq!(session.email, "rahim@example.com");
        assert_eq!(session.display_name.as_deref(), Some("Rahim Uddin"));
        assert_eq!(auth.store().current(), Some(session));
        assert_eq!(provider.sign_ups(), 1);
    }

    #[tokio::test]
    async fn test_sign_in_and_out() {
        let provider = Arc::new(MockProvider::with_account("a@b.com", "pw"));
        let store = SessionStore::new();
        let auth = AuthService::new(provider, store.clone());

        assert!(auth.sign_in("a@b.com", "wrong").await.is_err());
        assert!(store.current().is_none());

        auth.sign_in("a@b.com", "pw").await.unwrap();
        assert!(matches!(store.require_session(), Access::Granted(_)));

        auth.sign_out().await.unwrap();
        assert_eq!(store.require_session(), Access::RedirectToLogin);
    }

    #[tokio::test]
    async fn test_sign_out_clears_store_on_provider_failure() {
        let provider = Arc::new(MockProvider::failing_sign_out());
        let store = SessionStore::new();
        store.set(Session::new("a@b.com"));
        let auth = AuthService::new(provider, store.clone());

        assert!(auth.sign_out().await.is_err());
        assert_eq!(store.state(), AuthState::SignedOut);
    }

    #[tokio::test]
    async fn test_restore_resolves_checking() {
        let provider = Arc::new(MockProvider::default());
        *provider.persisted.lock().unwrap() = Some(Session::new("a@b.com"));
        let store = SessionStore::new();
        let auth = AuthService::new(provider.clone(), store.clone());

        assert_eq!(store.require_session(), Access::Pending);
        auth.restore().await.unwrap();
        assert_eq!(store.current().unwrap().email, "a@b.com");

        *provider.persisted.lock().unwrap() = None;
        auth.restore().await.unwrap();
        assert_eq!(store.require_session(), Access::RedirectToLogin);
    }
}
