//! Admission Guide Client Library
//!
//! Client-side behavior for the Admission Guide application:
//! - Typed HTTP client for the REST API
//! - Session store and protected-screen guard
//! - Identity provider seam with sign-in, registration and sign-out
//! - Screen controllers for universities and notes

pub mod api;
pub mod auth;
pub mod errors;
pub mod screens;
pub mod session;

// Re-export commonly used types
pub use api::{AdmissionApi, ApiClient};
pub use auth::{AuthService, IdentityProvider, RegistrationForm};
pub use errors::{ClientError, Result};
pub use session::{Access, Session, SessionStore};
