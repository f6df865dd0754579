//! HTTP client for the Admission Guide REST API
//!
//! `AdmissionApi` is the seam the screens talk to; `ApiClient` is the
//! reqwest-backed implementation.

use crate::errors::{ClientError, Result};
use admission_common::api::{
    CreateNoteRequest, CreateNoteResponse, CreateUserRequest, CreateUserResponse,
    UniversitiesResponse, UniversityView, UpdateUserRequest, UserView, NoteView,
};
use async_trait::async_trait;
use reqwest::{Method, Url};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

/// Per-request timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One method per REST endpoint
#[async_trait]
pub trait AdmissionApi: Send + Sync {
    async fn list_universities(&self) -> Result<UniversitiesResponse>;

    async fn get_university(&self, id: &str) -> Result<UniversityView>;

    async fn list_users(&self) -> Result<Vec<UserView>>;

    async fn create_user(&self, request: &CreateUserRequest) -> Result<CreateUserResponse>;

    async fn get_user(&self, email: &str) -> Result<UserView>;

    async fn update_user(&self, email: &str, update: &UpdateUserRequest) -> Result<UserView>;

    async fn delete_user(&self, email: &str) -> Result<UserView>;

    async fn list_notes(&self) -> Result<Vec<NoteView>>;

    async fn create_note(&self, request: &CreateNoteRequest) -> Result<CreateNoteResponse>;

    async fn list_notes_by_uploader(&self, email: &str) -> Result<Vec<NoteView>>;
}

/// reqwest-backed API client
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for the server at `base_url` (e.g. `http://localhost:5000`)
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| ClientError::InvalidUrl {
            message: format!("{}: {}", base_url, e),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl {
                message: base_url.to_string(),
            });
        }

        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/api/{segments...}` with each segment percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl {
                message: self.base_url.to_string(),
            })?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    async fn request<B, T>(&self, method: Method, segments: &[&str], body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        tracing::debug!(%method, %url, "API request");

        let mut builder = self.client.request(method, url);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = ClientError::from_response(status.as_u16(), &body);
            tracing::warn!(status = status.as_u16(), error = %error, "API request failed");
            return Err(error);
        }

        Ok(response.json().await?)
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        self.request::<(), T>(Method::GET, segments, None).await
    }
}

#[async_trait]
impl AdmissionApi for ApiClient {
    async fn list_universities(&self) -> Result<UniversitiesResponse> {
        self.get(&["universities"]).await
    }

    async fn get_university(&self, id: &str) -> Result<UniversityView> {
        self.get(&["universities", id]).await
    }

    async fn list_users(&self) -> Result<Vec<UserView>> {
        self.get(&["users"]).await
    }

    async fn create_user(&self, request: &CreateUserRequest) -> Result<CreateUserResponse> {
        self.request(Method::POST, &["users"], Some(request)).await
    }

    async fn get_user(&self, email: &str) -> Result<UserView> {
        self.get(&["users", email]).await
    }

    async fn update_user(&self, email: &str, update: &UpdateUserRequest) -> Result<UserView> {
        self.request(Method::PUT, &["users", email], Some(update)).await
    }

    async fn delete_user(&self, email: &str) -> Result<UserView> {
        self.request::<(), _>(Method::DELETE, &["users", email], None).await
    }

    async fn list_notes(&self) -> Result<Vec<NoteView>> {
        self.get(&["notes"]).await
    }

    async fn create_note(&self, request: &CreateNoteRequest) -> Result<CreateNoteResponse> {
        self.request(Method::POST, &["notes"], Some(request)).await
    }

    async fn list_notes_by_uploader(&self, email: &str) -> Result<Vec<NoteView>> {
        self.get(&["notes", "user", email]).await
    }
}
