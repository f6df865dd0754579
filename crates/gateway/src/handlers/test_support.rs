//! Router fixtures for handler tests

use crate::{create_router, AppState};
use admission_common::{
    config::AppConfig,
    db::models::{Note, Partition, University, User, UserUpdate},
    errors::{AppError, Result},
    MemoryRepository, Repository,
};
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use mongodb::bson::oid::ObjectId;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Detail that must never reach a response body
pub const LEAKY_DETAIL: &str = "connection refused: mongo-primary-01:27017";

/// Router over a fresh in-memory repository
pub fn app() -> (Router, Arc<MemoryRepository>) {
    let repo = Arc::new(MemoryRepository::new());
    let state = AppState {
        config: Arc::new(AppConfig::default()),
        repo: repo.clone(),
    };
    (create_router(state), repo)
}

/// Router whose every database call fails
pub fn failing_app() -> Router {
    create_router(AppState {
        config: Arc::new(AppConfig::default()),
        repo: Arc::new(FailingRepository),
    })
}

/// Send a request and decode the JSON response (Null for an empty body)
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    send_request(app, request).await
}

pub async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

struct FailingRepository;

fn outage<T>() -> Result<T> {
    Err(AppError::DatabaseConnection {
        message: LEAKY_DETAIL.to_string(),
    })
}

#[async_trait]
impl Repository for FailingRepository {
    async fn ping(&self) -> Result<()> {
        outage()
    }

    async fn list_universities(&self, _partition: Partition) -> Result<Vec<University>> {
        outage()
    }

    async fn find_university(&self, _id: ObjectId) -> Result<Option<(Partition, University)>> {
        outage()
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        outage()
    }

    async fn insert_user(&self, _user: User) -> Result<ObjectId> {
        outage()
    }

    async fn find_user_by_email(&self, _email: &str) -> Result<Option<User>> {
        outage()
    }

    async fn update_user_by_email(&self, _email: &str, _update: &UserUpdate) -> Result<Option<User>> {
        outage()
    }

    async fn delete_user_by_email(&self, _email: &str) -> Result<Option<User>> {
        outage()
    }

    async fn list_notes(&self) -> Result<Vec<Note>> {
        outage()
    }

    async fn insert_note(&self, _note: Note) -> Result<ObjectId> {
        outage()
    }

    async fn list_notes_by_uploader(&self, _email: &str) -> Result<Vec<Note>> {
        outage()
    }
}
