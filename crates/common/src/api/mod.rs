//! Wire types for the REST API
//!
//! Request and response bodies shared by the gateway and the client.
//! Document ids travel as 24-character hex strings.

use crate::db::models::{Note, Partition, University, User};
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::Validate;

pub use crate::db::models::UserUpdate as UpdateUserRequest;

fn hex_id(id: Option<ObjectId>) -> String {
    id.map(|oid| oid.to_hex()).unwrap_or_default()
}

// ============================================================================
// Universities
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniversityView {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl From<University> for UniversityView {
    fn from(university: University) -> Self {
        Self {
            id: hex_id(university.id),
            name: university.name,
            location: university.location,
            kind: university.kind,
            website: university.website,
        }
    }
}

/// Both partitions; each key is always present, possibly empty
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UniversityPartitions {
    #[serde(default)]
    pub public: Vec<UniversityView>,
    #[serde(default)]
    pub private: Vec<UniversityView>,
}

impl UniversityPartitions {
    pub fn get(&self, partition: Partition) -> &[UniversityView] {
        match partition {
            Partition::Public => &self.public,
            Partition::Private => &self.private,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UniversitiesResponse {
    pub universities: UniversityPartitions,
}

// ============================================================================
// Users
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub full_name: String,
    pub college_name: String,
    pub email: String,
    /// Stored Argon2 hash
    pub password: String,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: hex_id(user.id),
            user_id: user.user_id,
            full_name: user.full_name,
            college_name: user.college_name,
            email: user.email,
            password: user.password,
        }
    }
}

/// Body of `POST /api/users`. Every field is required and non-empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(required, length(min = 1))]
    pub full_name: Option<String>,

    #[validate(required, length(min = 1))]
    pub college_name: Option<String>,

    #[validate(required, length(min = 1))]
    pub email: Option<String>,

    #[validate(required, length(min = 1))]
    pub password: Option<String>,
}

impl CreateUserRequest {
    pub fn new(
        full_name: impl Into<String>,
        college_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            full_name: Some(full_name.into()),
            college_name: Some(college_name.into()),
            email: Some(email.into()),
            password: Some(password.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserResponse {
    pub message: String,
    pub user_id: String,
}

// ============================================================================
// Notes
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteView {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub content: String,
    pub uploader_email: String,
    pub uploaded_at: DateTime<Utc>,
}

impl From<Note> for NoteView {
    fn from(note: Note) -> Self {
        Self {
            id: hex_id(note.id),
            title: note.title,
            content: note.content,
            uploader_email: note.uploader_email,
            uploaded_at: note.uploaded_at,
        }
    }
}

/// Body of `POST /api/notes`. Every field is required and non-empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteRequest {
    #[validate(required, length(min = 1))]
    pub title: Option<String>,

    #[validate(required, length(min = 1))]
    pub content: Option<String>,

    #[validate(required, length(min = 1))]
    pub uploader_email: Option<String>,
}

impl CreateNoteRequest {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        uploader_email: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            content: Some(content.into()),
            uploader_email: Some(uploader_email.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteResponse {
    pub message: String,
    pub inserted_id: String,
}
