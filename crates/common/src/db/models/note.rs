//! Study note document

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A note uploaded by a user. Notes are append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// MongoDB document ID
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub title: String,

    pub content: String,

    /// Email of the uploading user; not checked against the users collection
    pub uploader_email: String,

    /// Set once by the server at insertion; stored as a BSON Date
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub uploaded_at: DateTime<Utc>,
}

impl Note {
    /// Create a note stamped with the current time
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        uploader_email: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            content: content.into(),
            uploader_email: uploader_email.into(),
            uploaded_at: Utc::now(),
        }
    }
}
