//! University document and partitions

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A university record, stored in either the public or the private collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct University {
    /// MongoDB document ID
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Free-form institution type as stored by the data owners
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl University {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            location: None,
            kind: kind.into(),
            website: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }
}

/// The collection a university lives in. Fixed for the record's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Partition {
    Public,
    Private,
}

impl Partition {
    /// Lookup order used when an id may live in either collection
    pub const ALL: [Partition; 2] = [Partition::Public, Partition::Private];

    pub fn as_str(&self) -> &'static str {
        match self {
            Partition::Public => "public",
            Partition::Private => "private",
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
