//! Repository pattern for database operations
//!
//! Every operation maps to a single database call; there are no
//! transactions and no cross-record consistency checks.

use crate::db::models::{Note, Partition, University, User, UserUpdate};
use crate::errors::Result;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

/// Data access for universities, users and notes
#[async_trait]
pub trait Repository: Send + Sync {
    /// Check the backing store is reachable
    async fn ping(&self) -> Result<()>;

    // ========================================================================
    // University Operations
    // ========================================================================

    /// All universities in one partition
    async fn list_universities(&self, partition: Partition) -> Result<Vec<University>>;

    /// Find a university by id, looking in the public partition first
    async fn find_university(&self, id: ObjectId) -> Result<Option<(Partition, University)>>;

    // ========================================================================
    // User Operations
    // ========================================================================

    async fn list_users(&self) -> Result<Vec<User>>;

    /// Insert a user and return the assigned document id
    async fn insert_user(&self, user: User) -> Result<ObjectId>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Merge `update` into the first user with `email`, returning the record
    /// after the update, or `None` when nothing matched
    async fn update_user_by_email(&self, email: &str, update: &UserUpdate) -> Result<Option<User>>;

    /// Delete the first user with `email`, returning the removed record
    async fn delete_user_by_email(&self, email: &str) -> Result<Option<User>>;

    // ========================================================================
    // Note Operations
    // ========================================================================

    /// All notes in insertion order
    async fn list_notes(&self) -> Result<Vec<Note>>;

    /// Insert a note and return the assigned document id
    async fn insert_note(&self, note: Note) -> Result<ObjectId>;

    /// Notes uploaded by `email`, in insertion order
    async fn list_notes_by_uploader(&self, email: &str) -> Result<Vec<Note>>;
}
