//! MongoDB-backed repository

use crate::config::CollectionNames;
use crate::db::models::{Note, Partition, University, User, UserUpdate};
use crate::db::{DbPool, Repository};
use crate::errors::{AppError, Result};
use crate::metrics;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Bson},
    options::ReturnDocument,
    Collection,
};

/// Repository over the four configured collections
#[derive(Clone)]
pub struct MongoRepository {
    pool: DbPool,
    public_universities: Collection<University>,
    private_universities: Collection<University>,
    users: Collection<User>,
    notes: Collection<Note>,
}

impl MongoRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: DbPool, names: &CollectionNames) -> Self {
        let db = pool.database();

        Self {
            public_universities: db.collection(&names.public_universities),
            private_universities: db.collection(&names.private_universities),
            users: db.collection(&names.users),
            notes: db.collection(&names.notes),
            pool,
        }
    }

    fn universities(&self, partition: Partition) -> &Collection<University> {
        match partition {
            Partition::Public => &self.public_universities,
            Partition::Private => &self.private_universities,
        }
    }
}

/// Count the failure against `operation` and wrap it
fn db_error(operation: &'static str) -> impl FnOnce(mongodb::error::Error) -> AppError {
    move |err| {
        metrics::record_db_error(operation);
        AppError::Database(err)
    }
}

fn inserted_object_id(id: Bson) -> Result<ObjectId> {
    id.as_object_id().ok_or_else(|| AppError::Internal {
        message: format!("Insert returned a non-ObjectId key: {}", id),
    })
}

#[async_trait]
impl Repository for MongoRepository {
    async fn ping(&self) -> Result<()> {
        self.pool.ping().await
    }

    async fn list_universities(&self, partition: Partition) -> Result<Vec<University>> {
        self.universities(partition)
            .find(doc! {})
            .await
            .map_err(db_error("list_universities"))?
            .try_collect()
            .await
            .map_err(db_error("list_universities"))
    }

    async fn find_university(&self, id: ObjectId) -> Result<Option<(Partition, University)>> {
        for partition in Partition::ALL {
            let found = self
                .universities(partition)
                .find_one(doc! { "_id": id })
                .await
                .map_err(db_error("find_university"))?;

            if let Some(university) = found {
                return Ok(Some((partition, university)));
            }
        }

        Ok(None)
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.users
            .find(doc! {})
            .await
            .map_err(db_error("list_users"))?
            .try_collect()
            .await
            .map_err(db_error("list_users"))
    }

    async fn insert_user(&self, user: User) -> Result<ObjectId> {
        let result = self
            .users
            .insert_one(&user)
            .await
            .map_err(db_error("insert_user"))?;

        inserted_object_id(result.inserted_id)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.users
            .find_one(doc! { "email": email })
            .await
            .map_err(db_error("find_user"))
    }

    async fn update_user_by_email(&self, email: &str, update: &UserUpdate) -> Result<Option<User>> {
        // `$set` rejects an empty document
        if update.is_empty() {
            return self.find_user_by_email(email).await;
        }

        self.users
            .find_one_and_update(doc! { "email": email }, update.to_update_document())
            .return_document(ReturnDocument::After)
            .await
            .map_err(db_error("update_user"))
    }

    async fn delete_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.users
            .find_one_and_delete(doc! { "email": email })
            .await
            .map_err(db_error("delete_user"))
    }

    async fn list_notes(&self) -> Result<Vec<Note>> {
        self.notes
            .find(doc! {})
            .sort(doc! { "_id": 1 })
            .await
            .map_err(db_error("list_notes"))?
            .try_collect()
            .await
            .map_err(db_error("list_notes"))
    }

    async fn insert_note(&self, note: Note) -> Result<ObjectId> {
        let result = self
            .notes
            .insert_one(&note)
            .await
            .map_err(db_error("insert_note"))?;

        inserted_object_id(result.inserted_id)
    }

    async fn list_notes_by_uploader(&self, email: &str) -> Result<Vec<Note>> {
        self.notes
            .find(doc! { "uploaderEmail": email })
            .sort(doc! { "_id": 1 })
            .await
            .map_err(db_error("list_notes_by_uploader"))?
            .try_collect()
            .await
            .map_err(db_error("list_notes_by_uploader"))
    }
}
