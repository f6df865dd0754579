//! In-memory repository for tests and local development

use crate::db::models::{Note, Partition, University, User, UserUpdate};
use crate::db::Repository;
use crate::errors::Result;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

#[derive(Default)]
struct Collections {
    public_universities: Vec<University>,
    private_universities: Vec<University>,
    users: Vec<User>,
    notes: Vec<Note>,
}

impl Collections {
    fn universities(&self, partition: Partition) -> &Vec<University> {
        match partition {
            Partition::Public => &self.public_universities,
            Partition::Private => &self.private_universities,
        }
    }

    fn universities_mut(&mut self, partition: Partition) -> &mut Vec<University> {
        match partition {
            Partition::Public => &mut self.public_universities,
            Partition::Private => &mut self.private_universities,
        }
    }
}

/// Repository holding every collection in process memory
#[derive(Default)]
pub struct MemoryRepository {
    inner: RwLock<Collections>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a university to a partition. Universities have no write endpoint,
    /// so this is the only way to populate them.
    pub async fn seed_university(&self, partition: Partition, mut university: University) -> ObjectId {
        let id = *university.id.get_or_insert_with(ObjectId::new);
        self.inner
            .write()
            .await
            .universities_mut(partition)
            .push(university);
        id
    }

    /// Number of stored users
    pub async fn user_count(&self) -> usize {
        self.inner.read().await.users.len()
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn list_universities(&self, partition: Partition) -> Result<Vec<University>> {
        Ok(self.inner.read().await.universities(partition).clone())
    }

    async fn find_university(&self, id: ObjectId) -> Result<Option<(Partition, University)>> {
        let collections = self.inner.read().await;

        Ok(Partition::ALL.into_iter().find_map(|partition| {
            collections
                .universities(partition)
                .iter()
                .find(|u| u.id == Some(id))
                .map(|u| (partition, u.clone()))
        }))
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.inner.read().await.users.clone())
    }

    async fn insert_user(&self, mut user: User) -> Result<ObjectId> {
        let id = ObjectId::new();
        user.id = Some(id);
        self.inner.write().await.users.push(user);
        Ok(id)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .inner
            .read()
            .await
            .users
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn update_user_by_email(&self, email: &str, update: &UserUpdate) -> Result<Option<User>> {
        let mut collections = self.inner.write().await;

        Ok(collections
            .users
            .iter_mut()
            .find(|u| u.email == email)
            .map(|user| {
                update.apply(user);
                user.clone()
            }))
    }

    async fn delete_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let mut collections = self.inner.write().await;

        let position = collections.users.iter().position(|u| u.email == email);
        Ok(position.map(|index| collections.users.remove(index)))
    }

    async fn list_notes(&self) -> Result<Vec<Note>> {
        Ok(self.inner.read().await.notes.clone())
    }

    async fn insert_note(&self, mut note: Note) -> Result<ObjectId> {
        let id = ObjectId::new();
        note.id = Some(id);
        self.inner.write().await.notes.push(note);
        Ok(id)
    }

    async fn list_notes_by_uploader(&self, email: &str) -> Result<Vec<Note>> {
        Ok(self
            .inner
            .read()
            .await
            .notes
            .iter()
            .filter(|n| n.uploader_email == email)
            .cloned()
            .collect())
    }
}
