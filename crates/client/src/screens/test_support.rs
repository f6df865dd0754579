//! Fake API for screen tests

use crate::api::AdmissionApi;
use crate::errors::{ClientError, Result};
use admission_common::api::{
    CreateNoteRequest, CreateNoteResponse, CreateUserRequest, CreateUserResponse,
    NoteView, UniversitiesResponse, UniversityPartitions, UniversityView, UpdateUserRequest,
    UserView,
};
use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub fn university(name: &str) -> UniversityView {
    UniversityView {
        id: name.to_lowercase().replace(' ', "-"),
        name: name.to_string(),
        location: None,
        kind: String::new(),
        website: None,
    }
}

#[derive(Default)]
pub struct FakeApi {
    pub universities: Mutex<UniversityPartitions>,
    pub notes: Mutex<Vec<NoteView>>,
    pub created_notes: Mutex<Vec<CreateNoteRequest>>,
    pub university_fetches: AtomicUsize,
    pub note_fetches: AtomicUsize,
    pub fail_fetches: bool,
}

impl FakeApi {
    pub fn university_fetches(&self) -> usize {
        self.university_fetches.load(Ordering::SeqCst)
    }

    pub fn note_fetches(&self) -> usize {
        self.note_fetches.load(Ordering::SeqCst)
    }

    pub fn created_notes(&self) -> Vec<CreateNoteRequest> {
        self.created_notes.lock().unwrap().clone()
    }

    fn outage<T>(&self) -> Result<T> {
        Err(ClientError::from_response(
            500,
            r#"{"error":{"code":"CONNECTION_ERROR","message":"Internal server error"}}"#,
        ))
    }
}

fn unsupported<T>() -> Result<T> {
    Err(ClientError::from_response(405, ""))
}

#[async_trait]
impl AdmissionApi for FakeApi {
    async fn list_universities(&self) -> Result<UniversitiesResponse> {
        self.university_fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetches {
            return self.outage();
        }
        Ok(UniversitiesResponse {
            universities: self.universities.lock().unwrap().clone(),
        })
    }

    async fn get_university(&self, _id: &str) -> Result<UniversityView> {
        unsupported()
    }

    async fn list_users(&self) -> Result<Vec<UserView>> {
        unsupported()
    }

    async fn create_user(&self, _request: &CreateUserRequest) -> Result<CreateUserResponse> {
        unsupported()
    }

    async fn get_user(&self, _email: &str) -> Result<UserView> {
        unsupported()
    }

    async fn update_user(&self, _email: &str, _update: &UpdateUserRequest) -> Result<UserView> {
        unsupported()
    }

    async fn delete_user(&self, _email: &str) -> Result<UserView> {
        unsupported()
    }

    async fn list_notes(&self) -> Result<Vec<NoteView>> {
        self.note_fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetches {
            return self.outage();
        }
        Ok(self.notes.lock().unwrap().clone())
    }

    async fn create_note(&self, request: &CreateNoteRequest) -> Result<CreateNoteResponse> {
        let mut notes = self.notes.lock().unwrap();
        let id = format!("{:024x}", notes.len() + 1);
        let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let offset = notes.len() as i64;

        notes.push(NoteView {
            id: id.clone(),
            title: request.title.clone().unwrap_or_default(),
            content: request.content.clone().unwrap_or_default(),
            uploader_email: request.uploader_email.clone().unwrap_or_default(),
            uploaded_at: base + Duration::minutes(offset),
        });
        self.created_notes.lock().unwrap().push(request.clone());

        Ok(CreateNoteResponse {
            message: "Note uploaded successfully".to_string(),
            inserted_id: id,
        })
    }

    async fn list_notes_by_uploader(&self, email: &str) -> Result<Vec<NoteView>> {
        Ok(self
            .notes
            .lock()
            .unwrap()
            .iter()
            .filter(|note| note.uploader_email == email)
            .cloned()
            .collect())
    }
}
