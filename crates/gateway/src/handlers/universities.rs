//! University handlers

use axum::{
    extract::{Path, State},
    Json,
};
use mongodb::bson::oid::ObjectId;
use tracing::instrument;

use crate::AppState;
use admission_common::{
    api::{UniversitiesResponse, UniversityPartitions, UniversityView},
    db::models::Partition,
    errors::{AppError, Result},
};

/// List both partitions
#[instrument(skip(state))]
pub async fn list_universities(State(state): State<AppState>) -> Result<Json<UniversitiesResponse>> {
    let public = state.repo.list_universities(Partition::Public).await?;
    let private = state.repo.list_universities(Partition::Private).await?;

    Ok(Json(UniversitiesResponse {
        universities: UniversityPartitions {
            public: public.into_iter().map(UniversityView::from).collect(),
            private: private.into_iter().map(UniversityView::from).collect(),
        },
    }))
}

/// Get a university by id from whichever partition holds it
#[instrument(skip(state))]
pub async fn get_university(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UniversityView>> {
    let object_id = ObjectId::parse_str(&id).map_err(|_| AppError::InvalidFormat {
        message: format!("'{}' is not a valid university id", id),
    })?;

    let (partition, university) = state
        .repo
        .find_university(object_id)
        .await?
        .ok_or_else(|| AppError::UniversityNotFound { id: id.clone() })?;

    tracing::debug!(%partition, "University found");

    Ok(Json(university.into()))
}
