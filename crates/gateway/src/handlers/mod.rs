//! API handlers module

pub mod health;
pub mod notes;
pub mod universities;
pub mod users;

#[cfg(test)]
pub(crate) mod test_support;

use admission_common::errors::AppError;
use axum::extract::rejection::JsonRejection;

/// Bodies that are not valid JSON for the expected shape are client errors
pub(crate) fn invalid_body(rejection: JsonRejection) -> AppError {
    AppError::InvalidFormat {
        message: rejection.body_text(),
    }
}
