//! Request handlers, one module per resource.
//!
//! Handlers return `Result<_, AppError>`; every failure is turned into a JSON
//! body by `AppError::into_response`.

pub mod admins;
pub mod me;
pub mod recipes;
pub mod users;

use uuid::Uuid;

use crate::{error::AppError, password};

/// Parses a path identifier. An id that is not a UUID cannot match any record,
/// so it is reported as not found.
pub(crate) fn parse_id(raw: &str, not_found: &'static str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::NotFound(not_found))
}

/// Hashing blocks for tens of milliseconds, so it runs on the blocking pool.
pub(crate) async fn hash_password(plaintext: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || password::hash_password(&plaintext))
        .await
        .map_err(AppError::internal)?
        .map_err(AppError::internal)
}

pub(crate) async fn verify_password(plaintext: String, hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || password::verify_password(&plaintext, &hash))
        .await
        .map_err(AppError::internal)
}
