use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use ts_rs::TS;
use utoipa::ToSchema;

use crate::{
    error::AppError,
    models::{
        CreateRecipeRequest, NewAdmin, NewRecipe, NewUser, RegisterAdminRequest,
        RegisterUserRequest,
    },
};

pub const MIN_PASSWORD_LEN: usize = 6;

/// FieldError
///
/// One rejected field of a request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[ts(export)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Validate
///
/// Turns a loosely-shaped request payload (every field optional) into the
/// domain input it describes, collecting every field error instead of stopping
/// at the first.
pub trait Validate {
    type Output;

    fn validate(self) -> Result<Self::Output, Vec<FieldError>>;
}

/// ValidatedJson
///
/// Extractor that deserializes a JSON body and runs `Validate` on it before the
/// handler is entered. Malformed JSON and failed validation both surface as
/// `AppError::Validation` (400). Any other rejection, such as a missing content
/// type (415) or an oversized body (413), keeps its own status.
pub struct ValidatedJson<T: Validate>(pub T::Output);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: Validate + DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| match rejection {
                JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
                    AppError::Validation(vec![FieldError::new("body", &rejection.body_text())])
                }
                other => AppError::Rejected {
                    status: other.status(),
                    message: other.body_text(),
                },
            })?;

        payload.validate().map(ValidatedJson).map_err(AppError::Validation)
    }
}

/// Trims and lower-cases an email so lookups and the unique index agree.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Structural email check: a single `@`, a non-empty local part without
/// leading, trailing or doubled dots, and a dotted domain whose labels are
/// non-empty and do not start or end with `-`.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty()
        || domain.contains('@')
        || local.starts_with('.')
        || local.ends_with('.')
        || local.contains("..")
    {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty() && !label.starts_with('-') && !label.ends_with('-')
        })
}

fn require_text(
    value: Option<String>,
    field: &str,
    message: &str,
    errors: &mut Vec<FieldError>,
) -> String {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => v,
        _ => {
            errors.push(FieldError::new(field, message));
            String::new()
        }
    }
}

// Blank lines are dropped; the frontend splits textareas on newlines.
fn require_lines(
    value: Option<Vec<String>>,
    field: &str,
    message: &str,
    errors: &mut Vec<FieldError>,
) -> Vec<String> {
    let lines: Vec<String> = value
        .unwrap_or_default()
        .into_iter()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();
    if lines.is_empty() {
        errors.push(FieldError::new(field, message));
    }
    lines
}

fn require_email(value: Option<String>, errors: &mut Vec<FieldError>) -> String {
    let email = value.as_deref().map(normalize_email).unwrap_or_default();
    if !is_valid_email(&email) {
        errors.push(FieldError::new("email", "Valid email is required"));
    }
    email
}

fn require_password(value: Option<String>, errors: &mut Vec<FieldError>) -> String {
    let password = value.unwrap_or_default();
    if password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(FieldError::new(
            "password",
            "Password must be at least 6 characters",
        ));
    }
    password
}

impl Validate for RegisterUserRequest {
    type Output = NewUser;

    fn validate(self) -> Result<NewUser, Vec<FieldError>> {
        let mut errors = Vec::new();
        let username = require_text(
            self.username,
            "username",
            "Username is required",
            &mut errors,
        );
        let email = require_email(self.email, &mut errors);
        let password = require_password(self.password, &mut errors);

        if errors.is_empty() {
            Ok(NewUser {
                username,
                email,
                password,
            })
        } else {
            Err(errors)
        }
    }
}

impl Validate for RegisterAdminRequest {
    type Output = NewAdmin;

    fn validate(self) -> Result<NewAdmin, Vec<FieldError>> {
        let mut errors = Vec::new();
        let name = require_text(self.name, "name", "Name is required", &mut errors);
        let email = require_email(self.email, &mut errors);
        let password = require_password(self.password, &mut errors);

        if errors.is_empty() {
            Ok(NewAdmin {
                name,
                email,
                password,
            })
        } else {
            Err(errors)
        }
    }
}

impl Validate for CreateRecipeRequest {
    type Output = NewRecipe;

    fn validate(self) -> Result<NewRecipe, Vec<FieldError>> {
        let mut errors = Vec::new();
        let title = require_text(self.title, "title", "Title is required", &mut errors);
        let ingredients = require_lines(
            self.ingredients,
            "ingredients",
            "Ingredients are required",
            &mut errors,
        );
        let instructions = require_lines(
            self.instructions,
            "instructions",
            "Instructions are required",
            &mut errors,
        );
        let image = self
            .image
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty());

        if errors.is_empty() {
            Ok(NewRecipe {
                title,
                ingredients,
                instructions,
                image,
            })
        } else {
            Err(errors)
        }
    }
}
