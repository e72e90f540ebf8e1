//! JSON form API. The entry page's inline script calls the field endpoint on
//! every keystroke so the store always mirrors the inputs.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::form::{validate_record, EntryForm, FieldErrors};
use crate::models::record::{Field, Record};
use crate::routes::{pdf_attachment, today};
use crate::session::SessionId;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FieldUpdate {
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub errors: FieldErrors,
}

/// GET /api/v1/form
pub async fn handle_get_form(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Result<Json<Record>, AppError> {
    Ok(Json(state.form_store(session).get_data().await?))
}

/// PUT /api/v1/form
///
/// Replaces the whole record.
pub async fn handle_put_form(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Json(record): Json<Record>,
) -> Result<Json<Record>, AppError> {
    state.form_store(session).set_data(record.clone()).await?;
    Ok(Json(record))
}

/// DELETE /api/v1/form
pub async fn handle_clear_form(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Result<StatusCode, AppError> {
    state.form_store(session).clear().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/form/fields/:field
///
/// Replaces one field in a copy of the stored record and stores the copy.
/// The read and the write happen under the session's write lock, so
/// keystrokes sent back to back never overwrite each other.
pub async fn handle_update_field(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Path(field): Path<String>,
    Json(update): Json<FieldUpdate>,
) -> Result<Json<Record>, AppError> {
    let field: Field = field
        .parse()
        .map_err(|e| AppError::NotFound(format!("{e}")))?;

    let record = state
        .form_store(session)
        .update(|record| EntryForm::new(record).input(field, update.value).clone())
        .await?;
    Ok(Json(record))
}

/// POST /api/v1/form/validate
pub async fn handle_validate_form(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Result<Json<ValidateResponse>, AppError> {
    let record = state.form_store(session).get_data().await?;
    let errors = validate_record(&record);
    Ok(Json(ValidateResponse {
        valid: errors.is_empty(),
        errors,
    }))
}

/// GET /api/v1/form/export
///
/// Same guard as the form's Download button: 422 with per-field errors when
/// the stored record is invalid, otherwise the PDF attachment.
pub async fn handle_export_form(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Result<Response, AppError> {
    let record = state.form_store(session).get_data().await?;
    let errors = validate_record(&record);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }
    let doc = state.exporter.export(record, today()).await?;
    Ok(pdf_attachment(doc))
}
