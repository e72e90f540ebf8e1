//! HTML pages: the entry form and the preview.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::export::EXPORT_FAILED_MESSAGE;
use crate::form::{preview_rows, EntryForm, SubmitAction, SubmitOutcome};
use crate::models::record::Record;
use crate::routes::{pdf_attachment, today};
use crate::session::SessionId;
use crate::state::AppState;

/// Body of `POST /form`: every input plus the button that was pressed.
#[derive(Debug, Deserialize)]
pub struct FormSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub action: SubmitAction,
}

impl FormSubmission {
    fn into_parts(self) -> (Record, SubmitAction) {
        let record = Record {
            name: self.name,
            email: self.email,
            phone: self.phone,
            position: self.position,
            description: self.description,
        };
        (record, self.action)
    }
}

/// GET /
pub async fn handle_form_page(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Result<Html<String>, AppError> {
    let record = state.form_store(session).get_data().await?;
    let form = EntryForm::new(record);
    Ok(Html(state.views.render_form(&form, None)?))
}

/// POST /form
///
/// Writes the submitted values through the store, then validates.
/// View: 303 to the preview. Download: the PDF as an attachment.
/// Invalid input re-renders the form with per-field messages (422).
pub async fn handle_form_submit(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Form(submission): Form<FormSubmission>,
) -> Result<Response, AppError> {
    let (record, action) = submission.into_parts();
    state.form_store(session).set_data(record.clone()).await?;

    let mut form = EntryForm::new(record);
    match form.submit(action) {
        SubmitOutcome::Navigate(next) => Ok(Redirect::to(next.path()).into_response()),
        SubmitOutcome::Export(record) => match state.exporter.export(record, today()).await {
            Ok(doc) => Ok(pdf_attachment(doc)),
            Err(_) => {
                let html = state.views.render_form(&form, Some(EXPORT_FAILED_MESSAGE))?;
                Ok((StatusCode::INTERNAL_SERVER_ERROR, Html(html)).into_response())
            }
        },
        SubmitOutcome::Invalid => {
            let html = state.views.render_form(&form, None)?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response())
        }
    }
}

/// GET /preview
pub async fn handle_preview_page(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Result<Html<String>, AppError> {
    let record = state.form_store(session).get_data().await?;
    Ok(Html(state.views.render_preview(&preview_rows(&record), None)?))
}

/// GET /preview/download
///
/// Exports the stored record as-is. Preview placeholders never reach the document.
pub async fn handle_preview_download(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Result<Response, AppError> {
    let record = state.form_store(session).get_data().await?;
    let rows = preview_rows(&record);

    match state.exporter.export(record, today()).await {
        Ok(doc) => Ok(pdf_attachment(doc)),
        Err(_) => {
            let html = state
                .views
                .render_preview(&rows, Some(EXPORT_FAILED_MESSAGE))?;
            Ok((StatusCode::INTERNAL_SERVER_ERROR, Html(html)).into_response())
        }
    }
}
