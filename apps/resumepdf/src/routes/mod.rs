pub mod api;
pub mod health;
pub mod pages;

use axum::{
    http::{
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
        HeaderValue,
    },
    middleware,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Router,
};
use chrono::{Local, NaiveDate};

use crate::export::ExportedDocument;
use crate::session::ensure_session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Pages
        .route("/", get(pages::handle_form_page))
        .route("/form", post(pages::handle_form_submit))
        .route("/preview", get(pages::handle_preview_page))
        .route("/preview/download", get(pages::handle_preview_download))
        // Form API
        .route(
            "/api/v1/form",
            get(api::handle_get_form)
                .put(api::handle_put_form)
                .delete(api::handle_clear_form),
        )
        .route("/api/v1/form/fields/:field", patch(api::handle_update_field))
        .route("/api/v1/form/validate", post(api::handle_validate_form))
        .route("/api/v1/form/export", get(api::handle_export_form))
        .layer(middleware::from_fn(ensure_session))
        .route("/health", get(health::health_handler))
        .with_state(state)
}

/// Local calendar date used for the footer and the filename.
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Wraps a finished document as a download.
pub(crate) fn pdf_attachment(doc: ExportedDocument) -> Response {
    let disposition = HeaderValue::from_str(&content_disposition(&doc.filename))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));
    (
        [
            (CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (CONTENT_DISPOSITION, disposition),
        ],
        doc.bytes,
    )
        .into_response()
}

/// `attachment` disposition with an ASCII fallback name and an RFC 5987
/// `filename*` carrying the exact UTF-8 name.
fn content_disposition(filename: &str) -> String {
    let ascii: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let mut encoded = String::with_capacity(filename.len());
    for byte in filename.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'.' | b'_' | b'-') {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }

    format!("attachment; filename=\"{ascii}\"; filename*=UTF-8''{encoded}")
}
