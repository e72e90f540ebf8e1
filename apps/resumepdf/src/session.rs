//! Browser session identity.
//!
//! A session is a random id in a cookie with no `Max-Age`/`Expires`, so the
//! browser drops it when the session ends. `ensure_session` runs in front of
//! every route, hands handlers a [`SessionId`] and issues the cookie when the
//! request did not carry a usable one.

use axum::{
    extract::Request,
    http::{
        header::{COOKIE, SET_COOKIE},
        HeaderMap, HeaderValue,
    },
    middleware::Next,
    response::Response,
};
use tracing::debug;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "resumepdf_session";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionId(pub Uuid);

/// Reads the session id from the `Cookie` headers, if present and well-formed.
pub fn session_from_headers(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
        .map(SessionId)
}

pub fn session_cookie(session: SessionId) -> String {
    format!(
        "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
        session.0
    )
}

pub async fn ensure_session(mut req: Request, next: Next) -> Response {
    let (session, is_new) = match session_from_headers(req.headers()) {
        Some(session) => (session, false),
        None => (SessionId(Uuid::new_v4()), true),
    };
    req.extensions_mut().insert(session);

    let mut response = next.run(req).await;

    if is_new {
        debug!(session = %session.0, "Starting new session");
        if let Ok(value) = HeaderValue::from_str(&session_cookie(session)) {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }
    response
}
