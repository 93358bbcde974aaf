//! Web middleware and shared request machinery
//!
//! The route guard lives here: a synchronous read of the session cookies,
//! no network call, no loading state. Absent or malformed cookies redirect
//! to the login view; a well-formed pair is trusted as-is (the remote API
//! re-checks authorization on every call it receives).

use axum::{
    extract::{FromRequestParts, Request},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::{Html, IntoResponse, Redirect, Response},
};
use std::convert::Infallible;
use std::sync::Arc;

use crate::models::Session;
use crate::remote::{ApiError, ContactApi, CourseApi, EnrollmentApi, UserApi};
use crate::session::{read_session, SessionProvider};
use crate::view::{Renderer, ViewError};

/// Application state containing the session provider and the domain
/// service modules, shared with every handler.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionProvider,
    pub courses: CourseApi,
    pub enrollments: EnrollmentApi,
    pub contacts: ContactApi,
    pub users: UserApi,
    pub renderer: Arc<Renderer>,
}

/// Route guard for the protected route set.
///
/// Purely a read of the cookie pair at request time; unauthenticated
/// visitors are redirected to `/login` before any handler (and therefore
/// any remote call) runs.
pub async fn require_session(request: Request, next: Next) -> Response {
    if read_session(request.headers()).is_none() {
        return Redirect::to("/login").into_response();
    }
    next.run(request).await
}

/// Extractor for handlers behind the route guard.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Session);

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        read_session(&parts.headers)
            .map(CurrentSession)
            .ok_or_else(|| Redirect::to("/login"))
    }
}

/// Extractor for public handlers that render differently when a session
/// happens to exist (navigation chrome, enroll buttons).
#[derive(Debug, Clone)]
pub struct MaybeSession(pub Option<Session>);

impl<S> FromRequestParts<S> for MaybeSession
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeSession(read_session(&parts.headers)))
    }
}

/// Errors a page handler can fail with.
///
/// Remote failures that belong to a form view are handled in the handler
/// itself (re-rendered as a user-visible message); this type covers the
/// cases where the view cannot be produced at all.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error(transparent)]
    Remote(#[from] ApiError),
    #[error(transparent)]
    Render(#[from] ViewError),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            PageError::Remote(err) => {
                tracing::warn!("remote API failure: {}", err);
                (StatusCode::BAD_GATEWAY, err.to_string())
            }
            PageError::Render(err) => {
                tracing::error!("render failure: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error interno del portal".to_string(),
                )
            }
        };
        let body = format!(
            "<!doctype html><html lang=\"es\"><body><main><h1>Algo salió mal</h1><p>{}</p>\
             <p><a href=\"/\">Volver al inicio</a></p></main></body></html>",
            tera::escape_html(&message)
        );
        (status, Html(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;

    #[tokio::test]
    async fn test_current_session_rejects_without_cookies() {
        let request = Request::builder().uri("/dashboard").body(()).unwrap();
        let (mut parts, _) = request.into_parts();
        let result = CurrentSession::from_request_parts(&mut parts, &()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_maybe_session_never_rejects() {
        let request = Request::builder().uri("/courses").body(()).unwrap();
        let (mut parts, _) = request.into_parts();
        let MaybeSession(session) = MaybeSession::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert!(session.is_none());
    }

    #[tokio::test]
    async fn test_current_session_reads_cookie_pair() {
        let profile = urlencoding::encode(
            r#"{"_id":"u1","name":"Ana","email":"ana@colegio.com","role":"student","isVerified":true}"#,
        )
        .into_owned();
        let request = Request::builder()
            .uri("/dashboard")
            .header(
                header::COOKIE,
                format!("aula_token=tok-1; aula_user={}", profile),
            )
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();
        let CurrentSession(session) = CurrentSession::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(session.token, "tok-1");
        assert_eq!(session.user.name, "Ana");
    }
}
