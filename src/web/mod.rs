//! Web layer - routing, guard and page views
//!
//! One route per page of the portal. Public pages render for everyone;
//! the protected set sits behind the session guard and redirects
//! unauthenticated visitors to the login view. Role gates inside the
//! admin views mirror the remote API's own rules.

pub mod admin;
pub mod auth;
pub mod courses;
pub mod dashboard;
pub mod middleware;
pub mod pages;

use axum::{
    http::{header, HeaderValue},
    middleware as axum_middleware,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

pub use middleware::{AppState, CurrentSession, MaybeSession, PageError};

/// Query-string notice passed across redirects (post/redirect/get).
#[derive(Debug, Default, Deserialize)]
pub struct Notice {
    pub message: Option<String>,
    pub error: Option<String>,
}

/// Render a page template through the shared renderer.
pub(crate) fn render(
    state: &AppState,
    name: &str,
    context: &tera::Context,
) -> Result<Html<String>, PageError> {
    Ok(Html(state.renderer.render(name, context)?))
}

/// Attach session cookies to a redirect response.
pub(crate) fn with_cookies(cookies: [HeaderValue; 2], redirect: Redirect) -> Response {
    let mut response = redirect.into_response();
    for cookie in cookies {
        response.headers_mut().append(header::SET_COOKIE, cookie);
    }
    response
}

/// Redirect carrying a notice in the query string.
pub(crate) fn redirect_with(path: &str, key: &str, value: &str) -> Redirect {
    Redirect::to(&format!("{}?{}={}", path, key, urlencoding::encode(value)))
}

/// Build the portal router.
pub fn build_router(state: AppState) -> Router {
    // Protected views: dashboard and the management pages. The guard
    // redirects before any handler (or remote call) runs.
    let protected = Router::new()
        .route("/dashboard", get(dashboard::show))
        .route(
            "/dashboard/enrollments/{id}",
            post(dashboard::update_enrollment),
        )
        .route(
            "/manage-courses",
            get(admin::manage_courses).post(admin::create_course),
        )
        .route("/manage-courses/{id}", post(admin::update_course))
        .route("/manage-courses/{id}/delete", post(admin::delete_course))
        .route("/manage-contacts", get(admin::manage_contacts))
        .route(
            "/manage-contacts/{id}/status",
            post(admin::update_contact_status),
        )
        .route(
            "/admin/users",
            get(admin::manage_users).post(admin::create_teacher),
        )
        .route("/admin/users/{id}/role", post(admin::update_user_role))
        .route("/admin/users/{id}/delete", post(admin::delete_user))
        .route_layer(axum_middleware::from_fn(middleware::require_session));

    Router::new()
        .route("/", get(pages::home))
        .route("/about", get(pages::about))
        .route("/academic-offerings", get(pages::academic_offerings))
        .route("/courses", get(courses::catalog))
        .route("/courses/{id}/enroll", post(courses::enroll))
        .route("/contact", get(pages::contact).post(pages::send_contact))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route(
            "/verify-email",
            get(auth::verify_email_page).post(auth::verify_email),
        )
        .route("/resend-code", post(auth::resend_code))
        .route(
            "/forgot-password",
            get(auth::forgot_password_page).post(auth::forgot_password),
        )
        .route(
            "/reset-password",
            get(auth::reset_password_page).post(auth::reset_password),
        )
        .route("/logout", post(auth::logout))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Empty string form fields become `None`.
pub(crate) fn none_if_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
