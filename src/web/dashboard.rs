//! Student dashboard
//!
//! Shows the authenticated user's identity and their enrollments. Teachers
//! and admins additionally get an overview of every enrollment with a
//! progress-update form per row.

use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use crate::models::{Enrollment, EnrollmentStatus};
use crate::remote::EnrollmentUpdate;
use crate::view::base_context;

use super::{redirect_with, render, AppState, CurrentSession, Notice, PageError};

/// GET /dashboard
pub async fn show(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Query(notice): Query<Notice>,
) -> Result<Html<String>, PageError> {
    let mut context = base_context(Some(&session));
    context.insert("message", &notice.message);

    let mut error = notice.error;
    match state.enrollments.my_enrollments(&session.token).await {
        Ok(enrollments) => context.insert("enrollments", &enrollments),
        Err(err) => {
            tracing::error!("Error fetching enrollments: {}", err);
            context.insert("enrollments", &Vec::<Enrollment>::new());
            error.get_or_insert(err.to_string());
        }
    }

    // Enrollment overview for course managers.
    if session.role().can_manage_courses() {
        match state.enrollments.list_all(&session.token).await {
            Ok(all) => context.insert("all_enrollments", &all),
            Err(err) => {
                tracing::error!("Error fetching enrollment overview: {}", err);
                context.insert("all_enrollments", &Vec::<Enrollment>::new());
                error.get_or_insert(err.to_string());
            }
        }
    }

    context.insert("error", &error);
    render(&state, "dashboard.html", &context)
}

#[derive(Debug, Deserialize)]
pub struct EnrollmentForm {
    pub status: Option<EnrollmentStatus>,
    pub progress: Option<u8>,
}

/// POST /dashboard/enrollments/{id}
///
/// Progress tracking, reserved to course managers.
pub async fn update_enrollment(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<String>,
    Form(form): Form<EnrollmentForm>,
) -> Result<Response, PageError> {
    if !session.role().can_manage_courses() {
        return Ok(Redirect::to("/dashboard").into_response());
    }

    let update = EnrollmentUpdate {
        status: form.status,
        progress: form.progress.map(|p| p.min(100)),
    };

    match state
        .enrollments
        .update(&session.token, &id, &update)
        .await
    {
        Ok(_) => Ok(Redirect::to("/dashboard").into_response()),
        Err(err) => Ok(redirect_with("/dashboard", "error", &err.to_string()).into_response()),
    }
}
