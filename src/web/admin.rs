//! Management views
//!
//! Course administration (teacher or admin), contact triage (admin) and
//! user administration (admin). The session guard already ran; these
//! handlers enforce the role gate on top of it. The remote API enforces
//! the same rules server-side, so a forged request past the gate still
//! fails.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use crate::models::{ContactMessage, ContactStatus, Role, User};
use crate::remote::{CourseInput, TeacherInput};
use crate::view::base_context;

use super::{none_if_empty, redirect_with, render, AppState, CurrentSession, Notice, PageError};

/// Status filters offered by the contact triage view.
const STATUS_FILTERS: [(&str, &str); 4] = [
    ("all", "Todos"),
    ("pending", "Pendientes"),
    ("in-progress", "En proceso"),
    ("resolved", "Resueltos"),
];

// ---------------------------------------------------------------------------
// Course administration
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct ManageCoursesQuery {
    pub edit: Option<String>,
    pub message: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CourseForm {
    pub title: String,
    pub description: String,
    pub category: String,
    pub level: String,
    pub duration: String,
    pub price: f64,
    #[serde(default)]
    pub image: String,
}

impl CourseForm {
    fn into_input(self, session_user: &User) -> CourseInput {
        CourseInput {
            title: self.title,
            description: self.description,
            category: self.category,
            level: self.level,
            duration: self.duration,
            price: self.price,
            image: none_if_empty(self.image),
            instructor: Some(session_user.id.clone()),
            instructor_name: session_user.name.clone(),
        }
    }
}

/// GET /manage-courses
///
/// `?edit=<id>` prefills the form with the matching course from the list.
pub async fn manage_courses(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Query(query): Query<ManageCoursesQuery>,
) -> Result<Response, PageError> {
    if !session.role().can_manage_courses() {
        return Ok(Redirect::to("/dashboard").into_response());
    }

    let mut context = base_context(Some(&session));
    context.insert("message", &query.message);

    let mut error = query.error;
    let courses = match state.courses.list(&Default::default()).await {
        Ok(courses) => courses,
        Err(err) => {
            tracing::error!("Error fetching courses: {}", err);
            error.get_or_insert(err.to_string());
            Vec::new()
        }
    };

    if let Some(edit_id) = &query.edit {
        if let Some(course) = courses.iter().find(|c| &c.id == edit_id) {
            context.insert("editing", course);
        }
    }

    context.insert("courses", &courses);
    context.insert("error", &error);
    Ok(render(&state, "manage_courses.html", &context)?.into_response())
}

/// POST /manage-courses
pub async fn create_course(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Form(form): Form<CourseForm>,
) -> Result<Response, PageError> {
    if !session.role().can_manage_courses() {
        return Ok(Redirect::to("/dashboard").into_response());
    }

    let input = form.into_input(&session.user);
    match state.courses.create(&session.token, &input).await {
        Ok(_) => Ok(redirect_with("/manage-courses", "message", "Curso creado").into_response()),
        Err(err) => {
            Ok(redirect_with("/manage-courses", "error", &err.to_string()).into_response())
        }
    }
}

/// POST /manage-courses/{id}
pub async fn update_course(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<String>,
    Form(form): Form<CourseForm>,
) -> Result<Response, PageError> {
    if !session.role().can_manage_courses() {
        return Ok(Redirect::to("/dashboard").into_response());
    }

    let input = form.into_input(&session.user);
    match state.courses.update(&session.token, &id, &input).await {
        Ok(_) => {
            Ok(redirect_with("/manage-courses", "message", "Curso actualizado").into_response())
        }
        Err(err) => {
            Ok(redirect_with("/manage-courses", "error", &err.to_string()).into_response())
        }
    }
}

/// POST /manage-courses/{id}/delete
pub async fn delete_course(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<String>,
) -> Result<Response, PageError> {
    if !session.role().can_manage_courses() {
        return Ok(Redirect::to("/dashboard").into_response());
    }

    match state.courses.delete(&session.token, &id).await {
        Ok(()) => {
            Ok(redirect_with("/manage-courses", "message", "Curso eliminado").into_response())
        }
        Err(err) => {
            Ok(redirect_with("/manage-courses", "error", &err.to_string()).into_response())
        }
    }
}

// ---------------------------------------------------------------------------
// Contact triage
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct ManageContactsQuery {
    pub status: Option<String>,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ManageContactsQuery {
    /// "all" and blank are no filter; anything unrecognized falls back to
    /// the unfiltered list rather than erroring.
    fn status_filter(&self) -> Option<ContactStatus> {
        self.status
            .as_deref()
            .filter(|s| !s.is_empty() && *s != "all")
            .and_then(|s| s.parse().ok())
    }
}

/// GET /manage-contacts
pub async fn manage_contacts(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Query(query): Query<ManageContactsQuery>,
) -> Result<Response, PageError> {
    if !session.role().can_manage_contacts() {
        return Ok(Redirect::to("/dashboard").into_response());
    }

    let mut context = base_context(Some(&session));
    context.insert("status_filters", &STATUS_FILTERS);
    context.insert(
        "selected_status",
        query.status.as_deref().unwrap_or("all"),
    );
    context.insert("message", &query.message);

    match state
        .contacts
        .list(&session.token, query.status_filter())
        .await
    {
        Ok(messages) => {
            context.insert("contacts", &messages);
            context.insert("error", &query.error);
        }
        Err(err) => {
            tracing::error!("Error fetching contact messages: {}", err);
            context.insert("contacts", &Vec::<ContactMessage>::new());
            context.insert("error", &err.to_string());
        }
    }

    Ok(render(&state, "manage_contacts.html", &context)?.into_response())
}

#[derive(Debug, Deserialize)]
pub struct ContactStatusForm {
    pub status: ContactStatus,
    #[serde(default)]
    pub filter: Option<String>,
}

/// POST /manage-contacts/{id}/status
///
/// The redirect back to the triage list keeps the active status filter.
pub async fn update_contact_status(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<String>,
    Form(form): Form<ContactStatusForm>,
) -> Result<Response, PageError> {
    if !session.role().can_manage_contacts() {
        return Ok(Redirect::to("/dashboard").into_response());
    }

    let mut back = String::from("/manage-contacts");
    let mut sep = '?';
    if let Some(filter) = form.filter.as_deref().filter(|f| !f.is_empty()) {
        back.push_str(&format!("{}status={}", sep, urlencoding::encode(filter)));
        sep = '&';
    }

    match state.contacts.update(&session.token, &id, form.status).await {
        Ok(_) => {
            back.push_str(&format!(
                "{}message={}",
                sep,
                urlencoding::encode("Estado actualizado")
            ));
        }
        Err(err) => {
            back.push_str(&format!(
                "{}error={}",
                sep,
                urlencoding::encode(&err.to_string())
            ));
        }
    }
    Ok(Redirect::to(&back).into_response())
}

// ---------------------------------------------------------------------------
// User administration
// ---------------------------------------------------------------------------

/// GET /admin/users
///
/// Unlike the other management pages this one renders an explicit
/// access-denied view for non-admins instead of redirecting.
pub async fn manage_users(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Query(notice): Query<Notice>,
) -> Result<Response, PageError> {
    if !session.role().can_manage_users() {
        let context = base_context(Some(&session));
        let page = render(&state, "denied.html", &context)?;
        return Ok((StatusCode::FORBIDDEN, page).into_response());
    }

    let mut context = base_context(Some(&session));
    context.insert("message", &notice.message);

    match state.users.list(&session.token).await {
        Ok(users) => {
            context.insert("users", &users);
            context.insert("error", &notice.error);
        }
        Err(err) => {
            tracing::error!("Error fetching users: {}", err);
            context.insert("users", &Vec::<User>::new());
            context.insert("error", &err.to_string());
        }
    }

    Ok(render(&state, "manage_users.html", &context)?.into_response())
}

#[derive(Debug, Deserialize)]
pub struct TeacherForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub password: String,
}

/// POST /admin/users - provision a teacher account.
pub async fn create_teacher(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Form(form): Form<TeacherForm>,
) -> Result<Response, PageError> {
    if !session.role().can_manage_users() {
        return Ok(Redirect::to("/dashboard").into_response());
    }

    let input = TeacherInput {
        name: form.name,
        email: form.email,
        phone: none_if_empty(form.phone),
        password: form.password,
    };

    match state.users.create_teacher(&session.token, &input).await {
        Ok(user) => Ok(redirect_with(
            "/admin/users",
            "message",
            &format!("Cuenta de docente creada para {}", user.name),
        )
        .into_response()),
        Err(err) => Ok(redirect_with("/admin/users", "error", &err.to_string()).into_response()),
    }
}

#[derive(Debug, Deserialize)]
pub struct RoleForm {
    pub role: Role,
}

/// POST /admin/users/{id}/role
pub async fn update_user_role(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<String>,
    Form(form): Form<RoleForm>,
) -> Result<Response, PageError> {
    if !session.role().can_manage_users() {
        return Ok(Redirect::to("/dashboard").into_response());
    }

    match state.users.update(&session.token, &id, form.role).await {
        Ok(_) => Ok(redirect_with("/admin/users", "message", "Rol actualizado").into_response()),
        Err(err) => Ok(redirect_with("/admin/users", "error", &err.to_string()).into_response()),
    }
}

/// POST /admin/users/{id}/delete
pub async fn delete_user(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<String>,
) -> Result<Response, PageError> {
    if !session.role().can_manage_users() {
        return Ok(Redirect::to("/dashboard").into_response());
    }

    // The remote API refuses self-deletion; checking here too saves the
    // round-trip and keeps the message in the portal's language.
    if id == session.user.id {
        return Ok(redirect_with(
            "/admin/users",
            "error",
            "No puedes eliminar tu propia cuenta",
        )
        .into_response());
    }

    match state.users.delete(&session.token, &id).await {
        Ok(()) => Ok(redirect_with("/admin/users", "message", "Usuario eliminado").into_response()),
        Err(err) => Ok(redirect_with("/admin/users", "error", &err.to_string()).into_response()),
    }
}
