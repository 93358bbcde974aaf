//! Public course catalog and enrollment action
//!
//! The catalog is a query keyed by its filter state: search text and
//! category travel as query parameters, every filter change is one fresh
//! request, and the rendered list always reflects the filters of the
//! request that produced it - a late response cannot overwrite a newer
//! view.

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use crate::remote::CourseFilter;
use crate::view::base_context;

use super::{redirect_with, render, AppState, MaybeSession, PageError};

/// Catalog categories offered by the filter bar.
const CATEGORIES: [(&str, &str); 6] = [
    ("all", "Todos"),
    ("tech", "Tecnología"),
    ("art", "Arte"),
    ("science", "Ciencias"),
    ("languages", "Idiomas"),
    ("business", "Negocios"),
];

#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl CatalogQuery {
    /// Translate the query string into remote API filters: "all" and empty
    /// values are omitted, the same way the original filter bar omits them.
    fn filter(&self) -> CourseFilter {
        CourseFilter {
            category: self
                .category
                .as_deref()
                .filter(|c| !c.is_empty() && *c != "all")
                .map(str::to_string),
            search: self
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        }
    }
}

/// GET /courses
pub async fn catalog(
    State(state): State<AppState>,
    MaybeSession(session): MaybeSession,
    axum::extract::Query(query): axum::extract::Query<CatalogQuery>,
) -> Result<Html<String>, PageError> {
    let mut context = base_context(session.as_ref());
    context.insert("categories", &CATEGORIES);
    context.insert(
        "selected_category",
        query.category.as_deref().unwrap_or("all"),
    );
    context.insert("search", query.search.as_deref().unwrap_or(""));
    context.insert("message", &query.message);

    // A fetch failure still renders the page; the error message takes the
    // place of the list.
    match state.courses.list(&query.filter()).await {
        Ok(courses) => {
            context.insert("courses", &courses);
            context.insert("error", &query.error);
        }
        Err(err) => {
            tracing::error!("Error fetching courses: {}", err);
            context.insert("courses", &Vec::<crate::models::Course>::new());
            context.insert("error", &err.to_string());
        }
    }

    render(&state, "courses.html", &context)
}

#[derive(Debug, Default, Deserialize)]
pub struct EnrollForm {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
}

/// POST /courses/{id}/enroll
///
/// Requires a session; anonymous visitors are sent to the login view. The
/// redirect back to the catalog keeps the active filters.
pub async fn enroll(
    State(state): State<AppState>,
    MaybeSession(session): MaybeSession,
    Path(course_id): Path<String>,
    Form(form): Form<EnrollForm>,
) -> Result<Response, PageError> {
    let Some(session) = session else {
        return Ok(Redirect::to("/login").into_response());
    };

    let mut back = String::from("/courses");
    let mut sep = '?';
    if let Some(category) = form.category.as_deref().filter(|c| !c.is_empty()) {
        back.push_str(&format!("{}category={}", sep, urlencoding::encode(category)));
        sep = '&';
    }
    if let Some(search) = form.search.as_deref().filter(|s| !s.is_empty()) {
        back.push_str(&format!("{}search={}", sep, urlencoding::encode(search)));
        sep = '&';
    }

    match state.enrollments.enroll(&session.token, &course_id).await {
        Ok(_) => {
            back.push_str(&format!(
                "{}message={}",
                sep,
                urlencoding::encode("¡Inscripción exitosa!")
            ));
            Ok(Redirect::to(&back).into_response())
        }
        Err(err) => Ok(redirect_with("/courses", "error", &err.to_string()).into_response()),
    }
}
