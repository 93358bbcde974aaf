//! Public marketing pages and the contact form

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;

use crate::models::ContactSubject;
use crate::remote::ContactInput;
use crate::view::base_context;

use super::{none_if_empty, render, AppState, MaybeSession, PageError};

/// GET /
pub async fn home(
    State(state): State<AppState>,
    MaybeSession(session): MaybeSession,
) -> Result<Html<String>, PageError> {
    render(&state, "home.html", &base_context(session.as_ref()))
}

/// GET /about
pub async fn about(
    State(state): State<AppState>,
    MaybeSession(session): MaybeSession,
) -> Result<Html<String>, PageError> {
    render(&state, "about.html", &base_context(session.as_ref()))
}

/// GET /academic-offerings
pub async fn academic_offerings(
    State(state): State<AppState>,
    MaybeSession(session): MaybeSession,
) -> Result<Html<String>, PageError> {
    render(&state, "offerings.html", &base_context(session.as_ref()))
}

#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub subject: ContactSubject,
    pub message: String,
}

/// GET /contact
pub async fn contact(
    State(state): State<AppState>,
    MaybeSession(session): MaybeSession,
) -> Result<Html<String>, PageError> {
    render(&state, "contact.html", &base_context(session.as_ref()))
}

/// POST /contact
///
/// Public, no credential attached. Success and failure both re-render the
/// form; failure carries the API's message verbatim.
pub async fn send_contact(
    State(state): State<AppState>,
    MaybeSession(session): MaybeSession,
    Form(form): Form<ContactForm>,
) -> Result<Response, PageError> {
    let input = ContactInput {
        name: form.name.clone(),
        email: form.email.clone(),
        phone: none_if_empty(form.phone.clone()),
        subject: form.subject,
        message: form.message.clone(),
    };

    let mut context = base_context(session.as_ref());
    match state.contacts.send_message(&input).await {
        Ok(()) => {
            context.insert(
                "message",
                "Mensaje enviado. Nos pondremos en contacto contigo pronto.",
            );
        }
        Err(err) => {
            context.insert("error", &err.to_string());
            context.insert("name", &form.name);
            context.insert("email", &form.email);
            context.insert("phone", &form.phone);
            context.insert("body", &form.message);
        }
    }
    Ok(render(&state, "contact.html", &context)?.into_response())
}
