//! Authentication views
//!
//! Login, registration, email verification and password recovery. Local
//! validation (confirmation mismatch, minimum length) is checked before
//! anything touches the network; remote failures come back verbatim as the
//! page's error message. The one special case is the not-verified code on
//! login, which redirects to the verification view instead of erroring.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use crate::remote::{Credentials, RegisterPayload};
use crate::session::LoginOutcome;
use crate::view::base_context;

use super::{none_if_empty, redirect_with, render, with_cookies, AppState, Notice, PageError};

/// Minimum password length accepted by the registration and reset forms.
const MIN_PASSWORD_LEN: usize = 6;

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// GET /login
pub async fn login_page(
    State(state): State<AppState>,
    Query(notice): Query<Notice>,
) -> Result<Response, PageError> {
    let mut context = base_context(None);
    context.insert("error", &notice.error);
    context.insert("message", &notice.message);
    Ok(render(&state, "login.html", &context)?.into_response())
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, PageError> {
    let credentials = Credentials {
        email: form.email.clone(),
        password: form.password,
    };

    let error = match state.sessions.login(&credentials).await {
        Ok(LoginOutcome::LoggedIn(session)) => {
            let cookies = state.sessions.persist(&session);
            return Ok(with_cookies(cookies, Redirect::to("/dashboard")));
        }
        Ok(LoginOutcome::NotVerified) => {
            return Ok(redirect_with("/verify-email", "email", &form.email).into_response());
        }
        Ok(LoginOutcome::Rejected(message)) => message,
        Err(err) => err.to_string(),
    };

    let mut context = base_context(None);
    context.insert("error", &error);
    context.insert("email", &form.email);
    Ok(render(&state, "login.html", &context)?.into_response())
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(default)]
    pub phone: String,
}

/// GET /register
pub async fn register_page(State(state): State<AppState>) -> Result<Response, PageError> {
    let context = base_context(None);
    Ok(render(&state, "register.html", &context)?.into_response())
}

/// POST /register
///
/// Registration never authenticates: on success the visitor is sent to the
/// verification view with no session persisted.
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Response, PageError> {
    // Local validation first; these never issue a network request.
    if form.password != form.confirm_password {
        return render_register_error(&state, &form, "Las contraseñas no coinciden");
    }
    if form.password.len() < MIN_PASSWORD_LEN {
        return render_register_error(
            &state,
            &form,
            "La contraseña debe tener al menos 6 caracteres",
        );
    }

    let payload = RegisterPayload {
        name: form.name.clone(),
        email: form.email.clone(),
        password: form.password.clone(),
        phone: none_if_empty(form.phone.clone()),
    };

    match state.sessions.register(&payload).await {
        Ok(_) => Ok(redirect_with("/verify-email", "email", &form.email).into_response()),
        Err(err) => render_register_error(&state, &form, &err.to_string()),
    }
}

fn render_register_error(
    state: &AppState,
    form: &RegisterForm,
    error: &str,
) -> Result<Response, PageError> {
    let mut context = base_context(None);
    context.insert("error", error);
    context.insert("name", &form.name);
    context.insert("email", &form.email);
    context.insert("phone", &form.phone);
    Ok(render(state, "register.html", &context)?.into_response())
}

// ---------------------------------------------------------------------------
// Email verification
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct VerifyQuery {
    pub email: Option<String>,
    pub message: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VerifyForm {
    pub email: String,
    pub code: String,
}

/// GET /verify-email
pub async fn verify_email_page(
    State(state): State<AppState>,
    Query(query): Query<VerifyQuery>,
) -> Result<Response, PageError> {
    let mut context = base_context(None);
    context.insert("email", &query.email.unwrap_or_default());
    context.insert("message", &query.message);
    context.insert("error", &query.error);
    Ok(render(&state, "verify_email.html", &context)?.into_response())
}

/// POST /verify-email
///
/// Verification is the step that authenticates a new account: success
/// persists the session and lands on the dashboard.
pub async fn verify_email(
    State(state): State<AppState>,
    Form(form): Form<VerifyForm>,
) -> Result<Response, PageError> {
    match state.sessions.verify_email(&form.email, &form.code).await {
        Ok(session) => {
            let cookies = state.sessions.persist(&session);
            Ok(with_cookies(cookies, Redirect::to("/dashboard")))
        }
        Err(err) => {
            let mut context = base_context(None);
            context.insert("email", &form.email);
            context.insert("error", &err.to_string());
            Ok(render(&state, "verify_email.html", &context)?.into_response())
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ResendForm {
    pub email: String,
}

/// POST /resend-code
pub async fn resend_code(
    State(state): State<AppState>,
    Form(form): Form<ResendForm>,
) -> Result<Response, PageError> {
    let target = format!("/verify-email?email={}", urlencoding::encode(&form.email));
    let redirect = match state.sessions.auth().resend_code(&form.email).await {
        Ok(envelope) => {
            let message = envelope
                .message
                .unwrap_or_else(|| "Nuevo código enviado a tu correo".to_string());
            format!("{}&message={}", target, urlencoding::encode(&message))
        }
        Err(err) => format!("{}&error={}", target, urlencoding::encode(&err.to_string())),
    };
    Ok(Redirect::to(&redirect).into_response())
}

// ---------------------------------------------------------------------------
// Password recovery
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ForgotForm {
    pub email: String,
}

/// GET /forgot-password
pub async fn forgot_password_page(State(state): State<AppState>) -> Result<Response, PageError> {
    let context = base_context(None);
    Ok(render(&state, "forgot_password.html", &context)?.into_response())
}

/// POST /forgot-password
pub async fn forgot_password(
    State(state): State<AppState>,
    Form(form): Form<ForgotForm>,
) -> Result<Response, PageError> {
    let mut context = base_context(None);
    context.insert("email", &form.email);
    match state.sessions.auth().forgot_password(&form.email).await {
        Ok(envelope) => {
            let message = envelope
                .message
                .unwrap_or_else(|| "Te enviamos un código para restablecer tu contraseña".to_string());
            context.insert("message", &message);
        }
        Err(err) => context.insert("error", &err.to_string()),
    }
    Ok(render(&state, "forgot_password.html", &context)?.into_response())
}

#[derive(Debug, Deserialize)]
pub struct ResetQuery {
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResetForm {
    pub email: String,
    pub code: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// GET /reset-password
pub async fn reset_password_page(
    State(state): State<AppState>,
    Query(query): Query<ResetQuery>,
) -> Result<Response, PageError> {
    let mut context = base_context(None);
    context.insert("email", &query.email.unwrap_or_default());
    Ok(render(&state, "reset_password.html", &context)?.into_response())
}

/// POST /reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    Form(form): Form<ResetForm>,
) -> Result<Response, PageError> {
    if form.new_password != form.confirm_password {
        return render_reset_error(&state, &form, "Las contraseñas no coinciden");
    }
    if form.new_password.len() < MIN_PASSWORD_LEN {
        return render_reset_error(
            &state,
            &form,
            "La contraseña debe tener al menos 6 caracteres",
        );
    }

    match state
        .sessions
        .auth()
        .reset_password(&form.email, &form.code, &form.new_password)
        .await
    {
        Ok(envelope) => {
            let message = envelope
                .message
                .unwrap_or_else(|| "Contraseña actualizada, ya puedes iniciar sesión".to_string());
            Ok(redirect_with("/login", "message", &message).into_response())
        }
        Err(err) => render_reset_error(&state, &form, &err.to_string()),
    }
}

fn render_reset_error(
    state: &AppState,
    form: &ResetForm,
    error: &str,
) -> Result<Response, PageError> {
    let mut context = base_context(None);
    context.insert("email", &form.email);
    context.insert("error", error);
    Ok(render(state, "reset_password.html", &context)?.into_response())
}

// ---------------------------------------------------------------------------
// Logout
// ---------------------------------------------------------------------------

/// POST /logout
///
/// Clears the cookie pair unconditionally; there is no failure mode.
pub async fn logout(State(state): State<AppState>) -> Response {
    with_cookies(state.sessions.logout(), Redirect::to("/"))
}
