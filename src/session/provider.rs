//! Session provider
//!
//! Owns the session lifecycle: login, registration, email verification and
//! logout. Constructed once in `main` and handed to the routing layer
//! through the application state, so the single-source-of-truth contract is
//! explicit instead of ambient.
//!
//! Persistence rules (the part worth reading twice):
//! - `login` persists a session only when the API reports success with a
//!   token AND no `EMAIL_NOT_VERIFIED` soft-fail code;
//! - `register` never persists anything - verification authenticates, not
//!   registration;
//! - `logout` clears unconditionally and cannot fail.

use axum::http::HeaderValue;

use crate::models::Session;
use crate::remote::{ApiError, AuthApi, AuthData, Credentials, Envelope, RegisterPayload};

use super::cookies::{self, CookieSettings};

/// Soft-fail code the login view must convert into a redirect toward the
/// verification view instead of a terminal error.
pub const EMAIL_NOT_VERIFIED: &str = "EMAIL_NOT_VERIFIED";

/// What a login attempt produced.
#[derive(Debug)]
pub enum LoginOutcome {
    /// Authenticated; the session is ready to persist
    LoggedIn(Session),
    /// The account exists but the email is not verified yet
    NotVerified,
    /// The API answered 2xx but did not authenticate
    Rejected(String),
}

/// Process-wide session provider.
#[derive(Debug, Clone)]
pub struct SessionProvider {
    auth: AuthApi,
    settings: CookieSettings,
}

impl SessionProvider {
    pub fn new(auth: AuthApi, settings: CookieSettings) -> Self {
        Self { auth, settings }
    }

    /// The underlying auth endpoints, for the pass-through operations that
    /// touch no session state (resend code, password recovery).
    pub fn auth(&self) -> &AuthApi {
        &self.auth
    }

    /// Send credentials to the remote API and decide whether the response
    /// authenticates. API rejections (non-2xx) propagate as errors except
    /// for the not-verified code, which is a redirect signal, not a
    /// failure.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginOutcome, ApiError> {
        match self.auth.login(credentials).await {
            Ok(envelope) => Ok(login_outcome(envelope)),
            Err(err) if err.is_code(EMAIL_NOT_VERIFIED) => Ok(LoginOutcome::NotVerified),
            Err(err) => Err(err),
        }
    }

    /// Register a new account. Never yields a session; the caller redirects
    /// to the verification view on success.
    pub async fn register(&self, payload: &RegisterPayload) -> Result<String, ApiError> {
        let envelope = self.auth.register(payload).await?;
        let message = envelope.message.clone();
        envelope.into_ack()?;
        Ok(message.unwrap_or_else(|| "Registro completado".to_string()))
    }

    /// Verify the email code. Success authenticates: the returned session
    /// is ready to persist.
    pub async fn verify_email(&self, email: &str, code: &str) -> Result<Session, ApiError> {
        let data = self.auth.verify_email(email, code).await?.into_data()?;
        let token = data
            .token
            .ok_or_else(|| ApiError::Decode("verification response had no token".to_string()))?;
        Ok(Session::new(token, data.user))
    }

    /// Set-Cookie headers that persist the session in the browser.
    pub fn persist(&self, session: &Session) -> [HeaderValue; 2] {
        cookies::set_cookies(session, &self.settings)
    }

    /// Set-Cookie headers that clear the session. No failure mode.
    pub fn logout(&self) -> [HeaderValue; 2] {
        cookies::clear_cookies(&self.settings)
    }
}

/// Classify a 2xx login envelope.
fn login_outcome(envelope: Envelope<AuthData>) -> LoginOutcome {
    // The soft-fail code wins even when a token is also present: an
    // unverified account must never end up with a persisted session.
    if envelope.code.as_deref() == Some(EMAIL_NOT_VERIFIED) {
        return LoginOutcome::NotVerified;
    }
    if envelope.success {
        if let Some(data) = envelope.data {
            if let Some(token) = data.token {
                return LoginOutcome::LoggedIn(Session::new(token, data.user));
            }
        }
    }
    LoginOutcome::Rejected(
        envelope
            .message
            .unwrap_or_else(|| "Credenciales inválidas".to_string()),
    )
}
