//! Session and authorization
//!
//! Single source of truth for the authenticated identity. The browser's
//! cookie jar plays the role of durable client-side storage: two cookies,
//! one for the credential token and one for the serialized profile, written
//! on successful login/verification and cleared on logout. Every request
//! reads them synchronously; a well-formed pair is trusted as-is, with no
//! re-validation against the server (the remote API enforces authorization
//! again on every call).

pub mod cookies;
pub mod provider;

pub use cookies::{clear_cookies, read_session, set_cookies, CookieSettings};
pub use provider::{LoginOutcome, SessionProvider};
