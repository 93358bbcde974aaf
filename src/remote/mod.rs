//! Remote API layer
//!
//! The portal holds no business logic of its own: every domain operation is
//! a thin wrapper around one endpoint of the remote academic API. Each
//! module below maps one resource's operations to HTTP calls through the
//! shared [`ApiClient`]. Failures propagate to the caller as-is; there are
//! no retries, no caching and no optimistic updates.

pub mod auth;
pub mod client;
pub mod contacts;
pub mod courses;
pub mod enrollments;
pub mod users;

pub use auth::{AuthApi, AuthData, Credentials, RegisterPayload};
pub use client::{ApiClient, ApiError, Envelope};
pub use contacts::{ContactApi, ContactInput};
pub use courses::{CourseApi, CourseFilter, CourseInput};
pub use enrollments::{EnrollmentApi, EnrollmentUpdate};
pub use users::{TeacherInput, UserApi};
