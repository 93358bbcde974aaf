//! Domain models
//!
//! These mirror the records served by the remote academic API. The portal
//! holds only transient copies; the API remains the source of truth.

pub mod contact;
pub mod course;
pub mod enrollment;
pub mod session;
pub mod user;

pub use contact::{ContactMessage, ContactStatus, ContactSubject};
pub use course::Course;
pub use enrollment::{CourseRef, Enrollment, EnrollmentStatus};
pub use session::Session;
pub use user::{Role, User};
