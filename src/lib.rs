//! Aula - academic management portal
//!
//! Server-rendered front door for a school's academic API: public catalog
//! and marketing pages, cookie-backed sessions, and role-gated management
//! views for courses, contact messages and users.

pub mod config;
pub mod models;
pub mod remote;
pub mod session;
pub mod view;
pub mod web;
