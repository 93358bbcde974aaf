//! Page rendering
//!
//! Tera templates are embedded in the binary and loaded once at startup.
//! `base_context` seeds every render with the current identity and its
//! capability flags so the navigation chrome is role-conditional without
//! each handler repeating the checks.

use rust_embed::RustEmbed;
use tera::{Context, Tera};

use crate::models::Session;

/// Embedded page templates
#[derive(RustEmbed)]
#[folder = "templates/"]
#[include = "*.html"]
struct Templates;

/// Rendering errors
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("Template error: {0}")]
    Template(String),
}

/// Template renderer shared through the application state.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Load every embedded template. Templates are added in one batch so
    /// Tera can resolve the inheritance chain.
    pub fn new() -> anyhow::Result<Self> {
        let mut templates: Vec<(String, String)> = Vec::new();
        for name in Templates::iter() {
            let file = Templates::get(&name)
                .ok_or_else(|| anyhow::anyhow!("embedded template missing: {}", name))?;
            let content = String::from_utf8(file.data.into_owned())?;
            templates.push((name.to_string(), content));
        }

        let mut tera = Tera::default();
        tera.add_raw_templates(templates)
            .map_err(|e| anyhow::anyhow!("failed to load templates: {}", e))?;
        Ok(Self { tera })
    }

    /// Render a template by file name.
    pub fn render(&self, name: &str, context: &Context) -> Result<String, ViewError> {
        self.tera
            .render(name, context)
            .map_err(|e| ViewError::Template(e.to_string()))
    }
}

/// Context shared by every page: identity and capability flags.
///
/// The flags are recomputed from the session's role on every render; they
/// are never stored anywhere they could drift from it.
pub fn base_context(session: Option<&Session>) -> Context {
    let mut context = Context::new();
    match session {
        Some(session) => {
            let role = session.role();
            context.insert("current_user", &session.user);
            context.insert("is_authenticated", &true);
            context.insert("is_admin", &role.is_admin());
            context.insert("is_teacher", &role.is_teacher());
            context.insert("can_manage_courses", &role.can_manage_courses());
            context.insert("can_manage_users", &role.can_manage_users());
            context.insert("can_manage_contacts", &role.can_manage_contacts());
        }
        None => {
            context.insert("is_authenticated", &false);
            context.insert("is_admin", &false);
            context.insert("is_teacher", &false);
            context.insert("can_manage_courses", &false);
            context.insert("can_manage_users", &false);
            context.insert("can_manage_contacts", &false);
        }
    }
    context
}
