//! Aula - academic management portal

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aula::{
    config::Config,
    remote::{ApiClient, AuthApi, ContactApi, CourseApi, EnrollmentApi, UserApi},
    session::SessionProvider,
    view::Renderer,
    web::{self, AppState},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aula=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Aula portal...");

    // Load configuration (file, then AULA_* environment overrides)
    let config = Config::load_with_env(Path::new("config.yml"))?;
    tracing::info!("Configuration loaded");

    // Remote API client and the endpoint wrappers that share it
    let client = Arc::new(ApiClient::new(&config.api.base_url));
    tracing::info!("Remote API: {}", config.api.base_url);

    let auth = AuthApi::new(client.clone());
    let courses = CourseApi::new(client.clone());
    let enrollments = EnrollmentApi::new(client.clone());
    let contacts = ContactApi::new(client.clone());
    let users = UserApi::new(client);

    let sessions = SessionProvider::new(auth, config.session.cookie_settings());

    // Template renderer (embedded templates)
    let renderer = Arc::new(Renderer::new()?);
    tracing::info!("Templates loaded");

    let state = AppState {
        sessions,
        courses,
        enrollments,
        contacts,
        users,
        renderer,
    };

    // Build router
    let app = web::build_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Portal listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
