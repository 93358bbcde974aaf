//! End-to-end portal tests against a fake remote academic API.
//!
//! The fake API runs on a real socket and records every request it
//! receives, so the tests can assert not only what the portal renders but
//! also which remote calls a flow does (and does not) make.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    extract::{Json, Path, Query, Request},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use aula::remote::{ApiClient, AuthApi, ContactApi, CourseApi, EnrollmentApi, UserApi};
use aula::session::{CookieSettings, SessionProvider};
use aula::view::Renderer;
use aula::web::{self, AppState};

// ---------------------------------------------------------------------------
// Fake remote API
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
struct FakeRemote {
    hits: Arc<Mutex<Vec<String>>>,
}

impl FakeRemote {
    fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }

    fn router(&self) -> Router {
        let hits = self.hits.clone();
        Router::new()
            .route("/auth/login", post(fake_login))
            .route("/auth/register", post(fake_register))
            .route("/auth/verify-email", post(fake_verify_email))
            .route("/courses", get(fake_courses))
            .route("/enrollments", post(fake_enroll).get(fake_all_enrollments))
            .route("/enrollments/my-enrollments", get(fake_my_enrollments))
            .route("/contact", get(fake_contact_list))
            .route("/contact/{id}", put(fake_contact_update))
            .route("/users", get(fake_users))
            .layer(axum::middleware::from_fn(
                move |request: Request, next: Next| {
                    let hits = hits.clone();
                    async move {
                        hits.lock()
                            .unwrap()
                            .push(format!("{} {}", request.method(), request.uri().path()));
                        next.run(request).await
                    }
                },
            ))
    }
}

async fn fake_login(Json(body): Json<Value>) -> Response {
    match body["email"].as_str() {
        Some("ana@colegio.com") if body["password"] == "secreta" => Json(json!({
            "success": true,
            "data": {
                "token": "jwt-ana",
                "_id": "u1",
                "name": "Ana",
                "email": "ana@colegio.com",
                "role": "student",
                "isVerified": true
            }
        }))
        .into_response(),
        Some("nuevo@colegio.com") => (
            StatusCode::FORBIDDEN,
            Json(json!({
                "success": false,
                "code": "EMAIL_NOT_VERIFIED",
                "message": "Debes verificar tu correo"
            })),
        )
            .into_response(),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "Credenciales inválidas" })),
        )
            .into_response(),
    }
}

async fn fake_register(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "Registro completado, revisa tu correo",
        "data": {
            "_id": "u9",
            "name": body["name"],
            "email": body["email"],
            "role": "student",
            "isVerified": false
        }
    }))
}

async fn fake_verify_email(Json(body): Json<Value>) -> Response {
    if body["code"] == "123456" {
        Json(json!({
            "success": true,
            "data": {
                "token": "jwt-verified",
                "_id": "u9",
                "name": "Nuevo",
                "email": body["email"],
                "role": "student",
                "isVerified": true
            }
        }))
        .into_response()
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "message": "Código incorrecto" })),
        )
            .into_response()
    }
}

async fn fake_courses(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    let all = json!([
        {
            "_id": "c1",
            "title": "Robótica",
            "description": "Taller de robótica educativa",
            "category": "tech",
            "instructorName": "Prof. Vega",
            "studentsCount": 3
        },
        {
            "_id": "c2",
            "title": "Pintura",
            "description": "Taller de pintura",
            "category": "art",
            "instructorName": "Prof. Ríos",
            "studentsCount": 8
        }
    ]);
    let filtered: Vec<Value> = all
        .as_array()
        .unwrap()
        .iter()
        .filter(|c| match query.get("category") {
            Some(category) => c["category"] == category.as_str(),
            None => true,
        })
        .cloned()
        .collect();
    Json(json!({ "success": true, "data": filtered }))
}

async fn fake_enroll(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "success": true,
        "data": { "_id": "e9", "course": body["courseId"], "status": "active", "progress": 0 }
    }))
}

async fn fake_my_enrollments() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": [
            {
                "_id": "e1",
                "course": { "_id": "c1", "title": "Robótica" },
                "status": "active",
                "progress": 10
            }
        ]
    }))
}

async fn fake_all_enrollments() -> Json<Value> {
    Json(json!({ "success": true, "data": [] }))
}

async fn fake_contact_list(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    let status = query.get("status").map(String::as_str).unwrap_or("pending");
    Json(json!({
        "success": true,
        "data": [
            {
                "_id": "m1",
                "name": "Pedro",
                "email": "pedro@mail.com",
                "subject": "admissions",
                "message": "Quisiera información",
                "status": status
            }
        ]
    }))
}

async fn fake_contact_update(Path(id): Path<String>, Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "_id": id,
            "name": "Pedro",
            "email": "pedro@mail.com",
            "message": "Quisiera información",
            "status": body["status"]
        }
    }))
}

async fn fake_users() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": [
            { "_id": "u1", "name": "Ana", "email": "ana@colegio.com", "role": "student", "isVerified": true },
            { "_id": "u2", "name": "Luis", "email": "luis@colegio.com", "role": "teacher", "isVerified": true }
        ]
    }))
}

/// A remote that answers 500 to everything, for outage behavior.
fn broken_remote() -> Router {
    Router::new().fallback(|| async {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "message": "Mantenimiento programado" })),
        )
    })
}

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

// ---------------------------------------------------------------------------
// Portal harness
// ---------------------------------------------------------------------------

fn portal(base_url: &str) -> Router {
    let client = Arc::new(ApiClient::new(base_url));
    let state = AppState {
        sessions: SessionProvider::new(AuthApi::new(client.clone()), CookieSettings::default()),
        courses: CourseApi::new(client.clone()),
        enrollments: EnrollmentApi::new(client.clone()),
        contacts: ContactApi::new(client.clone()),
        users: UserApi::new(client),
        renderer: Arc::new(Renderer::new().unwrap()),
    };
    web::build_router(state)
}

fn cookie_pair(role: &str) -> String {
    let profile = json!({
        "_id": "u1",
        "name": "Ana",
        "email": "ana@colegio.com",
        "role": role,
        "isVerified": true
    })
    .to_string();
    format!("aula_token=tok-1; aula_user={}", urlencoding::encode(&profile))
}

async fn get_page(app: &Router, path: &str, cookie: Option<&str>) -> Response {
    let mut request = Request::builder().uri(path);
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_form(app: &Router, path: &str, form: &str, cookie: Option<&str>) -> Response {
    let mut request = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(request.body(Body::from(form.to_string())).unwrap())
        .await
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("expected a redirect")
        .to_str()
        .unwrap()
}

fn set_cookies(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Route guard
// ---------------------------------------------------------------------------

#[tokio::test]
async fn dashboard_redirects_anonymous_visitors_without_remote_calls() {
    let remote = FakeRemote::default();
    let app = portal(&spawn(remote.router()).await);

    let response = get_page(&app, "/dashboard", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    assert!(remote.hits().is_empty(), "guard must not touch the network");
}

#[tokio::test]
async fn dashboard_renders_for_a_cookie_session() {
    let remote = FakeRemote::default();
    let app = portal(&spawn(remote.router()).await);

    let response = get_page(&app, "/dashboard", Some(&cookie_pair("student"))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Ana"));
    assert!(body.contains("Robótica"));
    assert_eq!(remote.hits(), vec!["GET /enrollments/my-enrollments"]);
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_success_persists_session_and_lands_on_dashboard() {
    let remote = FakeRemote::default();
    let app = portal(&spawn(remote.router()).await);

    let response = post_form(
        &app,
        "/login",
        "email=ana%40colegio.com&password=secreta",
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");

    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 2);
    assert!(cookies[0].starts_with("aula_token=jwt-ana;"));
    assert!(cookies[1].starts_with("aula_user="));

    // Echo the cookies back like a browser and load the dashboard.
    let echoed: Vec<String> = cookies
        .iter()
        .map(|c| c.split(';').next().unwrap().to_string())
        .collect();
    let response = get_page(&app, "/dashboard", Some(&echoed.join("; "))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Ana"));
}

#[tokio::test]
async fn login_unverified_redirects_to_verification_without_cookies() {
    let remote = FakeRemote::default();
    let app = portal(&spawn(remote.router()).await);

    let response = post_form(
        &app,
        "/login",
        "email=nuevo%40colegio.com&password=loquesea",
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/verify-email?email=nuevo%40colegio.com");
    assert!(set_cookies(&response).is_empty(), "no session may persist");
}

#[tokio::test]
async fn login_failure_rerenders_with_the_api_message() {
    let remote = FakeRemote::default();
    let app = portal(&spawn(remote.router()).await);

    let response = post_form(
        &app,
        "/login",
        "email=ana%40colegio.com&password=incorrecta",
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookies(&response).is_empty());
    assert!(body_text(response).await.contains("Credenciales inválidas"));
}

// ---------------------------------------------------------------------------
// Registration and verification
// ---------------------------------------------------------------------------

#[tokio::test]
async fn register_success_redirects_to_verification_and_never_authenticates() {
    let remote = FakeRemote::default();
    let app = portal(&spawn(remote.router()).await);

    let response = post_form(
        &app,
        "/register",
        "name=Nuevo&email=nuevo%40colegio.com&password=secreta&confirm_password=secreta",
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/verify-email?email=nuevo%40colegio.com");
    assert!(set_cookies(&response).is_empty(), "registration never persists");
    assert_eq!(remote.hits(), vec!["POST /auth/register"]);
}

#[tokio::test]
async fn register_mismatched_passwords_fail_locally() {
    let remote = FakeRemote::default();
    let app = portal(&spawn(remote.router()).await);

    let response = post_form(
        &app,
        "/register",
        "name=Nuevo&email=nuevo%40colegio.com&password=secreta&confirm_password=distinta",
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Las contraseñas no coinciden"));
    assert!(remote.hits().is_empty(), "local validation must not hit the API");
}

#[tokio::test]
async fn register_short_password_fails_locally() {
    let remote = FakeRemote::default();
    let app = portal(&spawn(remote.router()).await);

    let response = post_form(
        &app,
        "/register",
        "name=Nuevo&email=nuevo%40colegio.com&password=abc&confirm_password=abc",
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response)
        .await
        .contains("La contraseña debe tener al menos 6 caracteres"));
    assert!(remote.hits().is_empty());
}

#[tokio::test]
async fn verify_email_success_authenticates() {
    let remote = FakeRemote::default();
    let app = portal(&spawn(remote.router()).await);

    let response = post_form(
        &app,
        "/verify-email",
        "email=nuevo%40colegio.com&code=123456",
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
    let cookies = set_cookies(&response);
    assert!(cookies[0].starts_with("aula_token=jwt-verified;"));
}

#[tokio::test]
async fn verify_email_wrong_code_rerenders_with_error() {
    let remote = FakeRemote::default();
    let app = portal(&spawn(remote.router()).await);

    let response = post_form(
        &app,
        "/verify-email",
        "email=nuevo%40colegio.com&code=000000",
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookies(&response).is_empty());
    assert!(body_text(response).await.contains("Código incorrecto"));
}

// ---------------------------------------------------------------------------
// Logout
// ---------------------------------------------------------------------------

#[tokio::test]
async fn logout_clears_both_cookies_unconditionally() {
    let remote = FakeRemote::default();
    let app = portal(&spawn(remote.router()).await);

    let response = post_form(&app, "/logout", "", Some(&cookie_pair("student"))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 2);
    for cookie in &cookies {
        assert!(cookie.contains("Max-Age=0"), "got {}", cookie);
    }
    assert!(remote.hits().is_empty(), "logout is local");
}

// ---------------------------------------------------------------------------
// Catalog and enrollment
// ---------------------------------------------------------------------------

#[tokio::test]
async fn catalog_filters_by_category() {
    let remote = FakeRemote::default();
    let app = portal(&spawn(remote.router()).await);

    let response = get_page(&app, "/courses?category=art", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Pintura"));
    assert!(!body.contains("Robótica"));
}

#[tokio::test]
async fn catalog_renders_the_outage_instead_of_failing() {
    let app = portal(&spawn(broken_remote()).await);

    let response = get_page(&app, "/courses", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Mantenimiento programado"));
}

#[tokio::test]
async fn enroll_requires_a_session() {
    let remote = FakeRemote::default();
    let app = portal(&spawn(remote.router()).await);

    let response = post_form(&app, "/courses/c1/enroll", "", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    assert!(remote.hits().is_empty());
}

#[tokio::test]
async fn enroll_redirect_keeps_the_active_filters() {
    let remote = FakeRemote::default();
    let app = portal(&spawn(remote.router()).await);

    let response = post_form(
        &app,
        "/courses/c1/enroll",
        "category=tech&search=rob",
        Some(&cookie_pair("student")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = location(&response);
    assert!(location.starts_with("/courses?category=tech&search=rob&message="));
    assert_eq!(remote.hits(), vec!["POST /enrollments"]);
}

// ---------------------------------------------------------------------------
// Management views
// ---------------------------------------------------------------------------

#[tokio::test]
async fn manage_contacts_is_admin_only() {
    let remote = FakeRemote::default();
    let app = portal(&spawn(remote.router()).await);

    let response = get_page(&app, "/manage-contacts", Some(&cookie_pair("teacher"))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
    assert!(remote.hits().is_empty());
}

#[tokio::test]
async fn contact_status_update_keeps_the_filter() {
    let remote = FakeRemote::default();
    let app = portal(&spawn(remote.router()).await);

    let response = post_form(
        &app,
        "/manage-contacts/m1/status",
        "status=resolved&filter=pending",
        Some(&cookie_pair("admin")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = location(&response);
    assert!(location.starts_with("/manage-contacts?status=pending&message="));
    assert_eq!(remote.hits(), vec!["PUT /contact/m1"]);
}

#[tokio::test]
async fn manage_users_renders_access_denied_for_students() {
    let remote = FakeRemote::default();
    let app = portal(&spawn(remote.router()).await);

    let response = get_page(&app, "/admin/users", Some(&cookie_pair("student"))).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(body_text(response).await.contains("Acceso denegado"));
    assert!(remote.hits().is_empty(), "denied view must not list users");
}

#[tokio::test]
async fn manage_users_lists_accounts_for_admins() {
    let remote = FakeRemote::default();
    let app = portal(&spawn(remote.router()).await);

    let response = get_page(&app, "/admin/users", Some(&cookie_pair("admin"))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Luis"));
    assert_eq!(remote.hits(), vec!["GET /users"]);
}

#[tokio::test]
async fn manage_courses_redirects_students_to_the_dashboard() {
    let remote = FakeRemote::default();
    let app = portal(&spawn(remote.router()).await);

    let response = get_page(&app, "/manage-courses", Some(&cookie_pair("student"))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
    assert!(remote.hits().is_empty());
}
