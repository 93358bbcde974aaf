//! Session cookie codec
//!
//! The credential token travels in `aula_token` and the serialized user
//! profile in `aula_user` (URL-encoded JSON). A missing or malformed pair
//! reads as "no session" - the portal never errors on bad cookies, it just
//! treats the visitor as unauthenticated.

use axum::http::{header, HeaderMap, HeaderValue};

use crate::models::{Session, User};

/// Cookie holding the opaque credential token
pub const TOKEN_COOKIE: &str = "aula_token";
/// Cookie holding the URL-encoded JSON user profile
pub const PROFILE_COOKIE: &str = "aula_user";

/// Cookie attributes, taken from the session section of the config.
#[derive(Debug, Clone)]
pub struct CookieSettings {
    /// Max-Age in seconds
    pub max_age_seconds: i64,
    /// Whether to set the Secure attribute
    pub secure: bool,
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self {
            max_age_seconds: 7 * 24 * 60 * 60,
            secure: false,
        }
    }
}

/// Find a cookie value in the request's Cookie header.
fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    let cookie_header = headers.get(header::COOKIE)?.to_str().ok()?;
    for cookie in cookie_header.split(';') {
        let cookie = cookie.trim();
        if let Some(value) = cookie.strip_prefix(name) {
            if let Some(value) = value.strip_prefix('=') {
                return Some(value);
            }
        }
    }
    None
}

/// Read the persisted session from the request headers.
///
/// Returns `None` unless both cookies are present and the profile decodes
/// into a well-formed user record.
pub fn read_session(headers: &HeaderMap) -> Option<Session> {
    let token = cookie_value(headers, TOKEN_COOKIE)?;
    if token.is_empty() {
        return None;
    }
    let profile = cookie_value(headers, PROFILE_COOKIE)?;
    let profile = urlencoding::decode(profile).ok()?;
    let user: User = serde_json::from_str(&profile).ok()?;
    Some(Session::new(token, user))
}

fn attributes(settings: &CookieSettings, max_age: i64) -> String {
    let secure = if settings.secure { "; Secure" } else { "" };
    format!(
        "Path=/; HttpOnly; SameSite=Lax; Max-Age={}{}",
        max_age, secure
    )
}

/// Build the Set-Cookie values that persist a session.
pub fn set_cookies(session: &Session, settings: &CookieSettings) -> [HeaderValue; 2] {
    let attrs = attributes(settings, settings.max_age_seconds);
    let profile = serde_json::to_string(&session.user).unwrap_or_default();
    let token_cookie = format!("{}={}; {}", TOKEN_COOKIE, session.token, attrs);
    let profile_cookie = format!(
        "{}={}; {}",
        PROFILE_COOKIE,
        urlencoding::encode(&profile),
        attrs
    );
    [
        HeaderValue::from_str(&token_cookie)
            .unwrap_or_else(|_| HeaderValue::from_static("")),
        HeaderValue::from_str(&profile_cookie)
            .unwrap_or_else(|_| HeaderValue::from_static("")),
    ]
}

/// Build the Set-Cookie values that clear a session unconditionally.
pub fn clear_cookies(settings: &CookieSettings) -> [HeaderValue; 2] {
    let attrs = attributes(settings, 0);
    [
        HeaderValue::from_str(&format!("{}=; {}", TOKEN_COOKIE, attrs))
            .unwrap_or_else(|_| HeaderValue::from_static("")),
        HeaderValue::from_str(&format!("{}=; {}", PROFILE_COOKIE, attrs))
            .unwrap_or_else(|_| HeaderValue::from_static("")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn sample_session() -> Session {
        let user: User = serde_json::from_value(serde_json::json!({
            "_id": "u1",
            "name": "Ana María",
            "email": "ana@colegio.com",
            "role": "teacher",
            "isVerified": true
        }))
        .unwrap();
        Session::new("tok-123", user)
    }

    fn headers_from_set_cookies(cookies: &[HeaderValue; 2]) -> HeaderMap {
        // Simulate the browser echoing the cookies back: strip attributes,
        // join with "; ".
        let pairs: Vec<String> = cookies
            .iter()
            .map(|c| {
                c.to_str()
                    .unwrap()
                    .split(';')
                    .next()
                    .unwrap()
                    .to_string()
            })
            .collect();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&pairs.join("; ")).unwrap(),
        );
        headers
    }

    #[test]
    fn test_session_cookie_round_trip() {
        let session = sample_session();
        let cookies = set_cookies(&session, &CookieSettings::default());
        let headers = headers_from_set_cookies(&cookies);

        let restored = read_session(&headers).expect("session should round-trip");
        assert_eq!(restored.token, "tok-123");
        assert_eq!(restored.user.name, "Ana María");
        assert_eq!(restored.role(), Role::Teacher);
    }

    #[test]
    fn test_read_session_requires_both_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("aula_token=tok-123"),
        );
        assert!(read_session(&headers).is_none());
    }

    #[test]
    fn test_malformed_profile_reads_as_no_session() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("aula_token=tok; aula_user=%7Bnot-json"),
        );
        assert!(read_session(&headers).is_none());
    }

    #[test]
    fn test_empty_token_reads_as_no_session() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("aula_token=; aula_user=%7B%7D"),
        );
        assert!(read_session(&headers).is_none());
    }

    #[test]
    fn test_no_cookie_header() {
        assert!(read_session(&HeaderMap::new()).is_none());
    }

    #[test]
    fn test_clear_cookies_expire_immediately() {
        let cookies = clear_cookies(&CookieSettings::default());
        for cookie in &cookies {
            let value = cookie.to_str().unwrap();
            assert!(value.contains("Max-Age=0"), "got {}", value);
        }
    }

    #[test]
    fn test_secure_attribute_follows_settings() {
        let settings = CookieSettings {
            secure: true,
            ..CookieSettings::default()
        };
        let cookies = set_cookies(&sample_session(), &settings);
        assert!(cookies[0].to_str().unwrap().ends_with("; Secure"));
    }
}
