//! HTTP client adapter
//!
//! Wraps outgoing requests to the remote academic API: joins paths onto the
//! configured base URL, attaches the bearer credential when a session
//! exists, and decodes the API's standard response envelope. Consumed by
//! every domain service module.
//!
//! Deliberately unconfigured: no request timeout (a hung remote call hangs
//! the initiating view's loading state) and no retry policy.

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Errors surfaced by remote API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Network/transport failure before a response was received
    #[error("No se pudo contactar al servidor: {0}")]
    Transport(#[from] reqwest::Error),

    /// Failure reported by the API itself (validation, auth, state)
    #[error("{message}")]
    Api {
        status: u16,
        /// Machine-readable code, e.g. `EMAIL_NOT_VERIFIED`
        code: Option<String>,
        message: String,
    },

    /// Response body did not match the expected shape
    #[error("Respuesta inválida del servidor: {0}")]
    Decode(String),
}

impl ApiError {
    /// Machine-readable code carried by an API-reported failure
    pub fn code(&self) -> Option<&str> {
        match self {
            ApiError::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    pub fn is_code(&self, expected: &str) -> bool {
        self.code() == Some(expected)
    }
}

/// Standard response envelope of the remote API.
///
/// A `code` may accompany `success: true` as a soft-fail signal (the login
/// flow's "email not verified" case), so callers that care inspect the
/// whole envelope instead of just `data`.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default = "none")]
    pub data: Option<T>,
}

fn none<T>() -> Option<T> {
    None
}

impl<T> Envelope<T> {
    /// Unwrap the payload, converting a `success: false` envelope into an
    /// [`ApiError::Api`].
    pub fn into_data(self) -> Result<T, ApiError> {
        if !self.success {
            return Err(ApiError::Api {
                status: StatusCode::OK.as_u16(),
                code: self.code,
                message: self
                    .message
                    .unwrap_or_else(|| "La operación no pudo completarse".to_string()),
            });
        }
        self.data
            .ok_or_else(|| ApiError::Decode("missing data field".to_string()))
    }

    /// Like [`Envelope::into_data`] but for operations whose payload the
    /// portal does not use (deletes, acknowledgements).
    pub fn into_ack(self) -> Result<(), ApiError> {
        if !self.success {
            return Err(ApiError::Api {
                status: StatusCode::OK.as_u16(),
                code: self.code,
                message: self
                    .message
                    .unwrap_or_else(|| "La operación no pudo completarse".to_string()),
            });
        }
        Ok(())
    }
}

/// Shared HTTP adapter for the remote academic API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the given base URL (e.g. `http://host/api`).
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn builder(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.http.request(method, url);
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<Envelope<T>, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Error bodies follow the same envelope shape; fall back to the
            // raw status line when they do not.
            let envelope: Option<Envelope<serde_json::Value>> = serde_json::from_str(&body).ok();
            let (code, message) = match envelope {
                Some(envelope) => (
                    envelope.code,
                    envelope
                        .message
                        .unwrap_or_else(|| format!("Error del servidor ({})", status.as_u16())),
                ),
                None => (None, format!("Error del servidor ({})", status.as_u16())),
            };
            return Err(ApiError::Api {
                status: status.as_u16(),
                code,
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// GET with optional query parameters
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        query: &[(&str, String)],
    ) -> Result<Envelope<T>, ApiError> {
        let mut builder = self.builder(Method::GET, path, token);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        self.send(builder).await
    }

    /// POST with a JSON body
    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &impl Serialize,
    ) -> Result<Envelope<T>, ApiError> {
        self.send(self.builder(Method::POST, path, token).json(body))
            .await
    }

    /// PUT with a JSON body
    pub async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &impl Serialize,
    ) -> Result<Envelope<T>, ApiError> {
        self.send(self.builder(Method::PUT, path, token).json(body))
            .await
    }

    /// DELETE
    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<Envelope<T>, ApiError> {
        self.send(self.builder(Method::DELETE, path, token)).await
    }
}
