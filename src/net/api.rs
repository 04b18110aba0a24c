//! Authenticated HTTP client bound to the configured API base URL.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`. Tests supply
//! their own `Transport` in place of the network.
//!
//! ERROR HANDLING
//! ==============
//! A transport resolves to `Ok` for ANY HTTP response it receives and
//! to `Err(ApiError::Network)` only when no response was produced.
//! `ApiClient` maps non-2xx statuses to `ApiError::Http` and runs the
//! unauthorized hook on every 401 before the caller sees the error.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;

/// HTTP methods used by the backend API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// A fully-prepared outgoing request.
#[derive(Clone, Debug)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

/// An HTTP response, whatever its status.
#[derive(Clone, Debug)]
pub struct ApiResponse {
    pub status: u16,
    pub status_text: String,
    pub body: Value,
}

/// Seam between the client and the network.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, req: ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// Request function bound to a base URL and a session token source.
///
/// The token source is read on every request; the client never owns
/// the token. The unauthorized hook fires on every 401 so session
/// invalidation happens in one place regardless of which store made
/// the call.
pub struct ApiClient<T: Transport> {
    base_url: String,
    transport: T,
    token_source: Rc<dyn Fn() -> Option<String>>,
    on_unauthorized: Rc<dyn Fn()>,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(
        base_url: String,
        transport: T,
        token_source: Rc<dyn Fn() -> Option<String>>,
        on_unauthorized: Rc<dyn Fn()>,
    ) -> Self {
        Self { base_url, transport, token_source, on_unauthorized }
    }

    /// Perform one request against `{base_url}{path}`.
    ///
    /// # Errors
    ///
    /// `ApiError::Network` when the request never completed,
    /// `ApiError::Http` for any non-2xx response.
    pub async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, ApiError> {
        log::debug!("{} {}", method.as_str(), path);

        let req = ApiRequest {
            method,
            url: format!("{}{}", self.base_url, path),
            bearer: (self.token_source)(),
            body,
        };
        let resp = self.transport.send(req).await?;

        if resp.status == 401 {
            (self.on_unauthorized)();
        }
        if (200..300).contains(&resp.status) {
            Ok(resp.body)
        } else {
            Err(http_error(resp))
        }
    }

    pub async fn get<D: DeserializeOwned>(&self, path: &str) -> Result<D, ApiError> {
        decode(self.request(Method::Get, path, None).await?)
    }

    pub async fn post<D: DeserializeOwned>(&self, path: &str, body: &impl Serialize) -> Result<D, ApiError> {
        decode(self.request(Method::Post, path, Some(encode(body)?)).await?)
    }

    /// POST without a body, for endpoints whose response shape does not
    /// matter (logout).
    pub async fn post_empty(&self, path: &str) -> Result<Value, ApiError> {
        self.request(Method::Post, path, None).await
    }

    pub async fn put<D: DeserializeOwned>(&self, path: &str, body: &impl Serialize) -> Result<D, ApiError> {
        decode(self.request(Method::Put, path, Some(encode(body)?)).await?)
    }

    /// DELETE; the backend answers with an empty body.
    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.request(Method::Delete, path, None).await
    }
}

fn encode(body: &impl Serialize) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn decode<D: DeserializeOwned>(body: Value) -> Result<D, ApiError> {
    serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Map a non-success response to `ApiError::Http`, preferring the
/// body's `message` field over the HTTP status text.
fn http_error(resp: ApiResponse) -> ApiError {
    let message = resp
        .body
        .get("message")
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| {
            if resp.status_text.is_empty() {
                format!("HTTP {}", resp.status)
            } else {
                resp.status_text.clone()
            }
        });
    ApiError::Http { status: resp.status, message, data: resp.body }
}

/// Browser transport on `gloo-net`.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

#[cfg(feature = "hydrate")]
impl Transport for GlooTransport {
    async fn send(&self, req: ApiRequest) -> Result<ApiResponse, ApiError> {
        use gloo_net::http::Request;

        let builder = match req.method {
            Method::Get => Request::get(&req.url),
            Method::Post => Request::post(&req.url),
            Method::Put => Request::put(&req.url),
            Method::Delete => Request::delete(&req.url),
        };
        let builder = match &req.bearer {
            Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
            None => builder,
        };

        let resp = match req.body {
            Some(body) => {
                builder
                    .json(&body)
                    .map_err(|e| ApiError::Network(e.to_string()))?
                    .send()
                    .await
            }
            None => builder.send().await,
        }
        .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = resp.status();
        let status_text = resp.status_text();
        // Logout and DELETE may answer with an empty body.
        let text = resp.text().await.unwrap_or_default();
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);

        Ok(ApiResponse { status, status_text, body })
    }
}
