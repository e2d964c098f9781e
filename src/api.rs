// src/api.rs

pub mod cache;

use std::time::Duration;

use axum::http::{
    header::{CACHE_CONTROL, COOKIE, ORIGIN, SET_COOKIE},
    HeaderMap, HeaderValue,
};
use reqwest::{Client, Method, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::common::error::{ServiceError, ServiceResult};

pub use cache::{tags, TagCache};

// ---
// Per-call options
// ---

/// Raw `Cookie` header of the visitor, relayed to the backend so it can
/// identify the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForwardedCookies(pub Option<String>);

impl ForwardedCookies {
    pub fn none() -> Self {
        Self(None)
    }

    pub fn from_headers(headers: &HeaderMap) -> Self {
        let joined = headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect::<Vec<_>>()
            .join("; ");
        Self((!joined.is_empty()).then_some(joined))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheMode {
    NoStore,
    /// `revalidate: None` uses the window configured on the client.
    Cached { revalidate: Option<Duration> },
}

impl CacheMode {
    pub fn cached() -> Self {
        CacheMode::Cached { revalidate: None }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FetchOptions {
    pub mode: CacheMode,
    pub tags: &'static [&'static str],
}

impl FetchOptions {
    pub fn new(mode: CacheMode, tags: &'static [&'static str]) -> Self {
        Self { mode, tags }
    }

    pub fn no_store() -> Self {
        Self {
            mode: CacheMode::NoStore,
            tags: &[],
        }
    }
}

/// Detail endpoints answer either `{ "data": T }` or a bare `T`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(value) => value,
        }
    }
}

/// Body and `Set-Cookie` headers of an auth service answer.
#[derive(Debug, Clone)]
pub struct AuthReply {
    pub body: Value,
    pub set_cookies: Vec<HeaderValue>,
}

// ---
// Client
// ---

/// HTTP access to the REST backend and the auth service.
///
/// Every call is a single attempt. Failures come back as `ServiceError`,
/// never as a panic.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    api_url: String,
    auth_url: String,
    /// Public URL of the storefront, sent as `Origin` on auth service writes.
    origin: String,
    cache: TagCache,
    default_revalidate: Option<Duration>,
}

impl ApiClient {
    pub fn new(
        http: Client,
        api_url: &str,
        auth_url: &str,
        origin: &str,
        cache: TagCache,
        default_revalidate: Option<Duration>,
    ) -> Self {
        Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            auth_url: auth_url.trim_end_matches('/').to_string(),
            origin: origin.trim_end_matches('/').to_string(),
            cache,
            default_revalidate,
        }
    }

    /// GET `{API_URL}{path}`. Query pairs without a value are left out.
    pub async fn get<T: DeserializeOwned>(
        &self,
        action: &'static str,
        path: &str,
        query: &[(&str, Option<String>)],
        cookies: &ForwardedCookies,
        options: FetchOptions,
    ) -> ServiceResult<T> {
        let pairs: Vec<(&str, &str)> = query
            .iter()
            .filter_map(|(key, value)| {
                value
                    .as_deref()
                    .filter(|v| !v.is_empty())
                    .map(|v| (*key, v))
            })
            .collect();

        let mut builder = self
            .http
            .get(format!("{}{}", self.api_url, path))
            .query(&pairs);
        if let Some(hint) = self.cache_hint(options.mode) {
            builder = builder.header(CACHE_CONTROL, hint);
        }
        if let Some(cookie) = &cookies.0 {
            builder = builder.header(COOKIE, cookie);
        }
        let request = builder.build().map_err(|source| transport(action, source))?;

        let key = request.url().to_string();
        let window = match options.mode {
            CacheMode::Cached { revalidate } if cookies.is_empty() => {
                Some(revalidate.or(self.default_revalidate))
            }
            _ => None,
        };

        if window.is_some() {
            if let Some(hit) = self.cache.get(&key).await {
                tracing::debug!(url = %key, "cache hit");
                return decode(action, hit);
            }
        }

        tracing::debug!(url = %key, "GET");
        let response = self
            .http
            .execute(request)
            .await
            .map_err(|source| transport(action, source))?;
        let body = read_json(action, response).await?;

        if let Some(revalidate) = window {
            self.cache
                .insert(key, body.clone(), options.tags, revalidate)
                .await;
        }
        decode(action, body)
    }

    /// POST or PATCH a JSON body to `{API_URL}{path}` and decode the answer.
    pub async fn send<B, T>(
        &self,
        action: &'static str,
        method: Method,
        path: &str,
        cookies: &ForwardedCookies,
        body: &B,
    ) -> ServiceResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.api_url, path);
        tracing::debug!(%url, %method, "sending");
        let mut builder = self.http.request(method, url).json(body);
        if let Some(cookie) = &cookies.0 {
            builder = builder.header(COOKIE, cookie);
        }
        let response = builder
            .send()
            .await
            .map_err(|source| transport(action, source))?;
        decode(action, read_json(action, response).await?)
    }

    pub async fn delete(
        &self,
        action: &'static str,
        path: &str,
        cookies: &ForwardedCookies,
    ) -> ServiceResult<()> {
        let url = format!("{}{}", self.api_url, path);
        tracing::debug!(%url, "DELETE");
        let mut builder = self.http.delete(url);
        if let Some(cookie) = &cookies.0 {
            builder = builder.header(COOKIE, cookie);
        }
        let response = builder
            .send()
            .await
            .map_err(|source| transport(action, source))?;
        read_json(action, response).await.map(|_| ())
    }

    /// GET `{AUTH_URL}{path}`; never cached.
    pub async fn auth_get<T: DeserializeOwned>(
        &self,
        action: &'static str,
        path: &str,
        cookies: &ForwardedCookies,
    ) -> ServiceResult<T> {
        let mut builder = self
            .http
            .get(format!("{}{}", self.auth_url, path))
            .header(CACHE_CONTROL, "no-store");
        if let Some(cookie) = &cookies.0 {
            builder = builder.header(COOKIE, cookie);
        }
        let response = builder
            .send()
            .await
            .map_err(|source| transport(action, source))?;
        decode(action, read_json(action, response).await?)
    }

    /// POST to `{AUTH_URL}{path}`, keeping the `Set-Cookie` headers of the answer.
    /// The auth service only sets session cookies for requests from a trusted origin.
    pub async fn auth_post<B: Serialize + ?Sized>(
        &self,
        action: &'static str,
        path: &str,
        cookies: &ForwardedCookies,
        body: &B,
    ) -> ServiceResult<AuthReply> {
        let mut builder = self
            .http
            .post(format!("{}{}", self.auth_url, path))
            .header(ORIGIN, &self.origin)
            .json(body);
        if let Some(cookie) = &cookies.0 {
            builder = builder.header(COOKIE, cookie);
        }
        let response = builder
            .send()
            .await
            .map_err(|source| transport(action, source))?;
        let set_cookies = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .cloned()
            .collect();
        let body = read_json(action, response).await?;
        Ok(AuthReply { body, set_cookies })
    }

    fn cache_hint(&self, mode: CacheMode) -> Option<String> {
        match mode {
            CacheMode::NoStore => Some("no-store".to_string()),
            CacheMode::Cached { revalidate } => revalidate
                .or(self.default_revalidate)
                .map(|window| format!("max-age={}", window.as_secs())),
        }
    }
}

fn transport(action: &'static str, source: reqwest::Error) -> ServiceError {
    tracing::warn!("Failed to {}: {}", action, source);
    ServiceError::Transport { action, source }
}

/// Turns a response into JSON, mapping non-2xx answers to `ServiceError::Status`.
/// An empty body reads as `null`.
async fn read_json(action: &'static str, response: Response) -> ServiceResult<Value> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::error!("Failed to {}: {} {}", action, status, body);
        return Err(ServiceError::Status {
            action,
            status: status.as_u16(),
            body,
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|source| transport(action, source))?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(&bytes).map_err(|e| ServiceError::Decode {
        action,
        detail: e.to_string(),
    })
}

fn decode<T: DeserializeOwned>(action: &'static str, value: Value) -> ServiceResult<T> {
    serde_json::from_value(value).map_err(|e| {
        tracing::error!("Failed to {}: unexpected response: {}", action, e);
        ServiceError::Decode {
            action,
            detail: e.to_string(),
        }
    })
}
