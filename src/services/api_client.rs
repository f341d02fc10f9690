use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use crate::auth::credentials::CredentialSource;
use crate::error::{Error, Result};

pub const GENERIC_FAILURE: &str = "Request failed";

pub enum RequestBody {
    Empty,
    Json(JsonValue),
    Multipart(Form),
}

pub struct RequestOptions {
    pub method: Method,
    pub body: RequestBody,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::get()
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self {
            method: Method::GET,
            body: RequestBody::Empty,
        }
    }

    pub fn post_json<T: Serialize + ?Sized>(body: &T) -> Result<Self> {
        Ok(Self {
            method: Method::POST,
            body: RequestBody::Json(serde_json::to_value(body)?),
        })
    }

    pub fn post_multipart(form: Form) -> Self {
        Self {
            method: Method::POST,
            body: RequestBody::Multipart(form),
        }
    }

    fn is_multipart(&self) -> bool {
        matches!(self.body, RequestBody::Multipart(_))
    }
}

/// Thin wrapper over the careers API: builds requests, normalizes errors,
/// decodes JSON.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    pub async fn fetch_public<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T> {
        let url = self.url(endpoint);
        debug!(method = %options.method, %url, "Public request");

        let builder = self.client.request(options.method, &url);
        let response = attach_body(builder, options.body).send().await?;
        decode_response(endpoint, response).await
    }

    pub async fn fetch_with_auth<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        credentials: &dyn CredentialSource,
        options: RequestOptions,
    ) -> Result<T> {
        let token = credentials.bearer_token().await?;
        let url = self.url(endpoint);
        debug!(method = %options.method, %url, "Authenticated request");

        let mut builder = self
            .client
            .request(options.method.clone(), &url)
            .bearer_auth(token);
        // multipart needs the transport to pick the boundary
        if !options.is_multipart() {
            builder = builder.header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        let response = attach_body(builder, options.body).send().await?;
        decode_response(endpoint, response).await
    }
}

fn attach_body(builder: RequestBuilder, body: RequestBody) -> RequestBuilder {
    match body {
        RequestBody::Empty => builder,
        RequestBody::Json(value) => builder.json(&value),
        RequestBody::Multipart(form) => builder.multipart(form),
    }
}

async fn decode_response<T: DeserializeOwned>(endpoint: &str, response: Response) -> Result<T> {
    let status = response.status();
    let bytes = response.bytes().await?;

    if !status.is_success() {
        let message = extract_error_detail(&bytes).unwrap_or_else(|| GENERIC_FAILURE.to_string());
        warn!(%endpoint, status = status.as_u16(), %message, "Request failed");
        return Err(Error::Request {
            status: status.as_u16(),
            message,
        });
    }

    Ok(serde_json::from_slice(&bytes)?)
}

/// Reads the `detail` field of an error body. FastAPI validation errors carry
/// a list there, in which case the first `msg` is used.
pub fn extract_error_detail(body: &[u8]) -> Option<String> {
    let value: JsonValue = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        JsonValue::String(s) if !s.trim().is_empty() => Some(s.clone()),
        JsonValue::Array(items) => items
            .first()
            .and_then(|item| item.get("msg"))
            .and_then(|msg| msg.as_str())
            .map(str::to_string),
        _ => None,
    }
}
