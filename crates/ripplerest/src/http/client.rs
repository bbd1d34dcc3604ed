/*
[INPUT]:  Gateway authority, scheme, idempotency token and transport options
[OUTPUT]: Configured reqwest client issuing envelope-checked API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing request/envelope handling
*/

use std::time::Duration;

use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::http::query::QueryParams;
use crate::http::resource::{ResourceIdGenerator, UuidGenerator};
use crate::http::{Result, RippleRestError};
use crate::types::Scheme;
use crate::types::models::decode;

/// Version prefix of the gateway's REST namespace
pub const API_VERSION: &str = "v1";

/// HTTP client configuration
///
/// Deserializable so host applications can embed it in their own config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Host (and optional port) of the gateway, e.g. `localhost:5990`
    pub netloc: String,
    #[serde(default)]
    pub scheme: Scheme,
    /// Initial idempotency token; a random one is generated when absent
    #[serde(default)]
    pub resource_id: Option<String>,
    /// Whole-request timeout in milliseconds. None keeps the transport default.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    #[serde(default)]
    pub connect_timeout_ms: Option<u64>,
}

impl ClientConfig {
    pub fn new(netloc: impl Into<String>) -> Self {
        Self {
            netloc: netloc.into(),
            scheme: Scheme::default(),
            resource_id: None,
            timeout_ms: None,
            connect_timeout_ms: None,
        }
    }

    /// Use `https` instead of `http`
    pub fn secure(mut self, secure: bool) -> Self {
        self.scheme = if secure { Scheme::Https } else { Scheme::Http };
        self
    }

    pub fn with_resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(whole_millis(timeout));
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout_ms = Some(whole_millis(timeout));
        self
    }

    fn http_client(&self) -> Result<Client> {
        let mut builder = Client::builder();
        if let Some(ms) = self.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        if let Some(ms) = self.connect_timeout_ms {
            builder = builder.connect_timeout(Duration::from_millis(ms));
        }
        Ok(builder.build()?)
    }
}

/// Millisecond form of a timeout; a nonzero duration never rounds to zero.
fn whole_millis(timeout: Duration) -> u64 {
    match u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX) {
        0 if !timeout.is_zero() => 1,
        ms => ms,
    }
}

/// One call against the gateway.
///
/// The HTTP method is always explicit; write requests carry a body and the
/// signing secret.
#[derive(Debug)]
pub(crate) struct ApiRequest<'a> {
    method: Method,
    path: String,
    absolute_path: bool,
    query: QueryParams,
    body: Option<Map<String, Value>>,
    secret: Option<&'a str>,
}

impl<'a> ApiRequest<'a> {
    pub(crate) fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            absolute_path: false,
            query: QueryParams::new(),
            body: None,
            secret: None,
        }
    }

    pub(crate) fn post(path: impl Into<String>, body: Map<String, Value>, secret: &'a str) -> Self {
        Self {
            method: Method::POST,
            body: Some(body),
            secret: Some(secret),
            ..Self::get(path)
        }
    }

    pub(crate) fn query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Skip the `/v1` prefix
    #[allow(dead_code)]
    pub(crate) fn absolute(mut self) -> Self {
        self.absolute_path = true;
        self
    }
}

/// Main HTTP client for the ripple-rest gateway
///
/// Holds the idempotency token attached to every write request. A token
/// covers a single payment: call [`RippleRestClient::reset_resource_id`]
/// before submitting a payment that must count as a new transaction.
#[derive(Debug)]
pub struct RippleRestClient {
    http_client: Client,
    base_url: Url,
    resource_id: String,
    generator: Box<dyn ResourceIdGenerator>,
}

impl RippleRestClient {
    /// Create a client for `netloc` over plain http
    pub fn new(netloc: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig::new(netloc))
    }

    /// Create a client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_generator(config, UuidGenerator)
    }

    /// Create a client drawing idempotency tokens from `generator`
    pub fn with_generator(
        config: ClientConfig,
        generator: impl ResourceIdGenerator + 'static,
    ) -> Result<Self> {
        let http_client = config.http_client()?;
        Self::with_http_client(config, http_client, generator)
    }

    /// Create a client on top of a preconfigured reqwest client
    pub fn with_http_client(
        config: ClientConfig,
        http_client: Client,
        generator: impl ResourceIdGenerator + 'static,
    ) -> Result<Self> {
        let base_url = base_url(config.scheme, &config.netloc)?;
        let resource_id = match config.resource_id {
            Some(id) if !id.is_empty() => id,
            _ => generator.next_id(),
        };

        Ok(Self {
            http_client,
            base_url,
            resource_id,
            generator: Box::new(generator),
        })
    }

    /// Current idempotency token
    pub fn resource_id(&self) -> &str {
        &self.resource_id
    }

    /// Replace the idempotency token with a freshly generated one
    pub fn reset_resource_id(&mut self) {
        self.resource_id = self.generator.next_id();
        debug!(resource_id = %self.resource_id, "client resource id reset");
    }

    /// Use `resource_id` as the idempotency token. An empty id behaves like
    /// [`RippleRestClient::reset_resource_id`].
    pub fn set_resource_id(&mut self, resource_id: impl Into<String>) {
        let resource_id = resource_id.into();
        if resource_id.is_empty() {
            self.reset_resource_id();
            return;
        }
        self.resource_id = resource_id;
        debug!(resource_id = %self.resource_id, "client resource id set");
    }

    pub fn scheme(&self) -> &str {
        self.base_url.scheme()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the full URL for a request
    pub(crate) fn request_url(&self, request: &ApiRequest<'_>) -> Result<Url> {
        let path = if request.absolute_path {
            format!("/{}", request.path.trim_start_matches('/'))
        } else {
            format!("/{API_VERSION}/{}", request.path.trim_start_matches('/'))
        };

        let mut url = self.base_url.clone();
        url.set_path(&path);
        url.set_query(request.query.encode().as_deref());
        Ok(url)
    }

    /// Issue a request and unwrap the gateway envelope
    ///
    /// Returns the envelope without its `success` field.
    pub(crate) async fn send(&self, request: ApiRequest<'_>) -> Result<Map<String, Value>> {
        let url = self.request_url(&request)?;
        debug!(method = %request.method, path = url.path(), "ripple-rest request");

        let mut builder = self.http_client.request(request.method, url);
        if let Some(mut body) = request.body {
            body.insert(
                "client_resource_id".to_string(),
                Value::String(self.resource_id.clone()),
            );
            body.insert(
                "secret".to_string(),
                request
                    .secret
                    .map_or(Value::Null, |secret| Value::String(secret.to_string())),
            );
            builder = builder.json(&body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "ripple-rest response");

        let result = unwrap_envelope(status, &body);
        if let Err(RippleRestError::Remote { message, .. }) = &result {
            debug!(status = status.as_u16(), reason = %message, "ripple-rest request failed");
        }
        result
    }

    /// Issue a request and decode the unwrapped envelope as `T`
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        response: &'static str,
        request: ApiRequest<'_>,
    ) -> Result<T> {
        let payload = self.send(request).await?;
        Ok(decode(response, Value::Object(payload))?)
    }
}

/// Serialize `value` as the top level of a request body
pub(crate) fn flat_body<T: Serialize>(value: &T) -> Result<Map<String, Value>> {
    match serde_json::to_value(value)? {
        Value::Object(body) => Ok(body),
        other => Err(RippleRestError::Config(format!(
            "request body must be a JSON object, got {other}"
        ))),
    }
}

/// Request body holding `value` under `key`
pub(crate) fn wrapped_body<T: Serialize>(key: &str, value: &T) -> Result<Map<String, Value>> {
    let mut body = Map::new();
    body.insert(key.to_string(), serde_json::to_value(value)?);
    Ok(body)
}

fn base_url(scheme: Scheme, netloc: &str) -> Result<Url> {
    if netloc.is_empty() || netloc.contains("://") || netloc.contains('/') {
        return Err(RippleRestError::Config(format!(
            "netloc must be a bare host[:port], got {netloc:?}"
        )));
    }
    let url = Url::parse(&format!("{scheme}://{netloc}"))?;
    if url.host_str().is_none() {
        return Err(RippleRestError::Config(format!("netloc {netloc:?} has no host")));
    }
    Ok(url)
}

/// Strip the `success` flag from a gateway envelope or turn it into an error
pub(crate) fn unwrap_envelope(status: StatusCode, body: &[u8]) -> Result<Map<String, Value>> {
    if !status.is_success() {
        let message = serde_json::from_slice::<Map<String, Value>>(body)
            .ok()
            .and_then(|envelope| envelope_message(&envelope));
        let message = message.unwrap_or_else(|| transport_message(status, body));
        return Err(RippleRestError::remote(Some(status), message));
    }

    let mut envelope: Map<String, Value> = serde_json::from_slice(body).map_err(|e| {
        RippleRestError::InvalidResponse(format!("expected a JSON object envelope: {e}"))
    })?;

    match envelope.remove("success") {
        Some(Value::Bool(true)) => Ok(envelope),
        Some(Value::Bool(false)) => {
            let message = envelope_message(&envelope)
                .unwrap_or_else(|| "request failed without a message".to_string());
            Err(RippleRestError::remote(Some(status), message))
        }
        _ => Err(RippleRestError::InvalidResponse(
            "envelope has no boolean `success` field".to_string(),
        )),
    }
}

fn envelope_message(envelope: &Map<String, Value>) -> Option<String> {
    ["message", "error"]
        .iter()
        .find_map(|key| envelope.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

fn transport_message(status: StatusCode, body: &[u8]) -> String {
    let raw = String::from_utf8_lossy(body);
    let raw = raw.trim();
    if raw.is_empty() {
        format!("HTTP {status}")
    } else {
        format!("HTTP {status}: {raw}")
    }
}
