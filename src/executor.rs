/// Request executor for the Purrr.love API.
///
/// Every SDK call funnels through [`Executor::execute`]: it builds the HTTP
/// request, attaches the credential header, sends exactly one request with
/// reqwest and classifies the response into a [`ResponseEnvelope`] or a
/// [`PurrrError`]. No retries happen at this layer.
use std::fmt;

use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, RETRY_AFTER};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use url::Url;

use crate::config::{normalize_base_url, ClientConfig, API_KEY_HEADER};
use crate::errors::{Details, PurrrError, DEFAULT_RETRY_AFTER_SECS, UNKNOWN_ERROR_MESSAGE};

/// Longest body excerpt kept on an `InvalidResponse` error.
const BODY_SNIPPET_LEN: usize = 500;

/// HTTP verbs the API accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Ordered query-string parameters. Repeated keys are kept, so list values
/// serialize as `metrics=a&metrics=b`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, key: &str, value: impl ToString) -> Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    pub fn push_opt(self, key: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.push(key, value),
            None => self,
        }
    }

    pub fn push_all<I, V>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        for value in values {
            self.pairs.push((key.to_string(), value.to_string()));
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }
}

impl<K: ToString, V: ToString> FromIterator<(K, V)> for QueryParams {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

/// A decoded success response.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    status: u16,
    body: Value,
}

impl ResponseEnvelope {
    /// An envelope for a response without a body; its body is `{}`.
    pub fn empty(status: u16) -> Self {
        Self {
            status,
            body: Value::Object(Map::new()),
        }
    }

    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn into_body(self) -> Value {
        self.body
    }

    /// True when the body is `{}`.
    pub fn is_empty(&self) -> bool {
        self.body.as_object().is_some_and(Map::is_empty)
    }

    /// The `data` field of the body, if present.
    pub fn data(&self) -> Option<&Value> {
        self.body.get("data")
    }

    /// The `data` payload, or `{}` when the body carries none.
    pub fn into_payload(self) -> Value {
        match self.body {
            Value::Object(mut map) => map
                .remove("data")
                .unwrap_or_else(|| Value::Object(Map::new())),
            _ => Value::Object(Map::new()),
        }
    }

    /// Decode the `data` payload into `T`. A missing `data` field is an error.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, PurrrError> {
        let status = self.status;
        let data = match self.body {
            Value::Object(mut map) => map.remove("data"),
            _ => None,
        };
        let data = data.ok_or_else(|| {
            PurrrError::invalid_response(
                Some(status),
                "Invalid response from server: missing data field",
                "",
            )
        })?;
        decode_value(status, data)
    }

    /// Decode a list payload. A missing or null `data` field is an empty list.
    pub fn decode_list<T: DeserializeOwned>(self) -> Result<Vec<T>, PurrrError> {
        let status = self.status;
        match self.body {
            Value::Object(mut map) => match map.remove("data") {
                None | Some(Value::Null) => Ok(Vec::new()),
                Some(data) => decode_value(status, data),
            },
            _ => Ok(Vec::new()),
        }
    }
}

fn decode_value<T: DeserializeOwned>(status: u16, value: Value) -> Result<T, PurrrError> {
    serde_json::from_value::<T>(value.clone()).map_err(|e| {
        debug!(
            "executor.decode failed target_type={} error={}",
            std::any::type_name::<T>(),
            e
        );
        PurrrError::from(e).with_response(status, snippet(&value.to_string()))
    })
}

/// Sends requests to the Purrr.love API and classifies the responses.
///
/// Cloning is cheap and clones share reqwest's connection pool, so one
/// executor can serve any number of concurrent tasks.
#[derive(Debug, Clone)]
pub struct Executor {
    client: Client,
    base_url: String,
    credential: Option<HeaderValue>,
    config: ClientConfig,
}

impl Executor {
    /// Build an executor. Fails with a `Configuration` error on an invalid
    /// base URL, user agent or credential.
    pub fn new(config: ClientConfig) -> Result<Self, PurrrError> {
        let base_url = normalize_base_url(&config.base_url);
        Url::parse(&base_url).map_err(|e| {
            PurrrError::configuration(format!("invalid URL {base_url:?}: {e}"), Some("base_url"))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut builder = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            PurrrError::configuration(format!("failed to build HTTP client: {e}"), None)
        })?;

        let credential = config
            .api_key
            .as_deref()
            .map(credential_header)
            .transpose()?;

        debug!(
            "executor.new base_url={} authenticated={} timeout={:?}",
            base_url,
            credential.is_some(),
            config.timeout
        );

        Ok(Self {
            config: ClientConfig {
                base_url: base_url.clone(),
                ..config
            },
            client,
            base_url,
            credential,
        })
    }

    /// Replace the credential attached to every subsequent request.
    pub fn authenticate(&mut self, api_key: &str) -> Result<(), PurrrError> {
        self.credential = Some(credential_header(api_key)?);
        self.config.api_key = Some(api_key.to_string());
        debug!("executor.authenticate credential_replaced=true");
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Issue one request and classify the response.
    ///
    /// `path` is appended verbatim to the base URL. `body` is sent as JSON,
    /// `query` as the URL query string.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        query: Option<&QueryParams>,
    ) -> Result<ResponseEnvelope, PurrrError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(
            "executor.execute method={} path={} has_body={} query_pairs={}",
            method,
            path,
            body.is_some(),
            query.map_or(0, QueryParams::len)
        );

        let mut request = self.client.request(method.into(), &url);
        if let Some(credential) = &self.credential {
            request = request.header(API_KEY_HEADER, credential.clone());
        }
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            request = request.query(query.pairs());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            debug!(
                "executor.execute transport_error method={} path={} error={}",
                method, path, e
            );
            PurrrError::network(e)
        })?;

        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let bytes = response.bytes().await.map_err(|e| {
            debug!("executor.execute body_read_error status={} error={}", status, e);
            PurrrError::network(e)
        })?;

        debug!(
            "executor.execute response method={} path={} status={} body_len={}",
            method,
            path,
            status,
            bytes.len()
        );
        classify_response(status, retry_after.as_deref(), &bytes)
    }

    pub async fn get(
        &self,
        path: &str,
        query: Option<&QueryParams>,
    ) -> Result<ResponseEnvelope, PurrrError> {
        self.execute(Method::Get, path, None, query).await
    }

    pub async fn post(
        &self,
        path: &str,
        body: Option<&Value>,
    ) -> Result<ResponseEnvelope, PurrrError> {
        self.execute(Method::Post, path, body, None).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> Result<ResponseEnvelope, PurrrError> {
        self.execute(Method::Put, path, Some(body), None).await
    }

    pub async fn delete(&self, path: &str) -> Result<ResponseEnvelope, PurrrError> {
        self.execute(Method::Delete, path, None, None).await
    }
}

fn credential_header(api_key: &str) -> Result<HeaderValue, PurrrError> {
    let mut value = HeaderValue::from_str(api_key).map_err(|_| {
        PurrrError::configuration("not a valid header value", Some("api_key"))
    })?;
    value.set_sensitive(true);
    Ok(value)
}

/// Classify a raw HTTP response.
///
/// - 429: `RateLimit` with the `Retry-After` hint (see [`parse_retry_after`]).
/// - 401: `Authentication`, whatever the body says.
/// - other >= 400: `Api` with the status and `error.message` from the body,
///   or [`UNKNOWN_ERROR_MESSAGE`] when the body has none or is not JSON.
/// - anything else: the JSON body, or an empty envelope for an empty body.
pub fn classify_response(
    status: u16,
    retry_after: Option<&str>,
    body: &[u8],
) -> Result<ResponseEnvelope, PurrrError> {
    match status {
        429 => Err(PurrrError::rate_limit(parse_retry_after(retry_after))),
        401 => Err(PurrrError::authentication()),
        s if s >= 400 => Err(api_error(s, body)),
        _ => decode_success(status, body),
    }
}

/// Seconds from a `Retry-After` header. Absent or non-numeric values
/// (including HTTP dates) give [`DEFAULT_RETRY_AFTER_SECS`].
pub fn parse_retry_after(value: Option<&str>) -> u64 {
    value
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

fn api_error(status: u16, body: &[u8]) -> PurrrError {
    let parsed: Option<Value> = serde_json::from_slice(body).ok();
    let error = parsed.as_ref().and_then(|v| v.get("error"));
    let message = error
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_ERROR_MESSAGE)
        .to_string();
    let details: Details = error
        .and_then(|e| e.get("details"))
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();
    debug!(
        "executor.classify api_error status={} message={}",
        status, message
    );
    PurrrError::Api {
        status,
        message,
        details,
    }
}

fn decode_success(status: u16, body: &[u8]) -> Result<ResponseEnvelope, PurrrError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ResponseEnvelope::empty(status));
    }
    serde_json::from_slice::<Value>(body)
        .map(|value| ResponseEnvelope::new(status, value))
        .map_err(|e| {
            let excerpt = snippet(&String::from_utf8_lossy(body));
            PurrrError::from(e).with_response(status, excerpt)
        })
}

fn snippet(text: &str) -> String {
    match text.char_indices().nth(BODY_SNIPPET_LEN) {
        Some((idx, _)) => format!("{}...[truncated]", &text[..idx]),
        None => text.to_string(),
    }
}
