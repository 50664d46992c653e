//! Request plumbing shared by the Radarr and Sonarr clients.

use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::ArrService;
use super::error::ArrError;

const API_KEY_HEADER: &str = "X-API-Key";

/// Base client for an arr service's v3 API.
///
/// Holds no connection state of its own: the shared [`Client`] is expected to
/// be built without idle pooling, so each call opens a fresh connection.
#[derive(Debug, Clone)]
pub struct ArrClient {
    http: Client,
    service: ArrService,
    uri: String,
    api_key: String,
}

impl ArrClient {
    pub fn new(
        http: Client,
        service: ArrService,
        uri: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            service,
            uri: uri.into(),
            api_key: api_key.into(),
        }
    }

    /// True when the uri or api key is missing.
    pub fn disabled(&self) -> bool {
        self.uri.trim().is_empty() || self.api_key.trim().is_empty()
    }

    /// Radarr and Sonarr both serve their API under `/api/v3`.
    fn base_url(&self) -> String {
        format!("{}/api/v3", self.uri.trim_end_matches('/'))
    }

    /// Perform a request against `{base_url}/{path}` without a body.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Value, ArrError> {
        let url = self.endpoint(path, query)?;
        let builder = self.http.request(method.clone(), url.clone());
        self.send(builder, method, url).await
    }

    /// Perform a request against `{base_url}/{path}` with a JSON body.
    pub async fn request_json<B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: &B,
    ) -> Result<Value, ArrError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path, query)?;
        let builder = self.http.request(method.clone(), url.clone()).json(body);
        self.send(builder, method, url).await
    }

    /// Probe `{uri}/api` to check the uri and api key are accepted.
    pub async fn ping(&self) -> Result<Value, ArrError> {
        if self.disabled() {
            return Err(ArrError::Disabled {
                service: self.service,
            });
        }
        let url = parse_url(&format!("{}/api", self.uri.trim_end_matches('/')))?;
        let builder = self.http.get(url.clone());
        self.send(builder, Method::GET, url).await
    }

    /// Decode a response value into a model, treating `null` as absent.
    pub(crate) fn decode<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        value: Value,
    ) -> Result<Option<T>, ArrError> {
        if value.is_null() {
            return Ok(None);
        }
        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| ArrError::Decode {
                method,
                url: format!("{}/{}", self.base_url(), path),
                message: e.to_string(),
            })
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, ArrError> {
        if self.disabled() {
            return Err(ArrError::Disabled {
                service: self.service,
            });
        }
        let mut url = parse_url(&format!("{}/{}", self.base_url(), path))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    async fn send(
        &self,
        builder: RequestBuilder,
        method: Method,
        url: Url,
    ) -> Result<Value, ArrError> {
        debug!(service = %self.service, %method, %url, "Performing request");

        let response = builder
            .header(API_KEY_HEADER, &self.api_key)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        debug!(
            service = %self.service,
            url = %response.url(),
            status = response.status().as_u16(),
            "Response received"
        );

        read_json(response, method, url).await
    }
}

fn parse_url(raw: &str) -> Result<Url, ArrError> {
    Url::parse(raw).map_err(|source| ArrError::InvalidUrl {
        url: raw.to_string(),
        source,
    })
}

/// Map a response to JSON: non-2xx is a response error, an empty body is
/// `null`, anything else must parse as JSON.
async fn read_json(response: Response, method: Method, url: Url) -> Result<Value, ArrError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ArrError::Response {
            method,
            url: url.to_string(),
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        });
    }

    let body = response.bytes().await?;
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    serde_json::from_slice(&body).map_err(|e| ArrError::Decode {
        method,
        url: url.to_string(),
        message: e.to_string(),
    })
}
