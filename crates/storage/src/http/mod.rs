//! REST backend speaking the practice server's JSON API.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use crate::repository::{Storage, StorageError};

mod analytics;
mod payload;
mod problems;
mod reviews;

/// Default address of a locally running practice server.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HttpInitError {
    #[error("invalid api url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("unsupported api url scheme: {0}")]
    UnsupportedScheme(String),
    #[error(transparent)]
    Client(#[from] reqwest::Error),
}

/// Validated base URL of the practice server.
///
/// The stored URL always ends with `/` so endpoint paths join beneath it
/// instead of replacing its last segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base: Url,
}

impl ApiConfig {
    /// Parse and validate a base URL.
    ///
    /// # Errors
    ///
    /// Returns `HttpInitError::InvalidUrl` if the text is not a URL, or
    /// `HttpInitError::UnsupportedScheme` for anything other than http(s).
    pub fn new(raw: &str) -> Result<Self, HttpInitError> {
        let mut base = Url::parse(raw.trim())?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(HttpInitError::UnsupportedScheme(base.scheme().to_owned()));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.set_query(None);
        base.set_fragment(None);
        Ok(Self { base })
    }

    #[must_use]
    pub fn base(&self) -> &Url {
        &self.base
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, StorageError> {
        self.base
            .join(path)
            .map_err(|e| StorageError::Connection(format!("invalid endpoint {path}: {e}")))
    }
}

/// Repository backed by the practice server.
#[derive(Clone)]
pub struct HttpRepository {
    client: Client,
    config: ApiConfig,
}

impl HttpRepository {
    /// Build a client for the given server.
    ///
    /// # Errors
    ///
    /// Returns `HttpInitError::Client` if the TLS backend cannot be initialised.
    pub fn new(config: ApiConfig) -> Result<Self, HttpInitError> {
        let client = Client::builder().build()?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        tracing::debug!(%method, %url, "api request");
        self.client.request(method, url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, StorageError> {
        let response = self
            .request(Method::GET, url)
            .send()
            .await
            .map_err(transport)?;
        read_json(response).await
    }

    async fn send_json<B, T>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<T, StorageError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(transport)?;
        read_json(response).await
    }

    /// Send a request whose response body is irrelevant.
    async fn send_unit<B>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<(), StorageError>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(transport)?;
        check_status(&response)
    }
}

fn transport(e: reqwest::Error) -> StorageError {
    StorageError::Connection(e.to_string())
}

fn check_status(response: &Response) -> Result<(), StorageError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    tracing::warn!(%status, url = %response.url(), "api request rejected");
    if status == StatusCode::NOT_FOUND {
        Err(StorageError::NotFound)
    } else {
        Err(StorageError::Status(status.as_u16()))
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, StorageError> {
    check_status(&response)?;
    let bytes = response.bytes().await.map_err(transport)?;
    serde_json::from_slice(&bytes).map_err(|e| StorageError::Serialization(e.to_string()))
}

impl Storage {
    /// Build a `Storage` talking to the practice server at `config`.
    ///
    /// # Errors
    ///
    /// Returns `HttpInitError` if the HTTP client cannot be built.
    pub fn http(config: ApiConfig) -> Result<Self, HttpInitError> {
        Ok(Self::from_backend(HttpRepository::new(config)?))
    }
}
