//! Byte-level access to the remote document.
//!
//! [`DocumentTransport`] is the seam between [`super::RemoteStore`] and the
//! network. [`HttpDocumentTransport`] talks to a JSON document store over
//! HTTP; tests substitute the in-memory transport from
//! [`crate::test_support`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    Client, StatusCode,
    header::{CONTENT_TYPE, HeaderValue},
};

use super::error::{Operation, RemoteStoreError, TransportBuildError};

/// Default user agent for document store requests.
pub const DEFAULT_USER_AGENT: &str = "firepath-sync/0.1";

/// Header carrying the store's access key.
pub const MASTER_KEY_HEADER: &str = "X-Master-Key";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Whole-document reads and writes against a remote store.
///
/// Implementations perform exactly one request per call and never retry.
#[async_trait]
pub trait DocumentTransport: Send + Sync {
    /// Fetch the current document body.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteStoreError::Network`] or
    /// [`RemoteStoreError::HttpStatus`] when the read fails.
    async fn get_document(&self) -> Result<Vec<u8>, RemoteStoreError>;

    /// Replace the document with `body`.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteStoreError::Network`] or
    /// [`RemoteStoreError::HttpStatus`] when the write is not accepted.
    async fn put_document(&self, body: Vec<u8>) -> Result<(), RemoteStoreError>;
}

#[async_trait]
impl<T: DocumentTransport + ?Sized> DocumentTransport for std::sync::Arc<T> {
    async fn get_document(&self) -> Result<Vec<u8>, RemoteStoreError> {
        (**self).get_document().await
    }

    async fn put_document(&self, body: Vec<u8>) -> Result<(), RemoteStoreError> {
        (**self).put_document(body).await
    }
}

/// Configuration for [`HttpDocumentTransport`].
#[derive(Clone)]
pub struct HttpDocumentTransportConfig {
    /// Full URL of the document resource.
    pub resource_url: String,
    /// Access key sent in the [`MASTER_KEY_HEADER`] header.
    pub master_key: String,
    /// Connect and request timeout.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl std::fmt::Debug for HttpDocumentTransportConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpDocumentTransportConfig")
            .field("resource_url", &self.resource_url)
            .field("master_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl HttpDocumentTransportConfig {
    /// Create a configuration for `resource_url` authenticated by `master_key`.
    #[must_use]
    pub fn new(resource_url: impl Into<String>, master_key: impl Into<String>) -> Self {
        Self {
            resource_url: resource_url.into(),
            master_key: master_key.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// JSON document store client speaking plain `GET`/`PUT`.
///
/// Both requests carry the master key header; `PUT` also sends
/// `Content-Type: application/json`. Any non-2xx answer is reported as
/// [`RemoteStoreError::HttpStatus`].
#[derive(Debug)]
pub struct HttpDocumentTransport {
    client: Client,
    config: HttpDocumentTransportConfig,
    master_key: HeaderValue,
}

impl HttpDocumentTransport {
    /// Create a transport with the default timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not a valid header value or the HTTP
    /// client fails to build.
    pub fn new(
        resource_url: impl Into<String>,
        master_key: impl Into<String>,
    ) -> Result<Self, TransportBuildError> {
        Self::with_config(HttpDocumentTransportConfig::new(resource_url, master_key))
    }

    /// Create a transport with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not a valid header value or the HTTP
    /// client fails to build.
    pub fn with_config(config: HttpDocumentTransportConfig) -> Result<Self, TransportBuildError> {
        let mut master_key = HeaderValue::from_str(&config.master_key)
            .map_err(|_| TransportBuildError::InvalidMasterKey)?;
        master_key.set_sensitive(true);
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(TransportBuildError::HttpClient)?;
        Ok(Self {
            client,
            config,
            master_key,
        })
    }

    fn url(&self) -> &str {
        &self.config.resource_url
    }

    fn check_status(&self, operation: Operation, status: StatusCode) -> Result<(), RemoteStoreError> {
        if status.is_success() {
            return Ok(());
        }
        log::warn!("{operation} {} answered {status}", self.url());
        Err(RemoteStoreError::HttpStatus {
            url: self.url().to_owned(),
            operation,
            status: status.as_u16(),
        })
    }

    /// Convert a reqwest error to a `RemoteStoreError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error) -> RemoteStoreError {
        let message = if error.is_timeout() {
            format!("request timed out after {}s", self.config.timeout.as_secs())
        } else {
            error.to_string()
        };
        RemoteStoreError::Network {
            url: self.url().to_owned(),
            message,
        }
    }
}

#[async_trait]
impl DocumentTransport for HttpDocumentTransport {
    async fn get_document(&self) -> Result<Vec<u8>, RemoteStoreError> {
        let response = self
            .client
            .get(self.url())
            .header(MASTER_KEY_HEADER, self.master_key.clone())
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err))?;
        self.check_status(Operation::Fetch, response.status())?;
        let body = response
            .bytes()
            .await
            .map_err(|err| self.convert_reqwest_error(&err))?;
        Ok(body.to_vec())
    }

    async fn put_document(&self, body: Vec<u8>) -> Result<(), RemoteStoreError> {
        let response = self
            .client
            .put(self.url())
            .header(MASTER_KEY_HEADER, self.master_key.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err))?;
        self.check_status(Operation::Replace, response.status())
    }
}
