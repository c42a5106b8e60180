//! HTTP transport used by the resource mapper.
//!
//! The mapper only issues GET requests and treats every failure the same way:
//! a transport yields a status and a body, or a [`TransportError`].

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

/// Response returned by a [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response<T> {
  /// HTTP status code.
  pub status: u16,
  /// Response payload.
  pub body: T,
}

impl<T> Response<T> {
  /// Build a `200 OK` response.
  pub fn ok(body: T) -> Self {
    Self { status: 200, body }
  }

  /// Whether the status is in the 2xx range.
  pub fn is_success(&self) -> bool {
    (200..300).contains(&self.status)
  }
}

/// Failure to obtain any response at all.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
  /// The HTTP client could not be constructed.
  #[error("failed to create HTTP client: {0}")]
  Client(#[source] reqwest::Error),

  /// Network failure, timeout, TLS error...
  #[error("request to {url} failed: {source}")]
  Request {
    url: String,
    #[source]
    source: reqwest::Error,
  },

  /// The response body could not be read.
  #[error("failed to read response body from {url}: {source}")]
  Body {
    url: String,
    #[source]
    source: reqwest::Error,
  },

  /// Failure reported by a non-HTTP transport (tests, custom backends).
  #[error("{0}")]
  Other(String),
}

/// Username/password pair used for Basic authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
  pub username: String,
  pub password: String,
}

impl Credential {
  pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
    Self {
      username: username.into(),
      password: password.into(),
    }
  }

  /// `Authorization` header value for Basic authentication.
  pub fn basic_auth_header(&self) -> String {
    let credentials = format!("{}:{}", self.username, self.password);
    format!("Basic {}", BASE64.encode(credentials.as_bytes()))
  }
}

/// Executes anonymous GET requests.
#[async_trait]
pub trait Transport: Send + Sync {
  /// Fetch `url` and return its body as text.
  async fn get(&self, url: &str) -> Result<Response<String>, TransportError>;

  /// Fetch `url` and return its raw bytes (attachment content).
  async fn get_binary(&self, url: &str) -> Result<Response<Vec<u8>>, TransportError>;
}

/// Executes GET requests on behalf of a user. Only used by login.
#[async_trait]
pub trait Authenticator: Send + Sync {
  /// Fetch `url` with Basic credentials and return its body as text.
  async fn get_with_credentials(&self, url: &str, credential: &Credential) -> Result<Response<String>, TransportError>;
}

/// `reqwest`-backed transport.
#[derive(Clone)]
pub struct HttpTransport {
  client: reqwest::Client,
}

impl HttpTransport {
  /// Create a transport with the given request timeout.
  ///
  /// # Errors
  /// Returns an error if the underlying `reqwest::Client` cannot be built.
  pub fn new(timeout_secs: u64) -> Result<Self, TransportError> {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(timeout_secs))
      .user_agent(format!(
        "xwiki-client/{} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("TARGET")
      ))
      .build()
      .map_err(TransportError::Client)?;

    Ok(Self { client })
  }

  async fn send(&self, url: &str, credential: Option<&Credential>) -> Result<reqwest::Response, TransportError> {
    let mut request = self.client.get(url).header("Accept", "application/json");
    if let Some(credential) = credential {
      request = request.header("Authorization", credential.basic_auth_header());
    }

    request.send().await.map_err(|source| TransportError::Request {
      url: url.to_string(),
      source,
    })
  }

  async fn text(url: &str, response: reqwest::Response) -> Result<Response<String>, TransportError> {
    let status = response.status();
    let body = response.text().await.map_err(|source| TransportError::Body {
      url: url.to_string(),
      source,
    })?;
    Ok(Response {
      status: status.as_u16(),
      body,
    })
  }
}

#[async_trait]
impl Transport for HttpTransport {
  async fn get(&self, url: &str) -> Result<Response<String>, TransportError> {
    let response = self.send(url, None).await?;
    Self::text(url, response).await
  }

  async fn get_binary(&self, url: &str) -> Result<Response<Vec<u8>>, TransportError> {
    let response = self.send(url, None).await?;
    let status = response.status();
    let bytes = response.bytes().await.map_err(|source| TransportError::Body {
      url: url.to_string(),
      source,
    })?;
    Ok(Response {
      status: status.as_u16(),
      body: bytes.to_vec(),
    })
  }
}

#[async_trait]
impl Authenticator for HttpTransport {
  async fn get_with_credentials(&self, url: &str, credential: &Credential) -> Result<Response<String>, TransportError> {
    let response = self.send(url, Some(credential)).await?;
    Self::text(url, response).await
  }
}
