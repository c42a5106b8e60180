//! Domain-level facade over the resource mapper.

use std::sync::Arc;

use reqwest::StatusCode;
use tracing::{debug, info, warn};

use super::config::{EndpointConfig, ResourcePaths};
use super::login::parse_groups;
use super::mapper::{PropertyMap, ResourceMapper};
use super::models::{Attachment, Page, Pages};
use super::transport::{Authenticator, Credential, HttpTransport, Transport, TransportError};
use super::url::UrlSchemeNormalizer;

/// Failure to construct a [`WikiClient`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
  /// The configured wiki is not advertised by the server.
  #[error("The targeted wiki {0} does not exist")]
  WikiNotFound(String),

  /// The HTTP transport could not be built.
  #[error(transparent)]
  Transport(#[from] TransportError),
}

/// Login failure. Callers usually only show [`LoginError::message`]; the
/// variant tells whether the server was reached at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
  /// The request failed or the server answered with a non-2xx status. Holds
  /// the status reason phrase, or `Login error` when there is none.
  #[error("{0}")]
  RequestFailed(String),

  /// The groups page was served but holds no readable group list.
  #[error("Groups parsing error")]
  GroupsParsing,
}

impl LoginError {
  fn request(message: impl Into<String>) -> Self {
    Self::RequestFailed(message.into())
  }

  /// Human-readable reason.
  pub fn message(&self) -> String {
    self.to_string()
  }
}

/// XWiki client bound to one wiki.
#[derive(Clone)]
pub struct WikiClient {
  config: EndpointConfig,
  paths: ResourcePaths,
  mapper: ResourceMapper,
  authenticator: Arc<dyn Authenticator>,
}

impl WikiClient {
  /// Connect over HTTP using `config`.
  ///
  /// # Errors
  /// Returns an error if the HTTP client cannot be built or the configured
  /// wiki does not exist on the server.
  pub async fn from_config(config: EndpointConfig) -> Result<Self, ClientError> {
    let transport = Arc::new(HttpTransport::new(config.timeout_secs)?);
    Self::connect(config, transport.clone(), transport).await
  }

  /// Connect through the given collaborators.
  ///
  /// The server's entry point is queried to check that the configured wiki
  /// exists; nothing else is fetched.
  ///
  /// # Errors
  /// Returns [`ClientError::WikiNotFound`] if the wiki name is blank or not
  /// advertised by the server.
  pub async fn connect(
    config: EndpointConfig,
    transport: Arc<dyn Transport>,
    authenticator: Arc<dyn Authenticator>,
  ) -> Result<Self, ClientError> {
    let paths = ResourcePaths::new(&config);
    let mapper = ResourceMapper::new(transport, UrlSchemeNormalizer::new(&config));

    if config.wiki.trim().is_empty() || !mapper.wiki_exists(paths.api_entry_point(), &config.wiki).await {
      return Err(ClientError::WikiNotFound(config.wiki));
    }
    info!("Connected to wiki {} at {}", config.wiki, paths.api_entry_point());

    Ok(Self {
      config,
      paths,
      mapper,
      authenticator,
    })
  }

  pub fn config(&self) -> &EndpointConfig {
    &self.config
  }

  pub fn paths(&self) -> &ResourcePaths {
    &self.paths
  }

  pub fn mapper(&self) -> &ResourceMapper {
    &self.mapper
  }

  /// Page `name` of `space`.
  pub async fn get_page(&self, space: &str, name: &str) -> Option<Page> {
    self.mapper.map_page(&self.paths.page_endpoint(space, name)).await
  }

  /// Summaries of the pages of `space`.
  pub async fn get_pages(&self, space: &str) -> Option<Pages> {
    self.mapper.map_pages(&self.paths.pages_endpoint(space)).await
  }

  /// Every page of `space` in full, with attachments and objects attached.
  /// Never fails; pages that could not be fetched are missing from the list.
  pub async fn get_pages_list(&self, space: &str) -> Vec<Page> {
    self.mapper.pages_with_details(&self.paths.pages_endpoint(space)).await
  }

  /// Properties of page `name` in `space`.
  pub async fn get_properties(&self, space: &str, name: &str) -> PropertyMap {
    match self.get_page(space, name).await {
      Some(page) => self.mapper.page_properties(&page).await,
      None => PropertyMap::new(),
    }
  }

  /// Properties of an already fetched page.
  pub async fn get_page_properties(&self, page: &Page) -> PropertyMap {
    self.mapper.page_properties(page).await
  }

  /// Names of every group page, template excluded.
  pub async fn get_groups_name(&self) -> Vec<String> {
    self
      .mapper
      .group_names(&self.paths.groups_endpoint(), &self.config.group_template_marker)
      .await
  }

  /// User names of the members of `group`.
  pub async fn get_group_users(&self, group: &str) -> Vec<String> {
    self
      .mapper
      .group_members(&self.paths.group_users_endpoint(group), &self.config.user_prefix)
      .await
  }

  /// Profile page of `username`.
  pub async fn get_user(&self, username: &str) -> Option<Page> {
    self.mapper.map_page(&self.paths.user_endpoint(username)).await
  }

  /// Profile properties of a user page.
  pub async fn get_user_properties(&self, user: &Page) -> PropertyMap {
    self.mapper.user_properties(user, &self.config.users_class_name).await
  }

  /// Attachments of `page`, empty when there are none.
  pub async fn get_attachments(&self, page: &Page) -> Vec<Attachment> {
    self.mapper.get_attachment_list(page).await
  }

  /// Download URL of `attachment`.
  pub fn get_attachment_url(&self, attachment: &Attachment) -> Option<String> {
    self.mapper.attachment_url(attachment)
  }

  /// Content of the attachment at `url`.
  pub async fn download_attachment(&self, url: &str) -> Option<Vec<u8>> {
    self.mapper.download_attachment(url).await
  }

  /// Log in as `username` and return the groups the user belongs to.
  ///
  /// # Errors
  /// Returns a [`LoginError`] when the request fails, the server answers with
  /// a non-2xx status, or the groups page cannot be read.
  pub async fn login(&self, username: &str, password: &str) -> Result<Vec<String>, LoginError> {
    let endpoint = self.paths.current_user_groups_endpoint();
    let Some(url) = self.mapper.normalizer().clean_url(&endpoint) else {
      warn!("Invalid login endpoint {endpoint}");
      return Err(LoginError::request("Login error"));
    };
    info!("request xwiki server with endpoint {url}");

    let credential = Credential::new(username, password);
    let response = match self.authenticator.get_with_credentials(&url, &credential).await {
      Ok(response) => response,
      Err(err) => {
        warn!("Exception while trying to reach endpoint {url}: {err}");
        return Err(LoginError::request("Login error"));
      }
    };

    match response.status {
      200..=299 => {}
      400..=499 => {
        warn!("Client error - uri:{url} - status:{}", response.status);
        return Err(LoginError::request(status_text(response.status)));
      }
      500..=599 => {
        warn!("Server error - uri:{url} - status:{}", response.status);
        return Err(LoginError::request(status_text(response.status)));
      }
      status => {
        warn!("Unexpected response status - uri:{url} - status:{status}");
        return Err(LoginError::request("Login error"));
      }
    }

    match parse_groups(&response.body) {
      Ok(groups) => {
        debug!("Groups retrieved in html: {groups:?}");
        Ok(groups)
      }
      Err(err) => {
        warn!("Exception while searching groups in html response: {err}");
        debug!("Unparsable groups response: {}", response.body);
        Err(LoginError::GroupsParsing)
      }
    }
  }
}

fn status_text(status: u16) -> String {
  StatusCode::from_u16(status)
    .ok()
    .and_then(|code| code.canonical_reason())
    .map_or_else(|| format!("HTTP {status}"), str::to_string)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn status_text_uses_reason_phrase() {
    assert_eq!(status_text(401), "Unauthorized");
    assert_eq!(status_text(503), "Service Unavailable");
    assert_eq!(status_text(499), "HTTP 499");
  }
}
