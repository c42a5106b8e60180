//! Fake XWiki server for testing
//!
//! Serves canned responses keyed by URL without any network access, and
//! records every URL requested so tests can check how many fetches an
//! operation issued.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use url::Url;
use xwiki_client::xwiki::{
  Authenticator, Credential, EndpointConfig, Response, Transport, TransportError, WikiClient,
};

use crate::common::fixtures;

pub const BASE_URL: &str = "http://wiki.test";

#[derive(Debug, Clone)]
enum Reply {
  Body { status: u16, body: Vec<u8> },
  Failure(String),
}

/// A fake XWiki server answering from a route table
#[derive(Default)]
pub struct FakeXWiki {
  routes: HashMap<String, Reply>,
  accepted_login: Option<Credential>,
  requests: Mutex<Vec<String>>,
}

impl FakeXWiki {
  /// A server that only knows its entry point and wiki listing.
  pub fn new() -> Self {
    Self::default()
      .with_json(fixtures::API, fixtures::root_response())
      .with_json("/rest/wikis", fixtures::wikis_response())
  }

  /// A server populated with the sample pages, users and groups.
  pub fn with_sample_wiki() -> Self {
    Self::new()
      .with_json(fixtures::MAIN_PAGES, fixtures::main_pages_response())
      .with_json(fixtures::WEB_HOME, fixtures::web_home_response())
      .with_json(&format!("{}/objects", fixtures::WEB_HOME), fixtures::web_home_objects_response())
      .with_json(
        &format!("{}/objects/Main.DocumentClass/0/properties", fixtures::WEB_HOME),
        fixtures::web_home_properties_response(),
      )
      .with_json(
        &format!("{}/attachments", fixtures::WEB_HOME),
        fixtures::web_home_attachments_response(),
      )
      .with_binary(fixtures::LOGO_DOWNLOAD, b"\x89PNG")
      .with_status(fixtures::BROKEN, 500)
      .with_json(fixtures::SANDBOX, fixtures::sandbox_response())
      .with_json(&format!("{}/objects", fixtures::SANDBOX), fixtures::empty_objects_response())
      .with_json(
        &format!("{}/attachments", fixtures::SANDBOX),
        fixtures::empty_attachments_response(),
      )
      .with_json(fixtures::ALICE, fixtures::alice_response())
      .with_json(&format!("{}/objects", fixtures::ALICE), fixtures::alice_objects_response())
      .with_json(
        &format!("{}/objects/XWiki.XWikiRights/0/properties", fixtures::ALICE),
        fixtures::alice_rights_response(),
      )
      .with_json(
        &format!("{}/objects/XWiki.XWikiUsers/0/properties", fixtures::ALICE),
        fixtures::alice_profile_response(),
      )
      .with_json(fixtures::GROUP_SEARCH, fixtures::group_search_response())
      .with_json(fixtures::ADMIN_GROUP_OBJECTS, fixtures::admin_group_objects_response())
      .with_body(fixtures::CURRENT_USER_GROUPS, fixtures::current_user_groups_html())
      .accepting_login("alice", "secret")
  }

  /// Serve `json` at `path` (relative to the server) or at an absolute URL.
  pub fn with_json(self, path: &str, json: serde_json::Value) -> Self {
    self.with_body(path, &json.to_string())
  }

  pub fn with_body(self, path: &str, body: &str) -> Self {
    self.with_reply(path, Reply::Body {
      status: 200,
      body: body.as_bytes().to_vec(),
    })
  }

  pub fn with_binary(self, path: &str, bytes: &[u8]) -> Self {
    self.with_reply(path, Reply::Body {
      status: 200,
      body: bytes.to_vec(),
    })
  }

  /// Answer `path` with an empty body and the given status.
  pub fn with_status(self, path: &str, status: u16) -> Self {
    self.with_reply(path, Reply::Body { status, body: Vec::new() })
  }

  /// Fail every request to `path` before any response is received.
  pub fn with_failure(self, path: &str) -> Self {
    self.with_reply(path, Reply::Failure(format!("connection reset by {path}")))
  }

  /// Only these credentials are accepted by authenticated requests; others
  /// get a 401.
  pub fn accepting_login(mut self, username: &str, password: &str) -> Self {
    self.accepted_login = Some(Credential::new(username, password));
    self
  }

  fn with_reply(mut self, path: &str, reply: Reply) -> Self {
    self.routes.insert(route_key(&absolute(path)), reply);
    self
  }

  /// Every URL requested so far, in order.
  pub fn requests(&self) -> Vec<String> {
    self.requests.lock().map(|requests| requests.clone()).unwrap_or_default()
  }

  /// Number of requests made to `path`, ignoring the `media` parameter.
  pub fn request_count(&self, path: &str) -> usize {
    let key = route_key(&absolute(path));
    self.requests().iter().filter(|url| route_key(url) == key).count()
  }

  fn reply(&self, url: &str) -> Result<Response<Vec<u8>>, TransportError> {
    if let Ok(mut requests) = self.requests.lock() {
      requests.push(url.to_string());
    }

    match self.routes.get(&route_key(url)) {
      Some(Reply::Body { status, body }) => Ok(Response {
        status: *status,
        body: body.clone(),
      }),
      Some(Reply::Failure(message)) => Err(TransportError::Other(message.clone())),
      None => Ok(Response {
        status: 404,
        body: b"Not Found".to_vec(),
      }),
    }
  }
}

#[async_trait]
impl Transport for FakeXWiki {
  async fn get(&self, url: &str) -> Result<Response<String>, TransportError> {
    self.reply(url).map(|response| Response {
      status: response.status,
      body: String::from_utf8_lossy(&response.body).into_owned(),
    })
  }

  async fn get_binary(&self, url: &str) -> Result<Response<Vec<u8>>, TransportError> {
    self.reply(url)
  }
}

#[async_trait]
impl Authenticator for FakeXWiki {
  async fn get_with_credentials(&self, url: &str, credential: &Credential) -> Result<Response<String>, TransportError> {
    if self.accepted_login.as_ref().is_some_and(|accepted| accepted != credential) {
      if let Ok(mut requests) = self.requests.lock() {
        requests.push(url.to_string());
      }
      return Ok(Response {
        status: 401,
        body: "Unauthorized".to_string(),
      });
    }

    self.get(url).await
  }
}

/// Configuration pointing at the fake server.
pub fn config() -> EndpointConfig {
  EndpointConfig::new(BASE_URL)
}

/// Connect a client to `fake` with the default configuration.
pub async fn connect(fake: &Arc<FakeXWiki>) -> WikiClient {
  connect_with(fake, config()).await
}

pub async fn connect_with(fake: &Arc<FakeXWiki>, config: EndpointConfig) -> WikiClient {
  WikiClient::connect(config, fake.clone(), fake.clone())
    .await
    .expect("fake wiki should accept the connection")
}

fn absolute(path: &str) -> String {
  if path.contains("://") {
    path.to_string()
  } else {
    format!("{BASE_URL}{path}")
  }
}

/// Canonical form of a URL with the `media` query parameter removed.
fn route_key(url: &str) -> String {
  let Ok(mut parsed) = Url::parse(url) else {
    return url.to_string();
  };

  let pairs: Vec<(String, String)> = parsed
    .query_pairs()
    .filter(|(key, _)| key != "media")
    .map(|(key, value)| (key.into_owned(), value.into_owned()))
    .collect();

  if pairs.is_empty() {
    parsed.set_query(None);
  } else {
    parsed.query_pairs_mut().clear().extend_pairs(pairs);
  }

  parsed.to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn route_key_ignores_media() {
    assert_eq!(
      route_key("http://wiki.test/rest/a?q=Group&media=json&scope=name"),
      route_key("http://wiki.test/rest/a?q=Group&scope=name")
    );
    assert_eq!(route_key("http://wiki.test/rest?media=json"), "http://wiki.test/rest");
  }
}
