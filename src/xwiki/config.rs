//! Endpoint configuration and the URL templates derived from it.

/// Static configuration describing which server and wiki to talk to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
  /// Server root, e.g. `https://wiki.example.org`.
  pub base_url: String,
  /// Path of the REST entry point relative to `base_url`.
  pub api_entrypoint: String,
  /// Name of the wiki every endpoint targets.
  pub wiki: String,
  /// Space holding user and group pages.
  pub users_space: String,
  /// Class of the objects carrying user profile properties.
  pub users_class_name: String,
  /// Search query used to list group pages.
  pub groups_query: String,
  /// Page names containing this marker are group templates, not groups.
  pub group_template_marker: String,
  /// Namespace prefix stripped from group member references.
  pub user_prefix: String,
  /// Page (relative to `base_url`) that renders the current user's groups.
  pub current_user_groups_path: String,
  /// Scheme forced onto every request and attachment URL.
  pub url_scheme: Option<String>,
  /// Host forced onto every request and attachment URL.
  pub url_host: Option<String>,
  /// Value of the `media` query parameter added to requests.
  pub media: Option<String>,
  /// Request timeout in seconds.
  pub timeout_secs: u64,
}

impl EndpointConfig {
  /// Configuration for `base_url` with XWiki's stock defaults.
  pub fn new(base_url: impl Into<String>) -> Self {
    Self {
      base_url: base_url.into().trim_end_matches('/').to_string(),
      ..Self::default()
    }
  }
}

impl Default for EndpointConfig {
  fn default() -> Self {
    Self {
      base_url: "http://localhost:8080".to_string(),
      api_entrypoint: "/rest".to_string(),
      wiki: "xwiki".to_string(),
      users_space: "XWiki".to_string(),
      users_class_name: "XWiki.XWikiUsers".to_string(),
      groups_query: "Group".to_string(),
      group_template_marker: "XWikiGroupTemplate".to_string(),
      user_prefix: "XWiki.".to_string(),
      current_user_groups_path: "bin/view/XWiki/CurrentUserGroups".to_string(),
      url_scheme: None,
      url_host: None,
      media: Some("json".to_string()),
      timeout_secs: 30,
    }
  }
}

/// Builds absolute endpoint URLs from an [`EndpointConfig`].
#[derive(Debug, Clone)]
pub struct ResourcePaths {
  base_url: String,
  api_url: String,
  wiki: String,
  users_space: String,
  groups_query: String,
  current_user_groups_path: String,
}

impl ResourcePaths {
  pub fn new(config: &EndpointConfig) -> Self {
    let base_url = config.base_url.trim_end_matches('/').to_string();
    let entrypoint = config.api_entrypoint.trim_matches('/');
    let api_url = if entrypoint.is_empty() {
      base_url.clone()
    } else {
      format!("{base_url}/{entrypoint}")
    };

    Self {
      base_url,
      api_url,
      wiki: config.wiki.clone(),
      users_space: config.users_space.clone(),
      groups_query: config.groups_query.clone(),
      current_user_groups_path: config.current_user_groups_path.trim_start_matches('/').to_string(),
    }
  }

  /// REST entry point (root resource).
  pub fn api_entry_point(&self) -> &str {
    &self.api_url
  }

  /// Page listing of a space.
  pub fn pages_endpoint(&self, space: &str) -> String {
    format!("{}/wikis/{}/spaces/{space}/pages", self.api_url, self.wiki)
  }

  /// A single page.
  pub fn page_endpoint(&self, space: &str, name: &str) -> String {
    format!("{}/{name}", self.pages_endpoint(space))
  }

  /// Page of a user.
  pub fn user_endpoint(&self, username: &str) -> String {
    self.page_endpoint(&self.users_space, username)
  }

  /// Search listing every group page.
  pub fn groups_endpoint(&self) -> String {
    format!(
      "{}/wikis/{}/spaces/{}/search?q={}&scope=name",
      self.api_url, self.wiki, self.users_space, self.groups_query
    )
  }

  /// Objects of a group page; one member object per user.
  pub fn group_users_endpoint(&self, group: &str) -> String {
    format!("{}/objects", self.page_endpoint(&self.users_space, group))
  }

  /// Rendered page listing the groups of the authenticated user.
  pub fn current_user_groups_endpoint(&self) -> String {
    format!("{}/{}", self.base_url, self.current_user_groups_path)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn paths() -> ResourcePaths {
    ResourcePaths::new(&EndpointConfig::new("https://wiki.example.org/"))
  }

  #[test]
  fn new_trims_trailing_slash() {
    assert_eq!(EndpointConfig::new("https://wiki.example.org/").base_url, "https://wiki.example.org");
  }

  #[test]
  fn entry_point_joins_base_and_entrypoint() {
    assert_eq!(paths().api_entry_point(), "https://wiki.example.org/rest");

    let config = EndpointConfig {
      api_entrypoint: String::new(),
      ..EndpointConfig::new("https://wiki.example.org")
    };
    assert_eq!(ResourcePaths::new(&config).api_entry_point(), "https://wiki.example.org");
  }

  #[test]
  fn page_endpoints() {
    let paths = paths();
    assert_eq!(
      paths.pages_endpoint("Main"),
      "https://wiki.example.org/rest/wikis/xwiki/spaces/Main/pages"
    );
    assert_eq!(
      paths.page_endpoint("Main", "WebHome"),
      "https://wiki.example.org/rest/wikis/xwiki/spaces/Main/pages/WebHome"
    );
    assert_eq!(
      paths.user_endpoint("alice"),
      "https://wiki.example.org/rest/wikis/xwiki/spaces/XWiki/pages/alice"
    );
  }

  #[test]
  fn group_endpoints() {
    let paths = paths();
    assert_eq!(
      paths.groups_endpoint(),
      "https://wiki.example.org/rest/wikis/xwiki/spaces/XWiki/search?q=Group&scope=name"
    );
    assert_eq!(
      paths.group_users_endpoint("SiteEditor"),
      "https://wiki.example.org/rest/wikis/xwiki/spaces/XWiki/pages/SiteEditor/objects"
    );
    assert_eq!(
      paths.current_user_groups_endpoint(),
      "https://wiki.example.org/bin/view/XWiki/CurrentUserGroups"
    );
  }
}
