//! URL cleanup applied before every request and to attachment URLs.

use percent_encoding::percent_decode_str;
use tracing::{debug, warn};
use url::Url;

use super::config::EndpointConfig;

/// Rewrites URLs according to the deployment configuration.
///
/// Servers behind a reverse proxy often advertise links with the wrong scheme
/// or an internal host name; the normalizer forces the configured ones and
/// resolves relative hrefs against the server root.
#[derive(Debug, Clone)]
pub struct UrlSchemeNormalizer {
  base: Option<Url>,
  scheme: Option<String>,
  host: Option<String>,
  media: Option<String>,
}

impl UrlSchemeNormalizer {
  pub fn new(config: &EndpointConfig) -> Self {
    let base = match Url::parse(&format!("{}/", config.base_url.trim_end_matches('/'))) {
      Ok(base) => Some(base),
      Err(err) => {
        warn!("Invalid base URL {}: {err}", config.base_url);
        None
      }
    };

    Self {
      base,
      scheme: config.url_scheme.clone().filter(|s| !s.is_empty()),
      host: config.url_host.clone().filter(|h| !h.is_empty()),
      media: config.media.clone().filter(|m| !m.is_empty()),
    }
  }

  /// Force the configured scheme and host onto an absolute URL.
  ///
  /// Relative URLs and URLs that cannot be parsed are returned unchanged.
  pub fn update_url_scheme(&self, url: &str) -> String {
    match Url::parse(url) {
      Ok(mut parsed) => {
        self.apply_scheme_and_host(&mut parsed);
        parsed.to_string()
      }
      Err(_) => url.to_string(),
    }
  }

  /// Prepare an href for a request: trim, percent-decode, resolve against the
  /// base URL, force scheme/host and add the `media` query parameter.
  ///
  /// # Returns
  /// `None` when the href is blank or cannot be turned into an absolute URL.
  pub fn clean_url(&self, url: &str) -> Option<String> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
      return None;
    }

    let decoded = percent_decode_str(trimmed).decode_utf8_lossy();
    let parsed = match Url::parse(&decoded) {
      Ok(parsed) => Ok(parsed),
      Err(url::ParseError::RelativeUrlWithoutBase) => match &self.base {
        Some(base) => base.join(&decoded),
        None => Err(url::ParseError::RelativeUrlWithoutBase),
      },
      Err(err) => Err(err),
    };

    let mut parsed = match parsed {
      Ok(parsed) => parsed,
      Err(err) => {
        warn!("Unable to build a request URL from '{trimmed}': {err}");
        return None;
      }
    };

    self.apply_scheme_and_host(&mut parsed);

    if let Some(media) = &self.media
      && !parsed.query_pairs().any(|(key, _)| key == "media")
    {
      parsed.query_pairs_mut().append_pair("media", media);
    }

    debug!("Cleaned URL {trimmed} -> {parsed}");
    Some(parsed.to_string())
  }

  fn apply_scheme_and_host(&self, url: &mut Url) {
    if let Some(scheme) = &self.scheme
      && url.scheme() != scheme
      && url.set_scheme(scheme).is_err()
    {
      warn!("Cannot switch {url} to scheme {scheme}");
    }

    if let Some(host) = &self.host
      && let Err(err) = url.set_host(Some(host))
    {
      warn!("Cannot switch {url} to host {host}: {err}");
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn normalizer(scheme: Option<&str>, host: Option<&str>, media: Option<&str>) -> UrlSchemeNormalizer {
    UrlSchemeNormalizer::new(&EndpointConfig {
      url_scheme: scheme.map(str::to_string),
      url_host: host.map(str::to_string),
      media: media.map(str::to_string),
      ..EndpointConfig::new("https://wiki.example.org")
    })
  }

  #[test]
  fn update_url_scheme_rewrites_scheme_and_host() {
    let normalizer = normalizer(Some("https"), Some("public.example.org"), None);
    assert_eq!(
      normalizer.update_url_scheme("http://internal:8080/bin/download/Main/WebHome/logo.png"),
      "https://public.example.org:8080/bin/download/Main/WebHome/logo.png"
    );
  }

  #[test]
  fn update_url_scheme_leaves_relative_urls() {
    let normalizer = normalizer(Some("https"), None, None);
    assert_eq!(
      normalizer.update_url_scheme("/bin/download/Main/WebHome/logo.png"),
      "/bin/download/Main/WebHome/logo.png"
    );
  }

  #[test]
  fn update_url_scheme_without_configuration_is_identity() {
    let normalizer = normalizer(None, None, None);
    assert_eq!(
      normalizer.update_url_scheme("http://wiki.example.org/a"),
      "http://wiki.example.org/a"
    );
  }

  #[test]
  fn clean_url_resolves_relative_hrefs() {
    let normalizer = normalizer(None, None, None);
    assert_eq!(
      normalizer.clean_url("  /prop/1 ").as_deref(),
      Some("https://wiki.example.org/prop/1")
    );
  }

  #[test]
  fn clean_url_decodes_and_adds_media() {
    let normalizer = normalizer(None, None, Some("json"));
    assert_eq!(
      normalizer.clean_url("https://wiki.example.org/rest/wikis/xwiki/spaces/My%20Space/pages").as_deref(),
      Some("https://wiki.example.org/rest/wikis/xwiki/spaces/My%20Space/pages?media=json")
    );
  }

  #[test]
  fn clean_url_keeps_existing_media() {
    let normalizer = normalizer(None, None, Some("json"));
    assert_eq!(
      normalizer.clean_url("https://wiki.example.org/rest?media=xml").as_deref(),
      Some("https://wiki.example.org/rest?media=xml")
    );
  }

  #[test]
  fn clean_url_rejects_blank() {
    let normalizer = normalizer(None, None, None);
    assert_eq!(normalizer.clean_url("   "), None);
  }
}
