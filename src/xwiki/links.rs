//! Relation-based URL discovery over hypermedia link lists.

use std::fmt;

use tracing::warn;

use super::models::Link;

/// Prefix XWiki uses for every relation URI it advertises.
pub const REL_PREFIX: &str = "http://www.xwiki.org/rel/";

/// Link relations the client follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rel {
  Wikis,
  Spaces,
  Pages,
  Page,
  Objects,
  Object,
  Properties,
  Property,
  Attachments,
}

impl Rel {
  /// Bare relation name, without the XWiki URI prefix.
  pub fn name(self) -> &'static str {
    match self {
      Self::Wikis => "wikis",
      Self::Spaces => "spaces",
      Self::Pages => "pages",
      Self::Page => "page",
      Self::Objects => "objects",
      Self::Object => "object",
      Self::Properties => "properties",
      Self::Property => "property",
      Self::Attachments => "attachments",
    }
  }

  /// Full relation URI as advertised by the server.
  pub fn uri(self) -> String {
    format!("{REL_PREFIX}{}", self.name())
  }

  /// Whether a link's `rel` value designates this relation. Both the full URI
  /// and the bare name are accepted; nothing else is.
  pub fn matches(self, rel: &str) -> bool {
    rel == self.name() || rel.strip_prefix(REL_PREFIX) == Some(self.name())
  }
}

impl fmt::Display for Rel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// Link entry that cannot be inspected.
#[derive(Debug, thiserror::Error)]
#[error("link entry {index} has no relation")]
struct MalformedLink {
  index: usize,
}

/// Find the URL for `rel` in `links`.
///
/// The scan covers the whole list and the last matching entry wins. An empty
/// list or a missing relation yields `None`. A malformed entry (no `rel`)
/// aborts the scan with a warning and also yields `None`.
pub fn resolve(links: &[Link], rel: Rel) -> Option<&str> {
  match scan(links, rel) {
    Ok(href) => href,
    Err(err) => {
      warn!("Exception while retrieving 'href' from link {rel}: {err}");
      None
    }
  }
}

fn scan(links: &[Link], rel: Rel) -> Result<Option<&str>, MalformedLink> {
  let mut href = None;
  for (index, link) in links.iter().enumerate() {
    let name = link.rel.as_deref().ok_or(MalformedLink { index })?;
    if rel.matches(name) {
      href = link.href.as_deref();
    }
  }
  Ok(href)
}
