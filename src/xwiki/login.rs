//! Extraction of the current user's groups from the rendered groups page.
//!
//! The page renders the group list as `[XWiki.A,XWiki.B]` inside the element
//! with id `xwikicontent`. The whole document goes through an HTML5 parser, so
//! void elements, named entities and script bodies are handled the way a
//! browser would.

use scraper::{Html, Selector};

/// Selector of the element holding the rendered page content.
const CONTENT_SELECTOR: &str = "#xwikicontent";

/// Why the group list could not be read from a page.
#[derive(Debug, thiserror::Error)]
pub enum GroupsParseError {
  #[error("no element with id 'xwikicontent' found")]
  MissingContent,

  #[error("invalid content selector: {0}")]
  Selector(String),

  #[error("content '{0}' is not a delimited group list")]
  NotAList(String),
}

/// Parse the group names rendered in `html`.
///
/// The text of the content element loses its first and last characters (the
/// list delimiters) and is split on commas; names are trimmed and empty
/// entries dropped.
pub fn parse_groups(html: &str) -> Result<Vec<String>, GroupsParseError> {
  let content = content_text(html)?;

  let mut chars = content.chars();
  if chars.next().is_none() || chars.next_back().is_none() {
    return Err(GroupsParseError::NotAList(content));
  }

  Ok(
    chars
      .as_str()
      .split(',')
      .map(str::trim)
      .filter(|group| !group.is_empty())
      .map(str::to_string)
      .collect(),
  )
}

/// Text of the content element with whitespace runs collapsed.
fn content_text(html: &str) -> Result<String, GroupsParseError> {
  let selector = Selector::parse(CONTENT_SELECTOR).map_err(|err| GroupsParseError::Selector(format!("{err:?}")))?;
  let document = Html::parse_document(html);
  let element = document
    .select(&selector)
    .next()
    .ok_or(GroupsParseError::MissingContent)?;

  let text: String = element.text().collect();
  Ok(text.split_whitespace().collect::<Vec<_>>().join(" "))
}
