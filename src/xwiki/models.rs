//! Resource representations returned by the XWiki REST API.
//!
//! Every shape rejects fields it does not know about, mirroring the strict
//! schema the server publishes. Nested structures the client never interprets
//! (translations, hierarchies, class definitions) are kept as opaque JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Hypermedia link attached to a resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct Link {
  /// Target URL, absolute or relative to the server.
  pub href: Option<String>,
  /// Relation name, usually a URI such as `http://www.xwiki.org/rel/objects`.
  pub rel: Option<String>,
  #[serde(rename = "type")]
  /// Media type of the target, when advertised.
  pub media_type: Option<String>,
  /// Language of the target, when advertised.
  pub href_lang: Option<String>,
}

impl Link {
  /// Build a link from a relation name and a target URL.
  pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
    Self {
      href: Some(href.into()),
      rel: Some(rel.into()),
      ..Self::default()
    }
  }
}

/// API entry point (`/rest`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct Root {
  pub links: Vec<Link>,
  /// Server version string.
  pub version: Option<String>,
}

/// A single wiki hosted by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct Wiki {
  pub links: Vec<Link>,
  pub id: Option<String>,
  /// Wiki name used in every endpoint (`/wikis/{name}/...`).
  pub name: Option<String>,
  pub description: Option<String>,
  pub owner: Option<String>,
}

/// Collection of wikis advertised by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct Wikis {
  pub links: Vec<Link>,
  pub wikis: Vec<Wiki>,
}

/// Lightweight page entry found in page listings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct PageSummary {
  /// Links, including the `page` relation to the full representation.
  pub links: Vec<Link>,
  /// Identifier in the form `wiki:Space.Page`.
  pub id: Option<String>,
  /// Full reference in the form `Space.Page`.
  pub full_name: Option<String>,
  pub wiki: Option<String>,
  pub space: Option<String>,
  pub name: Option<String>,
  pub title: Option<String>,
  pub raw_title: Option<String>,
  pub parent: Option<String>,
  pub parent_id: Option<String>,
  pub version: Option<String>,
  pub author: Option<String>,
  pub author_name: Option<String>,
  pub xwiki_relative_url: Option<String>,
  pub xwiki_absolute_url: Option<String>,
  pub translations: Option<Value>,
  pub syntax: Option<String>,
  pub hidden: Option<bool>,
}

/// Full wiki document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct Page {
  /// Links to sub-resources such as `objects`, `attachments` and children.
  pub links: Vec<Link>,
  /// Identifier in the form `wiki:Space.Page`.
  pub id: Option<String>,
  /// Full reference in the form `Space.Page`.
  pub full_name: Option<String>,
  pub wiki: Option<String>,
  pub space: Option<String>,
  pub name: Option<String>,
  /// Rendered title shown in the UI.
  pub title: Option<String>,
  pub raw_title: Option<String>,
  pub parent: Option<String>,
  pub parent_id: Option<String>,
  pub version: Option<String>,
  pub author: Option<String>,
  pub author_name: Option<String>,
  pub xwiki_relative_url: Option<String>,
  pub xwiki_absolute_url: Option<String>,
  pub translations: Option<Value>,
  pub syntax: Option<String>,
  pub language: Option<String>,
  pub major_version: Option<i32>,
  pub minor_version: Option<i32>,
  pub hidden: Option<bool>,
  /// Creation time in milliseconds since the Unix epoch.
  pub created: Option<i64>,
  pub creator: Option<String>,
  pub creator_name: Option<String>,
  /// Last modification time in milliseconds since the Unix epoch.
  pub modified: Option<i64>,
  pub modifier: Option<String>,
  pub modifier_name: Option<String>,
  pub original_metadata_author: Option<String>,
  pub original_metadata_author_name: Option<String>,
  pub comment: Option<String>,
  /// Raw page source in the page syntax.
  pub content: Option<String>,
  #[serde(rename = "class")]
  /// Class definition carried by the page, when expanded.
  pub class_definition: Option<Value>,
  /// Objects attached to the page. Filled by a separate fetch unless the
  /// server embedded them.
  pub objects: Option<Objects>,
  /// Attachments of the page. Filled by a separate fetch unless the server
  /// embedded them.
  pub attachments: Option<Attachments>,
  pub hierarchy: Option<Value>,
  pub enforce_required_rights: Option<bool>,
}

/// Collection of page summaries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct Pages {
  pub links: Vec<Link>,
  pub page_summaries: Vec<PageSummary>,
}

/// Summary of an object (typed metadata entry) attached to a page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ObjectSummary {
  /// Links, including the `property`/`properties` relations.
  pub links: Vec<Link>,
  pub id: Option<String>,
  pub guid: Option<String>,
  pub page_id: Option<String>,
  pub page_version: Option<String>,
  pub wiki: Option<String>,
  pub space: Option<String>,
  pub page_name: Option<String>,
  pub page_author: Option<String>,
  pub page_author_name: Option<String>,
  #[serde(alias = "class")]
  /// Class of the object, e.g. `XWiki.XWikiUsers`.
  pub class_name: Option<String>,
  /// Index of the object among the objects of the same class.
  pub number: Option<i32>,
  /// Short description; for group member objects this is the member
  /// reference (`XWiki.alice`).
  pub headline: Option<String>,
}

/// Objects attached to a page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct Objects {
  pub links: Vec<Link>,
  pub object_summaries: Vec<ObjectSummary>,
}

/// Attribute of a property definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct Attribute {
  pub links: Vec<Link>,
  pub name: Option<String>,
  pub value: Option<String>,
}

/// Name/value pair belonging to one object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct Property {
  pub links: Vec<Link>,
  pub attributes: Vec<Attribute>,
  pub value: Option<String>,
  pub name: Option<String>,
  #[serde(rename = "type")]
  pub property_type: Option<String>,
}

/// Properties of one object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct Properties {
  pub links: Vec<Link>,
  pub properties: Vec<Property>,
}

/// File attached to a page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct Attachment {
  pub links: Vec<Link>,
  pub id: Option<String>,
  /// File name.
  pub name: Option<String>,
  pub size: Option<i32>,
  pub long_size: Option<i64>,
  pub version: Option<String>,
  pub page_id: Option<String>,
  pub page_version: Option<String>,
  pub mime_type: Option<String>,
  pub author: Option<String>,
  pub author_name: Option<String>,
  /// Upload time in milliseconds since the Unix epoch.
  pub date: Option<i64>,
  /// Download URL relative to the server (`/bin/download/...`).
  pub xwiki_relative_url: Option<String>,
  /// Absolute download URL.
  pub xwiki_absolute_url: Option<String>,
  pub hierarchy: Option<Value>,
}

/// Attachments of a page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct Attachments {
  pub links: Vec<Link>,
  pub attachments: Vec<Attachment>,
}

/// One hit of a search query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct SearchResult {
  pub links: Vec<Link>,
  #[serde(rename = "type")]
  pub result_type: Option<String>,
  pub id: Option<String>,
  pub page_full_name: Option<String>,
  pub title: Option<String>,
  pub wiki: Option<String>,
  pub space: Option<String>,
  /// Name of the matching page.
  pub page_name: Option<String>,
  pub modified: Option<i64>,
  pub author: Option<String>,
  pub author_name: Option<String>,
  pub version: Option<String>,
  pub language: Option<String>,
  pub class_name: Option<String>,
  pub object_number: Option<i32>,
  pub filename: Option<String>,
  pub score: Option<f64>,
  pub object: Option<Value>,
  pub hierarchy: Option<Value>,
}

/// Result list of a search query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct SearchResults {
  pub links: Vec<Link>,
  pub search_results: Vec<SearchResult>,
  pub template: Option<String>,
}
