//! Link-following resource mapper.
//!
//! Every operation issues its GET requests one after another through the
//! [`Transport`], decodes the bodies into typed shapes and follows relations
//! found in earlier responses. Failures of any step (transport, status,
//! decoding, missing relation) collapse into an empty result; callers receive
//! whatever subset of the traversal succeeded.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::deserialize::{ResourceShape, decode};
use super::links::{Rel, resolve};
use super::models::{Attachment, Attachments, Objects, Page, Pages, Properties, Root, SearchResults, Wiki, Wikis};
use super::transport::Transport;
use super::url::UrlSchemeNormalizer;

/// Flat name/value view of an object's properties.
pub type PropertyMap = BTreeMap<String, String>;

/// Fetches and assembles wiki resources.
#[derive(Clone)]
pub struct ResourceMapper {
  transport: Arc<dyn Transport>,
  normalizer: UrlSchemeNormalizer,
}

impl ResourceMapper {
  pub fn new(transport: Arc<dyn Transport>, normalizer: UrlSchemeNormalizer) -> Self {
    Self { transport, normalizer }
  }

  /// URL normalizer used for requests and attachment URLs.
  pub fn normalizer(&self) -> &UrlSchemeNormalizer {
    &self.normalizer
  }

  /// GET `endpoint` and return the body of a successful response.
  async fn get_rest_response(&self, endpoint: &str) -> Option<String> {
    let url = self.normalizer.clean_url(endpoint)?;
    debug!("GET {url}");

    match self.transport.get(&url).await {
      Ok(response) if response.is_success() => Some(response.body),
      Ok(response) => {
        warn!("Response returned status code {} for uri {url}", response.status);
        None
      }
      Err(err) => {
        warn!("Exception while trying to reach endpoint {url}: {err}");
        None
      }
    }
  }

  /// Fetch `endpoint` and decode it into shape `T`.
  ///
  /// # Returns
  /// `None` when the request fails, the status is not 2xx or the body does
  /// not match `T`.
  pub async fn fetch<T: ResourceShape>(&self, endpoint: &str) -> Option<T> {
    let body = self.get_rest_response(endpoint).await?;
    decode(&body)
  }

  pub async fn map_root(&self, endpoint: &str) -> Option<Root> {
    self.fetch(endpoint).await
  }

  pub async fn map_page(&self, endpoint: &str) -> Option<Page> {
    self.fetch(endpoint).await
  }

  pub async fn map_pages(&self, endpoint: &str) -> Option<Pages> {
    self.fetch(endpoint).await
  }

  pub async fn map_search_results(&self, endpoint: &str) -> Option<SearchResults> {
    self.fetch(endpoint).await
  }

  pub async fn map_wikis(&self, endpoint: &str) -> Option<Wikis> {
    self.fetch(endpoint).await
  }

  /// Wikis listed at `endpoint`; empty when the listing is unavailable.
  pub async fn get_all_wikis(&self, endpoint: &str) -> Vec<Wiki> {
    self
      .map_wikis(endpoint)
      .await
      .map(|wikis| wikis.wikis)
      .unwrap_or_default()
  }

  /// Whether the server behind `entry_point` advertises a wiki named `wiki`.
  ///
  /// Follows the root resource's `wikis` relation and scans the listing.
  pub async fn wiki_exists(&self, entry_point: &str, wiki: &str) -> bool {
    let Some(root) = self.map_root(entry_point).await else {
      return false;
    };
    let Some(wikis_url) = resolve(&root.links, Rel::Wikis) else {
      warn!("Entry point {entry_point} does not advertise a wikis relation");
      return false;
    };

    self
      .get_all_wikis(wikis_url)
      .await
      .iter()
      .any(|candidate| candidate.name.as_deref() == Some(wiki))
  }

  /// Objects found at `endpoint`. A missing or blank endpoint yields `None`
  /// without any request.
  pub async fn get_objects(&self, endpoint: Option<&str>) -> Option<Objects> {
    let endpoint = endpoint.filter(|url| !url.trim().is_empty())?;
    self.fetch(endpoint).await
  }

  /// Objects of `page`, fetched through its `objects` relation.
  pub async fn get_page_objects(&self, page: &Page) -> Option<Objects> {
    self.get_objects(resolve(&page.links, Rel::Objects)).await
  }

  /// Attachments of `page`, fetched through its `attachments` relation, with
  /// every download URL passed through the scheme normalizer.
  pub async fn get_attachments(&self, page: &Page) -> Option<Attachments> {
    let endpoint = resolve(&page.links, Rel::Attachments).filter(|url| !url.trim().is_empty())?;
    let mut attachments: Attachments = self.fetch(endpoint).await?;

    for attachment in &mut attachments.attachments {
      attachment.xwiki_absolute_url = attachment
        .xwiki_absolute_url
        .as_deref()
        .map(|url| self.normalizer.update_url_scheme(url));
      attachment.xwiki_relative_url = attachment
        .xwiki_relative_url
        .as_deref()
        .map(|url| self.normalizer.update_url_scheme(url));
    }

    Some(attachments)
  }

  /// Attachments of `page` as a plain list, empty when there are none.
  pub async fn get_attachment_list(&self, page: &Page) -> Vec<Attachment> {
    self
      .get_attachments(page)
      .await
      .map(|attachments| attachments.attachments)
      .unwrap_or_default()
  }

  /// Download URL (`.../bin/download/...`) of an attachment.
  pub fn attachment_url(&self, attachment: &Attachment) -> Option<String> {
    attachment
      .xwiki_absolute_url
      .as_deref()
      .map(|url| self.normalizer.update_url_scheme(url))
  }

  /// Raw content of the attachment at `url`.
  pub async fn download_attachment(&self, url: &str) -> Option<Vec<u8>> {
    let url = self.normalizer.clean_url(url)?;

    match self.transport.get_binary(&url).await {
      Ok(response) if response.is_success() => Some(response.body),
      Ok(response) => {
        warn!("Attachment download returned status code {} for uri {url}", response.status);
        None
      }
      Err(err) => {
        warn!("Exception while downloading attachment {url}: {err}");
        None
      }
    }
  }

  /// Properties of `page`.
  ///
  /// Uses the page's embedded objects when present, otherwise fetches them.
  /// The `properties` relation is read from the first object summary
  /// regardless of its class, which is only correct for pages carrying a
  /// single object.
  pub async fn page_properties(&self, page: &Page) -> PropertyMap {
    let fetched = match page.objects {
      Some(_) => None,
      None => self.get_page_objects(page).await,
    };
    let Some(objects) = page.objects.as_ref().or(fetched.as_ref()) else {
      return PropertyMap::new();
    };
    let Some(first) = objects.object_summaries.first() else {
      debug!("Page {:?} carries no objects", page.full_name);
      return PropertyMap::new();
    };

    self.fetch_properties(resolve(&first.links, Rel::Properties)).await
  }

  /// Properties of the first object of class `class_name` in `objects`,
  /// fetched through that object's `property` relation.
  pub async fn class_properties(&self, objects: Option<&Objects>, class_name: &str) -> PropertyMap {
    let endpoint = objects
      .and_then(|objects| {
        objects
          .object_summaries
          .iter()
          .find(|summary| summary.class_name.as_deref() == Some(class_name))
      })
      .and_then(|summary| resolve(&summary.links, Rel::Property));

    self.fetch_properties(endpoint).await
  }

  async fn fetch_properties(&self, endpoint: Option<&str>) -> PropertyMap {
    let Some(endpoint) = endpoint.filter(|url| !url.trim().is_empty()) else {
      return PropertyMap::new();
    };

    self
      .fetch::<Properties>(endpoint)
      .await
      .map(fold_properties)
      .unwrap_or_default()
  }

  /// Every page of the listing at `endpoint`, each fetched in full with its
  /// attachments and objects attached.
  ///
  /// Pages are fetched one at a time in listing order; a page whose fetch
  /// fails is left out of the result.
  pub async fn pages_with_details(&self, endpoint: &str) -> Vec<Page> {
    let Some(pages) = self.map_pages(endpoint).await else {
      return Vec::new();
    };

    let mut detailed = Vec::with_capacity(pages.page_summaries.len());
    for summary in &pages.page_summaries {
      let Some(page_url) = resolve(&summary.links, Rel::Page) else {
        warn!("Page summary {:?} has no page relation", summary.full_name);
        continue;
      };
      let Some(mut page) = self.map_page(page_url).await else {
        continue;
      };

      if page.attachments.is_none()
        && let Some(attachments) = self.get_attachments(&page).await
        && !attachments.attachments.is_empty()
      {
        page.attachments = Some(attachments);
      }

      if page.objects.is_none() {
        page.objects = self.get_page_objects(&page).await;
      }

      detailed.push(page);
    }

    info!("Fetched {} of {} pages from {endpoint}", detailed.len(), pages.page_summaries.len());
    detailed
  }

  /// Names of the pages returned by the search at `endpoint`, skipping those
  /// containing `template_marker`.
  pub async fn group_names(&self, endpoint: &str, template_marker: &str) -> Vec<String> {
    let Some(results) = self.map_search_results(endpoint).await else {
      return Vec::new();
    };

    results
      .search_results
      .into_iter()
      .filter_map(|result| result.page_name)
      .filter(|name| !name.contains(template_marker))
      .collect()
  }

  /// Member names of the group whose objects live at `endpoint`.
  ///
  /// Each member object carries the user reference in its headline; the
  /// namespace `prefix` is stripped from it.
  pub async fn group_members(&self, endpoint: &str, prefix: &str) -> Vec<String> {
    let Some(objects) = self.get_objects(Some(endpoint)).await else {
      return Vec::new();
    };

    objects
      .object_summaries
      .into_iter()
      .filter_map(|summary| summary.headline)
      .filter(|headline| !headline.is_empty())
      .map(|headline| headline.strip_prefix(prefix).unwrap_or(&headline).to_string())
      .collect()
  }

  /// Profile properties of a user page: follows its `object` relation, then
  /// reads the object of class `class_name`.
  pub async fn user_properties(&self, user: &Page, class_name: &str) -> PropertyMap {
    let objects = self.get_objects(resolve(&user.links, Rel::Object)).await;
    self.class_properties(objects.as_ref(), class_name).await
  }
}

/// Fold properties into a map; later duplicates overwrite earlier ones.
fn fold_properties(properties: Properties) -> PropertyMap {
  properties
    .properties
    .into_iter()
    .filter_map(|property| Some((property.name?, property.value.unwrap_or_default())))
    .collect()
}
