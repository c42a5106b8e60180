//! Decoding of response bodies into typed resource shapes.
//!
//! A failed decode never propagates: [`decode`] logs what went wrong and
//! returns `None`, so a malformed nested resource cannot abort a larger
//! traversal.

use serde::de::DeserializeOwned;
use serde_json::error::Category;
use tracing::{debug, warn};

use super::models::{Attachments, Objects, Page, Pages, Properties, Root, SearchResults, Wiki, Wikis};

/// A structural schema a response body can be decoded into.
pub trait ResourceShape: DeserializeOwned {
  /// Shape name used in diagnostics.
  const NAME: &'static str;
}

macro_rules! resource_shape {
  ($($ty:ty => $name:literal),* $(,)?) => {
    $(impl ResourceShape for $ty {
      const NAME: &'static str = $name;
    })*
  };
}

resource_shape! {
  Root => "Xwiki",
  Wiki => "Wiki",
  Wikis => "Wikis",
  Page => "Page",
  Pages => "Pages",
  Objects => "Objects",
  Properties => "Properties",
  Attachments => "Attachments",
  SearchResults => "SearchResults",
}

/// Why a body could not be decoded into a shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MappingFailure {
  /// The payload carries a field the schema does not declare.
  #[error("unrecognized property '{field}' in '{shape}', known properties: {known:?}")]
  UnknownField {
    shape: &'static str,
    field: String,
    /// Field names accepted by the object that rejected `field`.
    known: Vec<String>,
  },

  /// Malformed payload, type mismatch, empty body, ...
  #[error("unable to map '{shape}': {message}")]
  Generic { shape: &'static str, message: String },
}

impl MappingFailure {
  fn from_json_error(shape: &'static str, err: &serde_json::Error) -> Self {
    let message = err.to_string();

    if err.classify() == Category::Data
      && message.starts_with("unknown field `")
      && let Some((field, known)) = parse_unknown_field(&message)
    {
      return Self::UnknownField { shape, field, known };
    }

    Self::Generic { shape, message }
  }

  /// Name of the shape that failed to decode.
  pub fn shape(&self) -> &'static str {
    match self {
      Self::UnknownField { shape, .. } | Self::Generic { shape, .. } => shape,
    }
  }
}

/// Pull the offending field and the expected field list out of serde's
/// "unknown field `x`, expected one of `a`, `b`" message.
fn parse_unknown_field(message: &str) -> Option<(String, Vec<String>)> {
  let mut quoted = message.split('`').skip(1).step_by(2).map(str::to_string);
  let field = quoted.next()?;
  Some((field, quoted.collect()))
}

/// Decode `body` into `T`, reporting the precise failure.
pub fn deserialize<T: ResourceShape>(body: &str) -> Result<T, MappingFailure> {
  serde_json::from_str(body).map_err(|err| MappingFailure::from_json_error(T::NAME, &err))
}

/// Decode `body` into `T`, logging any failure and collapsing it to `None`.
pub fn decode<T: ResourceShape>(body: &str) -> Option<T> {
  match deserialize::<T>(body) {
    Ok(value) => {
      debug!("Object '{}' mapped correctly", T::NAME);
      Some(value)
    }
    Err(failure) => {
      report(&failure, body);
      None
    }
  }
}

fn report(failure: &MappingFailure, body: &str) {
  match failure {
    MappingFailure::UnknownField { shape, field, known } => {
      warn!(
        "Unable to map '{shape}' object from json: Unrecognized property:'{field}'. Known properties:'{}'",
        known.join(", ")
      );
    }
    MappingFailure::Generic { shape, message } => {
      warn!("Unable to map '{shape}' object from json. Error message: {message}");
      warn!("Unable to map '{shape}' object from json: {body}");
    }
  }
}
