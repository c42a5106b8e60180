//! XWiki REST client: transport abstraction, resource models, link
//! resolution, decoding, the link-following mapper and the client facade.

pub mod client;
pub mod config;
pub mod deserialize;
pub mod links;
pub mod login;
pub mod mapper;
pub mod models;
pub mod transport;
pub mod url;

pub use client::{ClientError, LoginError, WikiClient};
pub use config::{EndpointConfig, ResourcePaths};
pub use deserialize::{MappingFailure, ResourceShape, decode, deserialize};
pub use links::{Rel, resolve};
pub use mapper::{PropertyMap, ResourceMapper};
pub use models::{
  Attachment, Attachments, Attribute, Link, ObjectSummary, Objects, Page, PageSummary, Pages, Properties, Property,
  Root, SearchResult, SearchResults, Wiki, Wikis,
};
pub use transport::{Authenticator, Credential, HttpTransport, Response, Transport, TransportError};
pub use self::url::UrlSchemeNormalizer;
