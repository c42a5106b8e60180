//! XWiki REST client library
//!
//! Maps the JSON resources of an XWiki server (pages, objects, properties,
//! attachments, users and groups) into typed values, and powers the `xwiki`
//! command-line tool.

pub mod attachments;
pub mod cli;
pub mod color;
pub mod commands;
pub mod xwiki;
