//! CLI subcommand handlers.
//!
//! Each `xwiki` subcommand lives in its own module; the helpers below cover
//! what they share: connecting to the server, reporting failures and printing
//! JSON.

use std::process;

use anyhow::Context;
use serde::Serialize;

use crate::cli::Cli;
use crate::color::ColorScheme;
use crate::xwiki::{PropertyMap, WikiClient};

pub mod auth;
pub mod completions;
pub mod download;
pub mod groups;
pub mod pages;
pub mod version;

/// Connect to the wiki described by the command-line options.
pub(crate) async fn connect(cli: &Cli, colors: &ColorScheme) -> anyhow::Result<WikiClient> {
  let config = cli
    .endpoint_config()
    .context("--url (or XWIKI_URL) is required")?;

  if !cli.behavior.quiet && !cli.behavior.json {
    println!(
      "{} {} {}",
      colors.progress("→"),
      colors.info("Connecting to"),
      colors.link(&config.base_url)
    );
  }

  WikiClient::from_config(config)
    .await
    .context("Failed to connect to the XWiki server")
}

/// Print a failed command's error and exit with status 1.
pub(crate) fn exit_with_error(action: &str, err: &anyhow::Error, colors: &ColorScheme) -> ! {
  eprintln!("{} {}", colors.error("✗"), colors.error(action));
  eprintln!("  {}: {:#}", colors.emphasis("Error"), err);
  process::exit(1);
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
  let rendered = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
  println!("{rendered}");
  Ok(())
}

/// One `key: value` line per property, keys aligned.
pub(crate) fn format_properties(properties: &PropertyMap, colors: &ColorScheme) -> Vec<String> {
  let width = properties.keys().map(|key| key.chars().count()).max().unwrap_or(0);

  properties
    .iter()
    .map(|(key, value)| {
      let padding = " ".repeat(width - key.chars().count());
      format!("  {}:{padding} {}", colors.emphasis(key), value)
        .trim_end()
        .to_string()
    })
    .collect()
}
