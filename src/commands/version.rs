//! Version/metadata reporting.
//!
//! `xwiki version` prints either a short summary of the build or a JSON
//! document for scripts.

use chrono::DateTime;
use serde_json::json;

use crate::color::ColorScheme;

/// Render version and build metadata in JSON or human-readable form.
///
/// # Arguments
/// * `json` - When `true`, emit a JSON document instead of colored text.
/// * `short` - When `true`, print only the semantic version string.
/// * `colors` - Shared color palette for styled terminal output.
pub(crate) fn handle_version_command(json: bool, short: bool, colors: &ColorScheme) {
  let version = env!("CARGO_PKG_VERSION");

  if short {
    println!("{version}");
    return;
  }

  let git_hash = env!("GIT_HASH");
  let built = format_timestamp(env!("BUILD_TIMESTAMP"));
  let target = env!("TARGET");
  let rustc = env!("RUSTC_VERSION");

  if json {
    let document = json!({
      "version": version,
      "git_commit": git_hash,
      "build_timestamp": built,
      "target": target,
      "rust_version": rustc,
      "user_agent": format!("xwiki-client/{version} ({target})"),
    });
    match serde_json::to_string_pretty(&document) {
      Ok(rendered) => println!("{rendered}"),
      Err(e) => eprintln!("{} {e}", colors.error("Error:")),
    }
    return;
  }

  println!("{} {}", colors.emphasis("xwiki"), colors.number(version));
  println!("{}: {}", colors.emphasis("Git commit"), colors.code(git_hash));
  println!("{}: {}", colors.emphasis("Built"), colors.dimmed(built));
  println!("{}: {}", colors.emphasis("Target"), target);
  println!("{}: {}", colors.emphasis("Rust version"), rustc);
}

/// Convert the embedded build timestamp (epoch seconds) into an ISO-8601
/// string, falling back to the raw input when it does not parse.
fn format_timestamp(timestamp: &str) -> String {
  timestamp
    .parse::<i64>()
    .ok()
    .and_then(|secs| DateTime::from_timestamp(secs, 0))
    .map(|datetime| datetime.format("%Y-%m-%d %H:%M:%S UTC").to_string())
    .unwrap_or_else(|| timestamp.to_string())
}
