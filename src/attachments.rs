//! Attachment download helpers.
//!
//! Saves the attachments of a wiki page into a local directory.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;
use tracing::warn;

use crate::xwiki::{Attachment, Page, WikiClient};

/// Represents an attachment saved to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedAttachment {
  /// File name reported by the wiki.
  pub original_name: String,
  /// Location of the saved file.
  pub path: PathBuf,
  /// Number of bytes written; `0` when an existing file was kept.
  pub size: usize,
}

/// Download the attachments of `page` into `output_dir`.
///
/// Attachments whose content cannot be fetched are skipped with a warning.
///
/// # Arguments
/// * `client` - Connected wiki client.
/// * `page` - Page whose attachments should be saved.
/// * `output_dir` - Target directory, created when missing.
/// * `overwrite` - When `true`, existing files are replaced.
/// * `only` - Restrict the download to the attachment with this file name.
///
/// # Errors
/// Returns an error if the directory cannot be created or a file cannot be
/// written.
pub async fn download_attachments(
  client: &WikiClient,
  page: &Page,
  output_dir: &Path,
  overwrite: bool,
  only: Option<&str>,
) -> Result<Vec<DownloadedAttachment>> {
  let attachments: Vec<Attachment> = client
    .get_attachments(page)
    .await
    .into_iter()
    .filter(|attachment| only.is_none() || attachment.name.as_deref() == only)
    .collect();

  if attachments.is_empty() {
    return Ok(Vec::new());
  }

  fs::create_dir_all(output_dir)
    .await
    .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;

  let mut downloaded = Vec::new();
  let mut used_filenames = HashSet::new();

  for attachment in attachments {
    let name = attachment.name.clone().unwrap_or_else(|| "attachment".to_string());

    let Some(url) = client.get_attachment_url(&attachment) else {
      warn!("Skipping attachment '{name}' because no download URL was provided");
      continue;
    };

    let filename = if overwrite {
      let filename = sanitize_filename(&name);
      used_filenames.insert(filename.clone());
      filename
    } else {
      generate_unique_filename(&name, output_dir, &mut used_filenames)
    };
    let output_path = output_dir.join(&filename);

    let Some(bytes) = client.download_attachment(&url).await else {
      warn!("Skipping attachment '{name}': download from {url} failed");
      continue;
    };

    fs::write(&output_path, &bytes)
      .await
      .with_context(|| format!("Failed to write attachment to {}", output_path.display()))?;

    downloaded.push(DownloadedAttachment {
      original_name: name,
      path: output_path,
      size: bytes.len(),
    });
  }

  Ok(downloaded)
}

fn generate_unique_filename(name: &str, target_dir: &Path, used_filenames: &mut HashSet<String>) -> String {
  let mut candidate = sanitize_filename(name);
  let (base, ext) = split_name_and_extension(&candidate);
  let mut counter = 1;

  while used_filenames.contains(&candidate) || target_dir.join(&candidate).exists() {
    candidate = if ext.is_empty() {
      format!("{base}-{counter}")
    } else {
      format!("{base}-{counter}.{ext}")
    };
    counter += 1;
  }

  used_filenames.insert(candidate.clone());
  candidate
}

fn split_name_and_extension(name: &str) -> (String, String) {
  match name.rsplit_once('.') {
    Some((stem, ext)) if !stem.is_empty() => (stem.to_string(), ext.to_string()),
    _ => (name.to_string(), String::new()),
  }
}

fn sanitize_filename(filename: &str) -> String {
  filename
    .chars()
    .map(|c| match c {
      '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
      c => c,
    })
    .collect()
}
