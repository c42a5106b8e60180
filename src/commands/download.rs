//! Attachment download subcommand.

use std::path::Path;

use anyhow::bail;

use crate::attachments;
use crate::cli::Cli;
use crate::color::ColorScheme;
use crate::commands::{connect, exit_with_error};

/// Handle the `download` subcommand.
pub(crate) async fn handle_download_command(
  space: &str,
  name: &str,
  output: &str,
  only: Option<&str>,
  overwrite: bool,
  cli: &Cli,
  colors: &ColorScheme,
) {
  println!("{} {}", colors.progress("→"), colors.info("Downloading attachments"));
  println!("  {}: {}.{}", colors.emphasis("Page"), space, name);
  println!("  {}: {}", colors.emphasis("Output"), colors.path(output));

  match download(space, name, Path::new(output), only, overwrite, cli, colors).await {
    Ok(0) => println!("\n{} {}", colors.warning("⚠"), colors.warning("No attachments downloaded")),
    Ok(count) => println!(
      "\n{} {} {}",
      colors.success("✓"),
      colors.success("Downloaded"),
      colors.number(format!(
        "{count} {}",
        if count == 1 { "attachment" } else { "attachments" }
      ))
    ),
    Err(e) => exit_with_error("Failed to download attachments", &e, colors),
  }
}

async fn download(
  space: &str,
  name: &str,
  output_dir: &Path,
  only: Option<&str>,
  overwrite: bool,
  cli: &Cli,
  colors: &ColorScheme,
) -> anyhow::Result<usize> {
  let client = connect(cli, colors).await?;

  let Some(page) = client.get_page(space, name).await else {
    bail!("Page {space}.{name} could not be retrieved");
  };

  let downloaded = attachments::download_attachments(&client, &page, output_dir, overwrite, only).await?;
  for attachment in &downloaded {
    println!(
      "  {} {} {}",
      colors.success("✓"),
      colors.path(attachment.path.display()),
      colors.dimmed(format!("({} bytes)", attachment.size))
    );
  }

  Ok(downloaded.len())
}
