//! Page inspection commands: `page`, `pages` and `properties`.

use anyhow::bail;
use chrono::{DateTime, Utc};

use crate::cli::Cli;
use crate::color::ColorScheme;
use crate::commands::{connect, exit_with_error, format_properties, print_json};
use crate::xwiki::{Page, PageSummary};

/// Handle the `page` subcommand.
pub(crate) async fn handle_page_command(space: &str, name: &str, cli: &Cli, colors: &ColorScheme) {
  if let Err(e) = show_page(space, name, cli, colors).await {
    exit_with_error("Failed to fetch page", &e, colors);
  }
}

async fn show_page(space: &str, name: &str, cli: &Cli, colors: &ColorScheme) -> anyhow::Result<()> {
  let client = connect(cli, colors).await?;

  let Some(page) = client.get_page(space, name).await else {
    bail!("Page {space}.{name} could not be retrieved");
  };

  if cli.behavior.json {
    return print_json(&page);
  }

  for line in format_page(&page, colors) {
    println!("{line}");
  }
  if let Some(content) = page.content.as_deref().filter(|content| !content.trim().is_empty()) {
    println!();
    println!("{content}");
  }

  Ok(())
}

/// Handle the `pages` subcommand.
pub(crate) async fn handle_pages_command(space: &str, full: bool, cli: &Cli, colors: &ColorScheme) {
  let result = if full {
    list_full_pages(space, cli, colors).await
  } else {
    list_pages(space, cli, colors).await
  };

  if let Err(e) = result {
    exit_with_error("Failed to list pages", &e, colors);
  }
}

async fn list_pages(space: &str, cli: &Cli, colors: &ColorScheme) -> anyhow::Result<()> {
  let client = connect(cli, colors).await?;

  let Some(pages) = client.get_pages(space).await else {
    bail!("Pages of space {space} could not be retrieved");
  };

  if cli.behavior.json {
    return print_json(&pages);
  }

  println!(
    "{} {} {}",
    colors.success("✓"),
    colors.number(pages.page_summaries.len()),
    colors.info(if pages.page_summaries.len() == 1 { "page" } else { "pages" })
  );
  for summary in &pages.page_summaries {
    println!("  {}", format_summary(summary, colors));
  }

  Ok(())
}

async fn list_full_pages(space: &str, cli: &Cli, colors: &ColorScheme) -> anyhow::Result<()> {
  let client = connect(cli, colors).await?;
  let pages = client.get_pages_list(space).await;

  if cli.behavior.json {
    return print_json(&pages);
  }

  println!(
    "{} {} {}",
    colors.success("✓"),
    colors.number(pages.len()),
    colors.info(if pages.len() == 1 { "page" } else { "pages" })
  );
  for page in &pages {
    println!();
    for line in format_page(page, colors) {
      println!("{line}");
    }
  }

  Ok(())
}

/// Handle the `properties` subcommand.
pub(crate) async fn handle_properties_command(space: &str, name: &str, cli: &Cli, colors: &ColorScheme) {
  if let Err(e) = show_properties(space, name, cli, colors).await {
    exit_with_error("Failed to fetch properties", &e, colors);
  }
}

async fn show_properties(space: &str, name: &str, cli: &Cli, colors: &ColorScheme) -> anyhow::Result<()> {
  let client = connect(cli, colors).await?;
  let properties = client.get_properties(space, name).await;

  if cli.behavior.json {
    return print_json(&properties);
  }

  if properties.is_empty() {
    println!("{} {}", colors.warning("⚠"), colors.warning("No properties found"));
    return Ok(());
  }

  println!("{} {}.{}", colors.success("✓"), space, colors.emphasis(name));
  for line in format_properties(&properties, colors) {
    println!("{line}");
  }

  Ok(())
}

fn format_summary(summary: &PageSummary, colors: &ColorScheme) -> String {
  let full_name = summary.full_name.as_deref().or(summary.name.as_deref()).unwrap_or("?");
  match summary.title.as_deref().filter(|title| !title.is_empty()) {
    Some(title) => format!("{} {}", colors.emphasis(full_name), colors.dimmed(format!("({title})"))),
    None => colors.emphasis(full_name),
  }
}

/// Header and metadata lines describing `page`.
fn format_page(page: &Page, colors: &ColorScheme) -> Vec<String> {
  let full_name = page.full_name.as_deref().or(page.name.as_deref()).unwrap_or("?");
  let mut lines = vec![colors.emphasis(full_name)];

  let mut field = |label: &str, value: String| {
    lines.push(format!("  {}: {}", colors.emphasis(format!("{label:<11}")), value));
  };

  if let Some(title) = &page.title {
    field("Title", title.clone());
  }
  if let Some(version) = &page.version {
    field("Version", colors.number(version));
  }
  if let Some(author) = &page.author {
    field("Author", author.clone());
  }
  if let Some(modified) = page.modified {
    field("Modified", colors.dimmed(format_millis(modified)));
  }
  if let Some(syntax) = &page.syntax {
    field("Syntax", syntax.clone());
  }
  if let Some(objects) = &page.objects {
    field("Objects", colors.number(objects.object_summaries.len()));
  }
  if let Some(attachments) = &page.attachments {
    field("Attachments", colors.number(attachments.attachments.len()));
  }

  lines
}

/// Render epoch milliseconds as a UTC timestamp.
fn format_millis(millis: i64) -> String {
  DateTime::<Utc>::from_timestamp_millis(millis)
    .map(|time| time.format("%Y-%m-%d %H:%M:%S UTC").to_string())
    .unwrap_or_else(|| millis.to_string())
}
