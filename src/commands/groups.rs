//! User and group commands: `groups`, `group-users`, `user` and
//! `user-properties`.

use anyhow::bail;

use crate::cli::Cli;
use crate::color::ColorScheme;
use crate::commands::{connect, exit_with_error, format_properties, print_json};

/// Handle the `groups` subcommand.
pub(crate) async fn handle_groups_command(cli: &Cli, colors: &ColorScheme) {
  if let Err(e) = list_groups(cli, colors).await {
    exit_with_error("Failed to list groups", &e, colors);
  }
}

async fn list_groups(cli: &Cli, colors: &ColorScheme) -> anyhow::Result<()> {
  let client = connect(cli, colors).await?;
  let groups = client.get_groups_name().await;
  print_names(&groups, "group", "groups", cli, colors)
}

/// Handle the `group-users` subcommand.
pub(crate) async fn handle_group_users_command(group: &str, cli: &Cli, colors: &ColorScheme) {
  if let Err(e) = list_group_users(group, cli, colors).await {
    exit_with_error("Failed to list group members", &e, colors);
  }
}

async fn list_group_users(group: &str, cli: &Cli, colors: &ColorScheme) -> anyhow::Result<()> {
  let client = connect(cli, colors).await?;
  let users = client.get_group_users(group).await;
  print_names(&users, "member", "members", cli, colors)
}

/// Handle the `user` subcommand.
pub(crate) async fn handle_user_command(username: &str, cli: &Cli, colors: &ColorScheme) {
  if let Err(e) = show_user(username, cli, colors).await {
    exit_with_error("Failed to fetch user", &e, colors);
  }
}

async fn show_user(username: &str, cli: &Cli, colors: &ColorScheme) -> anyhow::Result<()> {
  let client = connect(cli, colors).await?;

  let Some(user) = client.get_user(username).await else {
    bail!("User {username} could not be retrieved");
  };

  if cli.behavior.json {
    return print_json(&user);
  }

  let full_name = user.full_name.as_deref().unwrap_or(username);
  println!("{} {}", colors.success("✓"), colors.emphasis(full_name));
  if let Some(title) = &user.title {
    println!("  {}: {}", colors.emphasis("Title"), title);
  }
  if let Some(objects) = &user.objects {
    println!(
      "  {}: {}",
      colors.emphasis("Objects"),
      colors.number(objects.object_summaries.len())
    );
  }

  Ok(())
}

/// Handle the `user-properties` subcommand.
pub(crate) async fn handle_user_properties_command(username: &str, cli: &Cli, colors: &ColorScheme) {
  if let Err(e) = show_user_properties(username, cli, colors).await {
    exit_with_error("Failed to fetch user properties", &e, colors);
  }
}

async fn show_user_properties(username: &str, cli: &Cli, colors: &ColorScheme) -> anyhow::Result<()> {
  let client = connect(cli, colors).await?;

  let Some(user) = client.get_user(username).await else {
    bail!("User {username} could not be retrieved");
  };
  let properties = client.get_user_properties(&user).await;

  if cli.behavior.json {
    return print_json(&properties);
  }

  if properties.is_empty() {
    println!("{} {}", colors.warning("⚠"), colors.warning("No profile properties found"));
    return Ok(());
  }

  println!("{} {}", colors.success("✓"), colors.emphasis(username));
  for line in format_properties(&properties, colors) {
    println!("{line}");
  }

  Ok(())
}

fn print_names(names: &[String], singular: &str, plural: &str, cli: &Cli, colors: &ColorScheme) -> anyhow::Result<()> {
  if cli.behavior.json {
    return print_json(names);
  }

  println!(
    "{} {} {}",
    colors.success("✓"),
    colors.number(names.len()),
    colors.info(if names.len() == 1 { singular } else { plural })
  );
  for name in names {
    println!("  {name}");
  }

  Ok(())
}
