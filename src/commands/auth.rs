//! Login subcommand handler.
//!
//! `xwiki login` authenticates against the groups page of the wiki and prints
//! the groups the user belongs to.

use std::process;

use crate::cli::Cli;
use crate::color::ColorScheme;
use crate::commands::{connect, exit_with_error, print_json};

/// Handle the `login` subcommand.
///
/// Exits with status 2 when no credentials were provided and with status 1
/// when the server rejects them.
pub(crate) async fn handle_login_command(cli: &Cli, colors: &ColorScheme) {
  let (Some(username), Some(password)) = (cli.auth.user.as_deref(), cli.auth.password.as_deref()) else {
    eprintln!("{} {}", colors.error("✗"), colors.error("Credentials not provided"));
    eprintln!("\n{}", colors.info("Provide credentials via:"));
    eprintln!("  • CLI flags: --user and --password");
    eprintln!("  • Environment variables: XWIKI_USER and XWIKI_PASSWORD");
    process::exit(2);
  };

  let client = match connect(cli, colors).await {
    Ok(client) => client,
    Err(e) => exit_with_error("Failed to connect", &e, colors),
  };

  if !cli.behavior.json {
    println!("{} {}", colors.info("→"), colors.info("Logging in"));
    println!("  {}: {}", colors.emphasis("Username"), username);
  }

  let groups = match client.login(username, password).await {
    Ok(groups) => groups,
    Err(e) => {
      eprintln!("{} {}", colors.error("✗"), colors.error("Login failed"));
      eprintln!("  {}: {}", colors.emphasis("Reason"), e.message());
      process::exit(1);
    }
  };

  if cli.behavior.json {
    if let Err(e) = print_json(&groups) {
      exit_with_error("Failed to print groups", &e, colors);
    }
    return;
  }

  println!("{} {}", colors.success("✓"), colors.success("Login successful"));
  println!(
    "  {}: {}",
    colors.emphasis("Groups"),
    colors.number(groups.len())
  );
  for group in &groups {
    println!("    {group}");
  }
}
