//! Command-line interface definitions for the `xwiki` binary.
//!
//! Options are grouped the way the client needs them: where the server lives,
//! who is logging in, and how output should look.

use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use url::Url;

use crate::color::ColorScheme;
use crate::commands::auth::handle_login_command;
use crate::commands::completions::handle_completions_command;
use crate::commands::download::handle_download_command;
use crate::commands::groups::{
  handle_group_users_command, handle_groups_command, handle_user_command, handle_user_properties_command,
};
use crate::commands::pages::{handle_page_command, handle_pages_command, handle_properties_command};
use crate::commands::version::handle_version_command;
use crate::xwiki::EndpointConfig;

/// xwiki - Browse an XWiki server through its REST API
#[derive(Debug, Parser)]
#[command(
  name = "xwiki",
  version,
  about = "Browse an XWiki server through its REST API",
  long_about = "A command-line client for the XWiki REST API.\n\
                Fetches pages, their objects, properties and attachments, and inspects users and groups.",
  styles = get_clap_styles()
)]
pub struct Cli {
  /// Subcommand to execute
  #[command(subcommand)]
  pub command: Command,

  /// Server options
  #[command(flatten)]
  pub endpoint: EndpointOptions,

  /// Authentication options
  #[command(flatten)]
  pub auth: AuthOptions,

  /// Behavior options
  #[command(flatten)]
  pub behavior: BehaviorOptions,
}

/// Subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
  /// Show a single page
  Page {
    /// Space holding the page
    space: String,
    /// Page name
    name: String,
  },

  /// List the pages of a space
  Pages {
    /// Space to list
    space: String,

    /// Fetch every page in full, with attachments and objects
    #[arg(long)]
    full: bool,
  },

  /// Show the properties of a page's object
  Properties {
    /// Space holding the page
    space: String,
    /// Page name
    name: String,
  },

  /// List group names
  Groups,

  /// List the members of a group
  GroupUsers {
    /// Group page name (e.g. XWikiAdminGroup)
    group: String,
  },

  /// Show a user's profile page
  User {
    /// User name (e.g. alice)
    username: String,
  },

  /// Show a user's profile properties
  UserProperties {
    /// User name (e.g. alice)
    username: String,
  },

  /// Log in and list the groups of the current user
  Login,

  /// Download the attachments of a page
  Download {
    /// Space holding the page
    space: String,
    /// Page name
    name: String,

    /// Output directory
    #[arg(short, long, default_value = ".", value_name = "DIR")]
    output: String,

    /// Only download the attachment with this file name
    #[arg(long, value_name = "FILE")]
    attachment: Option<String>,

    /// Overwrite existing files
    #[arg(long)]
    overwrite: bool,
  },

  /// Display version and build information
  Version {
    /// Output in JSON format
    #[arg(long)]
    json: bool,

    /// Show only version number
    #[arg(long)]
    short: bool,
  },

  /// Generate shell completion scripts
  Completions {
    /// Target shell for completions
    #[arg(value_enum)]
    shell: Shell,
  },
}

/// Shells supported by `completions`
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
  Bash,
  Zsh,
  Fish,
  Powershell,
  Elvish,
}

/// Normalize a URL by adding https:// if no scheme is present
fn normalize_url(url: &str) -> Result<String, String> {
  let trimmed = url.trim();

  let parsed = match Url::parse(trimmed) {
    Ok(parsed) => parsed,
    Err(_) => {
      let with_https = format!("https://{trimmed}");
      Url::parse(&with_https).map_err(|e| format!("Invalid URL: {e}"))?
    }
  };

  let mut url_str = parsed.to_string();
  if url_str.ends_with('/') && url_str.len() > 1 {
    url_str.pop();
  }

  Ok(url_str)
}

/// Server options
#[derive(Debug, Parser)]
pub struct EndpointOptions {
  /// XWiki base URL
  #[arg(long, env = "XWIKI_URL", value_name = "URL", value_parser = normalize_url)]
  pub url: Option<String>,

  /// REST entry point path
  #[arg(long, env = "XWIKI_API_ENTRYPOINT", default_value = "/rest", value_name = "PATH")]
  pub entrypoint: String,

  /// Wiki to target
  #[arg(long, env = "XWIKI_WIKI", default_value = "xwiki", value_name = "NAME")]
  pub wiki: String,

  /// Scheme forced onto request and attachment URLs
  #[arg(long, env = "XWIKI_URL_SCHEME", value_name = "SCHEME")]
  pub scheme: Option<String>,

  /// Host forced onto request and attachment URLs
  #[arg(long, env = "XWIKI_URL_HOST", value_name = "HOST")]
  pub host: Option<String>,

  /// Value of the `media` query parameter (empty to omit it)
  #[arg(long, default_value = "json", value_name = "MEDIA")]
  pub media: String,

  /// Request timeout in seconds
  #[arg(long, default_value = "30", value_name = "SECONDS")]
  pub timeout: u64,
}

/// Authentication options
#[derive(Debug, Parser)]
pub struct AuthOptions {
  /// XWiki user name
  #[arg(long, env = "XWIKI_USER", value_name = "USER")]
  pub user: Option<String>,

  /// XWiki password
  #[arg(long, env = "XWIKI_PASSWORD", value_name = "PASSWORD", hide_env_values = true)]
  pub password: Option<String>,
}

/// Behavior options
#[derive(Debug, Parser)]
pub struct BehaviorOptions {
  /// Print results as JSON
  #[arg(long)]
  pub json: bool,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Colorize output
  #[arg(long, value_enum, default_value = "auto", value_name = "WHEN")]
  pub color: ColorOption,
}

/// Color output options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorOption {
  Auto,
  Always,
  Never,
}

impl Command {
  /// Whether the command talks to the server.
  fn needs_server(&self) -> bool {
    !matches!(self, Self::Version { .. } | Self::Completions { .. })
  }
}

impl Cli {
  /// Parse CLI arguments from the environment
  pub fn parse_args() -> Self {
    Self::parse()
  }

  /// Validate CLI arguments
  ///
  /// Returns an error if the CLI configuration is invalid.
  pub fn validate(&self) -> Result<(), String> {
    if self.command.needs_server() && self.endpoint.url.is_none() {
      return Err("--url (or XWIKI_URL) is required".to_string());
    }

    if self.endpoint.wiki.trim().is_empty() {
      return Err("--wiki must not be empty".to_string());
    }

    if self.endpoint.timeout == 0 {
      return Err("--timeout must be at least 1 second".to_string());
    }

    Ok(())
  }

  /// Build the library configuration from the parsed options.
  pub fn endpoint_config(&self) -> Option<EndpointConfig> {
    let url = self.endpoint.url.as_ref()?;
    let non_empty = |value: &Option<String>| value.clone().filter(|v| !v.trim().is_empty());

    Some(EndpointConfig {
      api_entrypoint: self.endpoint.entrypoint.clone(),
      wiki: self.endpoint.wiki.clone(),
      url_scheme: non_empty(&self.endpoint.scheme),
      url_host: non_empty(&self.endpoint.host),
      media: Some(self.endpoint.media.trim().to_string()).filter(|media| !media.is_empty()),
      timeout_secs: self.endpoint.timeout,
      ..EndpointConfig::new(url)
    })
  }
}

/// Parse CLI arguments, initialize shared services, and dispatch to the chosen
/// command.
pub async fn run() {
  let cli = Cli::parse_args();

  init_tracing(&cli.behavior);

  let colors = ColorScheme::new(cli.behavior.color);

  if let Err(e) = cli.validate() {
    eprintln!("{} {}", colors.error("Error:"), e);
    process::exit(4); // Invalid arguments exit code
  }

  match &cli.command {
    Command::Page { space, name } => handle_page_command(space, name, &cli, &colors).await,
    Command::Pages { space, full } => handle_pages_command(space, *full, &cli, &colors).await,
    Command::Properties { space, name } => handle_properties_command(space, name, &cli, &colors).await,
    Command::Groups => handle_groups_command(&cli, &colors).await,
    Command::GroupUsers { group } => handle_group_users_command(group, &cli, &colors).await,
    Command::User { username } => handle_user_command(username, &cli, &colors).await,
    Command::UserProperties { username } => handle_user_properties_command(username, &cli, &colors).await,
    Command::Login => handle_login_command(&cli, &colors).await,
    Command::Download {
      space,
      name,
      output,
      attachment,
      overwrite,
    } => handle_download_command(space, name, output, attachment.as_deref(), *overwrite, &cli, &colors).await,
    Command::Version { json, short } => handle_version_command(*json, *short, &colors),
    Command::Completions { shell } => handle_completions_command(*shell),
  }
}

fn init_tracing(behavior: &BehaviorOptions) {
  let level = if behavior.quiet {
    LevelFilter::ERROR
  } else {
    match behavior.verbose {
      0 => LevelFilter::WARN,
      1 => LevelFilter::INFO,
      2 => LevelFilter::DEBUG,
      _ => LevelFilter::TRACE,
    }
  };

  let env_filter = EnvFilter::builder()
    .with_default_directive(level.into())
    .from_env_lossy();

  let _ = tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .try_init();
}

/// Get custom styles for clap help output
fn get_clap_styles() -> clap::builder::Styles {
  use clap::builder::styling::{AnsiColor, Effects};

  clap::builder::Styles::styled()
    .header(AnsiColor::BrightYellow.on_default() | Effects::BOLD)
    .usage(AnsiColor::BrightYellow.on_default() | Effects::BOLD)
    .literal(AnsiColor::BrightGreen.on_default())
    .placeholder(AnsiColor::BrightCyan.on_default())
    .error(AnsiColor::BrightRed.on_default() | Effects::BOLD)
    .valid(AnsiColor::BrightGreen.on_default())
    .invalid(AnsiColor::BrightRed.on_default())
}
