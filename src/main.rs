//! xwiki - Browse an XWiki server from the command line
//!
//! This is the main entry point for the CLI application.

#[tokio::main]
async fn main() {
  xwiki_client::cli::run().await;
}
