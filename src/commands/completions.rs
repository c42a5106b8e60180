//! Shell completion scripts for `xwiki`.

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::{Shell as CompletionShell, generate};

use crate::cli::{Cli, Shell};

/// Handle the `completions` subcommand by printing the script to stdout.
pub(crate) fn handle_completions_command(shell: Shell) {
  write_completions(shell, &mut io::stdout());
}

fn write_completions(shell: Shell, out: &mut dyn Write) {
  let mut cmd = Cli::command();
  let bin_name = cmd.get_name().to_string();

  let target = match shell {
    Shell::Bash => CompletionShell::Bash,
    Shell::Zsh => CompletionShell::Zsh,
    Shell::Fish => CompletionShell::Fish,
    Shell::Powershell => CompletionShell::PowerShell,
    Shell::Elvish => CompletionShell::Elvish,
  };

  generate(target, &mut cmd, bin_name, out);
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn bash_completions_cover_subcommands() {
    let mut out = Vec::new();
    write_completions(Shell::Bash, &mut out);

    let script = String::from_utf8(out).unwrap();
    assert!(script.contains("xwiki"));
    assert!(script.contains("group-users"));
    assert!(script.contains("user-properties"));
  }
}
