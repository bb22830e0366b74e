//! Shell completion scripts for bash, zsh, fish, `PowerShell` and elvish.
//!
//! ```bash
//! benchview completions zsh -o ~/.zsh/completions/_benchview
//! benchview completions fish > ~/.config/fish/completions/benchview.fish
//! ```

use crate::cli::{Cli, CompletionsArgs, ShellType};
use crate::error::Result;
use clap::CommandFactory;
use clap_complete::{Shell, generate};
use std::io::{self, Write};
use tracing::info;

const BIN_NAME: &str = "benchview";

/// Execute the completions command.
///
/// # Errors
///
/// Returns an error if the output file cannot be written.
pub fn execute(args: &CompletionsArgs) -> Result<()> {
    let shell = convert_shell_type(args.shell);

    if let Some(output_path) = &args.output {
        let mut file = std::fs::File::create(output_path)?;
        write_script(shell, &mut file);
        info!(shell = %shell, path = %output_path.display(), "Wrote completion script");
        eprintln!("Generated {shell} completions to {}", output_path.display());
    } else {
        write_script(shell, &mut io::stdout());
    }

    Ok(())
}

fn write_script(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, BIN_NAME, out);
}

const fn convert_shell_type(shell: ShellType) -> Shell {
    match shell {
        ShellType::Bash => Shell::Bash,
        ShellType::Zsh => Shell::Zsh,
        ShellType::Fish => Shell::Fish,
        ShellType::PowerShell => Shell::PowerShell,
        ShellType::Elvish => Shell::Elvish,
    }
}
