//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};

/// devprep - developer workstation bootstrap
///
/// Prepare a workstation for cloning private repositories over HTTPS.
#[derive(Parser, Debug)]
#[command(
    name = "devprep",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Bootstrap a developer workstation for private repository access",
    long_about = "devprep installs or upgrades the git client, collects the developer's identity \
                  and access token, and writes them into the git configuration, the credential \
                  store and the shell profile - idempotently, so re-runs only change what drifted.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  devprep\n    \
                  devprep --host git.example.org\n    \
                  REPO_AUTH_TOKEN=<token> devprep\n    \
                  devprep completions --shell zsh\n\n\
                  \x1b[1m\x1b[32mDocumentation:\x1b[0m\n    \
                  https://github.com/devprep/devprep"
)]
pub struct Cli {
    /// Repository host written to the credential store
    #[arg(long, global = true, default_value = "github.com")]
    pub host: String,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive bootstrap (the default when no command is given)
    Setup,

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    devprep completions --shell bash > ~/.bash_completion.d/devprep\n\n\
                  Generate zsh completions:\n    devprep completions --shell zsh > ~/.zfunc/_devprep\n\n\
                  Generate fish completions:\n    devprep completions --shell fish > ~/.config/fish/completions/devprep.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long)]
    pub shell: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_bare_invocation() {
        let cli = Cli::try_parse_from(["devprep"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.host, "github.com");
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_parsing_setup() {
        let cli = Cli::try_parse_from(["devprep", "setup"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Setup)));
    }

    #[test]
    fn test_cli_parsing_custom_host() {
        let cli = Cli::try_parse_from(["devprep", "--host", "git.example.org"]).unwrap();
        assert_eq!(cli.host, "git.example.org");
    }

    #[test]
    fn test_cli_parsing_version() {
        let cli = Cli::try_parse_from(["devprep", "version"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Version)));
    }

    #[test]
    fn test_cli_parsing_completions() {
        let cli = Cli::try_parse_from(["devprep", "completions", "--shell", "zsh"]).unwrap();
        match cli.command {
            Some(Commands::Completions(args)) => assert_eq!(args.shell, "zsh"),
            _ => panic!("Expected Completions command"),
        }
    }

    #[test]
    fn test_cli_global_options() {
        let cli = Cli::try_parse_from(["devprep", "-v", "setup"]).unwrap();
        assert!(cli.verbose);
    }
}
