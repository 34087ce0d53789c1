use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::Config;
use crate::loader::ProposalSource;

#[derive(Parser)]
#[command(name = "propdeck")]
#[command(author, version, about)]
#[command(long_about = "A proposal presentation tool for consulting engagements.\n\n\
    Open a proposal by its published slug, or from a local JSON document.\n\n\
    Examples:\n  \
    propdeck acme-q3                  Present the published proposal (fullscreen)\n  \
    propdeck acme-q3 --windowed       Present in a window\n  \
    propdeck proposal.json --slide 3  Open a local document on slide 3\n  \
    propdeck config show              Show the current configuration")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Proposal slug, or path to a local proposal JSON document
    pub proposal: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Launch in a window instead of fullscreen
    #[arg(long, global = false)]
    pub windowed: bool,

    /// Start on a specific slide (1-indexed)
    #[arg(long, global = false)]
    pub slide: Option<usize>,

    /// Back office base URL (overrides api.base_url from the config)
    #[arg(long, global = false)]
    pub base_url: Option<String>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. defaults.theme, defaults.transition, api.base_url)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                crate::banner::print_banner_with_version();
                Ok(())
            }
            None => {
                let Some(proposal) = self.proposal else {
                    use clap::CommandFactory;
                    let mut cmd = Self::command();
                    cmd.print_help()?;
                    println!();
                    return Ok(());
                };
                let mut config = Config::load_or_default();
                if let Some(base_url) = self.base_url {
                    config.set("api.base_url", &base_url)?;
                }
                let source = resolve_source(&proposal, &config)?;
                crate::app::run(source, self.windowed, self.slide, &config)
            }
        }
    }
}

/// A `.json` argument is a local document; anything else is treated as a
/// published slug.
fn resolve_source(proposal: &str, config: &Config) -> anyhow::Result<ProposalSource> {
    if proposal.ends_with(".json") {
        let path = PathBuf::from(proposal);
        if !path.exists() {
            anyhow::bail!("File not found: {}", path.display());
        }
        return Ok(ProposalSource::File(path));
    }
    if proposal.is_empty()
        || !proposal
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        anyhow::bail!("Invalid proposal slug: {proposal}");
    }
    Ok(ProposalSource::Slug {
        base_url: config.base_url().to_string(),
        slug: proposal.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_argument_resolves_against_the_configured_base() {
        let mut config = Config::default();
        config
            .set("api.base_url", "https://internal.example.se")
            .unwrap();
        match resolve_source("acme-q3", &config).unwrap() {
            ProposalSource::Slug { base_url, slug } => {
                assert_eq!(base_url, "https://internal.example.se");
                assert_eq!(slug, "acme-q3");
            }
            _ => panic!("expected a slug source"),
        }
    }

    #[test]
    fn missing_json_file_is_an_error() {
        let config = Config::default();
        assert!(resolve_source("does-not-exist.json", &config).is_err());
    }

    #[test]
    fn malformed_slug_is_rejected() {
        let config = Config::default();
        assert!(resolve_source("acme/../../etc", &config).is_err());
        assert!(resolve_source("", &config).is_err());
    }
}
