//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::CONFIG_ENV;

/// Inspect agent definition metadata in frontmatter and outline documents
#[derive(Parser, Debug)]
#[command(name = "agentmeta")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = CONFIG_ENV, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print the metadata and body extracted from a document
    Parse {
        /// Document to parse
        file: PathBuf,

        /// Output format (defaults to the configured format)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Additionally permit this key (repeatable)
        #[arg(long = "allow", value_name = "KEY")]
        allow: Vec<String>,

        /// Permit every key except `system`
        #[arg(long)]
        allow_any: bool,
    },

    /// Print a document as a typed agent definition (JSON)
    Agent {
        /// Agent document
        file: PathBuf,
    },

    /// Validate documents and report each outcome
    Check {
        /// Documents to check
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// List the agents defined in a directory
    List {
        /// Directory to scan
        dir: PathBuf,
    },

    /// Configuration file operations
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// `config` subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,
    /// Show the effective configuration as TOML
    Show,
}

/// Rendering for `parse` output.
#[derive(
    ValueEnum, Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    Json,
    /// YAML
    Yaml,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_parse_command_defaults() {
        let cli = parse(&["agentmeta", "parse", "agent.md"]);
        assert!(!cli.verbose);
        assert_eq!(
            cli.command,
            Command::Parse {
                file: PathBuf::from("agent.md"),
                format: None,
                allow: Vec::new(),
                allow_any: false,
            }
        );
    }

    #[test]
    fn test_parse_command_options() {
        let cli = parse(&[
            "agentmeta", "-v", "parse", "a.org", "--format", "yaml", "--allow", "color",
            "--allow", "owner", "--allow-any",
        ]);
        assert!(cli.verbose);
        let Command::Parse {
            format,
            allow,
            allow_any,
            ..
        } = cli.command
        else {
            unreachable!("expected parse command");
        };
        assert_eq!(format, Some(OutputFormat::Yaml));
        assert_eq!(allow, ["color", "owner"]);
        assert!(allow_any);
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = parse(&["agentmeta", "list", "agents", "--config", "/tmp/am.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/am.toml")));
        assert_eq!(
            cli.command,
            Command::List {
                dir: PathBuf::from("agents")
            }
        );
    }

    #[test]
    fn test_check_requires_files() {
        assert!(Cli::try_parse_from(["agentmeta", "check"]).is_err());
        let cli = parse(&["agentmeta", "check", "a.md", "b.org"]);
        assert_eq!(
            cli.command,
            Command::Check {
                files: vec![PathBuf::from("a.md"), PathBuf::from("b.org")]
            }
        );
    }

    #[test]
    fn test_config_subcommands() {
        let cli = parse(&["agentmeta", "config", "path"]);
        assert_eq!(
            cli.command,
            Command::Config {
                action: ConfigAction::Path
            }
        );
        assert!(Cli::try_parse_from(["agentmeta", "config", "edit"]).is_err());
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Cli::try_parse_from(["agentmeta", "parse", "a.md", "--format", "xml"]).is_err());
    }
}
