//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod cache;
pub mod completions;
pub mod context;
pub mod org;

pub use args::{CacheAge, GlobalOptions, OutputFormat};
pub use context::CommandContext;

/// awsorg - discover, cache and display the structure of an AWS Organization
#[derive(Parser, Debug)]
#[command(name = "awsorg")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// AWS profile to read the organization with (also names the cache entry)
    #[arg(short = 'p', long, global = true, env = "AWSORG_PROFILE", hide_env = true)]
    pub profile: Option<String>,

    /// Friendly name for the profile, shown in output
    #[arg(short = 'n', long, global = true)]
    pub profile_name: Option<String>,

    /// Maximum cache age before rebuilding, e.g. 12h or 2d [default: 1d]
    #[arg(short = 'c', long, global = true, env = "AWSORG_CACHE_AGE", hide_env = true)]
    pub cache_age: Option<CacheAge>,

    /// AWS region for the Organizations endpoint
    #[arg(long, global = true, env = "AWSORG_REGION", hide_env = true)]
    pub region: Option<String>,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "AWSORG_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "AWSORG_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override cache directory location
    #[arg(long, global = true, env = "AWSORG_CACHE_DIR", hide_env = true)]
    pub cache_dir: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "AWSORG_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rebuild the cached organization tree now
    Refresh,

    /// List organization roots
    Roots,

    /// Summarise roots and every organizational unit
    Summary,

    /// Display the full OU tree including accounts
    Tree {
        /// Only show the subtree under this root or OU (ID or name)
        #[arg(short = 'u', long)]
        unit: Option<String>,
    },

    /// Print the cached snapshot
    Dump {
        /// Print as JSON instead of YAML
        #[arg(long)]
        json: bool,
    },

    /// Inspect the local snapshot cache
    #[command(subcommand)]
    Cache(CacheCommands),

    /// Generate shell completions
    #[command(after_help = "\
Examples:
  bash:   awsorg completion bash > /etc/bash_completion.d/awsorg
  zsh:    awsorg completion zsh > \"${fpath[1]}/_awsorg\"
  fish:   awsorg completion fish > ~/.config/fish/completions/awsorg.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Cache management subcommands
#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// List cached profiles with their age and size
    List,
    /// Print cache directory path
    Path,
}
