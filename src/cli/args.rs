//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

/// Orbit map analyzer: orbit count checksums and orbital transfers
#[derive(Parser, Debug)]
#[command(name = "orbitmap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Explicit config file (TOML)
    #[arg(short, long, global = true, env = "ORBITMAP_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Name of the universal center of mass (overrides config)
    #[arg(long, global = true)]
    pub root: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// The requested subcommand, or a plain `run` when none was given.
    pub fn command_or_default(&self) -> Commands {
        self.command.clone().unwrap_or_default()
    }
}

/// Orbit map source shared by the map commands.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Orbit map file, one `PARENT)CHILD` per line (default: stdin, `-` for stdin)
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the orbit count checksum (and optionally the transfer count)
    Run {
        #[command(flatten)]
        input: InputArgs,
        /// Also print the orbital transfers between the two bodies' parents
        #[arg(short, long)]
        transfers: bool,
        /// Transfer start body (overrides config)
        #[arg(long)]
        from: Option<String>,
        /// Transfer end body (overrides config)
        #[arg(long)]
        to: Option<String>,
    },

    /// Show the orbit map as tree
    Tree {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Show the orbit chain from the root down to a body
    Chain {
        /// Body to trace
        name: String,
        #[command(flatten)]
        input: InputArgs,
    },

    /// Show orbit map statistics
    Info {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Run {
            input: InputArgs::default(),
            transfers: false,
            from: None,
            to: None,
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Show effective settings
    Show,
    /// Print a template config file
    Template,
    /// Show the global config file location
    Path,
}
