use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use majorflow::interaction::FlowFilter;

use crate::config::Config;

#[derive(Parser)]
#[command(name = "majorflow")]
#[command(author, version, about)]
#[command(long_about = "Circular network view of migration flows between majors.\n\n\
    Majors sit on a ring grouped by category; flows between them are drawn as\n\
    curves that bow away from unrelated majors.\n\n\
    Examples:\n  \
    majorflow majors.yaml             Open the viewer (fullscreen)\n  \
    majorflow majors.yaml --windowed  Open the viewer in a window\n  \
    majorflow dump majors.yaml --all  Print node, edge and label data\n  \
    majorflow stats majors.yaml       Summarise layout and routing")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Dataset file (YAML) to view
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Launch in a window instead of fullscreen
    #[arg(long, global = false)]
    pub windowed: bool,

    #[command(flatten)]
    pub filter: FilterArgs,

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

/// Which edges to include.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only show edges whose total flow is at least this
    #[arg(long, value_name = "N")]
    pub threshold: Option<u64>,

    /// Show every edge regardless of flow
    #[arg(long, conflicts_with = "threshold")]
    pub all: bool,
}

impl FilterArgs {
    /// Command-line choice layered over the user's configured default.
    pub fn resolve(&self, config: &Config) -> FlowFilter {
        if self.all {
            FlowFilter::All
        } else if let Some(threshold) = self.threshold {
            FlowFilter::AtLeast(threshold)
        } else {
            config.filter()
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print node, edge and label datasets with curve paths as YAML
    Dump {
        /// Dataset file (YAML)
        file: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Summarise layout, aggregation and routing for a dataset
    Stats {
        /// Dataset file (YAML)
        file: PathBuf,
    },

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: clap_complete::Shell,
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
        /// Configuration key (defaults.theme, defaults.threshold, defaults.filter)
        key: String,

        /// Value to set
        value: String,
    },
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Dump { file, filter }) => {
                let config = Config::load_or_default();
                crate::commands::dump::run(&file, filter.resolve(&config))
            }
            Some(Commands::Stats { file }) => {
                let config = Config::load_or_default();
                crate::commands::stats::run(&file, config.threshold())
            }
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                crate::commands::print_version();
                Ok(())
            }
            None => {
                if let Some(file) = self.file {
                    if !file.exists() {
                        anyhow::bail!("File not found: {}", file.display());
                    }
                    let config = Config::load_or_default();
                    let filter = self.filter.resolve(&config);
                    crate::app::run(file, self.windowed, filter, &config)
                } else {
                    use clap::CommandFactory;
                    let mut cmd = Self::command();
                    cmd.print_help()?;
                    println!();
                    Ok(())
                }
            }
        }
    }
}
