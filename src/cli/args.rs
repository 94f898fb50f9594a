//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Discover React views and keep the generated route manifest in sync
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Frontend root directory (relative to the config file)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub root: Option<PathBuf>,

    /// Bundler output directory (relative to the config file)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub out_dir: Option<PathBuf>,

    /// Config file path (default: viewwatch.toml)
    #[arg(short = 'C', long, default_value = "viewwatch.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Scan views once and write views.json and the manifest
    #[command(visible_alias = "b")]
    Build,

    /// Scan views, then keep the artifacts updated on file changes
    #[command(visible_alias = "w")]
    Watch {
        /// Quiet period before a batch of changes is processed
        #[arg(long, value_name = "MS")]
        debounce_ms: Option<u64>,
    },

    /// Print the available views for the page router
    #[command(visible_alias = "r")]
    Routes {
        #[command(flatten)]
        args: RoutesArgs,
    },
}

/// Routes command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct RoutesArgs {
    /// views.json to read (default: next to the bundler output directory)
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub views: Option<PathBuf>,

    /// Server route list (JSON array of {path, title, component})
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub server: Option<PathBuf>,

    /// Emit a `window.Vaadin.views = ...;` script instead of JSON
    #[arg(long)]
    pub script: bool,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pub pretty: bool,

    /// Write output to file instead of stdout
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[allow(unused)]
impl Cli {
    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build)
    }
    pub const fn is_watch(&self) -> bool {
        matches!(self.command, Commands::Watch { .. })
    }
    pub const fn is_routes(&self) -> bool {
        matches!(self.command, Commands::Routes { .. })
    }
}
