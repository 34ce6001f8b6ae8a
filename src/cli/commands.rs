use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "camo", about = concat!("camo v", env!("CARGO_PKG_VERSION"), " - track weapon camo unlocks"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different data directory (holds camo.toml and the state file)
    #[arg(short = 'C', long = "dir", global = true)]
    pub dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write camo.toml and seed the state file in the data directory
    Init(InitArgs),
    /// List categories with progress, or the entries of one category
    List(ListArgs),
    /// Flip one entry between done and not done
    Toggle(ToggleArgs),
    /// View or manage the recovery log
    Recovery(RecoveryCmd),
}

#[derive(Args)]
pub struct InitArgs {
    /// Overwrite camo.toml and re-seed, discarding progress
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct ListArgs {
    /// Category to list (default: all categories)
    pub category: Option<String>,
}

#[derive(Args)]
pub struct ToggleArgs {
    /// Entry name
    pub name: String,
    /// Only match inside this category
    #[arg(long)]
    pub category: Option<String>,
}

// ---------------------------------------------------------------------------
// Recovery log
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct RecoveryCmd {
    #[command(subcommand)]
    pub action: Option<RecoveryAction>,
    /// Maximum number of entries to show (default: 10)
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Subcommand)]
pub enum RecoveryAction {
    /// Remove old entries
    Prune(RecoveryPruneArgs),
    /// Print the absolute path to the recovery log
    Path,
}

#[derive(Args)]
pub struct RecoveryPruneArgs {
    /// Remove entries older than this timestamp (default: 30 days ago)
    #[arg(long)]
    pub before: Option<String>,
    /// Remove all entries
    #[arg(long)]
    pub all: bool,
}
