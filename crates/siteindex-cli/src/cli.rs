use std::path::PathBuf;

use clap::{value_parser, ArgAction, Args, Parser, Subcommand, ValueEnum};
use siteindex_core::RenderStrategy;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Build the project index page for a static site",
    long_about = "Scans the site for sub-projects (directories with an index.html), records their \
                  title, category and description in projects.json, and regenerates the top-level \
                  index page grouped by category.",
    disable_help_subcommand = true,
    after_help = "Examples:\n  siteindex\n  siteindex --commit-msg \"[Games] add snake\"\n  COMMIT_MSG=\"Category: Tools\" siteindex generate --dry-run\n  siteindex --json list\n"
)]
#[allow(clippy::struct_excessive_bools)]
pub struct SiteIndexCli {
    #[arg(
        short,
        long,
        help = "Suppress human output (errors still print to stderr)",
        global = true
    )]
    pub quiet: bool,
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        help = "Increase logging (-vv reaches debug)",
        global = true
    )]
    pub verbose: u8,
    #[arg(long, help = "Force trace logging regardless of -v/-q", global = true)]
    pub trace: bool,
    #[arg(
        long,
        help = "Emit {status,message,details} JSON envelopes",
        global = true
    )]
    pub json: bool,
    #[arg(long, help = "Disable colored human output", global = true)]
    pub no_color: bool,
    #[arg(
        long,
        value_name = "DIR",
        value_parser = value_parser!(PathBuf),
        help = "Site root to scan (defaults to the current directory)",
        global = true
    )]
    pub root: Option<PathBuf>,
    #[arg(
        long,
        value_name = "PATH",
        value_parser = value_parser!(PathBuf),
        help = "Project store, relative to the root (defaults to projects.json or $SITEINDEX_STORE)",
        global = true
    )]
    pub store: Option<PathBuf>,
    #[arg(
        long,
        value_name = "PATH",
        value_parser = value_parser!(PathBuf),
        help = "Index page, relative to the root (defaults to index.html or $SITEINDEX_INDEX)",
        global = true
    )]
    pub index: Option<PathBuf>,
    #[command(flatten)]
    pub generate: GenerateArgs,
    #[command(subcommand)]
    pub command: Option<CommandGroupCli>,
}

#[derive(Subcommand, Debug)]
pub enum CommandGroupCli {
    #[command(
        about = "Rescan projects, update projects.json, and re-render the index page (default).",
        override_usage = "siteindex generate [--commit-msg TEXT] [--strategy template|full] [--dry-run]",
        after_help = "Examples:\n  siteindex generate\n  siteindex generate --commit-msg \"[Tools] add clock\"\n  siteindex generate --strategy full\n"
    )]
    Generate(GenerateArgs),
    #[command(
        about = "Print the recorded projects grouped by category.",
        after_help = "Examples:\n  siteindex list\n  siteindex --json list\n"
    )]
    List,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    #[arg(
        long = "commit-msg",
        value_name = "TEXT",
        help = "Commit message used to categorize new projects (falls back to $COMMIT_MSG)"
    )]
    pub commit_msg: Option<String>,
    #[arg(
        long,
        value_enum,
        help = "Fill the existing page's templates, or write a full page from scratch [default: template]"
    )]
    pub strategy: Option<StrategyArg>,
    #[arg(long, help = "Report what would change without writing any file")]
    pub dry_run: bool,
}

impl GenerateArgs {
    /// True when any generate option was passed explicitly.
    pub fn any_given(&self) -> bool {
        self.commit_msg.is_some() || self.strategy.is_some() || self.dry_run
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StrategyArg {
    #[default]
    Template,
    Full,
}

impl From<StrategyArg> for RenderStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Template => RenderStrategy::Template,
            StrategyArg::Full => RenderStrategy::Full,
        }
    }
}
