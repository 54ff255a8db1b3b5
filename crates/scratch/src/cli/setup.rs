use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format for releases: "v0.3.0"
/// Format for dev builds: "v0.3.0\ndev: abc1234 2024-01-15 14:30"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" {
            format!("v{}", VERSION)
        } else {
            format!("v{}\ndev: {} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "scratch",
    bin_name = "scratch",
    version = get_version(),
    disable_help_subcommand = true
)]
#[command(about = "Persistent scratch buffers, one per project", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the records (overrides SCRATCH_DIR and the config file)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

/// Which scratch a command acts on. With neither flag, the default scratch.
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Scratch name
    #[arg(conflicts_with = "project")]
    pub name: Option<String>,

    /// Use the scratch of the project containing the current directory
    #[arg(short, long)]
    pub project: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open a scratch in $EDITOR (the default command)
    #[command(alias = "o", display_order = 1)]
    Open {
        #[command(flatten)]
        target: TargetArgs,

        /// Start empty, ignoring the saved record
        #[arg(long)]
        discard: bool,
    },

    /// Print a scratch's saved content
    #[command(alias = "cat", display_order = 2)]
    Show {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Replace a scratch's content with stdin
    #[command(display_order = 3)]
    Write {
        #[command(flatten)]
        target: TargetArgs,

        /// Append to the existing content instead of replacing it
        #[arg(short, long)]
        append: bool,
    },

    /// List saved scratches
    #[command(alias = "ls", display_order = 10)]
    List,

    /// Print the record file path of a scratch
    #[command(display_order = 11)]
    Path {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Delete one saved scratch
    #[command(alias = "rm", display_order = 12)]
    Delete {
        /// Scratch name
        name: String,
    },

    /// Delete every saved scratch
    #[command(display_order = 13)]
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show the effective configuration
    #[command(display_order = 20)]
    Config,
}
