//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Launchkit - deployment bootstrap
///
/// Upgrade the package manager, install declared dependencies, launch the application.
#[derive(Parser, Debug)]
#[command(
    name = "launchkit",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Fail-fast deployment bootstrap",
    long_about = "Launchkit prepares a runtime environment and starts an application: it upgrades \
                  the package manager, installs the dependencies declared in the manifest, then \
                  launches the application and exits with its exit code. The first failing step \
                  stops the sequence.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  launchkit\n    \
                  launchkit --manifest deps/requirements.txt --entry-point main.py\n    \
                  launchkit plan\n    \
                  launchkit plan --json\n\n\
                  \x1b[1m\x1b[32mConfiguration:\x1b[0m\n    \
                  launchkit.yaml in the workspace, or --config <FILE>"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options shared by every command
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Workspace directory (defaults to current directory)
    #[arg(long, short = 'w', global = true)]
    pub workspace: Option<PathBuf>,

    /// Configuration file (replaces the workspace launchkit.yaml)
    #[arg(long, short = 'c', global = true, env = "LAUNCHKIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Dependency manifest path, relative to the workspace
    #[arg(long, global = true, value_name = "PATH", env = "LAUNCHKIT_MANIFEST")]
    pub manifest: Option<String>,

    /// Application entry point, relative to the workspace
    #[arg(long, global = true, value_name = "PATH", env = "LAUNCHKIT_ENTRY_POINT")]
    pub entry_point: Option<String>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress step banners
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the bootstrap sequence (default)
    Run,

    /// Show the resolved steps without running them
    Plan(PlanArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the plan command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show the plan for the current directory:\n    launchkit plan\n\n\
                  Show the plan as JSON:\n    launchkit plan --json\n\n\
                  Show the plan with another manifest:\n    launchkit plan --manifest dev.txt")]
pub struct PlanArgs {
    /// Print the plan as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    launchkit completions --shell bash > ~/.bash_completion.d/launchkit\n\n\
                  Generate zsh completions:\n    launchkit completions --shell zsh > ~/.zfunc/_launchkit\n\n\
                  Generate fish completions:\n    launchkit completions --shell fish > ~/.config/fish/completions/launchkit.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long)]
    pub shell: String,
}
