//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "hoist",
    bin_name = "hoist",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Module scaffolding and peer-dependency wiring",
    long_about = "Hoist creates module skeletons and attaches application \
                  and test trees to the module they live in, resolving \
                  peer dependencies into real ones on the way.",
    after_help = "EXAMPLES:\n\
        \x20 hoist setup my-module\n\
        \x20 hoist setup my-widgets --bower-only\n\
        \x20 cd my-module/app && hoist install\n\
        \x20 hoist setup-tests",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new module tree.
    #[command(
        about = "Create a new module",
        after_help = "EXAMPLES:\n\
            \x20 hoist setup my-module\n\
            \x20 hoist setup my-plugin  --plugin\n\
            \x20 hoist setup my-widgets --bower-only\n\
            \x20 hoist setup my-service --node-only --dry-run"
    )]
    Setup(SetupArgs),

    /// Attach the current directory to the module one level up.
    #[command(
        about = "Resolve peers and link the host module",
        after_help = "Run from the `app` or `test` directory of a module. \
            Anywhere else you are asked to confirm first.\n\n\
            EXAMPLES:\n\
            \x20 cd my-module/app && hoist install\n\
            \x20 hoist install --yes"
    )]
    Install(InstallArgs),

    /// Prepare a standalone test harness for the module in the current directory.
    #[command(
        name = "setup-tests",
        about = "Create test/ for an existing module",
        after_help = "EXAMPLES:\n\
            \x20 cd my-module && hoist setup-tests"
    )]
    SetupTests,

    /// List the blueprints available to `setup`.
    #[command(visible_alias = "ls", about = "List available blueprints")]
    Templates,

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 hoist completions bash > ~/.local/share/bash-completion/completions/hoist\n\
            \x20 hoist completions zsh  > ~/.zfunc/_hoist\n\
            \x20 hoist completions fish > ~/.config/fish/completions/hoist.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the effective configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 hoist config get install.node_program\n\
            \x20 hoist config list\n\
            \x20 hoist config path"
    )]
    Config(ConfigCommands),
}

// ── setup ─────────────────────────────────────────────────────────────────────

/// Arguments for `hoist setup`.
///
/// `--bower-only` and `--node-only` are deliberately not declared as a clap
/// conflict: the core rejects the combination with its own error.
#[derive(Debug, Args)]
pub struct SetupArgs {
    /// Module name; also the directory created under the current one.
    #[arg(value_name = "NAME", help = "Module name")]
    pub name: String,

    /// Plugin modules get no `app/` tree.
    #[arg(long = "plugin", help = "Create a plugin (no app/ tree)")]
    pub plugin: bool,

    /// Front-end only: no `lib/` and no root `package.json`.
    #[arg(long = "bower-only", help = "Create a front-end only module")]
    pub bower_only: bool,

    /// Back-end only: no bower files and no protractor harness.
    #[arg(long = "node-only", help = "Create a back-end only module")]
    pub node_only: bool,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

// ── install ───────────────────────────────────────────────────────────────────

/// Arguments for `hoist install`.
#[derive(Debug, Args)]
pub struct InstallArgs {
    /// Answer yes to the location prompt.
    #[arg(
        short = 'y',
        long = "yes",
        conflicts_with = "no",
        help = "Proceed outside app/ or test/ without asking"
    )]
    pub yes: bool,

    /// Answer no to the location prompt.
    #[arg(long = "no", help = "Decline outside app/ or test/ without asking")]
    pub no: bool,
}

impl InstallArgs {
    /// Pre-answer for the location prompt, if a flag gave one.
    pub fn answer(&self) -> Option<bool> {
        match (self.yes, self.no) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `hoist completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `hoist config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `install.node_program`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_setup_with_modes() {
        let cli = Cli::parse_from(["hoist", "setup", "my-module", "--plugin", "--node-only"]);
        let Commands::Setup(args) = cli.command else {
            panic!("expected Setup command");
        };
        assert_eq!(args.name, "my-module");
        assert!(args.plugin);
        assert!(args.node_only);
        assert!(!args.bower_only);
        assert!(!args.dry_run);
    }

    #[test]
    fn conflicting_modes_reach_the_core() {
        // Parsing succeeds; the combination is rejected later.
        let cli = Cli::try_parse_from(["hoist", "setup", "m", "--bower-only", "--node-only"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn setup_requires_a_name() {
        assert!(Cli::try_parse_from(["hoist", "setup"]).is_err());
    }

    #[test]
    fn setup_tests_uses_kebab_name() {
        let cli = Cli::parse_from(["hoist", "setup-tests"]);
        assert!(matches!(cli.command, Commands::SetupTests));
    }

    #[test]
    fn install_answer_from_flags() {
        let answer = |args: &[&str]| {
            let cli = Cli::parse_from(args.iter().copied());
            match cli.command {
                Commands::Install(a) => a.answer(),
                _ => panic!("expected Install command"),
            }
        };
        assert_eq!(answer(&["hoist", "install"]), None);
        assert_eq!(answer(&["hoist", "install", "--yes"]), Some(true));
        assert_eq!(answer(&["hoist", "install", "-y"]), Some(true));
        assert_eq!(answer(&["hoist", "install", "--no"]), Some(false));
    }

    #[test]
    fn install_yes_and_no_conflict() {
        assert!(Cli::try_parse_from(["hoist", "install", "--yes", "--no"]).is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["hoist", "--quiet", "--verbose", "templates"]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["hoist", "templates", "-vv"]);
        assert_eq!(cli.global.verbose, 2);
    }
}
