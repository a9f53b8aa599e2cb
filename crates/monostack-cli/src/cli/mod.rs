//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value parsers.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

use monostack_core::domain::ModuleChoice;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "monostack",
    bin_name = "monostack",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Full-stack project generator",
    long_about = "Monostack creates complete full-stack project structures: \
                  one directory per selected module, a docker-compose file \
                  wired to your choices, and an initial git commit.",
    after_help = "EXAMPLES:\n\
        \x20 monostack new my-app --backend python/flask --frontend-web javascript/react --database postgres\n\
        \x20 monostack new my-app --backend java/spring-boot --yes\n\
        \x20 monostack list\n\
        \x20 monostack completions bash > /usr/share/bash-completion/completions/monostack",
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
    /// Create a new full-stack project.
    #[command(
        visible_alias = "n",
        about = "Create a new project",
        after_help = "EXAMPLES:\n\
            \x20 monostack new my-app --backend python/django --database postgres\n\
            \x20 monostack new my-app --frontend-web javascript/react --frontend-mobile javascript/expo\n\
            \x20 monostack new my-app           # interactive selection"
    )]
    New(NewArgs),

    /// List available technologies from the catalog.
    #[command(
        visible_alias = "ls",
        about = "List available technologies",
        after_help = "EXAMPLES:\n\
            \x20 monostack list\n\
            \x20 monostack list --format json"
    )]
    List(ListArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 monostack completions bash > ~/.local/share/bash-completion/completions/monostack\n\
            \x20 monostack completions zsh  > ~/.zfunc/_monostack\n\
            \x20 monostack completions fish > ~/.config/fish/completions/monostack.fish"
    )]
    Completions(CompletionsArgs),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `monostack new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project name or path.  A plain name creates `./name`; a path like
    /// `../foo` places the project one level up.
    #[arg(value_name = "NAME", default_value = "mono-app", help = "Project name or path")]
    pub name: String,

    /// Backend selection as `language/framework`.
    #[arg(
        short = 'b',
        long = "backend",
        value_name = "LANG/FRAMEWORK",
        value_parser = parse_choice,
        help = "Backend, e.g. python/flask"
    )]
    pub backend: Option<ModuleChoice>,

    /// Web frontend selection as `language/framework`.
    #[arg(
        short = 'w',
        long = "frontend-web",
        value_name = "LANG/FRAMEWORK",
        value_parser = parse_choice,
        help = "Web frontend, e.g. javascript/react"
    )]
    pub frontend_web: Option<ModuleChoice>,

    /// Mobile frontend selection as `language/framework`.
    #[arg(
        short = 'm',
        long = "frontend-mobile",
        value_name = "LANG/FRAMEWORK",
        value_parser = parse_choice,
        help = "Mobile frontend, e.g. dart/flutter"
    )]
    pub frontend_mobile: Option<ModuleChoice>,

    /// Desktop frontend selection as `language/framework`.
    #[arg(
        short = 'd',
        long = "frontend-desktop",
        value_name = "LANG/FRAMEWORK",
        value_parser = parse_choice,
        help = "Desktop frontend, e.g. javascript/electron"
    )]
    pub frontend_desktop: Option<ModuleChoice>,

    /// Database selection by name.
    #[arg(
        long = "database",
        value_name = "NAME",
        help = "Database, e.g. postgres"
    )]
    pub database: Option<String>,

    /// Generate a working Hello World example wired across modules.
    #[arg(long = "hello-world", help = "Generate a Hello World example")]
    pub hello_world: bool,

    /// Treat any module failure as a hard error (exit 1).
    #[arg(long = "strict", help = "Fail the run when any module fails")]
    pub strict: bool,

    /// Skip the confirmation prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip confirmation and create immediately"
    )]
    pub yes: bool,

    /// Proceed even if the target directory already exists.
    #[arg(long = "force", help = "Generate into an existing directory")]
    pub force: bool,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

impl NewArgs {
    /// True when at least one selection flag was passed, meaning the
    /// interactive prompt should be skipped.
    pub fn has_selections(&self) -> bool {
        self.backend.is_some()
            || self.frontend_web.is_some()
            || self.frontend_mobile.is_some()
            || self.frontend_desktop.is_some()
            || self.database.is_some()
    }
}

/// Parse `language/framework` into a [`ModuleChoice`].
fn parse_choice(value: &str) -> Result<ModuleChoice, String> {
    match value.split_once('/') {
        Some((language, framework)) if !language.is_empty() && !framework.is_empty() => {
            Ok(ModuleChoice::new(language, framework))
        }
        _ => Err(format!(
            "expected LANG/FRAMEWORK (e.g. python/flask), got '{value}'"
        )),
    }
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `monostack list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// JSON document.
    Json,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `monostack completions`.
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

// ── tests ─────────────────────────────────────────────────────────────────────
