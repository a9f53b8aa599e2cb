//! Implementation of the `monostack new` command.
//!
//! Responsibility: translate CLI arguments (or interactive answers) into a
//! `SelectionSet`, call the core generate service, and display results.
//! No business logic lives here.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use monostack_adapters::{EmbeddedCatalogStore, FileCatalogStore, LocalFilesystem, ShellRunner};
use monostack_core::{
    application::{GenerateOptions, GenerateService, GenerationReport, ports::CatalogStore},
    domain::{ModuleKind, SelectionSet},
};

use crate::{
    cli::{NewArgs, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    gitignore::GitignoreGenerator,
    hello_world::HelloWorldGenerator,
    output::OutputManager,
};

/// Execute the `monostack new` command.
///
/// Dispatch sequence:
/// 1. Parse and validate the project name / output path
/// 2. Build the selection set (flags, or interactive prompt)
/// 3. Confirm with user unless `--yes` or `--quiet`
/// 4. Early-exit if `--dry-run`
/// 5. Execute generation via `GenerateService`
/// 6. Report per-module results and next-steps guidance
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Resolve project path
    let (project_name, project_path) = resolve_project_path(&args.name, &config)?;
    validate_project_name(&project_name)?;

    // 2. Build selections (flags, or prompt when none are given)
    let store = build_store(&config);
    let selections = build_selections(&args, &config, store.as_ref())?;
    if selections.is_empty() {
        return Err(CliError::InvalidInput {
            message: "no modules or database selected".into(),
        });
    }

    debug!(
        modules = selections.module_count(),
        database = selections.database().unwrap_or("none"),
        "Selections resolved"
    );

    // 3. Show configuration and confirm
    if !global.quiet && !args.yes {
        show_configuration(&selections, &project_name, &project_path, &output)?;
        if !confirm()? {
            return Err(CliError::Cancelled);
        }
    }

    // 4. Check for existing directory
    if project_path.exists() && !args.force {
        return Err(CliError::ProjectExists { path: project_path });
    }

    // 5. Dry run: describe but do not write.
    if args.dry_run {
        output.info(&format!(
            "Dry run: would create '{}' at {}",
            project_name,
            project_path.display(),
        ))?;
        for (kind, choice) in selections.modules() {
            output.info(&format!("  {}: {} ({})", kind, choice.framework, choice.language))?;
        }
        if let Some(db) = selections.database() {
            output.info(&format!("  database: {db}"))?;
        }
        return Ok(());
    }

    // 6. Create adapters and generate
    let mut service = GenerateService::new(
        store,
        Box::new(ShellRunner::new()),
        Box::new(LocalFilesystem::new()),
    )
    .with_options(GenerateOptions {
        command_timeout: config.command_timeout(),
    })
    .with_extra(Box::new(GitignoreGenerator::new()));

    if args.hello_world {
        service = service.with_extra(Box::new(HelloWorldGenerator::new()));
    }

    output.header(&format!("Creating '{project_name}'..."))?;
    info!(project = %project_name, path = %project_path.display(), "Generation started");

    // Installers (npx, pip, cargo) can take a while; show a spinner on TTYs.
    // `ProgressBar::new_spinner` is a no-op draw target when stderr is piped.
    let spinner = make_spinner(&global);
    let result = service.generate(&project_path, &selections);
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let report = result.map_err(CliError::Core)?;

    info!(project = %project_name, "Generation completed");

    // 7. Per-module results + next steps
    report_results(&report, &output)?;

    if args.strict && !report.all_modules_succeeded() {
        return Err(CliError::ModulesFailed {
            failed: report
                .failed_modules()
                .into_iter()
                .map(String::from)
                .collect(),
        });
    }

    output.success(&format!("Project '{project_name}' created!"))?;

    if !global.quiet {
        output.print("")?;
        output.print("Next steps:")?;
        output.print(&format!("  cd {project_name}"))?;
        output.print("  cd infra && docker compose up --build -d")?;
    }

    Ok(())
}

/// Pick the catalog source: user files when configured, built-in otherwise.
pub(crate) fn build_store(config: &AppConfig) -> Box<dyn CatalogStore> {
    match (
        &config.catalog.commands_path,
        &config.catalog.compose_template_path,
    ) {
        (Some(commands), Some(template)) => {
            Box::new(FileCatalogStore::new(commands.clone(), template.clone()))
        }
        _ => Box::new(EmbeddedCatalogStore::new()),
    }
}

// ── Selection assembly ────────────────────────────────────────────────────────

fn build_selections(
    args: &NewArgs,
    config: &AppConfig,
    store: &dyn CatalogStore,
) -> CliResult<SelectionSet> {
    if args.has_selections() {
        let mut selections = SelectionSet::new();
        if let Some(choice) = &args.backend {
            selections.set_module(ModuleKind::Backend, choice.clone());
        }
        if let Some(choice) = &args.frontend_web {
            selections.set_module(ModuleKind::FrontendWeb, choice.clone());
        }
        if let Some(choice) = &args.frontend_mobile {
            selections.set_module(ModuleKind::FrontendMobile, choice.clone());
        }
        if let Some(choice) = &args.frontend_desktop {
            selections.set_module(ModuleKind::FrontendDesktop, choice.clone());
        }
        match (&args.database, &config.defaults.database) {
            (Some(db), _) => selections.set_database(db.clone()),
            (None, Some(db)) => selections.set_database(db.clone()),
            (None, None) => {}
        }
        return Ok(selections);
    }

    prompt_selections(store)
}

#[cfg(feature = "interactive")]
fn prompt_selections(store: &dyn CatalogStore) -> CliResult<SelectionSet> {
    use std::io::IsTerminal as _;

    if !std::io::stdin().is_terminal() {
        // Piped stdin cannot answer prompts; require explicit flags.
        return Err(CliError::InvalidInput {
            message: "no selection flags given and stdin is not a terminal".into(),
        });
    }

    let catalog = store.load_catalog().map_err(CliError::Core)?;
    crate::prompt::prompt_selections(&catalog)
}

#[cfg(not(feature = "interactive"))]
fn prompt_selections(_store: &dyn CatalogStore) -> CliResult<SelectionSet> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}

// ── Path resolution ───────────────────────────────────────────────────────────

pub fn resolve_project_path(name: &str, config: &AppConfig) -> CliResult<(String, PathBuf)> {
    // A configured default only applies when the user kept the built-in
    // placeholder name.
    let name = if name == "mono-app" {
        config.defaults.project_name.as_deref().unwrap_or(name)
    } else {
        name
    };

    let path = Path::new(name);
    let project_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CliError::InvalidProjectName {
            name: name.into(),
            reason: "cannot extract valid project name".into(),
        })?
        .to_string();

    Ok((project_name, path.to_path_buf()))
}

fn validate_project_name(name: &str) -> CliResult<()> {
    if name.is_empty() {
        return Err(CliError::InvalidProjectName {
            name: name.into(),
            reason: "name cannot be empty".into(),
        });
    }
    if name.starts_with('.') {
        return Err(CliError::InvalidProjectName {
            name: name.into(),
            reason: "name cannot start with '.'".into(),
        });
    }
    Ok(())
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn make_spinner(global: &GlobalArgs) -> Option<indicatif::ProgressBar> {
    use std::io::IsTerminal as _;

    if global.quiet || !std::io::stderr().is_terminal() {
        return None;
    }
    let pb = indicatif::ProgressBar::new_spinner();
    pb.set_message("Running module installers...");
    pb.enable_steady_tick(std::time::Duration::from_millis(120));
    Some(pb)
}

fn report_results(report: &GenerationReport, output: &OutputManager) -> CliResult<()> {
    for (module, ok) in &report.modules {
        output.module_result(module, *ok)?;
    }
    if !report.compose_written {
        output.warning("docker-compose file could not be written")?;
    }
    if !report.docs_written {
        output.warning("project documentation could not be written")?;
    }
    if !report.git_initialized {
        output.warning("git repository was not fully initialized")?;
    }
    Ok(())
}

fn show_configuration(
    selections: &SelectionSet,
    name: &str,
    project_path: &Path,
    out: &OutputManager,
) -> CliResult<()> {
    out.header("Configuration")?;
    out.print(&format!("  Project:  {name}"))?;
    for (kind, choice) in selections.modules() {
        out.print(&format!(
            "  {:16} {} ({})",
            format!("{}:", kind.title()),
            choice.framework,
            choice.language
        ))?;
    }
    if let Some(db) = selections.database() {
        out.print(&format!("  Database: {db}"))?;
    }
    out.print(&format!("  Location: {}", project_path.display()))?;
    out.print("")?;
    Ok(())
}

fn confirm() -> CliResult<bool> {
    use std::io::{self, Write};

    print!("Continue? [Y/n] ");
    io::stdout().flush().map_err(|e| CliError::IoError {
        message: "failed to flush stdout".into(),
        source: e,
    })?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: e,
        })?;

    let input = input.trim().to_ascii_lowercase();
    Ok(input.is_empty() || input == "y" || input == "yes")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
