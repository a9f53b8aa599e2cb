//! Implementation of the `monostack list` command.

use serde_json::json;

use monostack_core::domain::{Catalog, ModuleKind};

use crate::{
    cli::{ListArgs, ListFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let store = super::new::build_store(&config);
    let catalog = store.load_catalog().map_err(CliError::Core)?;

    match args.format {
        ListFormat::Table => print_table(&catalog, &output)?,
        ListFormat::Json => print_json(&catalog),
    }

    Ok(())
}

fn print_table(catalog: &Catalog, output: &OutputManager) -> CliResult<()> {
    output.header("Available technologies:")?;

    for kind in ModuleKind::ALL {
        let languages = catalog.languages(kind);
        if languages.is_empty() {
            continue;
        }
        output.print("")?;
        output.print(&format!("{}:", kind.title()))?;
        for language in languages {
            let frameworks = catalog.frameworks(kind, language);
            output.print(&format!("  {} : {}", language, frameworks.join(", ")))?;
        }
    }

    let databases = catalog.database_names();
    if !databases.is_empty() {
        output.print("")?;
        output.print("Databases:")?;
        output.print(&format!("  {}", databases.join(", ")))?;
    }

    Ok(())
}

/// JSON goes straight to stdout — it must be parseable even in non-TTY
/// pipes, so the OutputManager (quiet mode included) is bypassed.
fn print_json(catalog: &Catalog) {
    let mut modules = serde_json::Map::new();
    for kind in ModuleKind::ALL {
        let languages: serde_json::Map<String, serde_json::Value> = catalog
            .languages(kind)
            .into_iter()
            .map(|language| {
                (
                    language.to_string(),
                    json!(catalog.frameworks(kind, language)),
                )
            })
            .collect();
        if !languages.is_empty() {
            modules.insert(kind.as_str().to_string(), languages.into());
        }
    }

    let doc = json!({
        "modules": modules,
        "databases": catalog.database_names(),
    });
    println!("{}", serde_json::to_string_pretty(&doc).unwrap_or_else(|_| "{}".into()));
}
