//! Interactive technology selection.
//!
//! Mirrors the flag surface of `monostack new`: app type first, then a
//! language → framework pick per included frontend, then optional backend
//! and database. Options always come from the loaded catalog, so a custom
//! catalog changes what the prompt offers.
//!
//! Only compiled with the `interactive` feature (on by default). Aborting
//! any prompt (Esc / Ctrl-C) cancels the whole run.

use dialoguer::{Select, theme::ColorfulTheme};
use tracing::debug;

use monostack_core::domain::{Catalog, ModuleChoice, ModuleKind, SelectionSet};

use crate::error::{CliError, CliResult};

const APP_TYPES: [&str; 4] = ["Mobile_App", "Web_App", "Desktop_App", "All"];

/// Walk the user through building a [`SelectionSet`].
pub fn prompt_selections(catalog: &Catalog) -> CliResult<SelectionSet> {
    let mut selections = SelectionSet::new();

    let app_type = select("Select the type of application you want to create", &APP_TYPES)?;
    debug!(app_type, "App type selected");

    if matches!(app_type, "Mobile_App" | "All") {
        if let Some(choice) = prompt_module(catalog, ModuleKind::FrontendMobile)? {
            selections.set_module(ModuleKind::FrontendMobile, choice);
        }
    }
    if matches!(app_type, "Web_App" | "All") {
        if let Some(choice) = prompt_module(catalog, ModuleKind::FrontendWeb)? {
            selections.set_module(ModuleKind::FrontendWeb, choice);
        }
    }
    if matches!(app_type, "Desktop_App" | "All") {
        if let Some(choice) = prompt_module(catalog, ModuleKind::FrontendDesktop)? {
            selections.set_module(ModuleKind::FrontendDesktop, choice);
        }
    }

    if confirm("Do you want to include a backend?")? {
        if let Some(choice) = prompt_module(catalog, ModuleKind::Backend)? {
            selections.set_module(ModuleKind::Backend, choice);
        }
    }

    if confirm("Do you want to include a database?")? {
        let databases = catalog.database_names();
        if databases.is_empty() {
            // Catalog without databases; nothing to offer.
            debug!("No databases in catalog, skipping");
        } else {
            let database = select("Choose a database", &databases)?;
            selections.set_database(database);
        }
    }

    Ok(selections)
}

/// Language then framework for one module. Returns `None` when the catalog
/// has no entries for the module.
fn prompt_module(catalog: &Catalog, kind: ModuleKind) -> CliResult<Option<ModuleChoice>> {
    let languages = catalog.languages(kind);
    if languages.is_empty() {
        debug!(module = %kind, "No catalog entries for module, skipping");
        return Ok(None);
    }

    let language = select(&format!("Choose a {} language", kind), &languages)?;

    let frameworks = catalog.frameworks(kind, language);
    if frameworks.is_empty() {
        return Ok(None);
    }
    let framework = select(
        &format!("Choose a {} framework for {}", kind, language),
        &frameworks,
    )?;

    Ok(Some(ModuleChoice::new(language, framework)))
}

fn select<'a>(prompt: &str, options: &[&'a str]) -> CliResult<&'a str> {
    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(options)
        .default(0)
        .interact_opt()
        .map_err(|_| CliError::Cancelled)?
        .ok_or(CliError::Cancelled)?;
    Ok(options[index])
}

fn confirm(prompt: &str) -> CliResult<bool> {
    Ok(select(prompt, &["Yes", "No"])? == "Yes")
}
