//! Generate Service - main application orchestrator.
//!
//! This service coordinates the entire generation workflow:
//! 1. Create the project root and load catalog + compose template (fatal on failure)
//! 2. Materialize each selected module (directory, installer, README) — best effort
//! 3. Run registered extra generators (hello-world, gitignore)
//! 4. Render and write the compose document
//! 5. Write top-level documentation
//! 6. Initialize the git repository (init, stage, commit)
//!
//! Only step 1 can fail the call. Every later step is caught at its own
//! boundary, logged, and recorded in the [`GenerationReport`]; a module
//! whose installer exits non-zero never stops its siblings.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use tracing::{error, info, instrument, warn};

use crate::{
    application::ports::{CatalogStore, CommandRunner, ExtraGenerator, Filesystem},
    domain::{Catalog, ComposeFile, ModuleChoice, ModuleKind, SelectionSet},
    error::MonostackResult,
    render::{render_compose, render_install_command},
};

/// Fixed subpaths inside a generated project.
const COMPOSE_SUBPATH: &str = "infra/docker-compose.yml";
const DOCS_DIR: &str = "docs";

/// Per-run tunables.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Optional per-command timeout for installer and git calls.
    pub command_timeout: Option<Duration>,
}

/// Outcome of one generation run.
///
/// The overall call succeeds even when individual modules fail — the
/// contract is binary success per unit, surfaced here so a stricter caller
/// can still turn any failure into a hard error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Per-module success, keyed by module name, in canonical order.
    pub modules: BTreeMap<String, bool>,
    /// Whether the compose document was written.
    pub compose_written: bool,
    /// Whether top-level and docs READMEs were written.
    pub docs_written: bool,
    /// Whether init, stage, and commit all succeeded.
    pub git_initialized: bool,
}

impl GenerationReport {
    pub fn all_modules_succeeded(&self) -> bool {
        self.modules.values().all(|ok| *ok)
    }

    pub fn failed_modules(&self) -> Vec<&str> {
        self.modules
            .iter()
            .filter(|(_, ok)| !**ok)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

/// Main generation service.
///
/// Owns its ports; all collaborators are injected at construction so the
/// whole workflow can run against test doubles.
pub struct GenerateService {
    store: Box<dyn CatalogStore>,
    runner: Box<dyn CommandRunner>,
    filesystem: Box<dyn Filesystem>,
    extras: Vec<Box<dyn ExtraGenerator>>,
    options: GenerateOptions,
}

impl GenerateService {
    /// Create a new generate service with the given adapters.
    pub fn new(
        store: Box<dyn CatalogStore>,
        runner: Box<dyn CommandRunner>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            store,
            runner,
            filesystem,
            extras: Vec::new(),
            options: GenerateOptions::default(),
        }
    }

    pub fn with_options(mut self, options: GenerateOptions) -> Self {
        self.options = options;
        self
    }

    /// Register an extra generator, run after materialization and before
    /// the repository is finalized.
    pub fn with_extra(mut self, extra: Box<dyn ExtraGenerator>) -> Self {
        self.extras.push(extra);
        self
    }

    /// Create the entire project structure for the given selections.
    ///
    /// Fails only when no progress is possible: root uncreatable, catalog
    /// or compose template missing or malformed.
    #[instrument(skip_all, fields(root = %root.display()))]
    pub fn generate(&self, root: &Path, selections: &SelectionSet) -> MonostackResult<GenerationReport> {
        info!("Creating project structure at {}", root.display());

        self.filesystem.create_dir_all(root)?;
        let catalog = self.store.load_catalog()?;
        // Parsed up front: a malformed template is fatal before any module work.
        let template = ComposeFile::parse(&self.store.load_compose_template()?)?;

        let mut report = GenerationReport::default();

        for (kind, choice) in selections.modules() {
            let ok = self.materialize_module(root, kind, choice, &catalog);
            if !ok {
                warn!(module = %kind, "Failed to initialize module, continuing with others");
            }
            report.modules.insert(kind.as_str().to_string(), ok);
        }

        for extra in &self.extras {
            if !extra.generate(root, selections) {
                warn!(extra = extra.name(), "Extra generator reported failure, continuing");
            }
        }

        report.compose_written = self.write_compose(root, &template, selections);
        report.docs_written = self.write_docs(root, selections);
        report.git_initialized = self.initialize_git_repo(root);

        info!("Project structure created at {}", root.display());
        Ok(report)
    }

    // ── Per-module materialization ────────────────────────────────────────

    /// Returns the module's boolean outcome; never propagates an error.
    fn materialize_module(
        &self,
        root: &Path,
        kind: ModuleKind,
        choice: &ModuleChoice,
        catalog: &Catalog,
    ) -> bool {
        let module_dir = root.join(kind.as_str());
        if let Err(e) = self.filesystem.create_dir_all(&module_dir) {
            error!(module = %kind, error = %e, "Cannot create module directory");
            return false;
        }

        if !choice.is_complete() {
            warn!(module = %kind, "Skipping module: no valid language/framework choice");
            return false;
        }

        let mut ok = true;

        match catalog.install_command(kind, &choice.language, &choice.framework) {
            Some(template) => {
                let command = render_install_command(template, kind.as_str());
                info!(
                    "Installing {} ({}) in {}...",
                    choice.framework, choice.language, kind
                );
                match self.runner.run(&command, root, self.options.command_timeout) {
                    Ok(output) if output.success() => {}
                    Ok(output) => {
                        error!(
                            module = %kind,
                            exit_code = output.exit_code,
                            stderr = %output.stderr,
                            "Installation failed"
                        );
                        ok = false;
                    }
                    Err(e) => {
                        error!(module = %kind, error = %e, "Installer could not run");
                        ok = false;
                    }
                }
            }
            None => {
                // Expected for many combinations; the directory and README
                // are still produced and the module still counts as done.
                warn!(
                    "No installation command found for {} in {} ({})",
                    choice.framework, choice.language, kind
                );
            }
        }

        if choice.language == "python" && !self.create_virtualenv(&module_dir) {
            warn!(module = %kind, "Failed to create virtual environment, continuing anyway");
        }

        if let Err(e) = self.write_module_readme(&module_dir, kind, choice) {
            error!(module = %kind, error = %e, "Failed to write module README");
            ok = false;
        }

        ok
    }

    /// Best-effort dependency isolation for python modules.
    fn create_virtualenv(&self, module_dir: &Path) -> bool {
        info!("Setting up virtual environment in {}...", module_dir.display());
        match self
            .runner
            .run("python3 -m venv venv", module_dir, self.options.command_timeout)
        {
            Ok(output) => output.success(),
            Err(e) => {
                warn!(error = %e, "venv creation could not run");
                false
            }
        }
    }

    fn write_module_readme(
        &self,
        module_dir: &Path,
        kind: ModuleKind,
        choice: &ModuleChoice,
    ) -> MonostackResult<()> {
        let content = format!(
            "# {} - {} ({})\n\n\
             This directory contains the {} part of the project using {} ({}).\n\
             \n## Setup\n\n\
             Instructions for setting up this component...\n",
            kind.title(),
            choice.framework,
            choice.language,
            kind,
            choice.framework,
            choice.language,
        );
        self.filesystem.write_file(&module_dir.join("README.md"), &content)
    }

    // ── Finalization ──────────────────────────────────────────────────────

    fn write_compose(&self, root: &Path, template: &ComposeFile, selections: &SelectionSet) -> bool {
        let result: MonostackResult<()> = (|| {
            let rendered = render_compose(template, selections);
            let compose_path = root.join(COMPOSE_SUBPATH);
            if let Some(parent) = compose_path.parent() {
                self.filesystem.create_dir_all(parent)?;
            }
            self.filesystem.write_file(&compose_path, &rendered.to_yaml()?)?;
            info!("Generated compose file at {}", compose_path.display());
            Ok(())
        })();

        match result {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, "Error generating compose file");
                false
            }
        }
    }

    fn write_docs(&self, root: &Path, selections: &SelectionSet) -> bool {
        let result: MonostackResult<()> = (|| {
            let docs_dir = root.join(DOCS_DIR);
            self.filesystem.create_dir_all(&docs_dir)?;
            self.filesystem
                .write_file(&docs_dir.join("README.md"), &docs_readme(root, selections))?;
            self.filesystem
                .write_file(&root.join("README.md"), &top_level_readme(root, selections))?;
            Ok(())
        })();

        match result {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, "Error writing project documentation");
                false
            }
        }
    }

    /// Three sequential version-control steps; the sub-sequence stops at
    /// its first failure but the overall finalize continues.
    fn initialize_git_repo(&self, root: &Path) -> bool {
        info!("Initializing git repository...");

        let steps = [
            ("initialize git repository", "git init"),
            ("stage project files", "git add ."),
            (
                "create initial commit",
                "git commit -m \"Initial commit with project structure\"",
            ),
        ];

        for (what, command) in steps {
            match self.runner.run(command, root, self.options.command_timeout) {
                Ok(output) if output.success() => {}
                Ok(output) => {
                    error!(step = what, exit_code = output.exit_code, stderr = %output.stderr, "Failed to {what}");
                    return false;
                }
                Err(e) => {
                    error!(step = what, error = %e, "Failed to {what}");
                    return false;
                }
            }
        }

        info!("Git repository initialized successfully");
        true
    }
}

// ── Documentation content ─────────────────────────────────────────────────────

fn project_name(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "project".to_string())
}

fn docs_readme(root: &Path, selections: &SelectionSet) -> String {
    let mut out = String::from("# Project Documentation\n\n");
    out.push_str("Add your project documentation here.\n\n");
    out.push_str("## Project Structure\n\n```\n");
    out.push_str(&format!("{}\n", project_name(root)));
    for (kind, _) in selections.modules() {
        out.push_str(&format!("├── {}\n", kind));
    }
    out.push_str("├── infra\n");
    out.push_str("│   └── docker-compose.yml\n");
    out.push_str("├── docs\n");
    out.push_str("└── README.md\n```\n");
    out
}

fn top_level_readme(root: &Path, selections: &SelectionSet) -> String {
    let mut out = format!("# {}\n\n", project_name(root));
    out.push_str("This is a full-stack application generated with Monostack.\n\n");
    out.push_str("## Project Structure\n\n");

    for (kind, choice) in selections.modules() {
        if choice.is_complete() {
            out.push_str(&format!(
                "- **{}**: {} ({})\n",
                kind, choice.framework, choice.language
            ));
        }
    }
    if let Some(db) = selections.database() {
        out.push_str(&format!("- **Database**: {}\n", db));
    }

    out.push_str("\n## Getting Started\n\n");
    out.push_str("1. See documentation in each component directory\n");
    out.push_str("2. Run services with Docker Compose:\n\n");
    out.push_str("```bash\ncd infra\ndocker compose up --build -d\n```\n");
    out
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        MockCatalogStore, MockCommandRunner, ProcessOutput,
    };
    use crate::error::MonostackError;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    const CATALOG_JSON: &str = r#"{
        "backend": {
            "java": { "spring-boot": "echo install ${module}" },
            "python": { "django": "django-admin startproject config ${module}" }
        },
        "frontend-web": {
            "javascript": { "react": "npx create-react-app {module}" }
        },
        "databases": { "postgres": {} }
    }"#;

    const TEMPLATE_YAML: &str = r#"
version: "3"
services:
  backend-java-spring-boot:
    build: ../backend
  frontend-web-generic:
    image: monostack/${FRONTEND_WEB_FRAMEWORK}:latest
  postgres:
    image: postgres:16
"#;

    /// Minimal in-memory filesystem for service tests; the adapters crate
    /// has the full-featured one, but core tests should not depend on it.
    /// Cloning shares state, so one handle can be boxed into the service
    /// while the other stays out for assertions.
    #[derive(Default, Clone)]
    struct FakeFilesystem {
        files: Arc<Mutex<HashMap<PathBuf, String>>>,
        dirs: Arc<Mutex<Vec<PathBuf>>>,
    }

    impl FakeFilesystem {
        fn file(&self, path: &str) -> Option<String> {
            self.files.lock().unwrap().get(&PathBuf::from(path)).cloned()
        }

        fn has_dir(&self, path: &str) -> bool {
            self.dirs.lock().unwrap().contains(&PathBuf::from(path))
        }
    }

    impl Filesystem for FakeFilesystem {
        fn create_dir_all(&self, path: &Path) -> MonostackResult<()> {
            self.dirs.lock().unwrap().push(path.to_path_buf());
            Ok(())
        }

        fn write_file(&self, path: &Path, content: &str) -> MonostackResult<()> {
            self.files
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), content.to_string());
            Ok(())
        }

        fn exists(&self, path: &Path) -> bool {
            self.files.lock().unwrap().contains_key(path) || self.has_dir(&path.to_string_lossy())
        }
    }

    /// Command runner that fails commands containing any configured marker.
    #[derive(Clone)]
    struct FakeRunner {
        fail_markers: Vec<&'static str>,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl FakeRunner {
        fn new() -> Self {
            Self {
                fail_markers: Vec::new(),
                calls: Arc::default(),
            }
        }

        fn failing_on(marker: &'static str) -> Self {
            Self {
                fail_markers: vec![marker],
                calls: Arc::default(),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl CommandRunner for FakeRunner {
        fn run(
            &self,
            command: &str,
            _cwd: &Path,
            _timeout: Option<Duration>,
        ) -> MonostackResult<ProcessOutput> {
            self.calls.lock().unwrap().push(command.to_string());
            if self.fail_markers.iter().any(|m| command.contains(m)) {
                return Ok(ProcessOutput {
                    exit_code: 1,
                    stdout: String::new(),
                    stderr: "boom".into(),
                });
            }
            Ok(ProcessOutput::ok())
        }
    }

    fn store() -> MockCatalogStore {
        let mut store = MockCatalogStore::new();
        store
            .expect_load_catalog()
            .returning(|| Ok(serde_json::from_str(CATALOG_JSON).unwrap()));
        store
            .expect_load_compose_template()
            .returning(|| Ok(TEMPLATE_YAML.to_string()));
        store
    }

    fn selections() -> SelectionSet {
        SelectionSet::new()
            .with_module(ModuleKind::Backend, ModuleChoice::new("java", "spring-boot"))
            .with_module(
                ModuleKind::FrontendWeb,
                ModuleChoice::new("javascript", "react"),
            )
            .with_database("postgres")
    }

    fn service_with(runner: FakeRunner) -> (GenerateService, FakeFilesystem, FakeRunner) {
        let filesystem = FakeFilesystem::default();
        let service = GenerateService::new(
            Box::new(store()),
            Box::new(runner.clone()),
            Box::new(filesystem.clone()),
        );
        (service, filesystem, runner)
    }

    #[test]
    fn full_run_reports_all_modules_and_writes_structure() {
        let (service, fs, _) = service_with(FakeRunner::new());
        let report = service.generate(Path::new("/proj"), &selections()).unwrap();

        assert!(report.all_modules_succeeded());
        assert!(report.compose_written);
        assert!(report.docs_written);
        assert!(report.git_initialized);

        assert!(fs.has_dir("/proj/backend"));
        assert!(fs.has_dir("/proj/frontend-web"));
        let readme = fs.file("/proj/backend/README.md").unwrap();
        assert!(readme.contains("Backend - spring-boot (java)"));

        let compose = fs.file("/proj/infra/docker-compose.yml").unwrap();
        assert!(compose.contains("backend-spring-boot"));
        assert!(compose.contains("frontend-web-react"));
        assert!(compose.contains("monostack/react:latest"));
        assert!(compose.contains("postgres"));

        let top = fs.file("/proj/README.md").unwrap();
        assert!(top.contains("**backend**: spring-boot (java)"));
        assert!(top.contains("**Database**: postgres"));
    }

    #[test]
    fn missing_installer_is_skipped_but_successful() {
        // flask has no backend.python.flask entry in the catalog.
        let selections = SelectionSet::new()
            .with_module(ModuleKind::Backend, ModuleChoice::new("python", "flask"));
        let (service, fs, runner) = service_with(FakeRunner::new());
        let report = service.generate(Path::new("/proj"), &selections).unwrap();

        assert_eq!(report.modules.get("backend"), Some(&true));
        assert!(fs.has_dir("/proj/backend"));
        assert!(fs.file("/proj/backend/README.md").is_some());

        // python still gets its environment isolation attempt.
        let calls = runner.calls();
        assert!(calls.iter().any(|c| c.contains("venv")));
        assert!(!calls.iter().any(|c| c.contains("install")));
    }

    #[test]
    fn failing_install_marks_module_but_run_succeeds() {
        let (service, fs, _) = service_with(FakeRunner::failing_on("create-react-app"));
        let report = service.generate(Path::new("/proj"), &selections()).unwrap();

        assert_eq!(report.modules.get("frontend-web"), Some(&false));
        assert_eq!(report.modules.get("backend"), Some(&true));
        assert_eq!(report.failed_modules(), vec!["frontend-web"]);

        // Siblings and the failed module itself still get their README.
        assert!(fs.file("/proj/backend/README.md").is_some());
        assert!(fs.file("/proj/frontend-web/README.md").is_some());
    }

    #[test]
    fn venv_failure_is_downgraded_to_warning() {
        let selections = SelectionSet::new()
            .with_module(ModuleKind::Backend, ModuleChoice::new("python", "django"));
        let (service, _, _) = service_with(FakeRunner::failing_on("venv"));
        let report = service.generate(Path::new("/proj"), &selections).unwrap();

        assert_eq!(report.modules.get("backend"), Some(&true));
    }

    #[test]
    fn incomplete_choice_skips_module_as_failure() {
        let selections = SelectionSet::new()
            .with_module(ModuleKind::Backend, ModuleChoice::new("java", ""));
        let (service, _, _) = service_with(FakeRunner::new());
        let report = service.generate(Path::new("/proj"), &selections).unwrap();
        assert_eq!(report.modules.get("backend"), Some(&false));
    }

    #[test]
    fn git_failure_stops_subsequence_but_not_run() {
        let (service, _, runner) = service_with(FakeRunner::failing_on("git add"));
        let report = service.generate(Path::new("/proj"), &selections()).unwrap();

        assert!(!report.git_initialized);
        assert!(report.all_modules_succeeded());

        // init ran, add failed, commit never issued.
        let calls = runner.calls();
        assert!(calls.iter().any(|c| c == "git init"));
        assert!(!calls.iter().any(|c| c.starts_with("git commit")));
    }

    #[test]
    fn malformed_template_is_fatal() {
        let mut store = MockCatalogStore::new();
        store
            .expect_load_catalog()
            .returning(|| Ok(serde_json::from_str(CATALOG_JSON).unwrap()));
        store
            .expect_load_compose_template()
            .returning(|| Ok("services: [broken".to_string()));

        let service = GenerateService::new(
            Box::new(store),
            Box::new(FakeRunner::new()),
            Box::new(FakeFilesystem::default()),
        );

        let result = service.generate(Path::new("/proj"), &selections());
        assert!(matches!(result, Err(MonostackError::Domain(_))));
    }

    #[test]
    fn extras_run_between_modules_and_finalize() {
        struct Marker;
        impl ExtraGenerator for Marker {
            fn name(&self) -> &'static str {
                "marker"
            }
            fn generate(&self, root: &Path, _selections: &SelectionSet) -> bool {
                root == Path::new("/proj")
            }
        }

        let (base, _, _) = service_with(FakeRunner::new());
        let service = base.with_extra(Box::new(Marker));
        let report = service.generate(Path::new("/proj"), &selections()).unwrap();
        assert!(report.git_initialized);
    }

    #[test]
    fn timeout_option_is_forwarded_to_runner() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|_, _, timeout| *timeout == Some(Duration::from_secs(5)))
            .returning(|_, _, _| Ok(ProcessOutput::ok()));

        let service = GenerateService::new(
            Box::new(store()),
            Box::new(runner),
            Box::new(FakeFilesystem::default()),
        )
        .with_options(GenerateOptions {
            command_timeout: Some(Duration::from_secs(5)),
        });

        let selections = SelectionSet::new()
            .with_module(ModuleKind::Backend, ModuleChoice::new("java", "spring-boot"));
        service.generate(Path::new("/proj"), &selections).unwrap();
    }
}
