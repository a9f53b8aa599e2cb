//! .gitignore generation for created projects.
//!
//! Each module directory gets patterns matched to its language and
//! framework, and the project root gets a combined file covering every
//! selection. Runs before the repository is finalized so the patterns are
//! in force for the initial commit.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use monostack_core::domain::ModuleKind;
use monostack_core::prelude::{ExtraGenerator, SelectionSet};

/// Generates `.gitignore` files for the project root and each module.
#[derive(Debug, Default)]
pub struct GitignoreGenerator;

impl GitignoreGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl ExtraGenerator for GitignoreGenerator {
    fn name(&self) -> &'static str {
        "gitignore"
    }

    fn generate(&self, root: &Path, selections: &SelectionSet) -> bool {
        let mut ok = write_root_gitignore(root, selections);

        for (kind, choice) in selections.modules() {
            if !choice.is_complete() {
                continue;
            }
            let patterns = patterns_for(&choice.language, &choice.framework)
                .unwrap_or_else(|| generic_patterns(&choice.language));
            let module_dir = root.join(kind.as_str());
            if !append_gitignore(&module_dir, patterns) {
                ok = false;
            }
        }
        ok
    }
}

// ── Root file ─────────────────────────────────────────────────────────────────

fn write_root_gitignore(root: &Path, selections: &SelectionSet) -> bool {
    let mut content = COMMON_PATTERNS.to_string();

    for (kind, choice) in selections.modules() {
        if !choice.is_complete() {
            continue;
        }
        if let Some(patterns) = patterns_for(&choice.language, &choice.framework) {
            content.push_str(&format!(
                "\n# {} - {} ({})\n",
                kind.as_str().to_ascii_uppercase(),
                choice.framework,
                choice.language
            ));
            content.push_str(patterns);
            content.push('\n');
        }
    }

    if let Some(db) = selections.database() {
        content.push_str(&format!("\n# DATABASE - {}\n", db));
        content.push_str(database_patterns(db));
    }

    match fs::write(root.join(".gitignore"), content) {
        Ok(()) => {
            info!("Added root .gitignore to {}", root.display());
            true
        }
        Err(e) => {
            warn!(error = %e, "Failed to write root .gitignore");
            false
        }
    }
}

// ── Module files ──────────────────────────────────────────────────────────────

/// Write module patterns, appending to an existing file without duplicating
/// lines an installer already put there.
fn append_gitignore(module_dir: &Path, patterns: &str) -> bool {
    let path = module_dir.join(".gitignore");

    let result = match fs::read_to_string(&path) {
        Ok(existing) => {
            let mut combined = existing.clone();
            for line in patterns.lines() {
                if !line.trim().is_empty() && !existing.contains(line) {
                    combined.push('\n');
                    combined.push_str(line);
                }
            }
            fs::write(&path, combined)
        }
        Err(_) => fs::write(&path, patterns),
    };

    match result {
        Ok(()) => true,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to write .gitignore");
            false
        }
    }
}

// ── Pattern tables ────────────────────────────────────────────────────────────

const COMMON_PATTERNS: &str = "\
# General
.DS_Store
.env
.env.local
.env.development.local
.env.test.local
.env.production.local

# Logs
logs
*.log
npm-debug.log*
yarn-debug.log*
yarn-error.log*

# Editor directories and files
.idea
.vscode
*.suo
*.sw?
*.sublime-*

# Deployment
/dist
/build
/out
";

const NODE_PATTERNS: &str = "\
# Dependencies
/node_modules
/.pnp
.pnp.js

# Testing
/coverage

# Production
/build
/dist
/out
/.next
/.nuxt

# Environment variables
.env
.env.local

# Logs
npm-debug.log*
yarn-debug.log*
yarn-error.log*
";

const MOBILE_PATTERNS: &str = "\
# Dependencies
/node_modules

# Configuration
.expo/
.expo-shared/

# Generated files
*.jsbundle
*.tsbuildinfo

# Android
.gradle
local.properties
*.iml

# iOS
/ios/Pods/
/ios/build/
xcuserdata
DerivedData
";

const PYTHON_PATTERNS: &str = "\
# Byte-compiled / optimized
__pycache__/
*.py[cod]
*$py.class

# Virtual environments
venv/
.venv/
env/

# Distribution
*.egg-info/
dist/
build/

# Testing
.pytest_cache/
.coverage
htmlcov/
";

const JAVA_PATTERNS: &str = "\
# Build output
target/
*.class
*.jar
*.war

# Maven / Gradle
.mvn/
.gradle/
build/

# IDE
*.iml
.settings/
.classpath
.project
";

const GO_PATTERNS: &str = "\
# Binaries
*.exe
*.test
*.out

# Vendored dependencies
vendor/
";

const RUST_PATTERNS: &str = "\
# Build output
target/
**/*.rs.bk
";

const DART_PATTERNS: &str = "\
# Flutter/Dart
.dart_tool/
.packages
build/
.flutter-plugins
.flutter-plugins-dependencies
";

fn patterns_for(language: &str, framework: &str) -> Option<&'static str> {
    match language {
        "javascript" => match framework {
            "react-native" | "expo" => Some(MOBILE_PATTERNS),
            _ => Some(NODE_PATTERNS),
        },
        "python" => Some(PYTHON_PATTERNS),
        "java" => Some(JAVA_PATTERNS),
        "go" => Some(GO_PATTERNS),
        "rust" => Some(RUST_PATTERNS),
        "dart" => Some(DART_PATTERNS),
        _ => None,
    }
}

/// Minimal fallback for languages without a dedicated table.
fn generic_patterns(language: &str) -> &'static str {
    let _ = language;
    "\
# Build output
build/
dist/
out/

# Environment
.env
.env.local
"
}

fn database_patterns(database: &str) -> &'static str {
    match database {
        "postgres" => "*.dump\n*.sql\n",
        "mongodb" => "*.bson\n*.mongodump\n",
        "sqlite" => "*.sqlite\n*.sqlite3\n*.db\n",
        _ => "",
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use monostack_core::domain::ModuleChoice;

    fn selections() -> SelectionSet {
        SelectionSet::new()
            .with_module(ModuleKind::Backend, ModuleChoice::new("python", "flask"))
            .with_module(
                ModuleKind::FrontendWeb,
                ModuleChoice::new("javascript", "react"),
            )
            .with_database("postgres")
    }

    #[test]
    fn root_gitignore_combines_all_selections() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("backend")).unwrap();
        fs::create_dir_all(dir.path().join("frontend-web")).unwrap();

        assert!(GitignoreGenerator::new().generate(dir.path(), &selections()));

        let root = fs::read_to_string(dir.path().join(".gitignore")).unwrap();
        assert!(root.contains(".DS_Store"));
        assert!(root.contains("# BACKEND - flask (python)"));
        assert!(root.contains("__pycache__/"));
        assert!(root.contains("node_modules"));
        assert!(root.contains("# DATABASE - postgres"));
        assert!(root.contains("*.dump"));
    }

    #[test]
    fn module_files_are_language_specific() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("backend")).unwrap();
        fs::create_dir_all(dir.path().join("frontend-web")).unwrap();

        GitignoreGenerator::new().generate(dir.path(), &selections());

        let backend = fs::read_to_string(dir.path().join("backend/.gitignore")).unwrap();
        assert!(backend.contains("venv/"));
        assert!(!backend.contains("node_modules"));

        let web = fs::read_to_string(dir.path().join("frontend-web/.gitignore")).unwrap();
        assert!(web.contains("node_modules"));
    }

    #[test]
    fn appends_without_duplicating_existing_lines() {
        let dir = tempfile::tempdir().unwrap();
        let backend = dir.path().join("backend");
        fs::create_dir_all(&backend).unwrap();
        fs::write(backend.join(".gitignore"), "venv/\nmy-custom-dir/\n").unwrap();

        let selections = SelectionSet::new()
            .with_module(ModuleKind::Backend, ModuleChoice::new("python", "flask"));
        GitignoreGenerator::new().generate(dir.path(), &selections);

        let content = fs::read_to_string(backend.join(".gitignore")).unwrap();
        assert_eq!(content.lines().filter(|l| *l == "venv/").count(), 1);
        assert!(content.contains("my-custom-dir/"));
        assert!(content.contains("__pycache__/"));
    }

    #[test]
    fn unknown_language_falls_back_to_generic() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("backend")).unwrap();

        let selections = SelectionSet::new()
            .with_module(ModuleKind::Backend, ModuleChoice::new("haskell", "servant"));
        assert!(GitignoreGenerator::new().generate(dir.path(), &selections));

        let content = fs::read_to_string(dir.path().join("backend/.gitignore")).unwrap();
        assert!(content.contains("build/"));
    }
}
