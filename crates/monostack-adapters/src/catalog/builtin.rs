//! Built-in catalog and compose template.
//!
//! These defaults ship inside the binary so a first run works without any
//! configuration. Point the CLI at your own files to extend or replace
//! them; the shape here is the reference for what those files must look
//! like.

use std::sync::OnceLock;

use monostack_core::{
    application::{ports::CatalogStore, ApplicationError},
    domain::Catalog,
    error::MonostackResult,
};

/// Default install-command catalog.
///
/// Shape: module -> language -> framework -> shell command. The `databases`
/// key is not a module; its entries only select compose services. Commands
/// run from the project root with the `${module}` placeholder substituted.
pub const DEFAULT_CATALOG_JSON: &str = r#"{
  "backend": {
    "python": {
      "flask": "mkdir -p ${module} && printf 'flask\n' > ${module}/requirements.txt",
      "django": "django-admin startproject config ${module}",
      "fastapi": "mkdir -p ${module} && printf 'fastapi\nuvicorn\n' > ${module}/requirements.txt"
    },
    "javascript": {
      "express": "npm init -y --prefix ${module} && npm install --prefix ${module} express",
      "nestjs": "npx --yes @nestjs/cli new ${module} --skip-git --package-manager npm"
    },
    "java": {
      "spring-boot": "curl -s https://start.spring.io/starter.tgz -d dependencies=web -d type=maven-project -d baseDir=${module} | tar -xzf -"
    },
    "go": {
      "gin": "mkdir -p ${module} && cd ${module} && go mod init app && go get github.com/gin-gonic/gin"
    },
    "rust": {
      "actix-web": "cargo new ${module} --vcs none && cargo add actix-web --manifest-path ${module}/Cargo.toml"
    }
  },
  "frontend-web": {
    "javascript": {
      "react": "npx --yes create-react-app ${module}",
      "nextjs": "npx --yes create-next-app@latest ${module} --js --no-git --yes",
      "vuejs": "npm create --yes vue@latest ${module}",
      "angular": "npx --yes @angular/cli new ${module} --skip-git --defaults"
    }
  },
  "frontend-mobile": {
    "javascript": {
      "react-native": "npx --yes react-native init ${module}",
      "expo": "npx --yes create-expo-app ${module} --no-install"
    },
    "dart": {
      "flutter": "flutter create ${module}"
    }
  },
  "frontend-desktop": {
    "javascript": {
      "electron": "npm init -y --prefix ${module} && npm install --prefix ${module} --save-dev electron",
      "tauri": "npm create --yes tauri-app@latest ${module}"
    }
  },
  "databases": {
    "postgres": {},
    "mysql": {},
    "mongodb": {},
    "redis": {},
    "sqlite": {}
  }
}"#;

/// Default compose template.
///
/// Exact `{module}-{language}-{framework}` services are copied as-is when
/// that combination is selected; `{module}-generic` services are the
/// fallback, with the framework name substituted into the image reference.
pub const DEFAULT_COMPOSE_TEMPLATE: &str = r#"version: "3"
services:
  backend-python-django:
    build: ../backend
    ports:
      - "8000:8000"
    volumes:
      - ../backend:/app
  backend-java-spring-boot:
    build: ../backend
    ports:
      - "8080:8080"
  backend-generic:
    image: monostack/${BACKEND_FRAMEWORK}:latest
    ports:
      - "3000:3000"
  frontend-web-javascript-react:
    build: ../frontend-web
    ports:
      - "5173:5173"
    volumes:
      - ../frontend-web:/app
  frontend-web-generic:
    image: monostack/${FRONTEND_WEB_FRAMEWORK}:latest
    ports:
      - "8081:8081"
  frontend-mobile-generic:
    image: monostack/${FRONTEND_MOBILE_FRAMEWORK}:latest
  frontend-desktop-generic:
    image: monostack/${FRONTEND_DESKTOP_FRAMEWORK}:latest
  postgres:
    image: postgres:16
    environment:
      POSTGRES_PASSWORD: postgres
    ports:
      - "5432:5432"
    volumes:
      - pgdata:/var/lib/postgresql/data
  mysql:
    image: mysql:8
    environment:
      MYSQL_ROOT_PASSWORD: mysql
    ports:
      - "3306:3306"
  mongodb:
    image: mongo:7
    ports:
      - "27017:27017"
  redis:
    image: redis:7
    ports:
      - "6379:6379"
  sqlite:
    image: alpine:3
    command: ["tail", "-f", "/dev/null"]
volumes:
  pgdata:
"#;

/// Catalog store backed by the embedded defaults.
///
/// The parsed catalog is cached for the process lifetime; the embedded JSON
/// cannot change underneath us, so the cache is purely an allocation saver.
#[derive(Debug, Default)]
pub struct EmbeddedCatalogStore {
    catalog: OnceLock<Catalog>,
}

impl EmbeddedCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CatalogStore for EmbeddedCatalogStore {
    fn load_catalog(&self) -> MonostackResult<Catalog> {
        if let Some(catalog) = self.catalog.get() {
            return Ok(catalog.clone());
        }
        let catalog: Catalog =
            serde_json::from_str(DEFAULT_CATALOG_JSON).map_err(|e| {
                ApplicationError::MalformedCatalog {
                    reason: e.to_string(),
                }
            })?;
        Ok(self.catalog.get_or_init(|| catalog).clone())
    }

    fn load_compose_template(&self) -> MonostackResult<String> {
        Ok(DEFAULT_COMPOSE_TEMPLATE.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monostack_core::domain::{ComposeFile, ModuleKind};

    #[test]
    fn embedded_catalog_parses() {
        let store = EmbeddedCatalogStore::new();
        let catalog = store.load_catalog().unwrap();

        assert!(catalog.has_module(ModuleKind::Backend));
        assert!(catalog.has_module(ModuleKind::FrontendWeb));
        assert_eq!(
            catalog.install_command(ModuleKind::Backend, "python", "django"),
            Some("django-admin startproject config ${module}")
        );
        assert!(catalog.database_names().contains(&"postgres"));
    }

    #[test]
    fn embedded_template_parses() {
        let store = EmbeddedCatalogStore::new();
        let template = ComposeFile::parse(&store.load_compose_template().unwrap()).unwrap();

        // Every module kind has a generic fallback with its placeholder.
        for kind in ModuleKind::ALL {
            let key = format!("{}-generic", kind);
            let service = template.service(&key).unwrap();
            let image = service.get("image").and_then(|v| v.as_str()).unwrap();
            assert!(image.contains(&kind.framework_placeholder()));
        }
    }

    #[test]
    fn databases_are_not_modules() {
        let store = EmbeddedCatalogStore::new();
        let catalog = store.load_catalog().unwrap();
        assert!(!catalog.languages(ModuleKind::Backend).is_empty());
        assert!(catalog.database_names().len() >= 3);
    }
}
