//! Selection-driven compose document rendering.
//!
//! Given the compose template and the resolved selections, produce a new
//! document containing only the services the user selected. Lookup order
//! per module: exact `{module}-{language}-{framework}` key copied verbatim,
//! then a `{module}-generic` fallback with the framework placeholder
//! substituted into its image reference, else the service is omitted —
//! silently, because many combinations legitimately have no service shape.

use tracing::debug;

use crate::domain::{ComposeFile, ModuleKind, SelectionSet};

/// Render a compose document for the given selections.
///
/// Pure and deterministic: the same (template, selections) pair always
/// yields the same document. Key collisions cannot occur because each
/// module contributes at most one `{module}-{framework}` key.
pub fn render_compose(template: &ComposeFile, selections: &SelectionSet) -> ComposeFile {
    let mut output = ComposeFile {
        version: template.version.clone(),
        services: Default::default(),
        networks: template.networks.clone(),
        volumes: template.volumes.clone(),
    };

    for (kind, choice) in selections.modules() {
        if !choice.is_complete() {
            debug!(module = %kind, "Skipping incomplete choice in compose rendering");
            continue;
        }

        let exact_key = format!("{}-{}-{}", kind, choice.language, choice.framework);
        let output_key = format!("{}-{}", kind, choice.framework);

        if let Some(service) = template.service(&exact_key) {
            output.services.insert(output_key, service.clone());
        } else if let Some(generic) = template.service(&format!("{kind}-generic")) {
            let mut service = generic.clone();
            substitute_image_placeholder(&mut service, &kind.framework_placeholder(), &choice.framework);
            output.services.insert(output_key, service);
        } else {
            debug!(module = %kind, "No compose service shape for module, omitting");
        }
    }

    if let Some(db) = selections.database() {
        // Database services are copied verbatim under their own key.
        if let Some(service) = template.service(db) {
            output.services.insert(db.to_string(), service.clone());
        } else {
            debug!(database = %db, "Selected database has no template service");
        }
    }

    output
}

/// Replace `placeholder` inside the service's `image` field, if present.
fn substitute_image_placeholder(service: &mut serde_yaml::Value, placeholder: &str, framework: &str) {
    if let Some(serde_yaml::Value::String(image)) = service.get_mut("image") {
        *image = image.replace(placeholder, framework);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ModuleChoice;

    const TEMPLATE: &str = r#"
version: "3"
services:
  backend-java-spring-boot:
    build: ../backend
    ports:
      - "8080:8080"
  backend-generic:
    image: monostack/${BACKEND_FRAMEWORK}:latest
    ports:
      - "8080:8080"
  frontend-web-generic:
    image: monostack/${FRONTEND_WEB_FRAMEWORK}:latest
    ports:
      - "3000:3000"
  postgres:
    image: postgres:16
    volumes:
      - db-data:/var/lib/postgresql/data
networks:
  app-net:
    driver: bridge
volumes:
  db-data: {}
"#;

    fn template() -> ComposeFile {
        ComposeFile::parse(TEMPLATE).unwrap()
    }

    #[test]
    fn empty_selection_yields_no_services() {
        let out = render_compose(&template(), &SelectionSet::new());
        assert!(out.services.is_empty());
        // Passthrough sections survive untouched.
        assert_eq!(out.networks, template().networks);
        assert_eq!(out.volumes, template().volumes);
    }

    #[test]
    fn exact_match_copied_verbatim_under_short_key() {
        let selections = SelectionSet::new()
            .with_module(ModuleKind::Backend, ModuleChoice::new("java", "spring-boot"));
        let out = render_compose(&template(), &selections);

        let keys: Vec<&str> = out.service_keys().collect();
        assert_eq!(keys, vec!["backend-spring-boot"]);
        assert_eq!(
            out.service("backend-spring-boot"),
            template().service("backend-java-spring-boot")
        );
    }

    #[test]
    fn generic_fallback_substitutes_framework_in_image() {
        let selections = SelectionSet::new()
            .with_module(ModuleKind::FrontendWeb, ModuleChoice::new("javascript", "react"));
        let out = render_compose(&template(), &selections);

        let service = out.service("frontend-web-react").expect("service present");
        let image = service.get("image").and_then(|v| v.as_str()).unwrap();
        assert_eq!(image, "monostack/react:latest");
    }

    #[test]
    fn module_without_any_shape_is_omitted() {
        let selections = SelectionSet::new()
            .with_module(ModuleKind::FrontendMobile, ModuleChoice::new("dart", "flutter"));
        let out = render_compose(&template(), &selections);
        assert!(out.services.is_empty());
    }

    #[test]
    fn incomplete_choice_is_skipped() {
        let selections =
            SelectionSet::new().with_module(ModuleKind::Backend, ModuleChoice::new("java", ""));
        let out = render_compose(&template(), &selections);
        assert!(out.services.is_empty());
    }

    #[test]
    fn database_copied_verbatim() {
        let selections = SelectionSet::new().with_database("postgres");
        let out = render_compose(&template(), &selections);
        assert_eq!(out.service("postgres"), template().service("postgres"));
    }

    #[test]
    fn unknown_database_is_omitted() {
        let selections = SelectionSet::new().with_database("cockroachdb");
        let out = render_compose(&template(), &selections);
        assert!(out.services.is_empty());
    }

    #[test]
    fn rendering_is_deterministic() {
        let selections = SelectionSet::new()
            .with_module(ModuleKind::Backend, ModuleChoice::new("java", "spring-boot"))
            .with_module(ModuleKind::FrontendWeb, ModuleChoice::new("javascript", "react"))
            .with_database("postgres");

        let a = render_compose(&template(), &selections).to_yaml().unwrap();
        let b = render_compose(&template(), &selections).to_yaml().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rendered_document_reparses_to_same_service_set() {
        let selections = SelectionSet::new()
            .with_module(ModuleKind::Backend, ModuleChoice::new("java", "spring-boot"))
            .with_database("postgres");

        let rendered = render_compose(&template(), &selections);
        let reparsed = ComposeFile::parse(&rendered.to_yaml().unwrap()).unwrap();

        let expected: Vec<&str> = rendered.service_keys().collect();
        let actual: Vec<&str> = reparsed.service_keys().collect();
        assert_eq!(expected, actual);
        assert_eq!(actual, vec!["backend-spring-boot", "postgres"]);
    }

    #[test]
    fn no_services_beyond_selection_and_template() {
        let selections = SelectionSet::new()
            .with_module(ModuleKind::Backend, ModuleChoice::new("java", "spring-boot"))
            .with_module(ModuleKind::FrontendWeb, ModuleChoice::new("javascript", "vue"))
            .with_database("postgres");
        let out = render_compose(&template(), &selections);

        let keys: Vec<&str> = out.service_keys().collect();
        assert_eq!(
            keys,
            vec!["backend-spring-boot", "frontend-web-vue", "postgres"]
        );
    }
}
