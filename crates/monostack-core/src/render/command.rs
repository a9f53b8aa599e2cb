//! Install-command template rendering.
//!
//! The catalog mixes placeholder syntaxes from different shells and
//! ecosystems, so rendering is two passes: a fast ordered literal
//! replacement of every recognized spelling, then — only if a recognized
//! spelling somehow survives — a stricter named-substitution pass that
//! replaces `$name` / `${name}` forms from the same variable set and leaves
//! unknown variables untouched. Rendering never fails: a problem in the
//! strict pass is logged and the first-pass result is returned.

use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, warn};

/// Recognized spellings of the module-name placeholder, in replacement
/// order. `${module}` must precede `$module` so the braced form is not
/// half-consumed by the bare one. Keep this list central: new spellings are
/// additive.
const MODULE_PLACEHOLDERS: [&str; 4] = ["${module}", "$${module}", "{module}", "$module"];

/// Render an install-command template for one module.
///
/// Every occurrence of a recognized placeholder spelling is replaced with
/// the literal module name.
pub fn render_install_command(template: &str, module_name: &str) -> String {
    let mut rendered = template.to_string();
    for placeholder in MODULE_PLACEHOLDERS {
        rendered = rendered.replace(placeholder, module_name);
    }

    debug!(command = %rendered, "Rendered command after direct replacement");

    if MODULE_PLACEHOLDERS.iter().any(|p| rendered.contains(p)) {
        warn!(command = %rendered, "Placeholders survived the direct pass, applying strict substitution");
        match strict_substitute(&rendered, &[("module", module_name)]) {
            Some(strict) => rendered = strict,
            // Keep the first-pass result; rendering must never abort the caller.
            None => warn!(command = %rendered, "Strict substitution unavailable, keeping direct result"),
        }
    }

    rendered
}

/// Replace `$name` and `${name}` occurrences from `vars`, leaving unknown
/// variables in place. Missing variables are not an error — the command may
/// legitimately reference variables the engine does not own.
fn strict_substitute(input: &str, vars: &[(&str, &str)]) -> Option<String> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    let re = PATTERN
        .get_or_init(|| Regex::new(r"\$(?:\{([A-Za-z_][A-Za-z0-9_]*)\}|([A-Za-z_][A-Za-z0-9_]*))").ok())
        .as_ref()?;

    Some(
        re.replace_all(input, |caps: &regex::Captures<'_>| {
            let name = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str())
                .unwrap_or_default();
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_style_placeholder_replaced() {
        assert_eq!(
            render_install_command("npx express-generator ${module}", "backend"),
            "npx express-generator backend"
        );
    }

    #[test]
    fn brace_style_placeholder_replaced() {
        assert_eq!(
            render_install_command("npx create-react-app {module}", "frontend-web"),
            "npx create-react-app frontend-web"
        );
    }

    #[test]
    fn bare_dollar_placeholder_replaced() {
        assert_eq!(
            render_install_command("flutter create $module", "frontend-mobile"),
            "flutter create frontend-mobile"
        );
    }

    #[test]
    fn escaped_placeholder_replaced() {
        // `$${module}` collapses once `${module}` is consumed first.
        assert_eq!(
            render_install_command("echo $${module}", "backend"),
            "echo $backend"
        );
    }

    #[test]
    fn all_occurrences_replaced() {
        let out = render_install_command("mkdir ${module} && cd {module} && touch $module.txt", "backend");
        assert_eq!(out, "mkdir backend && cd backend && touch backend.txt");
    }

    #[test]
    fn no_recognized_spelling_survives() {
        let templates = [
            "a ${module} b",
            "a $${module} b",
            "a {module} b",
            "a $module b",
            "${module} {module} $module",
        ];
        for template in templates {
            let out = render_install_command(template, "frontend-desktop");
            for placeholder in MODULE_PLACEHOLDERS {
                assert!(
                    !out.contains(placeholder),
                    "{placeholder:?} survived in {out:?}"
                );
            }
        }
    }

    #[test]
    fn template_without_placeholders_is_untouched() {
        assert_eq!(
            render_install_command("cargo new api --bin", "backend"),
            "cargo new api --bin"
        );
    }

    #[test]
    fn unknown_variables_left_alone() {
        // $HOME is not ours to substitute.
        assert_eq!(
            render_install_command("cp -r $HOME/seed ${module}", "backend"),
            "cp -r $HOME/seed backend"
        );
    }

    #[test]
    fn strict_pass_handles_both_forms() {
        let out = strict_substitute("x $module y ${module} z $other", &[("module", "backend")]);
        assert_eq!(out.as_deref(), Some("x backend y backend z $other"));
    }
}
