//! `{{NAME}}` placeholder substitution

use crate::project::ProjectValues;
use crate::validation::sanitize_template_variable;
use regex::{NoExpand, Regex};
use std::collections::HashSet;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("valid placeholder pattern"));

/// Placeholder names in order of appearance, repeats included
pub fn placeholder_names(content: &str) -> Vec<&str> {
    PLACEHOLDER
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Substitute every placeholder that has a value.
///
/// Values are sanitized first. Placeholders without a value, or whose value
/// fails sanitization, are left verbatim.
pub fn replace_template_variables(content: &str, values: &ProjectValues) -> String {
    let mut result = content.to_string();
    let mut seen = HashSet::new();

    for name in placeholder_names(content) {
        if !seen.insert(name) {
            continue;
        }
        let Some(value) = values.get(name) else {
            continue;
        };

        let replacement = match sanitize_template_variable(value) {
            Ok(sanitized) => sanitized.to_string(),
            Err(e) => {
                log::warn!(
                    "Failed to sanitize template variable \"{}\". Error: {}. Keeping original placeholder.",
                    name,
                    e
                );
                continue;
            }
        };

        let token = match Regex::new(&format!(r"\{{\{{{}\}}\}}", regex::escape(name))) {
            Ok(token) => token,
            Err(e) => {
                log::warn!("Cannot build pattern for \"{}\": {}", name, e);
                continue;
            }
        };
        result = token
            .replace_all(&result, NoExpand(&replacement))
            .into_owned();
    }

    result
}
