//! Framework, UI library and TypeScript inference from a dependency set

use std::collections::BTreeSet;

/// UI libraries in priority order, each with the dependency names that signal it
pub const UI_LIBRARIES: &[(&str, &[&str])] = &[
    ("Material-UI", &["@mui/material", "@mui/core"]),
    ("Ant Design", &["antd", "@ant-design/icons"]),
    ("Chakra UI", &["@chakra-ui/react"]),
    ("Mantine", &["@mantine/core"]),
    ("Bootstrap", &["react-bootstrap", "bootstrap"]),
    ("Tailwind CSS", &["tailwindcss"]),
];

/// Merged `dependencies` and `devDependencies` names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dependencies {
    names: BTreeSet<String>,
}

impl Dependencies {
    pub fn has(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for Dependencies {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for Dependencies {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.names.extend(iter.into_iter().map(Into::into));
    }
}

pub fn uses_typescript(deps: &Dependencies) -> bool {
    deps.iter()
        .any(|name| name.contains("typescript") || name.starts_with("@types/"))
}

pub fn detect_ui_library(deps: &Dependencies) -> &'static str {
    UI_LIBRARIES
        .iter()
        .find(|(_, packages)| packages.iter().any(|p| deps.has(p)))
        .map(|(label, _)| *label)
        .unwrap_or("none")
}

/// Framework label: Next.js first, then bundler combined with the UI framework
/// it hosts, then a bare UI framework, then `vanilla`.
pub fn detect_framework(deps: &Dependencies) -> String {
    let ui_framework = |candidates: &[&'static str]| -> Option<&'static str> {
        candidates.iter().copied().find(|name| deps.has(name))
    };

    if deps.has("next") {
        return "next.js".to_string();
    }

    let bundled = if deps.has("vite") {
        Some(("vite", ui_framework(&["react", "vue", "svelte"])))
    } else if deps.has("webpack") || deps.has("webpack-cli") {
        Some(("webpack", ui_framework(&["react", "vue"])))
    } else if deps.has("rollup") {
        Some(("rollup", ui_framework(&["react", "vue", "svelte"])))
    } else {
        None
    };

    match bundled {
        Some((bundler, Some(ui))) => format!("{}-{}", ui, bundler),
        Some((bundler, None)) => bundler.to_string(),
        None => ui_framework(&["react", "vue", "svelte"])
            .unwrap_or("vanilla")
            .to_string(),
    }
}
