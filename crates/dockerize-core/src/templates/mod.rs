//! Template discovery, validation, rendering and copying
//!
//! This module provides:
//! - Template root discovery and template listing
//! - Template validation and build compatibility checks
//! - Placeholder substitution
//! - The copy workflow that ties detection, validation and rendering together

pub mod copier;
pub mod renderer;
pub mod validator;

use crate::error::{ConfigError, Error, Result};
use crate::product::ProductConfig;
use crate::validation::resolve_path;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub use copier::{copy_template, CopyReport};
pub use renderer::{placeholder_names, replace_template_variables};
pub use validator::{check_build_compatibility, validate_template, ValidationReport};

/// Directory holding one subdirectory per template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRoot {
    path: PathBuf,
}

impl TemplateRoot {
    /// A relative `path` is anchored at the current working directory
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let path = match std::env::current_dir() {
            Ok(cwd) if path.is_relative() => resolve_path(&cwd, &path),
            _ => path,
        };
        Self { path }
    }

    /// Locate the template root.
    ///
    /// An explicit directory must exist. Otherwise the product's environment
    /// variable, `templates/` next to the executable and the bundled directory
    /// are tried in that order.
    pub fn resolve<C: ProductConfig>(
        config: &C,
        explicit: Option<&Path>,
    ) -> std::result::Result<Self, ConfigError> {
        if let Some(dir) = explicit {
            if dir.is_dir() {
                return Ok(Self::new(dir));
            }
            return Err(ConfigError::new(format!(
                "Template directory not found: {}",
                dir.display()
            )));
        }

        let mut candidates = Vec::new();
        if let Ok(dir) = std::env::var(config.templates_dir_env()) {
            candidates.push(PathBuf::from(dir));
        }
        if let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            candidates.push(exe_dir.join("templates"));
        }
        candidates.push(config.bundled_templates_dir());

        candidates
            .iter()
            .find(|dir| dir.is_dir())
            .map(|dir| Self::new(dir.clone()))
            .ok_or_else(|| {
                ConfigError::new(format!(
                    "Templates directory not found. Tried: {}",
                    candidates
                        .iter()
                        .map(|dir| dir.display().to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of a template; `name` must already be validated
    pub fn template_path(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }

    /// Names of the template directories, sorted
    pub fn list(&self) -> Result<Vec<String>> {
        let mut templates = Vec::new();
        for entry in direct_children(&self.path) {
            let entry = entry.map_err(|e| walk_error(e, &self.path))?;
            if entry.file_type().is_dir() {
                templates.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(templates)
    }
}

/// A regular file directly inside a template directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    pub name: String,
    pub path: PathBuf,
}

/// Regular files directly inside `template_dir`, sorted by name.
///
/// Failing to list the directory or to stat an entry is an error.
pub fn list_template_files(template_dir: &Path) -> Result<Vec<TemplateFile>> {
    let mut files = Vec::new();
    for entry in direct_children(template_dir) {
        let entry = entry.map_err(|e| walk_error(e, template_dir))?;
        if entry.file_type().is_file() {
            files.push(TemplateFile {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.into_path(),
            });
        } else {
            log::debug!("Ignoring non-file template entry {}", entry.path().display());
        }
    }
    Ok(files)
}

fn direct_children(dir: &Path) -> walkdir::IntoIter {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
}

fn walk_error(err: walkdir::Error, dir: &Path) -> Error {
    let (operation, path, hint) = if err.depth() == 0 {
        (
            "read template directory",
            dir.to_path_buf(),
            "directory not found, permission issues, or invalid path",
        )
    } else {
        (
            "stat file",
            err.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf()),
            "file not found or permission issues",
        )
    };
    Error::io(operation, &path, hint, err.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::project::ProjectValues;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Clone)]
    struct Product {
        bundled: PathBuf,
    }

    impl ProductConfig for Product {
        fn name(&self) -> &'static str {
            "test"
        }
        fn display_name(&self) -> &'static str {
            "Test"
        }
        fn templates_dir_env(&self) -> &'static str {
            "DOCKERIZE_TEST_TEMPLATES_UNSET"
        }
        fn bundled_templates_dir(&self) -> PathBuf {
            self.bundled.clone()
        }
        fn cli_description(&self) -> &'static str {
            "test product"
        }
        fn next_steps(&self, _dir: &Path, _values: &ProjectValues) -> Vec<String> {
            Vec::new()
        }
    }

    #[test]
    fn test_list_templates_only_directories() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("ui-heavy")).unwrap();
        fs::create_dir(root.path().join("basic")).unwrap();
        fs::write(root.path().join("README.md"), "not a template").unwrap();

        let templates = TemplateRoot::new(root.path()).list().unwrap();
        assert_eq!(templates, vec!["basic", "ui-heavy"]);
    }

    #[test]
    fn test_list_template_files_is_flat() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Dockerfile"), "FROM node").unwrap();
        fs::write(dir.path().join(".dockerignore"), "node_modules").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/inner.txt"), "skip").unwrap();

        let files = list_template_files(dir.path()).unwrap();
        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec![".dockerignore", "Dockerfile"]);
    }

    #[test]
    fn test_list_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let err = list_template_files(&dir.path().join("absent")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().contains("read template directory"));
    }

    #[test]
    fn test_resolve_prefers_explicit_directory() {
        let explicit = TempDir::new().unwrap();
        let product = Product {
            bundled: PathBuf::from("/nonexistent/bundled"),
        };

        let root = TemplateRoot::resolve(&product, Some(explicit.path())).unwrap();
        assert_eq!(root.path(), explicit.path());

        let missing = explicit.path().join("missing");
        let err = TemplateRoot::resolve(&product, Some(&missing)).unwrap_err();
        assert!(err.message().contains("Template directory not found"));
    }

    #[test]
    fn test_resolve_falls_back_to_bundled() {
        let bundled = TempDir::new().unwrap();
        let product = Product {
            bundled: bundled.path().to_path_buf(),
        };

        let root = TemplateRoot::resolve(&product, None).unwrap();
        // the executable directory may legitimately hold templates/ too
        assert!(root.path().is_dir());
    }

    #[test]
    fn test_relative_root_is_anchored_at_cwd() {
        let root = TemplateRoot::new("../../templates");
        assert!(root.path().is_absolute());
        assert!(!root
            .path()
            .components()
            .any(|c| c == std::path::Component::ParentDir));

        let cwd = std::env::current_dir().unwrap();
        assert_eq!(root.path(), resolve_path(&cwd, Path::new("../../templates")));
    }

    #[test]
    fn test_template_path_joins_name() {
        let root = TemplateRoot::new("/srv/templates");
        assert_eq!(root.template_path("basic"), Path::new("/srv/templates/basic"));
    }
}
