//! Project inspection: derive placeholder values from a target project

use super::framework::{detect_framework, detect_ui_library, uses_typescript, Dependencies};
use super::values::ProjectValues;
use crate::config::BuildOutputDetector;
use crate::error::Result;
use crate::ports::PortAllocator;
use crate::validation::{validate_project_directory_in, validate_project_name};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::fs;

pub const DEFAULT_PROJECT_NAME: &str = "my-app";
pub const DEFAULT_BUILD_OUTPUT_DIR: &str = "dist";

/// The subset of `package.json` that detection reads.
///
/// Fields are kept as loose JSON so a wrongly typed field only degrades itself.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PackageManifest {
    #[serde(default)]
    name: Option<serde_json::Value>,
    #[serde(default)]
    dependencies: Option<serde_json::Value>,
    #[serde(default)]
    dev_dependencies: Option<serde_json::Value>,
}

impl PackageManifest {
    fn dependencies(&self) -> Dependencies {
        let mut deps = Dependencies::default();
        for table in [&self.dependencies, &self.dev_dependencies] {
            if let Some(serde_json::Value::Object(map)) = table {
                deps.extend(map.keys().cloned());
            }
        }
        deps
    }

    fn project_name(&self) -> std::result::Result<String, String> {
        match &self.name {
            None | Some(serde_json::Value::Null) => Ok(DEFAULT_PROJECT_NAME.to_string()),
            Some(serde_json::Value::String(name)) => {
                validate_project_name(name).map_err(|e| e.to_string())
            }
            Some(_) => Err("Input must be a string".to_string()),
        }
    }
}

/// Builds [`ProjectValues`] for a project directory
#[derive(Debug, Clone)]
pub struct ProjectInspector {
    workspace_root: PathBuf,
    detector: BuildOutputDetector,
    ports: PortAllocator,
}

impl ProjectInspector {
    /// Inspector contained to the current working directory
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().map_err(|e| {
            crate::error::Error::io(
                "read",
                Path::new("."),
                "the current working directory being removed or inaccessible",
                e,
            )
        })?;
        Ok(Self::with_root(cwd))
    }

    /// Inspector whose project directories must live under `workspace_root`
    pub fn with_root(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            detector: BuildOutputDetector::default(),
            ports: PortAllocator::default(),
        }
    }

    pub fn with_detector(mut self, detector: BuildOutputDetector) -> Self {
        self.detector = detector;
        self
    }

    pub fn with_port_allocator(mut self, ports: PortAllocator) -> Self {
        self.ports = ports;
        self
    }

    /// Validate `project_dir` against the workspace root
    pub fn resolve_project_dir(&self, project_dir: &str) -> Result<PathBuf> {
        Ok(validate_project_directory_in(project_dir, &self.workspace_root)?)
    }

    /// Detect every project value for `project_dir`.
    ///
    /// Only an unsafe directory fails; a missing or broken `package.json`,
    /// an absent bundler config and busy ports all fall back to defaults.
    pub async fn detect_project_values(&self, project_dir: &str) -> Result<ProjectValues> {
        let project_dir = self.resolve_project_dir(project_dir)?;
        let mut values = ProjectValues::new();

        let manifest = read_package_manifest(&project_dir).await;

        let project_name = match &manifest {
            Some(pkg) => pkg.project_name().unwrap_or_else(|e| {
                log::warn!(
                    "Invalid project name in {}: {}. Using default project name '{}'.",
                    project_dir.join("package.json").display(),
                    e,
                    DEFAULT_PROJECT_NAME
                );
                DEFAULT_PROJECT_NAME.to_string()
            }),
            None => DEFAULT_PROJECT_NAME.to_string(),
        };
        values.insert("PROJECT_NAME", project_name);

        let build_output_dir = self
            .detector
            .detect(&project_dir)
            .await
            .unwrap_or_else(|| DEFAULT_BUILD_OUTPUT_DIR.to_string());
        values.insert("BUILD_OUTPUT_DIR", build_output_dir);

        let deps = manifest
            .as_ref()
            .map(PackageManifest::dependencies)
            .unwrap_or_default();
        values.insert("DEPENDENCY_COUNT", deps.len());
        values.insert("TYPESCRIPT", uses_typescript(&deps));
        values.insert("UI_LIBRARY", detect_ui_library(&deps));
        values.insert("FRAMEWORK", detect_framework(&deps));

        for (service, port) in self.ports.assign_dynamic_ports().await.iter() {
            values.insert(service, port);
        }

        Ok(values)
    }
}

/// `None` when the file is absent or cannot be read or parsed; the latter two are logged
async fn read_package_manifest(project_dir: &Path) -> Option<PackageManifest> {
    let path = project_dir.join("package.json");
    let content = match fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            log::warn!(
                "Could not read package.json at {}. Error: {}. This may be due to permission issues. Using default project values.",
                path.display(),
                e
            );
            return None;
        }
    };

    match serde_json::from_str(&content) {
        Ok(manifest) => Some(manifest),
        Err(e) => {
            log::warn!(
                "Could not parse package.json at {}. Error: {}. This may be due to invalid JSON syntax. Using default project values.",
                path.display(),
                e
            );
            None
        }
    }
}

/// [`ProjectInspector::detect_project_values`] contained to the current working directory
pub async fn detect_project_values(project_dir: &str) -> Result<ProjectValues> {
    ProjectInspector::new()?
        .detect_project_values(project_dir)
        .await
}
