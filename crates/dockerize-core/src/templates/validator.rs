//! Template validation and build compatibility checks

use super::list_template_files;
use super::renderer::placeholder_names;
use crate::error::Result;
use crate::project::ProjectValues;
use crate::validation::validate_file_path;
use std::collections::BTreeSet;
use std::path::Path;
use tokio::fs;

/// Errors block generation; warnings are advisory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Check a template directory against the resolved values.
///
/// Failing to list the directory or stat a file is returned as an error.
/// Problems reading an individual file become entries in the report.
pub async fn validate_template(
    template_dir: &Path,
    values: &ProjectValues,
) -> Result<ValidationReport> {
    let mut report = ValidationReport::default();

    let missing = values.missing_required();
    if !missing.is_empty() {
        report.errors.push(format!(
            "Missing required variables: {}",
            missing.join(", ")
        ));
    }

    for file in list_template_files(template_dir)? {
        let content = match validate_file_path(Path::new(&file.name), template_dir) {
            Ok(path) => fs::read_to_string(&path).await.map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        match content {
            Ok(content) => scan_content(&file.name, &content, values, &mut report),
            Err(e) => report.errors.push(format!(
                "Failed to validate template file \"{}\" at {}. Error: {}. This may be due to file read permission issues, invalid file path, or corrupted file content.",
                file.name,
                file.path.display(),
                e
            )),
        }
    }

    Ok(report)
}

fn scan_content(
    file: &str,
    content: &str,
    values: &ProjectValues,
    report: &mut ValidationReport,
) {
    let undefined: BTreeSet<&str> = placeholder_names(content)
        .into_iter()
        .filter(|name| !values.contains(name))
        .collect();
    for name in undefined {
        report.warnings.push(format!(
            "Undefined template variable \"{}\" found in file \"{}\". This may cause incomplete template processing.",
            name, file
        ));
    }

    let opening = content.matches("{{").count();
    let closing = content.matches("}}").count();
    if opening != closing {
        report.errors.push(format!(
            "Template syntax error in \"{}\": Unmatched template braces ({{{{ and }}}}). Found {} opening braces and {} closing braces.",
            file, opening, closing
        ));
    }

    if content.contains("<script") || content.contains("javascript:") {
        report.warnings.push(format!(
            "Potentially unsafe content detected in \"{}\". Please review template content for security.",
            file
        ));
    }
}

/// Advisory framework/output directory sanity check; never reports errors
pub fn check_build_compatibility(
    framework: &str,
    build_output_dir: Option<&str>,
) -> ValidationReport {
    let mut report = ValidationReport::default();

    if framework.contains("vite") && build_output_dir.map_or(true, str::is_empty) {
        report
            .warnings
            .push("Vite framework detected but no build output directory specified".to_string());
    }

    if framework.contains("next.js") && build_output_dir != Some("out") {
        report.warnings.push(
            "Next.js typically uses \"out\" as build directory, but detected different".to_string(),
        );
    }

    report
}
