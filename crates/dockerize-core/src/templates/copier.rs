//! Template copying: detection, validation, rendering and writing

use super::renderer::replace_template_variables;
use super::validator::{check_build_compatibility, validate_template, ValidationReport};
use super::{list_template_files, TemplateFile, TemplateRoot};
use crate::error::{Error, Result};
use crate::product::ProductConfig;
use crate::project::{ProjectInspector, ProjectValues};
use crate::validation::{validate_file_path, validate_template_name};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Outcome of a successful copy
#[derive(Debug, Clone)]
pub struct CopyReport {
    pub template: String,
    pub target_dir: PathBuf,
    pub created: Vec<String>,
    pub skipped: Vec<String>,
    pub values: ProjectValues,
}

/// Render a template into `target_dir`, skipping files that already exist.
///
/// Validation errors abort before anything is written. A failure on one file
/// aborts the run; files written before it stay on disk.
pub async fn copy_template<C: ProductConfig>(
    config: &C,
    templates: &TemplateRoot,
    inspector: &ProjectInspector,
    template_name: &str,
    target_dir: &str,
) -> Result<CopyReport> {
    let template_name = validate_template_name(template_name)?;
    let target = inspector.resolve_project_dir(target_dir)?;

    let template_path = templates.template_path(&template_name);
    if !fs::metadata(&template_path)
        .await
        .is_ok_and(|meta| meta.is_dir())
    {
        let available = templates.list().unwrap_or_default();
        println!(
            "{}",
            format!("Template \"{}\" not found!", template_name).red()
        );
        println!(
            "{}",
            format!("Available templates: {}", available.join(", ")).yellow()
        );
        return Err(Error::TemplateNotFound {
            name: template_name,
            available,
        });
    }

    println!(
        "{}",
        format!(
            "Setting up Docker configuration for \"{}\" template...",
            template_name
        )
        .blue()
        .bold()
    );
    println!();

    let values = inspector.detect_project_values(target_dir).await?;

    let validation = validate_template(&template_path, &values).await?;
    gate("Template validation", validation)?;

    let compatibility = check_build_compatibility(
        values.get_text("FRAMEWORK").unwrap_or_default(),
        values.get_text("BUILD_OUTPUT_DIR"),
    );
    gate("Build compatibility", compatibility)?;

    fs::create_dir_all(&target)
        .await
        .map_err(|e| Error::io("create target directory", &target, "insufficient permissions", e))?;

    let mut created = Vec::new();
    let mut skipped = Vec::new();

    for file in list_template_files(&template_path)? {
        match copy_file(&template_path, &file, &target, &values).await {
            Ok(true) => {
                println!("  {} {}", "Created".green(), file.name);
                created.push(file.name);
            }
            Ok(false) => {
                println!("  {} {} (already exists)", "Skipped".yellow(), file.name);
                skipped.push(file.name);
            }
            Err(e) => {
                println!("{}", format!("Error processing {}: {}", file.name, e).red());
                return Err(e);
            }
        }
    }

    let report = CopyReport {
        template: template_name,
        target_dir: target,
        created,
        skipped,
        values,
    };
    print_summary(config, &report).await;

    Ok(report)
}

/// Returns `Ok(false)` when the destination already exists
async fn copy_file(
    template_dir: &Path,
    file: &TemplateFile,
    target: &Path,
    values: &ProjectValues,
) -> Result<bool> {
    let source = validate_file_path(Path::new(&file.name), template_dir)?;
    let destination = validate_file_path(Path::new(&file.name), target)?;

    let exists = fs::try_exists(&destination).await.map_err(|e| {
        Error::io("check", &destination, "permission issues", e)
    })?;
    if exists {
        return Ok(false);
    }

    let content = fs::read_to_string(&source).await.map_err(|e| {
        Error::io(
            "read template file",
            &source,
            "file not found, permission issues, or corrupted file",
            e,
        )
    })?;
    let rendered = replace_template_variables(&content, values);

    fs::write(&destination, rendered).await.map_err(|e| {
        Error::io(
            "write template file",
            &destination,
            "insufficient permissions, disk space issues, or invalid file path",
            e,
        )
    })?;

    Ok(true)
}

/// Print a report's issues; errors turn into [`Error::TemplateRejected`]
fn gate(stage: &'static str, report: ValidationReport) -> Result<()> {
    if !report.errors.is_empty() {
        println!("{}", format!("{} errors:", stage).red());
        for error in &report.errors {
            println!("  {} {}", "✗".red(), error);
        }
        return Err(Error::TemplateRejected {
            stage,
            errors: report.errors,
        });
    }

    if !report.warnings.is_empty() {
        println!("{}", format!("{} warnings:", stage).yellow());
        for warning in &report.warnings {
            println!("  {} {}", "⚠".yellow(), warning);
        }
    }

    Ok(())
}

async fn print_summary<C: ProductConfig>(config: &C, report: &CopyReport) {
    println!();
    println!("{}", "Setup Complete!".green().bold());
    println!("{} {}", "Files created:".bold(), report.created.len());
    println!("{} {}", "Files skipped:".bold(), report.skipped.len());

    if !report.created.is_empty() {
        let port = |name: &str| {
            report
                .values
                .get(name)
                .map(ToString::to_string)
                .unwrap_or_default()
        };
        println!();
        println!("{}", "Port Assignments:".bold());
        println!(
            "  {} http://localhost:{}",
            "Development server:".blue(),
            port("DEV_PORT")
        );
        println!(
            "  {} http://localhost:{}",
            "Production server:".blue(),
            port("PROD_PORT")
        );
        println!(
            "  {} http://localhost:{}",
            "Nginx proxy:".blue(),
            port("NGINX_PORT")
        );

        let mut steps = config.next_steps(&report.target_dir, &report.values);
        if fs::try_exists(report.target_dir.join("DOCKER.md"))
            .await
            .unwrap_or(false)
        {
            steps.push("Read DOCKER.md for detailed documentation and advanced usage".to_string());
        }
        if !steps.is_empty() {
            println!();
            println!("{}", "Next Steps:".bold());
            for (i, step) in steps.iter().enumerate() {
                println!("{}. {}", i + 1, step);
            }
        }
    }

    if !report.skipped.is_empty() {
        println!();
        println!(
            "{}",
            "Note: Some files were skipped because they already exist.".yellow()
        );
        println!(
            "{}",
            "Remove existing files if you want to regenerate them.".yellow()
        );
    }
}
