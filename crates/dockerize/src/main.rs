//! dockerize - Quick-start Docker setup for React/Vite/TypeScript projects

use anyhow::Result;
use clap::{CommandFactory, FromArgMatches, Parser};
use colored::Colorize;
use dockerize_core::{copy_template, ProductConfig, ProjectInspector, ProjectValues, TemplateRoot};
use std::path::{Path, PathBuf};

/// dockerize product configuration
#[derive(Clone)]
pub struct DockerizeConfig;

impl ProductConfig for DockerizeConfig {
    fn name(&self) -> &'static str {
        "dockerize"
    }

    fn display_name(&self) -> &'static str {
        "Dockerize"
    }

    fn templates_dir_env(&self) -> &'static str {
        "DOCKERIZE_TEMPLATES"
    }

    fn bundled_templates_dir(&self) -> PathBuf {
        PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../../templates"))
    }

    fn cli_description(&self) -> &'static str {
        "Quick-start Docker setup for React/Vite/TypeScript projects"
    }

    fn next_steps(&self, dir: &Path, _values: &ProjectValues) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        if current.as_deref() != Some(dir) {
            steps.push(format!("cd {}", dir.display()));
        }

        steps.push("Review and customize the generated Docker configuration files".to_string());
        steps.push("Update environment variables in .env.example and rename to .env".to_string());
        steps.push("Build and run your Docker container: docker-compose up --build".to_string());

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "dockerize")]
#[command(version, disable_version_flag = true)]
pub struct Args {
    /// Template name to use (see --list)
    pub template: Option<String>,

    /// Print version
    #[arg(short = 'v', long, action = clap::ArgAction::Version)]
    pub version: Option<bool>,

    /// List available templates
    #[arg(long)]
    pub list: bool,

    /// Local directory to use for templates instead of the bundled ones.
    /// Installed binaries otherwise look in DOCKERIZE_TEMPLATES, then templates/ next to the executable
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Target project directory
    #[arg(short, long, default_value = ".")]
    pub directory: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        std::process::exit(130);
    })
    .ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = DockerizeConfig;

    if std::env::args_os().len() <= 1 {
        cli(&config).print_help()?;
        return Ok(());
    }

    let args = Args::from_arg_matches(&cli(&config).get_matches())?;

    if args.list {
        list_templates(&config, args.template_dir.as_deref());
        return Ok(());
    }

    let Some(template) = args.template else {
        println!("{}", "Please specify a template name!".red());
        println!();
        cli(&config).print_help()?;
        std::process::exit(1);
    };

    let templates = TemplateRoot::resolve(&config, args.template_dir.as_deref())?;
    let inspector = ProjectInspector::new()?;

    let target = inspector.resolve_project_dir(&args.directory)?;
    if !target.join("package.json").exists() {
        println!(
            "{}",
            "Warning: No package.json found. Make sure you're in a project root directory."
                .yellow()
        );
        println!();
    }

    copy_template(&config, &templates, &inspector, &template, &args.directory).await?;

    Ok(())
}

/// The clap command carrying the product's name and description
fn cli<C: ProductConfig>(config: &C) -> clap::Command {
    Args::command()
        .name(config.name())
        .about(config.cli_description())
        .before_help(format!("{} {}", config.display_name(), env!("CARGO_PKG_VERSION")))
}

fn list_templates<C: ProductConfig>(config: &C, template_dir: Option<&Path>) {
    let templates = match TemplateRoot::resolve(config, template_dir) {
        Ok(root) => root,
        Err(e) => {
            println!("{}", format!("Error reading templates: {}", e).red());
            return;
        }
    };

    println!("{}", "Available Templates:".blue().bold());
    println!();

    match templates.list() {
        Ok(names) if names.is_empty() => {
            println!("{}", "No templates available".yellow());
        }
        Ok(names) => {
            for name in names {
                println!("  {}", name.green());
            }
        }
        Err(e) => {
            println!("{}", format!("Error reading templates: {}", e).red());
        }
    }
}
