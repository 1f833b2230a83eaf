//! Dockerize Core - Shared library for scaffolding Docker setups into frontend projects
//!
//! This library inspects an existing JavaScript/TypeScript project, derives a set of
//! placeholder values from it and renders a template directory into the project.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Input validation, bundler config scraping, port probing
//! - **Layer 2: Detection** - `ProjectInspector` merging package.json, build output and ports
//! - **Layer 3: Workflow Orchestration** - `ProductConfig` trait and `copy_template`
//!
//! # Example Usage
//!
//! ```ignore
//! use dockerize_core::{copy_template, ProductConfig, ProjectInspector, TemplateRoot};
//!
//! #[derive(Clone)]
//! struct MyConfig;
//! impl ProductConfig for MyConfig {
//!     fn name(&self) -> &'static str { "myapp" }
//!     // ... implement other methods
//! }
//!
//! let templates = TemplateRoot::resolve(&MyConfig, None)?;
//! let inspector = ProjectInspector::new()?;
//! let report = copy_template(&MyConfig, &templates, &inspector, "basic", ".").await?;
//! ```

pub mod config;
pub mod error;
pub mod ports;
pub mod product;
pub mod project;
pub mod templates;
pub mod validation;

// Re-export main types for convenience
pub use error::{ConfigError, Error, ErrorKind, Result, ValidationError};
pub use ports::{assign_dynamic_ports, PortAllocator, PortAssignment, PortDefaults};
pub use product::ProductConfig;
pub use project::{detect_project_values, ProjectInspector, ProjectValues, Value};
pub use templates::{copy_template, CopyReport, TemplateRoot};
