//! Project detection
//!
//! This module provides:
//! - Project value types (ProjectValues, Value)
//! - Framework, UI library and TypeScript inference from package.json dependencies
//! - The project inspector that merges detection, build output and port assignment

pub mod framework;
pub mod inspector;
pub mod values;

pub use framework::{detect_framework, detect_ui_library, uses_typescript, Dependencies};
pub use inspector::{detect_project_values, ProjectInspector};
pub use values::{ProjectValues, Value, REQUIRED_VARIABLES};
