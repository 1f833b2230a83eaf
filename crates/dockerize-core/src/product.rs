//! Product configuration trait for CLI binaries
//!
//! A binary implements this trait to describe how its templates are found
//! and what the user is told once files have been generated.

use crate::project::ProjectValues;
use std::path::{Path, PathBuf};

/// Configuration trait for a scaffolding product
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for the CLI command)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Environment variable that overrides the template root
    fn templates_dir_env(&self) -> &'static str;

    /// Template root shipped with the product, tried last
    fn bundled_templates_dir(&self) -> PathBuf;

    /// CLI description shown in help text
    fn cli_description(&self) -> &'static str;

    /// Instructions printed after at least one file was generated
    fn next_steps(&self, dir: &Path, values: &ProjectValues) -> Vec<String>;
}
