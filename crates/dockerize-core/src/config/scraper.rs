//! Regex-based config file scraping
//!
//! Config files are never executed or parsed as code. A single-capture-group
//! pattern is applied to the raw text, so unusual syntax simply yields no match.

use crate::validation::{sanitize_string, PATH_MAX_LENGTH};
use regex::Regex;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Source extensions tried, in order of preference
pub const DEFAULT_EXTENSIONS: &[&str] = &["js", "ts"];

/// Reads a config file by conventional name and extracts one value from it
#[derive(Debug, Clone)]
pub struct ConfigScraper {
    extensions: Vec<String>,
}

impl Default for ConfigScraper {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect())
    }
}

impl ConfigScraper {
    pub fn new(extensions: Vec<String>) -> Self {
        Self { extensions }
    }

    /// Extract the first capture group of `pattern` from the config at `config_path`.
    ///
    /// If the path already carries a recognized extension only that file is
    /// read. Otherwise each extension is appended in turn and the first
    /// readable file decides the outcome, even when the pattern then fails to
    /// match. A missing or unreadable file is not an error: it yields `None`.
    pub async fn parse_config(&self, config_path: &Path, pattern: &Regex) -> Option<String> {
        let raw = config_path.to_string_lossy();
        let sanitized = match sanitize_string(&raw, PATH_MAX_LENGTH) {
            Ok(s) => PathBuf::from(s),
            Err(e) => {
                log::debug!("Refusing to read config {}: {}", raw, e);
                return None;
            }
        };

        if self.has_recognized_extension(&sanitized) {
            return Self::read_and_capture(&sanitized, pattern).await;
        }

        for ext in &self.extensions {
            let mut candidate = OsString::from(sanitized.as_os_str());
            candidate.push(".");
            candidate.push(ext);
            let candidate = PathBuf::from(candidate);

            match fs::read_to_string(&candidate).await {
                Ok(content) => return capture(&content, pattern),
                Err(e) => {
                    log::debug!("Config {} not readable: {}", candidate.display(), e);
                }
            }
        }

        None
    }

    fn has_recognized_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }

    async fn read_and_capture(path: &Path, pattern: &Regex) -> Option<String> {
        match fs::read_to_string(path).await {
            Ok(content) => capture(&content, pattern),
            Err(e) => {
                log::debug!("Config {} not readable: {}", path.display(), e);
                None
            }
        }
    }
}

fn capture(content: &str, pattern: &Regex) -> Option<String> {
    pattern
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// [`ConfigScraper::parse_config`] with the default extension list
pub async fn parse_config(config_path: &Path, pattern: &Regex) -> Option<String> {
    ConfigScraper::default()
        .parse_config(config_path, pattern)
        .await
}
