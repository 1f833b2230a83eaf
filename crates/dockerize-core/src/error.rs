//! Error types shared by every stage of the scaffolding pipeline

use std::fmt;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Malformed or unsafe caller input (template name, directory, port, project name, file path)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Failure to load tool configuration, such as locating the template root
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Coarse classification used at catch sites
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Config,
    Template,
    Port,
    Io,
}

impl ErrorKind {
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "ValidationError",
            ErrorKind::Config => "ConfigError",
            ErrorKind::Template => "TemplateError",
            ErrorKind::Port => "PortError",
            ErrorKind::Io => "IoError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Template \"{name}\" not found. Available templates: {}", .available.join(", "))]
    TemplateNotFound { name: String, available: Vec<String> },

    /// Template validation or build compatibility produced fatal errors
    #[error("{stage} failed:\n{}", bullet_list(.errors))]
    TemplateRejected {
        stage: &'static str,
        errors: Vec<String>,
    },

    #[error("Could not find available port starting from {start} (tried {attempts} ports)")]
    PortsExhausted { start: i64, attempts: u32 },

    #[error("{context}. Error: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::Config(_) => ErrorKind::Config,
            Error::TemplateNotFound { .. } | Error::TemplateRejected { .. } => {
                ErrorKind::Template
            }
            Error::PortsExhausted { .. } => ErrorKind::Port,
            Error::Io { .. } => ErrorKind::Io,
        }
    }

    /// Wrap an I/O failure with the operation, the path and the usual suspects
    pub(crate) fn io(operation: &str, path: &Path, hint: &str, source: io::Error) -> Self {
        Error::Io {
            context: format!(
                "Failed to {} {}. This may be due to {}",
                operation,
                path.display(),
                hint
            ),
            source,
        }
    }
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("  - {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
