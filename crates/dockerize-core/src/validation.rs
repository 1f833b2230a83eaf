//! Input sanitization and validation
//!
//! Every external string (template names, directories, ports, project names,
//! placeholder values) passes through here before it reaches the filesystem or
//! the network. Nothing in this module performs I/O apart from reading the
//! current working directory.

use crate::error::ValidationError;
use crate::project::Value;
use std::path::{Component, Path, PathBuf};

pub const DEFAULT_MAX_LENGTH: usize = 255;
pub const TEMPLATE_NAME_MAX_LENGTH: usize = 50;
pub const PROJECT_NAME_MAX_LENGTH: usize = 100;
pub const PATH_MAX_LENGTH: usize = 4096;
pub const VARIABLE_MAX_LENGTH: usize = 1000;

type Result<T> = std::result::Result<T, ValidationError>;

/// Strip ASCII control characters and surrounding whitespace, then enforce a length cap
pub fn sanitize_string(input: &str, max_length: usize) -> Result<String> {
    let stripped: String = input
        .chars()
        .filter(|c| !matches!(*c, '\u{00}'..='\u{1F}' | '\u{7F}'))
        .collect();
    let sanitized = stripped.trim();

    if sanitized.chars().count() > max_length {
        return Err(ValidationError::new(format!(
            "Input exceeds maximum length of {} characters",
            max_length
        )));
    }

    Ok(sanitized.to_string())
}

fn is_name_char(c: char, allow_dot: bool) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || (allow_dot && c == '.')
}

/// Template names select a directory under the template root, so only
/// `[A-Za-z0-9_-]+` is accepted.
pub fn validate_template_name(name: &str) -> Result<String> {
    let sanitized = sanitize_string(name, TEMPLATE_NAME_MAX_LENGTH)?;
    if sanitized.is_empty() || !sanitized.chars().all(|c| is_name_char(c, false)) {
        return Err(ValidationError::new(
            "Template name contains invalid characters. Only alphanumeric characters, hyphens, and underscores are allowed.",
        ));
    }
    Ok(sanitized)
}

/// Resolve `dir` against the current working directory and require it to stay inside it
pub fn validate_project_directory(dir: &str) -> Result<PathBuf> {
    let cwd = current_dir()?;
    validate_project_directory_in(dir, &cwd)
}

/// Same as [`validate_project_directory`] with an explicit containing root
pub fn validate_project_directory_in(dir: &str, root: &Path) -> Result<PathBuf> {
    let sanitized = sanitize_string(dir, PATH_MAX_LENGTH)?;
    let root = absolutize(root)?;
    let resolved = resolve_path(&root, Path::new(&sanitized));

    if !resolved.starts_with(&root) {
        return Err(ValidationError::new(
            "Project directory must be within the current working directory",
        ));
    }
    Ok(resolved)
}

pub fn validate_port(port: i64) -> Result<u16> {
    match u16::try_from(port) {
        Ok(p) if p >= 1 => Ok(p),
        _ => Err(port_range_error()),
    }
}

/// Textual port: digits with optional leading zeros and a truncated fractional part
pub fn parse_port(port: &str) -> Result<u16> {
    let trimmed = port.trim();
    let (integer, fraction) = match trimmed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (trimmed, None),
    };

    let digits = integer.strip_prefix('-').unwrap_or(integer);
    let well_formed = !digits.is_empty()
        && digits.chars().all(|c| c.is_ascii_digit())
        && fraction.map_or(true, |f| f.chars().all(|c| c.is_ascii_digit()));
    if !well_formed {
        return Err(port_range_error());
    }

    let value: i64 = integer.parse().map_err(|_| port_range_error())?;
    validate_port(value)
}

fn port_range_error() -> ValidationError {
    ValidationError::new("Port must be a valid number between 1 and 65535")
}

/// npm-style project names: `[A-Za-z0-9._-]+`
pub fn validate_project_name(name: &str) -> Result<String> {
    let sanitized = sanitize_string(name, PROJECT_NAME_MAX_LENGTH)?;
    if sanitized.is_empty() || !sanitized.chars().all(|c| is_name_char(c, true)) {
        return Err(ValidationError::new("Project name contains invalid characters"));
    }
    Ok(sanitized)
}

/// Clean a value before it is substituted into template output.
///
/// Text loses `<` and `>`; numbers and booleans pass through; raw values go
/// through [`sanitize_string`] with a 1000 character cap.
pub fn sanitize_template_variable(value: &Value) -> Result<Value> {
    match value {
        Value::Text(s) => {
            let cleaned: String = s.chars().filter(|c| *c != '<' && *c != '>').collect();
            Ok(Value::Text(cleaned.trim().to_string()))
        }
        Value::Number(_) | Value::Bool(_) => Ok(value.clone()),
        Value::Raw(s) => Ok(Value::Text(sanitize_string(s, VARIABLE_MAX_LENGTH)?)),
    }
}

/// Resolve `file_path` against `base_dir` and require the result to stay inside `base_dir`
pub fn validate_file_path(file_path: &Path, base_dir: &Path) -> Result<PathBuf> {
    let raw = file_path.to_string_lossy();
    let sanitized = sanitize_string(&raw, PATH_MAX_LENGTH)?;
    let base = absolutize(base_dir)?;
    let resolved = resolve_path(&base, Path::new(&sanitized));

    if !resolved.starts_with(&base) {
        return Err(ValidationError::new("File path is outside allowed directory"));
    }
    Ok(resolved)
}

/// Join `path` onto `base` (unless already absolute) and fold `.` and `..`
/// lexically, without consulting the filesystem.
pub fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    let mut resolved = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            other => resolved.push(other.as_os_str()),
        }
    }
    resolved
}

fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(resolve_path(path, Path::new("")))
    } else {
        Ok(resolve_path(&current_dir()?, path))
    }
}

fn current_dir() -> Result<PathBuf> {
    std::env::current_dir().map_err(|e| {
        ValidationError::new(format!(
            "Could not determine the current working directory: {}",
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_string_strips_control_chars_and_trims() {
        assert_eq!(sanitize_string("  hello  ", 255).unwrap(), "hello");
        assert_eq!(sanitize_string("hello\x00world", 255).unwrap(), "helloworld");
        assert_eq!(
            sanitize_string("test\x00\x01\x02\x1F\x7Fdata", 255).unwrap(),
            "testdata"
        );
        assert_eq!(sanitize_string("\x00\x01\x02", 255).unwrap(), "");
        assert_eq!(sanitize_string("   ", 255).unwrap(), "");
    }

    #[test]
    fn test_sanitize_string_is_idempotent() {
        for input in ["  a\tb  ", "\x7fx\x1f", "plain", "  \n  ", "ünïcode\x00 "] {
            let once = sanitize_string(input, 255).unwrap();
            let twice = sanitize_string(&once, 255).unwrap();
            assert_eq!(once, twice);
            assert!(!once
                .chars()
                .any(|c| matches!(c, '\u{00}'..='\u{1F}' | '\u{7F}')));
        }
    }

    #[test]
    fn test_sanitize_string_length_limit() {
        let exact = "a".repeat(255);
        assert_eq!(sanitize_string(&exact, 255).unwrap(), exact);

        let err = sanitize_string(&"a".repeat(101), 100).unwrap_err();
        assert!(err.message().contains("exceeds maximum length of 100"));

        // length is checked after trimming
        let padded = format!("  {}  ", "a".repeat(50));
        assert!(sanitize_string(&padded, 50).is_ok());
    }

    #[test]
    fn test_validate_template_name() {
        assert_eq!(validate_template_name("basic").unwrap(), "basic");
        assert_eq!(validate_template_name("ui-heavy").unwrap(), "ui-heavy");
        assert_eq!(
            validate_template_name("template-name_123").unwrap(),
            "template-name_123"
        );
        assert_eq!(validate_template_name("  basic  ").unwrap(), "basic");
        assert_eq!(validate_template_name("a").unwrap(), "a");
        assert!(validate_template_name(&"a".repeat(50)).is_ok());
    }

    #[test]
    fn test_validate_template_name_rejects() {
        for bad in [
            "../evil",
            "./template",
            "my template",
            "template@123",
            "template#name",
            "",
        ] {
            assert!(validate_template_name(bad).is_err(), "accepted {:?}", bad);
        }
        assert!(validate_template_name(&"a".repeat(51)).is_err());
        assert!(validate_template_name("my template")
            .unwrap_err()
            .message()
            .contains("invalid characters"));
    }

    #[test]
    fn test_validate_project_directory_in_root() {
        let root = Path::new("/home/user/app");
        assert_eq!(validate_project_directory_in(".", root).unwrap(), root);
        assert_eq!(
            validate_project_directory_in("web/./src", root).unwrap(),
            Path::new("/home/user/app/web/src")
        );
        assert_eq!(
            validate_project_directory_in("/home/user/app/sub", root).unwrap(),
            Path::new("/home/user/app/sub")
        );
    }

    #[test]
    fn test_validate_project_directory_rejects_traversal() {
        let root = Path::new("/home/user/app");
        let err = validate_project_directory_in("..", root).unwrap_err();
        assert!(err.message().contains("within the current working directory"));
        assert!(validate_project_directory_in("/tmp", root).is_err());
        assert!(validate_project_directory_in("test/../../etc", root).is_err());
        assert!(validate_project_directory_in(&"a/".repeat(2100), root).is_err());
    }

    #[test]
    fn test_sibling_with_shared_prefix_is_outside() {
        let root = Path::new("/home/user/app");
        assert!(validate_project_directory_in("../app-evil", root).is_err());
        assert!(validate_project_directory_in("/home/user/app-evil", root).is_err());
        assert!(validate_file_path(Path::new("../app-evil/x"), root).is_err());
    }

    #[test]
    fn test_validate_project_directory_uses_cwd() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(validate_project_directory(".").unwrap(), cwd);
        assert!(validate_project_directory("src")
            .unwrap()
            .starts_with(&cwd));
        assert!(validate_project_directory("..").is_err());
    }

    #[test]
    fn test_validate_port() {
        assert_eq!(validate_port(1).unwrap(), 1);
        assert_eq!(validate_port(80).unwrap(), 80);
        assert_eq!(validate_port(65535).unwrap(), 65535);
        assert!(validate_port(0).is_err());
        assert!(validate_port(-1).is_err());
        assert!(validate_port(65536).is_err());
        assert!(validate_port(100000)
            .unwrap_err()
            .message()
            .contains("between 1 and 65535"));
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port("3000").unwrap(), 3000);
        assert_eq!(parse_port(" 8080 ").unwrap(), 8080);
        assert_eq!(parse_port("0008080").unwrap(), 8080);
        assert_eq!(parse_port("3000.5").unwrap(), 3000);
        for bad in ["abc", "3000abc", "", "-1", "0", "65536", "1.2.3", "."] {
            assert!(parse_port(bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_validate_project_name() {
        assert_eq!(validate_project_name("my-app").unwrap(), "my-app");
        assert_eq!(validate_project_name("my_app").unwrap(), "my_app");
        assert_eq!(validate_project_name("my.app").unwrap(), "my.app");
        assert_eq!(validate_project_name("  app123  ").unwrap(), "app123");
        assert!(validate_project_name("my app")
            .unwrap_err()
            .message()
            .contains("invalid characters"));
        assert!(validate_project_name("@scope/pkg").is_err());
        assert!(validate_project_name(&"a".repeat(101)).is_err());
    }

    #[test]
    fn test_sanitize_template_variable() {
        assert_eq!(
            sanitize_template_variable(&Value::from("  <b>bold</b>  ")).unwrap(),
            Value::from("bbold/b")
        );
        assert_eq!(
            sanitize_template_variable(&Value::from(3000i64)).unwrap(),
            Value::Number(3000)
        );
        assert_eq!(
            sanitize_template_variable(&Value::from(true)).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            sanitize_template_variable(&Value::Raw("[1,2]\x00".to_string())).unwrap(),
            Value::from("[1,2]")
        );
        assert!(sanitize_template_variable(&Value::Raw("x".repeat(1001))).is_err());
    }

    #[test]
    fn test_validate_file_path() {
        let base = Path::new("/srv/templates/basic");
        assert_eq!(
            validate_file_path(Path::new("Dockerfile"), base).unwrap(),
            Path::new("/srv/templates/basic/Dockerfile")
        );
        assert_eq!(
            validate_file_path(Path::new("/srv/templates/basic/nginx.conf"), base).unwrap(),
            Path::new("/srv/templates/basic/nginx.conf")
        );
        let err = validate_file_path(Path::new("../../etc/passwd"), base).unwrap_err();
        assert!(err.message().contains("outside allowed directory"));
    }

    #[test]
    fn test_resolve_path_folds_dots() {
        assert_eq!(
            resolve_path(Path::new("/a/b"), Path::new("./c/../d")),
            Path::new("/a/b/d")
        );
        assert_eq!(
            resolve_path(Path::new("/a"), Path::new("../../..")),
            Path::new("/")
        );
    }
}
