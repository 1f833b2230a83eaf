//! Project values: the placeholder name to value mapping for one run

use std::collections::BTreeMap;
use std::fmt;

/// Variables every template may rely on being resolved
pub const REQUIRED_VARIABLES: [&str; 9] = [
    "PROJECT_NAME",
    "BUILD_OUTPUT_DIR",
    "FRAMEWORK",
    "TYPESCRIPT",
    "UI_LIBRARY",
    "DEPENDENCY_COUNT",
    "DEV_PORT",
    "PROD_PORT",
    "NGINX_PORT",
];

/// A scalar placeholder value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Number(i64),
    Bool(bool),
    /// Value of non-scalar origin (JSON null, array, object), carried in its string form
    Raw(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) | Value::Raw(s) => write!(f, "{}", s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value)
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::Number(i64::from(value))
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::Number(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Number(i),
                None => Value::Raw(n.to_string()),
            },
            other => Value::Raw(other.to_string()),
        }
    }
}

/// Resolved placeholder values, keyed by variable name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectValues {
    values: BTreeMap<String, Value>,
}

impl ProjectValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Text form of a value, for the string-typed entries like FRAMEWORK
    pub fn get_text(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(Value::Text(s)) | Some(Value::Raw(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Required variables that have not been resolved, in declaration order
    pub fn missing_required(&self) -> Vec<&'static str> {
        REQUIRED_VARIABLES
            .iter()
            .copied()
            .filter(|name| !self.contains(name))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ProjectValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = ProjectValues::new();
        for (name, value) in iter {
            values.insert(name, value);
        }
        values
    }
}
