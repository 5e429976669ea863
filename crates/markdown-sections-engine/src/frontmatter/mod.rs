//! Front matter handling.
//!
//! A YAML block between `---` lines at the very top of a file. The section
//! engine never looks inside it: [`split`] separates it from the body before
//! parsing and [`join`] puts it back after rendering.

pub mod parser;
pub mod serializer;

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

pub use parser::{FrontMatterError, split};
pub use serializer::join;

/// Opening and closing delimiter line.
pub const DELIMITER: &str = "---";

/// Parsed front matter. Key order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrontMatter {
    pub fields: Mapping,
}

impl FrontMatter {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.fields.insert(Value::String(key.into()), value)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Result of splitting front matter from a file.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    pub front_matter: Option<FrontMatter>,
    /// Everything after the closing delimiter.
    pub body: String,
}
