//! Argument schema model.
//!
//! An `argsSchema` declares every argument a prompt accepts, which of them are
//! required, and how each one is located inside the caller's sources.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::DefinitionError;
use super::template::is_reserved_name;

/// Object-level schema for prompt arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArgsSchema {
    /// Always `object`; anything else is rejected at load time.
    #[serde(rename = "type", default = "default_schema_type")]
    pub schema_type: String,

    /// Arguments that must resolve to a value.
    #[serde(default)]
    pub required: Vec<String>,

    /// Per-argument binding and validation rules.
    #[serde(default)]
    pub properties: BTreeMap<String, PropertySpec>,
}

impl Default for ArgsSchema {
    fn default() -> Self {
        Self { schema_type: default_schema_type(), required: Vec::new(), properties: BTreeMap::new() }
    }
}

fn default_schema_type() -> String {
    "object".to_string()
}

impl ArgsSchema {
    pub fn validate(&self) -> Result<(), DefinitionError> {
        if self.schema_type != "object" {
            return Err(DefinitionError::SchemaNotObject(self.schema_type.clone()));
        }
        for name in &self.required {
            if !self.properties.contains_key(name) {
                return Err(DefinitionError::UndeclaredRequired(name.clone()));
            }
        }
        for (name, spec) in &self.properties {
            if is_reserved_name(name) {
                return Err(DefinitionError::ReservedArgumentName(name.clone()));
            }
            spec.validate(name)?;
        }
        Ok(())
    }
}

/// Binding and validation rules for one argument.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertySpec {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<ValueType>,

    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<Value>>,

    /// Property name read directly off a structured source.
    #[serde(rename = "x-path", default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Alternative keys or paths, optionally qualified by a source type name.
    #[serde(rename = "x-aliases", default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,

    /// Treat aliases as dotted traversal paths.
    #[serde(rename = "x-aliasPath", default)]
    pub alias_is_path: bool,

    /// Search nested structures for the argument name at any depth.
    #[serde(rename = "x-deepSearch", default)]
    pub deep_search: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PropertySpec {
    pub fn validate(&self, name: &str) -> Result<(), DefinitionError> {
        if let Some(path) = &self.path
            && (path.trim().is_empty() || path.contains('.'))
        {
            return Err(DefinitionError::MalformedPath {
                name: name.to_string(),
                path: path.clone(),
            });
        }
        self.parsed_aliases(name)?;
        Ok(())
    }

    /// Parse `x-aliases` in declared order.
    pub fn parsed_aliases(&self, name: &str) -> Result<Vec<Alias>, DefinitionError> {
        self.aliases.iter().map(|raw| Alias::parse(raw, self.alias_is_path, name)).collect()
    }
}

/// Declared JSON type of an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
}

impl ValueType {
    pub fn matches(self, value: &Value) -> bool {
        match self {
            ValueType::String => value.is_string(),
            ValueType::Integer => value.is_i64() || value.is_u64(),
            ValueType::Number => value.is_number(),
            ValueType::Boolean => value.is_boolean(),
            ValueType::Array => value.is_array(),
            ValueType::Object => value.is_object(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Integer => "integer",
            ValueType::Number => "number",
            ValueType::Boolean => "boolean",
            ValueType::Array => "array",
            ValueType::Object => "object",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name of the JSON type a value actually has.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A parsed `x-aliases` entry.
///
/// `Tag.name` is qualified by the type `Tag`: it only applies to structured
/// sources tagged `Tag`. A leading segment is a qualifier when it starts with an
/// uppercase ASCII letter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    pub qualifier: Option<String>,
    /// Flat key (one element) or traversal path.
    pub segments: Vec<String>,
}

impl Alias {
    pub fn parse(raw: &str, as_path: bool, name: &str) -> Result<Self, DefinitionError> {
        let malformed = |reason: &str| DefinitionError::MalformedAlias {
            name: name.to_string(),
            alias: raw.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(malformed("alias is empty"));
        }

        let mut parts: Vec<&str> = trimmed.split('.').collect();
        if parts.iter().any(|p| p.trim().is_empty()) {
            return Err(malformed("alias has an empty segment"));
        }

        let qualifier = if parts.len() > 1 && starts_uppercase(parts[0]) {
            Some(parts.remove(0).to_string())
        } else {
            None
        };

        let segments: Vec<String> = if as_path {
            parts.iter().map(|p| p.to_string()).collect()
        } else {
            if parts.len() > 1 {
                return Err(malformed("dotted alias requires x-aliasPath"));
            }
            vec![parts[0].to_string()]
        };

        Ok(Self { qualifier, segments })
    }

    pub fn applies_to(&self, type_name: Option<&str>) -> bool {
        match &self.qualifier {
            None => true,
            Some(qualifier) => type_name == Some(qualifier.as_str()),
        }
    }
}

fn starts_uppercase(segment: &str) -> bool {
    segment.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}
