//! Argument sources.

use serde::Serialize;
use serde_json::{Map, Value};

use super::error::RenderError;

/// A domain object that can be passed to the engine as a structured source.
///
/// The type name is what qualified aliases such as `Tag.name` match against.
pub trait TypedSource: Serialize {
    fn type_name(&self) -> &str;
}

/// One argument supplier passed to `render`.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// Plain key/value map; keys match argument names directly.
    Map(Map<String, Value>),
    /// Structured object carrying an explicit type tag.
    Object { type_name: String, fields: Map<String, Value> },
}

impl Source {
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Source::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Flat map from a JSON object value.
    pub fn from_json(value: Value) -> Result<Self, RenderError> {
        match value {
            Value::Object(fields) => Ok(Source::Map(fields)),
            other => Err(RenderError::SourceConversion {
                type_name: "map".to_string(),
                reason: format!("expected a JSON object, got {}", other),
            }),
        }
    }

    /// Structured source from any serializable value and an explicit type tag.
    pub fn object<T: Serialize + ?Sized>(
        type_name: impl Into<String>,
        value: &T,
    ) -> Result<Self, RenderError> {
        let type_name = type_name.into();
        match serde_json::to_value(value) {
            Ok(Value::Object(fields)) => Ok(Source::Object { type_name, fields }),
            Ok(other) => Err(RenderError::SourceConversion {
                type_name,
                reason: format!("serialized to a non-object value: {}", other),
            }),
            Err(err) => Err(RenderError::SourceConversion { type_name, reason: err.to_string() }),
        }
    }

    pub fn typed<T: TypedSource>(value: &T) -> Result<Self, RenderError> {
        Source::object(value.type_name(), value)
    }

    pub fn type_name(&self) -> Option<&str> {
        match self {
            Source::Map(_) => None,
            Source::Object { type_name, .. } => Some(type_name),
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        match self {
            Source::Map(fields) | Source::Object { fields, .. } => fields,
        }
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Source::Map(_))
    }
}
