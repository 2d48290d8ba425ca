use std::io;

use thiserror::Error;

/// Authoring defect in a prompt definition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DefinitionError {
    #[error("Prompt key must not be empty")]
    EmptyKey,

    #[error("Prompt '{0}' has an empty model identifier")]
    EmptyModel(String),

    #[error("argsSchema type must be 'object', found '{0}'")]
    SchemaNotObject(String),

    #[error("Required argument '{0}' is not declared in argsSchema.properties")]
    UndeclaredRequired(String),

    #[error("Default for '{0}' does not match any declared argument")]
    UndeclaredDefault(String),

    #[error("Argument '{name}' has malformed x-path '{path}'")]
    MalformedPath { name: String, path: String },

    #[error("Argument '{name}' has malformed alias '{alias}': {reason}")]
    MalformedAlias { name: String, alias: String, reason: String },

    #[error("{template} template references undeclared argument '{name}'")]
    UndeclaredPlaceholder { template: String, name: String },

    #[error("{template} template uses disallowed syntax '{token}'")]
    TemplateSyntaxNotAllowed { template: String, token: String },

    #[error("{template} template placeholder '{placeholder}' must be a plain argument name")]
    InvalidPlaceholder { template: String, placeholder: String },

    #[error("Argument name '{0}' is reserved by the template language")]
    ReservedArgumentName(String),
}

/// Failure of a single render call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// A required argument could not be bound from any source or default.
    #[error("Missing required argument '{name}'")]
    MissingArgument { name: String },

    #[error("Argument '{name}' must be of type {expected}, got {actual}")]
    TypeMismatch { name: String, expected: String, actual: String },

    #[error("Argument '{name}' value {value} is not one of the allowed values")]
    NotInEnum { name: String, value: String },

    #[error("Malformed binding for argument '{name}': {reason}")]
    MalformedBinding { name: String, reason: String },

    #[error("Source of type '{type_name}' cannot be read: {reason}")]
    SourceConversion { type_name: String, reason: String },

    #[error("Failed to render {template} template: {reason}")]
    TemplateRender { template: String, reason: String },

    #[error("{template} template output still contains placeholder '{token}'")]
    UnreplacedPlaceholder { template: String, token: String },

    #[error("Invalid prompt definition: {0}")]
    Definition(#[from] DefinitionError),
}

impl RenderError {
    /// Argument the failure is about, when there is one.
    pub fn argument(&self) -> Option<&str> {
        match self {
            RenderError::MissingArgument { name }
            | RenderError::TypeMismatch { name, .. }
            | RenderError::NotInEnum { name, .. }
            | RenderError::MalformedBinding { name, .. } => Some(name),
            RenderError::Definition(DefinitionError::MalformedAlias { name, .. })
            | RenderError::Definition(DefinitionError::MalformedPath { name, .. })
            | RenderError::Definition(DefinitionError::UndeclaredPlaceholder { name, .. })
            | RenderError::Definition(DefinitionError::ReservedArgumentName(name)) => Some(name),
            _ => None,
        }
    }

    pub fn is_binding_error(&self) -> bool {
        matches!(self, RenderError::MissingArgument { .. })
    }

    pub fn is_schema_violation(&self) -> bool {
        matches!(self, RenderError::TypeMismatch { .. } | RenderError::NotInEnum { .. })
    }
}

/// Library-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Failed to parse {what}: {details}")]
    Parse { what: String, details: String },

    #[error("Prompt '{0}' not found")]
    PromptNotFound(String),

    #[error("Prompt '{key}' is invalid: {source}")]
    InvalidDefinition {
        key: String,
        #[source]
        source: DefinitionError,
    },

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub fn parse_error(what: impl Into<String>, details: impl std::fmt::Display) -> Self {
        AppError::Parse { what: what.into(), details: details.to_string() }
    }
}
