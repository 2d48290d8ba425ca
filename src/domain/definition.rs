//! Prompt definitions.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::DefinitionError;
use super::schema::ArgsSchema;
use super::template::{check_template_syntax, placeholder_names};

pub const SYSTEM_TEMPLATE: &str = "system";
pub const USER_TEMPLATE: &str = "user";

/// A named, versioned prompt template plus the contract that drives one LLM call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PromptDefinition {
    pub key: String,

    #[serde(default)]
    pub system_template: String,

    pub user_template: String,

    #[serde(default)]
    pub args_schema: ArgsSchema,

    /// Values for arguments no source supplies.
    #[serde(default)]
    pub defaults: Map<String, Value>,

    pub model: String,

    /// Generation parameters, passed through untouched.
    #[serde(default)]
    pub parameters: Map<String, Value>,

    /// Expected shape of the model reply, passed through untouched.
    #[serde(default)]
    pub response_contract: Value,

    #[serde(default = "default_version")]
    pub version: u32,
}

fn default_version() -> u32 {
    1
}

impl PromptDefinition {
    /// Minimal definition, mostly useful for tests and programmatic callers.
    pub fn new(
        key: impl Into<String>,
        model: impl Into<String>,
        user_template: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            system_template: String::new(),
            user_template: user_template.into(),
            args_schema: ArgsSchema::default(),
            defaults: Map::new(),
            model: model.into(),
            parameters: Map::new(),
            response_contract: Value::Null,
            version: default_version(),
        }
    }

    /// Check the definition for authoring defects.
    pub fn validate(&self) -> Result<(), DefinitionError> {
        if self.key.trim().is_empty() {
            return Err(DefinitionError::EmptyKey);
        }
        if self.model.trim().is_empty() {
            return Err(DefinitionError::EmptyModel(self.key.clone()));
        }

        self.args_schema.validate()?;

        for name in self.defaults.keys() {
            if !self.args_schema.properties.contains_key(name) {
                return Err(DefinitionError::UndeclaredDefault(name.clone()));
            }
        }

        for (template_name, template) in self.templates() {
            check_template_syntax(template, template_name)?;
            for name in placeholder_names(template) {
                if !self.args_schema.properties.contains_key(&name) {
                    return Err(DefinitionError::UndeclaredPlaceholder {
                        template: template_name.to_string(),
                        name,
                    });
                }
            }
        }

        Ok(())
    }

    pub fn templates(&self) -> [(&'static str, &str); 2] {
        [(SYSTEM_TEMPLATE, &self.system_template), (USER_TEMPLATE, &self.user_template)]
    }
}
