//! Contract validation of resolved arguments.

use std::collections::BTreeMap;

use super::binder::Binding;
use super::error::RenderError;
use super::schema::{ArgsSchema, json_type_name};

/// Check resolved arguments against the schema.
///
/// Required arguments are checked first, in declared order, so a missing
/// argument is reported before any type problem.
pub fn validate_arguments(
    schema: &ArgsSchema,
    arguments: &BTreeMap<String, Binding>,
) -> Result<(), RenderError> {
    for name in &schema.required {
        if !arguments.contains_key(name) {
            return Err(RenderError::MissingArgument { name: name.clone() });
        }
    }

    for (name, spec) in &schema.properties {
        let Some(binding) = arguments.get(name) else {
            continue;
        };
        let value = &binding.value;

        if let Some(expected) = spec.value_type
            && !expected.matches(value)
        {
            return Err(RenderError::TypeMismatch {
                name: name.clone(),
                expected: expected.to_string(),
                actual: json_type_name(value).to_string(),
            });
        }

        if let Some(allowed) = &spec.allowed
            && !allowed.contains(value)
        {
            return Err(RenderError::NotInEnum { name: name.clone(), value: value.to_string() });
        }
    }

    Ok(())
}
