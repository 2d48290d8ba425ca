//! Parsing of prompt definition files.

use std::path::Path;

use tracing::debug;

use crate::domain::{AppError, PromptDefinition};

/// Extensions recognised as prompt definition files.
pub const DEFINITION_EXTENSIONS: [&str; 3] = ["yml", "yaml", "json"];

/// Whether `path` looks like a prompt definition file.
pub fn is_definition_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| DEFINITION_EXTENSIONS.contains(&ext))
}

/// Key a definition file is expected to declare (its file stem).
pub fn key_for(path: &Path) -> Option<String> {
    path.file_stem().and_then(|stem| stem.to_str()).map(str::to_string)
}

/// Parse and validate a definition file.
///
/// `origin` names the file in errors. The `key` inside the file must match the
/// file stem.
pub fn parse_definition_file(origin: &Path, content: &str) -> Result<PromptDefinition, AppError> {
    let what = origin.display().to_string();
    let is_json = origin.extension().and_then(|ext| ext.to_str()) == Some("json");

    let definition: PromptDefinition = if is_json {
        serde_json::from_str(content).map_err(|err| AppError::parse_error(&what, err))?
    } else {
        serde_yaml::from_str(content).map_err(|err| AppError::parse_error(&what, err))?
    };

    if let Some(expected) = key_for(origin)
        && expected != definition.key
    {
        return Err(AppError::parse_error(
            what,
            format!("key '{}' does not match file name '{}'", definition.key, expected),
        ));
    }

    definition
        .validate()
        .map_err(|source| AppError::InvalidDefinition { key: definition.key.clone(), source })?;

    debug!(key = %definition.key, version = definition.version, origin = %what, "prompt definition loaded");
    Ok(definition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DefinitionError;

    const YAML: &str = r#"
key: greeting
userTemplate: "Hello {{name}}"
argsSchema:
  type: object
  required: [name]
  properties:
    name:
      type: string
model: gpt-4o-mini
"#;

    #[test]
    fn parses_yaml_definition() {
        let def = parse_definition_file(Path::new("prompts/greeting.yml"), YAML).unwrap();
        assert_eq!(def.key, "greeting");
        assert_eq!(def.args_schema.required, vec!["name"]);
    }

    #[test]
    fn parses_json_definition() {
        let content = r#"{"key":"greeting","userTemplate":"Hi","model":"m"}"#;
        let def = parse_definition_file(Path::new("greeting.json"), content).unwrap();
        assert_eq!(def.user_template, "Hi");
    }

    #[test]
    fn key_must_match_file_stem() {
        let err = parse_definition_file(Path::new("other.yml"), YAML).unwrap_err();
        assert!(matches!(err, AppError::Parse { .. }));
        assert!(err.to_string().contains("does not match"));
    }

    #[test]
    fn invalid_definition_is_reported_with_key() {
        let content = "key: broken\nuserTemplate: \"{{topic}}\"\nmodel: m\n";
        let err = parse_definition_file(Path::new("broken.yaml"), content).unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidDefinition { ref key, source: DefinitionError::UndeclaredPlaceholder { .. } }
                if key == "broken"
        ));
    }

    #[test]
    fn recognises_extensions() {
        assert!(is_definition_file(Path::new("a.yml")));
        assert!(is_definition_file(Path::new("a.json")));
        assert!(!is_definition_file(Path::new("a.toml")));
        assert!(!is_definition_file(Path::new("README")));
    }
}
