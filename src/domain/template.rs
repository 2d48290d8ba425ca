//! Template port and placeholder inspection.

use std::collections::BTreeMap;

use serde_json::Value;

use super::error::{DefinitionError, RenderError};

/// Substitutes `{{name}}` placeholders in prompt templates.
///
/// Keeps the template engine out of the domain layer.
pub trait TemplateRenderer {
    /// Render `template` with already-stringified `arguments`.
    ///
    /// `template_name` identifies the template in errors (`system` or `user`).
    fn render(
        &self,
        template: &str,
        arguments: &BTreeMap<String, String>,
        template_name: &str,
    ) -> Result<String, RenderError>;
}

/// Words the template language reads as literals rather than variables.
const RESERVED_NAMES: [&str; 3] = ["true", "false", "none"];

/// Whether `name` would be read as a literal inside `{{ }}` (any casing).
pub fn is_reserved_name(name: &str) -> bool {
    RESERVED_NAMES.iter().any(|reserved| reserved.eq_ignore_ascii_case(name))
}

fn is_identifier(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Inner text of every `{{ ... }}` placeholder, trimmed, in order.
///
/// An unclosed `{{` yields its remaining text as `Err`.
fn placeholders(template: &str) -> Vec<Result<&str, &str>> {
    let mut found = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            found.push(Err(&rest[start..]));
            break;
        };
        found.push(Ok(after[..end].trim()));
        rest = &after[end + 2..];
    }

    found
}

/// Names referenced by `{{ name }}` placeholders, in order of first appearance.
pub fn placeholder_names(template: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for inner in placeholders(template).into_iter().flatten() {
        if !names.iter().any(|n| n == inner) {
            names.push(inner.to_string());
        }
    }
    names
}

/// Reject template syntax beyond plain `{{ name }}` placeholders.
pub fn check_template_syntax(template: &str, template_name: &str) -> Result<(), DefinitionError> {
    for token in ["{%", "{#"] {
        if template.contains(token) {
            return Err(DefinitionError::TemplateSyntaxNotAllowed {
                template: template_name.to_string(),
                token: token.to_string(),
            });
        }
    }

    for placeholder in placeholders(template) {
        let inner = placeholder.map_err(|unclosed| DefinitionError::InvalidPlaceholder {
            template: template_name.to_string(),
            placeholder: unclosed.to_string(),
        })?;
        if !is_identifier(inner) || is_reserved_name(inner) {
            return Err(DefinitionError::InvalidPlaceholder {
                template: template_name.to_string(),
                placeholder: inner.to_string(),
            });
        }
    }
    Ok(())
}

/// Fail when rendered text still contains a `{{` token.
pub fn check_fully_substituted(output: &str, template_name: &str) -> Result<(), RenderError> {
    let Some(start) = output.find("{{") else {
        return Ok(());
    };
    let token = match output[start..].find("}}") {
        Some(end) => &output[start..start + end + 2],
        None => &output[start..],
    };
    Err(RenderError::UnreplacedPlaceholder {
        template: template_name.to_string(),
        token: token.chars().take(64).collect(),
    })
}

/// Text substituted for a resolved value.
///
/// Strings are inserted verbatim; everything else uses its compact JSON text.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn finds_placeholders_in_order() {
        let names = placeholder_names("Hello {{name}}, you are {{ age }} years old. {{name}}");
        assert_eq!(names, vec!["name", "age"]);
    }

    #[test]
    fn unclosed_placeholder_is_ignored_by_scanner() {
        assert!(placeholder_names("a {{ name").is_empty());
    }

    #[test]
    fn block_and_comment_syntax_rejected() {
        assert!(check_template_syntax("{% if x %}{% endif %}", "user").is_err());
        assert!(check_template_syntax("{# note #}", "system").is_err());
        assert!(check_template_syntax("{{ x }}", "user").is_ok());
    }

    #[test]
    fn expressions_are_not_placeholders() {
        for template in [
            "{{ name | upper }}",
            "{{ name ~ name }}",
            "{{ name[0] }}",
            "{{ name.first }}",
            "{{- name -}}",
            "{{ }}",
            "{{ 1name }}",
            "tail {{ name",
        ] {
            let err = check_template_syntax(template, "user").unwrap_err();
            assert!(
                matches!(err, DefinitionError::InvalidPlaceholder { ref template, .. } if template == "user"),
                "{} should be rejected",
                template
            );
        }
    }

    #[test]
    fn literal_words_are_reserved() {
        for name in ["none", "None", "true", "TRUE", "false", "False"] {
            assert!(is_reserved_name(name));
            assert!(check_template_syntax(&format!("V={{{{{}}}}}", name), "user").is_err());
        }
        assert!(!is_reserved_name("nonce"));
    }

    #[test]
    fn leftover_token_is_reported() {
        assert!(check_fully_substituted("Hello Ada }} {", "user").is_ok());

        let err = check_fully_substituted("A {{ y }} tail", "user").unwrap_err();
        assert!(matches!(
            err,
            RenderError::UnreplacedPlaceholder { ref template, ref token } if template == "user" && token == "{{ y }}"
        ));

        let err = check_fully_substituted("open {{ end", "system").unwrap_err();
        assert!(matches!(err, RenderError::UnreplacedPlaceholder { ref token, .. } if token == "{{ end"));
    }

    #[test]
    fn display_values() {
        assert_eq!(display_value(&json!("Ada")), "Ada");
        assert_eq!(display_value(&json!(30)), "30");
        assert_eq!(display_value(&json!(true)), "true");
        assert_eq!(display_value(&json!(["rust", "sql"])), r#"["rust","sql"]"#);
        assert_eq!(display_value(&json!({"a": 1})), r#"{"a":1}"#);
    }
}
