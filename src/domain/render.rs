//! Prompt rendering: resolve arguments, validate them, substitute, assemble.

use std::collections::BTreeMap;

use tracing::debug;

use super::binder::{Binding, Strategy, bind};
use super::definition::{PromptDefinition, SYSTEM_TEMPLATE, USER_TEMPLATE};
use super::error::RenderError;
use super::payload::{Message, RenderedRequestPayload, Role};
use super::source::Source;
use super::template::{TemplateRenderer, check_fully_substituted, display_value};
use super::validation::validate_arguments;

/// Arguments bound for one render call, keyed by argument name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedArguments {
    bindings: BTreeMap<String, Binding>,
}

impl ResolvedArguments {
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Binding)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn as_map(&self) -> &BTreeMap<String, Binding> {
        &self.bindings
    }
}

/// Stateless prompt renderer; safe to share across threads when `R` is.
#[derive(Debug, Clone, Default)]
pub struct PromptEngine<R> {
    renderer: R,
}

impl<R: TemplateRenderer> PromptEngine<R> {
    pub fn new(renderer: R) -> Self {
        Self { renderer }
    }

    /// Bind every declared argument from `sources`, falling back to defaults.
    ///
    /// Unresolved arguments are simply absent; required-ness is checked by
    /// `render`.
    pub fn resolve_arguments(
        &self,
        definition: &PromptDefinition,
        sources: &[Source],
    ) -> Result<ResolvedArguments, RenderError> {
        definition.validate()?;

        let mut bindings = BTreeMap::new();
        for (name, spec) in &definition.args_schema.properties {
            let binding = match bind(name, spec, sources)? {
                Some(binding) => Some(binding),
                None => definition.defaults.get(name).filter(|v| !v.is_null()).map(|value| {
                    Binding { value: value.clone(), strategy: Strategy::Default, source: None }
                }),
            };

            match binding {
                Some(binding) => {
                    debug!(
                        prompt = %definition.key,
                        argument = %name,
                        strategy = ?binding.strategy,
                        source = ?binding.source,
                        "argument resolved"
                    );
                    bindings.insert(name.clone(), binding);
                }
                None => debug!(prompt = %definition.key, argument = %name, "argument unresolved"),
            }
        }

        Ok(ResolvedArguments { bindings })
    }

    /// Render `definition` against `sources`.
    ///
    /// Fails before any substitution when a required argument is missing or a
    /// value violates its declared type or enum, and after substitution when a
    /// `{{` token is left in either message.
    pub fn render(
        &self,
        definition: &PromptDefinition,
        sources: &[Source],
    ) -> Result<RenderedRequestPayload, RenderError> {
        let arguments = self.resolve_arguments(definition, sources)?;
        validate_arguments(&definition.args_schema, arguments.as_map())?;

        let texts: BTreeMap<String, String> = definition
            .args_schema
            .properties
            .keys()
            .map(|name| {
                let text = arguments.get(name).map(|b| display_value(&b.value)).unwrap_or_default();
                (name.clone(), text)
            })
            .collect();

        let mut messages = Vec::with_capacity(2);
        if !definition.system_template.trim().is_empty() {
            let system = self.renderer.render(&definition.system_template, &texts, SYSTEM_TEMPLATE)?;
            check_fully_substituted(&system, SYSTEM_TEMPLATE)?;
            messages.push(Message { role: Role::System, content: system });
        }
        let input = self.renderer.render(&definition.user_template, &texts, USER_TEMPLATE)?;
        check_fully_substituted(&input, USER_TEMPLATE)?;
        messages.push(Message { role: Role::User, content: input.clone() });

        debug!(prompt = %definition.key, version = definition.version, "prompt rendered");

        Ok(RenderedRequestPayload {
            model: definition.model.clone(),
            version: definition.version,
            parameters: definition.parameters.clone(),
            response_contract: definition.response_contract.clone(),
            messages,
            input,
        })
    }
}
