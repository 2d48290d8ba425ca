//! prompt-engine: schema-driven prompt rendering for language-model requests.
//!
//! A [`PromptDefinition`] declares templates, an argument schema with binding
//! hints, defaults and model settings. Rendering binds arguments from ordered
//! [`Source`]s, validates them and substitutes them into the templates.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

use std::fs;
use std::path::Path;

use adapters::prompt_files::parse_definition_file;
use adapters::{EmbeddedPromptStore, MinijinjaTemplateRenderer};
use ports::PromptStore;

pub use domain::{
    AppError, ArgsSchema, Binding, DefinitionError, Message, PromptDefinition, PromptEngine,
    PropertySpec, RenderError, RenderedRequestPayload, ResolvedArguments, Role, Source, Strategy,
    TypedSource, ValueType,
};

/// Render `definition` against `sources` with the default template renderer.
pub fn render(
    definition: &PromptDefinition,
    sources: &[Source],
) -> Result<RenderedRequestPayload, RenderError> {
    PromptEngine::new(MinijinjaTemplateRenderer::new()).render(definition, sources)
}

/// Render a prompt looked up in `store`.
pub fn render_from_store<S: PromptStore + ?Sized>(
    store: &S,
    key: &str,
    sources: &[Source],
) -> Result<RenderedRequestPayload, AppError> {
    let definition = store.load(key)?;
    Ok(render(&definition, sources)?)
}

/// Render one of the built-in prompts.
pub fn render_builtin(key: &str, sources: &[Source]) -> Result<RenderedRequestPayload, AppError> {
    render_from_store(&EmbeddedPromptStore::new(), key, sources)
}

/// Load and validate a definition file (`.yml`, `.yaml` or `.json`).
pub fn load_definition(path: &Path) -> Result<PromptDefinition, AppError> {
    let content = fs::read_to_string(path)?;
    parse_definition_file(path, &content)
}
