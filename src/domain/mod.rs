pub mod binder;
pub mod config;
pub mod definition;
pub mod error;
pub mod payload;
pub mod render;
pub mod schema;
pub mod source;
pub mod template;
pub mod validation;

pub use binder::{Binding, Strategy};
pub use config::{EngineConfig, LogConfig, StoreConfig};
pub use definition::PromptDefinition;
pub use error::{AppError, DefinitionError, RenderError};
pub use payload::{Message, RenderedRequestPayload, Role};
pub use render::{PromptEngine, ResolvedArguments};
pub use schema::{Alias, ArgsSchema, PropertySpec, ValueType};
pub use source::{Source, TypedSource};
pub use template::TemplateRenderer;
