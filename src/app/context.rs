use crate::adapters::MinijinjaTemplateRenderer;
use crate::domain::PromptEngine;
use crate::ports::PromptStore;

/// Application context holding dependencies for command execution.
pub struct AppContext<S: PromptStore> {
    store: S,
    engine: PromptEngine<MinijinjaTemplateRenderer>,
}

impl<S: PromptStore> AppContext<S> {
    pub fn new(store: S) -> Self {
        Self { store, engine: PromptEngine::new(MinijinjaTemplateRenderer::new()) }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn engine(&self) -> &PromptEngine<MinijinjaTemplateRenderer> {
        &self.engine
    }
}
