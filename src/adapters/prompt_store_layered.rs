use crate::domain::{AppError, PromptDefinition};
use crate::ports::PromptStore;

/// Consults stores in order; the first store that knows a key wins.
#[derive(Default)]
pub struct LayeredPromptStore {
    layers: Vec<Box<dyn PromptStore + Send + Sync>>,
}

impl LayeredPromptStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, store: impl PromptStore + Send + Sync + 'static) -> Self {
        self.layers.push(Box::new(store));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl PromptStore for LayeredPromptStore {
    fn load(&self, key: &str) -> Result<PromptDefinition, AppError> {
        for layer in &self.layers {
            match layer.load(key) {
                Err(AppError::PromptNotFound(_)) => continue,
                other => return other,
            }
        }
        Err(AppError::PromptNotFound(key.to_string()))
    }

    fn keys(&self) -> Result<Vec<String>, AppError> {
        let mut keys = Vec::new();
        for layer in &self.layers {
            keys.extend(layer.keys()?);
        }
        keys.sort();
        keys.dedup();
        Ok(keys)
    }
}
