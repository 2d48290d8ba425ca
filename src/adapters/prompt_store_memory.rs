use std::collections::BTreeMap;

use crate::domain::{AppError, PromptDefinition};
use crate::ports::PromptStore;

/// In-memory prompt store for callers that load definitions themselves.
#[derive(Debug, Clone, Default)]
pub struct MemoryPromptStore {
    definitions: BTreeMap<String, PromptDefinition>,
}

impl MemoryPromptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and register a definition, replacing any previous one with the same key.
    pub fn insert(&mut self, definition: PromptDefinition) -> Result<(), AppError> {
        definition
            .validate()
            .map_err(|source| AppError::InvalidDefinition { key: definition.key.clone(), source })?;
        self.definitions.insert(definition.key.clone(), definition);
        Ok(())
    }

    pub fn with(mut self, definition: PromptDefinition) -> Result<Self, AppError> {
        self.insert(definition)?;
        Ok(self)
    }
}

impl PromptStore for MemoryPromptStore {
    fn load(&self, key: &str) -> Result<PromptDefinition, AppError> {
        self.definitions.get(key).cloned().ok_or_else(|| AppError::PromptNotFound(key.to_string()))
    }

    fn keys(&self) -> Result<Vec<String>, AppError> {
        Ok(self.definitions.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DefinitionError;

    fn definition(key: &str, model: &str) -> PromptDefinition {
        PromptDefinition::new(key, model, "Hello")
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryPromptStore::new().with(definition("greeting", "m")).unwrap();
        assert_eq!(store.load("greeting").unwrap().model, "m");
        assert_eq!(store.keys().unwrap(), vec!["greeting"]);
    }

    #[test]
    fn memory_store_rejects_invalid_definitions() {
        let mut def = definition("broken", "m");
        def.user_template = "{{missing}}".into();
        let err = MemoryPromptStore::new().with(def).unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidDefinition { source: DefinitionError::UndeclaredPlaceholder { .. }, .. }
        ));
    }
}
