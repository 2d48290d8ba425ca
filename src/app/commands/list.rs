//! `list` command.

use crate::app::AppContext;
use crate::domain::AppError;
use crate::ports::PromptStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSummary {
    pub key: String,
    pub version: u32,
    pub model: String,
}

/// Summaries of every available prompt, sorted by key.
pub fn execute<S: PromptStore>(ctx: &AppContext<S>) -> Result<Vec<PromptSummary>, AppError> {
    ctx.store()
        .keys()?
        .into_iter()
        .map(|key| -> Result<PromptSummary, AppError> {
            let definition = ctx.store().load(&key)?;
            Ok(PromptSummary { key, version: definition.version, model: definition.model })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryPromptStore;
    use crate::domain::PromptDefinition;

    #[test]
    fn lists_key_version_and_model() {
        let mut def = PromptDefinition::new("b", "model-b", "Hi");
        def.version = 4;
        let store = MemoryPromptStore::new()
            .with(def)
            .unwrap()
            .with(PromptDefinition::new("a", "model-a", "Hi"))
            .unwrap();

        let summaries = execute(&AppContext::new(store)).unwrap();
        assert_eq!(
            summaries,
            vec![
                PromptSummary { key: "a".into(), version: 1, model: "model-a".into() },
                PromptSummary { key: "b".into(), version: 4, model: "model-b".into() },
            ]
        );
    }
}
