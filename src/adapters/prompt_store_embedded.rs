use std::path::Path;

use include_dir::{Dir, include_dir};

use crate::adapters::prompt_files::{is_definition_file, key_for, parse_definition_file};
use crate::domain::{AppError, PromptDefinition};
use crate::ports::PromptStore;

static PROMPTS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/prompts");

/// Built-in interview-preparation prompts compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedPromptStore;

impl EmbeddedPromptStore {
    pub fn new() -> Self {
        Self
    }
}

fn definition_files() -> impl Iterator<Item = &'static include_dir::File<'static>> {
    PROMPTS_DIR.files().filter(|file| is_definition_file(file.path()))
}

impl PromptStore for EmbeddedPromptStore {
    fn load(&self, key: &str) -> Result<PromptDefinition, AppError> {
        let file = definition_files()
            .find(|file| key_for(file.path()).as_deref() == Some(key))
            .ok_or_else(|| AppError::PromptNotFound(key.to_string()))?;

        let content = file.contents_utf8().ok_or_else(|| {
            AppError::parse_error(file.path().display().to_string(), "not valid UTF-8")
        })?;

        let origin = Path::new("builtin").join(file.path());
        parse_definition_file(&origin, content)
    }

    fn keys(&self) -> Result<Vec<String>, AppError> {
        let mut keys: Vec<String> = definition_files().filter_map(|file| key_for(file.path())).collect();
        keys.sort();
        keys.dedup();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ships_builtin_prompts() {
        let keys = EmbeddedPromptStore::new().keys().unwrap();
        assert_eq!(keys, vec!["check-answer", "generate-questions", "review-vacancy-response"]);
    }

    #[test]
    fn every_builtin_prompt_is_valid() {
        let store = EmbeddedPromptStore::new();
        for key in store.keys().unwrap() {
            let def = store.load(&key).unwrap();
            assert_eq!(def.key, key);
        }
    }

    #[test]
    fn unknown_key_is_not_found() {
        assert!(matches!(
            EmbeddedPromptStore::new().load("nope"),
            Err(AppError::PromptNotFound(_))
        ));
    }
}
