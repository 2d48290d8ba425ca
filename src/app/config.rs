//! Configuration loading and prompt store assembly.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::adapters::{EmbeddedPromptStore, FilesystemPromptStore, LayeredPromptStore};
use crate::domain::config::{CONFIG_FILE, parse_config_content};
use crate::domain::{AppError, EngineConfig};

/// Load configuration.
///
/// An explicit `path` must exist. Without one, `prompt-engine.toml` in the
/// current directory is used when present and defaults otherwise.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig, AppError> {
    let (path, explicit) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(CONFIG_FILE), false),
    };

    match fs::read_to_string(&path) {
        Ok(content) => {
            debug!(path = %path.display(), "configuration loaded");
            parse_config_content(&content)
        }
        Err(err) if err.kind() == ErrorKind::NotFound && !explicit => Ok(EngineConfig::default()),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            Err(AppError::config_error(format!("Config file not found: {}", path.display())))
        }
        Err(err) => Err(err.into()),
    }
}

/// Build the prompt store described by `config`.
///
/// `prompts_dir` overrides `store.prompts_dir`. Directory definitions shadow
/// built-in ones with the same key.
pub fn build_store(
    config: &EngineConfig,
    prompts_dir: Option<&Path>,
) -> Result<LayeredPromptStore, AppError> {
    let dir = prompts_dir.map(Path::to_path_buf).or_else(|| config.store.prompts_dir.clone());

    let mut store = LayeredPromptStore::new();
    if let Some(dir) = dir {
        if !dir.is_dir() {
            return Err(AppError::config_error(format!(
                "Prompt directory not found: {}",
                dir.display()
            )));
        }
        store = store.push(FilesystemPromptStore::new(dir));
    }
    if config.store.include_builtin {
        store = store.push(EmbeddedPromptStore::new());
    }
    if store.is_empty() {
        return Err(AppError::config_error("No prompt source configured"));
    }
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::PromptStore;
    use tempfile::TempDir;

    #[test]
    fn explicit_missing_config_is_an_error() {
        let err = load_config(Some(Path::new("/no/such/prompt-engine.toml"))).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn loads_explicit_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("engine.toml");
        fs::write(&path, "[log]\nfilter = \"debug\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.log.filter, "debug");
    }

    #[test]
    fn directory_overrides_builtin() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("check-answer.yml"),
            "key: check-answer\nuserTemplate: Local\nmodel: local-model\n",
        )
        .unwrap();

        let store = build_store(&EngineConfig::default(), Some(temp.path())).unwrap();
        assert_eq!(store.load("check-answer").unwrap().model, "local-model");
        assert!(store.load("generate-questions").is_ok());
    }

    #[test]
    fn builtin_can_be_disabled() {
        let temp = TempDir::new().unwrap();
        let mut config = EngineConfig::default();
        config.store.include_builtin = false;

        let store = build_store(&config, Some(temp.path())).unwrap();
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn missing_prompt_directory_is_reported() {
        let Err(err) = build_store(&EngineConfig::default(), Some(Path::new("/no/such/dir"))) else {
            panic!("missing directory should be rejected");
        };
        assert!(err.to_string().contains("Prompt directory not found"));
    }
}
