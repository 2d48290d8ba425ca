use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::adapters::prompt_files::{
    DEFINITION_EXTENSIONS, is_definition_file, key_for, parse_definition_file,
};
use crate::domain::{AppError, PromptDefinition};
use crate::ports::PromptStore;

/// Prompt store backed by a directory of definition files.
#[derive(Debug, Clone)]
pub struct FilesystemPromptStore {
    root: PathBuf,
}

impl FilesystemPromptStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn candidate_paths(&self, key: &str) -> impl Iterator<Item = PathBuf> + '_ {
        let key = key.to_string();
        DEFINITION_EXTENSIONS.iter().map(move |ext| self.root.join(format!("{}.{}", key, ext)))
    }
}

/// Keys are file stems; anything that could escape the directory is refused.
fn is_safe_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('.')
        && !key.contains(['/', '\\'])
        && !key.contains("..")
}

impl PromptStore for FilesystemPromptStore {
    fn load(&self, key: &str) -> Result<PromptDefinition, AppError> {
        if !is_safe_key(key) {
            return Err(AppError::PromptNotFound(key.to_string()));
        }

        for path in self.candidate_paths(key) {
            match fs::read_to_string(&path) {
                Ok(content) => return parse_definition_file(&path, &content),
                Err(err) if err.kind() == ErrorKind::NotFound => continue,
                Err(err) => return Err(err.into()),
            }
        }

        Err(AppError::PromptNotFound(key.to_string()))
    }

    fn keys(&self) -> Result<Vec<String>, AppError> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(AppError::config_error(format!(
                    "Prompt directory not found: {}",
                    self.root.display()
                )));
            }
            Err(err) => return Err(err.into()),
        };

        let mut keys = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.is_file()
                && is_definition_file(&path)
                && let Some(key) = key_for(&path)
            {
                keys.push(key);
            }
        }
        keys.sort();
        keys.dedup();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn loads_definition_by_key() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "greeting.yml", "key: greeting\nuserTemplate: Hi\nmodel: m\n");

        let store = FilesystemPromptStore::new(temp.path());
        let def = store.load("greeting").unwrap();
        assert_eq!(def.key, "greeting");
    }

    #[test]
    fn lists_sorted_keys_of_definition_files_only() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "b.yaml", "key: b\nuserTemplate: Hi\nmodel: m\n");
        write(temp.path(), "a.json", r#"{"key":"a","userTemplate":"Hi","model":"m"}"#);
        write(temp.path(), "notes.txt", "ignored");

        let store = FilesystemPromptStore::new(temp.path());
        assert_eq!(store.keys().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn missing_key_is_not_found() {
        let temp = TempDir::new().unwrap();
        let store = FilesystemPromptStore::new(temp.path());
        assert!(matches!(store.load("nope"), Err(AppError::PromptNotFound(k)) if k == "nope"));
    }

    #[test]
    fn path_like_keys_are_refused() {
        let temp = TempDir::new().unwrap();
        let store = FilesystemPromptStore::new(temp.path());
        assert!(matches!(store.load("../secret"), Err(AppError::PromptNotFound(_))));
        assert!(matches!(store.load("a/b"), Err(AppError::PromptNotFound(_))));
    }

    #[test]
    fn missing_directory_is_a_configuration_error() {
        let store = FilesystemPromptStore::new("/definitely/not/here");
        assert!(matches!(store.keys(), Err(AppError::Configuration(_))));
    }
}
