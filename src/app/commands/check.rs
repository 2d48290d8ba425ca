//! `check` command: load and validate prompt definitions.

use tracing::debug;

use crate::app::AppContext;
use crate::domain::AppError;
use crate::ports::PromptStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckFailure {
    pub key: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct CheckReport {
    pub checked: Vec<String>,
    pub failures: Vec<CheckFailure>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Validate the named prompts, or every prompt when `keys` is empty.
///
/// Per-prompt problems are collected in the report; only a failure to
/// enumerate the store is returned as an error.
pub fn execute<S: PromptStore>(ctx: &AppContext<S>, keys: &[String]) -> Result<CheckReport, AppError> {
    let keys = if keys.is_empty() { ctx.store().keys()? } else { keys.to_vec() };

    let mut report = CheckReport::default();
    for key in keys {
        match ctx.store().load(&key) {
            Ok(_) => debug!(key = %key, "prompt definition valid"),
            Err(err) => report.failures.push(CheckFailure { key: key.clone(), message: err.to_string() }),
        }
        report.checked.push(key);
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{EmbeddedPromptStore, FilesystemPromptStore};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn builtin_prompts_pass() {
        let report = execute(&AppContext::new(EmbeddedPromptStore::new()), &[]).unwrap();
        assert!(report.is_ok());
        assert_eq!(report.checked.len(), 3);
    }

    #[test]
    fn reports_invalid_and_unknown_prompts() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("good.yml"), "key: good\nuserTemplate: Hi\nmodel: m\n").unwrap();
        fs::write(temp.path().join("bad.yml"), "key: bad\nuserTemplate: \"{{x}}\"\nmodel: m\n")
            .unwrap();
        let ctx = AppContext::new(FilesystemPromptStore::new(temp.path()));

        let report = execute(&ctx, &[]).unwrap();
        assert_eq!(report.checked, vec!["bad", "good"]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].key, "bad");

        let report = execute(&ctx, &["missing".to_string()]).unwrap();
        assert!(!report.is_ok());
    }
}
