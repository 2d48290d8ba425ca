use crate::domain::{AppError, PromptDefinition};

/// Port for looking up prompt definitions by key.
///
/// Implementations return definitions that already passed
/// `PromptDefinition::validate`.
pub trait PromptStore {
    /// Load the definition registered under `key`.
    fn load(&self, key: &str) -> Result<PromptDefinition, AppError>;

    /// All keys this store can serve, sorted.
    fn keys(&self) -> Result<Vec<String>, AppError>;
}
