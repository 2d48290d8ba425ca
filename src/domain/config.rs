//! Engine configuration loaded from `prompt-engine.toml`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::error::AppError;

pub const CONFIG_FILE: &str = "prompt-engine.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.store.validate()?;
        self.log.validate()?;
        Ok(())
    }
}

/// Where prompt definitions come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Directory of `<key>.yml|.yaml|.json` definitions.
    #[serde(default)]
    pub prompts_dir: Option<PathBuf>,
    /// Serve the built-in prompts underneath the directory.
    #[serde(default = "default_true")]
    pub include_builtin: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { prompts_dir: None, include_builtin: default_true() }
    }
}

impl StoreConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(dir) = &self.prompts_dir
            && dir.as_os_str().is_empty()
        {
            return Err(AppError::config_error("store.prompts_dir must not be empty"));
        }
        if self.prompts_dir.is_none() && !self.include_builtin {
            return Err(AppError::config_error(
                "no prompt source configured: set store.prompts_dir or store.include_builtin",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Tracing filter used when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { filter: default_filter() }
    }
}

impl LogConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.filter.trim().is_empty() {
            return Err(AppError::config_error("log.filter must not be empty"));
        }
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

fn default_filter() -> String {
    "warn".to_string()
}

/// Parse configuration from TOML content.
pub fn parse_config_content(content: &str) -> Result<EngineConfig, AppError> {
    let config: EngineConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_content_uses_defaults() {
        let config = parse_config_content("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert!(config.store.include_builtin);
        assert_eq!(config.log.filter, "warn");
    }

    #[test]
    fn parses_store_and_log_sections() {
        let config = parse_config_content(
            r#"
[store]
prompts_dir = "prompts"
include_builtin = false

[log]
filter = "prompt_engine=debug"
"#,
        )
        .unwrap();

        assert_eq!(config.store.prompts_dir, Some(PathBuf::from("prompts")));
        assert!(!config.store.include_builtin);
        assert_eq!(config.log.filter, "prompt_engine=debug");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = parse_config_content("[store]\nprompt_dir = \"x\"\n").unwrap_err();
        assert!(matches!(err, AppError::TomlParse(_)));
    }

    #[test]
    fn requires_some_prompt_source() {
        let err = parse_config_content("[store]\ninclude_builtin = false\n").unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn rejects_blank_filter() {
        assert!(parse_config_content("[log]\nfilter = \" \"\n").is_err());
    }
}
