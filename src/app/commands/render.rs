//! `render` command: bind sources to a stored prompt and assemble the payload.

use std::fs;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use serde_json::Value;

use crate::app::AppContext;
use crate::domain::{AppError, PromptDefinition, RenderedRequestPayload, ResolvedArguments, Source};
use crate::ports::PromptStore;

/// Path meaning "read the source from stdin".
pub const STDIN_PATH: &str = "-";

/// A `--source [TYPE=]FILE` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceArg {
    pub type_name: Option<String>,
    pub path: String,
}

impl FromStr for SourceArg {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (type_name, path) = match raw.split_once('=') {
            Some((prefix, rest)) if is_type_name(prefix) => (Some(prefix.to_string()), rest),
            _ => (None, raw),
        };
        if path.is_empty() {
            return Err(format!("missing file in source '{}'", raw));
        }
        Ok(Self { type_name, path: path.to_string() })
    }
}

fn is_type_name(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Read every source in order. At most one source may come from stdin.
pub fn load_sources(args: &[SourceArg], mut stdin: impl Read) -> Result<Vec<Source>, AppError> {
    if args.iter().filter(|arg| arg.path == STDIN_PATH).count() > 1 {
        return Err(AppError::config_error("stdin can supply at most one source"));
    }

    let mut sources = Vec::with_capacity(args.len());
    for arg in args {
        let value = if arg.path == STDIN_PATH {
            let mut content = String::new();
            stdin.read_to_string(&mut content)?;
            parse_source_value("stdin", &content, false)?
        } else {
            let path = Path::new(&arg.path);
            let content = fs::read_to_string(path).map_err(|err| {
                AppError::config_error(format!("Failed to read source {}: {}", arg.path, err))
            })?;
            let is_yaml = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == "yml" || ext == "yaml");
            parse_source_value(&arg.path, &content, is_yaml)?
        };

        let source = match &arg.type_name {
            Some(type_name) => Source::object(type_name.as_str(), &value)?,
            None => Source::from_json(value)?,
        };
        sources.push(source);
    }
    Ok(sources)
}

fn parse_source_value(what: &str, content: &str, is_yaml: bool) -> Result<Value, AppError> {
    if is_yaml {
        serde_yaml::from_str(content).map_err(|err| AppError::parse_error(what, err))
    } else {
        serde_json::from_str(content).map_err(|err| AppError::parse_error(what, err))
    }
}

/// Result of a successful render.
#[derive(Debug)]
pub struct RenderOutcome {
    pub definition: PromptDefinition,
    pub arguments: ResolvedArguments,
    pub payload: RenderedRequestPayload,
}

impl RenderOutcome {
    /// One line per declared argument describing how it was bound.
    pub fn explain(&self) -> Vec<String> {
        self.definition
            .args_schema
            .properties
            .keys()
            .map(|name| match self.arguments.get(name) {
                Some(binding) => match binding.source {
                    Some(index) => {
                        format!("{}\t{}\tsource #{}", name, binding.strategy.as_str(), index)
                    }
                    None => format!("{}\t{}", name, binding.strategy.as_str()),
                },
                None => format!("{}\tunresolved", name),
            })
            .collect()
    }
}

/// Execute the render command.
pub fn execute<S: PromptStore>(
    ctx: &AppContext<S>,
    key: &str,
    sources: &[Source],
) -> Result<RenderOutcome, AppError> {
    let definition = ctx.store().load(key)?;
    let arguments = ctx.engine().resolve_arguments(&definition, sources)?;
    let payload = ctx.engine().render(&definition, sources)?;
    Ok(RenderOutcome { definition, arguments, payload })
}
