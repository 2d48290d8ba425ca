use std::collections::BTreeMap;
use std::sync::OnceLock;

use minijinja::{Environment, UndefinedBehavior};

use crate::domain::template::check_template_syntax;
use crate::domain::{RenderError, TemplateRenderer};

/// Template renderer using Minijinja in strict mode.
///
/// Undefined placeholders fail the render instead of expanding to nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinijinjaTemplateRenderer;

impl MinijinjaTemplateRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for MinijinjaTemplateRenderer {
    fn render(
        &self,
        template: &str,
        arguments: &BTreeMap<String, String>,
        template_name: &str,
    ) -> Result<String, RenderError> {
        check_template_syntax(template, template_name)?;

        let env = ENV.get_or_init(|| {
            let mut env = Environment::new();
            env.set_undefined_behavior(UndefinedBehavior::Strict);
            env.set_keep_trailing_newline(true);
            env
        });

        env.render_str(template, arguments).map_err(|err| template_render_error(template_name, err))
    }
}

static ENV: OnceLock<Environment<'static>> = OnceLock::new();

fn template_render_error(template_name: &str, err: impl std::fmt::Display) -> RenderError {
    RenderError::TemplateRender { template: template_name.to_string(), reason: err.to_string() }
}
