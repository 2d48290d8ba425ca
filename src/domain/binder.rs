//! Schema-driven argument binding.
//!
//! Resolves one argument from an ordered list of sources. Strategies run in a
//! fixed order and each strategy is tried against every source before the next
//! strategy starts:
//!
//! 1. direct key on a flat map
//! 2. `x-path` property on a structured source
//! 3. `x-aliases`, in declared order (qualified aliases only match sources
//!    carrying that type name)
//! 4. `x-deepSearch`, a depth-first walk for the argument name
//!
//! Null values count as missing. Binding has no side effects.

use serde::Serialize;
use serde_json::{Map, Value};

use super::error::RenderError;
use super::schema::{Alias, PropertySpec};
use super::source::Source;

/// How an argument value was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Strategy {
    DirectKey,
    DeclaredPath,
    Alias,
    DeepSearch,
    Default,
}

impl Strategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::DirectKey => "directKey",
            Strategy::DeclaredPath => "declaredPath",
            Strategy::Alias => "alias",
            Strategy::DeepSearch => "deepSearch",
            Strategy::Default => "default",
        }
    }
}

/// A resolved argument value plus where it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Binding {
    pub value: Value,
    pub strategy: Strategy,
    /// Index of the source in call order; `None` for defaults.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<usize>,
}

impl Binding {
    fn found(value: &Value, strategy: Strategy, source: usize) -> Self {
        Self { value: value.clone(), strategy, source: Some(source) }
    }
}

/// Resolve `name` from `sources`, or `Ok(None)` if nothing supplies it.
///
/// Errors only for malformed binding declarations.
pub fn bind(
    name: &str,
    spec: &PropertySpec,
    sources: &[Source],
) -> Result<Option<Binding>, RenderError> {
    for (index, source) in sources.iter().enumerate() {
        if let Source::Map(fields) = source
            && let Some(value) = present(fields.get(name))
        {
            return Ok(Some(Binding::found(value, Strategy::DirectKey, index)));
        }
    }

    if let Some(path) = &spec.path {
        if path.trim().is_empty() || path.contains('.') {
            return Err(RenderError::MalformedBinding {
                name: name.to_string(),
                reason: format!("x-path '{}' must be a single non-empty property name", path),
            });
        }
        for (index, source) in sources.iter().enumerate() {
            if let Source::Object { fields, .. } = source
                && let Some(value) = present(lookup_field(fields, path, true))
            {
                return Ok(Some(Binding::found(value, Strategy::DeclaredPath, index)));
            }
        }
    }

    let aliases = spec.parsed_aliases(name).map_err(|err| RenderError::MalformedBinding {
        name: name.to_string(),
        reason: err.to_string(),
    })?;
    for alias in &aliases {
        for (index, source) in sources.iter().enumerate() {
            if let Some(value) = resolve_alias(alias, source) {
                return Ok(Some(Binding::found(value, Strategy::Alias, index)));
            }
        }
    }

    if spec.deep_search {
        let variants = name_variants(name);
        for (index, source) in sources.iter().enumerate() {
            if let Some(value) = deep_find(source.fields(), &variants) {
                return Ok(Some(Binding::found(value, Strategy::DeepSearch, index)));
            }
        }
    }

    Ok(None)
}

fn resolve_alias<'a>(alias: &Alias, source: &'a Source) -> Option<&'a Value> {
    if !alias.applies_to(source.type_name()) {
        return None;
    }
    let lenient = !source.is_map();
    let (first, rest) = alias.segments.split_first()?;
    let mut current = lookup_field(source.fields(), first, lenient)?;
    for segment in rest {
        current = step(current, segment, lenient)?;
    }
    present(Some(current))
}

fn step<'a>(value: &'a Value, segment: &str, lenient: bool) -> Option<&'a Value> {
    match value {
        Value::Object(fields) => lookup_field(fields, segment, lenient),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

/// Field lookup; structured sources also accept snake_case/camelCase spellings.
fn lookup_field<'a>(fields: &'a Map<String, Value>, name: &str, lenient: bool) -> Option<&'a Value> {
    if let Some(value) = fields.get(name) {
        return Some(value);
    }
    if !lenient {
        return None;
    }
    name_variants(name).iter().skip(1).find_map(|variant| fields.get(variant))
}

/// Pre-order depth-first search over nested objects and arrays.
fn deep_find<'a>(fields: &'a Map<String, Value>, variants: &[String]) -> Option<&'a Value> {
    for (key, child) in fields {
        if variants.iter().any(|v| v == key)
            && let Some(value) = present(Some(child))
        {
            return Some(value);
        }
        if let Some(found) = deep_find_value(child, variants) {
            return Some(found);
        }
    }
    None
}

fn deep_find_value<'a>(value: &'a Value, variants: &[String]) -> Option<&'a Value> {
    match value {
        Value::Object(fields) => deep_find(fields, variants),
        Value::Array(items) => items.iter().find_map(|item| deep_find_value(item, variants)),
        _ => None,
    }
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// `name` followed by its camelCase and snake_case spellings, without duplicates.
pub fn name_variants(name: &str) -> Vec<String> {
    let mut variants = vec![name.to_string()];
    for variant in [to_camel_case(name), to_snake_case(name)] {
        if !variants.contains(&variant) {
            variants.push(variant);
        }
    }
    variants
}

fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 && !out.ends_with('_') {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else if c == '-' {
            out.push('_');
        } else {
            out.push(c);
        }
    }
    out
}

fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '_' || c == '-' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
