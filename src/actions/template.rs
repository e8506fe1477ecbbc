//! Template evaluation for dynamic action fields.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use log::debug;
use serde_json::Value;

/// Synchronous, side-effect-free evaluator for descriptor fields.
///
/// Results may change between calls, so callers render again every time
/// they need a value.
pub trait TemplateRenderer {
    fn render(&self, expr: &Value) -> Value;
}

impl<F> TemplateRenderer for F
where
    F: Fn(&Value) -> Value,
{
    fn render(&self, expr: &Value) -> Value {
        self(expr)
    }
}

/// Returns every expression unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Verbatim;

impl TemplateRenderer for Verbatim {
    fn render(&self, expr: &Value) -> Value {
        expr.clone()
    }
}

/// Live variable table shared between a renderer and whoever updates it.
pub type Variables = Rc<RefCell<BTreeMap<String, Value>>>;

/// Substitutes whole-string `{{ name }}` references with variable values.
///
/// Other strings are trimmed; non-string values pass through unchanged.
/// Unknown variables render as `null`, which resolves to `"none"` for
/// actions and to the default for durations.
#[derive(Debug, Clone, Default)]
pub struct VariableRenderer {
    variables: Variables,
}

impl VariableRenderer {
    pub fn new(variables: BTreeMap<String, Value>) -> Self {
        Self {
            variables: Rc::new(RefCell::new(variables)),
        }
    }

    pub fn handle(&self) -> Variables {
        Rc::clone(&self.variables)
    }

    pub fn set(&self, name: impl Into<String>, value: Value) {
        self.variables.borrow_mut().insert(name.into(), value);
    }
}

impl TemplateRenderer for VariableRenderer {
    fn render(&self, expr: &Value) -> Value {
        let Some(text) = expr.as_str() else {
            return expr.clone();
        };
        let Some(name) = variable_reference(text) else {
            return Value::String(text.trim().to_string());
        };
        match self.variables.borrow().get(name) {
            Some(value) => value.clone(),
            None => {
                debug!("Template variable '{}' is not set", name);
                Value::Null
            }
        }
    }
}

/// Extracts `name` from `{{ name }}`.
pub fn variable_reference(text: &str) -> Option<&str> {
    let inner = text
        .trim()
        .strip_prefix("{{")
        .and_then(|rest| rest.strip_suffix("}}"))?
        .trim();
    (!inner.is_empty()).then_some(inner)
}
