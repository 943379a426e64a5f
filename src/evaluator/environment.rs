use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::Value;

#[derive(Debug)]
struct EnvironmentData {
    bindings: HashMap<String, Value>,
    outer: Option<Environment>,
}

/// A mapping from identifier name to runtime value, plus an optional outer
/// environment forming a parent chain (spec §3.4).
///
/// Modeled as a reference-counted handle so multiple [`Value::Function`]
/// closures can share an ancestor frame without a garbage collector — no
/// cycles are possible since the chain only ever points outward.
#[derive(Clone, Debug)]
pub struct Environment(Rc<RefCell<EnvironmentData>>);

impl Environment {
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(EnvironmentData {
            bindings: HashMap::new(),
            outer: None,
        })))
    }

    /// Creates a child frame whose outer environment is `outer`.
    pub fn enclosed(outer: &Environment) -> Self {
        Self(Rc::new(RefCell::new(EnvironmentData {
            bindings: HashMap::new(),
            outer: Some(outer.clone()),
        })))
    }

    /// Looks up `name`, walking the chain from innermost outward.
    pub fn get(&self, name: &str) -> Option<Value> {
        let data = self.0.borrow();
        if let Some(value) = data.bindings.get(name) {
            return Some(value.clone());
        }
        data.outer.as_ref()?.get(name)
    }

    /// Creates or shadows a binding in this, the innermost, frame.
    pub fn set(&self, name: impl Into<String>, value: Value) {
        self.0.borrow_mut().bindings.insert(name.into(), value);
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_walks_outer_chain() {
        let outer = Environment::new();
        outer.set("x", Value::Integer(1));

        let inner = Environment::enclosed(&outer);
        assert_eq!(inner.get("x"), Some(Value::Integer(1)));
    }

    #[test]
    fn set_always_targets_innermost_frame() {
        let outer = Environment::new();
        outer.set("x", Value::Integer(1));

        let inner = Environment::enclosed(&outer);
        inner.set("x", Value::Integer(2));

        assert_eq!(inner.get("x"), Some(Value::Integer(2)));
        assert_eq!(outer.get("x"), Some(Value::Integer(1)));
    }

    #[test]
    fn unbound_name_is_none() {
        let env = Environment::new();
        assert_eq!(env.get("missing"), None);
    }
}
