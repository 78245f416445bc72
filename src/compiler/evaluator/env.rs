use std::{cell::RefCell, collections::{BTreeMap, HashMap}, fmt, rc::Rc};

use crate::compiler::value::Value;

struct Scope {
    values: HashMap<String, Value>,
    parent: Option<Environment>,
}

/// A lexically scoped name-to-value table.
///
/// Environments form a chain: each one points at its enclosing parent, and
/// name lookup walks outward until a binding is found. Environments are
/// reference-counted so function values can capture their declaration
/// environment and outlive the scope that created it.
#[derive(Clone)]
pub struct Environment {
    inner: Rc<RefCell<Scope>>,
}

impl Environment {
    /// Creates the root environment with no parent.
    #[must_use]
    pub fn global() -> Self {
        Self { inner: Rc::new(RefCell::new(Scope { values: HashMap::new(),
                                                   parent: None, })), }
    }

    /// Creates a child environment enclosed by `self`.
    #[must_use]
    pub fn child(&self) -> Self {
        Self { inner: Rc::new(RefCell::new(Scope { values: HashMap::new(),
                                                   parent: Some(self.clone()), })), }
    }

    /// Binds `name` in this environment.
    ///
    /// Returns `false` when the name is already bound here; bindings in
    /// enclosing environments do not conflict (shadowing is allowed).
    pub fn define(&self, name: &str, value: Value) -> bool {
        let mut scope = self.inner.borrow_mut();
        if scope.values.contains_key(name) {
            return false;
        }
        scope.values.insert(name.to_string(), value);
        true
    }

    /// Resolves `name`, walking outward through enclosing environments.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        let scope = self.inner.borrow();
        if let Some(value) = scope.values.get(name) {
            return Some(value.clone());
        }
        scope.parent.as_ref().and_then(|parent| parent.get(name))
    }

    /// Rebinds the nearest existing binding of `name`.
    ///
    /// Returns `false` when no enclosing environment binds the name.
    pub fn assign(&self, name: &str, value: Value) -> bool {
        let mut scope = self.inner.borrow_mut();
        if let Some(slot) = scope.values.get_mut(name) {
            *slot = value;
            return true;
        }
        scope.parent
             .as_ref()
             .is_some_and(|parent| parent.assign(name, value))
    }

    /// A snapshot of the bindings in this environment only, in name order.
    /// Enclosing environments are not included.
    #[must_use]
    pub fn bindings(&self) -> BTreeMap<String, Value> {
        self.inner
            .borrow()
            .values
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::global()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Bindings may contain functions that captured this environment;
        // printing values would recurse forever.
        let scope = self.inner.borrow();
        let mut names: Vec<&String> = scope.values.keys().collect();
        names.sort();
        f.debug_struct("Environment")
         .field("names", &names)
         .field("has_parent", &scope.parent.is_some())
         .finish()
    }
}
