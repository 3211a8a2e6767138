//! Lexical scope for the template expression rewriter (§3, §9 "Scope as value").
//!
//! A [`Scope`] is an immutable, persistent sequence of identifier names plus
//! the built-in global list. Extending a scope (entering an element with
//! `localVariables`, an iteration binder, or an arrow-function parameter
//! list) produces a new `Scope` sharing its parent via `Rc`; nothing is
//! mutated and nothing leaks across sibling subtrees.

use std::rc::Rc;

/// Global identifiers permissible inside templates without rewriting, per §3.
pub const BUILTIN_GLOBALS: &[&str] = &[
    "Infinity",
    "undefined",
    "NaN",
    "isFinite",
    "isNaN",
    "parseFloat",
    "parseInt",
    "decodeURI",
    "decodeURIComponent",
    "encodeURI",
    "encodeURIComponent",
    "Math",
    "Number",
    "Date",
    "Array",
    "Object",
    "Boolean",
    "String",
    "RegExp",
    "Map",
    "Set",
    "JSON",
    "Intl",
    "require",
];

/// Identifiers added to scope inside an event-handler statement body.
pub const EVENT_BODY_GLOBALS: &[&str] = &["$event", "arguments"];

enum ScopeLink {
    Root(Rc<Vec<String>>),
    Extend { parent: Scope, names: Vec<String> },
}

/// An immutable lexical scope. Cheap to clone (`Rc` internally).
#[derive(Clone)]
pub struct Scope(Rc<ScopeLink>);

impl Scope {
    /// The root scope: only the built-in globals plus any configured extras.
    pub fn root(extra_globals: impl IntoIterator<Item = String>) -> Self {
        let mut globals: Vec<String> = BUILTIN_GLOBALS.iter().map(|s| s.to_string()).collect();
        globals.extend(extra_globals);
        Self(Rc::new(ScopeLink::Root(Rc::new(globals))))
    }

    /// Produce a new scope extending `self` with `names`, without mutating
    /// `self`. Empty `names` still produces a new (functionally equivalent)
    /// scope rather than special-casing the no-op, keeping call sites simple.
    pub fn extend(&self, names: impl IntoIterator<Item = String>) -> Self {
        Self(Rc::new(ScopeLink::Extend {
            parent: self.clone(),
            names: names.into_iter().collect(),
        }))
    }

    /// Whether `name` is bound in this scope (locally or as a built-in).
    pub fn contains(&self, name: &str) -> bool {
        match &*self.0 {
            ScopeLink::Root(globals) => globals.iter().any(|g| g == name),
            ScopeLink::Extend { parent, names } => {
                names.iter().any(|n| n == name) || parent.contains(name)
            }
        }
    }

    /// Extend with the identifiers used inside an event-handler body.
    pub fn extend_event_body(&self) -> Self {
        self.extend(EVENT_BODY_GLOBALS.iter().map(|s| s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_scope_recognizes_builtins() {
        let scope = Scope::root(std::iter::empty());
        assert!(scope.contains("Math"));
        assert!(scope.contains("undefined"));
        assert!(!scope.contains("items"));
    }

    #[test]
    fn extend_shadows_without_mutating_parent() {
        let root = Scope::root(std::iter::empty());
        let child = root.extend(["item".to_string()]);
        assert!(child.contains("item"));
        assert!(!root.contains("item"));
    }

    #[test]
    fn extra_globals_are_recognized() {
        let scope = Scope::root(["$registry".to_string()]);
        assert!(scope.contains("$registry"));
    }

    #[test]
    fn event_body_adds_event_and_arguments() {
        let scope = Scope::root(std::iter::empty()).extend_event_body();
        assert!(scope.contains("$event"));
        assert!(scope.contains("arguments"));
    }
}
