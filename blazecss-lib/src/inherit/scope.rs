use std::fmt;

use crate::style::owned_css::{NodeId, OwnedStylesheet};

/// Identity of the conditional block a node lives in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    Root,
    /// Params of the nearest enclosing at-rule, e.g. `screen`.
    Conditional(String),
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Root => write!(f, "<root>"),
            Scope::Conditional(params) => write!(f, "@{}", params),
        }
    }
}

/// Walks up from `id` and returns the params of the nearest at-rule ancestor.
pub fn scope_of(sheet: &OwnedStylesheet, id: NodeId) -> Scope {
    let mut current = sheet.parent(id);
    while let Some(ancestor) = current {
        if let Some(params) = sheet.at_rule_params(ancestor) {
            return Scope::Conditional(params.to_string());
        }
        current = sheet.parent(ancestor);
    }
    Scope::Root
}

/// The scope a rule was copied into, falling back to its position in the tree.
pub fn effective_scope(sheet: &OwnedStylesheet, rule: NodeId) -> Scope {
    match sheet.scope_hint(rule) {
        Some(scope) => scope.clone(),
        None => scope_of(sheet, rule),
    }
}
