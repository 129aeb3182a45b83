use std::collections::{HashMap, HashSet};

use log::info;

use crate::config::InheritOptions;
use crate::error::InheritError;
use crate::inherit::scope::Scope;
use crate::inherit::{cleanup, extend, propagate};
use crate::style::owned_css::{NodeId, OwnedStylesheet};

/// Resolves `inherit` / `extend` declarations of one stylesheet.
///
/// Phases run in a fixed order: root rules are first copied into the
/// conditional blocks that reference them, then every directive is merged
/// into its same-scope targets and removed, and finally placeholder
/// selectors left over from the copies are stripped.
#[derive(Debug, Clone, Default)]
pub struct Inherit {
    options: InheritOptions,
}

impl Inherit {
    pub fn new(options: InheritOptions) -> Self {
        Inherit { options }
    }

    /// Runs all phases over `sheet`, mutating it in place.
    /// Stops at the first unresolvable directive.
    pub fn process(&self, sheet: &mut OwnedStylesheet) -> Result<(), InheritError> {
        let mut run = InheritRun {
            sheet,
            options: &self.options,
            propagated: Propagated::default(),
        };

        let root = run.sheet.root();
        let mut cursor = run.sheet.next_in_order(root, root);
        while let Some(id) = cursor {
            if run.sheet.is_at_rule(id) {
                propagate::propagate_into_scope(&mut run, id)?;
            }
            cursor = run.sheet.next_in_order(root, id);
        }
        info!("propagated {} rule(s) into conditional blocks", run.propagated.len());

        let extended = extend::extend_all(&mut run)?;
        info!("resolved {} inherit declaration(s)", extended);

        let stripped = cleanup::remove_placeholders(run.sheet);
        info!("removed {} placeholder rule(s)", stripped);
        Ok(())
    }
}

/// State of a single [`Inherit::process`] call.
pub(crate) struct InheritRun<'a> {
    pub(crate) sheet: &'a mut OwnedStylesheet,
    pub(crate) options: &'a InheritOptions,
    pub(crate) propagated: Propagated,
}

impl InheritRun<'_> {
    /// Is `id` a declaration the options treat as a directive?
    pub(crate) fn is_directive(&self, id: NodeId) -> bool {
        self.sheet
            .declaration(id)
            .is_some_and(|(property, _)| self.options.is_directive(property))
    }
}

/// Target queries already copied into each scope.
#[derive(Debug, Default)]
pub(crate) struct Propagated {
    by_scope: HashMap<Scope, HashSet<String>>,
}

impl Propagated {
    pub(crate) fn contains(&self, scope: &Scope, query: &str) -> bool {
        self.by_scope
            .get(scope)
            .is_some_and(|queries| queries.contains(query))
    }

    /// Records the pair; false if it was already recorded.
    pub(crate) fn insert(&mut self, scope: Scope, query: &str) -> bool {
        self.by_scope
            .entry(scope)
            .or_default()
            .insert(query.to_string())
    }

    pub(crate) fn len(&self) -> usize {
        self.by_scope.values().map(HashSet::len).sum()
    }
}
