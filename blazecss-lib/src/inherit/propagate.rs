use log::{debug, warn};

use crate::error::InheritError;
use crate::inherit::engine::InheritRun;
use crate::inherit::scope::{scope_of, Scope};
use crate::style::css_matcher::{parse_selectors, SelectorPattern, PLACEHOLDER_MARKER};
use crate::style::owned_css::NodeId;

/// Copies root rules targeted by directives inside `at_rule` into that block.
///
/// Each copy lands right before the rule holding the directive and has the
/// target masked with the placeholder marker. Directive values that found a
/// root rule are rewritten to point at the masked copy.
pub(crate) fn propagate_into_scope(
    run: &mut InheritRun<'_>,
    at_rule: NodeId,
) -> Result<(), InheritError> {
    let mut cursor = run.sheet.next_in_order(at_rule, at_rule);
    while let Some(id) = cursor {
        if run.is_directive(id) {
            propagate_declaration(run, id)?;
        }
        cursor = run.sheet.next_in_order(at_rule, id);
    }
    Ok(())
}

fn propagate_declaration(run: &mut InheritRun<'_>, decl: NodeId) -> Result<(), InheritError> {
    let Some(origin_rule) = run.sheet.parent(decl).filter(|&p| run.sheet.is_rule(p)) else {
        warn!("ignoring inherit declaration outside of a rule");
        return Ok(());
    };
    let origin_scope = scope_of(run.sheet, origin_rule);
    let value = match run.sheet.declaration(decl) {
        Some((_, value)) => value.to_string(),
        None => return Ok(()),
    };

    let mut new_values = Vec::new();
    for query in parse_selectors(&value) {
        let pattern = SelectorPattern::new(&query)?;
        let targets: Vec<NodeId> = run
            .sheet
            .rules()
            .filter(|&rule| {
                run.sheet
                    .selector(rule)
                    .is_some_and(|selector| pattern.matches_list(selector))
            })
            .collect();

        let mut new_value = query.clone();
        for target in targets {
            if scope_of(run.sheet, target) != Scope::Root {
                continue;
            }
            new_value = format!("{}{}", PLACEHOLDER_MARKER, query);
            if run.propagated.contains(&origin_scope, &query) {
                continue;
            }
            copy_rule(run, target, origin_rule, &pattern, &origin_scope);
            run.propagated.insert(origin_scope.clone(), &query);
        }
        new_values.push(new_value);
    }

    run.sheet.set_declaration_value(decl, new_values.join(", "));
    Ok(())
}

fn copy_rule(
    run: &mut InheritRun<'_>,
    target: NodeId,
    origin_rule: NodeId,
    pattern: &SelectorPattern,
    origin_scope: &Scope,
) {
    let Some(copy) = run.sheet.clone_subtree(target) else {
        return;
    };
    if !run.sheet.insert_before(origin_rule, copy) {
        run.sheet.remove(copy);
        return;
    }
    if let Some(selector) = run.sheet.selector(copy) {
        let masked = pattern.make_placeholder_list(selector);
        debug!("copy {:?} into {} as {:?}", selector, origin_scope, masked);
        run.sheet.set_selector(copy, masked);
    }
    run.sheet.set_scope_hint(copy, origin_scope.clone());
}
