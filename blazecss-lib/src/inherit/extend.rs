use log::{debug, warn};

use crate::error::InheritError;
use crate::inherit::engine::InheritRun;
use crate::inherit::scope::effective_scope;
use crate::style::css_matcher::{
    assemble_selectors, dedup_selectors, parse_selectors, SelectorPattern,
};
use crate::style::owned_css::{NodeId, OwnedStylesheet};

/// Merges every directive in the document into its same-scope targets and
/// removes it. Returns how many directives were consumed.
pub(crate) fn extend_all(run: &mut InheritRun<'_>) -> Result<usize, InheritError> {
    let root = run.sheet.root();
    let mut consumed = 0;
    let mut cursor = run.sheet.next_in_order(root, root);
    while let Some(id) = cursor {
        if !run.is_directive(id) {
            cursor = run.sheet.next_in_order(root, id);
            continue;
        }
        let Some(origin_rule) = run.sheet.parent(id).filter(|&p| run.sheet.is_rule(p)) else {
            warn!("ignoring inherit declaration outside of a rule");
            cursor = run.sheet.next_in_order(root, id);
            continue;
        };

        let value = run
            .sheet
            .declaration(id)
            .map(|(_, value)| value.to_string())
            .unwrap_or_default();
        for query in parse_selectors(&value) {
            inherit_rule(run.sheet, &query, origin_rule, id)?;
        }

        // Read before removing: the declaration and its emptied ancestors go away.
        cursor = run.sheet.next_after_subtree(root, id);
        run.sheet.remove_with_empty_ancestors(id);
        consumed += 1;
    }
    Ok(consumed)
}

/// Appends the origin rule's selectors to every rule matching `query` in the
/// origin's scope.
fn inherit_rule(
    sheet: &mut OwnedStylesheet,
    query: &str,
    origin_rule: NodeId,
    decl: NodeId,
) -> Result<(), InheritError> {
    let pattern = SelectorPattern::new(query)?;
    let origin_scope = effective_scope(sheet, origin_rule);
    let origin_selector = sheet.selector(origin_rule).unwrap_or_default().to_string();

    let targets: Vec<NodeId> = sheet
        .rules()
        .filter(|&rule| {
            sheet
                .selector(rule)
                .is_some_and(|selector| pattern.matches_list(selector))
        })
        .collect();

    let mut matched = false;
    let mut different_scope_matched = false;
    for target in targets {
        if effective_scope(sheet, target) == origin_scope {
            debug!("extend {:?} with {:?}", origin_selector, query);
            append_selector(sheet, &origin_selector, target, &pattern);
            matched = true;
        } else {
            different_scope_matched = true;
        }
    }

    if matched {
        return Ok(());
    }
    let location = sheet.source(decl);
    if different_scope_matched {
        Err(InheritError::ScopeMismatch {
            query: query.to_string(),
            location,
        })
    } else {
        Err(InheritError::SelectorNotFound {
            query: query.to_string(),
            location,
        })
    }
}

/// For every selector of the target and every selector of the origin, adds
/// the target selector with the matched token swapped for the origin one.
pub(crate) fn append_selector(
    sheet: &mut OwnedStylesheet,
    origin_selector: &str,
    target_rule: NodeId,
    pattern: &SelectorPattern,
) {
    let Some(target_selector) = sheet.selector(target_rule) else {
        return;
    };
    let origin_selectors = parse_selectors(origin_selector);
    let target_selectors = parse_selectors(target_selector);

    let mut merged = target_selectors.clone();
    for target in &target_selectors {
        merged.extend(
            origin_selectors
                .iter()
                .map(|origin| pattern.replace(target, origin)),
        );
    }
    dedup_selectors(&mut merged);
    sheet.set_selector(target_rule, assemble_selectors(&merged));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InheritOptions;
    use crate::inherit::engine::Propagated;
    use crate::inherit::scope::Scope;
    use crate::style::owned_css::SourceLocation;
    use pretty_assertions::assert_eq;

    fn extend(sheet: &mut OwnedStylesheet) -> Result<usize, InheritError> {
        let options = InheritOptions::default();
        let mut run = InheritRun {
            sheet,
            options: &options,
            propagated: Propagated::default(),
        };
        extend_all(&mut run)
    }

    #[test]
    fn test_basic_extend() {
        let mut sheet = OwnedStylesheet::new();
        let root = sheet.root();
        let foo = sheet.append_rule(root, ".foo");
        sheet.append_declaration(foo, "color", "red");
        let bar = sheet.append_rule(root, ".bar");
        sheet.append_declaration(bar, "inherit", ".foo");

        assert_eq!(extend(&mut sheet).unwrap(), 1);
        assert_eq!(sheet.selector(foo), Some(".foo,\n.bar"));
        assert!(!sheet.contains(bar));
        assert_eq!(sheet.children(root), &[foo]);
    }

    #[test]
    fn test_extend_keeps_compound_parts() {
        let mut sheet = OwnedStylesheet::new();
        let root = sheet.root();
        let hover = sheet.append_rule(root, ".btn:hover,\nul > .btn");
        sheet.append_declaration(hover, "color", "blue");
        let primary = sheet.append_rule(root, ".primary, .cta");
        sheet.append_declaration(primary, "extends", ".btn");
        sheet.append_declaration(primary, "margin", "0");

        extend(&mut sheet).unwrap();
        assert_eq!(
            sheet.selector(hover),
            Some(".btn:hover,\nul > .btn,\n.primary:hover,\n.cta:hover,\nul > .primary,\nul > .cta")
        );
        assert!(sheet.contains(primary));
        assert_eq!(sheet.children(primary).len(), 1);
    }

    #[test]
    fn test_repeated_merge_has_no_duplicates() {
        let mut sheet = OwnedStylesheet::new();
        let root = sheet.root();
        let foo = sheet.append_rule(root, ".foo");
        sheet.append_declaration(foo, "color", "red");
        let bar = sheet.append_rule(root, ".bar");
        sheet.append_declaration(bar, "inherit", ".foo, .foo");
        sheet.append_declaration(bar, "extend", ".foo");

        extend(&mut sheet).unwrap();
        assert_eq!(sheet.selector(foo), Some(".foo,\n.bar"));
    }

    #[test]
    fn test_not_found() {
        let mut sheet = OwnedStylesheet::new();
        let root = sheet.root();
        let bar = sheet.append_rule(root, ".bar");
        let decl = sheet.append_declaration(bar, "inherit", ".missing");
        sheet.set_source(decl, SourceLocation { line: 1, column: 8 });

        let err = extend(&mut sheet).unwrap_err();
        match err {
            InheritError::SelectorNotFound { query, location } => {
                assert_eq!(query, ".missing");
                assert_eq!(location, Some(SourceLocation { line: 1, column: 8 }));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(sheet.contains(decl));
    }

    #[test]
    fn test_scope_mismatch() {
        let mut sheet = OwnedStylesheet::new();
        let root = sheet.root();
        let print = sheet.append_at_rule(root, "media", "print");
        let foo = sheet.append_rule(print, ".foo");
        sheet.append_declaration(foo, "color", "red");
        let bar = sheet.append_rule(root, ".bar");
        sheet.append_declaration(bar, "inherit", ".foo");

        let err = extend(&mut sheet).unwrap_err();
        assert!(matches!(err, InheritError::ScopeMismatch { ref query, .. } if query == ".foo"));
        assert_eq!(sheet.selector(foo), Some(".foo"));
    }

    #[test]
    fn test_same_scope_inside_block() {
        let mut sheet = OwnedStylesheet::new();
        let root = sheet.root();
        let outside = sheet.append_rule(root, ".foo");
        sheet.append_declaration(outside, "color", "red");
        let media = sheet.append_at_rule(root, "media", "print");
        let inside = sheet.append_rule(media, ".foo");
        sheet.append_declaration(inside, "color", "black");
        let bar = sheet.append_rule(media, ".bar");
        sheet.append_declaration(bar, "inherit", ".foo");

        extend(&mut sheet).unwrap();
        assert_eq!(sheet.selector(outside), Some(".foo"));
        assert_eq!(sheet.selector(inside), Some(".foo,\n.bar"));
        assert_eq!(sheet.children(media), &[inside]);
    }

    #[test]
    fn test_scope_hint_is_honoured() {
        let mut sheet = OwnedStylesheet::new();
        let root = sheet.root();
        let media = sheet.append_at_rule(root, "media", "screen");
        let copy = sheet.append_rule(media, "%.foo");
        sheet.append_declaration(copy, "color", "red");
        sheet.set_scope_hint(copy, Scope::Conditional("screen".to_string()));
        let bar = sheet.append_rule(media, ".bar");
        sheet.append_declaration(bar, "inherit", "%.foo");

        extend(&mut sheet).unwrap();
        assert_eq!(sheet.selector(copy), Some("%.foo,\n.bar"));
    }

    #[test]
    fn test_emptied_block_is_pruned() {
        let mut sheet = OwnedStylesheet::new();
        let root = sheet.root();
        let first = sheet.append_at_rule(root, "media", "print");
        let foo = sheet.append_rule(first, ".foo");
        sheet.append_declaration(foo, "color", "red");
        let second = sheet.append_at_rule(root, "media", "print");
        let bar = sheet.append_rule(second, ".bar");
        sheet.append_declaration(bar, "inherit", ".foo");
        let after = sheet.append_rule(root, ".after");
        sheet.append_declaration(after, "margin", "0");

        extend(&mut sheet).unwrap();
        assert_eq!(sheet.selector(foo), Some(".foo,\n.bar"));
        assert!(!sheet.contains(bar));
        assert!(!sheet.contains(second));
        assert_eq!(sheet.children(root), &[first, after]);
    }
}
