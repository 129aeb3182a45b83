use log::debug;

use crate::style::css_matcher::{assemble_selectors, parse_selectors, PLACEHOLDER_MARKER};
use crate::style::owned_css::OwnedStylesheet;

/// Drops placeholder selectors from every rule, removing rules left with none.
/// Returns the number of rules removed.
pub fn remove_placeholders(sheet: &mut OwnedStylesheet) -> usize {
    let root = sheet.root();
    let mut removed = 0;
    let mut cursor = sheet.next_in_order(root, root);
    while let Some(id) = cursor {
        let Some(selector) = sheet
            .selector(id)
            .filter(|selector| selector.contains(PLACEHOLDER_MARKER))
        else {
            cursor = sheet.next_in_order(root, id);
            continue;
        };

        let kept: Vec<String> = parse_selectors(selector)
            .into_iter()
            .filter(|s| !s.contains(PLACEHOLDER_MARKER))
            .collect();
        if kept.is_empty() {
            debug!("removing placeholder rule {:?}", selector);
            cursor = sheet.next_after_subtree(root, id);
            sheet.remove(id);
            removed += 1;
        } else {
            sheet.set_selector(id, assemble_selectors(&kept));
            cursor = sheet.next_in_order(root, id);
        }
    }
    removed
}
