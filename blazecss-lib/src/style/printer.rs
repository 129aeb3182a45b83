use std::fmt::Write;

use crate::style::owned_css::{NodeId, NodeKind, OwnedStylesheet};

/// Serializes the stylesheet back to CSS text, two spaces per nesting level.
pub fn to_css_string(sheet: &OwnedStylesheet) -> String {
    let mut output = String::new();
    for &child in sheet.children(sheet.root()) {
        print_node(sheet, child, 0, &mut output);
    }
    output
}

fn print_node(sheet: &OwnedStylesheet, id: NodeId, indent: usize, output: &mut String) {
    let indentation = "  ".repeat(indent);
    let Some(kind) = sheet.kind(id) else {
        return;
    };
    match kind {
        NodeKind::Root => {
            for &child in sheet.children(id) {
                print_node(sheet, child, indent, output);
            }
        }
        NodeKind::AtRule { name, params } => {
            if params.is_empty() {
                let _ = writeln!(output, "{}@{} {{", indentation, name);
            } else {
                let _ = writeln!(output, "{}@{} {} {{", indentation, name, params);
            }
            for &child in sheet.children(id) {
                print_node(sheet, child, indent + 1, output);
            }
            let _ = writeln!(output, "{}}}", indentation);
        }
        NodeKind::Rule { selector, .. } => {
            // Merged selector lists span several lines; keep each one aligned.
            let selector = selector
                .lines()
                .map(str::trim)
                .collect::<Vec<_>>()
                .join(&format!("\n{}", indentation));
            let _ = writeln!(output, "{}{} {{", indentation, selector);
            for &child in sheet.children(id) {
                print_node(sheet, child, indent + 1, output);
            }
            let _ = writeln!(output, "{}}}", indentation);
        }
        NodeKind::Declaration {
            property,
            value,
            important,
        } => {
            let important = if *important { " !important" } else { "" };
            let _ = writeln!(output, "{}{}: {}{};", indentation, property, value, important);
        }
    }
}
