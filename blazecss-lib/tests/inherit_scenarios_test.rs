use blazecss_lib::blaze_generate::blaze_inherit;
use blazecss_lib::style::printer::to_css_string;
use blazecss_lib::{Inherit, InheritError, InheritOptions, OwnedStylesheet};
use pretty_assertions::assert_eq;

fn resolve(css: &str) -> Result<String, InheritError> {
    blaze_inherit::generate(css, &InheritOptions::default())
}

#[test]
fn test_basic_extend() {
    let mut sheet = OwnedStylesheet::new();
    let root = sheet.root();
    let foo = sheet.append_rule(root, ".foo");
    sheet.append_declaration(foo, "color", "red");
    let bar = sheet.append_rule(root, ".bar");
    sheet.append_declaration(bar, "inherit", ".foo");

    Inherit::default().process(&mut sheet).unwrap();

    assert!(!sheet.contains(bar));
    assert_eq!(to_css_string(&sheet), ".foo,\n.bar {\n  color: red;\n}\n");
}

#[test]
fn test_not_found() {
    let mut sheet = OwnedStylesheet::new();
    let root = sheet.root();
    let bar = sheet.append_rule(root, ".bar");
    sheet.append_declaration(bar, "inherit", ".missing");

    let err = Inherit::default().process(&mut sheet).unwrap_err();
    assert!(matches!(err, InheritError::SelectorNotFound { ref query, .. } if query == ".missing"));
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

    let err = Inherit::default().process(&mut sheet).unwrap_err();
    assert!(matches!(err, InheritError::ScopeMismatch { .. }));
    assert_eq!(
        err.to_string(),
        "Could not find rule that matched .foo in the same at-rule."
    );
}

#[test]
fn test_cross_scope_propagation() {
    let mut sheet = OwnedStylesheet::new();
    let root = sheet.root();
    let foo = sheet.append_rule(root, ".foo");
    sheet.append_declaration(foo, "color", "red");
    let screen = sheet.append_at_rule(root, "media", "screen");
    let bar = sheet.append_rule(screen, ".bar");
    sheet.append_declaration(bar, "inherit", ".foo");

    Inherit::default().process(&mut sheet).unwrap();

    let expected = r#".foo {
  color: red;
}
@media screen {
  .bar {
    color: red;
  }
}
"#;
    assert_eq!(to_css_string(&sheet), expected);
    assert_eq!(sheet.selector(foo), Some(".foo"));
    assert!(!sheet.contains(bar));
}

#[test]
fn test_propagation_copies_once_per_scope() {
    let css = r#"
.foo { display: block; }
@media screen {
  .a { extend: .foo; }
  .b { extend: .foo; }
}
@media print {
  .c { extend: .foo; }
}
"#;
    let expected = r#".foo {
  display: block;
}
@media screen {
  .a,
  .b {
    display: block;
  }
}
@media print {
  .c {
    display: block;
  }
}
"#;
    assert_eq!(resolve(css).unwrap(), expected);
}

#[test]
fn test_scoped_and_root_extends_together() {
    let css = r#"
.btn { padding: 1px; }
.btn:hover { display: block; }
.primary { extend: .btn; }
@media print {
  .ink { margin: 0; }
  .note { inherits: .ink; }
}
"#;
    let expected = r#".btn,
.primary {
  padding: 1px;
}
.btn:hover,
.primary:hover {
  display: block;
}
@media print {
  .ink,
  .note {
    margin: 0;
  }
}
"#;
    assert_eq!(resolve(css).unwrap(), expected);
}

#[test]
fn test_mixed_targets_inside_block() {
    // `.foo` is reached through a scoped copy, `.local` directly.
    let css = r#"
.foo { display: block; }
@media screen {
  .local { margin: 0; }
  .bar { extend: .foo, .local; }
}
"#;
    let expected = r#".foo {
  display: block;
}
@media screen {
  .local,
  .bar {
    margin: 0;
  }
  .bar {
    display: block;
  }
}
"#;
    let output = resolve(css).unwrap();
    assert_eq!(output, expected);
    assert!(!output.contains('%'));
}

#[test]
fn test_error_carries_location() {
    let css = ".a { display: block; }\n\n.b { extend: .nope; }\n";
    let err = resolve(css).unwrap_err();
    assert_eq!(err.location().map(|loc| loc.line), Some(3));
    assert!(err.to_string().starts_with("3:"));
}
