use crate::error::InheritError;
use crate::style::owned_css::{NodeId, OwnedStylesheet, SourceLocation};
use lightningcss::declaration::DeclarationBlock;
use lightningcss::error::PrinterError;
use lightningcss::printer::PrinterOptions;
use lightningcss::rules::{style::StyleRule, CssRule, CssRuleList};
use lightningcss::stylesheet::{ParserOptions, StyleSheet as LightningStyleSheet};
use lightningcss::traits::ToCss;
use log::warn;

/// Parse a raw CSS string (LightningCSS) and convert it to a fully-owned stylesheet.
pub fn parse_and_own_css(css_text: &str) -> Result<OwnedStylesheet, InheritError> {
    let parser_opts = ParserOptions::default();

    let sheet = LightningStyleSheet::parse(css_text, parser_opts).map_err(|e| {
        InheritError::Parse {
            message: e.to_string(),
        }
    })?;

    let mut owned = OwnedStylesheet::new();
    let root = owned.root();
    convert_rules(&sheet.rules, root, &mut owned)?;
    Ok(owned)
}

fn convert_rules(
    rules: &CssRuleList<'_>,
    parent: NodeId,
    owned: &mut OwnedStylesheet,
) -> Result<(), InheritError> {
    for rule in &rules.0 {
        match rule {
            CssRule::Style(style_rule) => {
                convert_style_rule(style_rule, parent, owned)?;
            }
            CssRule::Media(media_rule) => {
                let params = media_rule
                    .query
                    .to_css_string(PrinterOptions::default())
                    .map_err(printer_error)?;
                let at_rule = owned.append_at_rule(parent, "media", &params);
                owned.set_source(
                    at_rule,
                    source_location(media_rule.loc.line, media_rule.loc.column),
                );
                convert_rules(&media_rule.rules, at_rule, owned)?;
            }
            CssRule::Supports(supports_rule) => {
                let params = supports_rule
                    .condition
                    .to_css_string(PrinterOptions::default())
                    .map_err(printer_error)?;
                let at_rule = owned.append_at_rule(parent, "supports", &params);
                owned.set_source(
                    at_rule,
                    source_location(supports_rule.loc.line, supports_rule.loc.column),
                );
                convert_rules(&supports_rule.rules, at_rule, owned)?;
            }
            // @font-face, @keyframes, @import etc. hold no extendable rules.
            _ => warn!("skipping unsupported at-rule"),
        }
    }
    Ok(())
}

/// Copy a single StyleRule's selectors + declarations into the owned tree.
fn convert_style_rule(
    style_rule: &StyleRule<'_>,
    parent: NodeId,
    owned: &mut OwnedStylesheet,
) -> Result<(), InheritError> {
    let mut selectors_vec = Vec::new();
    for selector in &style_rule.selectors.0 {
        if let Ok(sel_str) = selector.to_css_string(PrinterOptions::default()) {
            selectors_vec.push(sel_str);
        }
    }

    let rule = owned.append_rule(parent, &selectors_vec.join(",\n"));
    let location = source_location(style_rule.loc.line, style_rule.loc.column);
    owned.set_source(rule, location);

    // The parser keeps no per-declaration positions; declarations report
    // the position of their rule.
    convert_declarations(&style_rule.declarations, rule, location, owned)?;
    convert_rules(&style_rule.rules, rule, owned)
}

fn convert_declarations(
    block: &DeclarationBlock<'_>,
    rule: NodeId,
    location: SourceLocation,
    owned: &mut OwnedStylesheet,
) -> Result<(), InheritError> {
    // Normal declarations
    for property in &block.declarations {
        let property_name = property.property_id().name().to_string();
        let property_value = property
            .value_to_css_string(PrinterOptions::default())
            .map_err(printer_error)?;
        let decl = owned.append_declaration(rule, &property_name, property_value.trim());
        owned.set_source(decl, location);
    }

    // !important declarations
    for property in &block.important_declarations {
        let property_name = property.property_id().name().to_string();
        let property_value = property
            .value_to_css_string(PrinterOptions::default())
            .map_err(printer_error)?;
        let decl = owned.append_important_declaration(rule, &property_name, property_value.trim());
        owned.set_source(decl, location);
    }
    Ok(())
}

/// LightningCSS lines are 0-based, columns 1-based.
fn source_location(line: u32, column: u32) -> SourceLocation {
    SourceLocation {
        line: line + 1,
        column,
    }
}

fn printer_error(e: PrinterError) -> InheritError {
    InheritError::Parse {
        message: e.to_string(),
    }
}
