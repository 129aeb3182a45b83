use regex::{Captures, Regex};

use crate::error::InheritError;

/// Prefix marking a selector as a scoped copy that must not reach the output.
pub const PLACEHOLDER_MARKER: char = '%';

/// True if the selector starts with the placeholder marker.
pub fn is_placeholder(selector: &str) -> bool {
    selector.starts_with(PLACEHOLDER_MARKER)
}

/// The part of a query up to its first pseudo-class or attribute selector.
/// `.foo:hover` -> `.foo`, `a[href]` -> `a`.
pub fn base_token(query: &str) -> &str {
    match query.find([':', '[']) {
        Some(end) => &query[..end],
        None => query,
    }
}

/// Splits a selector list on commas, trimming every entry.
pub fn parse_selectors(selector_list: &str) -> Vec<String> {
    selector_list
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Joins selectors the way merged rules are printed, one per line.
pub fn assemble_selectors(selectors: &[String]) -> String {
    selectors.join(",\n")
}

/// Order preserving dedup.
pub fn dedup_selectors(selectors: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    selectors.retain(|s| seen.insert(s.clone()));
}

/// Finds a base token inside single selectors, bounded by combinators.
///
/// On the left the token needs start of string, whitespace or one of
/// `>`, `+`, `~`. On the right it needs end of string, whitespace, a
/// combinator, `:` or `[`. Placeholder tokens have no left boundary.
#[derive(Debug, Clone)]
pub struct SelectorPattern {
    token: String,
    regex: Regex,
}

impl SelectorPattern {
    pub fn new(query: &str) -> Result<Self, InheritError> {
        let token = base_token(query.trim()).to_string();
        let prefix = if is_placeholder(&token) {
            "()"
        } else {
            r"(^|\s|>|\+|~)"
        };
        let expression = format!(r"{}{}($|\s|>|\+|~|:|\[)", prefix, regex::escape(&token));
        Ok(SelectorPattern {
            token,
            regex: Regex::new(&expression)?,
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Does a single selector contain the token?
    pub fn is_match(&self, selector: &str) -> bool {
        self.regex.is_match(selector)
    }

    /// Does any selector of a comma separated list contain the token?
    pub fn matches_list(&self, selector_list: &str) -> bool {
        selector_list.split(',').any(|s| self.is_match(s.trim()))
    }

    /// Swap every bounded occurrence of the token for `replacement`, keeping
    /// the surrounding combinators.
    pub fn replace(&self, selector: &str, replacement: &str) -> String {
        self.regex
            .replace_all(selector, |caps: &Captures| {
                format!("{}{}{}", &caps[1], replacement, &caps[2])
            })
            .into_owned()
    }

    /// Marks every bounded occurrence of the token with the placeholder prefix.
    /// The marker goes right before the token and the captured boundaries are
    /// kept as they were, so `.foo:hover` becomes `%.foo:hover` and a `%query`
    /// directive can still find the copy.
    pub fn make_placeholder(&self, selector: &str) -> String {
        let token = &self.token;
        self.regex
            .replace_all(selector, |caps: &Captures| {
                format!("{}{}{}{}", &caps[1], PLACEHOLDER_MARKER, token, &caps[2])
            })
            .into_owned()
    }

    /// [`make_placeholder`](Self::make_placeholder) applied to each entry of a list.
    pub fn make_placeholder_list(&self, selector_list: &str) -> String {
        let masked: Vec<String> = parse_selectors(selector_list)
            .iter()
            .map(|s| self.make_placeholder(s))
            .collect();
        assemble_selectors(&masked)
    }
}
