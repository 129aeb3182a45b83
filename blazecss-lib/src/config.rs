use regex::{Regex, RegexBuilder};

use crate::error::InheritError;

/// Matches `inherit`, `inherits`, `extend` and `extends` in any case.
pub const DEFAULT_PROPERTY_PATTERN: &str = r"^(inherit|extend)s?$";

/// Options accepted by the engine.
#[derive(Debug, Clone)]
pub struct InheritOptions {
    /// Declarations whose property name matches this are treated as directives.
    pub property_pattern: Regex,
}

impl InheritOptions {
    /// Build options from a user supplied property-name expression.
    pub fn with_property_pattern(pattern: &str) -> Result<Self, InheritError> {
        Ok(InheritOptions {
            property_pattern: Regex::new(pattern)?,
        })
    }

    pub fn is_directive(&self, property: &str) -> bool {
        self.property_pattern.is_match(property)
    }
}

impl Default for InheritOptions {
    fn default() -> Self {
        let property_pattern = RegexBuilder::new(DEFAULT_PROPERTY_PATTERN)
            .case_insensitive(true)
            .build()
            .expect("default property pattern is a valid regex");
        InheritOptions { property_pattern }
    }
}
