use crate::config::InheritOptions;
use crate::error::InheritError;
use crate::inherit::engine::Inherit;
use crate::style::{blaze_css, printer};

pub mod blaze_inherit {
    use super::*;

    /// Parse `css_content`, resolve its inherit declarations and print it back.
    pub fn generate(css_content: &str, options: &InheritOptions) -> Result<String, InheritError> {
        let mut sheet = blaze_css::parse_and_own_css(css_content)?;
        Inherit::new(options.clone()).process(&mut sheet)?;
        Ok(printer::to_css_string(&sheet))
    }
}
