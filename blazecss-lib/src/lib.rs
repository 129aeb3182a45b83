//! BlazeCSS: resolves `inherit` / `extend` declarations inside a parsed
//! stylesheet by merging selector lists, copying root rules into the
//! conditional blocks that reference them.

pub mod blaze_generate;
pub mod config;
pub mod error;

pub mod inherit {
    pub mod cleanup;
    pub mod engine;
    pub mod extend;
    pub mod propagate;
    pub mod scope;
}

pub mod style {
    pub mod blaze_css;
    pub mod css_matcher;
    pub mod owned_css;
    pub mod printer;
}

pub use config::InheritOptions;
pub use error::InheritError;
pub use inherit::engine::Inherit;
pub use style::owned_css::{NodeId, NodeKind, OwnedStylesheet, SourceLocation};
