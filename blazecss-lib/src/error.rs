use crate::style::owned_css::SourceLocation;

/// Everything that can abort a run.
///
/// The two selector variants are authoring errors in the stylesheet and carry
/// the position of the declaration that asked for the inheritance.
#[derive(thiserror::Error, Debug)]
pub enum InheritError {
    #[error("{}Could not find rule that matched {query}.", at(.location))]
    SelectorNotFound {
        query: String,
        location: Option<SourceLocation>,
    },

    #[error("{}Could not find rule that matched {query} in the same at-rule.", at(.location))]
    ScopeMismatch {
        query: String,
        location: Option<SourceLocation>,
    },

    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("CSS parse error: {message}")]
    Parse { message: String },
}

impl InheritError {
    /// Source position the error is attributed to, if any.
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            Self::SelectorNotFound { location, .. } | Self::ScopeMismatch { location, .. } => {
                *location
            }
            Self::InvalidPattern(_) | Self::Parse { .. } => None,
        }
    }
}

fn at(location: &Option<SourceLocation>) -> String {
    match location {
        Some(loc) => format!("{}: ", loc),
        None => String::new(),
    }
}
