//! Error types for the XState generator.

/// Errors raised while configuring the generator or rendering a file.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The built-in template failed to parse. Raised once, at start-up.
    #[error("xstate template is malformed: {0}")]
    Template(#[source] tera::Error),

    /// The template failed while rendering a file.
    #[error("failed to render {file}: {source}")]
    Render {
        /// Name of the `.proto` file being rendered.
        file: String,
        /// Underlying template engine error.
        #[source]
        source: tera::Error,
    },

    /// A plugin parameter had an unusable value.
    #[error("invalid parameter `{key}={value}`: {reason}")]
    InvalidParameter {
        /// Parameter key.
        key: String,
        /// Offending value.
        value: String,
        /// What was expected instead.
        reason: &'static str,
    },
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
