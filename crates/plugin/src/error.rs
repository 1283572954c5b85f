//! Errors raised by the plugin binary.

use std::path::PathBuf;

/// Errors raised while talking to protoc or reading descriptor sets.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// Reading the request or writing the response failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A file could not be read or written.
    #[error("failed to {action} {}: {source}", path.display())]
    File {
        /// What was being attempted, e.g. `read`.
        action: &'static str,
        /// Path involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Protobuf input could not be decoded.
    #[error("failed to decode {what}: {source}")]
    Decode {
        /// Message that was being decoded.
        what: &'static str,
        /// Underlying decode error.
        #[source]
        source: prost::DecodeError,
    },

    /// A file listed for generation has no descriptor in the request.
    #[error("file to generate `{0}` is missing from the request")]
    MissingFile(String),

    /// Configuration or rendering failed in the generator.
    #[error(transparent)]
    Generate(#[from] xstate_gen_core::Error),

    /// An artifact name would be written outside the output directory.
    #[error("refusing to write `{0}`: not a relative path inside the output directory")]
    UnsafePath(String),

    /// The request was processed but generation reported an error.
    #[error("generation failed: {0}")]
    Rejected(String),
}
