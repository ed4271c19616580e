//! Error types for the iframe block.

use miette::Diagnostic;

use crate::platform::PlatformError;

/// Errors surfaced to the host.
///
/// Validation never produces one of these; invalid markup is a
/// [`ValidationState`](crate::ValidationState), not an error.
#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum BlockError {
    /// Host data could not be decoded into a block record
    #[error("invalid block data: {0}")]
    #[diagnostic(
        code(iframe_block::data),
        help("block data must look like {{\"html\": \"<iframe ...></iframe>\"}}")
    )]
    Data(#[from] serde_json::Error),

    /// The platform layer failed to build or update the view
    #[error(transparent)]
    #[diagnostic(code(iframe_block::platform))]
    Platform(#[from] PlatformError),
}
