use std::path::PathBuf;

use strata_core::ApiVersion;
use thiserror::Error;

/// Errors that can occur while loading or driving a module.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("module binary not found at {}", .0.display())]
    MissingBinary(PathBuf),
    #[error("failed to load module library: {0}")]
    LibraryLoad(#[from] libloading::Error),
    #[error("module at {} does not export `{symbol}`", .path.display())]
    MissingSymbol { path: PathBuf, symbol: &'static str },
    #[error("incompatible module API version {found} (host expects major {})", .expected.major)]
    ApiMismatch { expected: ApiVersion, found: ApiVersion },
    #[error("module factory returned a null {0}")]
    NullFactoryResult(&'static str),
    #[error("invalid lifecycle transition: {0}")]
    InvalidState(&'static str),
    #[error("module rejected the state record")]
    StateRestore,
    #[error("image buffer too small: need {needed} bytes, got {actual}")]
    ImageBufferTooSmall { needed: usize, actual: usize },
}
