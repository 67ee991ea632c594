//! Error types for the component pipeline.
//!
//! Fetch errors never cross the client boundary: [`HttpUpstream`](super::client::HttpUpstream)
//! logs them and hands the caller an absent result instead. Address errors
//! are caller mistakes and are reported back to the client.

use thiserror::Error;

/// Result type for upstream fetches.
pub type FetchResult<T> = Result<T, FetchError>;

/// Errors that can occur while fetching from the upstream site.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be completed (DNS, connect, TLS, reset).
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The upstream answered with a non-success status.
    #[error("upstream responded with status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// The response body could not be read or decoded.
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    /// The registry entry carried no files.
    #[error("registry entry has no files")]
    EmptyFileList,
}

impl FetchError {
    /// Returns `true` if the fetch never completed, as opposed to the
    /// upstream rejecting it or returning an unusable payload.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns the HTTP status if the upstream rejected the request.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status } => Some(*status),
            _ => None,
        }
    }
}

/// Errors raised when a resource identifier is not part of the address space.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    /// The identifier does not have the `shadcn://component/{slug}/{section}` shape.
    #[error("invalid component resource URI: {uri}")]
    InvalidUri {
        /// The rejected identifier.
        uri: String,
    },

    /// The section is not one of documentation, examples, source, installation.
    #[error("unknown section '{section}'. Must be one of: documentation, examples, source, installation")]
    UnknownSection {
        /// The rejected section.
        section: String,
    },
}
