//! Error taxonomy for upstream calls and tool dispatch.
//!
//! Every failure a tool can hit maps to exactly one classification:
//! - a declared business error the CRM reported (`{Message}` body)
//! - a response that matched neither the error nor the success contract
//! - a transport or JSON decoding failure
//!
//! The displayed text of each variant is exactly what the calling model
//! sees, so the messages stay short and stable.

use thiserror::Error;

/// Failure of a single upstream API operation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The CRM answered with its declared `{Message: string}` failure shape.
    /// The message is surfaced verbatim. Note the CRM can return this body
    /// with HTTP 200, so classification never consults the status code.
    #[error("{0}")]
    Upstream(String),

    /// The body parsed as JSON but matched neither the success contract nor
    /// the declared error shape. The raw body is logged at debug level; the
    /// caller only ever sees this generic text.
    #[error("Invalid response format from API")]
    InvalidResponse,

    /// Network failure or a body that was not JSON at all.
    #[error("Unknown error")]
    Unknown,
}

/// Failure of tool dispatch itself, before any validation or network work.
#[derive(Debug, Error)]
pub enum RouterError {
    /// The caller asked for a tool that is not in the dispatch table. This is
    /// a protocol-level caller bug, terminal for the single call.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}
