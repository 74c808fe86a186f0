//! Structured error types for sheetpress.
//!
//! Only unrecoverable conditions surface here. Degraded-fidelity conditions
//! (unknown paper size, missing picture bytes, unresolvable colors) are
//! recovered locally with a documented default and a `log` warning.

/// All errors that can occur while resolving layout or rendering.
#[derive(Debug, thiserror::Error)]
pub enum SheetpressError {
    /// A sheet was requested by a name the workbook does not contain.
    #[error("sheet not found: {0}")]
    SheetNotFound(String),

    /// A sheet was requested by an out-of-range position (1-based).
    #[error("sheet position out of range: {0}")]
    SheetPosition(usize),

    /// Required document structure is missing or inconsistent.
    #[error("malformed document: {0}")]
    Malformed(String),

    /// A sink rejected a draw or page operation.
    #[error("render backend: {0}")]
    Backend(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SheetpressError>;
