//! TUI error types.

use thiserror::Error;

/// Unified error type for the terminal UI.
#[derive(Error, Debug)]
pub enum TuiError {
    /// An I/O operation failed (terminal setup, drawing).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A storage operation failed outside a screen's own error state.
    #[error("store error: {0}")]
    Store(#[from] limone_store::StoreError),

    /// A session operation failed outside a screen's own error state.
    #[error("session error: {0}")]
    Session(#[from] limone_session::SessionError),
}

/// Convenience alias used throughout the TUI crate.
pub type Result<T> = std::result::Result<T, TuiError>;
