use thiserror::Error;

/// Errors that can occur in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// The gateway has already been started.
    #[error("The gateway has already been started")]
    AlreadyStarted,

    /// Failed to bind the listen address.
    #[error("Failed to bind the listen address: {0}")]
    Bind(#[from] std::io::Error),
}
