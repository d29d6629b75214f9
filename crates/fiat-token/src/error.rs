use thiserror::Error;

/// Errors surfaced by the custody pipeline.
///
/// Variants are ordered by where they are detected: the first three are
/// produced synchronously before any chain I/O, `NotOwner` after a single
/// ownership read, and `ChainError` by the provider/contract layer.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("missing credentials: {0}")]
    MissingCredentials(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("signer is not the contract owner")]
    NotOwner,

    #[error("chain error: {0}")]
    ChainError(String),
}
