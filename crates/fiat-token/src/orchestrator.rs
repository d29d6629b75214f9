//! Transaction orchestration: turn a validated intent into a confirmed
//! transaction hash.
//!
//! One confirmation is sufficient. No automatic retry and no idempotency key:
//! a failed submission is surfaced immediately and the end user re-issues the
//! request. Once broadcast, a transaction cannot be withdrawn; a confirmation
//! wait that times out may still land on-chain with no record kept here.

use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::Provider;

use crate::chain::TokenClient;
use crate::constants::CONFIRMATION_TIMEOUT;
use crate::TokenError;

/// A requested state-changing contract call, not yet submitted.
///
/// Amounts are in token base units and are guaranteed non-zero by the
/// constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionIntent {
    Mint { amount: U256, to: Address },
    Burn { amount: U256 },
    Collect,
}

impl TransactionIntent {
    pub fn mint(amount: U256, to: Address) -> Result<Self, TokenError> {
        if amount.is_zero() {
            return Err(TokenError::InvalidInput(
                "mint amount must be positive".to_string(),
            ));
        }
        Ok(Self::Mint { amount, to })
    }

    pub fn burn(amount: U256) -> Result<Self, TokenError> {
        if amount.is_zero() {
            return Err(TokenError::InvalidInput(
                "burn amount must be positive".to_string(),
            ));
        }
        Ok(Self::Burn { amount })
    }

    pub fn collect() -> Self {
        Self::Collect
    }

    /// Operation label for logs and metrics.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Mint { .. } => "mint",
            Self::Burn { .. } => "burn",
            Self::Collect => "collect",
        }
    }
}

/// Submit `intent` and block until the network confirms it, returning the
/// transaction hash.
///
/// The confirmation wait is time-bounded: past the deadline the request
/// fails with `ChainError` even though the transaction may still confirm
/// later. A reverted call is also a `ChainError`.
pub async fn execute<P: Provider>(
    client: &TokenClient<P>,
    intent: &TransactionIntent,
) -> Result<TxHash, TokenError> {
    let op = intent.operation();
    let pending = client.submit(intent).await?;

    let receipt = tokio::time::timeout(CONFIRMATION_TIMEOUT, pending.get_receipt())
        .await
        .map_err(|_| {
            TokenError::ChainError(format!(
                "{op} confirmation timed out after {}s",
                CONFIRMATION_TIMEOUT.as_secs()
            ))
        })?
        .map_err(|e| TokenError::ChainError(format!("{op} confirmation failed: {e}")))?;

    if !receipt.status() {
        return Err(TokenError::ChainError(format!("{op} reverted")));
    }

    tracing::info!(op, tx = %receipt.transaction_hash, "transaction confirmed");
    Ok(receipt.transaction_hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mint_rejects_zero_amount() {
        let err = TransactionIntent::mint(U256::ZERO, Address::repeat_byte(0x01)).unwrap_err();
        assert!(matches!(err, TokenError::InvalidInput(_)));
    }

    #[test]
    fn burn_rejects_zero_amount() {
        assert!(TransactionIntent::burn(U256::ZERO).is_err());
    }

    #[test]
    fn operation_labels() {
        let mint = TransactionIntent::mint(U256::from(1u64), Address::repeat_byte(0x01)).unwrap();
        assert_eq!(mint.operation(), "mint");
        assert_eq!(
            TransactionIntent::burn(U256::from(5u64)).unwrap().operation(),
            "burn"
        );
        assert_eq!(TransactionIntent::collect().operation(), "collect");
    }
}
