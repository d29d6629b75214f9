//! Chain client: the long-lived handle to the RPC node, the service's
//! operator key (via the provider's wallet filler), and the deployed
//! fiat-token contract.

use alloy::network::Ethereum;
use alloy::primitives::{Address, U256};
use alloy::providers::{PendingTransactionBuilder, Provider};

use crate::constants::BROADCAST_TIMEOUT;
use crate::orchestrator::TransactionIntent;
use crate::{FiatToken, TokenError};

/// Owned handle to the node connection and the deployed contract.
///
/// Safe for concurrent reads; writes are independent transactions ordered
/// only by the provider's nonce assignment. Generic over the provider so
/// tests can use a bare `RootProvider`.
pub struct TokenClient<P> {
    provider: P,
    token: Address,
    operator: Address,
}

impl<P> TokenClient<P> {
    /// `token` is the deployed contract address; `operator` is the address of
    /// the service key that signs and pays for all writes.
    pub fn new(provider: P, token: Address, operator: Address) -> Self {
        Self {
            provider,
            token,
            operator,
        }
    }

    /// Address of the deployed fiat-token contract.
    pub fn token(&self) -> Address {
        self.token
    }

    /// Address of the service's signing key.
    pub fn operator(&self) -> Address {
        self.operator
    }
}

impl<P: Provider> TokenClient<P> {
    /// Query the token balance of `account`.
    pub async fn balance_of(&self, account: Address) -> Result<U256, TokenError> {
        let contract = FiatToken::new(self.token, &self.provider);
        contract
            .balanceOf(account)
            .call()
            .await
            .map_err(|e| TokenError::ChainError(format!("balanceOf failed: {e}")))
    }

    /// Fetch the contract-registered owner. Never cached: callers re-read it
    /// on every privileged request so an ownership transfer takes effect
    /// immediately.
    pub async fn owner(&self) -> Result<Address, TokenError> {
        let contract = FiatToken::new(self.token, &self.provider);
        contract
            .owner()
            .call()
            .await
            .map_err(|e| TokenError::ChainError(format!("owner lookup failed: {e}")))
    }

    /// Check RPC connectivity by fetching the latest block number.
    pub async fn health_check(&self) -> Result<u64, TokenError> {
        self.provider
            .get_block_number()
            .await
            .map_err(|e| TokenError::ChainError(format!("health check failed: {e}")))
    }

    /// Sign and broadcast `intent` with the service's own key, returning the
    /// pending transaction. The caller's signature only gated the request;
    /// the operator key executes and pays for the write.
    ///
    /// No retry at this layer. A broadcast that does not reach the node
    /// within the timeout is surfaced as `ChainError`.
    pub async fn submit(
        &self,
        intent: &TransactionIntent,
    ) -> Result<PendingTransactionBuilder<Ethereum>, TokenError> {
        let contract = FiatToken::new(self.token, &self.provider);
        let op = intent.operation();

        tokio::time::timeout(BROADCAST_TIMEOUT, async {
            match intent {
                TransactionIntent::Mint { amount, to } => contract.mint(*to, *amount).send().await,
                TransactionIntent::Burn { amount } => contract.burn(*amount).send().await,
                TransactionIntent::Collect => contract.collect().send().await,
            }
        })
        .await
        .map_err(|_| {
            TokenError::ChainError(format!(
                "{op} broadcast timed out after {}s",
                BROADCAST_TIMEOUT.as_secs()
            ))
        })?
        .map_err(|e| TokenError::ChainError(format!("{op} broadcast failed: {e}")))
    }
}
