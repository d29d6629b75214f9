//! Custodial fiat-token core.
//!
//! Implements the authorization and transaction-orchestration pipeline for a
//! custodial stablecoin contract: off-chain signed-message verification,
//! contract-ownership checks, and at-most-once submission of mint, burn, and
//! collect transactions signed by the service's own operator key.
//!
//! # Pipeline
//!
//! - [`signature`] — recovers the signer of an EIP-191 `personal_sign` message
//! - [`auth`] — combines signature recovery with a live ownership lookup
//! - [`chain`] — owns the provider and the deployed contract handle
//! - [`orchestrator`] — turns a validated [`TransactionIntent`] into a confirmed hash
//!
//! The HTTP surface lives in the `fiat-token-server` crate; this crate has no
//! knowledge of request or response shapes.

pub mod address;
pub mod auth;
pub mod chain;
pub mod constants;
pub mod error;
pub mod orchestrator;
pub mod security;
pub mod signature;
pub mod units;
pub mod wallet;

use alloy::sol;

// Deployed fiat-token contract interface. Writes are executed with the
// service operator's key; `owner()` is the contract-registered privileged
// account checked before burns.
sol! {
    #[sol(rpc)]
    interface FiatToken {
        function mint(address to, uint256 amount) external;
        function burn(uint256 amount) external;
        function collect() external;
        function balanceOf(address account) external view returns (uint256);
        function owner() external view returns (address);
    }
}

// Re-exports
pub use address::{is_valid_address, parse_address};
pub use auth::{authorize, Credentials};
pub use chain::TokenClient;
pub use constants::TOKEN_DECIMALS;
pub use error::TokenError;
pub use orchestrator::{execute, TransactionIntent};
pub use units::format_units;
pub use wallet::{generate_wallet, GeneratedWallet};
