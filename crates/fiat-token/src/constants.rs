use std::time::Duration;

/// The custody token uses 6 decimal places (USDC convention).
pub const TOKEN_DECIMALS: u32 = 6;

/// Default RPC endpoint (Sepolia testnet) when `RPC_URL` is unset.
pub const DEFAULT_RPC_URL: &str = "https://ethereum-sepolia-rpc.publicnode.com";

/// Timeout for broadcasting a transaction to the RPC node.
pub const BROADCAST_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for waiting on the first confirmation of a broadcast transaction.
/// A late confirmation after this deadline is not tracked by the service.
pub const CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(60);
