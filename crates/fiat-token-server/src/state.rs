use alloy::network::EthereumWallet;
use alloy::providers::{
    fillers::{
        BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller, WalletFiller,
    },
    Identity, RootProvider,
};

use fiat_token::TokenClient;

/// Concrete provider type from `ProviderBuilder::new().wallet(...).connect_http(...)`.
pub type WalletProvider = FillProvider<
    JoinFill<
        JoinFill<
            Identity,
            JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
        >,
        WalletFiller<EthereumWallet>,
    >,
    RootProvider,
>;

/// Shared application state: one long-lived chain client (one signing key,
/// one contract handle, one node connection) used concurrently by all
/// handlers. Requests are never serialized against each other.
pub struct AppState {
    pub client: TokenClient<WalletProvider>,
    /// Bearer token for the `/metrics` endpoint.
    pub metrics_token: Option<Vec<u8>>,
}
