use alloy::primitives::Address;

/// Service configuration, loaded from the environment.
///
/// `OPERATOR_PRIVATE_KEY` and `TOKEN_ADDRESS` are mandatory; the service
/// refuses to start without them.
pub struct ServiceConfig {
    pub rpc_url: String,
    pub operator_key: String,
    pub token_address: Address,
    pub port: u16,
    pub rate_limit_rpm: u64,
    pub allowed_origins: Vec<String>,
    pub metrics_token: Option<Vec<u8>>,
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        let operator_key = match std::env::var("OPERATOR_PRIVATE_KEY") {
            Ok(key) if !key.is_empty() => key,
            _ => {
                tracing::error!(
                    "OPERATOR_PRIVATE_KEY is required — the hex-encoded key that signs and \
                     pays for all contract writes"
                );
                std::process::exit(1);
            }
        };

        let token_address: Address = match std::env::var("TOKEN_ADDRESS") {
            Ok(addr) => match fiat_token::parse_address(&addr) {
                Ok(parsed) => parsed,
                Err(e) => {
                    tracing::error!("TOKEN_ADDRESS is not a valid address: {e}");
                    std::process::exit(1);
                }
            },
            Err(_) => {
                tracing::error!(
                    "TOKEN_ADDRESS is required — the deployed fiat-token contract address"
                );
                std::process::exit(1);
            }
        };

        let rpc_url = std::env::var("RPC_URL")
            .unwrap_or_else(|_| fiat_token::constants::DEFAULT_RPC_URL.to_string());

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(4000);

        let rate_limit_rpm: u64 = std::env::var("RATE_LIMIT_RPM")
            .ok()
            .and_then(|r| r.parse().ok())
            .unwrap_or(120);

        let allowed_origins: Vec<String> = std::env::var("ALLOWED_ORIGINS")
            .ok()
            .map(|origins| {
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let metrics_token = std::env::var("METRICS_TOKEN")
            .ok()
            .filter(|s| !s.is_empty())
            .map(|s| s.into_bytes());

        if metrics_token.is_none() {
            tracing::warn!("METRICS_TOKEN not set — /metrics requires PUBLIC_METRICS=true");
        }

        Self {
            rpc_url,
            operator_key,
            token_address,
            port,
            rate_limit_rpm,
            allowed_origins,
            metrics_token,
        }
    }
}
