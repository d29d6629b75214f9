use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{web, App, HttpServer};
use alloy::providers::ProviderBuilder;
use alloy::signers::local::PrivateKeySigner;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fiat_token::TokenClient;
use fiat_token_server::config::ServiceConfig;
use fiat_token_server::routes;
use fiat_token_server::state::AppState;

fn build_cors(origins: &[String]) -> Cors {
    if origins.is_empty() {
        // Default: allow localhost on any port
        Cors::default()
            .allowed_origin_fn(|origin, _| {
                origin
                    .to_str()
                    .map(|o| o == "http://localhost" || o.starts_with("http://localhost:"))
                    .unwrap_or(false)
            })
            .allow_any_method()
            .allowed_headers(vec!["content-type", "authorization"])
            .max_age(3600)
    } else {
        let mut cors = Cors::default();
        for origin in origins {
            cors = cors.allowed_origin(origin);
        }
        cors.allow_any_method()
            .allowed_headers(vec!["content-type", "authorization"])
            .max_age(3600)
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServiceConfig::from_env();

    let signer: PrivateKeySigner = config
        .operator_key
        .parse()
        .expect("invalid OPERATOR_PRIVATE_KEY");
    let operator = signer.address();

    let provider = ProviderBuilder::new()
        .wallet(alloy::network::EthereumWallet::from(signer))
        .connect_http(config.rpc_url.parse().expect("invalid RPC_URL"));

    let state = web::Data::new(AppState {
        client: TokenClient::new(provider, config.token_address, operator),
        metrics_token: config.metrics_token,
    });

    tracing::info!("Fiat-token gateway listening on port {}", config.port);
    tracing::info!("Operator address: {operator}");
    tracing::info!("Token contract: {}", config.token_address);
    tracing::info!("Rate limit: {} req/min per IP", config.rate_limit_rpm);

    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_minute(config.rate_limit_rpm)
        .finish()
        .expect("failed to build rate limiter config");

    let cors_origins = config.allowed_origins.clone();
    let port = config.port;

    HttpServer::new(move || {
        App::new()
            .wrap(build_cors(&cors_origins))
            .wrap(Governor::new(&governor_conf))
            .app_data(state.clone())
            .app_data(web::JsonConfig::default().limit(65_536))
            .service(routes::health)
            .service(routes::metrics_endpoint)
            .service(routes::get_balance)
            .service(routes::mint)
            .service(routes::create_wallet)
            .service(routes::collect)
            .service(routes::burn)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
