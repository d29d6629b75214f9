use actix_web::http::StatusCode;
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use alloy::primitives::U256;
use serde::Deserialize;

use fiat_token::auth::Credentials;
use fiat_token::{
    authorize, execute, format_units, generate_wallet, parse_address, TokenError,
    TransactionIntent, TOKEN_DECIMALS,
};

use crate::metrics;
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintRequest {
    pub amount: Option<f64>,
    pub wallet_address: Option<String>,
}

#[derive(Deserialize)]
pub struct CollectRequest {
    pub account: Option<String>,
    pub signature: Option<String>,
    pub message: Option<String>,
}

#[derive(Deserialize)]
pub struct BurnRequest {
    pub amount: Option<f64>,
    pub account: Option<String>,
    pub signature: Option<String>,
    pub message: Option<String>,
}

/// Every error path returns `{statusCode, message}` with a matching HTTP status.
fn error_body(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(serde_json::json!({
        "statusCode": status.as_u16(),
        "message": message,
    }))
}

/// Map a pipeline error onto the HTTP surface. Validation and authorization
/// failures carry their message; chain failures are logged with the cause and
/// surfaced as an opaque 500.
fn respond_error(err: TokenError, op: &str) -> HttpResponse {
    match err {
        TokenError::MissingCredentials(msg) | TokenError::InvalidInput(msg) => {
            metrics::REQUESTS.with_label_values(&[op, "invalid"]).inc();
            error_body(StatusCode::BAD_REQUEST, &msg)
        }
        TokenError::InvalidSignature(_) => {
            metrics::REQUESTS
                .with_label_values(&[op, "unauthorized"])
                .inc();
            metrics::AUTH_FAILURES
                .with_label_values(&["signature"])
                .inc();
            error_body(StatusCode::UNAUTHORIZED, "Invalid signature")
        }
        TokenError::NotOwner => {
            metrics::REQUESTS.with_label_values(&[op, "forbidden"]).inc();
            metrics::AUTH_FAILURES
                .with_label_values(&["ownership"])
                .inc();
            error_body(StatusCode::FORBIDDEN, "Signer is not the contract owner")
        }
        TokenError::ChainError(cause) => {
            metrics::REQUESTS.with_label_values(&[op, "error"]).inc();
            tracing::error!(op, error = %cause, "chain operation failed");
            error_body(StatusCode::INTERNAL_SERVER_ERROR, &format!("{op} failed"))
        }
    }
}

/// Validate a JSON amount: present, finite, integral, strictly positive.
/// Amounts are token base units, so fractional values are rejected outright.
fn parse_amount(amount: Option<f64>) -> Result<U256, TokenError> {
    match amount {
        Some(a) if a.is_finite() && a > 0.0 && a.fract() == 0.0 && a < 1e30 => {
            Ok(U256::from(a as u128))
        }
        _ => Err(TokenError::InvalidInput(
            "Invalid or missing amount parameter".to_string(),
        )),
    }
}

#[get("/get-balance/{address}")]
pub async fn get_balance(path: web::Path<String>, state: web::Data<AppState>) -> HttpResponse {
    let address = match parse_address(&path) {
        Ok(addr) => addr,
        Err(_) => {
            metrics::REQUESTS
                .with_label_values(&["get-balance", "invalid"])
                .inc();
            return error_body(
                StatusCode::BAD_REQUEST,
                "Invalid or missing address parameter",
            );
        }
    };

    match state.client.balance_of(address).await {
        Ok(balance) => {
            metrics::REQUESTS
                .with_label_values(&["get-balance", "ok"])
                .inc();
            HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "balance": {
                    "address": format!("{address}"),
                    "balance": format_units(balance, TOKEN_DECIMALS),
                },
            }))
        }
        Err(e) => respond_error(e, "get-balance"),
    }
}

#[post("/mint")]
pub async fn mint(body: web::Json<MintRequest>, state: web::Data<AppState>) -> HttpResponse {
    let amount = match parse_amount(body.amount) {
        Ok(a) => a,
        Err(e) => return respond_error(e, "mint"),
    };

    let destination = match body.wallet_address.as_deref().map(parse_address) {
        Some(Ok(addr)) => addr,
        _ => {
            metrics::REQUESTS.with_label_values(&["mint", "invalid"]).inc();
            return error_body(StatusCode::BAD_REQUEST, "Invalid or missing wallet address");
        }
    };

    let intent = match TransactionIntent::mint(amount, destination) {
        Ok(intent) => intent,
        Err(e) => return respond_error(e, "mint"),
    };

    let start = std::time::Instant::now();
    match execute(&state.client, &intent).await {
        Ok(hash) => {
            metrics::REQUESTS.with_label_values(&["mint", "ok"]).inc();
            metrics::TX_LATENCY
                .with_label_values(&["mint"])
                .observe(start.elapsed().as_secs_f64());
            tracing::info!(to = %destination, amount = %amount, tx = %hash, "mint confirmed");
            HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "txHash": format!("{hash}"),
            }))
        }
        Err(e) => respond_error(e, "mint"),
    }
}

#[get("/create-wallet")]
pub async fn create_wallet(state: web::Data<AppState>) -> HttpResponse {
    // Local keygen only; the balance read is the sole network call. The key
    // material is dropped with the wallet value — no copy is retained.
    let wallet = generate_wallet();

    match state.client.balance_of(wallet.address).await {
        Ok(balance) => {
            metrics::REQUESTS
                .with_label_values(&["create-wallet", "ok"])
                .inc();
            tracing::info!(address = %wallet.address, "custody wallet issued");
            HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "walletAddress": format!("{}", wallet.address),
                "balance": format_units(balance, TOKEN_DECIMALS),
            }))
        }
        Err(e) => respond_error(e, "create-wallet"),
    }
}

#[post("/collect")]
pub async fn collect(body: web::Json<CollectRequest>, state: web::Data<AppState>) -> HttpResponse {
    let creds = Credentials {
        account: body.account.as_deref().unwrap_or(""),
        signature: body.signature.as_deref().unwrap_or(""),
        message: body.message.as_deref().unwrap_or(""),
    };

    let authorized = match authorize(&state.client, &creds, false).await {
        Ok(addr) => addr,
        Err(e) => return respond_error(e, "collect"),
    };

    let start = std::time::Instant::now();
    match execute(&state.client, &TransactionIntent::collect()).await {
        Ok(hash) => {
            metrics::REQUESTS.with_label_values(&["collect", "ok"]).inc();
            metrics::TX_LATENCY
                .with_label_values(&["collect"])
                .observe(start.elapsed().as_secs_f64());
            tracing::info!(account = %authorized, tx = %hash, "collect confirmed");
            HttpResponse::Ok().json(serde_json::json!({
                "message": "Collect successful",
                "txHash": format!("{hash}"),
            }))
        }
        Err(e) => respond_error(e, "collect"),
    }
}

#[post("/burn")]
pub async fn burn(body: web::Json<BurnRequest>, state: web::Data<AppState>) -> HttpResponse {
    let amount = match parse_amount(body.amount) {
        Ok(a) => a,
        Err(e) => return respond_error(e, "burn"),
    };

    let creds = Credentials {
        account: body.account.as_deref().unwrap_or(""),
        signature: body.signature.as_deref().unwrap_or(""),
        message: body.message.as_deref().unwrap_or(""),
    };

    // Burn is the privileged write: signature first, then a live ownership
    // check against the contract.
    let authorized = match authorize(&state.client, &creds, true).await {
        Ok(addr) => addr,
        Err(e) => return respond_error(e, "burn"),
    };

    let intent = match TransactionIntent::burn(amount) {
        Ok(intent) => intent,
        Err(e) => return respond_error(e, "burn"),
    };

    let start = std::time::Instant::now();
    match execute(&state.client, &intent).await {
        Ok(hash) => {
            metrics::REQUESTS.with_label_values(&["burn", "ok"]).inc();
            metrics::TX_LATENCY
                .with_label_values(&["burn"])
                .observe(start.elapsed().as_secs_f64());
            tracing::info!(owner = %authorized, amount = %amount, tx = %hash, "burn confirmed");
            HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "txHash": format!("{hash}"),
            }))
        }
        Err(e) => respond_error(e, "burn"),
    }
}

#[get("/health")]
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    match state.client.health_check().await {
        Ok(block) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "fiat-token-server",
            "latestBlock": block.to_string(),
        })),
        Err(_) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "degraded",
            "service": "fiat-token-server",
            "error": "RPC unreachable",
        })),
    }
}

#[get("/metrics")]
pub async fn metrics_endpoint(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    match &state.metrics_token {
        Some(token) => {
            let authorized = req
                .headers()
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.strip_prefix("Bearer "))
                .map(|t| fiat_token::security::constant_time_eq(t.as_bytes(), token))
                .unwrap_or(false);

            if !authorized {
                return HttpResponse::Unauthorized().json(serde_json::json!({
                    "statusCode": 401,
                    "message": "Valid Bearer token required for /metrics",
                }));
            }
        }
        None => {
            // No token configured — metrics stay protected unless explicitly
            // opted into public access.
            let public_metrics = std::env::var("PUBLIC_METRICS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false);
            if !public_metrics {
                return HttpResponse::Forbidden().json(serde_json::json!({
                    "statusCode": 403,
                    "message": "Set METRICS_TOKEN or PUBLIC_METRICS=true to access /metrics",
                }));
            }
        }
    }
    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(metrics::metrics_output())
}
