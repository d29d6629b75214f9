//! HTTP gateway for the custodial fiat-token contract.
//!
//! Handlers are pure coordination: validate shape, run the authorization gate
//! where required, delegate to the orchestrator in the [`fiat_token`] core
//! crate, and shape the JSON response. No business logic lives here.
//!
//! # Modules
//!
//! - [`routes`] — the endpoint handlers plus `/health` and `/metrics`
//! - [`state`] — shared [`AppState`](state::AppState) with the long-lived chain client
//! - [`config`] — environment-driven service configuration
//! - [`metrics`] — Prometheus counters and latency histograms

pub mod config;
pub mod metrics;
pub mod routes;
pub mod state;
