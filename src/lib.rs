//! Authenticated HTTP tunnel library.
//!
//! # Architecture Overview
//!
//! ```text
//!     Caller                 ┌──────────────────────────────────────────────┐
//!     POST /tunnel/forward   │                   TUNNEL                     │
//!     X-Tunnel-Secret ───────┼─▶ http::server ─▶ security::gatekeeper ──┐   │
//!                            │                     (403 on mismatch)   │   │
//!                            │                                         ▼   │
//!                            │   relay::directive ─▶ relay::dispatch ──────┼──▶ Target
//!                            │   (400 on bad input)  (502 on failure)      │
//!     Response ◀─────────────┼── relay::response ◀─────────────────────────┼─── Target
//!                            │   (status passthrough, 204 without body)    │
//!                            │                                              │
//!                            │   config · observability · lifecycle         │
//!                            └──────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod relay;
pub mod security;

pub use config::schema::TunnelConfig;
pub use http::TunnelServer;
pub use lifecycle::Shutdown;
