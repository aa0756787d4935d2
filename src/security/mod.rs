//! Security subsystem.
//!
//! The forward endpoint is guarded by a shared secret sent in
//! `X-Tunnel-Secret`. The check runs as route middleware, so rejected
//! callers never get their body read.

pub mod gatekeeper;

pub use gatekeeper::{authorize, gatekeeper_middleware, Decision, TUNNEL_SECRET_HEADER};
