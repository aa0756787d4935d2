//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, routes)
//!     → request.rs (request ID)
//!     → security::gatekeeper (forward route only)
//!     → relay (decode, dispatch, translate)
//!     → Send to client
//! ```

pub mod request;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{AppState, TunnelServer, FORWARD_PATH};
