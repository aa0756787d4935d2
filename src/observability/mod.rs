//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Gatekeeper, relay and server produce:
//!     → logging.rs (structured log events, response previews)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (human or JSON lines)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID (x-request-id) is attached to every HTTP span
//! - Log output never feeds back into a response
//! - The shared secret is never logged

pub mod logging;
pub mod metrics;
