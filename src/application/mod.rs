//! Application layer - orchestration of domain logic.
//!
//! This layer coordinates rule evaluation and record construction:
//! - The visit filter (decision making)
//! - Observability metrics
//!
//! ## Ports
//!
//! The application layer defines ports (traits) that infrastructure
//! adapters must implement: the clock, the persistence backend, and the
//! host-registered skip-tracking hook. This keeps the application layer
//! independent from infrastructure details.

pub mod filter;
pub mod metrics;
pub mod ports;
