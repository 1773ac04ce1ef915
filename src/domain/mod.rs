//! Domain layer - pure business logic with no external collaborators.
//!
//! This layer contains the core concepts and invariants of visit tracking:
//! - Request context and host-environment flags
//! - The normalized visit record
//! - User-agent blacklist matching
//! - Built-in exclusion rules
//!
//! All types in this layer are pure and easily testable.

pub mod blacklist;
pub mod record;
pub mod request;
pub mod rules;
