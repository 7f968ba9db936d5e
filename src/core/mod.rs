//! Core lifecycle types and logic.
//!
//! This module contains the pure core of the tracker:
//! - State definitions via the `State` trait and the `PackageStatus` enum
//! - The static status transition table
//! - Immutable history tracking
//!
//! Nothing in this module performs I/O or holds locks.

mod history;
mod state;
mod status;
mod transitions;

pub use history::{StatusChange, StatusHistory};
pub use state::State;
pub use status::PackageStatus;
pub use transitions::{
    allowed_transitions, ensure_transition, validate_transition, validate_transition_tokens,
    TRANSITIONS,
};
