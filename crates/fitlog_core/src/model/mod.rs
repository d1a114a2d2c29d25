//! Domain model for the workout log and the exercise catalog.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep validation rules next to the data they guard.
//!
//! # Invariants
//! - Parents own their children; children never hold back-pointers.
//! - Every workout, exercise entry and set is identified by a stable UUID.

pub mod catalog;
pub mod workout;
