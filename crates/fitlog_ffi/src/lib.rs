//! Flutter-facing bindings for FitLog core.

pub mod api;
