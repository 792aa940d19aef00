//! Bill-splitting calculations.
//!
//! This module provides the tip and per-person arithmetic, including the
//! round-up policy that redistributes the rounding remainder into the tip.

pub mod common;
mod split;

pub use split::compute;
