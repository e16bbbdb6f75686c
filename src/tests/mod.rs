//! Internal test modules - whitebox tests with crate access
//!
//! Harness-based acceptance tests drive the whole app (keys, simulated clock,
//! TestBackend rendering) the way a user would.

mod acceptance_actions;
mod acceptance_expand;
