//! slidex
//!
//! Slide-expandable detail panels for virtualized, row-recycling lists.
//!
//! Expand state is keyed by row position, never by the recycled view that
//! happens to draw a row, so it survives scrolling and view reuse. The crate
//! follows a Pure Core / Impure Shell split: [`state`] holds the
//! terminal-free state machine, [`view`] a ratatui demo list hosting it.

pub mod config;
pub mod logging;
pub mod model;
pub mod state;
pub mod view;

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
