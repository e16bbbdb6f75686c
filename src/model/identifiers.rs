//! Core identifier newtypes.
//!
//! `Position` is the only durable identity of a row. The handle types are
//! opaque tokens minted by the row renderer for its (recycled) row views; they
//! say nothing about which logical row a view currently displays.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable index of a row in the logical (non-recycled) list. 0-indexed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Position(usize);

impl Position {
    /// Create a new Position from a raw 0-based index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw 0-based index value.
    pub fn get(&self) -> usize {
        self.0
    }

    /// Get the next position.
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Get the previous position, saturating at 0.
    pub fn prev(&self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}

impl From<usize> for Position {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Opaque token for the sub-view of a row whose activation toggles its panel.
///
/// Two row views never share a toggle handle, but one handle is reused for
/// many positions over its lifetime as the list recycles views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToggleHandle(u32);

impl ToggleHandle {
    /// Wrap a renderer-assigned id.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Renderer-assigned id.
    pub fn id(&self) -> u32 {
        self.0
    }
}

/// Opaque token for the collapsible detail panel of a row view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelHandle(u32);

impl PanelHandle {
    /// Wrap a renderer-assigned id.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Renderer-assigned id.
    pub fn id(&self) -> u32 {
        self.0
    }
}

/// Identifier of an action button inside an expanded panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionId(u16);

impl ActionId {
    /// Wrap a host-chosen action id.
    pub fn new(id: u16) -> Self {
        Self(id)
    }

    /// Host-chosen action id.
    pub fn get(&self) -> u16 {
        self.0
    }
}
