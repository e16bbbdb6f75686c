//! Position-indexed expand state.
//!
//! The store is the single source of truth for which rows are expanded. It
//! knows nothing about row views, animations, or handles.

use crate::model::{Position, TransitionType};
use crate::state::persistence::SavedStateSnapshot;
use std::collections::{BTreeSet, HashMap};

// ===== ExpandStateStore =====

/// Authoritative mapping from row position to expanded flag.
///
/// # Invariants
///
/// - Single-open mode: at most one position is expanded, and `last_open`
///   names it (`last_open = None` ⇔ nothing expanded).
/// - Multi-open mode: `last_open` is always `None`.
/// - Heights are cached per position and only replaced by a new measurement.
///
/// All operations run to completion synchronously; callers never observe a
/// state in which a forced collapse has happened but the new expand has not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandStateStore {
    /// Positions whose panel is expanded, kept sorted.
    expanded: BTreeSet<Position>,
    /// The single open position in single-open mode.
    last_open: Option<Position>,
    /// Last measured panel height per position.
    heights: HashMap<Position, u16>,
    /// Whether opening one row collapses the previously open one.
    single_open: bool,
}

impl Default for ExpandStateStore {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ExpandStateStore {
    /// Create an empty store.
    pub fn new(single_open: bool) -> Self {
        Self {
            expanded: BTreeSet::new(),
            last_open: None,
            heights: HashMap::new(),
            single_open,
        }
    }

    /// Rebuild a store from a snapshot.
    ///
    /// The mode is inferred from the snapshot: a recorded `last_open` (or an
    /// empty snapshot) means single-open, anything else multi-open.
    pub fn from_snapshot(snapshot: &SavedStateSnapshot) -> Self {
        let single_open = snapshot.last_open.is_some() || snapshot.expanded.is_empty();
        let mut store = Self::new(single_open);
        store.restore(snapshot);
        store
    }

    /// Whether the panel at `pos` is expanded.
    pub fn is_expanded(&self, pos: Position) -> bool {
        self.expanded.contains(&pos)
    }

    /// Whether any panel is expanded.
    pub fn is_any_expanded(&self) -> bool {
        !self.expanded.is_empty()
    }

    /// The open position in single-open mode.
    pub fn last_open(&self) -> Option<Position> {
        self.last_open
    }

    /// Whether single-open mode is active.
    pub fn single_open(&self) -> bool {
        self.single_open
    }

    /// Expanded positions in ascending order.
    pub fn expanded_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.expanded.iter().copied()
    }

    /// Number of expanded positions.
    pub fn expanded_count(&self) -> usize {
        self.expanded.len()
    }

    /// Set the expanded flag of `pos`.
    ///
    /// In single-open mode, expanding `pos` collapses the previously open
    /// position and returns it so the caller can animate its collapse.
    /// Collapsing the open position clears `last_open`.
    pub fn set_expanded(&mut self, pos: Position, expanded: bool) -> Option<Position> {
        if !self.single_open {
            if expanded {
                self.expanded.insert(pos);
            } else {
                self.expanded.remove(&pos);
            }
            return None;
        }

        if expanded {
            let displaced = self.last_open.filter(|&open| open != pos);
            if let Some(open) = displaced {
                self.expanded.remove(&open);
            }
            self.expanded.insert(pos);
            self.last_open = Some(pos);
            displaced
        } else {
            self.expanded.remove(&pos);
            if self.last_open == Some(pos) {
                self.last_open = None;
            }
            None
        }
    }

    /// Flip the flag of `pos` and report which transition happened.
    pub fn toggle(&mut self, pos: Position) -> TransitionType {
        self.toggle_displacing(pos).0
    }

    /// Flip the flag of `pos`, also returning the position a single-open
    /// expand forced closed.
    pub fn toggle_displacing(&mut self, pos: Position) -> (TransitionType, Option<Position>) {
        let kind = TransitionType::for_toggle(self.is_expanded(pos));
        let displaced = self.set_expanded(pos, kind.settles_expanded());
        (kind, displaced)
    }

    /// Collapse the open position, if any, and return it.
    pub fn collapse_all(&mut self) -> Option<Position> {
        let open = self.last_open?;
        self.set_expanded(open, false);
        Some(open)
    }

    /// Collapse every expanded position, returning them in ascending order.
    pub fn collapse_expanded(&mut self) -> Vec<Position> {
        self.last_open = None;
        std::mem::take(&mut self.expanded).into_iter().collect()
    }

    /// Switch single-open mode.
    ///
    /// Enabling it with several rows expanded keeps the highest position open
    /// and returns the others, which are now collapsed. Disabling it clears
    /// `last_open` but keeps every expanded row.
    pub fn set_single_open(&mut self, single_open: bool) -> Vec<Position> {
        if self.single_open == single_open {
            return Vec::new();
        }
        self.single_open = single_open;

        if !single_open {
            self.last_open = None;
            return Vec::new();
        }

        let keep = self.expanded.last().copied();
        self.last_open = keep;
        let collapsed: Vec<Position> = self
            .expanded
            .iter()
            .copied()
            .filter(|&pos| Some(pos) != keep)
            .collect();
        for pos in &collapsed {
            self.expanded.remove(pos);
        }
        collapsed
    }

    /// Record a measured panel height.
    pub fn cache_height(&mut self, pos: Position, height: u16) {
        self.heights.insert(pos, height);
    }

    /// Drop every cached height.
    pub fn clear_heights(&mut self) {
        self.heights.clear();
    }

    /// Last measured panel height, if any.
    pub fn cached_height(&self, pos: Position) -> Option<u16> {
        self.heights.get(&pos).copied()
    }

    /// Frozen copy of the expand state.
    pub fn snapshot(&self) -> SavedStateSnapshot {
        SavedStateSnapshot {
            last_open: self.last_open,
            expanded: self.expanded.iter().copied().collect(),
        }
    }

    /// Replace the expand state with a snapshot, keeping the current mode and
    /// height cache.
    ///
    /// A snapshot that contradicts single-open mode is normalised: its
    /// `last_open` (or, lacking one, its highest position) stays open.
    pub fn restore(&mut self, snapshot: &SavedStateSnapshot) {
        self.expanded.clear();
        self.last_open = None;

        if self.single_open {
            let open = snapshot
                .last_open
                .or_else(|| snapshot.expanded.iter().copied().max());
            if let Some(open) = open {
                self.expanded.insert(open);
                self.last_open = Some(open);
            }
        } else {
            self.expanded.extend(snapshot.expanded.iter().copied());
            self.expanded.extend(snapshot.last_open);
        }
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "expand_store_tests.rs"]
mod tests;
