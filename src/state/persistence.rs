//! Saving and restoring expand state across host lifecycle boundaries.
//!
//! # Blob format
//!
//! All integers are little-endian `i32`:
//!
//! ```text
//! lastOpen (-1 if none) | count | count × position (ascending)
//! ```
//!
//! The blob is `8 + 4·count` bytes. It is not guaranteed to be stable across
//! versions. Trailing bytes after the last position are ignored so hosts can
//! append their own state.
//!
//! Decoding never fails: an absent, empty, truncated or otherwise corrupt
//! blob yields an empty state.

use crate::model::{PersistError, Position};
use crate::state::ExpandStateStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, warn};

/// Sentinel written for "no open position".
pub const NO_LAST_OPEN: i32 = -1;

/// Size of the fixed blob header (`lastOpen` + `count`).
pub const HEADER_LEN: usize = 8;

const SLOT_LEN: usize = 4;

/// Expand state captured at host save time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SavedStateSnapshot {
    /// Open position in single-open mode.
    pub last_open: Option<Position>,
    /// Expanded positions, ascending and without duplicates.
    pub expanded: Vec<Position>,
}

/// Encode a snapshot into a blob.
///
/// # Errors
///
/// Returns [`PersistError::PositionOutOfRange`] if a position does not fit in
/// an `i32`.
pub fn encode(snapshot: &SavedStateSnapshot) -> Result<Vec<u8>, PersistError> {
    let mut blob = Vec::with_capacity(HEADER_LEN + SLOT_LEN * snapshot.expanded.len());

    let last_open = match snapshot.last_open {
        Some(pos) => to_slot(pos)?,
        None => NO_LAST_OPEN,
    };
    blob.extend_from_slice(&last_open.to_le_bytes());

    let count = i32::try_from(snapshot.expanded.len()).map_err(|_| {
        PersistError::PositionOutOfRange(snapshot.expanded.last().copied().unwrap_or_default())
    })?;
    blob.extend_from_slice(&count.to_le_bytes());

    for &pos in &snapshot.expanded {
        blob.extend_from_slice(&to_slot(pos)?.to_le_bytes());
    }

    Ok(blob)
}

/// Decode a blob into a snapshot.
///
/// Returns `None` for empty, truncated or corrupt blobs (negative count,
/// negative positions, a `lastOpen` below `-1`).
pub fn decode(blob: &[u8]) -> Option<SavedStateSnapshot> {
    let mut slots = blob.chunks_exact(SLOT_LEN).map(|chunk| {
        let mut bytes = [0u8; SLOT_LEN];
        bytes.copy_from_slice(chunk);
        i32::from_le_bytes(bytes)
    });

    let last_open = match slots.next()? {
        NO_LAST_OPEN => None,
        raw => Some(from_slot(raw)?),
    };

    let count = usize::try_from(slots.next()?).ok()?;
    let needed = count.checked_mul(SLOT_LEN)?.checked_add(HEADER_LEN)?;
    if blob.len() < needed {
        return None;
    }

    let mut expanded = BTreeSet::new();
    for raw in slots.take(count) {
        expanded.insert(from_slot(raw)?);
    }

    Some(SavedStateSnapshot {
        last_open,
        expanded: expanded.into_iter().collect(),
    })
}

/// Serialize the store's expand state.
///
/// Works on a frozen snapshot, so later mutation of the store cannot affect
/// the returned blob.
pub fn serialize(store: &ExpandStateStore) -> Result<Vec<u8>, PersistError> {
    encode(&store.snapshot())
}

/// Restore a store from a blob, falling back to an empty store.
pub fn deserialize(blob: Option<&[u8]>) -> ExpandStateStore {
    match blob.and_then(decode_logged) {
        Some(snapshot) => ExpandStateStore::from_snapshot(&snapshot),
        None => ExpandStateStore::default(),
    }
}

/// Decode, logging why a non-empty blob was discarded.
pub(crate) fn decode_logged(blob: &[u8]) -> Option<SavedStateSnapshot> {
    let snapshot = decode(blob);
    if snapshot.is_none() && !blob.is_empty() {
        warn!(
            len = blob.len(),
            "Discarding corrupt saved expand state; starting empty"
        );
    }
    snapshot
}

/// Write a blob to the host's state file, creating parent directories.
pub fn save_to_file(path: &Path, blob: &[u8]) -> Result<(), PersistError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| PersistError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, blob).map_err(|source| PersistError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = ?path, bytes = blob.len(), "Saved expand state");
    Ok(())
}

/// Read a blob from the host's state file.
///
/// A missing file is not an error and yields `Ok(None)`.
pub fn load_from_file(path: &Path) -> Result<Option<Vec<u8>>, PersistError> {
    match std::fs::read(path) {
        Ok(blob) => Ok(Some(blob)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(PersistError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn to_slot(pos: Position) -> Result<i32, PersistError> {
    i32::try_from(pos.get()).map_err(|_| PersistError::PositionOutOfRange(pos))
}

fn from_slot(raw: i32) -> Option<Position> {
    usize::try_from(raw).ok().map(Position::new)
}

// ===== Tests =====

#[cfg(test)]
#[path = "persistence_tests.rs"]
mod tests;
