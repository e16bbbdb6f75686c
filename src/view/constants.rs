//! Layout and timing constants for the demo list.

/// Lines taken by a row header (the toggle).
pub const ROW_HEADER_HEIGHT: u16 = 1;

/// Columns by which panel text is indented under its header.
pub const PANEL_INDENT: u16 = 4;

/// Height of the status bar in lines.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Frame interval while something animates (about 60 fps).
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Input poll timeout while idle.
pub const IDLE_POLL_MS: u64 = 250;
