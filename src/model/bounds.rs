//! Viewport geometry exchanged with the list widget.

/// Vertical extent of a panel relative to the top of the viewport.
///
/// `top` may be negative (panel starts above the viewport) and `bottom` may
/// exceed the viewport height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelBounds {
    /// First row covered by the panel.
    pub top: i32,
    /// One past the last row covered by the panel.
    pub bottom: i32,
}

impl PanelBounds {
    /// Create bounds from a top edge and a height.
    pub fn new(top: i32, height: u16) -> Self {
        Self {
            top,
            bottom: top.saturating_add(i32::from(height)),
        }
    }

    /// Height covered by the bounds.
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// Visible extent of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportBounds {
    /// Viewport height in device units.
    pub height: i32,
}

impl ViewportBounds {
    /// Create viewport bounds.
    pub fn new(height: u16) -> Self {
        Self {
            height: i32::from(height),
        }
    }
}
