//! Domain model types (pure).
//!
//! All types in this module are plain data without I/O.

pub mod bounds;
pub mod error;
pub mod identifiers;
pub mod key_action;
pub mod transition;

// Re-export for convenience
pub use bounds::{PanelBounds, ViewportBounds};
pub use error::{AppError, ExpandError, PersistError};
pub use identifiers::{ActionId, PanelHandle, Position, ToggleHandle};
pub use key_action::KeyAction;
pub use transition::{PanelPhase, ToggleDecision, TransitionType};
