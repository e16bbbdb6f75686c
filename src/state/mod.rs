//! Expand/collapse state machine (pure).
//!
//! Nothing here touches a terminal. The host list is reached through the
//! [`RowRenderer`] and [`ListScroller`] traits, and animations advance only
//! when the host calls `tick` with the current time.

pub mod actions;
pub mod animation;
pub mod controller;
pub mod expand_store;
pub mod host;
pub mod listener;
pub mod persistence;
pub mod tween;

#[cfg(test)]
pub(crate) mod test_host;

// Re-export for convenience
pub use actions::ActionDispatcher;
pub use animation::{
    scroll_adjustment, AnimationCoordinator, AnimationRequest, CompletedAnimation, PanelAnimation,
};
pub use controller::{
    Activation, ExpandOptions, ExpansionController, DEFAULT_ANIMATION_DURATION_MS,
};
pub use expand_store::ExpandStateStore;
pub use host::{ListScroller, PanelVisual, RowRenderer};
pub use listener::{
    ActionListener, AnimationListener, ExpandCollapseListener, ExpandEvent, ListenerTiming,
};
pub use persistence::{deserialize, serialize, SavedStateSnapshot};
pub use tween::{Easing, Tween};
