//! Panel height animations and post-expand scroll-into-view.
//!
//! The coordinator keeps at most one running animation per panel handle. It
//! does not decide *what* to animate; the expansion controller does, and it
//! is responsible for deferring toggles while a panel is busy.

use crate::model::{PanelBounds, PanelHandle, Position, TransitionType, ViewportBounds};
use crate::state::host::{ListScroller, PanelVisual, RowRenderer};
use crate::state::tween::{Easing, Tween};
use std::collections::HashMap;
use tracing::debug;

/// A request to animate one panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationRequest {
    /// Panel to animate.
    pub panel: PanelHandle,
    /// Row the panel displays when the animation starts.
    pub position: Position,
    /// Direction of the animation.
    pub kind: TransitionType,
    /// Fully expanded height of the panel.
    pub full_height: u16,
    /// Length of the animation.
    pub duration_ms: u32,
    /// Whether the expand/collapse listener waits for this animation.
    pub notify_on_end: bool,
}

/// A running panel animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelAnimation {
    /// Row the animation was started for.
    pub position: Position,
    /// Direction of the animation.
    pub kind: TransitionType,
    /// Fully expanded height of the panel.
    pub full_height: u16,
    /// Whether the expand/collapse listener waits for this animation.
    pub notify_on_end: bool,
    tween: Tween,
}

/// An animation that finished during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletedAnimation {
    /// Panel that finished animating.
    pub panel: PanelHandle,
    /// Row the animation was started for.
    pub position: Position,
    /// Direction of the finished animation.
    pub kind: TransitionType,
    /// Whether the expand/collapse listener waits for this completion.
    pub notify_on_end: bool,
}

// ===== AnimationCoordinator =====

/// Runs expand/collapse height interpolations.
#[derive(Debug, Clone)]
pub struct AnimationCoordinator {
    active: HashMap<PanelHandle, PanelAnimation>,
    easing: Easing,
    adjust_to_fit: bool,
}

impl Default for AnimationCoordinator {
    fn default() -> Self {
        Self::new(Easing::default(), true)
    }
}

impl AnimationCoordinator {
    /// Create an idle coordinator.
    pub fn new(easing: Easing, adjust_to_fit: bool) -> Self {
        Self {
            active: HashMap::new(),
            easing,
            adjust_to_fit,
        }
    }

    /// Whether expanded panels are scrolled into view on completion.
    pub fn adjust_to_fit(&self) -> bool {
        self.adjust_to_fit
    }

    /// Switch scroll-into-view on or off.
    pub fn set_adjust_to_fit(&mut self, adjust_to_fit: bool) {
        self.adjust_to_fit = adjust_to_fit;
    }

    /// Curve used for new animations.
    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Change the curve used for new animations.
    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    /// Whether `panel` has a running animation.
    pub fn is_animating(&self, panel: PanelHandle) -> bool {
        self.active.contains_key(&panel)
    }

    /// Running animation of `panel`.
    pub fn active(&self, panel: PanelHandle) -> Option<&PanelAnimation> {
        self.active.get(&panel)
    }

    /// Number of running animations.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Start an animation.
    ///
    /// Returns `false` without touching the panel if it is already animating.
    pub fn animate<H: RowRenderer>(
        &mut self,
        request: AnimationRequest,
        now_ms: u64,
        host: &mut H,
    ) -> bool {
        if self.is_animating(request.panel) {
            debug!(
                panel = request.panel.id(),
                position = %request.position,
                "Refusing overlapping panel animation"
            );
            return false;
        }

        let full = u64::from(request.full_height);
        let (from, to) = match request.kind {
            TransitionType::Expand => (0, full),
            TransitionType::Collapse => (full, 0),
        };
        let tween = Tween::new(
            from,
            to,
            now_ms,
            u64::from(request.duration_ms),
            self.easing,
        );

        host.apply_panel(request.panel, PanelVisual::shown(height_of(from)));
        self.active.insert(
            request.panel,
            PanelAnimation {
                position: request.position,
                kind: request.kind,
                full_height: request.full_height,
                notify_on_end: request.notify_on_end,
                tween,
            },
        );
        true
    }

    /// Drop the animation of `panel` without completing it.
    ///
    /// Used when the panel's view was recycled for another row; the caller
    /// re-applies the new row's state.
    pub fn discard(&mut self, panel: PanelHandle) -> Option<PanelAnimation> {
        self.active.remove(&panel)
    }

    /// Drop every running animation, returning them in panel order.
    pub fn discard_all(&mut self) -> Vec<PanelAnimation> {
        let mut dropped: Vec<(PanelHandle, PanelAnimation)> = self.active.drain().collect();
        dropped.sort_by_key(|&(panel, _)| panel);
        dropped.into_iter().map(|(_, animation)| animation).collect()
    }

    /// Advance all animations to `now_ms`.
    ///
    /// Panels receive their interpolated height; finished ones receive their
    /// final visual and are returned in panel order. Finished expansions are
    /// scrolled into view when adjust-to-fit is on.
    pub fn tick<H: RowRenderer + ListScroller>(
        &mut self,
        now_ms: u64,
        host: &mut H,
    ) -> Vec<CompletedAnimation> {
        let mut panels: Vec<PanelHandle> = self.active.keys().copied().collect();
        panels.sort();

        let mut completed = Vec::new();
        for panel in panels {
            let Some(animation) = self.active.get(&panel).copied() else {
                continue;
            };

            if !animation.tween.is_done(now_ms) {
                let height = height_of(animation.tween.sample(now_ms));
                host.apply_panel(panel, PanelVisual::shown(height));
                continue;
            }

            self.active.remove(&panel);
            match animation.kind {
                TransitionType::Expand => {
                    host.apply_panel(panel, PanelVisual::shown(animation.full_height));
                    if self.adjust_to_fit {
                        let duration = u32::try_from(animation.tween.duration_ms).unwrap_or(u32::MAX);
                        scroll_into_view(panel, duration, host);
                    }
                }
                TransitionType::Collapse => host.apply_panel(panel, PanelVisual::HIDDEN),
            }

            completed.push(CompletedAnimation {
                panel,
                position: animation.position,
                kind: animation.kind,
                notify_on_end: animation.notify_on_end,
            });
        }
        completed
    }
}

/// Scroll needed to bring a freshly expanded panel into view.
///
/// - Fully visible: no scroll.
/// - Taller than the viewport, or starting above it: align its top with the
///   viewport top.
/// - Overflowing the bottom: align its bottom with the viewport bottom.
pub fn scroll_adjustment(panel: PanelBounds, viewport: ViewportBounds) -> Option<i32> {
    let PanelBounds { top, bottom } = panel;
    let height = viewport.height;

    if top >= 0 && bottom <= height {
        None
    } else if bottom - top > height || top < 0 {
        Some(top)
    } else if bottom > height {
        Some(bottom - height)
    } else {
        None
    }
}

fn scroll_into_view<H: RowRenderer + ListScroller>(
    panel: PanelHandle,
    duration_ms: u32,
    host: &mut H,
) {
    let Some(bounds) = host.panel_bounds(panel) else {
        return;
    };
    if let Some(delta) = scroll_adjustment(bounds, host.viewport_bounds()) {
        debug!(panel = panel.id(), delta, "Scrolling expanded panel into view");
        host.scroll_by(delta, duration_ms);
    }
}

fn height_of(value: u64) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

// ===== Tests =====

#[cfg(test)]
#[path = "animation_tests.rs"]
mod tests;
