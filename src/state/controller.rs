//! Binding rendered rows to expand state and dispatching toggles.
//!
//! The renderer calls [`ExpansionController::bind`] for every row it draws,
//! including when it reuses a row view for a different position. The
//! controller keeps a transient table from panel handle to the position it
//! currently shows; that table is rebuilt by binds and never used as row
//! identity. Expand state itself lives in the position-indexed
//! [`ExpandStateStore`].
//!
//! # Re-entrancy
//!
//! A toggle activated while its panel is animating is deferred: exactly one
//! activation is queued per panel and replayed when the animation completes.
//! Further activations while one is queued are dropped.

use crate::model::{
    ActionId, ExpandError, PanelHandle, PanelPhase, PersistError, Position, ToggleDecision,
    ToggleHandle, TransitionType,
};
use crate::state::actions::ActionDispatcher;
use crate::state::animation::{AnimationCoordinator, AnimationRequest, CompletedAnimation};
use crate::state::expand_store::ExpandStateStore;
use crate::state::host::{ListScroller, PanelVisual, RowRenderer};
use crate::state::listener::{
    ActionListener, AnimationListener, ExpandCollapseListener, ListenerTiming,
};
use crate::state::persistence::{self, SavedStateSnapshot};
use crate::state::tween::Easing;
use std::collections::HashMap;
use tracing::{debug, info};

/// Default animation duration in milliseconds.
pub const DEFAULT_ANIMATION_DURATION_MS: u32 = 330;

// ===== ExpandOptions =====

/// Behavioural knobs of an [`ExpansionController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandOptions {
    /// Length of expand/collapse animations.
    pub animation_duration_ms: u32,
    /// Whether opening a row collapses the previously open one.
    pub single_open: bool,
    /// Whether expanded panels are scrolled into view.
    pub adjust_to_fit: bool,
    /// When the expand/collapse listener is notified.
    pub listener_timing: ListenerTiming,
    /// Animation curve.
    pub easing: Easing,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self {
            animation_duration_ms: DEFAULT_ANIMATION_DURATION_MS,
            single_open: true,
            adjust_to_fit: true,
            listener_timing: ListenerTiming::Dispatch,
            easing: Easing::default(),
        }
    }
}

/// Result of activating a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// The transition was dispatched.
    Dispatched(TransitionType),
    /// The panel is animating; the activation will be replayed.
    Deferred,
    /// An activation is already queued for the panel; this one was dropped.
    Dropped,
    /// The toggle is not bound to a displayed row.
    Unbound,
}

/// Transient association of a panel handle with the row it displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PanelSlot {
    position: Position,
    toggle: ToggleHandle,
    pending: bool,
}

// ===== ExpansionController =====

/// Owns the expand state of one list and drives its panels.
pub struct ExpansionController {
    store: ExpandStateStore,
    animator: AnimationCoordinator,
    panels: HashMap<PanelHandle, PanelSlot>,
    by_position: HashMap<Position, PanelHandle>,
    toggles: HashMap<ToggleHandle, PanelHandle>,
    animation_duration_ms: u32,
    listener_timing: ListenerTiming,
    listener: Option<Box<dyn ExpandCollapseListener>>,
    animation_listener: Option<Box<dyn AnimationListener>>,
    actions: ActionDispatcher,
}

impl std::fmt::Debug for ExpansionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpansionController")
            .field("store", &self.store)
            .field("animator", &self.animator)
            .field("panels", &self.panels)
            .field("animation_duration_ms", &self.animation_duration_ms)
            .field("listener_timing", &self.listener_timing)
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}

impl Default for ExpansionController {
    fn default() -> Self {
        Self::new(ExpandOptions::default())
    }
}

impl ExpansionController {
    /// Create a controller with empty state.
    pub fn new(options: ExpandOptions) -> Self {
        Self {
            store: ExpandStateStore::new(options.single_open),
            animator: AnimationCoordinator::new(options.easing, options.adjust_to_fit),
            panels: HashMap::new(),
            by_position: HashMap::new(),
            toggles: HashMap::new(),
            animation_duration_ms: options.animation_duration_ms,
            listener_timing: options.listener_timing,
            listener: None,
            animation_listener: None,
            actions: ActionDispatcher::default(),
        }
    }

    // ===== Queries =====

    /// Read access to the expand state.
    pub fn store(&self) -> &ExpandStateStore {
        &self.store
    }

    /// Whether `pos` is expanded (or expanding).
    pub fn is_expanded(&self, pos: Position) -> bool {
        self.store.is_expanded(pos)
    }

    /// Whether any row is expanded.
    pub fn is_any_expanded(&self) -> bool {
        self.store.is_any_expanded()
    }

    /// The open row in single-open mode.
    pub fn last_open(&self) -> Option<Position> {
        self.store.last_open()
    }

    /// Visual phase of `pos`.
    pub fn phase(&self, pos: Position) -> PanelPhase {
        match self.by_position.get(&pos) {
            Some(&panel) => self.phase_of_panel(panel, pos),
            None => PanelPhase::settled(self.store.is_expanded(pos)),
        }
    }

    /// Whether any panel is animating.
    pub fn is_animating(&self) -> bool {
        self.animator.active_count() > 0
    }

    /// Position currently shown by `panel`, as of its last bind.
    pub fn bound_position(&self, panel: PanelHandle) -> Option<Position> {
        self.panels.get(&panel).map(|slot| slot.position)
    }

    /// Whether an activation is queued for `panel`.
    pub fn has_pending_activation(&self, panel: PanelHandle) -> bool {
        self.panels.get(&panel).is_some_and(|slot| slot.pending)
    }

    // ===== Configuration =====

    /// Current animation duration.
    pub fn animation_duration(&self) -> u32 {
        self.animation_duration_ms
    }

    /// Change the animation duration.
    ///
    /// # Errors
    ///
    /// Returns [`ExpandError::InvalidDuration`] for negative values; the
    /// previous duration stays in effect.
    pub fn set_animation_duration(&mut self, ms: i64) -> Result<(), ExpandError> {
        if ms < 0 {
            return Err(ExpandError::InvalidDuration(ms));
        }
        self.animation_duration_ms = u32::try_from(ms).unwrap_or(u32::MAX);
        Ok(())
    }

    /// Whether single-open mode is active.
    pub fn single_open_mode(&self) -> bool {
        self.store.single_open()
    }

    /// Switch single-open mode.
    ///
    /// Enabling it while several rows are open keeps the highest one and
    /// collapses the rest; their listeners are notified and their panels snap
    /// closed on the next bind. Returns the collapsed positions.
    pub fn set_single_open_mode(&mut self, single_open: bool) -> Vec<Position> {
        let collapsed = self.store.set_single_open(single_open);
        for &pos in &collapsed {
            self.notify(TransitionType::Collapse, pos);
        }
        collapsed
    }

    /// Whether expanded panels are scrolled into view.
    pub fn adjust_to_fit(&self) -> bool {
        self.animator.adjust_to_fit()
    }

    /// Switch scroll-into-view on or off.
    pub fn set_adjust_to_fit(&mut self, adjust_to_fit: bool) {
        self.animator.set_adjust_to_fit(adjust_to_fit);
    }

    /// When the expand/collapse listener is notified.
    pub fn listener_timing(&self) -> ListenerTiming {
        self.listener_timing
    }

    /// Change when the expand/collapse listener is notified.
    pub fn set_listener_timing(&mut self, timing: ListenerTiming) {
        self.listener_timing = timing;
    }

    /// Change the animation curve.
    pub fn set_easing(&mut self, easing: Easing) {
        self.animator.set_easing(easing);
    }

    /// Install the expand/collapse listener.
    pub fn set_expand_collapse_listener(&mut self, listener: Box<dyn ExpandCollapseListener>) {
        self.listener = Some(listener);
    }

    /// Remove the expand/collapse listener.
    pub fn remove_expand_collapse_listener(&mut self) {
        self.listener = None;
    }

    /// Install the animation lifecycle listener.
    pub fn set_animation_listener(&mut self, listener: Box<dyn AnimationListener>) {
        self.animation_listener = Some(listener);
    }

    /// Remove the animation lifecycle listener.
    pub fn remove_animation_listener(&mut self) {
        self.animation_listener = None;
    }

    /// Route presses of the given action buttons to `listener`.
    pub fn set_action_listener(
        &mut self,
        listener: Box<dyn ActionListener>,
        ids: impl IntoIterator<Item = ActionId>,
    ) {
        self.actions.set_listener(listener, ids);
    }

    /// Remove the action listener.
    pub fn remove_action_listener(&mut self) {
        self.actions.clear();
    }

    // ===== Binding =====

    /// Bind a freshly rendered row.
    ///
    /// Must be called on every render of a row, including when `toggle` and
    /// `panel` previously showed another position. Stale animation and queued
    /// activations of a recycled panel are discarded and the row's current
    /// state is applied instantly. A panel still animating for the same
    /// position is left alone.
    pub fn bind<H: RowRenderer>(
        &mut self,
        pos: Position,
        toggle: ToggleHandle,
        panel: PanelHandle,
        host: &mut H,
    ) {
        self.toggles.insert(toggle, panel);

        let recycled_from = self
            .panels
            .get(&panel)
            .map(|slot| slot.position)
            .filter(|&previous| previous != pos);
        if let Some(previous) = recycled_from {
            debug!(
                panel = panel.id(),
                from = %previous,
                to = %pos,
                "Panel recycled; discarding stale animation"
            );
            self.discard_animation(panel);
            if self.by_position.get(&previous) == Some(&panel) {
                self.by_position.remove(&previous);
            }
        }

        if let Some(old_panel) = self.by_position.insert(pos, panel) {
            if old_panel != panel {
                debug!(
                    position = %pos,
                    old = old_panel.id(),
                    new = panel.id(),
                    "Row moved to another view"
                );
                self.discard_animation(old_panel);
                self.panels.remove(&old_panel);
            }
        }

        let slot = self.panels.entry(panel).or_insert(PanelSlot {
            position: pos,
            toggle,
            pending: false,
        });
        slot.toggle = toggle;
        if recycled_from.is_some() {
            slot.position = pos;
            slot.pending = false;
        }

        if !self.animator.is_animating(panel) {
            self.apply_instant(pos, toggle, panel, host);
        }
    }

    // ===== Activation =====

    /// Activate the toggle handle (e.g. a click on it).
    ///
    /// The position is resolved through the renderer at this moment, not
    /// taken from an earlier bind.
    pub fn activate<H: RowRenderer + ListScroller>(
        &mut self,
        toggle: ToggleHandle,
        now_ms: u64,
        host: &mut H,
    ) -> Activation {
        let Some(&panel) = self.toggles.get(&toggle) else {
            debug!(toggle = toggle.id(), "Activation of unbound toggle");
            return Activation::Unbound;
        };
        let Some(pos) = host.bound_position(toggle) else {
            debug!(toggle = toggle.id(), "Toggle no longer displays a row");
            return Activation::Unbound;
        };
        if self.bound_position(panel) != Some(pos) {
            self.bind(pos, toggle, panel, host);
        }

        match self.phase_of_panel(panel, pos).on_toggle() {
            ToggleDecision::Defer => self.defer(panel, pos),
            ToggleDecision::Start(_) => self.dispatch_toggle(pos, toggle, panel, now_ms, host),
        }
    }

    /// Activate the row displaying `pos` as a whole (item click / Enter).
    pub fn activate_position<H: RowRenderer + ListScroller>(
        &mut self,
        pos: Position,
        now_ms: u64,
        host: &mut H,
    ) -> Activation {
        match host.toggle_handle(pos) {
            Some(toggle) => self.activate(toggle, now_ms, host),
            None => Activation::Unbound,
        }
    }

    /// Press action button `action` in the row owning `toggle`.
    ///
    /// Only reaches the action listener while that row is expanded.
    pub fn perform_action<H: RowRenderer>(
        &mut self,
        toggle: ToggleHandle,
        action: ActionId,
        host: &H,
    ) -> bool {
        let Some(pos) = host.bound_position(toggle) else {
            return false;
        };
        if !self.store.is_expanded(pos) {
            debug!(position = %pos, "Ignoring action on collapsed panel");
            return false;
        }
        self.actions.dispatch(pos, action)
    }

    /// Collapse whatever is open.
    ///
    /// In multi-open mode every expanded row collapses. Returns `false` when
    /// nothing was open.
    pub fn collapse_currently_open<H: RowRenderer>(&mut self, now_ms: u64, host: &mut H) -> bool {
        let collapsed: Vec<Position> = if self.store.single_open() {
            self.store.collapse_all().into_iter().collect()
        } else {
            self.store.collapse_expanded()
        };

        for &pos in &collapsed {
            self.dispatch_forced_collapse(pos, now_ms, host);
        }
        !collapsed.is_empty()
    }

    // ===== Frame ticking =====

    /// Advance running animations to `now_ms`.
    ///
    /// Completion handling, in order: animation listener, listener
    /// notification for completion timing, replay of a queued activation,
    /// and finally reconciliation toward the stored state if the panel
    /// settled somewhere the store no longer agrees with.
    pub fn tick<H: RowRenderer + ListScroller>(
        &mut self,
        now_ms: u64,
        host: &mut H,
    ) -> Vec<CompletedAnimation> {
        let completed = self.animator.tick(now_ms, host);

        for done in &completed {
            if let Some(listener) = self.animation_listener.as_mut() {
                match done.kind {
                    TransitionType::Expand => listener.on_end_expand(done.position),
                    TransitionType::Collapse => listener.on_end_collapse(done.position),
                }
            }
            if done.notify_on_end {
                self.notify(done.kind, done.position);
            }

            let Some(slot) = self.panels.get_mut(&done.panel) else {
                continue;
            };
            if slot.position != done.position {
                continue;
            }
            let toggle = slot.toggle;

            if std::mem::take(&mut slot.pending) {
                debug!(position = %done.position, "Replaying deferred activation");
                self.activate(toggle, now_ms, host);
                continue;
            }

            let expanded = self.store.is_expanded(done.position);
            if expanded != done.kind.settles_expanded() {
                let kind = TransitionType::for_toggle(!expanded);
                debug!(position = %done.position, ?kind, "Reconciling settled panel");
                self.start_transition(done.position, toggle, done.panel, kind, false, now_ms, host);
            }
        }

        completed
    }

    // ===== Persistence =====

    /// Frozen copy of the expand state.
    pub fn snapshot(&self) -> SavedStateSnapshot {
        self.store.snapshot()
    }

    /// Serialize the expand state for the host's save point.
    pub fn save_state(&self) -> Result<Vec<u8>, PersistError> {
        persistence::serialize(&self.store)
    }

    /// Restore expand state saved by [`save_state`](Self::save_state).
    ///
    /// Absent or corrupt blobs restore an empty state. The current mode and
    /// height cache are kept, running animations and queued activations are
    /// dropped, and panels pick up the restored state on their next bind.
    /// Listeners still waiting on a dropped animation are notified now.
    pub fn restore_state(&mut self, blob: Option<&[u8]>) {
        let snapshot = blob
            .and_then(persistence::decode_logged)
            .unwrap_or_default();
        self.store.restore(&snapshot);
        for dropped in self.animator.discard_all() {
            if dropped.notify_on_end {
                self.notify(dropped.kind, dropped.position);
            }
        }
        for slot in self.panels.values_mut() {
            slot.pending = false;
        }
        info!(
            last_open = ?self.store.last_open(),
            expanded = self.store.expanded_count(),
            "Restored expand state"
        );
    }

    /// Forget every measured panel height.
    ///
    /// Hosts call this when panel content reflows (e.g. a width change).
    /// Panels are measured again the next time they are bound or animated.
    pub fn invalidate_heights(&mut self) {
        debug!("Invalidating cached panel heights");
        self.store.clear_heights();
    }

    // ===== Internals =====

    /// Drop the animation of `panel`, still delivering a completion-timed
    /// notification it owed.
    fn discard_animation(&mut self, panel: PanelHandle) {
        if let Some(dropped) = self.animator.discard(panel) {
            if dropped.notify_on_end {
                self.notify(dropped.kind, dropped.position);
            }
        }
    }

    /// Forget the view association of `pos` after its view was released.
    fn unbind_position(&mut self, pos: Position) {
        if let Some(panel) = self.by_position.remove(&pos) {
            self.discard_animation(panel);
            self.panels.remove(&panel);
        }
    }

    fn phase_of_panel(&self, panel: PanelHandle, pos: Position) -> PanelPhase {
        match self.animator.active(panel) {
            Some(animation) if animation.position == pos => PanelPhase::in_flight(animation.kind),
            _ => PanelPhase::settled(self.store.is_expanded(pos)),
        }
    }

    fn defer(&mut self, panel: PanelHandle, pos: Position) -> Activation {
        let Some(slot) = self.panels.get_mut(&panel) else {
            return Activation::Unbound;
        };
        if slot.pending {
            debug!(position = %pos, "Activation already queued; dropping");
            Activation::Dropped
        } else {
            debug!(position = %pos, "Panel animating; deferring activation");
            slot.pending = true;
            Activation::Deferred
        }
    }

    fn dispatch_toggle<H: RowRenderer>(
        &mut self,
        pos: Position,
        toggle: ToggleHandle,
        panel: PanelHandle,
        now_ms: u64,
        host: &mut H,
    ) -> Activation {
        let (kind, displaced) = self.store.toggle_displacing(pos);
        debug!(position = %pos, ?kind, ?displaced, "Dispatching toggle");

        if let Some(previous) = displaced {
            self.dispatch_forced_collapse(previous, now_ms, host);
        }
        self.start_transition(pos, toggle, panel, kind, true, now_ms, host);
        Activation::Dispatched(kind)
    }

    /// Collapse a row the store already marked collapsed.
    ///
    /// Animates its panel if it is on screen; otherwise the change is
    /// state-only. A panel still animating is reconciled when its animation
    /// ends.
    fn dispatch_forced_collapse<H: RowRenderer>(
        &mut self,
        pos: Position,
        now_ms: u64,
        host: &mut H,
    ) {
        let slot = self
            .by_position
            .get(&pos)
            .and_then(|panel| self.panels.get(panel).map(|slot| (*panel, slot.toggle)));
        let slot = match slot {
            Some((panel, toggle))
                if host.expandable_panel(pos) != Some(panel)
                    || host.bound_position(toggle) != Some(pos) =>
            {
                debug!(position = %pos, "View released by renderer; collapsing state only");
                self.unbind_position(pos);
                None
            }
            slot => slot,
        };

        match slot {
            Some((panel, toggle)) if !self.animator.is_animating(panel) => {
                self.start_transition(pos, toggle, panel, TransitionType::Collapse, true, now_ms, host);
            }
            Some((_, toggle)) => {
                host.set_toggle_selected(toggle, false);
                self.notify(TransitionType::Collapse, pos);
            }
            None => self.notify(TransitionType::Collapse, pos),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn start_transition<H: RowRenderer>(
        &mut self,
        pos: Position,
        toggle: ToggleHandle,
        panel: PanelHandle,
        kind: TransitionType,
        notify: bool,
        now_ms: u64,
        host: &mut H,
    ) {
        host.set_toggle_selected(toggle, kind.settles_expanded());
        let full_height = self.panel_height(pos, panel, host);
        let wait_for_end = notify && self.listener_timing == ListenerTiming::Completion;

        let started = self.animator.animate(
            AnimationRequest {
                panel,
                position: pos,
                kind,
                full_height,
                duration_ms: self.animation_duration_ms,
                notify_on_end: wait_for_end,
            },
            now_ms,
            host,
        );

        if started {
            if let Some(listener) = self.animation_listener.as_mut() {
                match kind {
                    TransitionType::Expand => listener.on_start_expand(pos),
                    TransitionType::Collapse => listener.on_start_collapse(pos),
                }
            }
        }
        if notify && !(started && wait_for_end) {
            self.notify(kind, pos);
        }
    }

    fn apply_instant<H: RowRenderer>(
        &mut self,
        pos: Position,
        toggle: ToggleHandle,
        panel: PanelHandle,
        host: &mut H,
    ) {
        let height = self.panel_height(pos, panel, host);
        let expanded = self.store.is_expanded(pos);
        let visual = if expanded {
            PanelVisual::shown(height)
        } else {
            PanelVisual::HIDDEN
        };
        host.apply_panel(panel, visual);
        host.set_toggle_selected(toggle, expanded);
    }

    fn panel_height<H: RowRenderer>(&mut self, pos: Position, panel: PanelHandle, host: &mut H) -> u16 {
        if let Some(height) = self.store.cached_height(pos) {
            return height;
        }
        let height = host.measure_panel(panel, pos);
        self.store.cache_height(pos, height);
        height
    }

    fn notify(&mut self, kind: TransitionType, pos: Position) {
        if let Some(listener) = self.listener.as_mut() {
            match kind {
                TransitionType::Expand => listener.on_expand(pos),
                TransitionType::Collapse => listener.on_collapse(pos),
            }
        }
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
