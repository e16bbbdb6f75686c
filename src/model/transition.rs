//! Expand/collapse transition table.
//!
//! Every row moves through four phases:
//!
//! ```text
//! Collapsed --toggle--> Expanding --animation end--> Expanded
//! Expanded  --toggle--> Collapsing --animation end--> Collapsed
//! ```
//!
//! A toggle that arrives while a row is `Expanding` or `Collapsing` is not
//! applied; it is deferred and replayed once the animation ends, entering the
//! table again from the new settled phase. The machine is cyclic.

/// Kind of transition dispatched for a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionType {
    /// Panel grows from zero to its measured height and stays visible.
    Expand,
    /// Panel shrinks from its height to zero and is hidden at completion.
    Collapse,
}

impl TransitionType {
    /// Transition that a toggle produces for a row that is currently `expanded`.
    pub fn for_toggle(expanded: bool) -> Self {
        if expanded {
            Self::Collapse
        } else {
            Self::Expand
        }
    }

    /// Whether the panel is expanded once this transition settles.
    pub fn settles_expanded(self) -> bool {
        matches!(self, Self::Expand)
    }

    /// The reverse transition.
    pub fn opposite(self) -> Self {
        match self {
            Self::Expand => Self::Collapse,
            Self::Collapse => Self::Expand,
        }
    }
}

/// Visual phase of a single row's panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PanelPhase {
    /// Hidden, no animation running.
    #[default]
    Collapsed,
    /// Growing toward its full height.
    Expanding,
    /// Fully visible, no animation running.
    Expanded,
    /// Shrinking toward zero.
    Collapsing,
}

/// What a toggle does to a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleDecision {
    /// Start the given transition now.
    Start(TransitionType),
    /// An animation is in flight; replay the toggle when it ends.
    Defer,
}

impl PanelPhase {
    /// Settled phase for a stored expanded flag.
    pub fn settled(expanded: bool) -> Self {
        if expanded {
            Self::Expanded
        } else {
            Self::Collapsed
        }
    }

    /// Phase while `kind` is animating.
    pub fn in_flight(kind: TransitionType) -> Self {
        match kind {
            TransitionType::Expand => Self::Expanding,
            TransitionType::Collapse => Self::Collapsing,
        }
    }

    /// Whether an animation is running.
    pub fn is_in_flight(self) -> bool {
        matches!(self, Self::Expanding | Self::Collapsing)
    }

    /// Whether the panel is (or is becoming) visible.
    pub fn is_open(self) -> bool {
        matches!(self, Self::Expanding | Self::Expanded)
    }

    /// Apply a toggle.
    pub fn on_toggle(self) -> ToggleDecision {
        match self {
            Self::Collapsed => ToggleDecision::Start(TransitionType::Expand),
            Self::Expanded => ToggleDecision::Start(TransitionType::Collapse),
            Self::Expanding | Self::Collapsing => ToggleDecision::Defer,
        }
    }

    /// Apply the end of the running animation. Settled phases are unchanged.
    pub fn on_animation_end(self) -> Self {
        match self {
            Self::Expanding => Self::Expanded,
            Self::Collapsing => Self::Collapsed,
            settled => settled,
        }
    }
}
