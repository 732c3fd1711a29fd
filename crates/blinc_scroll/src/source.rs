//! What caused an offset change, and the derived scroll state

/// Origin of an offset change.
///
/// The source selects the policy applied to a delta: whether it is damped by
/// overscroll friction, clamped to the content bounds, or allowed to trigger
/// snapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollSource {
    #[default]
    None,
    /// Finger or pointer drag
    Update,
    /// Fling or snap motion
    Animation,
    /// Edge spring-back
    AnimationSpring,
    /// Programmatic jump
    Jump,
    /// Delta handed over by a nested child
    Child,
    /// Scrollbar thumb drag
    Bar,
    /// Scrollbar release with velocity
    BarFling,
    /// Scroll to reveal a focused item
    FocusJump,
    /// Rotary crown or knob
    Rotate,
    /// Alphabet indexer jump
    Indexer,
    /// Gesture start marker; carries no delta
    Start,
    /// Mouse wheel or axis event
    Axis,
    /// Animation started through a controller
    AnimationController,
}

impl ScrollSource {
    /// Physics-driven moves are never damped again by overscroll friction
    pub fn is_physics(&self) -> bool {
        matches!(self, ScrollSource::Animation | ScrollSource::AnimationSpring)
    }

    /// Sources that must stay inside the content bounds whatever edge effect
    /// is installed
    pub fn requires_restrict(&self) -> bool {
        matches!(
            self,
            ScrollSource::Bar | ScrollSource::BarFling | ScrollSource::Rotate | ScrollSource::Axis
        )
    }

    /// Sources a spring edge effect lets travel past the bounds
    pub fn allows_spring_overscroll(&self) -> bool {
        matches!(
            self,
            ScrollSource::Update | ScrollSource::Animation | ScrollSource::AnimationSpring
        )
    }

    /// Sources a fade edge effect absorbs at the boundary
    pub fn feeds_fade(&self) -> bool {
        matches!(self, ScrollSource::Update | ScrollSource::Animation)
    }

    /// Sources that pass `onScrollFrameBegin` before being applied
    pub fn is_frame_correctable(&self) -> bool {
        matches!(
            self,
            ScrollSource::Update
                | ScrollSource::Animation
                | ScrollSource::Axis
                | ScrollSource::Bar
                | ScrollSource::Rotate
        )
    }

    /// Sources whose gesture end may land on a snap offset
    pub fn can_trigger_snap(&self) -> bool {
        matches!(
            self,
            ScrollSource::Update | ScrollSource::Bar | ScrollSource::Axis | ScrollSource::Rotate
        )
    }
}

/// Scroll state reported to callbacks. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScrollState {
    /// No drag and no motion
    #[default]
    Idle,
    /// Drag or update in progress
    Scroll,
    /// Released; fling, spring or snap motion running
    Fling,
}

impl ScrollState {
    /// Derive the state from what is currently running
    pub fn derive(dragging: bool, animating: bool) -> Self {
        if animating {
            ScrollState::Fling
        } else if dragging {
            ScrollState::Scroll
        } else {
            ScrollState::Idle
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, ScrollState::Idle)
    }
}
