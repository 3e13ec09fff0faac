//=========================================================================
// Window Settings
//=========================================================================
//
// Authored per-window parameters: initial visibility and animation.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::animation::AnimationBackend;
use crate::core::easing::Easing;

//=== Constants ===========================================================

/// Transition length used when none is configured.
pub const DEFAULT_ANIMATION_DURATION: f32 = 0.25;

//=== WindowSettings ======================================================

/// Per-window presentation settings.
///
/// # Default Values
///
/// - **start_hidden**: false
/// - **animated**: false
/// - **duration**: 0.25 seconds
/// - **easing**: [`Easing::EaseInOut`]
/// - **backend**: unset (inherits the service configuration)
///
/// # Examples
///
/// ```
/// use aetheric_ui::prelude::*;
///
/// let settings = WindowSettings::new()
///     .start_hidden(true)
///     .animated(true)
///     .with_duration(0.4)
///     .with_easing(Easing::EaseOut);
///
/// assert!(settings.is_animated());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSettings {
    start_hidden: bool,
    animated: bool,
    duration: f32,
    easing: Easing,
    backend: Option<AnimationBackend>,
}

impl WindowSettings {
    pub fn new() -> Self {
        Self {
            start_hidden: false,
            animated: false,
            duration: DEFAULT_ANIMATION_DURATION,
            easing: Easing::default(),
            backend: None,
        }
    }

    //--- Builder ----------------------------------------------------------

    /// Whether readiness applies an instant hide instead of an instant show.
    pub fn start_hidden(mut self, hidden: bool) -> Self {
        self.start_hidden = hidden;
        self
    }

    /// Whether show/hide run an animated transition.
    pub fn animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }

    /// Sets the transition duration in seconds.
    ///
    /// # Panics
    ///
    /// Panics if `seconds` is negative or not finite.
    pub fn with_duration(mut self, seconds: f32) -> Self {
        assert!(
            seconds.is_finite() && seconds >= 0.0,
            "Animation duration must be non-negative, got {}",
            seconds
        );
        self.duration = seconds;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Pins the animation strategy for this window.
    pub fn with_backend(mut self, backend: AnimationBackend) -> Self {
        self.backend = Some(backend);
        self
    }

    //--- Accessors --------------------------------------------------------

    pub fn is_start_hidden(&self) -> bool {
        self.start_hidden
    }

    pub fn is_animated(&self) -> bool {
        self.animated
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn backend(&self) -> Option<AnimationBackend> {
        self.backend
    }

    /// Fills in the backend if none was pinned.
    pub(crate) fn inherit_backend(&mut self, backend: AnimationBackend) {
        self.backend.get_or_insert(backend);
    }
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
