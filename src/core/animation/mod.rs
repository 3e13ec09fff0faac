//=========================================================================
// Animation Driver
//=========================================================================
//
// Runs one timed show/hide transition for a single window.
//
// Architecture:
//   Window ──animate_show/hide(params, visuals, completion)──> driver
//      ↑                                                         │
//      └──────── Some(completion) ←── advance(dt, visuals) ──────┘
//
// The completion callback is modelled as data: the window hands the
// driver a `Completion` and gets it back, exactly once, on the tick the
// transition finishes. Superseded or cancelled transitions never hand
// their completion back, so lifecycle events cannot fire twice.
//
// Strategies (chosen at construction time via `AnimationBackend`):
//   SequenceDriver  composable tween sequence, joined tracks
//   SteppedDriver   elapsed-time accumulator + easing table
//
//=========================================================================

//=== Module Declarations =================================================

mod sequence;
mod stepped;

//=== External Dependencies ===============================================

use serde::Deserialize;

//=== Internal Dependencies ===============================================

use crate::core::easing::Easing;
use crate::core::surface::{Color, FadeSurface, Scalable, Surface};

//=== Public API ==========================================================

pub use sequence::{Sequence, SequenceDriver, Tween};
pub use stepped::SteppedDriver;

//=== AnimationBackend ====================================================

/// Selects which driver strategy a window uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationBackend {
    /// Tween sequence with joined scale and fade tracks.
    Sequence,

    /// Frame-stepped accumulator.
    #[default]
    Stepped,
}

impl AnimationBackend {
    /// Creates a fresh driver for this strategy.
    pub fn create_driver(self) -> Box<dyn AnimationDriver> {
        match self {
            Self::Sequence => Box::new(SequenceDriver::new()),
            Self::Stepped => Box::new(SteppedDriver::new()),
        }
    }
}

//=== Completion ==========================================================

/// The lifecycle step to run once a transition finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Shown,
    Hidden,
}

//=== ScaleTarget =========================================================

/// Which node a transition scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleTarget {
    /// The window's own root surface.
    Root,

    /// The independently scaled content node.
    Content,
}

//=== WindowVisuals =======================================================

/// Host visuals a window animates.
pub struct WindowVisuals {
    pub surface: Box<dyn Surface>,
    pub fade: Option<Box<dyn FadeSurface>>,
    pub scalable_content: Option<Box<dyn Scalable>>,
}

impl WindowVisuals {
    pub fn new(surface: Box<dyn Surface>) -> Self {
        Self {
            surface,
            fade: None,
            scalable_content: None,
        }
    }

    pub fn with_fade(mut self, fade: Box<dyn FadeSurface>) -> Self {
        self.fade = Some(fade);
        self
    }

    pub fn with_scalable_content(mut self, content: Box<dyn Scalable>) -> Self {
        self.scalable_content = Some(content);
        self
    }

    /// Content node if configured, otherwise the root.
    pub fn scale_target(&self) -> ScaleTarget {
        if self.scalable_content.is_some() {
            ScaleTarget::Content
        } else {
            ScaleTarget::Root
        }
    }

    pub(crate) fn scale_of(&self, target: ScaleTarget) -> f32 {
        match (target, &self.scalable_content) {
            (ScaleTarget::Content, Some(content)) => content.scale(),
            _ => self.surface.scale(),
        }
    }

    pub(crate) fn set_scale_of(&mut self, target: ScaleTarget, scale: f32) {
        match (target, &mut self.scalable_content) {
            (ScaleTarget::Content, Some(content)) => content.set_scale(scale),
            _ => self.surface.set_scale(scale),
        }
    }

    pub(crate) fn fade_color(&self) -> Option<Color> {
        self.fade.as_ref().map(|fade| fade.color())
    }

    pub(crate) fn set_fade_color(&mut self, color: Color) {
        if let Some(fade) = self.fade.as_mut() {
            fade.set_color(color);
        }
    }
}

//=== TransitionParams ====================================================

/// Parameters of a single show or hide transition.
///
/// Built fresh for every call and discarded once the transition
/// completes or is superseded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionParams {
    pub duration: f32,
    pub easing: Easing,

    /// Captured fade baseline; `None` falls back to white.
    pub default_fade_color: Option<Color>,

    pub has_fade: bool,
    pub scale_target: ScaleTarget,
}

impl TransitionParams {
    pub fn new(
        duration: f32,
        easing: Easing,
        default_fade_color: Option<Color>,
        visuals: &WindowVisuals,
    ) -> Self {
        Self {
            duration,
            easing,
            default_fade_color,
            has_fade: visuals.fade.is_some(),
            scale_target: visuals.scale_target(),
        }
    }

    /// Fade color shown at the end of a show transition.
    pub fn fade_baseline(&self) -> Color {
        self.default_fade_color.unwrap_or(Color::WHITE)
    }
}

//=== AnimationDriver =====================================================

/// Contract shared by every animation strategy.
///
/// At most one transition is active per driver. Starting a new one
/// supersedes the previous one synchronously, without returning its
/// completion.
pub trait AnimationDriver {
    /// Snaps to the hidden pose, activates the surface and animates in.
    fn animate_show(
        &mut self,
        params: &TransitionParams,
        visuals: &mut WindowVisuals,
        on_complete: Completion,
    );

    /// Animates out from the current pose.
    fn animate_hide(
        &mut self,
        params: &TransitionParams,
        visuals: &mut WindowVisuals,
        on_complete: Completion,
    );

    /// Advances the active transition by `dt` seconds.
    ///
    /// Returns the transition's completion on the tick it finishes.
    fn advance(&mut self, dt: f32, visuals: &mut WindowVisuals) -> Option<Completion>;

    /// Drops the active transition where it stands, without completion.
    fn cancel(&mut self);

    fn is_animating(&self) -> bool;
}

//=== Shared Helpers ======================================================

/// Pose every show transition starts from.
fn prepare_show(params: &TransitionParams, visuals: &mut WindowVisuals) {
    if params.has_fade {
        visuals.set_fade_color(params.fade_baseline().with_alpha(0.0));
    }

    visuals.set_scale_of(params.scale_target, 0.0);
    visuals.surface.set_active(true);
}

//=========================================================================
// Unit Tests
//=========================================================================
