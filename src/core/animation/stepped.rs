//=========================================================================
// Stepped Strategy
//=========================================================================
//
// Frame-stepped transitions driven by an explicit elapsed-time
// accumulator.
//
// Each `advance(dt)`:
//   elapsed += dt
//   elapsed <  duration → write eased pose (unclamped lerp)
//   elapsed >= duration → snap end pose, hand back completion
//
// Hide additionally deactivates the surface once it finishes.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{prepare_show, AnimationDriver, Completion, ScaleTarget, TransitionParams, WindowVisuals};
use crate::core::easing::{lerp_unclamped, Easing};
use crate::core::surface::Color;

//=== Direction ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Show,
    Hide,
}

//=== SteppedRun ==========================================================

/// State of one in-flight transition.
#[derive(Debug, Clone, Copy)]
struct SteppedRun {
    direction: Direction,
    elapsed: f32,
    duration: f32,
    easing: Easing,
    scale_target: ScaleTarget,
    scale: (f32, f32),
    fade: Option<(Color, Color)>,
    on_complete: Completion,
}

impl SteppedRun {
    fn new(direction: Direction, params: &TransitionParams, on_complete: Completion) -> Self {
        let baseline = params.fade_baseline();
        let transparent = baseline.with_alpha(0.0);

        let (scale, fade) = match direction {
            Direction::Show => ((0.0, 1.0), (transparent, baseline)),
            Direction::Hide => ((1.0, 0.0), (baseline, transparent)),
        };

        Self {
            direction,
            elapsed: 0.0,
            duration: params.duration,
            easing: params.easing,
            scale_target: params.scale_target,
            scale,
            fade: params.has_fade.then_some(fade),
            on_complete,
        }
    }

    fn write_progress(&self, visuals: &mut WindowVisuals) {
        let progress = self.easing.apply(self.elapsed / self.duration);

        visuals.set_scale_of(self.scale_target, lerp_unclamped(self.scale.0, self.scale.1, progress));
        if let Some((from, to)) = self.fade {
            visuals.set_fade_color(from.lerp_unclamped(to, progress));
        }
    }

    fn write_end(&self, visuals: &mut WindowVisuals) {
        visuals.set_scale_of(self.scale_target, self.scale.1);
        if let Some((_, to)) = self.fade {
            visuals.set_fade_color(to);
        }
    }
}

//=== SteppedDriver =======================================================

/// Animation driver stepping transitions once per tick.
#[derive(Debug, Default)]
pub struct SteppedDriver {
    run: Option<SteppedRun>,
}

impl SteppedDriver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AnimationDriver for SteppedDriver {
    fn animate_show(
        &mut self,
        params: &TransitionParams,
        visuals: &mut WindowVisuals,
        on_complete: Completion,
    ) {
        prepare_show(params, visuals);
        // Replacing the run stops the previous one where it stands.
        self.run = Some(SteppedRun::new(Direction::Show, params, on_complete));
    }

    fn animate_hide(
        &mut self,
        params: &TransitionParams,
        _visuals: &mut WindowVisuals,
        on_complete: Completion,
    ) {
        self.run = Some(SteppedRun::new(Direction::Hide, params, on_complete));
    }

    fn advance(&mut self, dt: f32, visuals: &mut WindowVisuals) -> Option<Completion> {
        let run = self.run.as_mut()?;
        run.elapsed += dt;

        if run.elapsed < run.duration {
            run.write_progress(visuals);
            return None;
        }

        let run = self.run.take()?;
        run.write_end(visuals);
        if run.direction == Direction::Hide {
            visuals.surface.set_active(false);
        }

        Some(run.on_complete)
    }

    fn cancel(&mut self) {
        self.run = None;
    }

    fn is_animating(&self) -> bool {
        self.run.is_some()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
