//=========================================================================
// Sequence Strategy
//=========================================================================
//
// Composable tween sequences and the driver built on them.
//
// Architecture:
//   Sequence
//     ├─ tracks: Vec<Track>   (each track = one tween placed on a timeline)
//     ├─ append(tween)        starts after the current end
//     ├─ join(tween)          starts with the previously placed tween
//     └─ on_complete(c)       handed back once, when the timeline ends
//
//   SequenceDriver keeps at most one Sequence. A new transition first
//   completes the previous sequence without callbacks, snapping it to its
//   end pose, then builds and plays its own.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{prepare_show, AnimationDriver, Completion, ScaleTarget, TransitionParams, WindowVisuals};
use crate::core::easing::{lerp_unclamped, Easing};
use crate::core::surface::Color;

//=== Tween ===============================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum TweenProperty {
    Scale {
        target: ScaleTarget,
        from: f32,
        to: f32,
    },
    Fade {
        from: Color,
        to: Color,
    },
}

/// A single interpolation of one visual property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    property: TweenProperty,
    duration: f32,
    easing: Easing,
}

impl Tween {
    /// Scales `target` from `from` to `to`.
    pub fn scale(target: ScaleTarget, from: f32, to: f32, duration: f32) -> Self {
        Self {
            property: TweenProperty::Scale { target, from, to },
            duration,
            easing: Easing::Linear,
        }
    }

    /// Tints the fade surface from `from` to `to`.
    pub fn fade(from: Color, to: Color, duration: f32) -> Self {
        Self {
            property: TweenProperty::Fade { from, to },
            duration,
            easing: Easing::Linear,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Writes the pose at `local` progress, in `[0, 1]`.
    fn apply(&self, local: f32, visuals: &mut WindowVisuals) {
        let finished = local >= 1.0;
        let eased = self.easing.apply(local);

        match self.property {
            TweenProperty::Scale { target, from, to } => {
                let scale = if finished { to } else { lerp_unclamped(from, to, eased) };
                visuals.set_scale_of(target, scale);
            }
            TweenProperty::Fade { from, to } => {
                let color = if finished { to } else { from.lerp_unclamped(to, eased) };
                visuals.set_fade_color(color);
            }
        }
    }
}

//=== Track ===============================================================

#[derive(Debug, Clone, Copy)]
struct Track {
    tween: Tween,
    start: f32,
}

impl Track {
    fn end(&self) -> f32 {
        self.start + self.tween.duration.max(0.0)
    }

    fn apply_at(&self, time: f32, visuals: &mut WindowVisuals) {
        if time < self.start {
            return;
        }

        let local = if self.tween.duration <= 0.0 {
            1.0
        } else {
            ((time - self.start) / self.tween.duration).min(1.0)
        };

        self.tween.apply(local, visuals);
    }
}

//=== Sequence ============================================================

/// Timeline of tweens with a single completion.
#[derive(Debug, Default)]
pub struct Sequence {
    tracks: Vec<Track>,
    last_start: f32,
    end: f32,
    elapsed: f32,
    playing: bool,
    on_complete: Option<Completion>,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places `tween` after everything already in the sequence.
    pub fn append(&mut self, tween: Tween) -> &mut Self {
        let start = self.end;
        self.place(tween, start)
    }

    /// Places `tween` alongside the most recently placed tween.
    pub fn join(&mut self, tween: Tween) -> &mut Self {
        let start = self.last_start;
        self.place(tween, start)
    }

    pub fn on_complete(&mut self, completion: Completion) -> &mut Self {
        self.on_complete = Some(completion);
        self
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Total length of the timeline in seconds.
    pub fn duration(&self) -> f32 {
        self.end
    }

    /// Advances the timeline; returns the completion when it ends.
    pub fn advance(&mut self, dt: f32, visuals: &mut WindowVisuals) -> Option<Completion> {
        if !self.playing {
            return None;
        }

        self.elapsed += dt;
        let time = self.elapsed.min(self.end);
        for track in &self.tracks {
            track.apply_at(time, visuals);
        }

        if self.elapsed >= self.end {
            self.playing = false;
            return self.on_complete.take();
        }

        None
    }

    /// Jumps every track to its end pose and stops.
    ///
    /// The completion is returned only if `with_callbacks` is set;
    /// otherwise it is discarded.
    pub fn complete(&mut self, with_callbacks: bool, visuals: &mut WindowVisuals) -> Option<Completion> {
        for track in &self.tracks {
            track.apply_at(track.end(), visuals);
        }

        self.elapsed = self.end;
        self.playing = false;

        let completion = self.on_complete.take();
        if with_callbacks {
            completion
        } else {
            None
        }
    }

    fn place(&mut self, tween: Tween, start: f32) -> &mut Self {
        let track = Track { tween, start };
        self.end = self.end.max(track.end());
        self.last_start = start;
        self.tracks.push(track);
        self
    }
}

//=== SequenceDriver ======================================================

/// Animation driver composing scale and fade tweens into a sequence.
#[derive(Debug, Default)]
pub struct SequenceDriver {
    sequence: Option<Sequence>,
}

impl SequenceDriver {
    pub fn new() -> Self {
        Self::default()
    }

    fn supersede(&mut self, visuals: &mut WindowVisuals) {
        if let Some(mut previous) = self.sequence.take() {
            previous.complete(false, visuals);
        }
    }
}

impl AnimationDriver for SequenceDriver {
    fn animate_show(
        &mut self,
        params: &TransitionParams,
        visuals: &mut WindowVisuals,
        on_complete: Completion,
    ) {
        self.supersede(visuals);
        prepare_show(params, visuals);

        let mut sequence = Sequence::new();
        sequence.append(
            Tween::scale(params.scale_target, 0.0, 1.0, params.duration).with_easing(params.easing),
        );
        if params.has_fade {
            let baseline = params.fade_baseline();
            sequence.join(
                Tween::fade(baseline.with_alpha(0.0), baseline, params.duration)
                    .with_easing(params.easing),
            );
        }
        sequence.on_complete(on_complete).play();

        self.sequence = Some(sequence);
    }

    fn animate_hide(
        &mut self,
        params: &TransitionParams,
        visuals: &mut WindowVisuals,
        on_complete: Completion,
    ) {
        self.supersede(visuals);

        let mut sequence = Sequence::new();
        let current_scale = visuals.scale_of(params.scale_target);
        sequence.append(
            Tween::scale(params.scale_target, current_scale, 0.0, params.duration)
                .with_easing(params.easing),
        );
        if params.has_fade {
            let from = visuals.fade_color().unwrap_or_else(|| params.fade_baseline());
            let to = params.fade_baseline().with_alpha(0.0);
            sequence.join(Tween::fade(from, to, params.duration).with_easing(params.easing));
        }
        sequence.on_complete(on_complete).play();

        self.sequence = Some(sequence);
    }

    fn advance(&mut self, dt: f32, visuals: &mut WindowVisuals) -> Option<Completion> {
        let sequence = self.sequence.as_mut()?;
        let completion = sequence.advance(dt, visuals);

        if !sequence.is_playing() {
            self.sequence = None;
        }

        completion
    }

    fn cancel(&mut self) {
        self.sequence = None;
    }

    fn is_animating(&self) -> bool {
        self.sequence.is_some()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
