//=========================================================================
// Surface Capabilities
//=========================================================================
//
// Visual capabilities the host environment provides to the window core.
//
// The core never renders anything itself. It activates and deactivates
// surfaces, scales nodes, and tints fade overlays through these traits.
// Hosts implement them over whatever retained scene graph they own.
//
// Ownership:
//   Window ─┬─ Box<dyn Surface>       (root, always present)
//           ├─ Box<dyn FadeSurface>   (optional backdrop)
//           └─ Box<dyn Scalable>      (optional independently scaled content)
//
//   WindowService ── Box<dyn RootSurface>  (common parent of all windows)
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::config::CanvasSettings;
use crate::core::easing::lerp_unclamped;

//=== Color ===============================================================

/// Linear RGBA color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const CLEAR: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Component-wise interpolation; `t` is not clamped.
    pub fn lerp_unclamped(self, to: Color, t: f32) -> Color {
        Color {
            r: lerp_unclamped(self.r, to.r, t),
            g: lerp_unclamped(self.g, to.g, t),
            b: lerp_unclamped(self.b, to.b, t),
            a: lerp_unclamped(self.a, to.a, t),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

//=== Scalable ============================================================

/// A node with a uniform local scale.
pub trait Scalable {
    fn scale(&self) -> f32;
    fn set_scale(&mut self, scale: f32);
}

//=== Surface =============================================================

/// The root visual of a window.
///
/// Deactivated surfaces are neither drawn nor hit-tested by the host.
pub trait Surface: Scalable {
    fn is_active(&self) -> bool;
    fn set_active(&mut self, active: bool);

    /// Moves this surface under `parent`.
    ///
    /// With `world_position_stays == false` the local transform is kept
    /// and the world placement follows the new parent.
    fn reparent(&mut self, parent: &dyn RootSurface, world_position_stays: bool);

    /// Releases the host object. The surface must not be used afterwards.
    fn destroy(&mut self);
}

//=== FadeSurface =========================================================

/// A tinted overlay faded in behind a window's content.
pub trait FadeSurface {
    fn color(&self) -> Color;
    fn set_color(&mut self, color: Color);
}

//=== RootSurface =========================================================

/// Common parent container for every registered window.
pub trait RootSurface {
    fn name(&self) -> &str;

    /// Applies render mode and sort priority from configuration.
    fn configure(&mut self, settings: &CanvasSettings);

    fn destroy(&mut self);
}

//=========================================================================
// Unit Tests
//=========================================================================
