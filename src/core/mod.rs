//=========================================================================
// Core
//
// Window lifecycle, animation and navigation.
//
// Responsibilities:
// - Drive each window through its show/hide state machine
// - Animate transitions with interchangeable driver strategies
// - Own registered windows and the single-top navigation history
// - Talk to the host only through the contracts in `host` and `surface`
//
// Notes:
// Everything here runs on the host's logic thread. Nothing advances on
// its own: the host calls `WindowService::tick` once per frame.
//
//=========================================================================

//=== Public Modules ======================================================

pub mod animation;
pub mod easing;
pub mod host;
pub mod registry;
pub mod surface;
pub mod window;

//=== Test Support ========================================================

#[cfg(test)]
pub(crate) mod testing;
