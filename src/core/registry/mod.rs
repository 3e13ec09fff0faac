//=========================================================================
// Registry
//=========================================================================
//
// Window ownership, lookup and navigation history.
//
// Components:
// - `window_index`:  owning storage indexed by view type and by scene
// - `history`:       single-top navigation stack
// - `service`:       WindowService tying both to the host
//
//=========================================================================

//=== Module Declarations =================================================

mod history;
mod service;
mod window_index;

//=== Public API ==========================================================

pub use service::{ServiceState, WindowService, ROOT_SURFACE_NAME};
