//=========================================================================
// Aetheric UI — Library Root
//
// This crate defines the public API surface of the Aetheric window
// lifecycle and navigation layer.
//
// Responsibilities:
// - Expose the window service and its builder (`UiBuilder`)
// - Expose the contracts a host implements (surfaces, scenes, config)
// - Keep registry internals behind a small, typed API
//
// Typical usage:
// ```ignore
// use aetheric_ui::prelude::*;
//
// let mut ui = UiBuilder::<GameScene>::new()
//     .with_root_factory(host.root_factory())
//     .with_scene_host(host.scenes())
//     .build();
//
// ui.initialize();
// loop {
//     ui.tick(frame_dt);
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains windows, animation drivers, the registry and the host
// contracts. `config` and `error` hold the ambient types shared by all
// of them.
//
pub mod config;
pub mod core;
pub mod error;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `ui` defines the builder that assembles a `WindowService`.
//
mod ui;

//--- Public Exports ------------------------------------------------------
//
// Re-exports the entry points so applications can write
// `use aetheric_ui::{UiBuilder, WindowService};`.
//
pub use crate::core::registry::WindowService;
pub use error::UiError;
pub use ui::UiBuilder;
