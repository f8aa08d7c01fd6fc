//! Terrain Toggle host adapter.
//!
//! Wires the visibility engine to the host: plugin lifecycle, tick and input
//! dispatch, draw-gate management, notifications and the status overlay.

pub mod game_loop;
pub mod notifier;
pub mod overlay;
pub mod platform;
pub mod plugin;

pub use notifier::{ChatLog, Notifier};
pub use overlay::{OverlayContext, OverlayLine, OverlayPanel, StatusOverlay};
pub use plugin::{Host, TerrainTogglePlugin};
