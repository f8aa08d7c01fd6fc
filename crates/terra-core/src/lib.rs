//! Terrain visibility decision engine.
//!
//! Computes, once per game tick, whether terrain should be drawn from the
//! manual toggle, the hotkey, and per-region show/hide rules, and gates
//! terrain draw calls on the result. Everything here runs on the host's
//! single update thread and performs no I/O.

pub mod editor;
pub mod engine;
pub mod gate;
pub mod menu;
pub mod notify;
pub mod region;

pub use editor::{
    EditOutcome, MenuCommand, Membership, RegionList, RegionListEdit, RegionListEditor,
    RegionListsChanged, RegionRules,
};
pub use engine::{ChangeReason, Decision, EngineStatus, VisibilityEngine};
pub use gate::{
    DrawCall, DrawCallback, DrawGate, GateError, GateId, ObjectRef, RenderCallbackSlot, SceneRef,
    TileRef,
};
pub use menu::{MENU_TITLE, MenuEntry, RegionMenu};
pub use notify::{NotificationSink, VisibilityChanged};
pub use region::{ParseReport, RegionId, RegionSet};
