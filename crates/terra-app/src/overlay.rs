//! Status overlay panel model.
//!
//! Produces the rows the host's overlay renderer draws; layout and colours
//! belong to the host.

use terra_config::NotificationMode;
use terra_core::{EngineStatus, NotificationSink, RegionId, VisibilityChanged};

/// Panel title.
pub const OVERLAY_TITLE: &str = "Terrain Toggle";

/// A label/value row. `active` selects the highlight colour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayLine {
    pub left: String,
    pub right: String,
    pub active: bool,
}

impl OverlayLine {
    fn new(left: &str, right: impl Into<String>, active: bool) -> Self {
        Self {
            left: left.to_string(),
            right: right.into(),
            active,
        }
    }

    fn on_off(left: &str, on: bool) -> Self {
        Self::new(left, if on { "ON" } else { "OFF" }, on)
    }
}

/// Everything the overlay shows for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayPanel {
    pub title: &'static str,
    /// Most recent visibility change, if any.
    pub message: Option<String>,
    pub lines: Vec<OverlayLine>,
}

/// Inputs for one overlay render.
#[derive(Debug, Clone, Copy)]
pub struct OverlayContext {
    pub mode: NotificationMode,
    pub status: EngineStatus,
    pub hotkey_enabled: bool,
    pub region: Option<RegionId>,
    pub show_region: bool,
}

/// Overlay state: the last change message.
#[derive(Debug, Default)]
pub struct StatusOverlay {
    message: Option<String>,
}

impl StatusOverlay {
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Build the panel, or `None` when the mode hides the overlay.
    pub fn render(&self, ctx: &OverlayContext) -> Option<OverlayPanel> {
        if !ctx.mode.shows_overlay() {
            return None;
        }

        let mut lines = vec![
            OverlayLine::on_off("Terrain", ctx.status.terrain_visible),
            OverlayLine::on_off("Hotkey Mode", ctx.hotkey_enabled),
            OverlayLine::on_off("Region Mode", ctx.status.region_toggle_enabled),
        ];
        if ctx.show_region
            && let Some(region) = ctx.region
        {
            lines.push(OverlayLine::new("Current Region", region.to_string(), true));
        }
        if ctx.status.in_listed_region {
            lines.push(OverlayLine::new("In Listed Region", "Yes", true));
        }

        Some(OverlayPanel {
            title: OVERLAY_TITLE,
            message: self.message.clone(),
            lines,
        })
    }
}

impl NotificationSink for StatusOverlay {
    fn visibility_changed(&mut self, event: &VisibilityChanged) {
        self.message = Some(event.overlay_message());
    }
}
