//! Visibility-change events and the sink interface that displays them.

use serde::Serialize;

use crate::editor::RegionListEdit;
use crate::engine::ChangeReason;

/// Prefix for chat lines.
pub const CHAT_PREFIX: &str = "[Terrain Toggle]";

/// Emitted once per visibility flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisibilityChanged {
    pub visible: bool,
    pub reason: ChangeReason,
}

impl VisibilityChanged {
    #[must_use]
    pub fn state_label(&self) -> &'static str {
        if self.visible { "VISIBLE" } else { "HIDDEN" }
    }

    /// Chat form, e.g. `[Terrain Toggle] HIDDEN (Region entered)`.
    #[must_use]
    pub fn chat_message(&self) -> String {
        format!("{CHAT_PREFIX} {} ({})", self.state_label(), self.reason)
    }

    /// Overlay form, e.g. `Terrain: VISIBLE (Hotkey)`.
    #[must_use]
    pub fn overlay_message(&self) -> String {
        format!("Terrain: {} ({})", self.state_label(), self.reason)
    }
}

/// Chat form of a region-list edit notice.
#[must_use]
pub fn edit_chat_message(edit: &RegionListEdit) -> String {
    format!("{CHAT_PREFIX} {edit}")
}

/// Receives engine notifications. Display is up to the implementor.
pub trait NotificationSink {
    fn visibility_changed(&mut self, event: &VisibilityChanged);

    /// Region-list edit notices; ignored unless overridden.
    fn region_list_edited(&mut self, _edit: &RegionListEdit) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::RegionList;

    #[test]
    fn test_chat_message() {
        let event = VisibilityChanged {
            visible: false,
            reason: ChangeReason::RegionEntered,
        };
        assert_eq!(
            event.chat_message(),
            "[Terrain Toggle] HIDDEN (Region entered)"
        );
    }

    #[test]
    fn test_overlay_message() {
        let event = VisibilityChanged {
            visible: true,
            reason: ChangeReason::Hotkey,
        };
        assert_eq!(event.overlay_message(), "Terrain: VISIBLE (Hotkey)");
    }

    #[test]
    fn test_edit_chat_message() {
        let edit = RegionListEdit {
            list: RegionList::Show,
            region: 12850,
            added: true,
        };
        assert_eq!(
            edit_chat_message(&edit),
            "[Terrain Toggle] Added region to Show List: 12850"
        );
    }

    #[test]
    fn test_event_serializes() {
        let event = VisibilityChanged {
            visible: true,
            reason: ChangeReason::RegionLeft,
        };
        let json = serde_json::to_value(event).unwrap();
        assert_eq!(json["visible"], true);
        assert_eq!(json["reason"], "Region left");
    }

    #[test]
    fn test_serialized_reason_matches_display() {
        for reason in [
            ChangeReason::Manual,
            ChangeReason::Hotkey,
            ChangeReason::RegionEntered,
            ChangeReason::RegionLeft,
        ] {
            let event = VisibilityChanged {
                visible: false,
                reason,
            };
            let json = serde_json::to_value(event).unwrap();
            assert_eq!(json["reason"], reason.as_str());
        }
    }
}
