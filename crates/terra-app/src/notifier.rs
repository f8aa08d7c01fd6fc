//! Routes engine notifications to chat and the overlay per notification mode.

use terra_config::NotificationMode;
use terra_core::notify::edit_chat_message;
use terra_core::{NotificationSink, RegionListEdit, VisibilityChanged};
use tracing::info;

use crate::overlay::StatusOverlay;

/// Outbound chat lines, drained by the host.
#[derive(Debug, Default)]
pub struct ChatLog {
    lines: Vec<String>,
}

impl ChatLog {
    /// Take all queued lines.
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl NotificationSink for ChatLog {
    fn visibility_changed(&mut self, event: &VisibilityChanged) {
        let line = event.chat_message();
        info!(target: "terra_app::chat", "{line}");
        self.lines.push(line);
    }

    fn region_list_edited(&mut self, edit: &RegionListEdit) {
        let line = edit_chat_message(edit);
        info!(target: "terra_app::chat", "{line}");
        self.lines.push(line);
    }
}

/// Fans notifications out to the chat log and the status overlay.
#[derive(Debug, Default)]
pub struct Notifier {
    mode: NotificationMode,
    chat: ChatLog,
    overlay: StatusOverlay,
}

impl Notifier {
    pub fn new(mode: NotificationMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> NotificationMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: NotificationMode) {
        self.mode = mode;
    }

    pub fn chat(&mut self) -> &mut ChatLog {
        &mut self.chat
    }

    pub fn overlay(&self) -> &StatusOverlay {
        &self.overlay
    }
}

impl NotificationSink for Notifier {
    fn visibility_changed(&mut self, event: &VisibilityChanged) {
        if self.mode.shows_text() {
            self.chat.visibility_changed(event);
        }
        if self.mode.shows_overlay() {
            self.overlay.visibility_changed(event);
        }
    }

    /// Edit notices only go to chat.
    fn region_list_edited(&mut self, edit: &RegionListEdit) {
        if self.mode.shows_text() {
            self.chat.region_list_edited(edit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use terra_core::{ChangeReason, RegionList};

    const HIDDEN: VisibilityChanged = VisibilityChanged {
        visible: false,
        reason: ChangeReason::Manual,
    };

    #[test]
    fn test_none_mode_is_silent() {
        let mut n = Notifier::new(NotificationMode::None);
        n.visibility_changed(&HIDDEN);
        assert!(n.chat().lines().is_empty());
        assert_eq!(n.overlay().message(), None);
    }

    #[test]
    fn test_text_mode_writes_chat_only() {
        let mut n = Notifier::new(NotificationMode::Text);
        n.visibility_changed(&HIDDEN);
        assert_eq!(n.chat().drain(), vec!["[Terrain Toggle] HIDDEN (Manual)"]);
        assert_eq!(n.overlay().message(), None);
        assert!(n.chat().lines().is_empty());
    }

    #[test]
    fn test_both_mode() {
        let mut n = Notifier::new(NotificationMode::Both);
        n.visibility_changed(&HIDDEN);
        assert_eq!(n.chat().lines().len(), 1);
        assert_eq!(n.overlay().message(), Some("Terrain: HIDDEN (Manual)"));
    }

    #[test]
    fn test_edit_notices_follow_text_mode() {
        let edit = RegionListEdit {
            list: RegionList::Hide,
            region: 7,
            added: true,
        };
        let mut overlay_only = Notifier::new(NotificationMode::Overlay);
        overlay_only.region_list_edited(&edit);
        assert!(overlay_only.chat().lines().is_empty());

        let mut text = Notifier::new(NotificationMode::Text);
        text.region_list_edited(&edit);
        assert_eq!(
            text.chat().lines(),
            ["[Terrain Toggle] Added region to Hide List: 7"]
        );
    }
}
