//! Shift-right-click region menu model.

use crate::editor::{Membership, MenuCommand, RegionList};
use crate::region::RegionId;

/// Label of the top-level menu entry.
pub const MENU_TITLE: &str = "Terrain Toggle";

/// One submenu entry and the command it issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: String,
    pub command: MenuCommand,
}

/// The "Terrain Toggle" submenu for the player's current region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionMenu {
    pub title: &'static str,
    pub entries: Vec<MenuEntry>,
}

impl RegionMenu {
    /// Build the submenu, or `None` when it should not be offered: the menu
    /// is disabled, Shift is not held, the region is unknown, or the host
    /// menu already carries a [`MENU_TITLE`] entry.
    #[must_use]
    pub fn build(
        enabled: bool,
        shift_held: bool,
        region: Option<RegionId>,
        membership: Membership,
        existing_options: &[&str],
    ) -> Option<Self> {
        if !enabled || !shift_held {
            return None;
        }
        let region = region?;
        if existing_options.contains(&MENU_TITLE) {
            return None;
        }

        let entries = [RegionList::Show, RegionList::Hide]
            .into_iter()
            .map(|list| {
                let member = membership.contains(list);
                let label = if member {
                    format!("Remove region from {list}")
                } else {
                    format!("Add region to {list}")
                };
                MenuEntry {
                    label,
                    command: MenuCommand::toggle(list, region, member),
                }
            })
            .collect();

        Some(Self {
            title: MENU_TITLE,
            entries,
        })
    }

    /// The command bound to `label`, if any.
    #[must_use]
    pub fn command_for(&self, label: &str) -> Option<MenuCommand> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_follow_membership() {
        let membership = Membership {
            in_show: true,
            in_hide: false,
        };
        let menu = RegionMenu::build(true, true, Some(42), membership, &[]).unwrap();
        assert_eq!(menu.title, "Terrain Toggle");
        assert_eq!(menu.entries[0].label, "Remove region from Show List");
        assert_eq!(menu.entries[0].command, MenuCommand::RemoveFromShow(42));
        assert_eq!(menu.entries[1].label, "Add region to Hide List");
        assert_eq!(menu.entries[1].command, MenuCommand::AddToHide(42));
    }

    #[test]
    fn test_not_offered_without_preconditions() {
        let m = Membership::default();
        assert!(RegionMenu::build(false, true, Some(1), m, &[]).is_none());
        assert!(RegionMenu::build(true, false, Some(1), m, &[]).is_none());
        assert!(RegionMenu::build(true, true, None, m, &[]).is_none());
        assert!(RegionMenu::build(true, true, Some(1), m, &["Walk here", MENU_TITLE]).is_none());
    }

    #[test]
    fn test_command_for_label() {
        let menu = RegionMenu::build(true, true, Some(8), Membership::default(), &["Walk here"])
            .unwrap();
        assert_eq!(
            menu.command_for("Add region to Show List"),
            Some(MenuCommand::AddToShow(8))
        );
        assert_eq!(menu.command_for("Cancel"), None);
    }
}
