//! Show/hide region lists and the commands that edit them.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::region::{RegionId, RegionSet};

/// Which of the two region lists a command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RegionList {
    Show,
    Hide,
}

impl RegionList {
    /// Display name used in menu labels and notices.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Show => "Show List",
            Self::Hide => "Hide List",
        }
    }
}

impl fmt::Display for RegionList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A region-list edit requested from the region menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    AddToShow(RegionId),
    RemoveFromShow(RegionId),
    AddToHide(RegionId),
    RemoveFromHide(RegionId),
}

impl MenuCommand {
    /// The command that flips `region`'s membership of `list`.
    #[must_use]
    pub fn toggle(list: RegionList, region: RegionId, currently_member: bool) -> Self {
        match (list, currently_member) {
            (RegionList::Show, false) => Self::AddToShow(region),
            (RegionList::Show, true) => Self::RemoveFromShow(region),
            (RegionList::Hide, false) => Self::AddToHide(region),
            (RegionList::Hide, true) => Self::RemoveFromHide(region),
        }
    }

    #[must_use]
    pub fn region(self) -> RegionId {
        match self {
            Self::AddToShow(r)
            | Self::RemoveFromShow(r)
            | Self::AddToHide(r)
            | Self::RemoveFromHide(r) => r,
        }
    }

    #[must_use]
    pub fn list(self) -> RegionList {
        match self {
            Self::AddToShow(_) | Self::RemoveFromShow(_) => RegionList::Show,
            Self::AddToHide(_) | Self::RemoveFromHide(_) => RegionList::Hide,
        }
    }

    #[must_use]
    pub fn is_add(self) -> bool {
        matches!(self, Self::AddToShow(_) | Self::AddToHide(_))
    }
}

/// Whether a region is on each list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Membership {
    pub in_show: bool,
    pub in_hide: bool,
}

impl Membership {
    #[must_use]
    pub fn is_listed(self) -> bool {
        self.in_show || self.in_hide
    }

    #[must_use]
    pub fn contains(self, list: RegionList) -> bool {
        match list {
            RegionList::Show => self.in_show,
            RegionList::Hide => self.in_hide,
        }
    }
}

/// Serialized region lists, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionListsChanged {
    pub show_csv: String,
    pub hide_csv: String,
}

/// A single effective list edit, for user-facing notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegionListEdit {
    pub list: RegionList,
    pub region: RegionId,
    pub added: bool,
}

impl fmt::Display for RegionListEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (verb, prep) = if self.added {
            ("Added", "to")
        } else {
            ("Removed", "from")
        };
        write!(f, "{verb} region {prep} {}: {}", self.list, self.region)
    }
}

/// Result of applying a [`MenuCommand`] that changed a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    pub edit: RegionListEdit,
    pub lists: RegionListsChanged,
}

/// The show and hide lists. A region may be on both; show wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionRules {
    pub show: RegionSet,
    pub hide: RegionSet,
}

impl RegionRules {
    #[must_use]
    pub fn new(show: RegionSet, hide: RegionSet) -> Self {
        Self { show, hide }
    }

    /// The forced visibility for `region`, or `None` when it is unlisted.
    /// A missing region is always unlisted.
    #[must_use]
    pub fn rule_for(&self, region: Option<RegionId>) -> Option<bool> {
        let region = region?;
        if self.show.contains(region) {
            Some(true)
        } else if self.hide.contains(region) {
            Some(false)
        } else {
            None
        }
    }

    #[must_use]
    pub fn membership(&self, region: RegionId) -> Membership {
        Membership {
            in_show: self.show.contains(region),
            in_hide: self.hide.contains(region),
        }
    }

    /// Both lists in their persisted text form.
    #[must_use]
    pub fn serialize(&self) -> RegionListsChanged {
        RegionListsChanged {
            show_csv: self.show.serialize(),
            hide_csv: self.hide.serialize(),
        }
    }
}

/// Exclusive editing access to the engine's [`RegionRules`].
///
/// Obtained from [`VisibilityEngine::region_editor`](crate::VisibilityEngine::region_editor).
/// Every operation is idempotent: adding a present id or removing an absent
/// one changes nothing and returns `None`.
#[derive(Debug)]
pub struct RegionListEditor<'a> {
    rules: &'a mut RegionRules,
}

impl<'a> RegionListEditor<'a> {
    pub fn new(rules: &'a mut RegionRules) -> Self {
        Self { rules }
    }

    pub fn add_to_show(&mut self, region: RegionId) -> Option<RegionListsChanged> {
        self.apply(MenuCommand::AddToShow(region)).map(|o| o.lists)
    }

    pub fn remove_from_show(&mut self, region: RegionId) -> Option<RegionListsChanged> {
        self.apply(MenuCommand::RemoveFromShow(region)).map(|o| o.lists)
    }

    pub fn add_to_hide(&mut self, region: RegionId) -> Option<RegionListsChanged> {
        self.apply(MenuCommand::AddToHide(region)).map(|o| o.lists)
    }

    pub fn remove_from_hide(&mut self, region: RegionId) -> Option<RegionListsChanged> {
        self.apply(MenuCommand::RemoveFromHide(region)).map(|o| o.lists)
    }

    #[must_use]
    pub fn membership(&self, region: RegionId) -> Membership {
        self.rules.membership(region)
    }

    /// Apply a command; returns the edit and re-serialized lists when
    /// membership actually changed.
    pub fn apply(&mut self, command: MenuCommand) -> Option<EditOutcome> {
        let region = command.region();
        let list = command.list();
        let set = match list {
            RegionList::Show => &mut self.rules.show,
            RegionList::Hide => &mut self.rules.hide,
        };
        let changed = if command.is_add() {
            set.insert(region)
        } else {
            set.remove(region)
        };
        if !changed {
            debug!(?command, "Region list edit had no effect");
            return None;
        }

        let edit = RegionListEdit {
            list,
            region,
            added: command.is_add(),
        };
        debug!(%edit, "Region list edited");
        Some(EditOutcome {
            edit,
            lists: self.rules.serialize(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(show: &str, hide: &str) -> RegionRules {
        RegionRules::new(RegionSet::parse(show), RegionSet::parse(hide))
    }

    #[test]
    fn test_rule_precedence() {
        let r = rules("5,9", "7,9");
        assert_eq!(r.rule_for(Some(5)), Some(true));
        assert_eq!(r.rule_for(Some(7)), Some(false));
        assert_eq!(r.rule_for(Some(9)), Some(true));
        assert_eq!(r.rule_for(Some(3)), None);
        assert_eq!(r.rule_for(None), None);
    }

    #[test]
    fn test_add_emits_lists() {
        let mut r = rules("", "7");
        let mut editor = RegionListEditor::new(&mut r);
        let lists = editor.add_to_show(5).unwrap();
        assert_eq!(lists.show_csv, "5");
        assert_eq!(lists.hide_csv, "7");
        assert!(editor.membership(5).in_show);
    }

    #[test]
    fn test_edits_are_idempotent() {
        let mut r = rules("5", "");
        let mut editor = RegionListEditor::new(&mut r);
        assert!(editor.add_to_show(5).is_none());
        assert!(editor.remove_from_hide(5).is_none());
        assert!(editor.remove_from_show(5).is_some());
        assert!(editor.remove_from_show(5).is_none());
        assert!(r.show.is_empty());
    }

    #[test]
    fn test_region_may_be_on_both_lists() {
        let mut r = RegionRules::default();
        let mut editor = RegionListEditor::new(&mut r);
        editor.add_to_show(4);
        editor.add_to_hide(4);
        assert_eq!(
            editor.membership(4),
            Membership {
                in_show: true,
                in_hide: true
            }
        );
        assert_eq!(r.rule_for(Some(4)), Some(true));
    }

    #[test]
    fn test_apply_reports_edit() {
        let mut r = RegionRules::default();
        let outcome = RegionListEditor::new(&mut r)
            .apply(MenuCommand::AddToHide(12850))
            .unwrap();
        assert_eq!(
            outcome.edit,
            RegionListEdit {
                list: RegionList::Hide,
                region: 12850,
                added: true
            }
        );
        assert_eq!(outcome.edit.to_string(), "Added region to Hide List: 12850");
        assert_eq!(outcome.lists.hide_csv, "12850");
    }

    #[test]
    fn test_remove_notice_text() {
        let edit = RegionListEdit {
            list: RegionList::Show,
            region: 3,
            added: false,
        };
        assert_eq!(edit.to_string(), "Removed region from Show List: 3");
    }

    #[test]
    fn test_toggle_command() {
        assert_eq!(
            MenuCommand::toggle(RegionList::Show, 1, false),
            MenuCommand::AddToShow(1)
        );
        assert_eq!(
            MenuCommand::toggle(RegionList::Hide, 1, true),
            MenuCommand::RemoveFromHide(1)
        );
    }
}
