//! The per-tick terrain visibility state machine.
//!
//! [`VisibilityEngine::on_tick`] is the only place `terrain_visible` changes.
//! Hotkey and settings events only adjust the master toggle (and, for the
//! hotkey, stage a one-shot reason); the next tick applies them.

use std::fmt;

use serde::Serialize;
use terra_config::TerrainConfig;
use tracing::{debug, info};

use crate::editor::{RegionListEditor, RegionRules};
use crate::notify::VisibilityChanged;
use crate::region::{RegionId, RegionSet};

/// Why terrain visibility flipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChangeReason {
    Manual,
    Hotkey,
    #[serde(rename = "Region entered")]
    RegionEntered,
    #[serde(rename = "Region left")]
    RegionLeft,
}

impl ChangeReason {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "Manual",
            Self::Hotkey => "Hotkey",
            Self::RegionEntered => "Region entered",
            Self::RegionLeft => "Region left",
        }
    }
}

impl fmt::Display for ChangeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one engine operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Visibility did not flip.
    Unchanged,
    /// Visibility flipped to `visible`.
    Changed { visible: bool, reason: ChangeReason },
}

impl Decision {
    #[must_use]
    pub fn is_changed(self) -> bool {
        matches!(self, Self::Changed { .. })
    }

    /// The notification to emit, if visibility flipped.
    #[must_use]
    pub fn event(self) -> Option<VisibilityChanged> {
        match self {
            Self::Unchanged => None,
            Self::Changed { visible, reason } => Some(VisibilityChanged { visible, reason }),
        }
    }
}

/// Read-only snapshot for status displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EngineStatus {
    pub terrain_visible: bool,
    pub master_enabled: bool,
    pub region_toggle_enabled: bool,
    pub in_listed_region: bool,
}

/// Owns terrain visibility state from plugin start to stop.
#[derive(Debug, Clone)]
pub struct VisibilityEngine {
    master_enabled: bool,
    region_toggle_enabled: bool,
    rules: RegionRules,
    terrain_visible: bool,
    /// Listed region the player was last seen in; `None` once they step
    /// into an unlisted region.
    last_region: Option<RegionId>,
    pending_reason: Option<ChangeReason>,
}

impl VisibilityEngine {
    /// Creates an engine whose initial visibility is the master toggle.
    #[must_use]
    pub fn new(config: &TerrainConfig) -> Self {
        let mut engine = Self {
            master_enabled: config.enable_terrain,
            region_toggle_enabled: config.enable_region_toggle,
            rules: RegionRules::default(),
            terrain_visible: config.enable_terrain,
            last_region: None,
            pending_reason: None,
        };
        engine.reload_region_lists(config);
        engine
    }

    /// Refresh from a new configuration snapshot.
    ///
    /// Region lists are cleared and reparsed in full. A changed master toggle
    /// is handled like [`on_manual_config_change`](Self::on_manual_config_change).
    pub fn apply_config(&mut self, config: &TerrainConfig) {
        self.region_toggle_enabled = config.enable_region_toggle;
        self.reload_region_lists(config);
        self.on_manual_config_change(config.enable_terrain);
    }

    fn reload_region_lists(&mut self, config: &TerrainConfig) {
        let show = RegionSet::parse_with_report(&config.show_regions);
        let hide = RegionSet::parse_with_report(&config.hide_regions);
        if show.dropped + hide.dropped > 0 {
            debug!(
                show_dropped = show.dropped,
                hide_dropped = hide.dropped,
                "Dropped malformed region ids"
            );
        }
        self.rules = RegionRules::new(show.set, hide.set);
        info!(
            "Region lists reloaded: show = {:?}, hide = {:?}",
            self.rules.show.sorted(),
            self.rules.hide.sorted()
        );
    }

    /// Recompute visibility for the region the player is in this tick.
    ///
    /// `None` means the location is unknown and counts as an unlisted region.
    pub fn on_tick(&mut self, region: Option<RegionId>) -> Decision {
        let mut region_reason = None;

        let target = if !self.region_toggle_enabled {
            self.master_enabled
        } else {
            match self.rules.rule_for(region) {
                Some(forced) => {
                    if self.last_region != region {
                        region_reason = Some(ChangeReason::RegionEntered);
                        self.last_region = region;
                    }
                    forced
                }
                None => {
                    if self.last_region.take().is_some() {
                        region_reason = Some(ChangeReason::RegionLeft);
                    }
                    self.master_enabled
                }
            }
        };

        if target == self.terrain_visible {
            return Decision::Unchanged;
        }

        self.terrain_visible = target;
        // Any flip retires the staged reason, even when a region reason wins.
        let pending = self.pending_reason.take();
        let reason = region_reason.or(pending).unwrap_or(ChangeReason::Manual);
        debug!(visible = target, %reason, ?region, "Terrain visibility changed");
        Decision::Changed {
            visible: target,
            reason,
        }
    }

    /// Flip the master toggle from the hotkey and stage the `Hotkey` reason.
    ///
    /// Visibility itself changes on the next [`on_tick`](Self::on_tick), so
    /// this always returns [`Decision::Unchanged`]. The caller persists
    /// [`master_enabled`](Self::master_enabled).
    pub fn on_hotkey_toggle(&mut self) -> Decision {
        self.master_enabled = !self.master_enabled;
        self.pending_reason = Some(ChangeReason::Hotkey);
        debug!(master_enabled = self.master_enabled, "Hotkey toggled terrain");
        Decision::Unchanged
    }

    /// The master toggle changed through settings.
    ///
    /// Setting the value it already has is a no-op, so the persistence echo
    /// of a hotkey toggle keeps the staged reason. A real change clears it
    /// and takes effect on the next tick.
    pub fn on_manual_config_change(&mut self, enabled: bool) -> Decision {
        if enabled == self.master_enabled {
            return Decision::Unchanged;
        }
        self.master_enabled = enabled;
        self.pending_reason = None;
        debug!(master_enabled = enabled, "Terrain toggle changed in settings");
        Decision::Unchanged
    }

    /// Exclusive access to the region lists.
    pub fn region_editor(&mut self) -> RegionListEditor<'_> {
        RegionListEditor::new(&mut self.rules)
    }

    #[must_use]
    pub fn rules(&self) -> &RegionRules {
        &self.rules
    }

    #[must_use]
    pub fn terrain_visible(&self) -> bool {
        self.terrain_visible
    }

    #[must_use]
    pub fn master_enabled(&self) -> bool {
        self.master_enabled
    }

    #[must_use]
    pub fn region_toggle_enabled(&self) -> bool {
        self.region_toggle_enabled
    }

    #[must_use]
    pub fn pending_reason(&self) -> Option<ChangeReason> {
        self.pending_reason
    }

    #[must_use]
    pub fn status(&self, region: Option<RegionId>) -> EngineStatus {
        EngineStatus {
            terrain_visible: self.terrain_visible,
            master_enabled: self.master_enabled,
            region_toggle_enabled: self.region_toggle_enabled,
            in_listed_region: region.is_some_and(|r| self.rules.membership(r).is_listed()),
        }
    }
}
