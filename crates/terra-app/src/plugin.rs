//! Host-facing plugin: owns the engine, gate, hotkey and notifications, and
//! exposes one method per host event.
//!
//! All methods must be called on the host's update thread.

use terra_config::{CONFIG_GROUP, Config, ConfigError, ConfigKey, ConfigStore};
use terra_core::{
    Decision, DrawGate, EditOutcome, MenuCommand, NotificationSink, RegionId, RegionMenu,
    RenderCallbackSlot, VisibilityEngine,
};
use terra_input::{HotkeyListener, KeyOutcome, Keybind, RawKeyEvent};
use tracing::{info, warn};

use crate::notifier::Notifier;
use crate::overlay::{OverlayContext, OverlayPanel};

/// Host services the plugin calls back into.
pub trait Host {
    /// Whether a scene is currently loaded.
    fn is_logged_in(&self) -> bool;

    /// Rebuild the scene so draw gating takes effect on already-uploaded
    /// geometry.
    fn request_scene_reload(&mut self);
}

/// The terrain toggle plugin.
pub struct TerrainTogglePlugin<S: ConfigStore> {
    config: Config,
    store: S,
    engine: VisibilityEngine,
    gate: DrawGate,
    hotkey: HotkeyListener,
    notifier: Notifier,
    region: Option<RegionId>,
    active: bool,
}

fn parse_hotkey(text: &str) -> Option<Keybind> {
    Keybind::parse_optional(text).unwrap_or_else(|e| {
        warn!("Ignoring toggle hotkey {text:?}: {e}");
        None
    })
}

impl<S: ConfigStore> TerrainTogglePlugin<S> {
    /// Creates an inactive plugin from a configuration snapshot. Updated
    /// values are persisted through `store`.
    pub fn new(config: Config, store: S) -> Self {
        let engine = VisibilityEngine::new(&config.terrain);
        let hotkey = HotkeyListener::new(
            config.terrain.enable_hotkey,
            parse_hotkey(&config.terrain.toggle_terrain_hotkey),
        );
        Self {
            gate: DrawGate::new(engine.terrain_visible()),
            notifier: Notifier::new(config.terrain.notification_mode),
            engine,
            hotkey,
            config,
            store,
            region: None,
            active: false,
        }
    }

    /// Activate: fresh engine state from config, then install the draw gate.
    /// A failed install leaves rendering in full passthrough.
    pub fn start_up(&mut self, slot: &mut RenderCallbackSlot, host: &mut dyn Host) {
        info!("Terrain Toggle started");
        self.engine = VisibilityEngine::new(&self.config.terrain);
        self.region = None;
        self.gate.update(slot, self.engine.terrain_visible());
        // Install failures are logged by the gate and are not fatal.
        let _ = self.gate.install(slot);
        if host.is_logged_in() {
            host.request_scene_reload();
        }
        self.active = true;
    }

    /// Deactivate and hand the render callback slot back untouched. Safe to
    /// call even if start-up never ran or the gate failed to install.
    pub fn shut_down(&mut self, slot: &mut RenderCallbackSlot, host: &mut dyn Host) {
        info!("Terrain Toggle stopped");
        let was_installed = self.gate.is_installed();
        self.gate.uninstall(slot);
        self.hotkey.reset();
        if was_installed && host.is_logged_in() {
            host.request_scene_reload();
        }
        self.active = false;
    }

    /// One game tick with the player's current region (`None` if unknown).
    pub fn on_tick(
        &mut self,
        region: Option<RegionId>,
        slot: &mut RenderCallbackSlot,
        host: &mut dyn Host,
    ) -> Decision {
        if !self.active {
            return Decision::Unchanged;
        }
        self.region = region;
        let decision = self.engine.on_tick(region);
        if let Some(event) = decision.event() {
            self.gate.update(slot, event.visible);
            host.request_scene_reload();
            self.notifier.visibility_changed(&event);
        }
        decision
    }

    /// A key press or release. The host must not forward consumed events.
    /// An inactive plugin never consumes input.
    pub fn on_key_event(&mut self, event: RawKeyEvent) -> KeyOutcome {
        if !self.active {
            self.hotkey.observe(event);
            return KeyOutcome::default();
        }
        let outcome = self.hotkey.process(event);
        if outcome.toggled {
            self.engine.on_hotkey_toggle();
            let enabled = self.engine.master_enabled();
            self.persist(ConfigKey::EnableTerrain, &enabled.to_string());
        }
        outcome
    }

    /// A typed character; returns `true` if it must be consumed.
    pub fn on_key_typed(&self) -> bool {
        self.active && self.hotkey.process_typed()
    }

    /// The region submenu to add to the host's right-click menu, if any.
    pub fn region_menu(&self, existing_options: &[&str]) -> Option<RegionMenu> {
        let membership = self
            .region
            .map(|r| self.engine.rules().membership(r))
            .unwrap_or_default();
        RegionMenu::build(
            self.config.terrain.enable_right_click_region,
            self.hotkey.modifiers().shift_held(),
            self.region,
            membership,
            existing_options,
        )
    }

    /// A region-list edit chosen from the menu. Effective edits are
    /// persisted and announced; no-op edits return `None`.
    pub fn on_menu_command(&mut self, command: MenuCommand) -> Option<EditOutcome> {
        let outcome = self.engine.region_editor().apply(command)?;
        self.persist(ConfigKey::ShowRegions, &outcome.lists.show_csv);
        self.persist(ConfigKey::HideRegions, &outcome.lists.hide_csv);
        self.notifier.region_list_edited(&outcome.edit);
        Some(outcome)
    }

    /// A configuration value changed in the host's store. Keys outside the
    /// `terraintoggle` group are ignored.
    pub fn on_config_changed(
        &mut self,
        group: &str,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        if group != CONFIG_GROUP {
            return Ok(());
        }
        let key: ConfigKey = key.parse()?;
        self.config.set_value(key, value)?;

        let terrain = &self.config.terrain;
        match key {
            ConfigKey::EnableTerrain => {
                self.engine.on_manual_config_change(terrain.enable_terrain);
            }
            ConfigKey::EnableRegionToggle | ConfigKey::ShowRegions | ConfigKey::HideRegions => {
                self.engine.apply_config(terrain);
            }
            ConfigKey::EnableHotkey | ConfigKey::ToggleTerrainHotkey => {
                self.hotkey.reconfigure(
                    terrain.enable_hotkey,
                    parse_hotkey(&terrain.toggle_terrain_hotkey),
                );
            }
            ConfigKey::NotificationMode => self.notifier.set_mode(terrain.notification_mode),
            ConfigKey::EnableRightClickRegion | ConfigKey::ShowRegionInOverlay => {}
        }
        Ok(())
    }

    /// Replace the whole configuration snapshot (e.g. after a file reload).
    pub fn reload_config(&mut self, config: Config) {
        self.engine.apply_config(&config.terrain);
        self.hotkey.reconfigure(
            config.terrain.enable_hotkey,
            parse_hotkey(&config.terrain.toggle_terrain_hotkey),
        );
        self.notifier.set_mode(config.terrain.notification_mode);
        self.config = config;
    }

    /// The overlay panel for this frame, if the overlay is enabled.
    pub fn overlay_panel(&self) -> Option<OverlayPanel> {
        self.notifier.overlay().render(&OverlayContext {
            mode: self.notifier.mode(),
            status: self.engine.status(self.region),
            hotkey_enabled: self.config.terrain.enable_hotkey,
            region: self.region,
            show_region: self.config.terrain.show_region_in_overlay,
        })
    }

    /// Take queued chat lines for delivery.
    pub fn drain_chat(&mut self) -> Vec<String> {
        self.notifier.chat().drain()
    }

    pub fn engine(&self) -> &VisibilityEngine {
        &self.engine
    }

    pub fn gate(&self) -> &DrawGate {
        &self.gate
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn hotkey_binding(&self) -> Option<Keybind> {
        self.hotkey.binding()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    fn persist(&mut self, key: ConfigKey, value: &str) {
        if let Err(e) = self.config.set_value(key, value) {
            warn!("Failed to update {key}: {e}");
        }
        if let Err(e) = self.store.set(key, value) {
            warn!("Failed to persist {key}: {e}");
        }
    }
}
