//! Headless Terrain Toggle driver.
//!
//! Walks the player through a sequence of regions, one per game tick, and
//! prints each visibility decision along with what the render pipeline drew.

use clap::Parser;
use terra_app::game_loop::{TICK_SECONDS, TickLoop};
use terra_app::platform::PlatformDirs;
use terra_app::{Host, TerrainTogglePlugin};
use terra_config::{CliArgs, Config, FileConfigStore};
use terra_core::{
    DrawCall, DrawCallback, ObjectRef, RegionId, RenderCallbackSlot, SceneRef, TileRef,
};
use terra_input::RawKeyEvent;
use tracing::{info, warn};

const DEFAULT_HOTKEY: &str = "F9";

#[derive(Parser, Debug)]
#[command(name = "terra-toggle", about = "Terrain Toggle headless driver")]
struct DemoArgs {
    #[command(flatten)]
    config: CliArgs,

    /// Region per tick, comma-separated; `-` means location unknown.
    #[arg(long, default_value = "5,5,7,3,7")]
    walk: String,

    /// Press the toggle hotkey just before this tick.
    #[arg(long)]
    hotkey_at: Option<u64>,

    /// Simulate a renderer without GPU draw callbacks.
    #[arg(long)]
    no_gpu: bool,
}

fn parse_walk(text: &str) -> Result<Vec<Option<RegionId>>, String> {
    text.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| match t {
            "-" => Ok(None),
            _ => t
                .parse::<RegionId>()
                .map(Some)
                .map_err(|e| format!("invalid region {t:?}: {e}")),
        })
        .collect()
}

/// Stand-in for the host's scene renderer.
struct HeadlessRenderer;

impl DrawCallback for HeadlessRenderer {
    fn draw(&mut self, _call: &DrawCall) -> bool {
        true
    }
}

struct HeadlessHost {
    reloads: u32,
}

impl Host for HeadlessHost {
    fn is_logged_in(&self) -> bool {
        true
    }

    fn request_scene_reload(&mut self) {
        self.reloads += 1;
    }
}

/// Push a small scene through the slot and count what was drawn.
fn draw_scene(slot: &mut RenderCallbackSlot) -> (u32, u32) {
    let scene = SceneRef(0);
    let mut tiles = 0;
    for x in 0..4 {
        let call = DrawCall::TerrainTile {
            scene,
            tile: TileRef { plane: 0, x, y: 0 },
        };
        tiles += u32::from(slot.dispatch(&call));
    }
    let mut objects = 0;
    for id in 0..2 {
        let call = DrawCall::Object {
            scene,
            object: ObjectRef(id),
        };
        objects += u32::from(slot.dispatch(&call));
    }
    (tiles, objects)
}

/// File config with command-line overrides applied on top.
fn effective_config(mut config: Config, args: &DemoArgs) -> Config {
    config.apply_cli_overrides(&args.config);
    if args.hotkey_at.is_some() && config.terrain.toggle_terrain_hotkey.trim().is_empty() {
        config.terrain.enable_hotkey = true;
        config.terrain.toggle_terrain_hotkey = DEFAULT_HOTKEY.to_string();
    }
    config
}

fn fail(context: &str, err: impl std::fmt::Display) -> ! {
    eprintln!("{context}: {err}");
    std::process::exit(1);
}

fn main() {
    let args = DemoArgs::parse();

    let walk = parse_walk(&args.walk).unwrap_or_else(|e| fail("Bad --walk", e));

    let (config_dir, log_dir) = match &args.config.config {
        Some(dir) => (dir.clone(), None),
        None => match PlatformDirs::resolve_and_create() {
            Ok(dirs) => (dirs.config_dir, Some(dirs.log_dir)),
            Err(e) => fail("Failed to initialize platform directories", e),
        },
    };

    let store = FileConfigStore::open(&config_dir)
        .unwrap_or_else(|e| fail("Failed to load configuration", e));
    let config = effective_config(store.config().clone(), &args);

    terra_log::init_logging(log_dir.as_deref(), cfg!(debug_assertions), Some(&config));
    info!(config_dir = %config_dir.display(), "Configuration loaded");

    let mut slot = RenderCallbackSlot::new(!args.no_gpu);
    slot.register(Box::new(HeadlessRenderer));
    let mut host = HeadlessHost { reloads: 0 };

    let mut plugin = TerrainTogglePlugin::new(config, store);
    plugin.start_up(&mut slot, &mut host);
    println!(
        "renderer gpu-backed: {}, terrain gate installed: {}",
        slot.is_gpu_backed(),
        plugin.gate().is_installed()
    );

    let mut tick_loop = TickLoop::new();
    for region in walk {
        // Pick up edits made to config.ron while the walk is running.
        match plugin.store_mut().reload() {
            Ok(Some(fresh)) => plugin.reload_config(effective_config(fresh, &args)),
            Ok(None) => {}
            Err(e) => warn!("Config reload failed: {e}"),
        }

        let hotkey = plugin.hotkey_binding();
        if args.hotkey_at == Some(tick_loop.tick_count())
            && let Some(binding) = hotkey
        {
            plugin.on_key_event(RawKeyEvent::press(binding.key));
            plugin.on_key_event(RawKeyEvent::release(binding.key));
            println!("hotkey pressed ({binding})");
        }

        tick_loop.advance(TICK_SECONDS, |tick| {
            let decision = plugin.on_tick(region, &mut slot, &mut host);
            let (tiles, objects) = draw_scene(&mut slot);
            let region = region.map_or_else(|| "-".to_string(), |r| r.to_string());
            println!(
                "tick {tick}: region {region} -> {decision:?}, drew {tiles}/4 tiles, {objects}/2 objects"
            );
        });
    }

    for line in plugin.drain_chat() {
        println!("chat: {line}");
    }
    if let Some(panel) = plugin.overlay_panel() {
        println!("overlay: {}", panel.title);
        if let Some(message) = &panel.message {
            println!("  {message}");
        }
        for line in &panel.lines {
            println!("  {}: {}", line.left, line.right);
        }
    }

    plugin.shut_down(&mut slot, &mut host);
    println!(
        "scene reloads: {}, downstream renderer kept: {}",
        host.reloads,
        slot.has_downstream()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_walk() {
        assert_eq!(
            parse_walk("5, 5,-,7,").unwrap(),
            vec![Some(5), Some(5), None, Some(7)]
        );
        assert!(parse_walk("5,abc").is_err());
        assert!(parse_walk("").unwrap().is_empty());
    }

    #[test]
    fn test_draw_scene_passthrough_without_gate() {
        let mut slot = RenderCallbackSlot::new(true);
        slot.register(Box::new(HeadlessRenderer));
        assert_eq!(draw_scene(&mut slot), (4, 2));
    }

    #[test]
    fn test_effective_config_binds_demo_hotkey() {
        let args = DemoArgs::parse_from([
            "terra-toggle",
            "--hotkey-at",
            "2",
            "--show-regions",
            "5",
        ]);
        let config = effective_config(Config::default(), &args);
        assert!(config.terrain.enable_hotkey);
        assert_eq!(config.terrain.toggle_terrain_hotkey, "F9");
        assert_eq!(config.terrain.show_regions, "5");

        let mut bound = Config::default();
        bound.terrain.toggle_terrain_hotkey = "F2".to_string();
        let config = effective_config(bound, &args);
        assert_eq!(config.terrain.toggle_terrain_hotkey, "F2");
        assert!(!config.terrain.enable_hotkey);
    }

    #[test]
    fn test_demo_args_defaults() {
        let args = DemoArgs::parse_from(["terra-toggle"]);
        assert_eq!(args.walk, "5,5,7,3,7");
        assert_eq!(args.hotkey_at, None);
        assert!(!args.no_gpu);
    }
}
