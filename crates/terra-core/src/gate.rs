//! Terrain draw-call gating.
//!
//! The host renderer owns a [`RenderCallbackSlot`]: a downstream
//! [`DrawCallback`] that receives every scene draw call. A [`DrawGate`] claims
//! the slot's single filter position while installed and suppresses terrain
//! tiles when terrain is hidden. It never takes or replaces the downstream
//! target, so releasing the claim leaves the pipeline exactly as it was.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, info, warn};

/// Host scene handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneRef(pub u32);

/// Host terrain tile handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileRef {
    pub plane: u8,
    pub x: u16,
    pub y: u16,
}

/// Host scene object handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectRef(pub u64);

/// One invocation of the host's draw-callback interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawCall {
    /// A terrain tile. The only call the gate can suppress.
    TerrainTile { scene: SceneRef, tile: TileRef },
    Object { scene: SceneRef, object: ObjectRef },
    Projection,
    SceneSetup(SceneRef),
    SceneTeardown(SceneRef),
    FrustumTest { scene: SceneRef, tile: TileRef },
}

/// Receives draw calls; the return value is the pass/suppress (or
/// in-frustum) answer for the call.
pub trait DrawCallback {
    fn draw(&mut self, call: &DrawCall) -> bool;
}

/// Errors from [`DrawGate::install`]. Neither is fatal: the pipeline simply
/// keeps rendering without a terrain filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
    /// The host is not rendering on the GPU, so there is no callback
    /// pipeline to intercept.
    #[error("GPU rendering is not active; terrain gating unavailable")]
    GpuUnavailable,

    /// Another gate holds the filter position.
    #[error("render callback slot already claimed by gate {0}")]
    AlreadyInstalled(GateId),
}

/// Identity of a gate instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GateId(u64);

impl GateId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for GateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy)]
struct TerrainFilter {
    owner: GateId,
    terrain_visible: bool,
}

/// The host pipeline's callback slot.
#[derive(Default)]
pub struct RenderCallbackSlot {
    gpu_backed: bool,
    downstream: Option<Box<dyn DrawCallback>>,
    filter: Option<TerrainFilter>,
}

impl std::fmt::Debug for RenderCallbackSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderCallbackSlot")
            .field("gpu_backed", &self.gpu_backed)
            .field("has_downstream", &self.downstream.is_some())
            .field("filter", &self.filter)
            .finish()
    }
}

impl RenderCallbackSlot {
    #[must_use]
    pub fn new(gpu_backed: bool) -> Self {
        Self {
            gpu_backed,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_gpu_backed(&self) -> bool {
        self.gpu_backed
    }

    /// Set the downstream target, returning the previous one.
    pub fn register(&mut self, callback: Box<dyn DrawCallback>) -> Option<Box<dyn DrawCallback>> {
        self.downstream.replace(callback)
    }

    /// Remove the downstream target.
    pub fn unregister(&mut self) -> Option<Box<dyn DrawCallback>> {
        self.downstream.take()
    }

    #[must_use]
    pub fn has_downstream(&self) -> bool {
        self.downstream.is_some()
    }

    /// The gate currently holding the filter position.
    #[must_use]
    pub fn filter_owner(&self) -> Option<GateId> {
        self.filter.map(|f| f.owner)
    }

    /// Route one draw call. Hidden terrain tiles are suppressed; everything
    /// else goes to the downstream target unmodified (or passes if there is
    /// none).
    pub fn dispatch(&mut self, call: &DrawCall) -> bool {
        if let DrawCall::TerrainTile { .. } = call
            && let Some(filter) = self.filter
            && !filter.terrain_visible
        {
            return false;
        }
        match self.downstream.as_mut() {
            Some(target) => target.draw(call),
            None => true,
        }
    }

    fn claim(&mut self, owner: GateId, terrain_visible: bool) -> Result<(), GateError> {
        if !self.gpu_backed {
            return Err(GateError::GpuUnavailable);
        }
        match self.filter {
            Some(existing) if existing.owner != owner => {
                Err(GateError::AlreadyInstalled(existing.owner))
            }
            _ => {
                self.filter = Some(TerrainFilter {
                    owner,
                    terrain_visible,
                });
                Ok(())
            }
        }
    }

    fn release(&mut self, owner: GateId) -> bool {
        if self.filter_owner() == Some(owner) {
            self.filter = None;
            true
        } else {
            false
        }
    }

    fn set_terrain_visible(&mut self, owner: GateId, visible: bool) {
        if let Some(filter) = self.filter.as_mut()
            && filter.owner == owner
        {
            filter.terrain_visible = visible;
        }
    }
}

/// Proof of a successful install; consumed on uninstall.
#[derive(Debug)]
struct InstallHandle {
    owner: GateId,
}

/// Terrain-selective draw filter: `Uninstalled` until [`install`](Self::install)
/// succeeds, back to `Uninstalled` on [`uninstall`](Self::uninstall).
#[derive(Debug)]
pub struct DrawGate {
    id: GateId,
    terrain_visible: bool,
    handle: Option<InstallHandle>,
}

impl DrawGate {
    #[must_use]
    pub fn new(terrain_visible: bool) -> Self {
        Self {
            id: GateId::next(),
            terrain_visible,
            handle: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> GateId {
        self.id
    }

    #[must_use]
    pub fn is_installed(&self) -> bool {
        self.handle.is_some()
    }

    /// Claim the slot's filter position. Installing twice is a no-op.
    pub fn install(&mut self, slot: &mut RenderCallbackSlot) -> Result<(), GateError> {
        if self.handle.is_some() {
            return Ok(());
        }
        match slot.claim(self.id, self.terrain_visible) {
            Ok(()) => {
                self.handle = Some(InstallHandle { owner: self.id });
                info!(gate = %self.id, "Terrain draw gate installed");
                Ok(())
            }
            Err(e) => {
                warn!(gate = %self.id, "Terrain draw gate not installed: {e}");
                Err(e)
            }
        }
    }

    /// Release the filter position. Safe to call when never installed.
    pub fn uninstall(&mut self, slot: &mut RenderCallbackSlot) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        if slot.release(handle.owner) {
            info!(gate = %self.id, "Terrain draw gate uninstalled");
        } else {
            warn!(
                gate = %self.id,
                owner = ?slot.filter_owner(),
                "Render callback slot was not held by this gate"
            );
        }
    }

    /// Push a new visibility flag into the installed filter.
    pub fn update(&mut self, slot: &mut RenderCallbackSlot, terrain_visible: bool) {
        self.terrain_visible = terrain_visible;
        if let Some(handle) = &self.handle {
            slot.set_terrain_visible(handle.owner, terrain_visible);
            debug!(gate = %self.id, terrain_visible, "Draw gate updated");
        }
    }

    /// Whether terrain tiles currently pass.
    #[must_use]
    pub fn should_draw_terrain(&self) -> bool {
        self.terrain_visible
    }

    /// Objects are never filtered.
    #[must_use]
    pub fn should_draw_object(&self) -> bool {
        true
    }
}
