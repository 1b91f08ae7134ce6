//! The scene collaborator contract: how bursts reach the renderer
//!
//! The engine never renders. Each burst hands its buffers to a `SplashScene`
//! as a `PointBatch`, and the scene turns that into whatever drawable it uses.

use splash_core::{Result, SplashError};
use std::collections::HashMap;

/// Material description for one burst's point sprites
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplashMaterial {
    /// Base point-sprite size; per-particle sizes scale around it
    pub size: f32,
    /// Opacity at birth, before any fade
    pub opacity: f32,
    /// Additive blending instead of alpha blending
    pub additive: bool,
    pub transparent: bool,
    pub depth_write: bool,
    pub size_attenuation: bool,
    pub vertex_colors: bool,
}

impl SplashMaterial {
    pub const BASE_OPACITY: f32 = 0.8;

    /// Additive, transparent, depth-write-disabled, size-attenuated point sprites
    pub fn point_sprites(size: f32) -> Self {
        Self {
            size,
            opacity: Self::BASE_OPACITY,
            additive: true,
            transparent: true,
            depth_write: false,
            size_attenuation: true,
            vertex_colors: true,
        }
    }
}

/// Borrowed view of one burst's renderable state
#[derive(Debug, Clone, Copy)]
pub struct PointBatch<'a> {
    pub positions: &'a [[f32; 3]],
    pub colors: &'a [[f32; 3]],
    pub sizes: &'a [f32],
    /// Current burst-wide opacity
    pub opacity: f32,
    pub material: &'a SplashMaterial,
}

impl PointBatch<'_> {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Positions as raw bytes, 12 per particle
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.positions)
    }

    /// Colors as raw bytes, 12 per particle
    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.colors)
    }

    /// Sizes as raw bytes, 4 per particle
    pub fn size_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.sizes)
    }
}

/// Capabilities the engine needs from the scene that displays its bursts.
///
/// The engine creates one drawable per burst, attaches it, pushes an update
/// after every simulation step, and on disposal always calls `detach` followed
/// by `release`. `release` takes the handle by value so it can only happen once.
pub trait SplashScene {
    type Drawable;

    /// Build a drawable for a freshly spawned burst
    fn create_drawable(&mut self, batch: &PointBatch<'_>) -> Result<Self::Drawable>;

    /// Make the drawable visible
    fn attach(&mut self, drawable: &Self::Drawable);

    /// New positions and opacity are ready; the drawable needs a redraw
    fn update(&mut self, drawable: &Self::Drawable, batch: &PointBatch<'_>);

    /// Remove the drawable from the visible scene
    fn detach(&mut self, drawable: &Self::Drawable);

    /// Free every resource behind the drawable
    fn release(&mut self, drawable: Self::Drawable);
}

/// Handle type used by `HeadlessScene`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DrawableId(pub u64);

/// What a `HeadlessScene` knows about one drawable
#[derive(Debug, Clone)]
pub struct HeadlessDrawable {
    pub particle_count: usize,
    pub positions: Vec<[f32; 3]>,
    pub opacity: f32,
    pub material: SplashMaterial,
    pub attached: bool,
    /// Number of `update` calls received
    pub uploads: usize,
}

/// In-memory scene that records what it is told, for headless runs and tests
#[derive(Debug, Default)]
pub struct HeadlessScene {
    next_id: u64,
    drawables: HashMap<DrawableId, HeadlessDrawable>,
    released: usize,
    fail_next_create: bool,
}

impl HeadlessScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `create_drawable` call fail
    pub fn fail_next_create(&mut self) {
        self.fail_next_create = true;
    }

    pub fn drawable(&self, id: DrawableId) -> Option<&HeadlessDrawable> {
        self.drawables.get(&id)
    }

    /// Drawables created and not yet released
    pub fn live_count(&self) -> usize {
        self.drawables.len()
    }

    pub fn attached_count(&self) -> usize {
        self.drawables.values().filter(|d| d.attached).count()
    }

    pub fn released_count(&self) -> usize {
        self.released
    }
}

impl SplashScene for HeadlessScene {
    type Drawable = DrawableId;

    fn create_drawable(&mut self, batch: &PointBatch<'_>) -> Result<DrawableId> {
        if std::mem::take(&mut self.fail_next_create) {
            return Err(SplashError::SceneError(
                "headless scene refused to create a drawable".into(),
            ));
        }
        self.next_id += 1;
        let id = DrawableId(self.next_id);
        self.drawables.insert(
            id,
            HeadlessDrawable {
                particle_count: batch.len(),
                positions: batch.positions.to_vec(),
                opacity: batch.opacity,
                material: *batch.material,
                attached: false,
                uploads: 0,
            },
        );
        Ok(id)
    }

    fn attach(&mut self, drawable: &DrawableId) {
        if let Some(d) = self.drawables.get_mut(drawable) {
            d.attached = true;
        }
    }

    fn update(&mut self, drawable: &DrawableId, batch: &PointBatch<'_>) {
        if let Some(d) = self.drawables.get_mut(drawable) {
            d.positions.clear();
            d.positions.extend_from_slice(batch.positions);
            d.opacity = batch.opacity;
            d.uploads += 1;
        }
    }

    fn detach(&mut self, drawable: &DrawableId) {
        if let Some(d) = self.drawables.get_mut(drawable) {
            d.attached = false;
        }
    }

    fn release(&mut self, drawable: DrawableId) {
        if self.drawables.remove(&drawable).is_some() {
            self.released += 1;
        }
    }
}
