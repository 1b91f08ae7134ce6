//! Splash Particles - real-time particle splash simulation
//!
//! Provides burst-based particle simulation with:
//! - Uniform spherical ejection with an upward bias
//! - Explicit Euler integration with gravity and a damped ground bounce
//! - Burst-wide opacity fade derived from particle age
//! - Disposal of fully decayed bursts through a `SplashScene` collaborator
//! - Named presets (water, fire, smoke, magic, snow), extendable from TOML

pub mod burst;
pub mod curves;
pub mod engine;
pub mod options;
pub mod preset;
pub mod rand;
pub mod scene;
mod toml_util;

use splash_core::{Result, SplashError};
use splash_runtime::RuntimeSystem;

pub use burst::ParticleBurst;
pub use engine::{AdvanceReport, ParticleSplashEngine, RetiredBurst};
pub use options::{MAX_PARTICLES_PER_BURST, SplashOptions};
pub use preset::{PresetRegistry, SplashPreset};
pub use scene::{
    DrawableId, HeadlessDrawable, HeadlessScene, PointBatch, SplashMaterial,
    SplashScene,
};

/// The splash engine as a frame-loop system
pub struct SplashSystem<S: SplashScene> {
    engine: ParticleSplashEngine<S>,
    last_report: AdvanceReport,
}

impl<S: SplashScene> SplashSystem<S> {
    pub fn new(engine: ParticleSplashEngine<S>) -> Self {
        Self {
            engine,
            last_report: AdvanceReport::default(),
        }
    }

    pub fn engine(&self) -> &ParticleSplashEngine<S> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ParticleSplashEngine<S> {
        &mut self.engine
    }

    /// What the most recent frame retired
    pub fn last_report(&self) -> &AdvanceReport {
        &self.last_report
    }
}

impl<S: SplashScene> RuntimeSystem for SplashSystem<S> {
    fn initialize(&mut self) -> Result<()> {
        let names: Vec<_> = self.engine.presets().names().collect();
        log::info!(
            target: "splash::particles",
            "splash system ready with presets: {}",
            names.join(", ")
        );
        Ok(())
    }

    fn update(&mut self, dt: f64) -> Result<()> {
        let dt = dt as f32;
        if !dt.is_finite() {
            return Err(SplashError::EngineMisuse(format!(
                "frame delta {dt} out of range"
            )));
        }
        self.last_report = self.engine.advance(dt)?;
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        self.engine.clear();
        Ok(())
    }

    fn name(&self) -> &str {
        "particles"
    }
}
