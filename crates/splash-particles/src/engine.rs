//! The splash engine: owns live bursts, steps them each frame, disposes decayed ones

use crate::burst::{ParticleBuffers, ParticleBurst};
use crate::options::SplashOptions;
use crate::preset::PresetRegistry;
use crate::rand::ParticleRng;
use crate::scene::{SplashMaterial, SplashScene};
use splash_core::{BurstId, Result, SplashError, Vec3};

/// A burst removed during `advance`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetiredBurst {
    pub id: BurstId,
    pub particle_count: usize,
    /// Oldest particle age when the burst decayed
    pub final_age: f32,
}

/// Outcome of one `advance` call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdvanceReport {
    /// Bursts disposed in this call, in spawn order
    pub retired: Vec<RetiredBurst>,
}

impl AdvanceReport {
    pub fn decayed_count(&self) -> usize {
        self.retired.len()
    }
}

/// Spawns particle bursts and evolves them over time.
///
/// The engine is driven from a single animation context: `spawn`, `advance`
/// and `clear` are called sequentially, and every buffer write flows from the
/// engine to its `SplashScene`.
pub struct ParticleSplashEngine<S: SplashScene> {
    scene: S,
    bursts: Vec<ParticleBurst<S::Drawable>>,
    presets: PresetRegistry,
    rng: ParticleRng,
    next_id: BurstId,
    /// Sum of accepted `advance` deltas, in seconds
    elapsed: f64,
}

impl<S: SplashScene> ParticleSplashEngine<S> {
    pub const DEFAULT_SEED: u32 = 0xDEAD_BEEF;

    pub fn new(scene: S) -> Self {
        Self::with_seed(scene, Self::DEFAULT_SEED)
    }

    pub fn with_seed(scene: S, seed: u32) -> Self {
        Self {
            scene,
            bursts: Vec::new(),
            presets: PresetRegistry::builtin(),
            rng: ParticleRng::new(seed),
            next_id: BurstId(1),
            elapsed: 0.0,
        }
    }

    /// Replace the preset registry used by `spawn_preset`
    pub fn with_presets(mut self, presets: PresetRegistry) -> Self {
        self.presets = presets;
        self
    }

    /// Create a burst, attach its drawable and start tracking it.
    ///
    /// On error nothing is registered, no drawable is left attached and the
    /// random stream is not advanced.
    pub fn spawn(&mut self, options: &SplashOptions) -> Result<BurstId> {
        let params = options.resolve().inspect_err(|e| {
            log::warn!(target: "splash::engine", "spawn rejected: {e}");
        })?;

        // Sample from a copy so a refused drawable leaves the RNG untouched
        let mut rng = self.rng.clone();
        let buffers = ParticleBuffers::eject(&params, &mut rng);
        let material = SplashMaterial::point_sprites(params.size);

        let id = self.next_id;
        let drawable = self
            .scene
            .create_drawable(&buffers.batch(material.opacity, &material))?;
        self.rng = rng;
        let burst = ParticleBurst::new(id, &params, buffers, material, self.elapsed, drawable);

        self.scene.attach(burst.drawable());
        self.next_id = id.next();

        log::debug!(
            target: "splash::engine",
            "spawned {id}: {} particles at ({}, {}, {}), lifetime {}s",
            burst.particle_count(),
            params.origin.x,
            params.origin.y,
            params.origin.z,
            params.lifetime
        );
        self.bursts.push(burst);
        Ok(id)
    }

    /// Spawn a named preset at `position`
    pub fn spawn_preset(&mut self, name: &str, position: Vec3) -> Result<BurstId> {
        let preset = *self.presets.require(name)?;
        self.spawn(&SplashOptions::from_preset(&preset).with_position(position))
    }

    /// Step every live burst by `dt` seconds and dispose the ones that decayed.
    ///
    /// A negative or non-finite `dt` is rejected before any burst is touched.
    pub fn advance(&mut self, dt: f32) -> Result<AdvanceReport> {
        if !dt.is_finite() || dt < 0.0 {
            log::warn!(target: "splash::engine", "advance rejected: dt = {dt}");
            return Err(SplashError::EngineMisuse(format!(
                "advance requires a finite, non-negative delta, got {dt}"
            )));
        }
        self.elapsed += dt as f64;

        for burst in &mut self.bursts {
            burst.advance(dt);
        }

        let (decayed, live): (Vec<_>, Vec<_>) = std::mem::take(&mut self.bursts)
            .into_iter()
            .partition(|b| b.is_decayed());
        self.bursts = live;

        for burst in &self.bursts {
            self.scene.update(burst.drawable(), &burst.batch());
        }

        let mut report = AdvanceReport::default();
        for burst in decayed {
            report.retired.push(RetiredBurst {
                id: burst.id(),
                particle_count: burst.particle_count(),
                final_age: burst.oldest_age(),
            });
            log::debug!(target: "splash::engine", "{} decayed", burst.id());
            dispose(&mut self.scene, burst);
        }
        Ok(report)
    }

    /// Dispose one live burst. Returns false if `id` is not live.
    pub fn remove(&mut self, id: BurstId) -> bool {
        let Some(index) = self.bursts.iter().position(|b| b.id() == id) else {
            return false;
        };
        let burst = self.bursts.remove(index);
        dispose(&mut self.scene, burst);
        true
    }

    /// Dispose every live burst. Returns how many were disposed.
    pub fn clear(&mut self) -> usize {
        let count = self.bursts.len();
        for burst in self.bursts.drain(..) {
            dispose(&mut self.scene, burst);
        }
        if count > 0 {
            log::info!(target: "splash::engine", "cleared {count} burst(s)");
        }
        count
    }

    /// Number of live bursts
    pub fn active_count(&self) -> usize {
        self.bursts.len()
    }

    /// Particles across all live bursts
    pub fn total_particles(&self) -> usize {
        self.bursts.iter().map(|b| b.particle_count()).sum()
    }

    pub fn burst(&self, id: BurstId) -> Option<&ParticleBurst<S::Drawable>> {
        self.bursts.iter().find(|b| b.id() == id)
    }

    /// Live bursts in spawn order
    pub fn bursts(&self) -> &[ParticleBurst<S::Drawable>] {
        &self.bursts
    }

    pub fn presets(&self) -> &PresetRegistry {
        &self.presets
    }

    /// Simulation clock in seconds
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }
}

impl<S: SplashScene> Drop for ParticleSplashEngine<S> {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Detach and release together, so a drawable is never left behind
fn dispose<S: SplashScene>(scene: &mut S, burst: ParticleBurst<S::Drawable>) {
    let drawable = burst.into_drawable();
    scene.detach(&drawable);
    scene.release(drawable);
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::scene::HeadlessScene;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn ages_never_decrease(
            seed in 1u32..u32::MAX,
            steps in prop::collection::vec(0u32..64, 1..20),
        ) {
            let mut engine = ParticleSplashEngine::with_seed(HeadlessScene::new(), seed);
            let id = engine
                .spawn(&SplashOptions { particle_count: 16, lifetime: 1000.0, ..Default::default() })
                .unwrap();

            let mut last = engine.burst(id).unwrap().ages().to_vec();
            for step in steps {
                // Multiples of 1/64 add exactly in f32
                let dt = step as f32 / 64.0;
                engine.advance(dt).unwrap();
                let ages = engine.burst(id).unwrap().ages().to_vec();
                for (before, after) in last.iter().zip(&ages) {
                    if dt > 0.0 {
                        prop_assert!(after > before);
                    } else {
                        prop_assert_eq!(after, before);
                    }
                }
                last = ages;
            }
        }

        #[test]
        fn particle_count_is_fixed_for_life(
            count in 1i64..300,
            steps in 1usize..40,
        ) {
            let mut engine = ParticleSplashEngine::with_seed(HeadlessScene::new(), 9);
            let id = engine
                .spawn(&SplashOptions { particle_count: count, lifetime: 1.0, ..Default::default() })
                .unwrap();
            for _ in 0..steps {
                let report = engine.advance(1.0 / 32.0).unwrap();
                match engine.burst(id) {
                    Some(burst) => {
                        prop_assert_eq!(burst.particle_count() as i64, count);
                        prop_assert_eq!(burst.positions().len() as i64, count);
                        prop_assert_eq!(burst.ages().len() as i64, count);
                    }
                    None => {
                        prop_assert_eq!(report.retired[0].particle_count as i64, count);
                        break;
                    }
                }
            }
        }

        #[test]
        fn decay_matches_elapsed_time(quarters in 1u32..16, extra in 0u32..4) {
            let lifetime = quarters as f32 * 0.25;
            let mut engine = ParticleSplashEngine::with_seed(HeadlessScene::new(), 3);
            engine
                .spawn(&SplashOptions { particle_count: 8, lifetime, ..Default::default() })
                .unwrap();

            for _ in 0..quarters - 1 {
                engine.advance(0.25).unwrap();
            }
            prop_assert_eq!(engine.active_count(), 1);

            engine.advance(0.25 * (1 + extra) as f32).unwrap();
            prop_assert_eq!(engine.active_count(), 0);
        }
    }
}
