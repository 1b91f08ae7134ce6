//! One spawned splash: per-particle kinematic state plus burst metadata

use crate::curves::fade_opacity;
use crate::options::SpawnParams;
use crate::rand::ParticleRng;
use crate::scene::{PointBatch, SplashMaterial};
use splash_core::{BurstId, Vec3};

/// Fraction of vertical speed kept (and inverted) when a particle hits the ground
pub const GROUND_RESTITUTION: f32 = 0.3;

/// Ground plane height
pub const GROUND_Y: f32 = 0.0;

/// Struct-of-arrays particle state. All vectors share one length, fixed at spawn.
#[derive(Debug, Clone)]
pub(crate) struct ParticleBuffers {
    pub positions: Vec<[f32; 3]>,
    pub velocities: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 3]>,
    pub sizes: Vec<f32>,
    pub ages: Vec<f32>,
}

impl ParticleBuffers {
    /// Uniform spherical ejection with an upward bias
    pub fn eject(params: &SpawnParams, rng: &mut ParticleRng) -> Self {
        let n = params.particle_count;
        let origin = params.origin.to_array();
        let base = params.color.to_array();

        let mut velocities = Vec::with_capacity(n);
        let mut colors = Vec::with_capacity(n);
        let mut sizes = Vec::with_capacity(n);

        for _ in 0..n {
            let (theta, phi) = rng.sphere_angles();
            let speed = params.speed * (0.5 + 0.5 * rng.next_f32());
            let horizontal = phi.sin() * speed * params.spread;
            velocities.push([
                horizontal * theta.cos(),
                // Always leaves upward, whichever hemisphere was sampled
                phi.cos().abs() * speed,
                horizontal * theta.sin(),
            ]);

            colors.push([
                base[0] * rng.range(0.8, 1.2),
                base[1] * rng.range(0.8, 1.2),
                base[2] * rng.range(0.8, 1.2),
            ]);

            sizes.push(params.size * (0.5 + 1.5 * rng.next_f32()));
        }

        Self {
            positions: vec![origin; n],
            velocities,
            colors,
            sizes,
            ages: vec![0.0; n],
        }
    }

    pub fn len(&self) -> usize {
        self.ages.len()
    }

    /// One explicit Euler step. Returns true when every particle has reached `lifetime`.
    pub fn integrate(&mut self, dt: f32, gravity: f32, lifetime: f32) -> bool {
        let mut all_dead = true;

        for i in 0..self.ages.len() {
            self.ages[i] += dt;
            if self.ages[i] >= lifetime {
                continue;
            }
            all_dead = false;

            let p = &mut self.positions[i];
            let v = &mut self.velocities[i];
            p[0] += v[0] * dt;
            p[1] += v[1] * dt;
            p[2] += v[2] * dt;

            v[1] += gravity * dt;

            if p[1] < GROUND_Y {
                p[1] = GROUND_Y;
                v[1] *= -GROUND_RESTITUTION;
            }
        }

        all_dead
    }

    pub fn oldest_age(&self) -> f32 {
        self.ages.iter().copied().fold(0.0, f32::max)
    }

    pub fn batch<'a>(&'a self, opacity: f32, material: &'a SplashMaterial) -> PointBatch<'a> {
        PointBatch {
            positions: &self.positions,
            colors: &self.colors,
            sizes: &self.sizes,
            opacity,
            material,
        }
    }
}

/// A live splash owned by the engine, together with its drawable handle
#[derive(Debug)]
pub struct ParticleBurst<D> {
    id: BurstId,
    origin: Vec3,
    buffers: ParticleBuffers,
    gravity: f32,
    max_lifetime: f32,
    /// Engine clock (seconds) at spawn
    birth_time: f64,
    material: SplashMaterial,
    opacity: f32,
    decayed: bool,
    drawable: D,
}

impl<D> ParticleBurst<D> {
    pub(crate) fn new(
        id: BurstId,
        params: &SpawnParams,
        buffers: ParticleBuffers,
        material: SplashMaterial,
        birth_time: f64,
        drawable: D,
    ) -> Self {
        Self {
            id,
            origin: params.origin,
            buffers,
            gravity: params.gravity,
            max_lifetime: params.lifetime,
            birth_time,
            opacity: material.opacity,
            material,
            decayed: false,
            drawable,
        }
    }

    /// Step every particle by `dt` and refresh the burst opacity.
    ///
    /// Opacity follows the oldest particle's age ratio. Returns true once the
    /// burst has decayed.
    pub(crate) fn advance(&mut self, dt: f32) -> bool {
        self.decayed = self
            .buffers
            .integrate(dt, self.gravity, self.max_lifetime);
        self.opacity = fade_opacity(
            self.material.opacity,
            self.buffers.oldest_age(),
            self.max_lifetime,
        );
        self.decayed
    }

    /// The renderable view handed to the scene
    pub fn batch(&self) -> PointBatch<'_> {
        self.buffers.batch(self.opacity, &self.material)
    }

    pub(crate) fn into_drawable(self) -> D {
        self.drawable
    }

    pub fn id(&self) -> BurstId {
        self.id
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn particle_count(&self) -> usize {
        self.buffers.len()
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.buffers.positions
    }

    pub fn velocities(&self) -> &[[f32; 3]] {
        &self.buffers.velocities
    }

    pub fn colors(&self) -> &[[f32; 3]] {
        &self.buffers.colors
    }

    pub fn sizes(&self) -> &[f32] {
        &self.buffers.sizes
    }

    pub fn ages(&self) -> &[f32] {
        &self.buffers.ages
    }

    pub fn oldest_age(&self) -> f32 {
        self.buffers.oldest_age()
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    pub fn max_lifetime(&self) -> f32 {
        self.max_lifetime
    }

    pub fn birth_time(&self) -> f64 {
        self.birth_time
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn material(&self) -> &SplashMaterial {
        &self.material
    }

    pub fn is_decayed(&self) -> bool {
        self.decayed
    }

    pub fn drawable(&self) -> &D {
        &self.drawable
    }
}
