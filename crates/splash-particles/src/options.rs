//! Spawn options (defaults, presets, TOML) and their validation

use crate::preset::SplashPreset;
use crate::toml_util::{toml_color, toml_f32, toml_vec3};
use splash_core::{Color, Result, SplashError, Vec3};

/// Largest burst `spawn` accepts
pub const MAX_PARTICLES_PER_BURST: i64 = 1_000_000;

/// Options recognized by `ParticleSplashEngine::spawn`.
///
/// Omitted options fall back to `Default`, so callers usually write
/// `SplashOptions { particle_count: 50, ..Default::default() }`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplashOptions {
    pub position: Vec3,
    /// Values below 1 are clamped to 1; above `MAX_PARTICLES_PER_BURST` is rejected
    pub particle_count: i64,
    pub color: Color,
    pub size: f32,
    pub speed: f32,
    pub spread: f32,
    pub gravity: f32,
    pub lifetime: f32,
}

impl Default for SplashOptions {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            particle_count: 500,
            color: Color::from_hex(0x00aaff),
            size: 0.1,
            speed: 3.0,
            spread: 1.5,
            gravity: -9.8,
            lifetime: 2.0,
        }
    }
}

impl From<&SplashPreset> for SplashOptions {
    fn from(preset: &SplashPreset) -> Self {
        Self::from_preset(preset)
    }
}

impl SplashOptions {
    /// Every option taken from `preset`, spawning at the origin
    pub fn from_preset(preset: &SplashPreset) -> Self {
        Self {
            position: Vec3::ZERO,
            particle_count: preset.particle_count as i64,
            color: preset.color,
            size: preset.size,
            speed: preset.speed,
            spread: preset.spread,
            gravity: preset.gravity,
            lifetime: preset.lifetime,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_particle_count(mut self, count: i64) -> Self {
        self.particle_count = count;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_lifetime(mut self, lifetime: f32) -> Self {
        self.lifetime = lifetime;
        self
    }

    /// Parse options from a TOML table. Missing or unparseable keys keep their default.
    pub fn from_toml(table: &toml::value::Table) -> Self {
        let mut options = Self::default();

        if let Some(v) = table.get("position").and_then(toml_vec3) {
            options.position = v;
        }
        if let Some(v) = table.get("particle_count").and_then(|v| v.as_integer()) {
            options.particle_count = v;
        }
        if let Some(v) = table.get("color").and_then(toml_color) {
            options.color = v;
        }
        if let Some(v) = table.get("size").and_then(toml_f32) {
            options.size = v;
        }
        if let Some(v) = table.get("speed").and_then(toml_f32) {
            options.speed = v;
        }
        if let Some(v) = table.get("spread").and_then(toml_f32) {
            options.spread = v;
        }
        if let Some(v) = table.get("gravity").and_then(toml_f32) {
            options.gravity = v;
        }
        if let Some(v) = table.get("lifetime").and_then(toml_f32) {
            options.lifetime = v;
        }

        options
    }

    /// Validate and normalize into the parameters a burst is built from.
    ///
    /// Any NaN or infinite value is rejected. `particle_count` is clamped to at
    /// least 1 and rejected above `MAX_PARTICLES_PER_BURST`.
    pub(crate) fn resolve(&self) -> Result<SpawnParams> {
        let p = self.position;
        let c = self.color;
        let checks = [
            ("position.x", p.x),
            ("position.y", p.y),
            ("position.z", p.z),
            ("color.r", c.r),
            ("color.g", c.g),
            ("color.b", c.b),
            ("size", self.size),
            ("speed", self.speed),
            ("spread", self.spread),
            ("gravity", self.gravity),
            ("lifetime", self.lifetime),
        ];
        if let Some((field, value)) = checks.into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(SplashError::invalid(field, value));
        }

        if self.particle_count > MAX_PARTICLES_PER_BURST {
            return Err(SplashError::InvalidConfiguration {
                field: "particle_count".into(),
                value: self.particle_count as f64,
            });
        }
        // Within 1..=MAX_PARTICLES_PER_BURST, so the cast is lossless
        let particle_count = self.particle_count.max(1) as usize;

        Ok(SpawnParams {
            origin: self.position,
            particle_count,
            color: self.color.normalized(),
            size: self.size,
            speed: self.speed,
            spread: self.spread,
            gravity: self.gravity,
            lifetime: self.lifetime,
        })
    }
}

/// Validated spawn parameters
#[derive(Debug, Clone, Copy)]
pub(crate) struct SpawnParams {
    pub origin: Vec3,
    pub particle_count: usize,
    pub color: Color,
    pub size: f32,
    pub speed: f32,
    pub spread: f32,
    pub gravity: f32,
    pub lifetime: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let options = SplashOptions::default();
        assert_eq!(options.position, Vec3::ZERO);
        assert_eq!(options.particle_count, 500);
        assert_eq!(options.color, Color::from_hex(0x00aaff));
        assert!((options.size - 0.1).abs() < 1e-6);
        assert!((options.speed - 3.0).abs() < 1e-6);
        assert!((options.spread - 1.5).abs() < 1e-6);
        assert!((options.gravity + 9.8).abs() < 1e-6);
        assert!((options.lifetime - 2.0).abs() < 1e-6);
    }

    #[test]
    fn particle_count_clamped_to_one() {
        for count in [0, -5, i64::MIN] {
            let params = SplashOptions::default()
                .with_particle_count(count)
                .resolve()
                .unwrap();
            assert_eq!(params.particle_count, 1);
        }
    }

    #[test]
    fn particle_count_above_maximum_rejected() {
        let at_max = SplashOptions::default().with_particle_count(MAX_PARTICLES_PER_BURST);
        assert_eq!(
            at_max.resolve().unwrap().particle_count as i64,
            MAX_PARTICLES_PER_BURST
        );

        for count in [MAX_PARTICLES_PER_BURST + 1, i64::MAX] {
            let err = SplashOptions::default()
                .with_particle_count(count)
                .resolve()
                .unwrap_err();
            assert!(matches!(
                err,
                SplashError::InvalidConfiguration { ref field, .. } if field == "particle_count"
            ));
        }
    }

    #[test]
    fn non_finite_values_rejected() {
        let err = SplashOptions::default()
            .with_gravity(f32::NAN)
            .resolve()
            .unwrap_err();
        assert!(matches!(
            err,
            SplashError::InvalidConfiguration { ref field, .. } if field == "gravity"
        ));

        let err = SplashOptions::default()
            .with_position(Vec3::new(0.0, f32::INFINITY, 0.0))
            .resolve()
            .unwrap_err();
        assert!(err.to_string().contains("position.y"));
    }

    #[test]
    fn non_positive_values_accepted() {
        let options = SplashOptions {
            gravity: 3.0,
            spread: 0.0,
            speed: 0.0,
            lifetime: -1.0,
            ..Default::default()
        };
        assert!(options.resolve().is_ok());
    }

    #[test]
    fn color_is_normalized() {
        let params = SplashOptions::default()
            .with_color(Color::new(2.0, 0.5, -1.0))
            .resolve()
            .unwrap();
        assert_eq!(params.color, Color::new(1.0, 0.5, 0.0));
    }

    #[test]
    fn from_preset_copies_every_field() {
        let preset = SplashPreset::smoke();
        let options = SplashOptions::from(&preset).with_position(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(options.particle_count, 300);
        assert_eq!(options.color, preset.color);
        assert!((options.lifetime - 3.0).abs() < 1e-6);
        assert_eq!(options.position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn parse_from_toml() {
        let toml_str = r##"
position = [0, 5, 0]
particle_count = 1
color = "#ff0000"
gravity = 0
lifetime = 1.5
unknown = "ignored"
"##;
        let table: toml::value::Table = toml::from_str(toml_str).unwrap();
        let options = SplashOptions::from_toml(&table);
        assert_eq!(options.position, Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(options.particle_count, 1);
        assert_eq!(options.color, Color::new(1.0, 0.0, 0.0));
        assert_eq!(options.gravity, 0.0);
        assert!((options.lifetime - 1.5).abs() < 1e-6);
        // Untouched keys keep defaults
        assert!((options.speed - 3.0).abs() < 1e-6);
    }

    #[test]
    fn malformed_toml_values_keep_defaults() {
        let table: toml::value::Table =
            toml::from_str("size = \"big\"\nposition = [1, 2]").unwrap();
        let options = SplashOptions::from_toml(&table);
        assert_eq!(options, SplashOptions::default());
    }
}
