//! Named splash presets and the immutable registry that serves them

use crate::options::MAX_PARTICLES_PER_BURST;
use crate::toml_util::toml_color;
use serde::{Deserialize, Deserializer};
use splash_core::{Color, Result, SplashError};
use std::collections::BTreeMap;

/// An immutable bundle of spawn parameters describing one splash "flavor".
///
/// Deserialized from TOML with every field required.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SplashPreset {
    #[serde(deserialize_with = "deserialize_color")]
    pub color: Color,
    pub particle_count: u32,
    pub size: f32,
    pub speed: f32,
    pub spread: f32,
    /// Negative falls, positive floats upward
    pub gravity: f32,
    /// Seconds a particle remains visible
    pub lifetime: f32,
}

impl SplashPreset {
    pub fn water() -> Self {
        Self::from_hex(0x4db8ff, 800, 0.08, 4.0, 1.8, -12.0, 1.5)
    }

    /// Sparks that float upward
    pub fn fire() -> Self {
        Self::from_hex(0xff6600, 1000, 0.05, 5.0, 1.5, 2.0, 1.0)
    }

    /// Slow rising smoke
    pub fn smoke() -> Self {
        Self::from_hex(0x888888, 300, 0.3, 1.0, 2.0, 1.0, 3.0)
    }

    /// Weightless
    pub fn magic() -> Self {
        Self::from_hex(0xff00ff, 1200, 0.06, 6.0, 2.0, 0.0, 2.0)
    }

    pub fn snow() -> Self {
        Self::from_hex(0xffffff, 600, 0.1, 2.0, 2.5, -2.0, 3.0)
    }

    fn from_hex(
        rgb: u32,
        particle_count: u32,
        size: f32,
        speed: f32,
        spread: f32,
        gravity: f32,
        lifetime: f32,
    ) -> Self {
        Self {
            color: Color::from_hex(rgb),
            particle_count,
            size,
            speed,
            spread,
            gravity,
            lifetime,
        }
    }

    /// Check the value ranges a preset must satisfy
    pub fn validate(&self, name: &str) -> Result<()> {
        let fail = |reason: String| {
            Err(SplashError::InvalidPreset {
                name: name.to_string(),
                reason,
            })
        };
        if !self.color.is_finite() {
            return fail("color must be finite".into());
        }
        if self.particle_count == 0 {
            return fail("particle_count must be positive".into());
        }
        if i64::from(self.particle_count) > MAX_PARTICLES_PER_BURST {
            return fail(format!(
                "particle_count must be at most {MAX_PARTICLES_PER_BURST}, got {}",
                self.particle_count
            ));
        }
        for (field, value) in [
            ("size", self.size),
            ("speed", self.speed),
            ("lifetime", self.lifetime),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return fail(format!("{field} must be a positive number, got {value}"));
            }
        }
        if !(self.spread.is_finite() && self.spread >= 0.0) {
            return fail(format!("spread must be non-negative, got {}", self.spread));
        }
        if !self.gravity.is_finite() {
            return fail(format!("gravity must be finite, got {}", self.gravity));
        }
        Ok(())
    }
}

/// `0x4db8ff`, `"#4db8ff"` or `[r, g, b]`, clamped into [0, 1]
fn deserialize_color<'de, D>(deserializer: D) -> std::result::Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    let value = toml::Value::deserialize(deserializer)?;
    toml_color(&value)
        .map(|c| c.normalized())
        .ok_or_else(|| serde::de::Error::custom(format!("invalid color `{value}`")))
}

/// Layout of a preset file; keys outside `[presets]` are ignored
#[derive(Debug, Deserialize)]
struct PresetFile {
    #[serde(default)]
    presets: BTreeMap<String, SplashPreset>,
}

/// Immutable name → preset map, built once and never mutated
#[derive(Debug, Clone)]
pub struct PresetRegistry {
    presets: BTreeMap<String, SplashPreset>,
}

impl PresetRegistry {
    /// The five built-in presets: water, fire, smoke, magic, snow
    pub fn builtin() -> Self {
        let presets = [
            ("water", SplashPreset::water()),
            ("fire", SplashPreset::fire()),
            ("smoke", SplashPreset::smoke()),
            ("magic", SplashPreset::magic()),
            ("snow", SplashPreset::snow()),
        ]
        .into_iter()
        .map(|(name, preset)| (name.to_string(), preset))
        .collect();
        Self { presets }
    }

    /// Built-ins overlaid with the `[presets.<name>]` tables of a TOML document.
    ///
    /// A table named like a built-in replaces it.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let file: PresetFile = toml::from_str(source)?;
        let mut registry = Self::builtin();

        let loaded = file.presets.len();
        for (name, preset) in file.presets {
            preset.validate(&name)?;
            registry.presets.insert(name, preset);
        }
        log::debug!(
            target: "splash::presets",
            "loaded {loaded} preset(s) from TOML"
        );
        Ok(registry)
    }

    pub fn get(&self, name: &str) -> Option<&SplashPreset> {
        self.presets.get(name)
    }

    /// Like `get`, but an unknown name is an error
    pub fn require(&self, name: &str) -> Result<&SplashPreset> {
        self.get(name)
            .ok_or_else(|| SplashError::UnknownPreset(name.to_string()))
    }

    /// Preset names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

impl Default for PresetRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
