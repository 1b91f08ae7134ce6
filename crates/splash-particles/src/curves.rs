//! Value-over-lifetime helpers

/// Linear interpolation between two floats
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Normalized age in [0, 1]. A non-positive lifetime counts as fully aged.
pub fn age_ratio(age: f32, lifetime: f32) -> f32 {
    if lifetime <= 0.0 {
        1.0
    } else {
        (age / lifetime).clamp(0.0, 1.0)
    }
}

/// Linear fade from `base` at birth to 0 at end of life, never negative
pub fn fade_opacity(base: f32, age: f32, lifetime: f32) -> f32 {
    lerp_f32(base, 0.0, age_ratio(age, lifetime)).max(0.0)
}
