//! TOML helpers (handle integer/float coercion)

use splash_core::{Color, Vec3};

pub(crate) fn toml_f32(v: &toml::Value) -> Option<f32> {
    v.as_float()
        .map(|f| f as f32)
        .or_else(|| v.as_integer().map(|i| i as f32))
}

pub(crate) fn toml_vec3(v: &toml::Value) -> Option<Vec3> {
    let arr = v.as_array()?;
    if arr.len() < 3 {
        return None;
    }
    Some(Vec3::new(
        toml_f32(&arr[0])?,
        toml_f32(&arr[1])?,
        toml_f32(&arr[2])?,
    ))
}

/// Accepts `0x4db8ff`, `"#4db8ff"` or `[r, g, b]` with channels in [0, 1]
pub(crate) fn toml_color(v: &toml::Value) -> Option<Color> {
    if let Some(hex) = v.as_integer() {
        return u32::try_from(hex).ok().map(Color::from_hex);
    }
    if let Some(s) = v.as_str() {
        return Color::from_hex_str(s);
    }
    let arr = v.as_array()?;
    if arr.len() < 3 {
        return None;
    }
    Some(Color::new(
        toml_f32(&arr[0])?,
        toml_f32(&arr[1])?,
        toml_f32(&arr[2])?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(src: &str) -> toml::Value {
        let table: toml::value::Table = toml::from_str(&format!("v = {src}")).unwrap();
        table["v"].clone()
    }

    #[test]
    fn integer_float_coercion() {
        assert_eq!(toml_f32(&value("3")), Some(3.0));
        assert_eq!(toml_f32(&value("-9.8")), Some(-9.8));
        assert_eq!(toml_f32(&value("\"x\"")), None);
    }

    #[test]
    fn vec3_needs_three_numbers() {
        assert_eq!(toml_vec3(&value("[0, 5, 0]")), Some(Vec3::new(0.0, 5.0, 0.0)));
        assert_eq!(toml_vec3(&value("[0, 5]")), None);
        assert_eq!(toml_vec3(&value("[0, \"a\", 1]")), None);
    }

    #[test]
    fn color_forms() {
        assert_eq!(toml_color(&value("0xffffff")), Some(Color::WHITE));
        assert_eq!(toml_color(&value("\"#000000\"")), Some(Color::BLACK));
        assert_eq!(
            toml_color(&value("[1, 0.5, 0]")),
            Some(Color::new(1.0, 0.5, 0.0))
        );
        assert_eq!(toml_color(&value("true")), None);
    }
}
