//! Error types for Splash

use thiserror::Error;

/// The main error type for Splash operations
#[derive(Debug, Error)]
pub enum SplashError {
    #[error("Invalid configuration: {field} = {value} is not accepted")]
    InvalidConfiguration { field: String, value: f64 },

    #[error("Engine misuse: {0}")]
    EngineMisuse(String),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("Invalid preset {name}: {reason}")]
    InvalidPreset { name: String, reason: String },

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("Scene error: {0}")]
    SceneError(String),
}

/// Result type alias for Splash operations
pub type Result<T> = std::result::Result<T, SplashError>;

impl SplashError {
    /// Build an `InvalidConfiguration` error for a named numeric field
    pub fn invalid(field: impl Into<String>, value: f32) -> Self {
        SplashError::InvalidConfiguration {
            field: field.into(),
            value: value as f64,
        }
    }
}

impl From<toml::de::Error> for SplashError {
    fn from(err: toml::de::Error) -> Self {
        SplashError::TomlParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_configuration_message_names_field() {
        let err = SplashError::invalid("gravity", f32::NAN);
        let msg = err.to_string();
        assert!(msg.contains("gravity"));
        assert!(msg.contains("NaN"));
    }

    #[test]
    fn toml_error_converts() {
        let parsed: std::result::Result<toml::Value, _> = toml::from_str("= broken");
        let err: SplashError = parsed.unwrap_err().into();
        assert!(matches!(err, SplashError::TomlParseError(_)));
    }
}
