//! Error types for Bullet World.
//!
//! The simulation has no recoverable runtime errors. Everything that can go
//! wrong is caught while building the world, the player or a spawner.

use std::fmt;

/// Errors raised while validating or loading simulation configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// World width or height is zero.
    NonPositiveWorldSize { width: u32, height: u32 },
    /// Player does not fit inside the world.
    PlayerLargerThanWorld,
    /// Spawn interval must be greater than zero.
    NonPositiveInterval(f32),
    /// Bullet lifetime must be greater than zero.
    NonPositiveLifetime(f32),
    /// Spawn duration, when set, must be greater than zero.
    NonPositiveDuration(f32),
    /// Bullet count (per angle, or ring count) must be greater than zero.
    NonPositiveCount,
    /// A stream pattern needs at least one angle.
    EmptyAngleSet,
    /// A value that must be non-negative was negative.
    Negative { field: &'static str, value: f32 },
    /// A value was NaN or infinite.
    NonFinite(&'static str),
    /// Failed to read a config file from disk.
    Io(std::io::Error),
    /// Failed to parse config JSON.
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositiveWorldSize { width, height } => {
                write!(f, "World size must be positive, got {}x{}", width, height)
            }
            ConfigError::PlayerLargerThanWorld => {
                write!(f, "Player does not fit inside the world bounds")
            }
            ConfigError::NonPositiveInterval(v) => {
                write!(f, "Spawn interval must be positive, got {}", v)
            }
            ConfigError::NonPositiveLifetime(v) => {
                write!(f, "Bullet lifetime must be positive, got {}", v)
            }
            ConfigError::NonPositiveDuration(v) => {
                write!(f, "Spawn duration must be positive, got {}", v)
            }
            ConfigError::NonPositiveCount => write!(f, "Bullet count must be positive"),
            ConfigError::EmptyAngleSet => write!(f, "Stream pattern needs at least one angle"),
            ConfigError::Negative { field, value } => {
                write!(f, "{} must not be negative, got {}", field, value)
            }
            ConfigError::NonFinite(field) => write!(f, "{} must be a finite number", field),
            ConfigError::Io(e) => write!(f, "Failed to read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Reject NaN/infinite values
pub(crate) fn ensure_finite(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonFinite(field))
    }
}

/// Reject negative (and non-finite) values
pub(crate) fn ensure_non_negative(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    let value = ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(ConfigError::Negative { field, value });
    }
    Ok(value)
}
