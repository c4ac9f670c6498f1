//! Configuration system

use serde::{Deserialize, Serialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Top-level gameplay tunables
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GameConfig {
    /// Flight-model settings
    pub player: PlayerConfig,

    /// Fuel gauge and pickup spawning settings
    pub fuel: FuelConfig,

    /// Drifting-obstacle settings
    pub clouds: CloudConfig,
}

impl Config for GameConfig {}

/// Flight-model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Acceleration in units per second squared
    pub acceleration: f32,

    /// Below this speed (km/h) the craft stops decaying
    pub min_speed_kmh: f32,

    /// Hard speed cap in km/h
    pub max_speed_kmh: f32,

    /// Per-frame velocity decay factor applied above the minimum speed
    pub decay: f32,

    /// Half-extent of the symmetric cube the player hitbox is clamped to
    pub hitbox_extent: f32,

    /// Third-person camera offset from the craft, in craft-local axes
    pub camera_offset: [f32; 3],
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            acceleration: 28.0,
            min_speed_kmh: 100.0,
            max_speed_kmh: 250.0,
            decay: 0.9935,
            hitbox_extent: 1.5,
            camera_offset: [-6.0, 1.75, 0.0],
        }
    }
}

/// Fuel gauge and pickup configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FuelConfig {
    /// Gauge level at session start, in [0, 1]
    pub initial_level: f32,

    /// Gauge drained per world unit flown
    pub drain_per_unit: f32,

    /// Gauge restored by one pickup
    pub pickup_refill: f32,

    /// Gauge fraction below which the low-fuel warning fires
    pub low_threshold: f32,

    /// Pickups kept in the world at any time
    pub spawn_count: usize,

    /// Half-extents of the spawn volume, centered on the origin
    pub spawn_extents: [f32; 3],

    /// Uniform scale applied to pickup nodes
    pub pickup_scale: f32,

    /// Idle spin of pickup nodes in radians per second
    pub spin_rate: f32,
}

impl Default for FuelConfig {
    fn default() -> Self {
        Self {
            initial_level: 1.0,
            drain_per_unit: 0.001_25,
            pickup_refill: 0.25,
            low_threshold: 0.25,
            spawn_count: 8,
            spawn_extents: [125.0, 60.0, 125.0],
            pickup_scale: 2.0,
            spin_rate: 0.5,
        }
    }
}

/// Drifting-obstacle (cloud) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    /// Clouds kept in the world at any time
    pub count: usize,

    /// Horizontal half-extent; a cloud beyond it on x or z is recycled
    pub bound: f32,

    /// Lowest spawn altitude
    pub min_altitude: f32,

    /// Spawn altitude span above the minimum
    pub altitude_span: f32,

    /// Maximum horizontal drift speed per axis, units per second
    pub max_drift: f32,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            count: 12,
            bound: 150.0,
            min_altitude: 50.0,
            altitude_span: 15.0,
            max_drift: 1.5,
        }
    }
}
