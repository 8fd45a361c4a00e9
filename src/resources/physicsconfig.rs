//! Physics configuration resource.
//!
//! Describes the simulated universe the spatial hashes cover, the cell size
//! of each hash and the fixed tick length. Values come from an INI file with
//! safe defaults for anything missing.
//!
//! # Configuration File Format
//!
//! ```ini
//! [world]
//! x = 0
//! y = 0
//! width = 4096
//! height = 4096
//!
//! [hash]
//! interactive_cell_size = 64
//! solid_cell_size = 32
//!
//! [simulation]
//! fixed_delta = 0.0166667
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::resources::collisionhashes::CollisionHashes;

/// Default safe values for startup
const DEFAULT_WORLD_X: i32 = 0;
const DEFAULT_WORLD_Y: i32 = 0;
const DEFAULT_WORLD_WIDTH: i32 = 4096;
const DEFAULT_WORLD_HEIGHT: i32 = 4096;
const DEFAULT_INTERACTIVE_CELL_SIZE: i32 = 64;
const DEFAULT_SOLID_CELL_SIZE: i32 = 32;
const DEFAULT_FIXED_DELTA: f32 = 1.0 / 60.0;
const DEFAULT_CONFIG_PATH: &str = "./physics.ini";

/// Physics configuration resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct PhysicsConfig {
    /// Left edge of the simulated universe.
    pub world_x: i32,
    /// Top edge of the simulated universe.
    pub world_y: i32,
    pub world_width: i32,
    pub world_height: i32,
    /// Cell size of the hash used for the overlap relation.
    pub interactive_cell_size: i32,
    /// Cell size of the hash used for blocking movement and touching probes.
    pub solid_cell_size: i32,
    /// Length of one simulation tick in seconds.
    pub fixed_delta: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            world_x: DEFAULT_WORLD_X,
            world_y: DEFAULT_WORLD_Y,
            world_width: DEFAULT_WORLD_WIDTH,
            world_height: DEFAULT_WORLD_HEIGHT,
            interactive_cell_size: DEFAULT_INTERACTIVE_CELL_SIZE,
            solid_cell_size: DEFAULT_SOLID_CELL_SIZE,
            fixed_delta: DEFAULT_FIXED_DELTA,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    pub fn load_from_file(&mut self) -> Result<(), ConfigError> {
        let mut config = Ini::new();
        config.load(&self.config_path).map_err(ConfigError::Load)?;
        self.apply(&config)?;
        info!("Loaded physics config from {:?}", self.config_path);
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), ConfigError> {
        let mut config = Ini::new();
        config.read(text.to_string()).map_err(ConfigError::Load)?;
        self.apply(&config)
    }

    fn apply(&mut self, config: &Ini) -> Result<(), ConfigError> {
        // [world] section
        if let Some(x) = config.getint("world", "x").map_err(ConfigError::Load)? {
            self.world_x = x as i32;
        }
        if let Some(y) = config.getint("world", "y").map_err(ConfigError::Load)? {
            self.world_y = y as i32;
        }
        if let Some(width) = config.getint("world", "width").map_err(ConfigError::Load)? {
            self.world_width = width as i32;
        }
        if let Some(height) = config.getint("world", "height").map_err(ConfigError::Load)? {
            self.world_height = height as i32;
        }

        // [hash] section
        if let Some(size) = config
            .getint("hash", "interactive_cell_size")
            .map_err(ConfigError::Load)?
        {
            self.interactive_cell_size = size as i32;
        }
        if let Some(size) = config
            .getint("hash", "solid_cell_size")
            .map_err(ConfigError::Load)?
        {
            self.solid_cell_size = size as i32;
        }

        // [simulation] section
        if let Some(delta) = config
            .getfloat("simulation", "fixed_delta")
            .map_err(ConfigError::Load)?
        {
            self.fixed_delta = delta as f32;
        }

        self.validate()?;

        info!(
            "Physics config: world {}x{} at ({}, {}), cells interactive={} solid={}, dt={}",
            self.world_width,
            self.world_height,
            self.world_x,
            self.world_y,
            self.interactive_cell_size,
            self.solid_cell_size,
            self.fixed_delta
        );

        Ok(())
    }

    /// Reject values the spatial hashes cannot be built from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("world", "width", self.world_width),
            ("world", "height", self.world_height),
            ("hash", "interactive_cell_size", self.interactive_cell_size),
            ("hash", "solid_cell_size", self.solid_cell_size),
        ];
        for (section, key, value) in positive {
            if value <= 0 {
                return Err(ConfigError::Invalid {
                    section,
                    key,
                    reason: format!("must be positive, got {value}"),
                });
            }
        }
        if !(self.fixed_delta > 0.0) {
            return Err(ConfigError::Invalid {
                section: "simulation",
                key: "fixed_delta",
                reason: format!("must be positive, got {}", self.fixed_delta),
            });
        }
        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), ConfigError> {
        let mut config = Ini::new();

        config.set("world", "x", Some(self.world_x.to_string()));
        config.set("world", "y", Some(self.world_y.to_string()));
        config.set("world", "width", Some(self.world_width.to_string()));
        config.set("world", "height", Some(self.world_height.to_string()));

        config.set(
            "hash",
            "interactive_cell_size",
            Some(self.interactive_cell_size.to_string()),
        );
        config.set(
            "hash",
            "solid_cell_size",
            Some(self.solid_cell_size.to_string()),
        );

        config.set(
            "simulation",
            "fixed_delta",
            Some(self.fixed_delta.to_string()),
        );

        config
            .write(&self.config_path)
            .map_err(|e| ConfigError::Save(e.to_string()))?;

        info!("Saved physics config to {:?}", self.config_path);

        Ok(())
    }

    /// Build the interactive and solid hashes covering the configured world.
    pub fn build_hashes(&self) -> CollisionHashes {
        CollisionHashes::new(
            self.world_x,
            self.world_y,
            self.world_width,
            self.world_height,
            self.interactive_cell_size,
            self.solid_cell_size,
        )
    }
}
