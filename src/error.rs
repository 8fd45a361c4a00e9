//! Error types for the parts of the crate that touch the outside world.
//!
//! The per-tick resolver itself has no recoverable errors.

/// Errors raised while loading or saving [`PhysicsConfig`].
///
/// [`PhysicsConfig`]: crate::resources::physicsconfig::PhysicsConfig
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The INI file could not be read or parsed.
    #[error("failed to load config file: {0}")]
    Load(String),

    /// The INI file could not be written.
    #[error("failed to save config file: {0}")]
    Save(String),

    /// A value parsed but is unusable.
    #[error("invalid config value [{section}] {key}: {reason}")]
    Invalid {
        section: &'static str,
        key: &'static str,
        reason: String,
    },
}

/// Errors raised while reading a JSON scene description.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("failed to read scene file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scene JSON: {0}")]
    Json(#[from] serde_json::Error),
}
