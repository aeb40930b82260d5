use thiserror::Error;

/// Internal world-consistency errors. These are never shown to the player verbatim.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// A transition or teleport binding named a location the registry does not know.
    #[error("location not found: {name}")]
    UnknownLocation { name: String },

    /// Two locations registered under the same name.
    #[error("duplicate location: {name}")]
    DuplicateLocation { name: String },

    /// A world was built without any locations.
    #[error("world '{0}' has no locations")]
    EmptyWorld(String),

    /// Configuration named a world the catalogue does not have.
    #[error("unknown world '{0}'")]
    UnknownWorld(String),
}
