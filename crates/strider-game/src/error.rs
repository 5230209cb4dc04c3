use thiserror::Error;

/// A configuration value that cannot drive the controller
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("Failed to parse controller config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// A controller that cannot be assembled from what the host supplied
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("No input source supplied")]
    MissingInput,

    #[error("No physics backend supplied")]
    MissingPhysics,

    #[error("No animation backend supplied")]
    MissingAnimator,

    #[error("No character body supplied")]
    MissingBody,

    #[error("Character body {0} is not known to the physics backend")]
    UnknownBody(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
