/// Result alias for calibration, simulation and summary operations.
pub type Result<T> = std::result::Result<T, McError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum McError {
    /// Historical data is malformed or too short to calibrate from.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Paths or statistics were requested before any simulation ran.
    #[error("No simulation has been run yet; call simulate() first")]
    NotSimulated,
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl McError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }
}
