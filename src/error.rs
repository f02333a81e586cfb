use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid setting `{name}`: {reason}")]
    InvalidSetting { name: &'static str, reason: String },

    #[error("logging: {0}")]
    Logging(String),
}

impl GameError {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
