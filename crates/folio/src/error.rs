use thiserror::Error;

use folio_nav::SectionListError;

pub type Result<T> = std::result::Result<T, FolioError>;

#[derive(Debug, Error)]
pub enum FolioError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("invalid section list: {0}")]
    Sections(#[from] SectionListError),

    #[error("terminal error: {message}")]
    Terminal { message: String },
}

impl FolioError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidConfig { .. } => 2,
            Self::Terminal { .. } => 3,
            _ => 1,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn terminal(err: impl std::fmt::Display) -> Self {
        Self::Terminal {
            message: err.to_string(),
        }
    }
}
