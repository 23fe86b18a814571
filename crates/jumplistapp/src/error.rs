use crate::model::PageId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JumplistError {
    #[error("Page not found: {0}")]
    PageNotFound(PageId),

    #[error("Invalid selector `{input}`: {reason}")]
    Selector { input: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),
}

impl JumplistError {
    pub(crate) fn selector(input: &str, reason: impl Into<String>) -> Self {
        Self::Selector {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, JumplistError>;
