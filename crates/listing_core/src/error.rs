use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    #[error("invalid page result: {0}")]
    InvalidPageResult(String),
}
