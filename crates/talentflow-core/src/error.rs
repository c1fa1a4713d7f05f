use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid question: {0}")]
    InvalidQuestion(String),
}
