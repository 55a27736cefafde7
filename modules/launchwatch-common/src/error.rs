use thiserror::Error;

#[derive(Error, Debug)]
pub enum LaunchwatchError {
    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Validation error: {0}")]
    Validation(String),
}
