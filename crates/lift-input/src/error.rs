use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("request parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type InputResult<T> = Result<T, InputError>;
