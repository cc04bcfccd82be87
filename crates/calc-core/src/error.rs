use thiserror::Error;

/// Errors shared by the calculator crates.
///
/// `InvalidInput` means the caller supplied something a calculator cannot
/// work with (negative price, zero units, unknown frequency). A calculation
/// that runs fine but concludes "this deal does not work" is not an error:
/// calculators report that through an `is_viable` flag on their result.
#[derive(Error, Debug)]
pub enum CalcError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl CalcError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        CalcError::InvalidInput(msg.into())
    }
}

pub type CalcResult<T> = Result<T, CalcError>;
