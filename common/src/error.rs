use thiserror::Error;

pub type Result<T> = std::result::Result<T, HuffError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HuffError {
    #[error("no frequency table or code table has been built yet")]
    NotInitialized,
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("symbol {0} has no code in the code table")]
    UnknownSymbol(u8),
    #[error("symbol value {0} is outside of the single byte alphabet")]
    AlphabetViolation(usize),
    #[error("no code matches the bits ending at bit {0}")]
    InvalidCode(usize),
    #[error("bitstream ends inside a code, starting at bit {0}")]
    IncompleteCode(usize),
}
