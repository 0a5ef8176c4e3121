use thiserror::Error;

/// Errors raised while parsing digits or selecting a base.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BinaryError {
    /// The base is outside the supported range, or the alphabet has fewer than two symbols.
    #[error("Invalid base {0}")]
    InvalidBase(usize),

    /// A character is not a digit of the declared base.
    #[error("Invalid digit {digit:?} for base {base}")]
    InvalidDigit { digit: char, base: usize },

    /// An alphabet lists the same symbol twice, so two values would share it.
    #[error("Duplicate digit {0:?} in alphabet")]
    DuplicateDigit(char),
}
