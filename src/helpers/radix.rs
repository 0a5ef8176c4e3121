use std::collections::HashSet;

use super::bn::BigNumberHelper;
use super::error::BinaryError;

/// Digit symbols in value order, shared by every built-in base.
pub const STANDARD: &str = "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub const BINARY: &str = "01";
pub const OCTAL: &str = "01234567";
pub const DECIMAL: &str = "0123456789";
pub const HEX: &str = "0123456789abcdef";
pub const BASE32: &str = "0123456789abcdefghijklmnopqrstuv";
pub const BASE36: &str = "0123456789abcdefghijklmnopqrstuvwxyz";

/// Bounds for bases accepted as digit-string input.
pub const MIN_BASE: usize = 2;
pub const MAX_BASE: usize = 32;

pub fn check_base(base: usize) -> Result<(), BinaryError> {
    if !(MIN_BASE..=MAX_BASE).contains(&base) {
        return Err(BinaryError::InvalidBase(base));
    }
    Ok(())
}

/// Parses `input` as digits of `base`. Letters are case-insensitive.
pub fn parse_digits(input: &str, base: usize) -> Result<Vec<u32>, BinaryError> {
    check_base(base)?;
    input
        .chars()
        .map(|digit| {
            digit
                .to_digit(base as u32)
                .ok_or(BinaryError::InvalidDigit { digit, base })
        })
        .collect()
}

/// Converts `digits` written in `base` to a lowercase hex string without
/// leading zeros. Zero is `"0"`, empty input stays empty.
pub fn from_base(digits: &str, base: usize) -> Result<String, BinaryError> {
    let values = parse_digits(digits, base)?;
    if values.is_empty() {
        return Ok(String::new());
    }
    let n = BigNumberHelper::from_digits(values, base as u32);
    let hex = Alphabet::hex().render(&n.to_digits(16));
    debug!(
        "base {} input of {} digits is {} hex digits",
        base,
        digits.len(),
        hex.len()
    );
    Ok(hex)
}

/// An ordered set of digit symbols; its length is the base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    pub fn new(symbols: &str) -> Result<Self, BinaryError> {
        let symbols: Vec<char> = symbols.chars().collect();
        if symbols.len() < MIN_BASE {
            return Err(BinaryError::InvalidBase(symbols.len()));
        }

        let mut seen = HashSet::with_capacity(symbols.len());
        if let Some(&digit) = symbols.iter().find(|&&c| !seen.insert(c)) {
            return Err(BinaryError::DuplicateDigit(digit));
        }
        Ok(Self { symbols })
    }

    /// The first `base` symbols of [`STANDARD`].
    pub fn standard(base: usize) -> Self {
        Self {
            symbols: STANDARD.chars().take(base).collect(),
        }
    }

    pub fn hex() -> Self {
        Self::standard(16)
    }

    pub fn base(&self) -> usize {
        self.symbols.len()
    }

    /// Position of `digit` in the alphabet. Symbols match exactly.
    pub fn value_of(&self, digit: char) -> Result<u32, BinaryError> {
        self.symbols
            .iter()
            .position(|&c| c == digit)
            .map(|i| i as u32)
            .ok_or(BinaryError::InvalidDigit {
                digit,
                base: self.base(),
            })
    }

    pub fn parse(&self, input: &str) -> Result<Vec<u32>, BinaryError> {
        input.chars().map(|c| self.value_of(c)).collect()
    }

    /// Symbols for `digits`. Every digit must be below `base()`.
    pub fn render(&self, digits: &[u32]) -> String {
        digits.iter().map(|&d| self.symbols[d as usize]).collect()
    }

    /// Maps each symbol of a standard-alphabet `view` onto the symbol with
    /// the same value in this alphabet.
    pub fn transliterate(&self, view: &str) -> Result<String, BinaryError> {
        view.chars()
            .map(|c| {
                STANDARD
                    .find(c)
                    .and_then(|value| self.symbols.get(value).copied())
                    .ok_or(BinaryError::InvalidDigit {
                        digit: c,
                        base: self.base(),
                    })
            })
            .collect()
    }
}
