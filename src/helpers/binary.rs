use std::fmt;
use std::str::FromStr;

use rand::RngCore;

use super::bn::BigNumberHelper;
use super::error::BinaryError;
use super::radix::{self, Alphabet};
use super::rand::{rng_bytes, time_bytes};

const DEFAULT_RANDOM_BITS: usize = 128;

/// Immutable binary data with views in any numeral base.
///
/// The bytes are the canonical form. `nibbles` counts the significant hex
/// digits; when it is odd the high nibble of the first byte is a zero pad.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct BinaryValue {
    data: Vec<u8>,
    nibbles: usize,
}

impl BinaryValue {
    /// Parses `input` as digits of `base` (2 to 32).
    ///
    /// Hex input keeps its digit count. Input in any other base is converted
    /// to hex first and padded to whole bytes, so `("1010", 2)` is `0a`.
    pub fn new(input: &str, base: usize) -> Result<Self, BinaryError> {
        radix::check_base(base)?;
        if input.is_empty() {
            return Ok(Self::default());
        }

        if base == 16 {
            let values = radix::parse_digits(input, 16)?;
            return Ok(Self::pack(&values));
        }

        let hex = radix::from_base(input, base)?;
        let values = radix::parse_digits(&hex, 16)?;
        Ok(Self::pack_even(values))
    }

    /// Hex input, the default base.
    pub fn from_hex(input: &str) -> Result<Self, BinaryError> {
        Self::new(input, 16)
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            data: bytes.to_vec(),
            nibbles: bytes.len() * 2,
        }
    }

    /// Parses `input` as digits of a caller-supplied alphabet, the inverse
    /// of [`BinaryValue::to_base`]. Symbols are matched exactly.
    pub fn from_alphabet(input: &str, alphabet: &str) -> Result<Self, BinaryError> {
        let alphabet = Alphabet::new(alphabet)?;
        if input.is_empty() {
            return Ok(Self::default());
        }

        let values = alphabet.parse(input)?;
        let n = BigNumberHelper::from_digits(values, alphabet.base() as u32);
        Ok(Self::pack_even(n.to_digits(16)))
    }

    /// Packs hex digit values two per byte, high nibble first. An odd count
    /// gets a leading zero nibble.
    fn pack(values: &[u32]) -> Self {
        let mut data = Vec::with_capacity(values.len().div_ceil(2));
        let (head, rest) = values.split_at(values.len() % 2);
        if let Some(&low) = head.first() {
            data.push(low as u8);
        }
        for pair in rest.chunks(2) {
            data.push(((pair[0] << 4) | pair[1]) as u8);
        }

        Self {
            data,
            nibbles: values.len(),
        }
    }

    fn pack_even(mut values: Vec<u32>) -> Self {
        if values.len() % 2 == 1 {
            values.insert(0, 0);
        }
        Self::pack(&values)
    }

    /// A sample value of `bits` bits built from time-seeded hash blocks.
    ///
    /// The hex form has `ceil(bits / 4)` digits and the value stays below
    /// `2^bits`. This is NOT a secure random source: the blocks are derived
    /// from the clock and can be predicted. Use [`BinaryValue::random_with`]
    /// with an OS RNG for anything security related.
    pub fn random(bits: usize) -> Self {
        Self::shape_random(time_bytes(bits), bits)
    }

    /// [`BinaryValue::random`] with 128 bits.
    pub fn random_default() -> Self {
        Self::random(DEFAULT_RANDOM_BITS)
    }

    /// Like [`BinaryValue::random`], drawing bytes from `rng`.
    pub fn random_with<R: RngCore + ?Sized>(rng: &mut R, bits: usize) -> Self {
        Self::shape_random(rng_bytes(rng, bits), bits)
    }

    fn shape_random(mut data: Vec<u8>, bits: usize) -> Self {
        let nibbles = bits.div_ceil(4);
        data.truncate(nibbles.div_ceil(2));

        if let Some(first) = data.first_mut() {
            let spare = bits % 4;
            let top = if spare == 0 { 0x0f } else { (1u8 << spare) - 1 };
            if nibbles % 2 == 1 {
                *first &= top;
            } else {
                *first &= (top << 4) | 0x0f;
            }
        }
        trace!("random value of {} bits in {} nibbles", bits, nibbles);

        Self { data, nibbles }
    }

    /// Number of significant hex digits.
    pub fn nibble_len(&self) -> usize {
        self.nibbles
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Hex digit values, most significant first.
    fn hex_digits(&self) -> impl Iterator<Item = u32> + '_ {
        let skip = self.data.len() * 2 - self.nibbles;
        self.data
            .iter()
            .flat_map(|&b| [u32::from(b >> 4), u32::from(b & 0x0f)])
            .skip(skip)
    }

    /// Lowercase hex, one digit per nibble.
    pub fn to_hex(&self) -> String {
        Alphabet::hex().render(&self.hex_digits().collect::<Vec<_>>())
    }

    /// `0x` followed by uppercase hex digits.
    pub fn to_nice_hex(&self) -> String {
        format!("0x{}", self.to_hex().to_uppercase())
    }

    /// The raw bytes.
    pub fn to_ascii(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Every hex digit as four binary digits.
    pub fn to_binary(&self) -> String {
        self.hex_digits().map(|d| format!("{:04b}", d)).collect()
    }

    /// Groups the hex string in runs of three digits and writes each group's
    /// value in binary, padded to at least four digits.
    ///
    /// This is not octal notation: three hex digits are 12 bits and the
    /// output uses only `0` and `1`. The grouping is kept as is for
    /// compatibility with existing encoded values. Use
    /// [`BinaryValue::to_base_positional`] with [`crate::OCTAL`] for true octal.
    pub fn to_octal(&self) -> String {
        let digits: Vec<u32> = self.hex_digits().collect();
        digits
            .chunks(3)
            .map(|group| {
                let value = group.iter().fold(0u32, |acc, &d| (acc << 4) | d);
                format!("{:04b}", value)
            })
            .collect()
    }

    /// Exact decimal value of any length. Zero is `"0"`, the empty value is
    /// empty like every other view.
    pub fn to_decimal(&self) -> String {
        if self.nibbles == 0 {
            return String::new();
        }
        let n = BigNumberHelper::from_digits(self.hex_digits(), 16);
        Alphabet::standard(10).render(&n.to_digits(10))
    }

    /// Renders the value with `alphabet`, whose length is the base.
    ///
    /// Bases 2, 8, 10 and 16 reuse the fixed views ([`BinaryValue::to_binary`],
    /// [`BinaryValue::to_octal`], [`BinaryValue::to_decimal`],
    /// [`BinaryValue::to_hex`]) and only swap symbols, so their padding and
    /// the octal grouping carry over. Any other base divides the value down.
    pub fn to_base(&self, alphabet: &str) -> Result<String, BinaryError> {
        let alphabet = Alphabet::new(alphabet)?;
        let view = match alphabet.base() {
            2 => self.to_binary(),
            8 => self.to_octal(),
            10 => self.to_decimal(),
            16 => self.to_hex(),
            base => {
                debug!("no fixed view for base {}, dividing", base);
                return Ok(self.render_positional(&alphabet));
            }
        };
        alphabet.transliterate(&view)
    }

    /// Renders the value with `alphabet` by repeated division, for every
    /// base. No leading zero symbols; zero is `alphabet[0]` and the empty
    /// value is empty.
    pub fn to_base_positional(&self, alphabet: &str) -> Result<String, BinaryError> {
        let alphabet = Alphabet::new(alphabet)?;
        Ok(self.render_positional(&alphabet))
    }

    fn render_positional(&self, alphabet: &Alphabet) -> String {
        if self.nibbles == 0 {
            return String::new();
        }
        let n = BigNumberHelper::from_bytes(&self.data);
        alphabet.render(&n.to_digits(alphabet.base() as u32))
    }
}

impl From<Vec<u8>> for BinaryValue {
    fn from(data: Vec<u8>) -> Self {
        let nibbles = data.len() * 2;
        Self { data, nibbles }
    }
}

impl From<&[u8]> for BinaryValue {
    fn from(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<BinaryValue> for String {
    fn from(value: BinaryValue) -> Self {
        value.to_hex()
    }
}

impl TryFrom<String> for BinaryValue {
    type Error = BinaryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl FromStr for BinaryValue {
    type Err = BinaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl AsRef<[u8]> for BinaryValue {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Display for BinaryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::LowerHex for BinaryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        f.write_str(&self.to_hex())
    }
}

impl fmt::UpperHex for BinaryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        f.write_str(&self.to_hex().to_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::radix::{BASE36, BINARY, HEX, OCTAL};
    use rand::rngs::OsRng;

    #[test]
    fn test_hex_views() {
        let value = BinaryValue::new("ff", 16).unwrap();
        assert_eq!(value.to_hex(), "ff");
        assert_eq!(value.to_nice_hex(), "0xFF");
        assert_eq!(value.to_ascii(), &[0xff]);

        let value = BinaryValue::from_hex("DeadBeef").unwrap();
        assert_eq!(value.to_hex(), "deadbeef");
        assert_eq!(value.to_nice_hex(), "0xDEADBEEF");
        assert_eq!(value.len(), 4);
    }

    #[test]
    fn test_odd_hex_pads_high_nibble() {
        let value = BinaryValue::from_hex("abc").unwrap();
        assert_eq!(value.to_ascii(), &[0x0a, 0xbc]);
        assert_eq!(value.nibble_len(), 3);
        assert_eq!(value.to_hex(), "abc");
        assert_eq!(value.to_binary(), "101010111100");
        assert_eq!(value.to_decimal(), "2748");
    }

    #[test]
    fn test_concrete_scenarios() {
        let ff = BinaryValue::new("ff", 16).unwrap();
        assert_eq!(ff.to_decimal(), "255");
        assert_eq!(ff.to_binary(), "11111111");

        let ten = BinaryValue::new("1010", 2).unwrap();
        assert_eq!(ten.to_hex(), "0a");
        assert_eq!(ten.to_base(BINARY).unwrap(), "00001010");
    }

    #[test]
    fn test_construct_from_other_bases() {
        assert_eq!(BinaryValue::new("255", 10).unwrap().to_hex(), "ff");
        assert_eq!(BinaryValue::new("256", 10).unwrap().to_hex(), "0100");
        assert_eq!(BinaryValue::new("377", 8).unwrap().to_hex(), "ff");
        assert_eq!(BinaryValue::new("v", 32).unwrap().to_hex(), "1f");
        assert_eq!(BinaryValue::new("0", 10).unwrap().to_hex(), "00");
        assert!(BinaryValue::new("", 10).unwrap().is_empty());
    }

    #[test]
    fn test_construct_errors() {
        assert_eq!(
            BinaryValue::new("g", 16),
            Err(BinaryError::InvalidDigit { digit: 'g', base: 16 })
        );
        assert_eq!(BinaryValue::new("0", 33), Err(BinaryError::InvalidBase(33)));
        assert_eq!(BinaryValue::new("0", 1), Err(BinaryError::InvalidBase(1)));
        assert!(matches!(
            BinaryValue::new("102", 2),
            Err(BinaryError::InvalidDigit { digit: '2', base: 2 })
        ));
        // base is checked even for empty input
        assert_eq!(BinaryValue::new("", 40), Err(BinaryError::InvalidBase(40)));
    }

    #[test]
    fn test_octal_keeps_hex_grouping() {
        // "0a" is one short group worth 10
        assert_eq!(BinaryValue::from_hex("0a").unwrap().to_octal(), "1010");
        // "fff" then "f": 4095 and 15
        assert_eq!(
            BinaryValue::from_hex("ffff").unwrap().to_octal(),
            "1111111111111111"
        );
        // small groups still get four digits
        assert_eq!(BinaryValue::from_hex("001").unwrap().to_octal(), "0001");
        assert_eq!(BinaryValue::from_hex("000000").unwrap().to_octal(), "00000000");
    }

    #[test]
    fn test_decimal_is_exact() {
        let value = BinaryValue::from_bytes(&[0xff; 32]);
        assert_eq!(
            value.to_decimal(),
            "115792089237316195423570985008687907853269984665640564039457584007913129639935"
        );
        assert_eq!(BinaryValue::from_hex("0000").unwrap().to_decimal(), "0");
        assert_eq!(BinaryValue::default().to_decimal(), "");
        assert_eq!(BinaryValue::from_hex("0100").unwrap().to_decimal(), "256");
    }

    #[test]
    fn test_to_base_fast_paths() {
        let value = BinaryValue::from_hex("0a").unwrap();
        assert_eq!(value.to_base("ab").unwrap(), "aaaababa");
        assert_eq!(value.to_base("0123456789").unwrap(), "10");
        assert_eq!(value.to_base("0123456789ABCDEF").unwrap(), "0A");
        // octal alphabet reuses the hex-grouped view
        assert_eq!(value.to_base(OCTAL).unwrap(), "1010");
    }

    #[test]
    fn test_to_base_slow_path() {
        let value = BinaryValue::from_hex("ff").unwrap();
        assert_eq!(value.to_base(BASE36).unwrap(), "73");
        assert_eq!(value.to_base("012").unwrap(), "100110");
        assert_eq!(BinaryValue::from_hex("00").unwrap().to_base("xyz").unwrap(), "x");
    }

    #[test]
    fn test_to_base_errors() {
        let value = BinaryValue::from_hex("ff").unwrap();
        assert_eq!(value.to_base(""), Err(BinaryError::InvalidBase(0)));
        assert_eq!(value.to_base("0"), Err(BinaryError::InvalidBase(1)));
        assert_eq!(value.to_base_positional("1"), Err(BinaryError::InvalidBase(1)));
    }

    #[test]
    fn test_empty_value_renders_empty() {
        let empty = BinaryValue::new("", 10).unwrap();
        assert_eq!(empty, BinaryValue::default());
        for alphabet in [BINARY, "012", OCTAL, "0123456789", HEX, BASE36] {
            assert_eq!(empty.to_base(alphabet).unwrap(), "", "{}", alphabet);
            assert_eq!(empty.to_base_positional(alphabet).unwrap(), "");
        }
        assert_eq!(BinaryValue::from_alphabet("", "xyz").unwrap(), empty);

        // a zero byte is not empty
        let zero = BinaryValue::from_hex("00").unwrap();
        assert_eq!(zero.to_base("012").unwrap(), "0");
        assert_eq!(zero.to_decimal(), "0");
    }

    #[test]
    fn test_repeated_alphabet_symbols_rejected() {
        let value = BinaryValue::from_hex("ff").unwrap();
        assert_eq!(value.to_base("aab"), Err(BinaryError::DuplicateDigit('a')));
        assert_eq!(
            value.to_base_positional("0110"),
            Err(BinaryError::DuplicateDigit('1'))
        );
        assert_eq!(
            BinaryValue::from_alphabet("aaaaaa", "aab"),
            Err(BinaryError::DuplicateDigit('a'))
        );
        // fast path alphabets are checked too
        assert_eq!(value.to_base("00"), Err(BinaryError::DuplicateDigit('0')));
    }

    #[test]
    fn test_positional_agrees_with_fast_paths() {
        let value = BinaryValue::from_hex("00c0ffee").unwrap();
        for alphabet in [BINARY, "0123456789", HEX] {
            let fast = value.to_base(alphabet).unwrap();
            let slow = value.to_base_positional(alphabet).unwrap();
            assert_eq!(fast.trim_start_matches('0'), slow);
        }
    }

    #[test]
    fn test_positional_octal_differs_from_grouped_view() {
        let value = BinaryValue::from_hex("0a").unwrap();
        assert_eq!(value.to_base_positional(OCTAL).unwrap(), "12");
        assert_ne!(value.to_base(OCTAL).unwrap(), "12");
    }

    #[test]
    fn test_from_alphabet() {
        let value = BinaryValue::from_hex("ff").unwrap();
        let dna = value.to_base("ACGT").unwrap();
        assert_eq!(dna, "TTTT");
        assert_eq!(BinaryValue::from_alphabet(&dna, "ACGT").unwrap(), value);

        assert_eq!(
            BinaryValue::from_alphabet("TX", "ACGT"),
            Err(BinaryError::InvalidDigit { digit: 'X', base: 4 })
        );
        assert_eq!(
            BinaryValue::from_alphabet("A", "A"),
            Err(BinaryError::InvalidBase(1))
        );
    }

    #[test]
    fn test_views_are_pure() {
        let value = BinaryValue::from_hex("0123456789abcdef").unwrap();
        assert_eq!(value.to_hex(), value.to_hex());
        assert_eq!(value.to_decimal(), value.to_decimal());
        assert_eq!(value.to_ascii(), value.clone().into_bytes().as_slice());
    }

    #[test]
    fn test_random_lengths() {
        for bits in [1usize, 4, 127, 128, 129, 256] {
            let value = BinaryValue::random(bits);
            assert_eq!(value.to_hex().len(), bits.div_ceil(4), "bits = {}", bits);
            assert_eq!(value.len(), bits.div_ceil(8));
        }
        assert_eq!(BinaryValue::random_default().to_hex().len(), 32);
        assert!(BinaryValue::random(0).is_empty());
    }

    #[test]
    fn test_random_stays_within_bits() {
        for _ in 0..32 {
            let value = BinaryValue::random(1);
            assert!(value.to_hex() == "0" || value.to_hex() == "1");

            let value = BinaryValue::random_with(&mut OsRng, 6);
            let hex = value.to_hex();
            assert_eq!(hex.len(), 2);
            assert!(u8::from_str_radix(&hex, 16).unwrap() < 64);
        }
    }

    #[test]
    fn test_formatting() {
        let value: BinaryValue = "0aBc".parse().unwrap();
        assert_eq!(value.to_string(), "0abc");
        assert_eq!(format!("{:x}", value), "0abc");
        assert_eq!(format!("{:#x}", value), "0x0abc");
        assert_eq!(format!("{:#X}", value), "0x0ABC");
        assert!("zz".parse::<BinaryValue>().is_err());
    }

    #[test]
    fn test_from_bytes() {
        let value = BinaryValue::from(vec![0x00, 0x10]);
        assert_eq!(value.to_hex(), "0010");
        assert_eq!(value.nibble_len(), 4);

        let bytes: &[u8] = b"hi";
        let value = BinaryValue::from(bytes);
        assert_eq!(value.to_hex(), "6869");
        assert_eq!(value.as_ref(), b"hi");
    }
}
