use num_bigint::BigUint;
use num_traits::Zero;

/// The arbitrary-precision subset the radix conversions need:
/// multiply-accumulate from digits and repeated division by a small base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BigNumberHelper {
    value: BigUint,
}

impl BigNumberHelper {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            value: BigUint::from_bytes_be(bytes),
        }
    }

    /// Accumulates `digits` (most significant first) as a number in `radix`.
    pub fn from_digits<I>(digits: I, radix: u32) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        let mut value = BigUint::zero();
        for digit in digits {
            value = value * radix + digit;
        }
        Self { value }
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Digit values in `radix`, most significant first. Zero is `[0]`.
    pub fn to_digits(&self, radix: u32) -> Vec<u32> {
        if self.is_zero() {
            return vec![0];
        }

        let mut n = self.value.clone();
        let mut digits = Vec::new();
        while !n.is_zero() {
            // remainder is below radix, so it has at most one limb
            let r = (&n % radix).to_u32_digits();
            debug_assert!(r.len() <= 1);
            digits.push(r.first().copied().unwrap_or(0));
            n /= radix;
        }
        trace!("split into {} base-{} digits", digits.len(), radix);

        digits.reverse();
        digits
    }
}

impl From<BigUint> for BigNumberHelper {
    fn from(value: BigUint) -> Self {
        Self { value }
    }
}

impl From<BigNumberHelper> for BigUint {
    fn from(helper: BigNumberHelper) -> Self {
        helper.value
    }
}
