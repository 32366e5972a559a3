use std::{
    fmt::{self, Display},
    str::FromStr,
};

use rand::SeedableRng as _;
use rand_pcg::Pcg64;

use crate::SeedParseError;

/// The 256-bit seed a board is generated from.
///
/// The same seed and generator settings always produce the same board.
/// Seeds are written as 64 lowercase hex digits.
///
/// # Examples
///
/// ```
/// use linkmatch_generator::BoardSeed;
///
/// let seed: BoardSeed = "00000000000000000000000000000000000000000000000000000000000000ff"
///     .parse()?;
/// assert_eq!(seed.as_bytes()[31], 0xff);
/// assert_eq!(seed.to_string().parse::<BoardSeed>()?, seed);
/// # Ok::<(), linkmatch_generator::SeedParseError>(())
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct BoardSeed([u8; 32]);

impl BoardSeed {
    /// Draws a fresh seed from the thread-local random generator.
    #[must_use]
    pub fn random() -> Self {
        Self(rand::random())
    }

    /// Wraps raw seed bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the raw seed bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub(crate) fn rng(self) -> Pcg64 {
        Pcg64::from_seed(self.0)
    }
}

impl From<[u8; 32]> for BoardSeed {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl Display for BoardSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for BoardSeed {
    type Err = SeedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim();
        if digits.len() != 64 {
            return Err(SeedParseError::InvalidLength {
                actual: digits.len(),
            });
        }

        let mut bytes = [0; 32];
        for (i, pair) in digits.as_bytes().chunks_exact(2).enumerate() {
            let high = hex_value(pair[0]).ok_or(SeedParseError::InvalidDigit { position: i * 2 })?;
            let low = hex_value(pair[1]).ok_or(SeedParseError::InvalidDigit {
                position: i * 2 + 1,
            })?;
            bytes[i] = (high << 4) | low;
        }
        Ok(Self(bytes))
    }
}

#[expect(clippy::cast_possible_truncation)]
fn hex_value(digit: u8) -> Option<u8> {
    char::from(digit).to_digit(16).map(|value| value as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = "c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1";

    #[test]
    fn test_display_parse() {
        let seed = SEED.parse::<BoardSeed>().unwrap();
        assert_eq!(seed.as_bytes()[0], 0xc1);
        assert_eq!(seed.as_bytes()[31], 0xf1);
        assert_eq!(seed.to_string(), SEED);
        assert_eq!(SEED.to_uppercase().parse::<BoardSeed>(), Ok(seed));
        assert_eq!(format!("  {SEED}\n").parse::<BoardSeed>(), Ok(seed));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "abc".parse::<BoardSeed>(),
            Err(SeedParseError::InvalidLength { actual: 3 })
        );
        let mut bad = SEED.to_owned();
        bad.replace_range(5..6, "g");
        assert_eq!(
            bad.parse::<BoardSeed>(),
            Err(SeedParseError::InvalidDigit { position: 5 })
        );
    }

    #[test]
    fn test_same_seed_same_stream() {
        use rand::seq::IndexedRandom as _;

        let seed = BoardSeed::from_bytes([7; 32]);
        let values = [0u32, 1, 2, 3, 4, 5, 6, 7];
        let mut a = seed.rng();
        let mut b = seed.rng();
        for _ in 0..32 {
            assert_eq!(values.choose(&mut a), values.choose(&mut b));
        }
    }
}
