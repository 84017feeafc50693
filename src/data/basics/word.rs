// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use std::fmt;
use std::str::FromStr;

use num::{BigUint, Num};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of bytes in a random word delivered by the oracle.
pub const WORD_LEN: usize = 32;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("not a decimal or 0x-prefixed hex integer: `{0}`")]
    Unparsable(String),
    #[error("value needs {0} bytes, a random word holds at most 32")]
    TooWide(usize),
}

/// A single 256-bit random value, stored big-endian.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomWord(pub [u8; WORD_LEN]);

impl RandomWord {
    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_be(&self.0)
    }

    pub fn from_biguint(n: &BigUint) -> Result<Self, WordError> {
        let bytes = n.to_bytes_be();
        if bytes.len() > WORD_LEN {
            return Err(WordError::TooWide(bytes.len()));
        }
        let mut out = [0; WORD_LEN];
        out[WORD_LEN - bytes.len()..].copy_from_slice(&bytes);
        Ok(Self(out))
    }
}

impl From<u64> for RandomWord {
    fn from(n: u64) -> Self {
        let mut out = [0; WORD_LEN];
        out[WORD_LEN - 8..].copy_from_slice(&n.to_be_bytes());
        Self(out)
    }
}

impl FromStr for RandomWord {
    type Err = WordError;

    /// Accepts either a decimal integer or a `0x`-prefixed hex integer.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parsed = match s.strip_prefix("0x") {
            Some(hex) => BigUint::from_str_radix(hex, 16).ok(),
            None => BigUint::from_str_radix(s, 10).ok(),
        };
        match parsed {
            Some(n) => Self::from_biguint(&n),
            None => Err(WordError::Unparsable(s.to_owned())),
        }
    }
}

impl fmt::Display for RandomWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_biguint())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_u64() {
        let w = RandomWord::from(123456);
        assert_eq!(w.to_biguint(), BigUint::from(123456u64));
        assert_eq!(w.to_string(), "123456");
    }

    #[test]
    fn parse_decimal_and_hex() {
        assert_eq!("123456".parse::<RandomWord>(), Ok(RandomWord::from(123456)));
        assert_eq!("0x1e240".parse::<RandomWord>(), Ok(RandomWord::from(123456)));

        let full = format!("0x{}", "ff".repeat(WORD_LEN));
        let w: RandomWord = full.parse().unwrap();
        assert_eq!(w.0, [0xff; WORD_LEN]);
    }

    #[test]
    fn reject_garbage() {
        assert!(matches!(
            "lucky".parse::<RandomWord>(),
            Err(WordError::Unparsable(_))
        ));
        let too_wide = format!("0x1{}", "00".repeat(WORD_LEN));
        assert_eq!(too_wide.parse::<RandomWord>(), Err(WordError::TooWide(33)));
    }
}
