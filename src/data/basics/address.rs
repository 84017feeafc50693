// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use std::fmt;
use std::str::FromStr;

use data_encoding::BASE32_NOPAD;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha512Trunc256};
use thiserror::Error;

use crate::crypto;

const CHECKSUM_LEN: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("invalid base32 encoding")]
    InvalidBase32,
    #[error("wrong length for address")]
    WrongLength,
    #[error("address checksum mismatch")]
    InvalidChecksum,
}

/// Identifies a raffle participant, the operator, or the randomness coordinator.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Address(pub [u8; 32]);

impl Address {
    pub fn new(hash: crypto::CryptoHash) -> Self {
        Self(hash.0)
    }

    /// Derives a deterministic address from an arbitrary label, handy for tests and demos.
    pub fn from_label(label: &str) -> Self {
        Self::new(crypto::hash_obj(&label.to_owned()))
    }

    /// Returns the checksum, the last 4 bytes of H(Address).
    fn checksum(&self) -> [u8; CHECKSUM_LEN] {
        let short_addr_hash = Sha512Trunc256::digest(&self.0);
        let mut out = [0; CHECKSUM_LEN];
        out.copy_from_slice(&short_addr_hash[short_addr_hash.len() - CHECKSUM_LEN..]);
        out
    }

    /// Checks if an address is the zero value.
    pub fn is_zero(&self) -> bool {
        *self == Address([0; 32])
    }
}

impl FromStr for Address {
    type Err = AddressError;

    /// Tries to unmarshal the checksummed address string.
    /// Address strings (base32 encoded) have a postamble which serves as the checksum of the address.
    /// When converted to an Address object representation, that checksum is dropped (after validation).
    fn from_str(addr: &str) -> Result<Self, Self::Err> {
        let decoded = BASE32_NOPAD
            .decode(addr.as_bytes())
            .map_err(|_| AddressError::InvalidBase32)?;

        let mut short = Address([0; 32]);
        if decoded.len() != short.0.len() + CHECKSUM_LEN {
            return Err(AddressError::WrongLength);
        }

        short.0.copy_from_slice(&decoded[..32]);
        if decoded[32..] != short.checksum() {
            return Err(AddressError::InvalidChecksum);
        }

        Ok(short)
    }
}

impl fmt::Display for Address {
    /// Returns the human-readable, checksummed version of the address.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut addr_with_checksum = [0u8; 32 + CHECKSUM_LEN];
        addr_with_checksum[..32].copy_from_slice(&self.0);
        addr_with_checksum[32..].copy_from_slice(&self.checksum());
        f.write_str(&BASE32_NOPAD.encode(&addr_with_checksum))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
