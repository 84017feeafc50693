// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use std::convert::{TryFrom, TryInto};
use std::fmt;

use data_encoding::HEXLOWER;
use num::BigUint;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512Trunc256};
use thiserror::Error;

use crate::protocol;

/// Number of bytes in the preferred hash digest used here.
pub const HASH_LEN: usize = 32;

/// Represents a 32-byte (256-bit) value holding a hash digest.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct CryptoHash(pub [u8; HASH_LEN]);

#[derive(Error, Debug)]
pub enum HashError {
    #[error("invalid hex encoding")]
    InvalidHex(#[from] data_encoding::DecodeError),
    #[error("wrong length for hash: `{0}`")]
    WrongLength(usize),
}

/// A trait implemented by objects that can be turned into a sequence of bytes to be hashed.
/// It needs also to provide a type ID (HashID) to distinguish different types of objects.
pub trait Hashable {
    fn to_be_hashed(&self) -> (protocol::HashID, Vec<u8>);

    fn hash_rep(&self) -> Vec<u8> {
        let (id, data) = self.to_be_hashed();
        [id.as_bytes(), &data].concat()
    }
}

impl Hashable for String {
    fn to_be_hashed(&self) -> (protocol::HashID, Vec<u8>) {
        (protocol::MESSAGE, self.as_bytes().to_vec())
    }
}

impl CryptoHash {
    /// Interprets the digest as a big-endian unsigned 256-bit integer.
    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_be(&self.0)
    }

    /// Returns true iff the digest contains only zeros.
    pub fn is_zero(&self) -> bool {
        self.0 == [0; HASH_LEN]
    }
}

// Display the digest as a lowercase hex string.
impl fmt::Display for CryptoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", HEXLOWER.encode(&self.0))
    }
}

impl TryFrom<&str> for CryptoHash {
    type Error = HashError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let decoded = HEXLOWER.decode(s.as_bytes())?;
        let len = decoded.len();
        let bytes: [u8; HASH_LEN] = decoded
            .try_into()
            .map_err(|_| HashError::WrongLength(len))?;
        Ok(CryptoHash(bytes))
    }
}

/// Computes the SHA-512/256 hash of an array of bytes.
pub fn hash(data: &[u8]) -> CryptoHash {
    let mut out = [0; HASH_LEN];
    out.copy_from_slice(&Sha512Trunc256::digest(data));
    CryptoHash(out)
}

/// Computes a hash of a Hashable object and its type.
pub fn hash_obj(obj: &impl Hashable) -> CryptoHash {
    hash(&obj.hash_rep())
}
