// Copyright (c) 2022 MASSA LABS <info@massa.net>

use crate::error::HashError;
use crate::settings::HASH_SIZE_BYTES;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Blake3 digest identifying a block, a transaction or an account key.
///
/// Written as `bs58` with checksum in logs, text formats and JSON.
#[derive(Eq, PartialEq, Copy, Clone, Hash)]
pub struct Hash(blake3::Hash);

impl Hash {
    /// Digest made of zero bytes, the previous hash of a genesis block
    pub fn zero() -> Self {
        Hash::from_bytes(&[0u8; HASH_SIZE_BYTES])
    }

    /// Digest of `data`
    ///
    /// # Example
    /// ```
    /// # use ledger_hash::Hash;
    /// assert_eq!(Hash::compute_from(b"block"), Hash::compute_from(b"block"));
    /// ```
    pub fn compute_from(data: &[u8]) -> Self {
        Hash(blake3::hash(data))
    }

    /// Raw digest bytes
    pub fn to_bytes(&self) -> &[u8; HASH_SIZE_BYTES] {
        self.0.as_bytes()
    }

    /// Digest from raw bytes
    pub fn from_bytes(bytes: &[u8; HASH_SIZE_BYTES]) -> Self {
        Hash(blake3::Hash::from_bytes(*bytes))
    }

    /// `bs58` text form with checksum
    pub fn to_bs58_check(&self) -> String {
        bs58::encode(self.to_bytes()).with_check().into_string()
    }

    /// Parses the `bs58` text form with checksum.
    ///
    /// # Example
    /// ```
    /// # use ledger_hash::Hash;
    /// let hash = Hash::compute_from(b"transaction");
    /// assert_eq!(Hash::from_bs58_check(&hash.to_bs58_check()).unwrap(), hash);
    /// ```
    pub fn from_bs58_check(text: &str) -> Result<Hash, HashError> {
        let decoded = bs58::decode(text)
            .with_check(None)
            .into_vec()
            .map_err(|err| HashError::ParsingError(err.to_string()))?;
        let bytes: [u8; HASH_SIZE_BYTES] = decoded.as_slice().try_into().map_err(|_| {
            HashError::ParsingError(format!(
                "expected {} bytes, got {}",
                HASH_SIZE_BYTES,
                decoded.len()
            ))
        })?;
        Ok(Hash::from_bytes(&bytes))
    }
}

impl Ord for Hash {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_bytes().cmp(other.to_bytes())
    }
}

impl PartialOrd for Hash {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_bs58_check())
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for Hash {
    type Err = HashError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Hash::from_bs58_check(text)
    }
}

impl serde::Serialize for Hash {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Hash {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Hash, D::Error> {
        struct Bs58CheckVisitor;

        impl<'de> serde::de::Visitor<'de> for Bs58CheckVisitor {
            type Value = Hash;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a bs58 check encoded hash")
            }

            fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<Hash, E> {
                Hash::from_bs58_check(value).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(Bs58CheckVisitor)
    }
}
