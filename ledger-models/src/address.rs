// Copyright (c) 2022 MASSA LABS <info@massa.net>

use crate::constants::ADDRESS_PREFIX;
use crate::error::ModelsError;
use ledger_hash::Hash;
use ledger_signature::PublicKey;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Account address, derived from a public key
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Address(Hash);

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(ADDRESS_PREFIX)?;
        f.write_str(&self.0.to_bs58_check())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// ```
/// # use ledger_models::address::Address;
/// # use ledger_signature::KeyPair;
/// # use std::str::FromStr;
/// let address = Address::from_public_key(&KeyPair::generate().get_public_key());
/// assert_eq!(Address::from_str(&address.to_string()).unwrap(), address);
/// ```
impl FromStr for Address {
    type Err = ModelsError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let encoded = text.strip_prefix(ADDRESS_PREFIX).ok_or_else(|| {
            ModelsError::WrongPrefix(
                ADDRESS_PREFIX.to_string(),
                text.chars().take(ADDRESS_PREFIX.len()).collect(),
            )
        })?;
        Ok(Address(Hash::from_bs58_check(encoded)?))
    }
}

impl Address {
    /// Address of the account controlled by `public_key`
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        Address(Hash::compute_from(&public_key.to_bytes()))
    }

    /// Digest of the account public key
    pub fn get_hash(&self) -> &Hash {
        &self.0
    }
}

impl serde::Serialize for Address {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Address {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Address, D::Error> {
        let text = String::deserialize(deserializer)?;
        Address::from_str(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_signature::KeyPair;

    #[test]
    fn test_wrong_prefix_is_rejected() {
        let address = Address::from_public_key(&KeyPair::generate().get_public_key());
        let mangled = address.to_string().replacen("NA", "XY", 1);
        assert!(matches!(
            Address::from_str(&mangled),
            Err(ModelsError::WrongPrefix(_, _))
        ));
    }

    #[test]
    fn test_same_key_same_address() {
        let public_key = KeyPair::generate().get_public_key();
        assert_eq!(
            Address::from_public_key(&public_key),
            Address::from_public_key(&public_key)
        );
    }
}
