// Copyright (c) 2022 MASSA LABS <info@massa.net>

use crate::error::SignatureError;
use ed25519_dalek::{Signer, Verifier};
use ledger_hash::Hash;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Size of a public key
pub const PUBLIC_KEY_SIZE_BYTES: usize = 32;
/// Size of a signature
pub const SIGNATURE_SIZE_BYTES: usize = 64;

fn encode_bs58_check(bytes: &[u8]) -> String {
    bs58::encode(bytes).with_check().into_string()
}

fn decode_bs58_check<const N: usize>(text: &str) -> Result<[u8; N], SignatureError> {
    let decoded = bs58::decode(text)
        .with_check(None)
        .into_vec()
        .map_err(|err| SignatureError::ParsingError(err.to_string()))?;
    decoded.as_slice().try_into().map_err(|_| {
        SignatureError::ParsingError(format!("expected {} bytes, got {}", N, decoded.len()))
    })
}

/// Secret signing key of an account or a harvester
#[derive(Clone)]
pub struct KeyPair(ed25519_dalek::SigningKey);

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "KeyPair({})", self.get_public_key())
    }
}

impl KeyPair {
    /// Fresh random key pair
    ///
    /// # Example
    /// ```
    /// # use ledger_signature::KeyPair;
    /// # use ledger_hash::Hash;
    /// let keypair = KeyPair::generate();
    /// let digest = Hash::compute_from(b"block content");
    /// let signature = keypair.sign(&digest);
    /// assert!(keypair.get_public_key().verify_signature(&digest, &signature).is_ok());
    /// ```
    pub fn generate() -> KeyPair {
        KeyPair(ed25519_dalek::SigningKey::generate(&mut rand::rngs::OsRng))
    }

    /// Signs a digest
    pub fn sign(&self, hash: &Hash) -> Signature {
        Signature(self.0.sign(hash.to_bytes()))
    }

    /// Public half of the key pair
    pub fn get_public_key(&self) -> PublicKey {
        PublicKey(self.0.verifying_key())
    }
}

/// Public key checking signatures made by the matching `KeyPair`
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey(ed25519_dalek::VerifyingKey);

impl PublicKey {
    /// Fails unless `signature` was made over `hash` by the matching key pair
    pub fn verify_signature(&self, hash: &Hash, signature: &Signature) -> Result<(), SignatureError> {
        self.0
            .verify(hash.to_bytes(), &signature.0)
            .map_err(SignatureError::EngineError)
    }

    /// Raw key bytes
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_SIZE_BYTES] {
        self.0.to_bytes()
    }

    /// Key from raw bytes, failing on points off the curve
    pub fn from_bytes(bytes: &[u8; PUBLIC_KEY_SIZE_BYTES]) -> Result<PublicKey, SignatureError> {
        ed25519_dalek::VerifyingKey::from_bytes(bytes)
            .map(PublicKey)
            .map_err(SignatureError::EngineError)
    }
}

impl std::hash::Hash for PublicKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.to_bytes().hash(state);
    }
}

impl Ord for PublicKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_bytes().cmp(&other.to_bytes())
    }
}

impl PartialOrd for PublicKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&encode_bs58_check(&self.to_bytes()))
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for PublicKey {
    type Err = SignatureError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        PublicKey::from_bytes(&decode_bs58_check(text)?)
    }
}

/// Signature of a digest
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature(ed25519_dalek::Signature);

impl Signature {
    /// Raw signature bytes
    pub fn to_bytes(&self) -> [u8; SIGNATURE_SIZE_BYTES] {
        self.0.to_bytes()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&encode_bs58_check(&self.to_bytes()))
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for Signature {
    type Err = SignatureError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let bytes: [u8; SIGNATURE_SIZE_BYTES] = decode_bs58_check(text)?;
        Ok(Signature(ed25519_dalek::Signature::from_bytes(&bytes)))
    }
}

impl serde::Serialize for PublicKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for PublicKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<PublicKey, D::Error> {
        let text = String::deserialize(deserializer)?;
        PublicKey::from_str(&text).map_err(serde::de::Error::custom)
    }
}

impl serde::Serialize for Signature {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Signature {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Signature, D::Error> {
        let text = String::deserialize(deserializer)?;
        Signature::from_str(&text).map_err(serde::de::Error::custom)
    }
}
