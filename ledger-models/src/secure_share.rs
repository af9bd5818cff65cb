// Copyright (c) 2022 MASSA LABS <info@massa.net>

use crate::{address::Address, error::ModelsError};
use ledger_hash::Hash;
use ledger_signature::{KeyPair, PublicKey, Signature};
use serde::{Deserialize, Serialize};

/// Content signed by its creator, identified by the digest of key and content.
///
/// Changing `content` invalidates `id` and `signature`: `verify_signature` then fails.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SecureShare<T>
where
    T: SecureShareContent,
{
    /// the signed content
    pub content: T,
    /// creator signature over `id`
    pub signature: Signature,
    /// creator public key
    pub content_creator_pub_key: PublicKey,
    /// creator address, derived from the creator key
    pub content_creator_address: Address,
    /// digest of the creator key and the content
    pub id: Hash,
}

/// Content that can be wrapped in a `SecureShare`
pub trait SecureShareContent
where
    Self: Sized + Serialize,
{
    /// Signs `content` with `keypair`
    fn new_verifiable(content: Self, keypair: &KeyPair) -> Result<SecureShare<Self>, ModelsError> {
        let public_key = keypair.get_public_key();
        let hash = Self::compute_hash(&content, &public_key)?;
        Ok(SecureShare {
            signature: keypair.sign(&hash),
            content_creator_pub_key: public_key,
            content_creator_address: Address::from_public_key(&public_key),
            content,
            id: hash,
        })
    }

    /// Hash of the creator key followed by the canonical serialization of the content
    fn compute_hash(content: &Self, content_creator_pub_key: &PublicKey) -> Result<Hash, ModelsError> {
        let mut hash_data = Vec::new();
        hash_data.extend(content_creator_pub_key.to_bytes());
        serde_json::to_writer(&mut hash_data, content)
            .map_err(|err| ModelsError::SerializeError(err.to_string()))?;
        Ok(Hash::compute_from(&hash_data))
    }
}

impl<T> SecureShare<T>
where
    T: SecureShareContent,
{
    /// Fails unless `id` matches the content and the creator key signed it
    pub fn verify_signature(&self) -> Result<(), ModelsError> {
        let computed = T::compute_hash(&self.content, &self.content_creator_pub_key)?;
        if computed != self.id {
            return Err(ModelsError::IdMismatch {
                expected: self.id,
                computed,
            });
        }
        if Address::from_public_key(&self.content_creator_pub_key) != self.content_creator_address
        {
            return Err(ModelsError::DeserializeError(format!(
                "creator address {} does not match creator key",
                self.content_creator_address
            )));
        }
        Ok(self
            .content_creator_pub_key
            .verify_signature(&self.id, &self.signature)?)
    }
}
