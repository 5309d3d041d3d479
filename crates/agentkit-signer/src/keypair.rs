// SPDX-FileCopyrightText: 2026 AgentKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ed25519 signing keypair.

use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};
use rand::rngs::OsRng;

/// An Ed25519 keypair used as the real signing backend of a connection.
pub struct SigningKeypair {
    signing_key: SigningKey,
    verifying_key: VerifyingKey,
}

impl SigningKeypair {
    /// Generate a new random Ed25519 keypair.
    pub fn generate() -> Self {
        Self::from_signing_key(SigningKey::generate(&mut OsRng))
    }

    /// Reconstruct a keypair from private key bytes.
    pub fn from_bytes(private_bytes: &[u8; 32]) -> Self {
        Self::from_signing_key(SigningKey::from_bytes(private_bytes))
    }

    /// Parse a hex-encoded private key, with or without a `0x` prefix.
    ///
    /// Returns `None` unless the input decodes to exactly 32 bytes.
    pub fn from_hex(secret: &str) -> Option<Self> {
        let trimmed = secret.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        let bytes: [u8; 32] = hex::decode(digits).ok()?.try_into().ok()?;
        Some(Self::from_bytes(&bytes))
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        let verifying_key = VerifyingKey::from(&signing_key);
        Self {
            signing_key,
            verifying_key,
        }
    }

    /// Get the private key bytes.
    pub fn private_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }

    /// Get the hex-encoded public key.
    pub fn public_hex(&self) -> String {
        hex::encode(self.verifying_key.to_bytes())
    }

    /// Sign arbitrary bytes with this keypair's private key.
    pub fn sign(&self, message: &[u8]) -> Signature {
        self.signing_key.sign(message)
    }

    /// Verify a signature using strict mode (rejects weak public keys).
    pub fn verify_strict(&self, message: &[u8], signature: &Signature) -> bool {
        self.verifying_key.verify_strict(message, signature).is_ok()
    }
}
