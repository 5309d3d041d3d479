// SPDX-FileCopyrightText: 2026 AgentKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connection descriptor: the signing identity and endpoint of a kit.
//!
//! When the secret is a 32-byte hex private key, messages are signed with
//! Ed25519. Any other secret falls back to a deterministic SHA-256 digest of
//! `secret || message`. The fallback is a test fixture, not a signature: it is
//! flagged on every [`MessageSignature`] and logged the first time it is used.

use std::sync::atomic::{AtomicBool, Ordering};

use agentkit_core::ConnectionInfo;
use ed25519_dalek::Signature;
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::keypair::SigningKeypair;

/// A signature produced by [`ConnectionDescriptor::sign`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSignature {
    /// `0x`-prefixed hex encoding of the signature bytes.
    pub hex: String,
    /// True when no real signer was available and the digest fallback was used.
    pub simulated: bool,
}

/// Credentials and endpoint for a signing identity.
pub struct ConnectionDescriptor {
    key_name: String,
    secret: SecretString,
    endpoint: Option<String>,
    keypair: Option<SigningKeypair>,
    fallback_warned: AtomicBool,
}

impl ConnectionDescriptor {
    /// Create a descriptor. The secret is parsed once here; a secret that is
    /// not a 32-byte hex key selects the simulated signer.
    pub fn new(
        key_name: impl Into<String>,
        secret: impl Into<String>,
        endpoint: Option<String>,
    ) -> Self {
        let secret: String = secret.into();
        let keypair = SigningKeypair::from_hex(&secret);
        Self {
            key_name: key_name.into(),
            secret: SecretString::from(secret),
            endpoint,
            keypair,
            fallback_warned: AtomicBool::new(false),
        }
    }

    pub fn key_name(&self) -> &str {
        &self.key_name
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// True when an Ed25519 key backs this descriptor.
    pub fn has_real_signer(&self) -> bool {
        self.keypair.is_some()
    }

    /// Hex-encoded public key of the real signer, if any.
    pub fn public_key_hex(&self) -> Option<String> {
        self.keypair.as_ref().map(SigningKeypair::public_hex)
    }

    /// Sign `message`. Never fails and is deterministic for a given secret.
    pub fn sign(&self, message: &[u8]) -> MessageSignature {
        if let Some(keypair) = &self.keypair {
            return MessageSignature {
                hex: format!("0x{}", hex::encode(keypair.sign(message).to_bytes())),
                simulated: false,
            };
        }

        if !self.fallback_warned.swap(true, Ordering::Relaxed) {
            warn!(
                key_name = %self.key_name,
                "no signing key available, using simulated signatures"
            );
        }
        MessageSignature {
            hex: self.simulated_signature(message),
            simulated: true,
        }
    }

    /// Check a signature previously produced by [`sign`](Self::sign).
    pub fn verify(&self, message: &[u8], signature_hex: &str) -> bool {
        match &self.keypair {
            Some(keypair) => {
                let digits = signature_hex.strip_prefix("0x").unwrap_or(signature_hex);
                let Some(bytes) = hex::decode(digits)
                    .ok()
                    .and_then(|b| <[u8; 64]>::try_from(b).ok())
                else {
                    return false;
                };
                keypair.verify_strict(message, &Signature::from_bytes(&bytes))
            }
            None => self.simulated_signature(message) == signature_hex,
        }
    }

    /// Descriptive, secret-free view of this descriptor.
    pub fn describe(&self) -> ConnectionInfo {
        ConnectionInfo {
            key_name: self.key_name.clone(),
            endpoint: self.endpoint.clone(),
            connected: self.endpoint.as_deref().is_some_and(|e| !e.is_empty()),
        }
    }

    fn simulated_signature(&self, message: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.secret.expose_secret().as_bytes());
        hasher.update(message);
        format!("0x{}", hex::encode(hasher.finalize()))
    }
}

impl std::fmt::Debug for ConnectionDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionDescriptor")
            .field("key_name", &self.key_name)
            .field("secret", &"[redacted]")
            .field("endpoint", &self.endpoint)
            .field("real_signer", &self.keypair.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn describe_reports_connected_only_with_endpoint() {
        let with = ConnectionDescriptor::new("k", "0x1234", Some("https://rpc.example".into()));
        let info = with.describe();
        assert_eq!(info.key_name, "k");
        assert_eq!(info.endpoint.as_deref(), Some("https://rpc.example"));
        assert!(info.connected);

        let without = ConnectionDescriptor::new("k", "0x1234", None);
        assert!(!without.describe().connected);

        let empty = ConnectionDescriptor::new("k", "0x1234", Some(String::new()));
        assert!(!empty.describe().connected);
    }

    #[test]
    fn simulated_signature_is_deterministic_and_flagged() {
        let desc = ConnectionDescriptor::new("k", "0xdead", None);
        assert!(!desc.has_real_signer());

        let a = desc.sign(b"hello");
        let b = desc.sign(b"hello");
        assert_eq!(a, b);
        assert!(a.simulated);
        assert!(a.hex.starts_with("0x"));
        assert_eq!(a.hex.len(), 2 + 64);
        assert_ne!(a.hex, desc.sign(b"other").hex);
    }

    #[test]
    fn simulated_signature_matches_digest_of_secret_and_message() {
        let desc = ConnectionDescriptor::new("k", "s3cret", None);
        let mut hasher = Sha256::new();
        hasher.update(b"s3cret");
        hasher.update(b"msg");
        let expected = format!("0x{}", hex::encode(hasher.finalize()));
        assert_eq!(desc.sign(b"msg").hex, expected);
    }

    #[test]
    fn real_signer_is_preferred_for_hex_keys() {
        let kp = SigningKeypair::generate();
        let secret = format!("0x{}", hex::encode(kp.private_bytes()));
        let desc = ConnectionDescriptor::new("k", secret, None);

        assert!(desc.has_real_signer());
        assert_eq!(desc.public_key_hex(), Some(kp.public_hex()));

        let sig = desc.sign(b"tx bytes");
        assert!(!sig.simulated);
        assert_eq!(sig.hex.len(), 2 + 128);
        assert!(desc.verify(b"tx bytes", &sig.hex));
        assert!(!desc.verify(b"other bytes", &sig.hex));
        // Ed25519 is deterministic too.
        assert_eq!(sig, desc.sign(b"tx bytes"));
    }

    #[test]
    fn sign_accepts_any_bytes() {
        let desc = ConnectionDescriptor::new("k", "", None);
        let _ = desc.sign(b"");
        let _ = desc.sign(&[0xFF; 4096]);
    }

    #[test]
    fn verify_simulated_signature() {
        let desc = ConnectionDescriptor::new("k", "0x42", None);
        let sig = desc.sign(b"m");
        assert!(desc.verify(b"m", &sig.hex));
        assert!(!desc.verify(b"n", &sig.hex));
    }

    #[test]
    fn debug_redacts_secret() {
        let desc = ConnectionDescriptor::new("k", "super-secret-value", None);
        let debug = format!("{desc:?}");
        assert!(!debug.contains("super-secret-value"));
        assert!(debug.contains("[redacted]"));
    }

    #[traced_test]
    #[test]
    fn fallback_is_logged() {
        let desc = ConnectionDescriptor::new("loud", "not-a-key", None);
        desc.sign(b"x");
        assert!(logs_contain("simulated signatures"));
    }
}
