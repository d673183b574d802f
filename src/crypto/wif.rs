use std::fmt;

use k256::ecdsa::{SigningKey, VerifyingKey};
use zeroize::Zeroizing;

use crate::crypto::message::sha256d;
use crate::crypto::network::NetworkParameters;
use crate::error::SigningError;

const PRIVATE_KEY_LEN: usize = 32;
const CHECKSUM_LEN: usize = 4;
const COMPRESSED_FLAG: u8 = 0x01;

/// A secp256k1 private key decoded from WIF
///
/// The scalar lives inside a k256 `SigningKey`, which is zeroized on drop.
/// The type is neither `Clone` nor `Display`, and its `Debug` output is
/// redacted, so it is meant to be created, used and dropped within a
/// single call.
pub struct PrivateKey {
    inner: SigningKey,
    compressed: bool,
}

impl PrivateKey {
    /// Decode a Base58Check WIF string for the given network
    ///
    /// Accepted payloads (after the 4-byte checksum is stripped):
    /// - `version || key` (33 bytes, uncompressed public key)
    /// - `version || key || 0x01` (34 bytes, compressed public key)
    ///
    /// # Errors
    /// - `InvalidKey` - Bad Base58, checksum mismatch, unexpected length,
    ///   wrong version byte, bad compression flag, or out-of-range scalar
    pub fn from_wif(wif: &str, network: &NetworkParameters) -> Result<Self, SigningError> {
        let decoded = Zeroizing::new(
            bs58::decode(wif)
                .into_vec()
                .map_err(|e| SigningError::InvalidKey(format!("not valid base58: {e}")))?,
        );

        if decoded.len() < CHECKSUM_LEN + 1 {
            return Err(SigningError::InvalidKey(format!(
                "payload too short: {} bytes",
                decoded.len()
            )));
        }
        let (payload, checksum) = decoded.split_at(decoded.len() - CHECKSUM_LEN);
        if sha256d(payload)[..CHECKSUM_LEN] != *checksum {
            return Err(SigningError::InvalidKey("checksum mismatch".to_string()));
        }

        let compressed = match payload.len() {
            33 => false,
            34 if payload[33] == COMPRESSED_FLAG => true,
            34 => {
                return Err(SigningError::InvalidKey(
                    "invalid compression flag".to_string(),
                ))
            }
            n => {
                return Err(SigningError::InvalidKey(format!(
                    "invalid payload length {n}, expected 33 or 34"
                )))
            }
        };

        if payload[0] != network.wif {
            return Err(SigningError::InvalidKey(format!(
                "network version byte 0x{:02x} does not match expected 0x{:02x}",
                payload[0], network.wif
            )));
        }

        let inner = SigningKey::from_slice(&payload[1..1 + PRIVATE_KEY_LEN])
            .map_err(|_| SigningError::InvalidKey("scalar out of range".to_string()))?;

        Ok(Self { inner, compressed })
    }

    /// Whether the WIF payload carried the compressed-public-key flag
    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    pub fn verifying_key(&self) -> &VerifyingKey {
        self.inner.verifying_key()
    }

    /// SEC1 encoding of the public key, compressed (33 bytes) or not (65 bytes)
    pub fn public_key_bytes(&self, compressed: bool) -> Vec<u8> {
        self.verifying_key()
            .to_encoded_point(compressed)
            .as_bytes()
            .to_vec()
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.inner
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("inner", &"[REDACTED]")
            .field("compressed", &self.compressed)
            .finish()
    }
}
