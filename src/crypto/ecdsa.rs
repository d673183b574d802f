use std::fmt;

use base64::prelude::*;
use k256::ecdsa::{signature::hazmat::PrehashVerifier, RecoveryId, Signature, VerifyingKey};

use crate::crypto::message::magic_hash;
use crate::crypto::network::NetworkParameters;
use crate::crypto::wif::PrivateKey;
use crate::error::SigningError;

/// Length of a compact recoverable signature
pub const SIGNATURE_LEN: usize = 65;

const FLAG_BASE: u8 = 27;
const FLAG_COMPRESSED: u8 = 4;

/// A 65-byte recoverable signature: `flag || r || s`
///
/// The flag byte is `27 + recovery_id`, plus 4 when the signer's public
/// key is in compressed form. `Display` writes standard base64.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct MessageSignature([u8; SIGNATURE_LEN]);

impl MessageSignature {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SigningError> {
        let bytes: [u8; SIGNATURE_LEN] = bytes.try_into().map_err(|_| {
            SigningError::InvalidSignature(format!(
                "expected {SIGNATURE_LEN} bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self(bytes))
    }

    /// Parse a base64 signature such as the one produced by [`Self::to_base64`]
    pub fn from_base64(signature_b64: &str) -> Result<Self, SigningError> {
        let bytes = BASE64_STANDARD
            .decode(signature_b64.trim())
            .map_err(|e| SigningError::InvalidSignature(format!("bad base64: {e}")))?;
        Self::from_bytes(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }

    pub fn to_base64(&self) -> String {
        BASE64_STANDARD.encode(self.0)
    }

    pub fn flag(&self) -> u8 {
        self.0[0]
    }

    /// Whether the flag marks a compressed public key
    pub fn is_compressed(&self) -> bool {
        self.flag() >= FLAG_BASE + FLAG_COMPRESSED
    }

    fn recovery_parts(&self) -> Result<(Signature, RecoveryId), SigningError> {
        let flag = self.flag();
        if !(FLAG_BASE..FLAG_BASE + 8).contains(&flag) {
            return Err(SigningError::InvalidSignature(format!(
                "flag byte {flag} outside 27..=34"
            )));
        }
        let recovery_id = RecoveryId::from_byte((flag - FLAG_BASE) & 3).ok_or_else(|| {
            SigningError::InvalidSignature("invalid recovery id".to_string())
        })?;
        let signature = Signature::from_slice(&self.0[1..])
            .map_err(|e| SigningError::InvalidSignature(e.to_string()))?;
        Ok((signature, recovery_id))
    }
}

impl fmt::Display for MessageSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base64())
    }
}

impl fmt::Debug for MessageSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MessageSignature({})", self.to_base64())
    }
}

/// Sign `message` under the network's signed-message scheme
///
/// Nonces follow RFC6979 and `s` is low-S normalized, so the output is
/// deterministic for a given key and message.
///
/// # Errors
/// - `AlgorithmFailure` - k256 rejected the digest
pub fn sign_compact(
    message: &str,
    key: &PrivateKey,
    network: &NetworkParameters,
    compressed: bool,
) -> Result<MessageSignature, SigningError> {
    let digest = magic_hash(message, network);
    let (signature, recovery_id) = key
        .signing_key()
        .sign_prehash_recoverable(&digest)
        .map_err(|e| SigningError::AlgorithmFailure(e.to_string()))?;

    let mut out = [0u8; SIGNATURE_LEN];
    out[0] = FLAG_BASE
        + recovery_id.to_byte()
        + if compressed { FLAG_COMPRESSED } else { 0 };
    out[1..].copy_from_slice(&signature.to_bytes());
    Ok(MessageSignature(out))
}

/// Recover the signer's public key from a message and its signature
///
/// # Errors
/// - `InvalidSignature` - Bad flag byte, malformed `r`/`s`, or no key recoverable
pub fn recover_public_key(
    message: &str,
    signature: &MessageSignature,
    network: &NetworkParameters,
) -> Result<VerifyingKey, SigningError> {
    let (sig, recovery_id) = signature.recovery_parts()?;
    let digest = magic_hash(message, network);
    VerifyingKey::recover_from_prehash(&digest, &sig, recovery_id)
        .map_err(|e| SigningError::InvalidSignature(format!("key recovery failed: {e}")))
}

/// Verify a signed message against a SEC1-encoded public key
///
/// Mirrors the standard Bitcoin check: the key recovered from the signature
/// must equal the expected key, in the encoding (compressed or not) that
/// the signature's flag announces, and the signature must verify under it.
///
/// # Arguments
/// * `message` - The exact message that was signed
/// * `signature` - The 65-byte recoverable signature
/// * `public_key_sec1` - 33- or 65-byte SEC1 public key
///
/// # Errors
/// - `InvalidSignature` - Malformed public key or signature, or a mismatch
///
/// # Example
/// ```rust
/// use zelid_auth::{sign_message, verify_message};
///
/// let wif = "L1aW4aubDFB7yfras2S1mN3bqg9nwySY8nkoLmJebSLD5BWv3ENZ";
/// let signature = sign_message("Hello, World!", wif).unwrap();
/// let public_key =
///     hex::decode("021af0625ebd8da5ae06ebe2ebe1088926cdafe4c618ac888d4d378edb8460e3d8").unwrap();
/// assert!(verify_message("Hello, World!", &signature, &public_key).is_ok());
/// ```
pub fn verify_compact(
    message: &str,
    signature: &MessageSignature,
    public_key_sec1: &[u8],
    network: &NetworkParameters,
) -> Result<(), SigningError> {
    let expected = VerifyingKey::from_sec1_bytes(public_key_sec1)
        .map_err(|e| SigningError::InvalidSignature(format!("bad public key: {e}")))?;
    let recovered = recover_public_key(message, signature, network)?;

    let announced = recovered
        .to_encoded_point(signature.is_compressed())
        .as_bytes()
        .to_vec();
    if announced != public_key_sec1 || recovered != expected {
        return Err(SigningError::InvalidSignature(
            "signature does not match public key".to_string(),
        ));
    }

    let (sig, _) = signature.recovery_parts()?;
    expected
        .verify_prehash(&magic_hash(message, network), &sig)
        .map_err(|e| SigningError::InvalidSignature(format!("failed to verify: {e}")))
}
