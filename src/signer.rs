use tracing::{debug, warn};

use crate::crypto::{
    ecdsa::{sign_compact, verify_compact, MessageSignature},
    network::{NetworkParameters, BITCOIN},
    wif::PrivateKey,
};
use crate::error::SigningError;

/// Signs messages with WIF-encoded keys under one network's conventions
///
/// A `Signer` holds no key material. Each call to [`Signer::sign`] decodes
/// the key, signs, and drops the key before returning.
///
/// # Example
/// ```rust
/// use zelid_auth::Signer;
///
/// let signer = Signer::bitcoin();
/// let wif = "L1aW4aubDFB7yfras2S1mN3bqg9nwySY8nkoLmJebSLD5BWv3ENZ";
/// let first = signer.sign("Hello, World!", wif).unwrap();
/// let second = signer.sign("Hello, World!", wif).unwrap();
/// assert_eq!(first, second);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Signer {
    network: &'static NetworkParameters,
}

impl Default for Signer {
    fn default() -> Self {
        Self::bitcoin()
    }
}

impl Signer {
    pub fn new(network: &'static NetworkParameters) -> Self {
        Self { network }
    }

    pub fn bitcoin() -> Self {
        Self::new(&BITCOIN)
    }

    pub fn network(&self) -> &'static NetworkParameters {
        self.network
    }

    /// Sign `message` byte-for-byte with the key encoded in `private_key_wif`
    ///
    /// The signature always carries the compressed-key flag, whatever the
    /// WIF payload says.
    ///
    /// # Errors
    /// - `InvalidKey` - The WIF does not decode under this signer's network
    /// - `AlgorithmFailure` - The signature could not be computed
    pub fn sign(
        &self,
        message: &str,
        private_key_wif: &str,
    ) -> Result<MessageSignature, SigningError> {
        let signature = PrivateKey::from_wif(private_key_wif, self.network)
            .and_then(|key| sign_compact(message, &key, self.network, true));

        match &signature {
            Ok(_) => debug!(message_len = message.len(), "signed message"),
            Err(e) => warn!(error = %e, "failed to sign message"),
        }
        signature
    }

    /// Check a signature against a SEC1-encoded public key
    pub fn verify(
        &self,
        message: &str,
        signature: &MessageSignature,
        public_key_sec1: &[u8],
    ) -> Result<(), SigningError> {
        verify_compact(message, signature, public_key_sec1, self.network)
    }
}

/// Sign `message` with a Bitcoin mainnet WIF key
///
/// Shorthand for `Signer::bitcoin().sign(message, private_key_wif)`.
pub fn sign_message(
    message: &str,
    private_key_wif: &str,
) -> Result<MessageSignature, SigningError> {
    Signer::bitcoin().sign(message, private_key_wif)
}

/// Verify a Bitcoin mainnet signed message against a SEC1 public key
pub fn verify_message(
    message: &str,
    signature: &MessageSignature,
    public_key_sec1: &[u8],
) -> Result<(), SigningError> {
    Signer::bitcoin().verify(message, signature, public_key_sec1)
}
