//! # zelid-auth
//!
//! Client-side **ZelID login** using the **Bitcoin signed-message** scheme.
//! A WIF-encoded secp256k1 key signs a login phrase issued by the
//! verification service, the signature is submitted to `/id/verifylogin`,
//! and on success the caller receives the `zelid=…&signature=…&loginPhrase=…`
//! header used for authenticated requests.
//!
//! ## Features
//!
//! - **Deterministic Message Signing** - RFC6979 nonces, 65-byte recoverable signatures
//! - **Strict WIF Decoding** - Checksum, length, network byte and scalar range are all checked
//! - **Signature Verification** - Recover or check the signer's public key
//! - **Login Handshake** - Fetch a phrase, sign it, and have it verified
//! - **Typed Errors** - Signing, transport, timeout and rejection are distinct variants
//!
//! ## Quick Start
//!
//! ```rust
//! use zelid_auth::{sign_message, verify_message};
//!
//! let wif = "L1aW4aubDFB7yfras2S1mN3bqg9nwySY8nkoLmJebSLD5BWv3ENZ";
//! let signature = sign_message("Hello, World!", wif).unwrap();
//! println!("Signature: {}", signature);
//!
//! let public_key =
//!     hex::decode("021af0625ebd8da5ae06ebe2ebe1088926cdafe4c618ac888d4d378edb8460e3d8").unwrap();
//! assert!(verify_message("Hello, World!", &signature, &public_key).is_ok());
//! ```
//!
//! Logging in against a verification service:
//!
//! ```rust,no_run
//! use zelid_auth::{AuthClient, AuthConfig};
//! use secrecy::SecretString;
//!
//! # async fn run() -> zelid_auth::Result<()> {
//! let client = AuthClient::new(AuthConfig::from_env()?)?;
//! let key = SecretString::new(std::env::var("ZELID_PRIVATE_KEY").unwrap_or_default());
//! let header = client.login("1ZelIdAddress", &key).await?;
//! println!("{}", header);
//! # Ok(())
//! # }
//! ```
//!
//! ## Examples
//!
//! ```bash
//! cargo run --example sign_and_verify
//! ```

pub mod auth;
pub mod config;
pub mod crypto;
pub mod error;
pub mod signer;

// Re-export main types for easier access
pub use auth::{build_auth_header, AuthClient, AuthHeader};
pub use config::AuthConfig;
pub use crypto::ecdsa::MessageSignature;
pub use crypto::network::{NetworkParameters, BITCOIN};
pub use error::{AuthError, Result, SigningError};
pub use signer::{sign_message, verify_message, Signer};
