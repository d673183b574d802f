pub mod ecdsa;
pub mod message;
pub mod network;
pub mod wif;

// Re-export main items for easier access
pub use ecdsa::{recover_public_key, MessageSignature};
pub use network::{NetworkParameters, BITCOIN};
pub use wif::PrivateKey;
