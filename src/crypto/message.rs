use sha2::{Digest, Sha256};

use crate::crypto::network::NetworkParameters;

/// SHA-256 applied twice
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    let first = Sha256::digest(data);
    Sha256::digest(first).into()
}

/// Append `n` in Bitcoin's CompactSize encoding
pub fn write_varint(buf: &mut Vec<u8>, n: u64) {
    match n {
        0..=0xfc => buf.push(n as u8),
        0xfd..=0xffff => {
            buf.push(0xfd);
            buf.extend_from_slice(&(n as u16).to_le_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            buf.push(0xfe);
            buf.extend_from_slice(&(n as u32).to_le_bytes());
        }
        _ => {
            buf.push(0xff);
            buf.extend_from_slice(&n.to_le_bytes());
        }
    }
}

/// Digest signed for a "Bitcoin Signed Message"
///
/// `sha256d(prefix || varint(len(message)) || message)`, where the length
/// is the UTF-8 byte length and the message bytes are used as given.
///
/// # Example
/// ```rust
/// use zelid_auth::crypto::{message::magic_hash, network::BITCOIN};
///
/// let digest = magic_hash("Hello, World!", &BITCOIN);
/// assert_eq!(digest.len(), 32);
/// ```
pub fn magic_hash(message: &str, network: &NetworkParameters) -> [u8; 32] {
    let prefix = network.message_prefix.as_bytes();
    let body = message.as_bytes();
    let mut buf = Vec::with_capacity(prefix.len() + 9 + body.len());
    buf.extend_from_slice(prefix);
    write_varint(&mut buf, body.len() as u64);
    buf.extend_from_slice(body);
    sha256d(&buf)
}
