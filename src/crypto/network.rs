/// BIP32 extended key version bytes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bip32Versions {
    pub public: u32,
    pub private: u32,
}

/// Constants needed to interpret keys and hash messages for one network
///
/// Only `message_prefix` and `wif` take part in signing; the remaining
/// fields complete the bundle so it can be passed around as a whole.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NetworkParameters {
    /// Length-prefixed magic string hashed in front of every message
    pub message_prefix: &'static str,
    pub bech32: &'static str,
    pub bip32: Bip32Versions,
    pub pub_key_hash: u8,
    pub script_hash: u8,
    /// Version byte expected at the start of a WIF payload
    pub wif: u8,
}

/// Bitcoin mainnet
pub const BITCOIN: NetworkParameters = NetworkParameters {
    message_prefix: "\x18Bitcoin Signed Message:\n",
    bech32: "bc",
    bip32: Bip32Versions {
        public: 0x0488_b21e,
        private: 0x0488_ade4,
    },
    pub_key_hash: 0x00,
    script_hash: 0x05,
    wif: 0x80,
};
