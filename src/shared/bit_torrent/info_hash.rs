//! A `BitTorrent` `InfoHash`. It's a unique identifier for a `BitTorrent` torrent.
//!
//! "The 20-byte sha1 hash of the bencoded form of the info value
//! from the metainfo file."
//!
//! See [BEP 3. The `BitTorrent` Protocol Specification](https://www.bittorrent.org/beps/bep_0003.html)
//! for the official specification.
//!
//! The monitor does not announce real torrents. Every probe uses a random
//! info-hash, so the tracker can not associate two probes with a swarm.
//!
//! > **NOTICE**: It only supports Info Hash v1.

/// `BitTorrent` Info Hash v1
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct InfoHash(pub [u8; 20]);

const INFO_HASH_BYTES_LEN: usize = 20;

impl InfoHash {
    /// A new random info-hash.
    #[must_use]
    pub fn random() -> Self {
        Self(rand::random::<[u8; INFO_HASH_BYTES_LEN]>())
    }

    /// Returns the `InfoHash` internal byte array.
    #[must_use]
    pub fn bytes(&self) -> [u8; 20] {
        self.0
    }

    /// Returns the `InfoHash` as a hex string.
    #[must_use]
    pub fn to_hex_string(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for InfoHash {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl std::convert::From<[u8; 20]> for InfoHash {
    fn from(val: [u8; 20]) -> Self {
        InfoHash(val)
    }
}
