use crate::bitcoin::Encodable;
use crate::Error;
use bytes::{Buf, BufMut};
use hex::{FromHex, ToHex};
use ring::digest::{digest, SHA256};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// A double SHA256 hash, the hash used throughout the block and transaction formats.
///
/// [BlockHash], [MerkleRoot] and [TxHash] are aliases of this struct and should generally be
/// preferred in signatures.
///
/// [BlockHash]: crate::bitcoin::BlockHash
/// [MerkleRoot]: crate::bitcoin::MerkleRoot
/// [TxHash]: crate::bitcoin::TxHash
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hash {
    pub raw: [u8; 32],
}

impl Hash {
    pub const SIZE: u64 = 32;
    pub const HEX_SIZE: u64 = Hash::SIZE * 2;
    pub const ZERO: Hash = Hash {
        raw: [0; Self::SIZE as usize],
    };

    /// Double SHA256 hash the given data.
    pub fn sha256d(data: &[u8]) -> Hash {
        let first = digest(&SHA256, data);
        let second = digest(&SHA256, first.as_ref());
        let mut raw = [0; 32];
        raw.copy_from_slice(second.as_ref());
        Hash { raw }
    }

    /// The hex form is byte-reversed, matching the way hashes are displayed by node software.
    fn reversed(&self) -> [u8; 32] {
        let mut r = self.raw;
        r.reverse();
        r
    }
}

impl Encodable for Hash {
    fn from_binary(buffer: &mut dyn Buf) -> crate::Result<Self>
    where
        Self: Sized,
    {
        if buffer.remaining() < Self::SIZE as usize {
            return Err(Error::DataTooSmall);
        }
        let mut raw = [0; 32];
        buffer.copy_to_slice(&mut raw);
        Ok(Hash { raw })
    }

    fn to_binary(&self, buffer: &mut dyn BufMut) -> crate::Result<()> {
        buffer.put_slice(&self.raw);
        Ok(())
    }

    fn encoded_size(&self) -> u64 {
        Self::SIZE
    }
}

impl FromHex for Hash {
    type Error = Error;

    /// Decode 64 hex characters, reversing the byte order.
    fn from_hex<T: AsRef<[u8]>>(hex: T) -> Result<Self, Self::Error> {
        let hex = hex.as_ref();
        if hex.len() != Hash::HEX_SIZE as usize {
            return Err(Error::BadArgument(format!(
                "Length of hex encoded hash must be 64. Len is {:}.",
                hex.len()
            )));
        }
        let mut bytes = hex::decode(hex)?;
        bytes.reverse();
        let mut raw = [0u8; 32];
        raw.copy_from_slice(&bytes);
        Ok(Hash { raw })
    }
}

impl ToHex for Hash {
    fn encode_hex<T: FromIterator<char>>(&self) -> T {
        hex::encode(self.reversed()).chars().collect()
    }

    fn encode_hex_upper<T: FromIterator<char>>(&self) -> T {
        hex::encode_upper(self.reversed()).chars().collect()
    }
}

impl From<[u8; 32]> for Hash {
    fn from(raw: [u8; 32]) -> Self {
        Hash { raw }
    }
}

impl Ord for Hash {
    /// Hashes order the same way as their hex representations, i.e. from the last byte of the
    /// encoded form to the first.
    fn cmp(&self, other: &Hash) -> Ordering {
        self.reversed().cmp(&other.reversed())
    }
}

impl PartialOrd for Hash {
    fn partial_cmp(&self, other: &Hash) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.encode_hex::<String>())
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.encode_hex::<String>())
    }
}

impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode_hex::<String>())
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Hash::from_hex(s).map_err(|e| serde::de::Error::custom(e.to_string()))
    }
}
