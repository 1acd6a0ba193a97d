use crate::bitcoin::hash::Hash;
use crate::bitcoin::{AsAny, Encodable, Serializable};
use crate::Error;
use bytes::{Buf, BufMut};
use hex::{FromHex, ToHex};
use std::fmt::Debug;

/// The BlockHash is used to identify block headers and enforce proof of work.
pub type BlockHash = Hash;
/// The MerkleRoot is the root of the merkle tree of this block's transaction hashes.
pub type MerkleRoot = Hash;

/// Any block header variant.
///
/// Every network shares the 80-byte base header that is hashed for proof of work. Variants carry
/// extra data after it (see [AuxPowHeader](crate::bitcoin::AuxPowHeader)), which is why the base is
/// exposed separately from the variant.
pub trait Header: Serializable + AsAny + Debug {
    /// The 80-byte base header.
    fn base(&self) -> &BlockHeader;

    fn base_mut(&mut self) -> &mut BlockHeader;

    fn clone_box(&self) -> Box<dyn Header>;

    /// The block hash, the double SHA256 of the base header.
    fn hash(&self) -> BlockHash {
        self.base().hash()
    }
}

impl Clone for Box<dyn Header> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// The baseline 80-byte block header.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone)]
pub struct BlockHeader {
    /// Block version.
    pub version: u32,
    /// Hash of the previous block header.
    pub prev_hash: BlockHash,
    /// Root of the merkle tree of this block's transaction hashes.
    pub merkle_root: MerkleRoot,
    /// Timestamp when this block was created as recorded by the miner.
    pub timestamp: u32,
    /// Target difficulty bits.
    pub bits: u32,
    /// Nonce used to mine the block.
    pub nonce: u32,
}

impl BlockHeader {
    /// Size of the BlockHeader in bytes
    pub const SIZE: u64 = 80;

    /// Calculates the hash for this block header
    pub fn hash(&self) -> BlockHash {
        let mut v = Vec::with_capacity(Self::SIZE as usize);
        self.write_fields(&mut v);
        Hash::sha256d(&v)
    }

    fn write_fields(&self, buffer: &mut dyn BufMut) {
        buffer.put_u32_le(self.version);
        buffer.put_slice(&self.prev_hash.raw);
        buffer.put_slice(&self.merkle_root.raw);
        buffer.put_u32_le(self.timestamp);
        buffer.put_u32_le(self.bits);
        buffer.put_u32_le(self.nonce);
    }
}

impl Header for BlockHeader {
    fn base(&self) -> &BlockHeader {
        self
    }

    fn base_mut(&mut self) -> &mut BlockHeader {
        self
    }

    fn clone_box(&self) -> Box<dyn Header> {
        Box::new(self.clone())
    }
}

impl Encodable for BlockHeader {
    fn from_binary(buffer: &mut dyn Buf) -> crate::Result<Self>
    where
        Self: Sized,
    {
        if buffer.remaining() < Self::SIZE as usize {
            return Err(Error::DataTooSmall);
        }
        Ok(BlockHeader {
            version: buffer.get_u32_le(),
            prev_hash: Hash::from_binary(buffer)?,
            merkle_root: Hash::from_binary(buffer)?,
            timestamp: buffer.get_u32_le(),
            bits: buffer.get_u32_le(),
            nonce: buffer.get_u32_le(),
        })
    }

    fn to_binary(&self, buffer: &mut dyn BufMut) -> crate::Result<()> {
        self.write_fields(buffer);
        Ok(())
    }

    fn encoded_size(&self) -> u64 {
        Self::SIZE
    }
}

impl FromHex for BlockHeader {
    type Error = Error;

    fn from_hex<T: AsRef<[u8]>>(hex: T) -> Result<Self, Self::Error> {
        let bytes = Vec::<u8>::from_hex(hex)?;
        BlockHeader::from_binary(&mut bytes.as_slice())
    }
}

impl ToHex for BlockHeader {
    fn encode_hex<T: FromIterator<char>>(&self) -> T {
        let mut v = Vec::with_capacity(Self::SIZE as usize);
        self.write_fields(&mut v);
        v.encode_hex()
    }

    fn encode_hex_upper<T: FromIterator<char>>(&self) -> T {
        let mut v = Vec::with_capacity(Self::SIZE as usize);
        self.write_fields(&mut v);
        v.encode_hex_upper()
    }
}
