//! Merge-mined block headers.
//!
//! A merge-mined chain accepts proof of work done on a parent chain. The header carries the usual
//! 80 bytes followed, when the auxpow version bit is set, by the proof that the parent block commits
//! to this block's hash.

use crate::bitcoin::tx::{items_size, read_items, write_items};
use crate::bitcoin::{BlockHash, BlockHeader, Encodable, Hash, Header, Tx};
use crate::Error;
use bytes::{Buf, BufMut};

/// Version bit signalling that an [AuxPow] follows the base header.
pub const VERSION_AUXPOW: u32 = 1 << 8;

/// The chain id lives in the top 16 bits of the version.
const CHAIN_ID_SHIFT: u32 = 16;

/// A merkle branch linking a leaf to a merkle root.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MerkleBranch {
    pub hashes: Vec<Hash>,
    /// Bit `n` set means the leaf side is on the right at depth `n`.
    pub side_mask: u32,
}

impl Encodable for MerkleBranch {
    fn from_binary(buffer: &mut dyn Buf) -> crate::Result<Self>
    where
        Self: Sized,
    {
        let hashes = read_items(buffer)?;
        let side_mask = buffer.try_get_u32_le()?;
        Ok(MerkleBranch { hashes, side_mask })
    }

    fn to_binary(&self, buffer: &mut dyn BufMut) -> crate::Result<()> {
        write_items(buffer, &self.hashes)?;
        buffer.put_u32_le(self.side_mask);
        Ok(())
    }

    fn encoded_size(&self) -> u64 {
        items_size(&self.hashes) + 4
    }
}

/// The auxiliary proof of work.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AuxPow {
    /// Coinbase of the parent block, committing to this chain's block hash.
    pub coinbase_tx: Tx,
    /// Hash of the parent block. Not used for validation but part of the encoding.
    pub parent_hash: BlockHash,
    /// Links the coinbase to the parent's merkle root.
    pub coinbase_branch: MerkleBranch,
    /// Links this chain's block hash to the merged mining root in the coinbase.
    pub blockchain_branch: MerkleBranch,
    /// The parent block header that carries the actual proof of work.
    pub parent_header: BlockHeader,
}

impl Encodable for AuxPow {
    fn from_binary(buffer: &mut dyn Buf) -> crate::Result<Self>
    where
        Self: Sized,
    {
        Ok(AuxPow {
            coinbase_tx: Tx::from_binary(buffer)?,
            parent_hash: Hash::from_binary(buffer)?,
            coinbase_branch: MerkleBranch::from_binary(buffer)?,
            blockchain_branch: MerkleBranch::from_binary(buffer)?,
            parent_header: BlockHeader::from_binary(buffer)?,
        })
    }

    fn to_binary(&self, buffer: &mut dyn BufMut) -> crate::Result<()> {
        self.coinbase_tx.to_binary(buffer)?;
        self.parent_hash.to_binary(buffer)?;
        self.coinbase_branch.to_binary(buffer)?;
        self.blockchain_branch.to_binary(buffer)?;
        self.parent_header.to_binary(buffer)
    }

    fn encoded_size(&self) -> u64 {
        self.coinbase_tx.encoded_size()
            + Hash::SIZE
            + self.coinbase_branch.encoded_size()
            + self.blockchain_branch.encoded_size()
            + BlockHeader::SIZE
    }
}

/// A block header of a merge-mined chain.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AuxPowHeader {
    pub header: BlockHeader,
    pub aux_pow: Option<AuxPow>,
}

impl AuxPowHeader {
    /// An empty header for the chain with the given id.
    pub fn new(chain_id: u16) -> AuxPowHeader {
        AuxPowHeader {
            header: BlockHeader {
                version: 1 | ((chain_id as u32) << CHAIN_ID_SHIFT),
                ..Default::default()
            },
            aux_pow: None,
        }
    }

    pub fn chain_id(&self) -> u16 {
        (self.header.version >> CHAIN_ID_SHIFT) as u16
    }

    pub fn is_auxpow(&self) -> bool {
        self.header.version & VERSION_AUXPOW != 0
    }

    /// Attach or remove the proof, keeping the version bit in step.
    pub fn set_aux_pow(&mut self, aux_pow: Option<AuxPow>) {
        match aux_pow {
            Some(_) => self.header.version |= VERSION_AUXPOW,
            None => self.header.version &= !VERSION_AUXPOW,
        }
        self.aux_pow = aux_pow;
    }
}

impl Header for AuxPowHeader {
    fn base(&self) -> &BlockHeader {
        &self.header
    }

    fn base_mut(&mut self) -> &mut BlockHeader {
        &mut self.header
    }

    fn clone_box(&self) -> Box<dyn Header> {
        Box::new(self.clone())
    }
}

impl Encodable for AuxPowHeader {
    fn from_binary(buffer: &mut dyn Buf) -> crate::Result<Self>
    where
        Self: Sized,
    {
        let header = BlockHeader::from_binary(buffer)?;
        let aux_pow = if header.version & VERSION_AUXPOW != 0 {
            Some(AuxPow::from_binary(buffer)?)
        } else {
            None
        };
        Ok(AuxPowHeader { header, aux_pow })
    }

    fn to_binary(&self, buffer: &mut dyn BufMut) -> crate::Result<()> {
        self.header.to_binary(buffer)?;
        match (&self.aux_pow, self.is_auxpow()) {
            (Some(aux_pow), true) => aux_pow.to_binary(buffer),
            (None, false) => Ok(()),
            (Some(_), false) => Err(Error::BadData(
                "auxpow present but version bit not set".to_string(),
            )),
            (None, true) => Err(Error::BadData(
                "auxpow version bit set but no auxpow".to_string(),
            )),
        }
    }

    fn encoded_size(&self) -> u64 {
        BlockHeader::SIZE + self.aux_pow.as_ref().map_or(0, |a| a.encoded_size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitcoin::{Outpoint, Script, TxInput, TxOutput};

    fn sample_aux_pow() -> AuxPow {
        let mut coinbase_tx = Tx::default();
        coinbase_tx
            .inputs
            .push(TxInput::new(Outpoint::default(), Script::from(vec![0xfa, 0xbe, 0x6d, 0x6d])));
        coinbase_tx
            .outputs
            .push(TxOutput::new(50_0000_0000, Script::from(vec![0x51])));
        AuxPow {
            coinbase_tx,
            parent_hash: Hash::sha256d(b"parent"),
            coinbase_branch: MerkleBranch {
                hashes: vec![Hash::sha256d(b"a"), Hash::sha256d(b"b")],
                side_mask: 0,
            },
            blockchain_branch: MerkleBranch::default(),
            parent_header: BlockHeader {
                version: 2,
                nonce: 42,
                ..Default::default()
            },
        }
    }

    #[test]
    fn chain_id_in_version() {
        let h = AuxPowHeader::new(0x62);
        assert_eq!(h.chain_id(), 0x62);
        assert!(!h.is_auxpow());
        assert_eq!(h.encoded_size(), 80);
    }

    #[test]
    fn widest_chain_id_fills_the_top_bits() {
        let h = AuxPowHeader::new(u16::MAX);
        assert_eq!(h.chain_id(), u16::MAX);
        assert_eq!(h.header.version, 0xffff_0001);
    }

    #[test]
    fn proof_follows_base_header() {
        let mut h = AuxPowHeader::new(0x62);
        h.header.nonce = 7;
        h.set_aux_pow(Some(sample_aux_pow()));
        assert!(h.is_auxpow());
        let bin = h.to_binary_buf().unwrap();
        assert_eq!(bin.len() as u64, h.encoded_size());
        let back = AuxPowHeader::from_binary(&mut bin.as_slice()).unwrap();
        assert_eq!(back, h);
        assert_eq!(back.aux_pow.unwrap().parent_header.nonce, 42);
    }

    /// The proof does not change the block hash, only the base header is hashed.
    #[test]
    fn hash_ignores_proof() {
        let mut h = AuxPowHeader::new(1);
        h.set_aux_pow(Some(sample_aux_pow()));
        assert_eq!(Header::hash(&h), h.header.hash());
        assert_eq!(Header::hash(&h), Hash::sha256d(&h.to_binary_buf().unwrap()[..80]));
    }

    #[test]
    fn inconsistent_flag_fails_to_encode() {
        let mut h = AuxPowHeader::new(1);
        h.header.version |= VERSION_AUXPOW;
        assert!(matches!(h.to_binary_buf(), Err(Error::BadData(_))));
    }
}
