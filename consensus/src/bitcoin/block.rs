use crate::bitcoin::{
    varint_decode, varint_encode, varint_size, BlockHash, Header, Serializable, Transaction,
};
use crate::{ConsensusFactory, Error, Result};
use bytes::{Buf, BufMut};
use log::trace;

/// A full block: a header followed by its transactions.
///
/// Both the header and the transactions are network variants chosen by the
/// [ConsensusFactory] that created the block.
#[derive(Clone, Debug)]
pub struct Block {
    pub header: Box<dyn Header>,
    pub transactions: Vec<Box<dyn Transaction>>,
}

impl Block {
    /// An empty block with the given header.
    pub fn new(header: Box<dyn Header>) -> Self {
        Block {
            header,
            transactions: vec![],
        }
    }

    pub fn hash(&self) -> BlockHash {
        self.header.hash()
    }

    /// Decode a block into this one.
    ///
    /// The header is decoded into a copy of the existing header object, so its variant is kept.
    /// Each transaction is created by `factory` before being decoded. On error the block is left
    /// unchanged.
    pub fn read_with(&mut self, factory: &dyn ConsensusFactory, buffer: &mut dyn Buf) -> Result<()> {
        let mut header = self.header.clone_box();
        header.read(buffer)?;
        let num_tx = varint_decode(buffer)?;
        // every transaction takes at least one byte
        if num_tx > buffer.remaining() as u64 {
            return Err(Error::DataTooLarge);
        }
        let mut transactions = Vec::with_capacity(num_tx as usize);
        for _ in 0..num_tx {
            let mut tx = factory.create_transaction();
            tx.read(buffer)?;
            transactions.push(tx);
        }
        trace!("decoded block {} with {} transactions", header.hash(), num_tx);
        self.header = header;
        self.transactions = transactions;
        Ok(())
    }

    /// Write the block to a buffer.
    pub fn write(&self, buffer: &mut dyn BufMut) -> Result<()> {
        self.header.write(buffer)?;
        varint_encode(buffer, self.transactions.len() as u64)?;
        for tx in &self.transactions {
            tx.write(buffer)?;
        }
        Ok(())
    }

    pub fn serialized_size(&self) -> u64 {
        self.header.serialized_size()
            + varint_size(self.transactions.len() as u64)
            + self
                .transactions
                .iter()
                .map(|tx| tx.serialized_size())
                .sum::<u64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitcoin::{
        BlockHeader, Encodable, Outpoint, Script, TimestampedTx, Tx, TxInput, TxOutput,
    };
    use crate::StandardFactory;

    fn coinbase() -> Tx {
        let mut tx = Tx::default();
        tx.inputs
            .push(TxInput::new(Outpoint::default(), Script::from(vec![0x03, 0x01, 0x02, 0x03])));
        tx.outputs.push(TxOutput::new(50_0000_0000, Script::from(vec![0x51])));
        tx
    }

    #[test]
    fn write_then_read_with_factory() {
        let mut block = Block::new(Box::new(BlockHeader {
            version: 4,
            nonce: 99,
            ..Default::default()
        }));
        block.transactions.push(Box::new(coinbase()));
        block.transactions.push(Box::new(coinbase()));
        let mut v = Vec::new();
        block.write(&mut v).unwrap();
        assert_eq!(v.len() as u64, block.serialized_size());

        let factory = StandardFactory;
        let mut decoded = factory.create_block();
        decoded.read_with(&factory, &mut v.as_slice()).unwrap();
        assert_eq!(decoded.hash(), block.hash());
        assert_eq!(decoded.transactions.len(), 2);
        assert_eq!(decoded.transactions[1].hash(), block.transactions[1].hash());
        assert!(decoded.transactions[0].as_ref().as_any().is::<Tx>());
    }

    #[test]
    fn absurd_tx_count() {
        let mut v = vec![0u8; 80];
        v.extend_from_slice(&[0xfe, 0xff, 0xff, 0xff, 0x00]);
        let factory = StandardFactory;
        let mut block = factory.create_block();
        assert!(matches!(
            block.read_with(&factory, &mut v.as_slice()),
            Err(Error::DataTooLarge)
        ));
    }

    #[test]
    fn failed_read_keeps_block() {
        let factory = StandardFactory;
        let mut block = factory.create_block();
        block.transactions.push(Box::new(coinbase()));
        let hash = block.hash();
        let tx_hash = block.transactions[0].hash();

        let incoming = BlockHeader {
            nonce: 99,
            ..Default::default()
        };
        let mut v = incoming.to_binary_buf().unwrap();
        v.push(0x01);
        // a transaction cut off after its version
        v.extend_from_slice(&[0x01, 0x00, 0x00, 0x00, 0x01]);
        assert!(block.read_with(&factory, &mut v.as_slice()).is_err());
        assert_eq!(block.hash(), hash);
        assert_eq!(block.header.base().nonce, 0);
        assert_eq!(block.transactions.len(), 1);
        assert_eq!(block.transactions[0].hash(), tx_hash);
    }

    #[test]
    fn mixed_variants_size() {
        let mut block = Block::new(Box::new(BlockHeader::default()));
        block.transactions.push(Box::new(TimestampedTx::new(10)));
        block.transactions.push(Box::new(Tx::default()));
        // header + count + (12 + 2) + (8 + 2)
        assert_eq!(block.serialized_size(), 80 + 1 + 14 + 10);
    }
}
