use bitcoinsv_consensus::bitcoin::{BlockHeader, Encodable, Header};
use bitcoinsv_consensus::ConsensusFactory;
use bytes::{Buf, BufMut};

/// Initialise logging for tests, safe to call from every test.
#[allow(dead_code)]
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A header variant that carries a mark after the base header, so tests can tell which factory
/// produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedHeader {
    pub header: BlockHeader,
    pub mark: u32,
}

impl Header for MarkedHeader {
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

impl Encodable for MarkedHeader {
    fn from_binary(buffer: &mut dyn Buf) -> bitcoinsv_consensus::Result<Self>
    where
        Self: Sized,
    {
        let header = BlockHeader::from_binary(buffer)?;
        let mark = buffer.try_get_u32_le()?;
        Ok(MarkedHeader { header, mark })
    }

    fn to_binary(&self, buffer: &mut dyn BufMut) -> bitcoinsv_consensus::Result<()> {
        self.header.to_binary(buffer)?;
        buffer.put_u32_le(self.mark);
        Ok(())
    }

    fn encoded_size(&self) -> u64 {
        BlockHeader::SIZE + 4
    }
}

/// A network that only overrides header creation.
pub struct MarkedNetwork {
    pub mark: u32,
}

impl ConsensusFactory for MarkedNetwork {
    fn create_block_header(&self) -> Box<dyn Header> {
        Box::new(MarkedHeader {
            header: BlockHeader::default(),
            mark: self.mark,
        })
    }
}
