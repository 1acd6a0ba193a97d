#![no_main]

use libfuzzer_sys::fuzz_target;
use bitcoinsv_consensus::bitcoin::BlockchainId;
use bitcoinsv_consensus::{ConsensusConfig, ConsensusFactory, HeaderFormat, TxFormat};

fuzz_target!(|data: &[u8]| {
    // first byte picks the header and transaction layout
    let Some((selector, mut rest)) = data.split_first() else {
        return;
    };
    let mut config = ConsensusConfig::new(BlockchainId::Regtest);
    if selector & 1 != 0 {
        config.header = HeaderFormat::AuxPow { chain_id: 98 };
    }
    if selector & 2 != 0 {
        config.transaction = TxFormat::Timestamped;
    }
    let factory = config.factory();
    let mut block = factory.create_block();
    if block.read_with(factory.as_ref(), &mut rest).is_ok() {
        let mut encoded = Vec::new();
        block.write(&mut encoded).unwrap();
        assert_eq!(encoded.len() as u64, block.serialized_size());
        let _ = block.hash();
    }
});
