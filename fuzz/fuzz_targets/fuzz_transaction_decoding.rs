#![no_main]

use libfuzzer_sys::fuzz_target;
use bitcoinsv_consensus::bitcoin::{Serializable, TimestampedTx, Transaction, Tx};
use bitcoinsv_consensus::{ConsensusFactoryExt, StandardFactory};
use bytes::BytesMut;

fuzz_target!(|data: &[u8]| {
    let factory = StandardFactory;
    let mut tx: Tx = factory.try_create_as().unwrap();
    let mut buffer = data;
    if tx.read(&mut buffer).is_ok() {
        assert!(tx.inputs.len() <= 1_000_000);
        assert!(tx.outputs.len() <= 1_000_000);
        let mut encoded = BytesMut::new();
        tx.write(&mut encoded).unwrap();
        assert_eq!(encoded.len() as u64, tx.serialized_size());
    }

    let mut timestamped = TimestampedTx::default();
    let mut buffer = data;
    if timestamped.read(&mut buffer).is_ok() {
        let _ = timestamped.hash();
    }
});
