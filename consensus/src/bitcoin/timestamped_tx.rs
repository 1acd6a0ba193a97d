use crate::bitcoin::tx::{items_size, read_items, write_items};
use crate::bitcoin::{Encodable, Transaction, TxInput, TxOutput};
use bytes::{Buf, BufMut};
use serde::{Deserialize, Serialize};

/// A transaction carrying its own timestamp, as used by proof-of-stake chains.
///
/// The layout is the baseline layout with a 4 byte `time` inserted after the version.
#[derive(PartialEq, Eq, Hash, Clone, Debug, Serialize, Deserialize)]
pub struct TimestampedTx {
    pub version: u32,
    /// Seconds since the unix epoch.
    pub time: u32,
    pub inputs: Vec<TxInput>,
    pub outputs: Vec<TxOutput>,
    pub lock_time: u32,
}

impl TimestampedTx {
    pub fn new(time: u32) -> TimestampedTx {
        TimestampedTx {
            version: 1,
            time,
            inputs: vec![],
            outputs: vec![],
            lock_time: 0,
        }
    }
}

impl Default for TimestampedTx {
    fn default() -> Self {
        TimestampedTx::new(0)
    }
}

impl Transaction for TimestampedTx {
    fn version(&self) -> u32 {
        self.version
    }

    fn set_version(&mut self, version: u32) {
        self.version = version;
    }

    fn lock_time(&self) -> u32 {
        self.lock_time
    }

    fn set_lock_time(&mut self, lock_time: u32) {
        self.lock_time = lock_time;
    }

    fn inputs(&self) -> &[TxInput] {
        &self.inputs
    }

    fn inputs_mut(&mut self) -> &mut Vec<TxInput> {
        &mut self.inputs
    }

    fn outputs(&self) -> &[TxOutput] {
        &self.outputs
    }

    fn outputs_mut(&mut self) -> &mut Vec<TxOutput> {
        &mut self.outputs
    }

    fn clone_box(&self) -> Box<dyn Transaction> {
        Box::new(self.clone())
    }
}

impl Encodable for TimestampedTx {
    fn from_binary(buffer: &mut dyn Buf) -> crate::Result<Self>
    where
        Self: Sized,
    {
        let version = buffer.try_get_u32_le()?;
        let time = buffer.try_get_u32_le()?;
        let inputs = read_items(buffer)?;
        let outputs = read_items(buffer)?;
        let lock_time = buffer.try_get_u32_le()?;
        Ok(TimestampedTx {
            version,
            time,
            inputs,
            outputs,
            lock_time,
        })
    }

    fn to_binary(&self, buffer: &mut dyn BufMut) -> crate::Result<()> {
        buffer.put_u32_le(self.version);
        buffer.put_u32_le(self.time);
        write_items(buffer, &self.inputs)?;
        write_items(buffer, &self.outputs)?;
        buffer.put_u32_le(self.lock_time);
        Ok(())
    }

    fn encoded_size(&self) -> u64 {
        items_size(&self.inputs) + items_size(&self.outputs) + 12
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitcoin::{Outpoint, Script, Tx};

    fn sample() -> TimestampedTx {
        let mut tx = TimestampedTx::new(1_500_000_000);
        tx.inputs.push(TxInput::new(Outpoint::default(), Script::from(vec![0x51])));
        tx.outputs.push(TxOutput::new(5_000, Script::from(vec![0x6a])));
        tx
    }

    #[test]
    fn time_follows_version() {
        let tx = sample();
        let bin = tx.to_binary_buf().unwrap();
        assert_eq!(bin.len() as u64, tx.encoded_size());
        assert_eq!(&bin[0..4], &[1, 0, 0, 0]);
        assert_eq!(&bin[4..8], &1_500_000_000u32.to_le_bytes());
        let back = TimestampedTx::from_binary(&mut bin.as_slice()).unwrap();
        assert_eq!(back, tx);
    }

    /// The time field makes the layout incompatible with the baseline transaction.
    #[test]
    fn differs_from_baseline_layout() {
        let tx = sample();
        let baseline = Tx {
            version: tx.version,
            inputs: tx.inputs.clone(),
            outputs: tx.outputs.clone(),
            lock_time: tx.lock_time,
        };
        assert_eq!(tx.encoded_size(), baseline.encoded_size() + 4);
        assert_ne!(Transaction::hash(&tx), Transaction::hash(&baseline));
    }
}
