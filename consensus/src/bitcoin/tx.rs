use crate::bitcoin::hash::Hash;
use crate::bitcoin::{varint_decode, varint_encode, varint_size};
use crate::bitcoin::{AsAny, Encodable, Script, Serializable};
use crate::Error;
use bytes::{Buf, BufMut, Bytes};
use hex::{FromHex, ToHex};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// The TxHash is used to identify transactions.
pub type TxHash = Hash;

/// Upper bound on the number of inputs or outputs accepted when decoding, checked before allocation.
const MAX_TX_ITEMS: u64 = 1_000_000;

/// Any transaction variant.
///
/// Networks disagree on transaction layout (e.g. [TimestampedTx](crate::bitcoin::TimestampedTx)) but
/// agree on inputs, outputs, version and lock time, which is what builders and the rest of the
/// library work with.
pub trait Transaction: Serializable + AsAny + Debug {
    fn version(&self) -> u32;

    fn set_version(&mut self, version: u32);

    fn lock_time(&self) -> u32;

    fn set_lock_time(&mut self, lock_time: u32);

    fn inputs(&self) -> &[TxInput];

    fn inputs_mut(&mut self) -> &mut Vec<TxInput>;

    fn outputs(&self) -> &[TxOutput];

    fn outputs_mut(&mut self) -> &mut Vec<TxOutput>;

    fn clone_box(&self) -> Box<dyn Transaction>;

    /// The transaction id, the double SHA256 of the encoded transaction.
    ///
    /// A variant that cannot encode itself has no id; [Hash::ZERO] is returned and a warning
    /// logged. Implementations should only fail to encode when their fields are inconsistent.
    fn hash(&self) -> TxHash {
        let mut v = Vec::with_capacity(self.serialized_size() as usize);
        match self.write(&mut v) {
            Ok(()) => Hash::sha256d(&v),
            Err(e) => {
                warn!("transaction {:?} cannot be encoded, no id: {}", self, e);
                Hash::ZERO
            }
        }
    }
}

impl Clone for Box<dyn Transaction> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// The baseline transaction.
#[derive(PartialEq, Eq, Hash, Clone, Debug, Serialize, Deserialize)]
pub struct Tx {
    /// transaction version number
    pub version: u32,
    /// Vector of inputs.
    pub inputs: Vec<TxInput>,
    /// Vector of outputs.
    pub outputs: Vec<TxOutput>,
    /// lock time
    pub lock_time: u32,
}

impl Default for Tx {
    fn default() -> Self {
        Tx {
            version: 1,
            inputs: vec![],
            outputs: vec![],
            lock_time: 0,
        }
    }
}

impl Transaction for Tx {
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

/// Read a count prefixed list of items.
pub(crate) fn read_items<T: Encodable>(buffer: &mut dyn Buf) -> crate::Result<Vec<T>> {
    let n = varint_decode(buffer)?;
    if n > MAX_TX_ITEMS {
        return Err(Error::DataTooLarge);
    }
    let mut items = Vec::with_capacity(n.min(buffer.remaining() as u64) as usize);
    for _ in 0..n {
        items.push(T::from_binary(buffer)?);
    }
    Ok(items)
}

/// Write a count prefixed list of items.
pub(crate) fn write_items<T: Encodable>(buffer: &mut dyn BufMut, items: &[T]) -> crate::Result<()> {
    varint_encode(buffer, items.len() as u64)?;
    for item in items {
        item.to_binary(buffer)?;
    }
    Ok(())
}

pub(crate) fn items_size<T: Encodable>(items: &[T]) -> u64 {
    varint_size(items.len() as u64) + items.iter().map(|i| i.encoded_size()).sum::<u64>()
}

impl Encodable for Tx {
    fn from_binary(buffer: &mut dyn Buf) -> crate::Result<Self>
    where
        Self: Sized,
    {
        let version = buffer.try_get_u32_le()?;
        let inputs = read_items(buffer)?;
        let outputs = read_items(buffer)?;
        let lock_time = buffer.try_get_u32_le()?;
        Ok(Tx {
            version,
            inputs,
            outputs,
            lock_time,
        })
    }

    fn to_binary(&self, buffer: &mut dyn BufMut) -> crate::Result<()> {
        buffer.put_u32_le(self.version);
        write_items(buffer, &self.inputs)?;
        write_items(buffer, &self.outputs)?;
        buffer.put_u32_le(self.lock_time);
        Ok(())
    }

    fn encoded_size(&self) -> u64 {
        items_size(&self.inputs) + items_size(&self.outputs) + 8
    }
}

impl FromHex for Tx {
    type Error = Error;

    fn from_hex<T: AsRef<[u8]>>(hex: T) -> Result<Self, Self::Error> {
        let mut bytes = Bytes::from(hex::decode(hex)?);
        Tx::from_binary(&mut bytes)
    }
}

impl ToHex for Tx {
    fn encode_hex<T: FromIterator<char>>(&self) -> T {
        self.to_binary_buf().unwrap_or_default().encode_hex()
    }

    fn encode_hex_upper<T: FromIterator<char>>(&self) -> T {
        self.to_binary_buf().unwrap_or_default().encode_hex_upper()
    }
}

/// An Outpoint is a reference to a specific output of a specific transaction.
#[derive(PartialEq, Eq, Hash, Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outpoint {
    pub tx_hash: TxHash,
    pub index: u32,
}

impl Outpoint {
    pub const SIZE: u64 = 36;
}

impl Encodable for Outpoint {
    fn from_binary(buffer: &mut dyn Buf) -> crate::Result<Self>
    where
        Self: Sized,
    {
        if buffer.remaining() < Self::SIZE as usize {
            return Err(Error::DataTooSmall);
        }
        Ok(Outpoint {
            tx_hash: Hash::from_binary(buffer)?,
            index: buffer.get_u32_le(),
        })
    }

    fn to_binary(&self, buffer: &mut dyn BufMut) -> crate::Result<()> {
        self.tx_hash.to_binary(buffer)?;
        buffer.put_u32_le(self.index);
        Ok(())
    }

    fn encoded_size(&self) -> u64 {
        Self::SIZE
    }
}

/// A TxInput is an input to a transaction.
#[derive(PartialEq, Eq, Hash, Clone, Debug, Serialize, Deserialize)]
pub struct TxInput {
    pub outpoint: Outpoint,
    pub script: Script,
    pub sequence: u32,
}

impl TxInput {
    /// An input with the final sequence number.
    pub fn new(outpoint: Outpoint, script: Script) -> TxInput {
        TxInput {
            outpoint,
            script,
            sequence: 0xffffffff,
        }
    }
}

impl Encodable for TxInput {
    fn from_binary(buffer: &mut dyn Buf) -> crate::Result<Self> {
        let outpoint = Outpoint::from_binary(buffer)?;
        let script = Script::from_binary(buffer)?;
        let sequence = buffer.try_get_u32_le()?;
        Ok(TxInput {
            outpoint,
            script,
            sequence,
        })
    }

    fn to_binary(&self, buffer: &mut dyn BufMut) -> crate::Result<()> {
        self.outpoint.to_binary(buffer)?;
        self.script.to_binary(buffer)?;
        buffer.put_u32_le(self.sequence);
        Ok(())
    }

    fn encoded_size(&self) -> u64 {
        self.outpoint.encoded_size() + self.script.encoded_size() + 4
    }
}

/// A TxOutput is an output from a transaction.
#[derive(PartialEq, Eq, Hash, Clone, Debug, Serialize, Deserialize)]
pub struct TxOutput {
    pub value: u64,
    pub script: Script,
}

impl TxOutput {
    /// Simple new function.
    pub fn new(value: u64, script: Script) -> TxOutput {
        TxOutput { value, script }
    }
}

impl Encodable for TxOutput {
    fn from_binary(buffer: &mut dyn Buf) -> crate::Result<Self>
    where
        Self: Sized,
    {
        let value = buffer.try_get_u64_le()?;
        let script = Script::from_binary(buffer)?;
        Ok(TxOutput { value, script })
    }

    fn to_binary(&self, buffer: &mut dyn BufMut) -> crate::Result<()> {
        buffer.put_u64_le(self.value);
        self.script.to_binary(buffer)
    }

    fn encoded_size(&self) -> u64 {
        self.script.encoded_size() + 8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) const TX1_HEX: &str = "01000000018a052edc7ae2136bfc0a860cdc91185ab0d7329107802f0a9c1cd0026c815f75010000006b483045022100e587ef1b4497a6694cad646cab468b6ece2fa98c7f49f9488611ca34eecebd1002205c4ea9066484bd1bffb7fdd7d84b5ae0ee6b7cdc20a8a513e41e420e0633b98841210262142850483b6728b8ecd299e4d0c8cf30ea0636f66205166814e52d73b64b4bffffffff0200000000000000000a006a075354554b2e434fb8ce3f01000000001976a91454cba8da8701174e34aac2bb31d42a88e2c302d088ac00000000";
    const TX1_HASH: &str = "3abc31f8ff40ffb66d9037e156842fe782e6fa1ae728759263471c68660095f1";

    /// Read a transaction from hex and check it
    #[test]
    fn tx_read() {
        let tx = Tx::from_hex(TX1_HEX).unwrap();
        assert_eq!(tx.version, 1);
        assert_eq!(Transaction::hash(&tx), Hash::from_hex(TX1_HASH).unwrap());
        assert_eq!(tx.encoded_size() as usize, TX1_HEX.len() / 2);
        assert_eq!(tx.inputs.len(), 1);
        assert_eq!(
            tx.inputs[0].outpoint.tx_hash,
            Hash::from_hex("755f816c02d01c9c0a2f80079132d7b05a1891dc0c860afc6b13e27adc2e058a")
                .unwrap()
        );
        assert_eq!(tx.inputs[0].outpoint.index, 1);
        assert_eq!(tx.outputs.len(), 2);
        assert_eq!(tx.encode_hex::<String>(), TX1_HEX);
    }

    /// If the binary is incomplete, we should get an error
    #[test]
    fn read_short() {
        let mut bytes = Bytes::from(hex::decode(TX1_HEX).unwrap());
        let mut b2 = bytes.split_to(200);
        assert!(Tx::from_binary(&mut b2).is_err());
    }

    /// A huge item count is refused before anything is allocated.
    #[test]
    fn huge_input_count() {
        let bytes = hex_literal::hex!("01000000ffffffffffffffffff");
        assert!(matches!(
            Tx::from_binary(&mut &bytes[..]),
            Err(Error::DataTooLarge)
        ));
    }

    /// A transaction variant whose fields can disagree.
    #[derive(Debug, Clone, Default)]
    struct Inconsistent {
        tx: Tx,
    }

    impl Encodable for Inconsistent {
        fn from_binary(buffer: &mut dyn Buf) -> crate::Result<Self>
        where
            Self: Sized,
        {
            Ok(Inconsistent {
                tx: Tx::from_binary(buffer)?,
            })
        }

        fn to_binary(&self, _buffer: &mut dyn BufMut) -> crate::Result<()> {
            Err(Error::BadData("inconsistent".to_string()))
        }

        fn encoded_size(&self) -> u64 {
            0
        }
    }

    impl Transaction for Inconsistent {
        fn version(&self) -> u32 {
            self.tx.version
        }

        fn set_version(&mut self, version: u32) {
            self.tx.version = version;
        }

        fn lock_time(&self) -> u32 {
            self.tx.lock_time
        }

        fn set_lock_time(&mut self, lock_time: u32) {
            self.tx.lock_time = lock_time;
        }

        fn inputs(&self) -> &[TxInput] {
            &self.tx.inputs
        }

        fn inputs_mut(&mut self) -> &mut Vec<TxInput> {
            &mut self.tx.inputs
        }

        fn outputs(&self) -> &[TxOutput] {
            &self.tx.outputs
        }

        fn outputs_mut(&mut self) -> &mut Vec<TxOutput> {
            &mut self.tx.outputs
        }

        fn clone_box(&self) -> Box<dyn Transaction> {
            Box::new(self.clone())
        }
    }

    #[test]
    fn unencodable_variant_has_zero_id() {
        let tx: Box<dyn Transaction> = Box::new(Inconsistent::default());
        assert_eq!(tx.hash(), Hash::ZERO);
        assert_ne!(Transaction::hash(&Tx::default()), Hash::ZERO);
    }

    #[test]
    fn trait_object_access() {
        let mut tx: Box<dyn Transaction> = Box::new(Tx::default());
        tx.set_lock_time(800_000);
        tx.outputs_mut().push(TxOutput::new(10, Script::default()));
        assert_eq!(tx.lock_time(), 800_000);
        assert_eq!(tx.outputs().len(), 1);
        let copy = tx.clone();
        assert_eq!(copy.hash(), tx.hash());
    }
}
