use crate::bitcoin::{varint_decode, varint_encode, varint_size, Encodable};
use crate::Error;
use bytes::{Buf, BufMut, Bytes};
use hex::FromHex;
use serde::{Deserialize, Serialize};

/// A Script in its encoded form.
///
/// Scripts lock outputs and unlock them in inputs. This crate does not interpret them, it only
/// carries them between the factory's objects and the wire.
#[derive(PartialEq, Eq, Hash, Clone, Debug, Default, Serialize, Deserialize)]
pub struct Script {
    pub raw: Bytes,
}

impl From<Vec<u8>> for Script {
    fn from(value: Vec<u8>) -> Self {
        Script {
            raw: Bytes::from(value),
        }
    }
}

impl FromHex for Script {
    type Error = Error;

    /// Hex encoding is not prefixed by the length.
    fn from_hex<T: AsRef<[u8]>>(hex: T) -> Result<Self, Self::Error> {
        Ok(Script::from(hex::decode(hex)?))
    }
}

impl Encodable for Script {
    /// A script is always encoded with its length.
    fn from_binary(buffer: &mut dyn Buf) -> crate::Result<Self>
    where
        Self: Sized,
    {
        let size = varint_decode(buffer)?;
        if buffer.remaining() < size as usize {
            return Err(Error::DataTooSmall);
        }
        Ok(Script {
            raw: buffer.copy_to_bytes(size as usize),
        })
    }

    fn to_binary(&self, buffer: &mut dyn BufMut) -> crate::Result<()> {
        varint_encode(buffer, self.raw.len() as u64)?;
        buffer.put_slice(&self.raw);
        Ok(())
    }

    fn encoded_size(&self) -> u64 {
        let len = self.raw.len() as u64;
        varint_size(len) + len
    }
}
