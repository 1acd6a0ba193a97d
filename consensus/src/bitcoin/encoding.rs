use crate::Result;
use bytes::{Buf, BufMut};

/// Read & write Bitcoin data structures to and from binary in Bitcoin encoding format.
///
/// This is the constructor-style trait for concrete types. See [Serializable] for the object-safe
/// form used when the concrete type is chosen by a [ConsensusFactory](crate::ConsensusFactory).
pub trait Encodable {
    /// Read the data structure from a buffer.
    fn from_binary(buffer: &mut dyn Buf) -> Result<Self>
    where
        Self: Sized;

    /// Write the data structure to a buffer.
    fn to_binary(&self, buffer: &mut dyn BufMut) -> Result<()>;

    /// Return the size of the encoded form.
    // Implementations must compute this without encoding the object, it is used to size buffers.
    fn encoded_size(&self) -> u64;

    /// Encode into a newly allocated vector.
    fn to_binary_buf(&self) -> Result<Vec<u8>> {
        let mut v = Vec::with_capacity(self.encoded_size() as usize);
        self.to_binary(&mut v)?;
        Ok(v)
    }
}

/// The serializable object capability.
///
/// Objects created by a factory are handed out as trait objects, so decoding happens in place:
/// a caller asks the factory for an empty object of the right network variant and then reads
/// into it.
pub trait Serializable: Send + Sync {
    /// Replace the contents of this object with the object decoded from the buffer.
    ///
    /// On error the object is unchanged.
    fn read(&mut self, buffer: &mut dyn Buf) -> Result<()>;

    /// Write the object to a buffer.
    fn write(&self, buffer: &mut dyn BufMut) -> Result<()>;

    /// Size of the encoded form.
    fn serialized_size(&self) -> u64;
}

impl<T: Encodable + Send + Sync> Serializable for T {
    fn read(&mut self, buffer: &mut dyn Buf) -> Result<()> {
        *self = T::from_binary(buffer)?;
        Ok(())
    }

    fn write(&self, buffer: &mut dyn BufMut) -> Result<()> {
        self.to_binary(buffer)
    }

    fn serialized_size(&self) -> u64 {
        self.encoded_size()
    }
}
