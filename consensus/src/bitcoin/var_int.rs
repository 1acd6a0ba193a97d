use bytes::{Buf, BufMut};

/// The size of the value encoded as a varint.
pub fn varint_size(value: u64) -> u64 {
    match value {
        0..=252 => 1,
        253..=0xffff => 3,
        0x10000..=0xffffffff => 5,
        _ => 9,
    }
}

/// Read a varint from the buffer.
///
/// Truncated input is reported as an error rather than a panic, the buffer usually comes from a peer.
pub fn varint_decode(buffer: &mut dyn Buf) -> crate::Result<u64> {
    let v = match buffer.try_get_u8()? {
        0xff => buffer.try_get_u64_le()?,
        0xfe => buffer.try_get_u32_le()? as u64,
        0xfd => buffer.try_get_u16_le()? as u64,
        n => n as u64,
    };
    Ok(v)
}

/// Write a varint to the buffer.
pub fn varint_encode(buffer: &mut dyn BufMut, value: u64) -> crate::Result<()> {
    match varint_size(value) {
        1 => buffer.put_u8(value as u8),
        3 => {
            buffer.put_u8(0xfd);
            buffer.put_u16_le(value as u16);
        }
        5 => {
            buffer.put_u8(0xfe);
            buffer.put_u32_le(value as u32);
        }
        _ => {
            buffer.put_u8(0xff);
            buffer.put_u64_le(value);
        }
    };
    Ok(())
}
