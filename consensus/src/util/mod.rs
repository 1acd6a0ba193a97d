use std::time::{SystemTime, UNIX_EPOCH};

/// Gets the time in seconds since UNIX_EPOCH, as an u32.
///
/// A clock set before the epoch reads as zero.
pub fn epoch_secs_u32() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as u32)
        .unwrap_or(0)
}
