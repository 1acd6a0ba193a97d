use bytes::TryGetError;
use hex::FromHexError;

/// Standard Result used in the library
pub type Result<T> = std::result::Result<T, Error>;

/// Standard error type used in the library
#[derive(Debug)]
pub enum Error {
    /// An argument provided is invalid
    BadArgument(String),
    /// The data provided is invalid
    BadData(String),
    /// The data provided is too small to perform the operation.
    DataTooSmall,
    /// The data provided is too large to perform the operation.
    DataTooLarge,
    /// The blockchain specifier was not recognized.
    InvalidBlockchainSpecifier,
    /// Hex string could not be decoded
    FromHexError(FromHexError),
    /// Error from TryGet
    TryGet(TryGetError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::BadArgument(s) => f.write_str(&format!("Bad argument: {}", s)),
            Error::BadData(s) => f.write_str(&format!("Bad data: {}", s)),
            Error::DataTooSmall => f.write_str("data too small"),
            Error::DataTooLarge => f.write_str("data too large"),
            Error::InvalidBlockchainSpecifier => f.write_str("Unknown blockchain"),
            Error::FromHexError(e) => f.write_str(&format!("Hex decoding error: {}", e)),
            Error::TryGet(e) => f.write_str(&format!("Tryget error: {}", e)),
        }
    }
}

impl std::error::Error for Error {}

impl From<FromHexError> for Error {
    fn from(e: FromHexError) -> Self {
        Error::FromHexError(e)
    }
}

impl From<TryGetError> for Error {
    fn from(e: TryGetError) -> Self {
        Error::TryGet(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            Error::BadArgument("no outputs".to_string()).to_string(),
            "Bad argument: no outputs"
        );
        assert_eq!(Error::DataTooSmall.to_string(), "data too small");
    }

    #[test]
    fn hex_error_converts() {
        let e: Error = hex::decode("zz").unwrap_err().into();
        assert!(matches!(e, Error::FromHexError(_)));
    }

    #[test]
    fn short_read_converts() {
        use bytes::Buf;
        let mut empty: &[u8] = &[];
        let e: Error = empty.try_get_u32_le().unwrap_err().into();
        assert!(matches!(e, Error::TryGet(_)));
        assert_eq!(e.to_string().split(':').next(), Some("Tryget error"));
    }
}
