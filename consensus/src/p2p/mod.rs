//! Peer-to-peer protocol support.
//!
//! Only capability negotiation lives here. Message framing and the handshake itself belong to
//! the networking layer, which asks a [ConsensusFactory](crate::ConsensusFactory) for the
//! capabilities of the version it negotiated.

mod capabilities;

pub use self::capabilities::{ProtocolCapabilities, PROTOCOL_VERSION};
