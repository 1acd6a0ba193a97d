//! Consensus object factory and protocol capabilities for Bitcoin-family networks.
//!
//! One code base can serve several networks whose blocks and transactions are not compatible with
//! each other. Instead of naming concrete types, code asks a [ConsensusFactory] for a block, a
//! header or a transaction and gets the variant of the network it was configured for. The same
//! factory turns a peer's protocol version into the [ProtocolCapabilities](p2p::ProtocolCapabilities)
//! the peer is expected to support.
//!
//! ```
//! use bitcoinsv_consensus::{ConsensusFactory, ConsensusFactoryExt, StandardFactory};
//! use bitcoinsv_consensus::bitcoin::Block;
//!
//! let factory = StandardFactory;
//! let block: Block = factory.try_create_as().unwrap();
//! assert!(block.transactions.is_empty());
//! assert!(factory.protocol_capabilities(70015).support_compact_blocks);
//! ```

/// Block headers, transactions and blocks, and their encoding.
pub mod bitcoin;

/// Construction of network-specific objects.
pub mod factory;

/// Peer protocol capabilities.
pub mod p2p;

/// Contains useful utility functions.
pub mod util;

mod result;

pub use factory::{
    ConfiguredFactory, ConsensusConfig, ConsensusFactory, ConsensusFactoryExt, ConsensusObject,
    HeaderFormat, ObjectKind, Requested, StandardFactory, TxFormat,
};
pub use result::{Error, Result};
