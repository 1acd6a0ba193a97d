//! The consensus objects: block headers, transactions and blocks, with their binary encoding.
//!
//! The baseline variants are [BlockHeader] and [Tx]. [AuxPowHeader] and [TimestampedTx] are the
//! variants used by merge-mined and timestamped-transaction networks. Code that should work on any
//! network uses the [Header] and [Transaction] traits and gets objects from a
//! [ConsensusFactory](crate::ConsensusFactory).

mod auxpow;
mod block;
mod encoding;
mod hash;
mod header;
mod object;
mod params;
mod script;
mod timestamped_tx;
mod tx;
mod tx_build;
mod var_int;

pub use self::auxpow::{AuxPow, AuxPowHeader, MerkleBranch, VERSION_AUXPOW};
pub use self::block::Block;
pub use self::encoding::{Encodable, Serializable};
pub use self::hash::Hash;
pub use self::header::{BlockHash, BlockHeader, Header, MerkleRoot};
pub use self::object::AsAny;
pub use self::params::BlockchainId;
pub use self::script::Script;
pub use self::timestamped_tx::TimestampedTx;
pub use self::tx::{Outpoint, Transaction, Tx, TxHash, TxInput, TxOutput};
pub use self::tx_build::TxBuilder;
pub use self::var_int::{varint_decode, varint_encode, varint_size};
pub use hex::{FromHex, ToHex};
