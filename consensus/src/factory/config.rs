use crate::bitcoin::{AuxPowHeader, BlockHeader, BlockchainId, Header, TimestampedTx, Transaction, Tx};
use crate::util::epoch_secs_u32;
use crate::ConsensusFactory;
use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Layout of the block headers of a network.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "format")]
pub enum HeaderFormat {
    /// The 80-byte baseline header.
    #[default]
    Standard,
    /// Merge-mined headers of the chain with the given id.
    AuxPow { chain_id: u16 },
}

/// Layout of the transactions of a network.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxFormat {
    #[default]
    Standard,
    /// Transactions carry a timestamp after the version.
    Timestamped,
}

/// The object formats of one network.
///
/// Usually deserialized from the application's configuration, missing formats default to standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusConfig {
    pub blockchain: BlockchainId,
    #[serde(default)]
    pub header: HeaderFormat,
    #[serde(default)]
    pub transaction: TxFormat,
}

impl ConsensusConfig {
    /// A configuration using the standard formats.
    pub fn new(blockchain: BlockchainId) -> ConsensusConfig {
        ConsensusConfig {
            blockchain,
            header: HeaderFormat::Standard,
            transaction: TxFormat::Standard,
        }
    }

    /// The factory for this configuration, ready to be shared with the rest of the application.
    pub fn factory(&self) -> Arc<dyn ConsensusFactory> {
        Arc::new(ConfiguredFactory::new(*self))
    }
}

/// A [ConsensusFactory] whose variants are chosen by a [ConsensusConfig].
#[derive(Debug, Clone)]
pub struct ConfiguredFactory {
    config: ConsensusConfig,
}

impl ConfiguredFactory {
    pub fn new(config: ConsensusConfig) -> ConfiguredFactory {
        debug!(
            "consensus factory for {:?}: headers {:?}, transactions {:?}",
            config.blockchain, config.header, config.transaction
        );
        ConfiguredFactory { config }
    }

    pub fn config(&self) -> &ConsensusConfig {
        &self.config
    }
}

impl ConsensusFactory for ConfiguredFactory {
    fn create_block_header(&self) -> Box<dyn Header> {
        match self.config.header {
            HeaderFormat::Standard => Box::new(BlockHeader::default()),
            HeaderFormat::AuxPow { chain_id } => Box::new(AuxPowHeader::new(chain_id)),
        }
    }

    fn create_transaction(&self) -> Box<dyn Transaction> {
        match self.config.transaction {
            TxFormat::Standard => Box::new(Tx::default()),
            TxFormat::Timestamped => Box::new(TimestampedTx::new(epoch_secs_u32())),
        }
    }
}
