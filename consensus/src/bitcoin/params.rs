use crate::Error;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The blockchains a consensus configuration can be set up for.
///
/// The blockchain defines the parameters used by the P2P network, not the other way around, so
/// this is what a [ConsensusConfig](crate::ConsensusConfig) is keyed on.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockchainId {
    #[serde(alias = "mainnet")]
    Main = 0,
    #[serde(alias = "testnet")]
    Test = 1,
    Stn = 2,
    Regtest = 3,
}

impl FromStr for BlockchainId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "main" | "mainnet" => Ok(BlockchainId::Main),
            "test" | "testnet" => Ok(BlockchainId::Test),
            "stn" => Ok(BlockchainId::Stn),
            "regtest" => Ok(BlockchainId::Regtest),
            _ => Err(Error::InvalidBlockchainSpecifier),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_serialize_blockchain() {
        assert_eq!(serde_json::to_string(&BlockchainId::Main).unwrap(), "\"main\"");
        assert_eq!(serde_json::to_string(&BlockchainId::Stn).unwrap(), "\"stn\"");
    }

    #[test]
    fn json_deserialize_old_names() {
        let chain: BlockchainId = serde_json::from_str("\"mainnet\"").unwrap();
        assert_eq!(chain, BlockchainId::Main);
        let chain: BlockchainId = serde_json::from_str("\"testnet\"").unwrap();
        assert_eq!(chain, BlockchainId::Test);
    }

    #[test]
    fn parse_from_str() {
        assert_eq!("regtest".parse::<BlockchainId>().unwrap(), BlockchainId::Regtest);
        assert!(matches!(
            "dogecoin".parse::<BlockchainId>(),
            Err(Error::InvalidBlockchainSpecifier)
        ));
    }
}
