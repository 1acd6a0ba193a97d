use serde::{Deserialize, Serialize};

/// Protocol version spoken by this library.
pub const PROTOCOL_VERSION: u32 = 70015;

/// The protocol features a peer is expected to support, derived from its protocol version.
///
/// Each flag is an independent predicate over the version. `support_get_block` is off for a
/// window of versions and back on after it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProtocolCapabilities {
    /// The peer is too old to talk to at all.
    pub peer_too_old: bool,
    /// Address records carry a timestamp.
    pub support_time_address: bool,
    /// `getblocks` is supported.
    pub support_get_block: bool,
    /// `ping` carries a nonce and is answered with `pong`.
    pub support_ping_pong: bool,
    /// `mempool` queries are supported.
    pub support_mempool_query: bool,
    /// `reject` messages are sent.
    pub support_reject: bool,
    /// Bloom filtering must be signalled with the bloom service bit.
    pub support_node_bloom: bool,
    /// `sendheaders` is supported.
    pub support_send_headers: bool,
    /// Witness data can be requested.
    pub support_witness: bool,
    /// Compact blocks are supported.
    pub support_compact_blocks: bool,
    /// Message headers carry a checksum.
    pub support_check_sum: bool,
    /// The version message carries a user agent.
    pub support_user_agent: bool,
}

impl ProtocolCapabilities {
    /// The capabilities of a peer speaking `protocol_version`.
    pub fn for_version(protocol_version: u32) -> ProtocolCapabilities {
        let v = protocol_version;
        ProtocolCapabilities {
            peer_too_old: v < 209,
            support_time_address: v >= 31402,
            support_get_block: v < 32000 || v > 32400,
            support_ping_pong: v > 60000,
            support_mempool_query: v >= 60002,
            support_reject: v >= 70002,
            support_node_bloom: v >= 70011,
            support_send_headers: v >= 70012,
            support_witness: v >= 70012,
            support_compact_blocks: v >= 70014,
            support_check_sum: v >= 60002,
            support_user_agent: v >= 60002,
        }
    }

    /// Every feature supported.
    pub fn all() -> ProtocolCapabilities {
        ProtocolCapabilities {
            peer_too_old: false,
            support_time_address: true,
            support_get_block: true,
            support_ping_pong: true,
            support_mempool_query: true,
            support_reject: true,
            support_node_bloom: true,
            support_send_headers: true,
            support_witness: true,
            support_compact_blocks: true,
            support_check_sum: true,
            support_user_agent: true,
        }
    }

    /// Whether every feature supported by `other` is also supported by `self`.
    ///
    /// `peer_too_old` is not a feature and is not compared.
    pub fn is_superset_of(&self, other: &ProtocolCapabilities) -> bool {
        let covers = |mine: bool, theirs: bool| mine || !theirs;
        covers(self.support_time_address, other.support_time_address)
            && covers(self.support_get_block, other.support_get_block)
            && covers(self.support_ping_pong, other.support_ping_pong)
            && covers(self.support_mempool_query, other.support_mempool_query)
            && covers(self.support_reject, other.support_reject)
            && covers(self.support_node_bloom, other.support_node_bloom)
            && covers(self.support_send_headers, other.support_send_headers)
            && covers(self.support_witness, other.support_witness)
            && covers(self.support_compact_blocks, other.support_compact_blocks)
            && covers(self.support_check_sum, other.support_check_sum)
            && covers(self.support_user_agent, other.support_user_agent)
    }
}
