//! Network-specific object construction.
//!
//! A [ConsensusFactory] decides which concrete block header and transaction variants a network
//! uses. The rest of the library asks the factory for objects instead of naming concrete types,
//! and asks it for the [ProtocolCapabilities] of a peer instead of comparing version numbers.
//!
//! Networks override the creation methods of [ConsensusFactory]. Routing a request to a creation
//! method is done by [ConsensusFactoryExt], which is implemented for every factory and is not
//! meant to be implemented by hand.

mod config;
mod kind;

pub use self::config::{ConfiguredFactory, ConsensusConfig, HeaderFormat, TxFormat};
pub use self::kind::{ConsensusObject, ObjectKind, Requested};

use crate::bitcoin::{Block, BlockHeader, Header, Transaction, Tx, TxBuilder};
use crate::p2p::ProtocolCapabilities;
use log::{debug, trace, warn};
use std::any::type_name;

/// Creates the consensus objects of one network.
///
/// Every method has a default that produces the baseline objects. A network overrides only what
/// differs; overriding [create_block_header](ConsensusFactory::create_block_header) alone is enough
/// to change the header inside blocks from [create_block](ConsensusFactory::create_block).
///
/// Factories hold no mutable state and are shared freely between threads.
pub trait ConsensusFactory: Send + Sync {
    fn create_block_header(&self) -> Box<dyn Header> {
        Box::new(BlockHeader::default())
    }

    /// A new empty block, its header comes from [create_block_header](ConsensusFactory::create_block_header).
    fn create_block(&self) -> Block {
        Block::new(self.create_block_header())
    }

    fn create_transaction(&self) -> Box<dyn Transaction> {
        Box::new(Tx::default())
    }

    /// The features a peer speaking `protocol_version` supports.
    ///
    /// Override for a network whose protocol history differs.
    fn protocol_capabilities(&self, protocol_version: u32) -> ProtocolCapabilities {
        ProtocolCapabilities::for_version(protocol_version)
    }

    /// The unconfigured builder used by
    /// [create_transaction_builder](ConsensusFactoryExt::create_transaction_builder).
    fn create_transaction_builder_core(&self) -> TxBuilder<'_> {
        TxBuilder::new()
    }
}

/// The baseline network, every creation method uses its default.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardFactory;

impl ConsensusFactory for StandardFactory {}

/// Request routing and builder configuration on top of a [ConsensusFactory].
pub trait ConsensusFactoryExt {
    /// Create an object of the given kind.
    fn create(&self, kind: ObjectKind) -> ConsensusObject;

    /// Create the object that satisfies a request for `T`.
    ///
    /// Returns `None` when `T` is not one of the kinds this factory creates. That is not an
    /// error, the caller is expected to fall back to constructing `T` itself.
    fn try_create<T: Requested>(&self) -> Option<ConsensusObject>;

    /// Like [try_create](ConsensusFactoryExt::try_create), converted to `T`.
    ///
    /// Also `None` when the kind matched but this network creates a different variant than `T`.
    fn try_create_as<T: Requested>(&self) -> Option<T>;

    /// A transaction builder that creates its transactions with this factory.
    fn create_transaction_builder(&self) -> TxBuilder<'_>;

    /// A transaction builder whose shuffling is reproducible from `seed`.
    fn create_transaction_builder_with_seed(&self, seed: u64) -> TxBuilder<'_>;

    /// The capabilities both sides share: those of the lower of the two versions.
    fn negotiated_capabilities(&self, local_version: u32, remote_version: u32) -> ProtocolCapabilities;
}

// The same routing for concrete factories and for factory trait objects.
macro_rules! impl_factory_ext {
    ([$($gen:tt)*] $t:ty) => {
        impl<$($gen)*> ConsensusFactoryExt for $t {
            fn create(&self, kind: ObjectKind) -> ConsensusObject {
                create_object(self, kind)
            }

            fn try_create<T: Requested>(&self) -> Option<ConsensusObject> {
                try_create_object::<T>(self)
            }

            fn try_create_as<T: Requested>(&self) -> Option<T> {
                try_create_typed::<T>(self)
            }

            fn create_transaction_builder(&self) -> TxBuilder<'_> {
                configure_builder(self, None)
            }

            fn create_transaction_builder_with_seed(&self, seed: u64) -> TxBuilder<'_> {
                configure_builder(self, Some(seed))
            }

            fn negotiated_capabilities(
                &self,
                local_version: u32,
                remote_version: u32,
            ) -> ProtocolCapabilities {
                self.protocol_capabilities(local_version.min(remote_version))
            }
        }
    };
}

impl_factory_ext!([F: ConsensusFactory] F);
impl_factory_ext!(['f] dyn ConsensusFactory + 'f);

fn create_object(factory: &dyn ConsensusFactory, kind: ObjectKind) -> ConsensusObject {
    match kind {
        ObjectKind::Block => ConsensusObject::Block(factory.create_block()),
        ObjectKind::BlockHeader => ConsensusObject::BlockHeader(factory.create_block_header()),
        ObjectKind::Transaction => ConsensusObject::Transaction(factory.create_transaction()),
    }
}

fn try_create_object<T: Requested>(factory: &dyn ConsensusFactory) -> Option<ConsensusObject> {
    match ObjectKind::classify::<T>() {
        Some(kind) => {
            trace!("request for {} routed to {:?}", type_name::<T>(), kind);
            Some(create_object(factory, kind))
        }
        None => {
            trace!("no consensus object kind for {}", type_name::<T>());
            None
        }
    }
}

fn try_create_typed<T: Requested>(factory: &dyn ConsensusFactory) -> Option<T> {
    let object = try_create_object::<T>(factory)?;
    let kind = object.kind();
    let typed = T::from_object(object);
    if typed.is_none() {
        warn!(
            "factory created a {:?} that is not a {}, check the network's factory",
            kind,
            type_name::<T>()
        );
    }
    typed
}

fn configure_builder(factory: &dyn ConsensusFactory, seed: Option<u64>) -> TxBuilder<'_> {
    let mut builder = factory.create_transaction_builder_core();
    builder.set_consensus_factory(factory);
    if let Some(seed) = seed {
        builder.set_shuffle_seed(seed);
    }
    debug!("configured transaction builder, seeded: {}", seed.is_some());
    builder
}
