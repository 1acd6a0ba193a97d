use crate::bitcoin::{
    AsAny, AuxPow, AuxPowHeader, Block, BlockHeader, Header, Outpoint, Serializable, TimestampedTx,
    Transaction, Tx, TxInput, TxOutput,
};
use crate::{ConsensusFactory, Result};
use bytes::{Buf, BufMut};

/// The kinds of object a [ConsensusFactory] creates.
///
/// The set of kinds is closed. What varies between networks is the concrete variant created for
/// each kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Block,
    BlockHeader,
    Transaction,
}

impl ObjectKind {
    /// The order requests are matched in. A block contains a header so it is matched first.
    pub const PRIORITY: [ObjectKind; 3] = [
        ObjectKind::Block,
        ObjectKind::BlockHeader,
        ObjectKind::Transaction,
    ];

    /// The first kind, in priority order, that can satisfy a request for `T`.
    pub fn classify<T: Requested>() -> Option<ObjectKind> {
        Self::PRIORITY.into_iter().find(|kind| T::accepts(*kind))
    }
}

/// An object created by a factory, tagged with its kind.
#[derive(Debug, Clone)]
pub enum ConsensusObject {
    Block(Block),
    BlockHeader(Box<dyn Header>),
    Transaction(Box<dyn Transaction>),
}

impl ConsensusObject {
    pub fn kind(&self) -> ObjectKind {
        match self {
            ConsensusObject::Block(_) => ObjectKind::Block,
            ConsensusObject::BlockHeader(_) => ObjectKind::BlockHeader,
            ConsensusObject::Transaction(_) => ObjectKind::Transaction,
        }
    }

    /// Decode into this object. Transactions inside a block are created by `factory`.
    pub fn read_with(&mut self, factory: &dyn ConsensusFactory, buffer: &mut dyn Buf) -> Result<()> {
        match self {
            ConsensusObject::Block(block) => block.read_with(factory, buffer),
            ConsensusObject::BlockHeader(header) => header.read(buffer),
            ConsensusObject::Transaction(tx) => tx.read(buffer),
        }
    }

    pub fn write(&self, buffer: &mut dyn BufMut) -> Result<()> {
        match self {
            ConsensusObject::Block(block) => block.write(buffer),
            ConsensusObject::BlockHeader(header) => header.write(buffer),
            ConsensusObject::Transaction(tx) => tx.write(buffer),
        }
    }

    pub fn serialized_size(&self) -> u64 {
        match self {
            ConsensusObject::Block(block) => block.serialized_size(),
            ConsensusObject::BlockHeader(header) => header.serialized_size(),
            ConsensusObject::Transaction(tx) => tx.serialized_size(),
        }
    }
}

/// A type that can be requested from a factory.
///
/// `accepts` is the capability check: can an object of `kind` be handed out as `Self`? A type
/// may accept several kinds, [ObjectKind::classify] then picks by priority. Types that accept no
/// kind are ones the factory has no opinion about, the caller constructs those itself.
pub trait Requested: Sized {
    fn accepts(kind: ObjectKind) -> bool;

    /// Convert a created object into `Self`. `None` if the factory created a different variant.
    fn from_object(object: ConsensusObject) -> Option<Self>;
}

/// Any object the factory can create. Accepts every kind, so a request for it yields a block.
impl Requested for ConsensusObject {
    fn accepts(_kind: ObjectKind) -> bool {
        true
    }

    fn from_object(object: ConsensusObject) -> Option<Self> {
        Some(object)
    }
}

impl Requested for Block {
    fn accepts(kind: ObjectKind) -> bool {
        kind == ObjectKind::Block
    }

    fn from_object(object: ConsensusObject) -> Option<Self> {
        match object {
            ConsensusObject::Block(block) => Some(block),
            _ => None,
        }
    }
}

impl Requested for Box<dyn Header> {
    fn accepts(kind: ObjectKind) -> bool {
        kind == ObjectKind::BlockHeader
    }

    fn from_object(object: ConsensusObject) -> Option<Self> {
        match object {
            ConsensusObject::BlockHeader(header) => Some(header),
            _ => None,
        }
    }
}

impl Requested for Box<dyn Transaction> {
    fn accepts(kind: ObjectKind) -> bool {
        kind == ObjectKind::Transaction
    }

    fn from_object(object: ConsensusObject) -> Option<Self> {
        match object {
            ConsensusObject::Transaction(tx) => Some(tx),
            _ => None,
        }
    }
}

fn downcast_header<T: Header>(object: ConsensusObject) -> Option<T> {
    match object {
        ConsensusObject::BlockHeader(header) => AsAny::into_any(header).downcast::<T>().ok().map(|h| *h),
        _ => None,
    }
}

fn downcast_transaction<T: Transaction>(object: ConsensusObject) -> Option<T> {
    match object {
        ConsensusObject::Transaction(tx) => AsAny::into_any(tx).downcast::<T>().ok().map(|t| *t),
        _ => None,
    }
}

impl Requested for BlockHeader {
    fn accepts(kind: ObjectKind) -> bool {
        kind == ObjectKind::BlockHeader
    }

    fn from_object(object: ConsensusObject) -> Option<Self> {
        downcast_header(object)
    }
}

impl Requested for AuxPowHeader {
    fn accepts(kind: ObjectKind) -> bool {
        kind == ObjectKind::BlockHeader
    }

    fn from_object(object: ConsensusObject) -> Option<Self> {
        downcast_header(object)
    }
}

impl Requested for Tx {
    fn accepts(kind: ObjectKind) -> bool {
        kind == ObjectKind::Transaction
    }

    fn from_object(object: ConsensusObject) -> Option<Self> {
        downcast_transaction(object)
    }
}

impl Requested for TimestampedTx {
    fn accepts(kind: ObjectKind) -> bool {
        kind == ObjectKind::Transaction
    }

    fn from_object(object: ConsensusObject) -> Option<Self> {
        downcast_transaction(object)
    }
}

// Serializable parts of the consensus objects that a factory never creates on its own.
macro_rules! not_created_by_factory {
    ($($t:ty),*) => {
        $(
            impl Requested for $t {
                fn accepts(_kind: ObjectKind) -> bool {
                    false
                }

                fn from_object(_object: ConsensusObject) -> Option<Self> {
                    None
                }
            }
        )*
    };
}

not_created_by_factory!(TxInput, TxOutput, Outpoint, AuxPow);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert_eq!(ObjectKind::classify::<Block>(), Some(ObjectKind::Block));
        assert_eq!(ObjectKind::classify::<BlockHeader>(), Some(ObjectKind::BlockHeader));
        assert_eq!(ObjectKind::classify::<AuxPowHeader>(), Some(ObjectKind::BlockHeader));
        assert_eq!(ObjectKind::classify::<Box<dyn Header>>(), Some(ObjectKind::BlockHeader));
        assert_eq!(ObjectKind::classify::<Tx>(), Some(ObjectKind::Transaction));
        assert_eq!(ObjectKind::classify::<Box<dyn Transaction>>(), Some(ObjectKind::Transaction));
        assert_eq!(ObjectKind::classify::<TxOutput>(), None);
        assert_eq!(ObjectKind::classify::<AuxPow>(), None);
    }

    /// A request that any kind satisfies resolves to a block, not a header.
    #[test]
    fn block_before_header() {
        assert_eq!(ObjectKind::classify::<ConsensusObject>(), Some(ObjectKind::Block));
    }

    struct HeaderOrTx;

    impl Requested for HeaderOrTx {
        fn accepts(kind: ObjectKind) -> bool {
            kind != ObjectKind::Block
        }

        fn from_object(_object: ConsensusObject) -> Option<Self> {
            Some(HeaderOrTx)
        }
    }

    #[test]
    fn header_before_transaction() {
        assert_eq!(ObjectKind::classify::<HeaderOrTx>(), Some(ObjectKind::BlockHeader));
    }

    #[test]
    fn downcast_to_wrong_variant() {
        let object = ConsensusObject::BlockHeader(Box::new(BlockHeader::default()));
        assert!(AuxPowHeader::from_object(object.clone()).is_none());
        assert!(BlockHeader::from_object(object.clone()).is_some());
        assert!(Tx::from_object(object).is_none());
    }
}
