use crate::bitcoin::{Transaction, Tx, TxInput, TxOutput};
use crate::{ConsensusFactory, Error, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// The TxBuilder builds transactions.
///
/// A builder is normally obtained from
/// [ConsensusFactoryExt::create_transaction_builder](crate::ConsensusFactoryExt::create_transaction_builder),
/// which points it back at the factory so the transaction it builds is the network's variant.
/// The builder borrows the factory, it never owns it.
///
/// Inputs and outputs are shuffled when the transaction is built so that their order does not
/// leak which output is the change. Give the builder a seed to make the order reproducible.
pub struct TxBuilder<'a> {
    pub version: u32,
    pub inputs: Vec<TxInput>,
    pub outputs: Vec<TxOutput>,
    pub lock_time: u32,
    pub shuffle_inputs: bool,
    pub shuffle_outputs: bool,
    factory: Option<&'a dyn ConsensusFactory>,
    shuffle_rng: Option<StdRng>,
}

impl<'a> TxBuilder<'a> {
    /// Create a new TxBuilder that is not attached to a factory.
    pub fn new() -> Self {
        Self {
            version: 1,
            inputs: vec![],
            outputs: vec![],
            lock_time: 0,
            shuffle_inputs: true,
            shuffle_outputs: true,
            factory: None,
            shuffle_rng: None,
        }
    }

    /// Add an input.
    ///
    /// Can be used in a chain.
    pub fn add_input(&mut self, input: TxInput) -> &mut Self {
        self.inputs.push(input);
        self
    }

    /// Add an output.
    ///
    /// Can be used in a chain.
    pub fn add_output(&mut self, output: TxOutput) -> &mut Self {
        self.outputs.push(output);
        self
    }

    /// Set the lock time for the transaction.
    ///
    /// This is often set to the current block height.
    pub fn set_lock_time(&mut self, lock_time: u32) -> &mut Self {
        self.lock_time = lock_time;
        self
    }

    /// Set the version of the transaction.
    pub fn set_version(&mut self, version: u32) -> &mut Self {
        self.version = version;
        self
    }

    /// Point the builder at the factory that creates its transactions.
    pub fn set_consensus_factory(&mut self, factory: &'a dyn ConsensusFactory) -> &mut Self {
        self.factory = Some(factory);
        self
    }

    pub fn consensus_factory(&self) -> Option<&'a dyn ConsensusFactory> {
        self.factory
    }

    /// Use a private generator seeded with `seed` for shuffling.
    pub fn set_shuffle_seed(&mut self, seed: u64) -> &mut Self {
        self.shuffle_rng = Some(StdRng::seed_from_u64(seed));
        self
    }

    pub fn is_seeded(&self) -> bool {
        self.shuffle_rng.is_some()
    }

    /// Build the transaction.
    ///
    /// Each call advances the seeded generator, so repeated builds from one builder are
    /// reproducible as a sequence, not individually.
    pub fn build(&mut self) -> Result<Box<dyn Transaction>> {
        if self.outputs.is_empty() {
            return Err(Error::BadArgument("transaction has no outputs".to_string()));
        }
        let mut tx: Box<dyn Transaction> = match self.factory {
            Some(factory) => factory.create_transaction(),
            None => Box::new(Tx::default()),
        };
        tx.set_version(self.version);
        tx.set_lock_time(self.lock_time);

        let mut inputs = self.inputs.clone();
        let mut outputs = self.outputs.clone();
        match self.shuffle_rng.as_mut() {
            Some(rng) => {
                shuffle(&mut inputs, self.shuffle_inputs, rng);
                shuffle(&mut outputs, self.shuffle_outputs, rng);
            }
            None => {
                let mut rng = rand::thread_rng();
                shuffle(&mut inputs, self.shuffle_inputs, &mut rng);
                shuffle(&mut outputs, self.shuffle_outputs, &mut rng);
            }
        }
        tx.inputs_mut().extend(inputs);
        tx.outputs_mut().extend(outputs);
        Ok(tx)
    }
}

impl Default for TxBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], enabled: bool, rng: &mut R) {
    if enabled {
        items.shuffle(rng);
    }
}
