use std::collections::HashMap;

use log::{debug, trace};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use super::BitExec;
use crate::GateType;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum MaskedError {
    #[error("No input bound to name {0:?}")]
    MissingInput(String),
    #[error("Nothing written under name {0:?}")]
    MissingOutput(String),
    /// Handle was minted by a different executor and cannot be unmasked
    #[error("Handle belongs to executor {found:#x}, expected {expected:#x}")]
    ForeignHandle { expected: u64, found: u64 },
    #[error("Unknown handle index {0}")]
    UnknownHandle(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MaskedHandle {
    instance: u64,
    index: usize,
}

#[derive(Clone, Copy, Debug)]
struct Cell {
    stored: bool,
    keyed: bool,
}

/// Simulator whose stored bits are never kept in the clear.
///
/// Each cell holds `bit ^ pad`, where the pad is the low bit of a keyed
/// BLAKE3 hash of the cell index under a secret key. `encode` produces
/// trivial cells (zero pad) so public constants stay public; `encrypt` and
/// every gate output produce keyed cells. Only the executor holding the key
/// can unmask, which makes it a stand-in for an encrypting backend in tests.
pub struct MaskedExec {
    key: [u8; 32],
    instance: u64,
    cells: Vec<Cell>,
    inputs: HashMap<String, bool>,
    outputs: HashMap<String, MaskedHandle>,
}

impl std::fmt::Debug for MaskedExec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaskedExec")
            .field("instance", &self.instance)
            .field("cells", &self.cells.len())
            .field("inputs", &self.inputs.len())
            .field("outputs", &self.outputs.len())
            .finish_non_exhaustive()
    }
}

impl MaskedExec {
    pub fn new(seed: u64) -> Self {
        Self::from_rng(&mut ChaCha20Rng::seed_from_u64(seed))
    }

    pub fn from_rng(rng: &mut impl Rng) -> Self {
        Self {
            key: rng.random(),
            instance: rng.random(),
            cells: Vec::new(),
            inputs: HashMap::new(),
            outputs: HashMap::new(),
        }
    }

    pub fn set_input(&mut self, name: impl Into<String>, bit: bool) {
        self.inputs.insert(name.into(), bit);
    }

    /// Unmasks the bit written under `name`.
    pub fn reveal(&self, name: &str) -> Result<bool, MaskedError> {
        let handle = self
            .outputs
            .get(name)
            .ok_or_else(|| MaskedError::MissingOutput(name.to_owned()))?;
        self.unmask(handle)
    }

    /// Raw stored bit, as an observer without the key would see it.
    pub fn stored(&self, handle: &MaskedHandle) -> Result<bool, MaskedError> {
        Ok(self.cell(handle)?.stored)
    }

    fn pad(&self, index: usize) -> bool {
        let hash = blake3::keyed_hash(&self.key, &(index as u64).to_le_bytes());
        hash.as_bytes()[0] & 1 == 1
    }

    fn alloc(&mut self, bit: bool, keyed: bool) -> MaskedHandle {
        let index = self.cells.len();
        let stored = if keyed { bit ^ self.pad(index) } else { bit };
        self.cells.push(Cell { stored, keyed });
        MaskedHandle {
            instance: self.instance,
            index,
        }
    }

    fn cell(&self, handle: &MaskedHandle) -> Result<Cell, MaskedError> {
        if handle.instance != self.instance {
            return Err(MaskedError::ForeignHandle {
                expected: self.instance,
                found: handle.instance,
            });
        }
        self.cells
            .get(handle.index)
            .copied()
            .ok_or(MaskedError::UnknownHandle(handle.index))
    }

    fn unmask(&self, handle: &MaskedHandle) -> Result<bool, MaskedError> {
        let cell = self.cell(handle)?;
        Ok(match cell.keyed {
            true => cell.stored ^ self.pad(handle.index),
            false => cell.stored,
        })
    }

    fn gate(&mut self, gate: GateType, a: &MaskedHandle, b: &MaskedHandle) -> MaskedHandle {
        let (a_val, b_val) = match (self.unmask(a), self.unmask(b)) {
            (Ok(a_val), Ok(b_val)) => (a_val, b_val),
            (Err(err), _) | (_, Err(err)) => panic!("{gate} on foreign operand: {err}"),
        };
        trace!("{gate}(#{}, #{})", a.index, b.index);
        self.alloc(gate.eval(a_val, b_val), true)
    }
}

impl BitExec for MaskedExec {
    type Handle = MaskedHandle;
    type Error = MaskedError;

    fn encode(&mut self, bit: bool) -> MaskedHandle {
        self.alloc(bit, false)
    }

    fn encrypt(&mut self, bit: bool) -> MaskedHandle {
        self.alloc(bit, true)
    }

    fn decrypt(&mut self, handle: &MaskedHandle) -> Result<bool, MaskedError> {
        self.unmask(handle)
    }

    fn read(&mut self, name: &str) -> Result<MaskedHandle, MaskedError> {
        let bit = *self
            .inputs
            .get(name)
            .ok_or_else(|| MaskedError::MissingInput(name.to_owned()))?;
        debug!("masked input {name}");
        Ok(self.alloc(bit, true))
    }

    fn write(&mut self, handle: &MaskedHandle, name: &str) -> Result<(), MaskedError> {
        self.cell(handle)?;
        self.outputs.insert(name.to_owned(), *handle);
        Ok(())
    }

    super::delegate_gates!();
}
