use std::{collections::HashMap, fmt};

use log::trace;

use super::BitExec;
use crate::GateType;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum PlainError {
    /// `read` asked for an input nobody provided
    #[error("No input bound to name {0:?}")]
    MissingInput(String),
    /// Handle was not minted by this executor
    #[error("Unknown handle {0}")]
    UnknownHandle(PlainHandle),
}

/// Index into the [`PlainExec`] arena. Every primitive call mints a new one,
/// so equal handles always denote the same stored bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlainHandle(pub usize);

impl fmt::Display for PlainHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Plaintext simulator: stores every bit in the clear.
///
/// Useful for debugging circuits and as the reference the other backends are
/// checked against.
#[derive(Debug, Default)]
pub struct PlainExec {
    values: Vec<bool>,
    inputs: HashMap<String, bool>,
    outputs: HashMap<String, bool>,
}

impl PlainExec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_inputs<S: Into<String>>(inputs: impl IntoIterator<Item = (S, bool)>) -> Self {
        Self {
            inputs: inputs
                .into_iter()
                .map(|(name, bit)| (name.into(), bit))
                .collect(),
            ..Self::default()
        }
    }

    pub fn set_input(&mut self, name: impl Into<String>, bit: bool) {
        self.inputs.insert(name.into(), bit);
    }

    /// Value written under `name`, if any.
    pub fn output(&self, name: &str) -> Option<bool> {
        self.outputs.get(name).copied()
    }

    pub fn outputs(&self) -> &HashMap<String, bool> {
        &self.outputs
    }

    /// Number of bits stored so far.
    pub fn size(&self) -> usize {
        self.values.len()
    }

    /// Peeks at a stored bit without going through `decrypt`.
    pub fn lookup(&self, handle: &PlainHandle) -> Option<bool> {
        self.values.get(handle.0).copied()
    }

    fn alloc(&mut self, bit: bool) -> PlainHandle {
        self.values.push(bit);
        PlainHandle(self.values.len() - 1)
    }

    fn get(&self, handle: &PlainHandle) -> Result<bool, PlainError> {
        self.lookup(handle).ok_or(PlainError::UnknownHandle(*handle))
    }

    // Gate primitives are total, so a foreign handle is a caller bug.
    fn gate(&mut self, gate: GateType, a: &PlainHandle, b: &PlainHandle) -> PlainHandle {
        let (a_val, b_val) = match (self.get(a), self.get(b)) {
            (Ok(a_val), Ok(b_val)) => (a_val, b_val),
            (Err(err), _) | (_, Err(err)) => panic!("{gate} on foreign operand: {err}"),
        };
        let out = gate.eval(a_val, b_val);
        trace!("{gate}({a}, {b}) = {out}");
        self.alloc(out)
    }
}

impl BitExec for PlainExec {
    type Handle = PlainHandle;
    type Error = PlainError;

    fn encode(&mut self, bit: bool) -> PlainHandle {
        self.alloc(bit)
    }

    fn encrypt(&mut self, bit: bool) -> PlainHandle {
        self.alloc(bit)
    }

    fn decrypt(&mut self, handle: &PlainHandle) -> Result<bool, PlainError> {
        self.get(handle)
    }

    fn read(&mut self, name: &str) -> Result<PlainHandle, PlainError> {
        let bit = *self
            .inputs
            .get(name)
            .ok_or_else(|| PlainError::MissingInput(name.to_owned()))?;
        Ok(self.alloc(bit))
    }

    fn write(&mut self, handle: &PlainHandle, name: &str) -> Result<(), PlainError> {
        let bit = self.get(handle)?;
        self.outputs.insert(name.to_owned(), bit);
        Ok(())
    }

    super::delegate_gates!();
}

#[cfg(test)]
mod tests {
    use itertools::iproduct;

    use super::*;

    #[test]
    fn test_primitives_follow_truth_tables() {
        let mut exec = PlainExec::new();

        for (gate, a, b) in iproduct!(GateType::BINARY, [false, true], [false, true]) {
            let ha = exec.encode(a);
            let hb = exec.encrypt(b);
            let out = exec.binary(gate, &ha, &hb);
            assert_eq!(exec.decrypt(&out), Ok(gate.eval(a, b)), "{gate}({a}, {b})");
        }

        let h = exec.encode(true);
        let negated = exec.not(&h);
        assert_eq!(exec.decrypt(&negated), Ok(false));
    }

    #[test]
    fn test_every_call_mints_a_new_handle() {
        let mut exec = PlainExec::new();
        let a = exec.encode(true);
        let b = exec.encode(true);
        assert_ne!(a, b);

        let c = exec.and(&a, &b);
        assert_ne!(c, a);
        assert_eq!(exec.size(), 3);
    }

    #[test]
    fn test_io() {
        let mut exec = PlainExec::with_inputs([("x", true)]);

        let x = exec.read("x").unwrap();
        assert_eq!(exec.lookup(&x), Some(true));
        assert_eq!(
            exec.read("y"),
            Err(PlainError::MissingInput("y".to_owned()))
        );

        exec.write(&x, "out").unwrap();
        assert_eq!(exec.output("out"), Some(true));
        assert_eq!(
            exec.write(&PlainHandle(99), "bad"),
            Err(PlainError::UnknownHandle(PlainHandle(99)))
        );
    }
}
