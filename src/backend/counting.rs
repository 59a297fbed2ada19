use super::BitExec;
use crate::{GateCount, GateType};

/// Non-gate backend calls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CallCount {
    pub encode: u64,
    pub encrypt: u64,
    pub decrypt: u64,
    pub read: u64,
    pub write: u64,
}

/// Wraps a backend and records every call that reaches it.
#[derive(Debug, Default)]
pub struct Counting<E> {
    inner: E,
    gates: GateCount,
    calls: CallCount,
}

impl<E: BitExec> Counting<E> {
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            gates: GateCount::zero(),
            calls: CallCount::default(),
        }
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut E {
        &mut self.inner
    }

    pub fn gate_count(&self) -> &GateCount {
        &self.gates
    }

    pub fn call_count(&self) -> &CallCount {
        &self.calls
    }

    /// Gate primitives plus I/O calls.
    pub fn total_calls(&self) -> u64 {
        let CallCount {
            encode,
            encrypt,
            decrypt,
            read,
            write,
        } = self.calls;
        self.gates.total_gate_count() + encode + encrypt + decrypt + read + write
    }

    pub fn reset(&mut self) {
        self.gates = GateCount::zero();
        self.calls = CallCount::default();
    }

    fn gate(&mut self, gate: GateType, a: &E::Handle, b: &E::Handle) -> E::Handle {
        self.gates.handle(gate);
        self.inner.binary(gate, a, b)
    }
}

impl<E: BitExec> BitExec for Counting<E> {
    type Handle = E::Handle;
    type Error = E::Error;

    const HANDLE_IDENTITY: bool = E::HANDLE_IDENTITY;

    fn encode(&mut self, bit: bool) -> E::Handle {
        self.calls.encode += 1;
        self.inner.encode(bit)
    }

    fn encrypt(&mut self, bit: bool) -> E::Handle {
        self.calls.encrypt += 1;
        self.inner.encrypt(bit)
    }

    fn decrypt(&mut self, handle: &E::Handle) -> Result<bool, E::Error> {
        self.calls.decrypt += 1;
        self.inner.decrypt(handle)
    }

    fn read(&mut self, name: &str) -> Result<E::Handle, E::Error> {
        self.calls.read += 1;
        self.inner.read(name)
    }

    fn write(&mut self, handle: &E::Handle, name: &str) -> Result<(), E::Error> {
        self.calls.write += 1;
        self.inner.write(handle, name)
    }

    super::delegate_gates!();
}
