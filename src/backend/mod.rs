use std::{error::Error, fmt::Debug};

use crate::GateType;

mod counting;
mod masked;
mod plain;

pub use counting::{CallCount, Counting};
pub use masked::{MaskedError, MaskedExec, MaskedHandle};
pub use plain::{PlainError, PlainExec, PlainHandle};

/// Execution backend behind every non-plain [`Bit`](crate::Bit).
///
/// A backend owns the storage its handles point to. The bit algebra never
/// frees a handle and only calls into the backend once constant folding and
/// operand-identity elimination have been ruled out, so any conforming
/// backend (plaintext simulator, homomorphic engine, hardware proxy) can be
/// substituted without touching circuit code.
///
/// Gate primitives are total: they always produce a handle. Only the I/O
/// surface (`decrypt`, `read`, `write`) reports errors.
pub trait BitExec {
    /// Opaque reference to a backend-held bit.
    ///
    /// Equality must mean "refers to the same backend bit" whenever
    /// [`HANDLE_IDENTITY`](Self::HANDLE_IDENTITY) is `true`.
    type Handle: Clone + Eq + Debug;

    type Error: Error + Send + Sync + 'static;

    /// Whether handle equality implies operand identity. Backends that cannot
    /// guarantee it set this to `false`, and `x op x` is then always sent to
    /// the backend.
    const HANDLE_IDENTITY: bool = true;

    /// Trivial (public) encoding of a known bit.
    fn encode(&mut self, bit: bool) -> Self::Handle;

    fn encrypt(&mut self, bit: bool) -> Self::Handle;

    fn decrypt(&mut self, handle: &Self::Handle) -> Result<bool, Self::Error>;

    /// Fetches the input bound to `name`.
    fn read(&mut self, name: &str) -> Result<Self::Handle, Self::Error>;

    /// Exports `handle` under `name`.
    fn write(&mut self, handle: &Self::Handle, name: &str) -> Result<(), Self::Error>;

    fn not(&mut self, a: &Self::Handle) -> Self::Handle;

    fn and(&mut self, a: &Self::Handle, b: &Self::Handle) -> Self::Handle;

    fn nand(&mut self, a: &Self::Handle, b: &Self::Handle) -> Self::Handle;

    /// `!a & b`
    fn andny(&mut self, a: &Self::Handle, b: &Self::Handle) -> Self::Handle;

    /// `a & !b`
    fn andyn(&mut self, a: &Self::Handle, b: &Self::Handle) -> Self::Handle;

    fn or(&mut self, a: &Self::Handle, b: &Self::Handle) -> Self::Handle;

    fn nor(&mut self, a: &Self::Handle, b: &Self::Handle) -> Self::Handle;

    /// `!a | b`
    fn orny(&mut self, a: &Self::Handle, b: &Self::Handle) -> Self::Handle;

    /// `a | !b`
    fn oryn(&mut self, a: &Self::Handle, b: &Self::Handle) -> Self::Handle;

    fn xor(&mut self, a: &Self::Handle, b: &Self::Handle) -> Self::Handle;

    fn xnor(&mut self, a: &Self::Handle, b: &Self::Handle) -> Self::Handle;

    /// Routes `gate` to its primitive. `Not` ignores `b`.
    fn binary(&mut self, gate: GateType, a: &Self::Handle, b: &Self::Handle) -> Self::Handle {
        match gate {
            GateType::Not => self.not(a),
            GateType::And => self.and(a, b),
            GateType::Nand => self.nand(a, b),
            GateType::Andny => self.andny(a, b),
            GateType::Andyn => self.andyn(a, b),
            GateType::Or => self.or(a, b),
            GateType::Nor => self.nor(a, b),
            GateType::Orny => self.orny(a, b),
            GateType::Oryn => self.oryn(a, b),
            GateType::Xor => self.xor(a, b),
            GateType::Xnor => self.xnor(a, b),
        }
    }
}

/// Implements the eleven gate primitives of [`BitExec`] on top of an
/// inherent `fn gate(&mut self, GateType, &Handle, &Handle) -> Handle`.
macro_rules! delegate_gates {
    () => {
        fn not(&mut self, a: &Self::Handle) -> Self::Handle {
            self.gate($crate::GateType::Not, a, a)
        }
        $crate::backend::delegate_gates!(@binary
            and => And, nand => Nand, andny => Andny, andyn => Andyn, or => Or,
            nor => Nor, orny => Orny, oryn => Oryn, xor => Xor, xnor => Xnor
        );
    };
    (@binary $($method:ident => $gate:ident),*) => {
        $(
            fn $method(&mut self, a: &Self::Handle, b: &Self::Handle) -> Self::Handle {
                self.gate($crate::GateType::$gate, a, b)
            }
        )*
    };
}
pub(crate) use delegate_gates;
