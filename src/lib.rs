//! Dual plaintext/backend bit algebra for privacy-preserving circuits.
//!
//! A [`Bit`] is either a plaintext constant or a handle to a bit held by a
//! pluggable [`BitExec`] backend. Every gate works on both representations,
//! folding constants and identical operands locally, so a circuit written
//! once runs in the clear with [`PlainExec`] or under encryption with any
//! other backend.
//!
//! ```
//! use circuit_bit::{Bit, Context, PlainExec};
//!
//! let ctx = Context::new(PlainExec::with_inputs([("a", true), ("b", false)]));
//! let a = ctx.input_named("a").unwrap();
//! let b = ctx.input_named("b").unwrap();
//!
//! let mut sum = &a ^ &b;
//! sum.write_as(&ctx, "sum").unwrap();
//! assert_eq!(ctx.executor().output("sum"), Some(true));
//!
//! // constants are folded without touching the backend
//! assert!((&a & Bit::ZERO).is_plain());
//! ```

pub mod backend;
mod context;
mod core;
pub mod ops;

pub use backend::{
    BitExec, CallCount, Counting, MaskedError, MaskedExec, MaskedHandle, PlainError, PlainExec,
    PlainHandle,
};
pub use context::{Context, Inputs};
pub use core::{
    bit::{Bit, one, zero},
    gate_type::{Fold, GateCount, GateType},
    names::{FIRST_NAME_INDEX, INPUT_PREFIX, NameAllocator, OUTPUT_PREFIX},
};

#[cfg(test)]
pub mod test_utils {
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    pub fn trng() -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(0)
    }
}
