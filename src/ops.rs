//! Operator surface over [`Bit`].
//!
//! Arithmetic on bits is arithmetic modulo 2: `+` and `-` are XOR, `*` is
//! AND. Comparisons cannot go through `PartialEq`/`PartialOrd` since they
//! produce a bit, so they are methods (`bit_eq`, `bit_lt`, ...) with `0 < 1`.
//! The free functions mirror every gate without mutating their operands.

use std::{
    borrow::Borrow,
    ops::{
        Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Mul,
        MulAssign, Not, Sub, SubAssign,
    },
};

use crate::{Bit, BitExec, GateType};

macro_rules! impl_binop {
    ($op:ident, $method:ident, $op_assign:ident, $method_assign:ident, $gate:expr) => {
        impl<E: BitExec, B: Borrow<Bit<E>>> $op<B> for Bit<E> {
            type Output = Bit<E>;

            fn $method(mut self, rhs: B) -> Bit<E> {
                self.apply($gate, rhs.borrow());
                self
            }
        }

        impl<E: BitExec, B: Borrow<Bit<E>>> $op<B> for &Bit<E> {
            type Output = Bit<E>;

            fn $method(self, rhs: B) -> Bit<E> {
                gate($gate, self, rhs.borrow())
            }
        }

        impl<E: BitExec, B: Borrow<Bit<E>>> $op_assign<B> for Bit<E> {
            fn $method_assign(&mut self, rhs: B) {
                self.apply($gate, rhs.borrow());
            }
        }
    };
}

impl_binop!(BitAnd, bitand, BitAndAssign, bitand_assign, GateType::And);
impl_binop!(BitOr, bitor, BitOrAssign, bitor_assign, GateType::Or);
impl_binop!(BitXor, bitxor, BitXorAssign, bitxor_assign, GateType::Xor);
impl_binop!(Add, add, AddAssign, add_assign, GateType::Xor);
impl_binop!(Sub, sub, SubAssign, sub_assign, GateType::Xor);
impl_binop!(Mul, mul, MulAssign, mul_assign, GateType::And);

impl<E: BitExec> Not for Bit<E> {
    type Output = Bit<E>;

    fn not(mut self) -> Bit<E> {
        self.not_assign();
        self
    }
}

impl<E: BitExec> Not for &Bit<E> {
    type Output = Bit<E>;

    fn not(self) -> Bit<E> {
        not(self)
    }
}

impl<E: BitExec> Bit<E> {
    /// `self == rhs` as a bit (XNOR).
    pub fn bit_eq(&self, rhs: &Self) -> Self {
        xnor(self, rhs)
    }

    /// `self != rhs` as a bit (XOR).
    pub fn bit_ne(&self, rhs: &Self) -> Self {
        xor(self, rhs)
    }

    /// `self < rhs`, i.e. `!self & rhs`.
    pub fn bit_lt(&self, rhs: &Self) -> Self {
        andny(self, rhs)
    }

    /// `self <= rhs`, i.e. `!self | rhs`.
    pub fn bit_le(&self, rhs: &Self) -> Self {
        orny(self, rhs)
    }

    /// `self > rhs`, i.e. `self & !rhs`.
    pub fn bit_gt(&self, rhs: &Self) -> Self {
        andyn(self, rhs)
    }

    /// `self >= rhs`, i.e. `self | !rhs`.
    pub fn bit_ge(&self, rhs: &Self) -> Self {
        oryn(self, rhs)
    }
}

/// `gate(lhs, rhs)` on an anonymous copy of `lhs`.
pub fn gate<E: BitExec>(gate: GateType, lhs: &Bit<E>, rhs: &Bit<E>) -> Bit<E> {
    let mut out = lhs.clone();
    out.apply(gate, rhs);
    out
}

pub fn not<E: BitExec>(a: &Bit<E>) -> Bit<E> {
    let mut out = a.clone();
    out.not_assign();
    out
}

/// Logical and; also what `&&` would mean on bits.
pub fn and<E: BitExec>(lhs: &Bit<E>, rhs: &Bit<E>) -> Bit<E> {
    gate(GateType::And, lhs, rhs)
}

pub fn nand<E: BitExec>(lhs: &Bit<E>, rhs: &Bit<E>) -> Bit<E> {
    gate(GateType::Nand, lhs, rhs)
}

pub fn andny<E: BitExec>(lhs: &Bit<E>, rhs: &Bit<E>) -> Bit<E> {
    gate(GateType::Andny, lhs, rhs)
}

pub fn andyn<E: BitExec>(lhs: &Bit<E>, rhs: &Bit<E>) -> Bit<E> {
    gate(GateType::Andyn, lhs, rhs)
}

/// Logical or; also what `||` would mean on bits.
pub fn or<E: BitExec>(lhs: &Bit<E>, rhs: &Bit<E>) -> Bit<E> {
    gate(GateType::Or, lhs, rhs)
}

pub fn nor<E: BitExec>(lhs: &Bit<E>, rhs: &Bit<E>) -> Bit<E> {
    gate(GateType::Nor, lhs, rhs)
}

pub fn orny<E: BitExec>(lhs: &Bit<E>, rhs: &Bit<E>) -> Bit<E> {
    gate(GateType::Orny, lhs, rhs)
}

pub fn oryn<E: BitExec>(lhs: &Bit<E>, rhs: &Bit<E>) -> Bit<E> {
    gate(GateType::Oryn, lhs, rhs)
}

pub fn xor<E: BitExec>(lhs: &Bit<E>, rhs: &Bit<E>) -> Bit<E> {
    gate(GateType::Xor, lhs, rhs)
}

pub fn xnor<E: BitExec>(lhs: &Bit<E>, rhs: &Bit<E>) -> Bit<E> {
    gate(GateType::Xnor, lhs, rhs)
}

#[cfg(test)]
mod tests {
    use itertools::iproduct;

    use super::*;
    use crate::{Context, PlainExec};

    type B = Bit<PlainExec>;

    fn bits() -> impl Iterator<Item = (bool, bool)> {
        iproduct!([false, true], [false, true])
    }

    #[test]
    fn test_arithmetic_is_mod_two() {
        for (a, b) in bits() {
            let (x, y) = (B::constant(a), B::constant(b));
            assert_eq!((&x + &y).plain(), Some(a ^ b));
            assert_eq!((&x - &y).plain(), Some(a ^ b));
            assert_eq!((&x * &y).plain(), Some(a & b));
            assert_eq!((&x + &y).plain(), xor(&x, &y).plain());
            assert_eq!((&x * &y).plain(), and(&x, &y).plain());
        }
    }

    #[test]
    fn test_bitwise_operators() {
        for (a, b) in bits() {
            let (x, y) = (B::constant(a), B::constant(b));
            assert_eq!((&x & &y).plain(), Some(a & b));
            assert_eq!((&x | &y).plain(), Some(a | b));
            assert_eq!((&x ^ &y).plain(), Some(a ^ b));
            assert_eq!((!&x).plain(), Some(!a));
            assert_eq!((x.clone() & y.clone()).plain(), Some(a & b));
            assert_eq!((!x).plain(), Some(!a));
        }
    }

    #[test]
    fn test_compound_assignment() {
        for (a, b) in bits() {
            let y = B::constant(b);
            let mut x = B::constant(a);
            x += &y;
            assert_eq!(x.plain(), Some(a ^ b));

            let mut x = B::constant(a);
            x -= y.clone();
            assert_eq!(x.plain(), Some(a ^ b));

            let mut x = B::constant(a);
            x *= &y;
            assert_eq!(x.plain(), Some(a & b));

            let mut x = B::constant(a);
            x &= &y;
            assert_eq!(x.plain(), Some(a & b));

            let mut x = B::constant(a);
            x |= &y;
            assert_eq!(x.plain(), Some(a | b));

            let mut x = B::constant(a);
            x ^= &y;
            assert_eq!(x.plain(), Some(a ^ b));
        }
    }

    #[test]
    fn test_comparisons() {
        for (a, b) in bits() {
            let (x, y) = (B::constant(a), B::constant(b));
            assert_eq!(x.bit_eq(&y).plain(), Some(a == b));
            assert_eq!(x.bit_eq(&y).plain(), xnor(&x, &y).plain());
            assert_eq!(x.bit_ne(&y).plain(), Some(a != b));
            assert_eq!(x.bit_lt(&y).plain(), Some(a < b));
            assert_eq!(x.bit_le(&y).plain(), Some(a <= b));
            assert_eq!(x.bit_gt(&y).plain(), Some(a > b));
            assert_eq!(x.bit_ge(&y).plain(), Some(a >= b));
        }
    }

    #[test]
    fn test_free_functions_leave_operands_alone() {
        let ctx = Context::new(PlainExec::with_inputs([("a", true)]));
        let a = ctx.input_named("a").unwrap();
        let b = B::ZERO;

        let cases: [(GateType, fn(&B, &B) -> B); 10] = [
            (GateType::And, and),
            (GateType::Nand, nand),
            (GateType::Andny, andny),
            (GateType::Andyn, andyn),
            (GateType::Or, or),
            (GateType::Nor, nor),
            (GateType::Orny, orny),
            (GateType::Oryn, oryn),
            (GateType::Xor, xor),
            (GateType::Xnor, xnor),
        ];

        for (g, f) in cases {
            let mut out = f(&a, &b);
            assert_eq!(out.name(), None);
            assert_eq!(out.decrypt(), Ok(g.eval(true, false)), "{g}");
        }

        assert_eq!(a.name(), Some("a"));
        assert!(!a.is_plain());
        assert_eq!(not(&a).decrypt(), Ok(false));
    }

    #[test]
    fn test_operators_on_held_bits() {
        let ctx = Context::new(PlainExec::new());
        for (a, b) in bits() {
            let x = ctx.encrypt(a);
            let y = ctx.encrypt(b);

            let mut sum = &x + &y;
            let mut product = &x * &y;
            let mut less = x.bit_lt(&y);
            assert_eq!(sum.decrypt(), Ok(a ^ b));
            assert_eq!(product.decrypt(), Ok(a & b));
            assert_eq!(less.decrypt(), Ok(!a & b));
        }
    }
}
