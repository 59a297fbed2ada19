use std::{fmt, ops::AddAssign};

use serde::{Deserialize, Serialize};

/// Gate kinds understood by the bit algebra.
///
/// `Not` is the only unary gate. The ten binary gates name their negated
/// operand with a `n`/`y` suffix pair: `Andny` is `!a & b`, `Andyn` is
/// `a & !b`, `Orny` is `!a | b` (implication) and `Oryn` is `a | !b`
/// (converse implication).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateType {
    Not,
    And,
    Nand,
    Andny,
    Andyn,
    Or,
    Nor,
    Orny,
    Oryn,
    Xor,
    Xnor,
}

/// Unary outcome of a binary gate once one operand is fixed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fold {
    /// Result is the constant.
    Const(bool),
    /// Result is the other operand unchanged.
    Keep,
    /// Result is the other operand negated.
    Negate,
}

impl Fold {
    pub fn apply(self, x: bool) -> bool {
        match self {
            Fold::Const(c) => c,
            Fold::Keep => x,
            Fold::Negate => !x,
        }
    }
}

impl GateType {
    pub const BINARY: [GateType; 10] = [
        GateType::And,
        GateType::Nand,
        GateType::Andny,
        GateType::Andyn,
        GateType::Or,
        GateType::Nor,
        GateType::Orny,
        GateType::Oryn,
        GateType::Xor,
        GateType::Xnor,
    ];

    pub const ALL: [GateType; 11] = [
        GateType::Not,
        GateType::And,
        GateType::Nand,
        GateType::Andny,
        GateType::Andyn,
        GateType::Or,
        GateType::Nor,
        GateType::Orny,
        GateType::Oryn,
        GateType::Xor,
        GateType::Xnor,
    ];

    pub const fn is_binary(self) -> bool {
        !matches!(self, GateType::Not)
    }

    /// XOR-family gates cost nothing on most backends (free-XOR in garbling,
    /// additions in homomorphic schemes).
    pub const fn is_free(self) -> bool {
        matches!(self, GateType::Xor | GateType::Xnor | GateType::Not)
    }

    /// Plaintext truth table. `Not` ignores `b`.
    pub const fn eval(self, a: bool, b: bool) -> bool {
        match self {
            GateType::Not => !a,
            GateType::And => a & b,
            GateType::Nand => !(a & b),
            GateType::Andny => !a & b,
            GateType::Andyn => a & !b,
            GateType::Or => a | b,
            GateType::Nor => !(a | b),
            GateType::Orny => !a | b,
            GateType::Oryn => a | !b,
            GateType::Xor => a ^ b,
            GateType::Xnor => !(a ^ b),
        }
    }

    /// Outcome of `self(x, rhs)` as a function of `x` alone.
    pub const fn fold(self, rhs: bool) -> Fold {
        match (self, rhs) {
            (GateType::Not, _) => Fold::Negate,
            (GateType::And, false) => Fold::Const(false),
            (GateType::And, true) => Fold::Keep,
            (GateType::Nand, false) => Fold::Const(true),
            (GateType::Nand, true) => Fold::Negate,
            (GateType::Andny, false) => Fold::Const(false),
            (GateType::Andny, true) => Fold::Negate,
            (GateType::Andyn, false) => Fold::Keep,
            (GateType::Andyn, true) => Fold::Const(false),
            (GateType::Or, false) => Fold::Keep,
            (GateType::Or, true) => Fold::Const(true),
            (GateType::Nor, false) => Fold::Negate,
            (GateType::Nor, true) => Fold::Const(false),
            (GateType::Orny, false) => Fold::Negate,
            (GateType::Orny, true) => Fold::Const(true),
            (GateType::Oryn, false) => Fold::Const(true),
            (GateType::Oryn, true) => Fold::Keep,
            (GateType::Xor, false) => Fold::Keep,
            (GateType::Xor, true) => Fold::Negate,
            (GateType::Xnor, false) => Fold::Negate,
            (GateType::Xnor, true) => Fold::Keep,
        }
    }

    /// The gate `m` with `m(b, a) == self(a, b)`.
    pub const fn mirror(self) -> Self {
        match self {
            GateType::Andny => GateType::Andyn,
            GateType::Andyn => GateType::Andny,
            GateType::Orny => GateType::Oryn,
            GateType::Oryn => GateType::Orny,
            other => other,
        }
    }

    /// Outcome of `self(x, x)`.
    pub const fn on_same(self) -> Fold {
        match self {
            GateType::And | GateType::Or => Fold::Keep,
            GateType::Nand | GateType::Nor | GateType::Not => Fold::Negate,
            GateType::Xor | GateType::Andny | GateType::Andyn => Fold::Const(false),
            GateType::Xnor | GateType::Orny | GateType::Oryn => Fold::Const(true),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            GateType::Not => "not",
            GateType::And => "and",
            GateType::Nand => "nand",
            GateType::Andny => "andny",
            GateType::Andyn => "andyn",
            GateType::Or => "or",
            GateType::Nor => "nor",
            GateType::Orny => "orny",
            GateType::Oryn => "oryn",
            GateType::Xor => "xor",
            GateType::Xnor => "xnor",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for GateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Number of gates handed to a backend, per gate kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateCount {
    counts: [u64; GateType::ALL.len()],
}

impl GateCount {
    pub fn zero() -> Self {
        Self::default()
    }

    #[inline]
    pub fn handle(&mut self, gate: GateType) {
        self.counts[gate.index()] += 1;
    }

    pub fn get(&self, gate: GateType) -> u64 {
        self.counts[gate.index()]
    }

    pub fn total_gate_count(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn nonfree_gate_count(&self) -> u64 {
        GateType::ALL
            .iter()
            .filter(|gate| !gate.is_free())
            .map(|gate| self.get(*gate))
            .sum()
    }
}

impl AddAssign for GateCount {
    fn add_assign(&mut self, rhs: Self) {
        for (lhs, rhs) in self.counts.iter_mut().zip(rhs.counts) {
            *lhs += rhs;
        }
    }
}

impl fmt::Display for GateCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for gate in GateType::ALL {
            write!(f, "{gate}: {}, ", self.get(gate))?;
        }
        write!(
            f,
            "total: {}, nonfree: {}",
            self.total_gate_count(),
            self.nonfree_gate_count()
        )
    }
}

#[cfg(test)]
mod tests {
    use itertools::iproduct;

    use super::*;

    #[test]
    fn test_truth_tables() {
        let expected: [(GateType, [bool; 4]); 10] = [
            (GateType::And, [false, false, false, true]),
            (GateType::Nand, [true, true, true, false]),
            (GateType::Andny, [false, true, false, false]),
            (GateType::Andyn, [false, false, true, false]),
            (GateType::Or, [false, true, true, true]),
            (GateType::Nor, [true, false, false, false]),
            (GateType::Orny, [true, true, false, true]),
            (GateType::Oryn, [true, false, true, true]),
            (GateType::Xor, [false, true, true, false]),
            (GateType::Xnor, [true, false, false, true]),
        ];

        for (gate, table) in expected {
            let inputs = [(false, false), (false, true), (true, false), (true, true)];
            for ((a, b), out) in inputs.into_iter().zip(table) {
                assert_eq!(gate.eval(a, b), out, "{gate}({a}, {b})");
            }
        }
    }

    #[test]
    fn test_fold_agrees_with_truth_table() {
        for (gate, x, rhs) in iproduct!(GateType::BINARY, [false, true], [false, true]) {
            assert_eq!(gate.fold(rhs).apply(x), gate.eval(x, rhs), "{gate}({x}, {rhs})");
        }
    }

    #[test]
    fn test_mirror_swaps_operands() {
        for (gate, a, b) in iproduct!(GateType::BINARY, [false, true], [false, true]) {
            assert_eq!(gate.mirror().eval(b, a), gate.eval(a, b), "{gate}({a}, {b})");
            assert_eq!(gate.mirror().mirror(), gate);
        }
    }

    #[test]
    fn test_on_same_agrees_with_truth_table() {
        for (gate, x) in iproduct!(GateType::BINARY, [false, true]) {
            assert_eq!(gate.on_same().apply(x), gate.eval(x, x), "{gate}({x}, {x})");
        }
    }

    #[test]
    fn test_gate_count() {
        let mut count = GateCount::zero();
        count.handle(GateType::And);
        count.handle(GateType::And);
        count.handle(GateType::Xor);
        count.handle(GateType::Not);

        assert_eq!(count.get(GateType::And), 2);
        assert_eq!(count.total_gate_count(), 4);
        assert_eq!(count.nonfree_gate_count(), 2);

        let mut other = GateCount::zero();
        other.handle(GateType::Nor);
        count += other;
        assert_eq!(count.nonfree_gate_count(), 3);
    }

    #[test]
    fn test_gate_count_serde() {
        let mut count = GateCount::zero();
        count.handle(GateType::Orny);

        let json = serde_json::to_string(&count).unwrap();
        let back: GateCount = serde_json::from_str(&json).unwrap();
        assert_eq!(back, count);
    }
}
