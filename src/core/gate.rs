use log::trace;

use crate::{
    Bit, BitExec, GateType,
    core::{bit::Repr, gate_type::Fold},
};

impl<E: BitExec> Bit<E> {
    /// Negates the bit in place: locally if plain, through the backend
    /// otherwise.
    pub fn not_assign(&mut self) -> &mut Self {
        match &mut self.repr {
            Repr::Plain(value) => *value = !*value,
            Repr::Held { handle, ctx } => *handle = ctx.executor_mut().not(handle),
        }
        self
    }

    /// `self = gate(self, rhs)` for a known `rhs`.
    ///
    /// Never calls the backend unless the outcome is a negation of a held
    /// bit.
    pub fn apply_const(&mut self, gate: GateType, rhs: bool) -> &mut Self {
        let fold = gate.fold(rhs);
        trace!("{gate} against constant {}: {fold:?}", rhs as u8);
        self.apply_fold(fold)
    }

    /// `self = gate(self, rhs)`.
    ///
    /// Dispatch order:
    /// 1. `rhs` plain: fold the constant into `self` ([`apply_const`](Self::apply_const)).
    /// 2. `self` plain: fold `self` into a copy of `rhs` under the mirrored
    ///    gate and assign that copy to `self`, which drops its name. The
    ///    backend never sees a plaintext operand.
    /// 3. both held by the same handle: resolve by operand identity
    ///    (`x & x = x`, `x ^ x = 0`, ...), skipped when the backend does not
    ///    guarantee [`HANDLE_IDENTITY`](BitExec::HANDLE_IDENTITY).
    /// 4. otherwise the backend primitive produces the new handle.
    ///
    /// `Not` ignores `rhs`.
    ///
    /// # Panics
    ///
    /// If both operands are held by different contexts.
    pub fn apply(&mut self, gate: GateType, rhs: &Self) -> &mut Self {
        if !gate.is_binary() {
            return self.not_assign();
        }

        let Some((rhs_handle, rhs_ctx)) = rhs.held() else {
            return self.apply_const(gate, rhs.get_val());
        };

        let Some((handle, ctx)) = self.held() else {
            let lhs = self.get_val();
            trace!("{gate} with plain lhs, folding into rhs as {}", gate.mirror());
            let mut mirrored = rhs.clone();
            mirrored.apply_const(gate.mirror(), lhs);
            *self = mirrored;
            return self;
        };

        assert!(ctx.same(rhs_ctx), "{gate} on bits from different contexts");

        if E::HANDLE_IDENTITY && handle == rhs_handle {
            let fold = gate.on_same();
            trace!("{gate} on identical operands: {fold:?}");
            return self.apply_fold(fold);
        }

        let out = ctx.executor_mut().binary(gate, handle, rhs_handle);
        trace!("{gate}({handle:?}, {rhs_handle:?}) -> {out:?}");
        if let Repr::Held { handle, .. } = &mut self.repr {
            *handle = out;
        }
        self
    }

    fn apply_fold(&mut self, fold: Fold) -> &mut Self {
        match fold {
            Fold::Const(value) => self.set_val(value),
            Fold::Keep => self,
            Fold::Negate => self.not_assign(),
        }
    }

    pub fn and_assign(&mut self, rhs: &Self) -> &mut Self {
        self.apply(GateType::And, rhs)
    }

    pub fn nand_assign(&mut self, rhs: &Self) -> &mut Self {
        self.apply(GateType::Nand, rhs)
    }

    /// `self = !self & rhs`
    pub fn andny_assign(&mut self, rhs: &Self) -> &mut Self {
        self.apply(GateType::Andny, rhs)
    }

    /// `self = self & !rhs`
    pub fn andyn_assign(&mut self, rhs: &Self) -> &mut Self {
        self.apply(GateType::Andyn, rhs)
    }

    pub fn or_assign(&mut self, rhs: &Self) -> &mut Self {
        self.apply(GateType::Or, rhs)
    }

    pub fn nor_assign(&mut self, rhs: &Self) -> &mut Self {
        self.apply(GateType::Nor, rhs)
    }

    /// `self = !self | rhs`
    pub fn orny_assign(&mut self, rhs: &Self) -> &mut Self {
        self.apply(GateType::Orny, rhs)
    }

    /// `self = self | !rhs`
    pub fn oryn_assign(&mut self, rhs: &Self) -> &mut Self {
        self.apply(GateType::Oryn, rhs)
    }

    pub fn xor_assign(&mut self, rhs: &Self) -> &mut Self {
        self.apply(GateType::Xor, rhs)
    }

    pub fn xnor_assign(&mut self, rhs: &Self) -> &mut Self {
        self.apply(GateType::Xnor, rhs)
    }
}
