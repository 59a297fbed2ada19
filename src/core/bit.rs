use std::fmt;

use log::debug;

use crate::{
    BitExec, Context,
    core::names::{INPUT_PREFIX, NameAllocator, OUTPUT_PREFIX},
};

pub(crate) enum Repr<E: BitExec> {
    Plain(bool),
    Held { handle: E::Handle, ctx: Context<E> },
}

/// A single logical bit: either a plaintext constant or a handle to a bit
/// held by the backend of a [`Context`].
///
/// Gate operations fold constants and identical operands locally and only
/// reach the backend when both operands are held and distinct (see
/// [`Bit::apply`]).
///
/// `Clone` copies the value or handle but not the name; moves carry the name
/// along. Handles are never released by a `Bit`, their lifetime belongs to
/// the backend.
pub struct Bit<E: BitExec> {
    pub(crate) repr: Repr<E>,
    name: Option<String>,
}

impl<E: BitExec> Bit<E> {
    pub const ZERO: Self = Self::constant(false);
    pub const ONE: Self = Self::constant(true);

    pub const fn constant(value: bool) -> Self {
        Self {
            repr: Repr::Plain(value),
            name: None,
        }
    }

    /// Plain value. Meaningless (always `false`) for a held bit.
    pub fn get_val(&self) -> bool {
        self.plain().unwrap_or(false)
    }

    pub fn plain(&self) -> Option<bool> {
        match self.repr {
            Repr::Plain(value) => Some(value),
            Repr::Held { .. } => None,
        }
    }

    /// Replaces whatever the bit holds by a plain value.
    pub fn set_val(&mut self, value: bool) -> &mut Self {
        self.repr = Repr::Plain(value);
        self
    }

    pub fn is_plain(&self) -> bool {
        matches!(self.repr, Repr::Plain(_))
    }

    pub fn handle(&self) -> Option<&E::Handle> {
        self.held().map(|(handle, _)| handle)
    }

    /// Context that minted the handle, if any.
    pub fn context(&self) -> Option<&Context<E>> {
        self.held().map(|(_, ctx)| ctx)
    }

    pub(crate) fn held(&self) -> Option<(&E::Handle, &Context<E>)> {
        match &self.repr {
            Repr::Plain(_) => None,
            Repr::Held { handle, ctx } => Some((handle, ctx)),
        }
    }

    pub(crate) fn set_handle(&mut self, handle: E::Handle, ctx: &Context<E>) {
        self.repr = Repr::Held {
            handle,
            ctx: ctx.clone(),
        };
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the name, minting `prefix<n>` from `names` on first use.
    pub fn get_name(&mut self, names: &NameAllocator, prefix: &str) -> &str {
        self.name.get_or_insert_with(|| names.mint(prefix))
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    pub fn clear_name(&mut self) -> &mut Self {
        self.name = None;
        self
    }

    /// Turns a plain bit into a trivially encoded handle. No-op if held.
    pub fn encode(&mut self, ctx: &Context<E>) -> &mut Self {
        if let Repr::Plain(value) = self.repr {
            let handle = ctx.executor_mut().encode(value);
            self.set_handle(handle, ctx);
        }
        self
    }

    /// Turns a plain bit into an encrypted handle. No-op if held.
    pub fn encrypt(&mut self, ctx: &Context<E>) -> &mut Self {
        if let Repr::Plain(value) = self.repr {
            let handle = ctx.executor_mut().encrypt(value);
            self.set_handle(handle, ctx);
        }
        self
    }

    /// Reveals a held bit and collapses it to plain.
    pub fn decrypt(&mut self) -> Result<bool, E::Error> {
        if let Some((handle, ctx)) = self.held() {
            let value = ctx.executor_mut().decrypt(handle)?;
            self.set_val(value);
        }
        Ok(self.get_val())
    }

    /// Replaces the bit with a fresh backend input, named `i_<n>` unless a
    /// name is already set.
    pub fn read(&mut self, ctx: &Context<E>) -> Result<&mut Self, E::Error> {
        let handle = {
            let name = self.get_name(ctx.names(), INPUT_PREFIX);
            debug!("read {name}");
            ctx.executor_mut().read(name)?
        };
        self.set_handle(handle, ctx);
        Ok(self)
    }

    pub fn read_as(
        &mut self,
        ctx: &Context<E>,
        name: impl Into<String>,
    ) -> Result<&mut Self, E::Error> {
        self.set_name(name).read(ctx)
    }

    /// Exports the bit, named `o_<n>` unless a name is already set. A plain
    /// bit is encoded first and keeps the encoded handle.
    ///
    /// # Panics
    ///
    /// If the bit is held by a context other than `ctx`.
    pub fn write(&mut self, ctx: &Context<E>) -> Result<&mut Self, E::Error> {
        if let Some(own) = self.context() {
            assert!(own.same(ctx), "bit written through a foreign context");
        }
        self.encode(ctx);

        let name = self
            .name
            .get_or_insert_with(|| ctx.names().mint(OUTPUT_PREFIX));
        debug!("write {name}");
        if let Repr::Held { handle, .. } = &self.repr {
            ctx.executor_mut().write(handle, name)?;
        }
        Ok(self)
    }

    pub fn write_as(
        &mut self,
        ctx: &Context<E>,
        name: impl Into<String>,
    ) -> Result<&mut Self, E::Error> {
        self.set_name(name).write(ctx)
    }
}

impl<E: BitExec> Clone for Bit<E> {
    fn clone(&self) -> Self {
        let repr = match &self.repr {
            Repr::Plain(value) => Repr::Plain(*value),
            Repr::Held { handle, ctx } => Repr::Held {
                handle: handle.clone(),
                ctx: ctx.clone(),
            },
        };
        Self { repr, name: None }
    }
}

impl<E: BitExec> Default for Bit<E> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<E: BitExec> From<bool> for Bit<E> {
    fn from(value: bool) -> Self {
        Self::constant(value)
    }
}

impl<E: BitExec> fmt::Debug for Bit<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Bit");
        match &self.repr {
            Repr::Plain(value) => s.field("plain", &(*value as u8)),
            Repr::Held { handle, .. } => s.field("handle", handle),
        };
        if let Some(name) = &self.name {
            s.field("name", name);
        }
        s.finish()
    }
}

/// Plain constant `0`.
pub const fn zero<E: BitExec>() -> Bit<E> {
    Bit::ZERO
}

/// Plain constant `1`.
pub const fn one<E: BitExec>() -> Bit<E> {
    Bit::ONE
}
