use std::{
    cell::{Ref, RefCell, RefMut},
    fmt,
    rc::Rc,
};

use crate::{Bit, BitExec, NameAllocator};

struct Shared<E> {
    exec: RefCell<E>,
    names: NameAllocator,
}

/// Execution context: the backend every held bit talks to, plus the name
/// allocator for its I/O.
///
/// Cloning is cheap and yields a handle to the same backend. Held bits keep
/// a clone of the context that minted them, so operators need no global
/// state. The context is `!Send`; build one per thread.
pub struct Context<E: BitExec>(Rc<Shared<E>>);

impl<E: BitExec> Clone for Context<E> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<E: BitExec> fmt::Debug for Context<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("id", &Rc::as_ptr(&self.0))
            .field("next_name", &self.0.names.peek())
            .finish()
    }
}

impl<E: BitExec> Context<E> {
    pub fn new(exec: E) -> Self {
        Self(Rc::new(Shared {
            exec: RefCell::new(exec),
            names: NameAllocator::new(),
        }))
    }

    pub fn executor(&self) -> Ref<'_, E> {
        self.0.exec.borrow()
    }

    /// Mutable access to the backend.
    ///
    /// # Panics
    ///
    /// If the backend is already borrowed, e.g. when a `Ref` from
    /// [`executor`](Self::executor) is held across a gate operation.
    pub fn executor_mut(&self) -> RefMut<'_, E> {
        self.0.exec.borrow_mut()
    }

    pub fn names(&self) -> &NameAllocator {
        &self.0.names
    }

    /// Whether both contexts drive the same backend instance.
    pub fn same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Returns the backend once every other clone of the context (including
    /// those held by bits) is gone.
    pub fn into_inner(self) -> Result<E, Self> {
        Rc::try_unwrap(self.0)
            .map(|shared| shared.exec.into_inner())
            .map_err(Self)
    }

    /// Fresh encrypted bit holding `value`.
    pub fn encrypt(&self, value: bool) -> Bit<E> {
        let mut bit = Bit::constant(value);
        bit.encrypt(self);
        bit
    }

    /// Fresh input bit with an auto-generated name.
    pub fn input(&self) -> Result<Bit<E>, E::Error> {
        let mut bit = Bit::ZERO;
        bit.read(self)?;
        Ok(bit)
    }

    pub fn input_named(&self, name: impl Into<String>) -> Result<Bit<E>, E::Error> {
        let mut bit = Bit::ZERO;
        bit.read_as(self, name)?;
        Ok(bit)
    }

    /// Endless stream of auto-named inputs, read in order.
    ///
    /// ```
    /// use circuit_bit::{Context, PlainExec};
    ///
    /// let ctx = Context::new(PlainExec::with_inputs([("i_2", true), ("i_3", false)]));
    /// let bits = ctx.inputs().take(2).collect::<Result<Vec<_>, _>>().unwrap();
    /// assert_eq!(bits[0].name(), Some("i_2"));
    /// ```
    pub fn inputs(&self) -> Inputs<'_, E> {
        Inputs { ctx: self }
    }

    /// Writes every bit in order, minting output names where needed.
    pub fn write_all<'b>(
        &self,
        bits: impl IntoIterator<Item = &'b mut Bit<E>>,
    ) -> Result<(), E::Error>
    where
        E: 'b,
    {
        for bit in bits {
            bit.write(self)?;
        }
        Ok(())
    }
}

/// Iterator returned by [`Context::inputs`].
#[derive(Debug)]
pub struct Inputs<'c, E: BitExec> {
    ctx: &'c Context<E>,
}

impl<E: BitExec> Iterator for Inputs<'_, E> {
    type Item = Result<Bit<E>, E::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.ctx.input())
    }
}
