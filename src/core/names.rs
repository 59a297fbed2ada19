use std::cell::Cell;

/// Prefix of auto-generated input names.
pub const INPUT_PREFIX: &str = "i_";
/// Prefix of auto-generated output names.
pub const OUTPUT_PREFIX: &str = "o_";

/// Indices 0 and 1 are reserved for the `zero`/`one` constants.
pub const FIRST_NAME_INDEX: u64 = 2;

/// Monotonic source of unique I/O names.
///
/// One allocator lives in every [`Context`](crate::Context), so two contexts
/// built the same way hand out the same sequence of names.
#[derive(Debug)]
pub struct NameAllocator {
    next: Cell<u64>,
}

impl Default for NameAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl NameAllocator {
    pub fn new() -> Self {
        Self {
            next: Cell::new(FIRST_NAME_INDEX),
        }
    }

    /// Mints `prefix` followed by the next counter value.
    pub fn mint(&self, prefix: &str) -> String {
        let index = self.next.get();
        self.next.set(index + 1);
        format!("{prefix}{index}")
    }

    /// Value the next minted name will carry.
    pub fn peek(&self) -> u64 {
        self.next.get()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_mint_starts_past_reserved_range() {
        let names = NameAllocator::new();
        assert_eq!(names.mint(INPUT_PREFIX), "i_2");
        assert_eq!(names.mint(OUTPUT_PREFIX), "o_3");
        assert_eq!(names.peek(), 4);
    }

    #[test]
    fn test_mint_is_unique() {
        let names = NameAllocator::new();
        let minted: HashSet<_> = (0..100).map(|_| names.mint(INPUT_PREFIX)).collect();
        assert_eq!(minted.len(), 100);
    }
}
