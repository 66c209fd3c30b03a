#![forbid(unsafe_code)]

//! Which entry's popup is open.
//!
//! One flag per child position, grown lazily on first write. At most one
//! flag is `true` after any [`OpenFlags::toggle`]; the invariant is
//! enforced on write, never on read.

/// Ordered open/closed flags with accordion semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenFlags {
    flags: Vec<bool>,
}

impl OpenFlags {
    /// No entry open.
    #[must_use]
    pub const fn new() -> Self {
        Self { flags: Vec::new() }
    }

    /// Whether the entry at `index` is open. Unwritten indices read closed.
    #[must_use]
    pub fn is_open(&self, index: usize) -> bool {
        self.flags.get(index).copied().unwrap_or(false)
    }

    /// Whether any entry is open.
    #[must_use]
    pub fn any_open(&self) -> bool {
        self.flags.iter().any(|&open| open)
    }

    /// Index of the open entry, if any.
    #[must_use]
    pub fn open_index(&self) -> Option<usize> {
        self.flags.iter().position(|&open| open)
    }

    /// Flags as written so far (may be shorter than the child list).
    #[must_use]
    pub fn as_slice(&self) -> &[bool] {
        &self.flags
    }

    /// Flags padded with `false` to `len` entries.
    #[must_use]
    pub fn snapshot(&self, len: usize) -> Vec<bool> {
        (0..len).map(|i| self.is_open(i)).collect()
    }

    /// Flip `index`, then close every other entry.
    ///
    /// Returns the new state of `index`.
    pub(crate) fn toggle(&mut self, index: usize) -> bool {
        self.ensure_len(index + 1);
        let open = !self.flags[index];
        for (i, flag) in self.flags.iter_mut().enumerate() {
            *flag = i == index && open;
        }
        open
    }

    /// Close `index` unconditionally.
    pub(crate) fn hide(&mut self, index: usize) {
        self.ensure_len(index + 1);
        self.flags[index] = false;
    }

    /// Close everything and forget all positions.
    pub(crate) fn reset(&mut self) {
        self.flags.clear();
    }

    fn ensure_len(&mut self, len: usize) {
        if self.flags.len() < len {
            self.flags.resize(len, false);
        }
    }
}
