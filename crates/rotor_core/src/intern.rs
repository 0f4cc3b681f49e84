//! String interning.
//!
//! The scanner deduplicates every piece of source text it hands out
//! (identifiers, literal spellings, template chunks) through a
//! [`StringTable`].  Consumers hold [`Istr`] handles: cheap `Copy` values
//! where two handles are equal exactly when their text is equal.

use rustc_hash::FxHashMap;

/// Handle to a string owned by a [`StringTable`].
///
/// Handles are only meaningful together with the table that produced them;
/// [`Istr::EMPTY`] is valid in every table and always resolves to `""`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Istr(u32);

impl Istr {
    /// The interned empty string.
    pub const EMPTY: Istr = Istr(0);
}

/// Deduplicating string store with stable, copyable handles.
///
/// # Example
///
/// ```
/// use rotor_core::intern::StringTable;
///
/// let mut table = StringTable::new();
/// let a = table.intern("window");
/// let b = table.intern("window");
/// assert_eq!(a, b);
/// assert_eq!(table.resolve(a), "window");
/// ```
#[derive(Debug, Default)]
pub struct StringTable {
    map: FxHashMap<Box<str>, Istr>,
    strings: Vec<Box<str>>,
}

impl StringTable {
    /// Create a table with the empty string pre-interned as [`Istr::EMPTY`].
    pub fn new() -> Self {
        let mut table = Self {
            map: FxHashMap::default(),
            strings: Vec::new(),
        };
        table.intern("");
        table
    }

    /// Intern `text`, returning the existing handle if it was seen before.
    pub fn intern(&mut self, text: &str) -> Istr {
        if let Some(&sym) = self.map.get(text) {
            return sym;
        }
        let sym = Istr(self.strings.len() as u32);
        self.strings.push(text.into());
        self.map.insert(text.into(), sym);
        sym
    }

    /// The text behind a handle.
    ///
    /// # Panics
    ///
    /// Panics if `sym` was produced by a different table generation.
    pub fn resolve(&self, sym: Istr) -> &str {
        &self.strings[sym.0 as usize]
    }

    /// Number of distinct strings in the table (including `""`).
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// `true` when only the pre-interned empty string is present.
    pub fn is_empty(&self) -> bool {
        self.strings.len() <= 1
    }

    /// Drop every string except the pre-interned `""`.
    pub fn clear(&mut self) {
        self.map.clear();
        self.strings.clear();
        self.intern("");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_text_equal_handle() {
        let mut t = StringTable::new();
        let a = t.intern("foo");
        let b = t.intern("bar");
        let c = t.intern("foo");
        assert_eq!(a, c);
        assert_ne!(a, b);
    }

    #[test]
    fn test_resolve_round_trip() {
        let mut t = StringTable::new();
        let handles: Vec<_> = ["let", "const", "of", "target", ""]
            .iter()
            .map(|s| (t.intern(s), *s))
            .collect();
        for (sym, text) in handles {
            assert_eq!(t.resolve(sym), text);
        }
    }

    #[test]
    fn test_empty_is_preinterned() {
        let mut t = StringTable::new();
        assert_eq!(t.intern(""), Istr::EMPTY);
        assert_eq!(t.resolve(Istr::EMPTY), "");
    }

    #[test]
    fn test_clear_keeps_empty() {
        let mut t = StringTable::new();
        t.intern("abc");
        t.clear();
        assert_eq!(t.resolve(Istr::EMPTY), "");
        assert!(t.is_empty());
    }
}
