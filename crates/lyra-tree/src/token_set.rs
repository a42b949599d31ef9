//! Const-friendly sets of syntax kinds.

use crate::SyntaxKind;

/// A bitset over [`SyntaxKind`], usable in `const` contexts.
///
/// Sized for the full kind enumeration; adding kinds past 192 is a compile
/// error through the `const` assert in `new`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenSet([u64; 3]);

impl TokenSet {
    pub const EMPTY: TokenSet = TokenSet([0; 3]);

    pub const fn new(kinds: &[SyntaxKind]) -> TokenSet {
        assert!(SyntaxKind::COUNT <= 192);
        let mut words = [0u64; 3];
        let mut i = 0;
        while i < kinds.len() {
            let raw = kinds[i] as usize;
            words[raw / 64] |= 1 << (raw % 64);
            i += 1;
        }
        TokenSet(words)
    }

    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet([
            self.0[0] | other.0[0],
            self.0[1] | other.0[1],
            self.0[2] | other.0[2],
        ])
    }

    #[inline]
    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let raw = kind as usize;
        self.0[raw / 64] & (1 << (raw % 64)) != 0
    }
}
