//! Per-token metadata flags.

bitflags::bitflags! {
    /// Per-token metadata flags packed into a single byte.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TokenFlags: u8 {
        /// Flags and payload may be replaced after creation.
        const SETTABLE = 1 << 0;
        /// Whitespace preceded this token (spaces or tabs).
        const SPACE_BEFORE = 1 << 1;
        /// A newline preceded this token.
        const NEWLINE_BEFORE = 1 << 2;
        /// Token was produced from a reserved-word prototype.
        const RESERVED_WORD = 1 << 3;
        /// Token does not correspond to source text (inserted by a filter).
        const SYNTHETIC = 1 << 4;
    }
}

// TokenFlags is exactly 1 byte.
const _: () = assert!(size_of::<TokenFlags>() == 1);
