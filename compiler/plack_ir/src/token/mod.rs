//! Token types shared by every tokenizer stage.
//!
//! A [`Token`] is an id, a location, a flag set and an optional payload.
//! Tokens are immutable once built, except for tokens flagged
//! [`TokenFlags::SETTABLE`], whose flags and payload may be replaced later in
//! the pipeline.

mod flags;
mod list;
mod payload;

pub use flags::TokenFlags;
pub use list::TokenList;
pub use payload::TokenPayload;

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::{SourceLocation, SourcePosition};

/// Grammar-defined token identifier.
///
/// Ids below [`TokenId::FIRST_USER`] are reserved for the framework.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TokenId(pub u32);

impl TokenId {
    /// A character that is not valid at this point of the input.
    pub const INVALID_CHARACTER: TokenId = TokenId(0);

    /// First id available to grammars.
    pub const FIRST_USER: TokenId = TokenId(16);

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check if this id belongs to the framework rather than a grammar.
    #[inline]
    pub const fn is_reserved(self) -> bool {
        self.0 < Self::FIRST_USER.0
    }
}

impl fmt::Debug for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TokenId::INVALID_CHARACTER => f.write_str("#invalid"),
            TokenId(raw) => write!(f, "#{raw}"),
        }
    }
}

/// Failure to read or update a token's data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// The payload was queried as a kind it does not hold.
    #[error("token {id:?} has no {expected} payload (holds {found})")]
    PayloadMismatch {
        id: TokenId,
        expected: &'static str,
        found: &'static str,
    },
    /// A mutation was attempted on a token not flagged settable.
    #[error("token {id:?} is not settable")]
    NotSettable { id: TokenId },
}

/// A located unit of lexical data.
///
/// Two tokens are equal iff they have the same id and the same location;
/// flags and payload do not take part in equality.
#[derive(Clone)]
pub struct Token {
    id: TokenId,
    location: SourceLocation,
    flags: TokenFlags,
    payload: TokenPayload,
}

impl Token {
    #[inline]
    pub fn new(id: TokenId, location: SourceLocation) -> Self {
        Token {
            id,
            location,
            flags: TokenFlags::empty(),
            payload: TokenPayload::None,
        }
    }

    /// Create a token carrying a payload.
    #[inline]
    pub fn with_payload(id: TokenId, location: SourceLocation, payload: TokenPayload) -> Self {
        Token {
            id,
            location,
            flags: TokenFlags::empty(),
            payload,
        }
    }

    /// Builder-style flag setting, for use while the token is being created.
    #[inline]
    #[must_use]
    pub fn flagged(mut self, flags: TokenFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Clone this token at a new location, keeping id, flags and payload.
    ///
    /// Used when a prototype token (e.g. a reserved word) is re-created at
    /// the place it was found.
    #[inline]
    #[must_use]
    pub fn relocated(&self, location: SourceLocation) -> Self {
        Token {
            id: self.id,
            location,
            flags: self.flags,
            payload: self.payload.clone(),
        }
    }

    #[inline]
    pub fn id(&self) -> TokenId {
        self.id
    }

    #[inline]
    pub fn location(&self) -> SourceLocation {
        self.location
    }

    #[inline]
    pub fn flags(&self) -> TokenFlags {
        self.flags
    }

    #[inline]
    pub fn payload(&self) -> &TokenPayload {
        &self.payload
    }

    #[inline]
    pub fn start_position(&self) -> SourcePosition {
        self.location.start_position()
    }

    /// The position right after this token.
    #[inline]
    pub fn position_after(&self) -> SourcePosition {
        self.location.position_after()
    }

    #[inline]
    pub fn is(&self, id: TokenId) -> bool {
        self.id == id
    }

    pub fn string_value(&self) -> Result<&str, TokenError> {
        match &self.payload {
            TokenPayload::Str(s) => Ok(&**s),
            other => Err(self.mismatch("string", other)),
        }
    }

    pub fn int_value(&self) -> Result<i64, TokenError> {
        match self.payload {
            TokenPayload::Int(v) => Ok(v),
            ref other => Err(self.mismatch("int", other)),
        }
    }

    pub fn int_pair_value(&self) -> Result<(i64, i64), TokenError> {
        match self.payload {
            TokenPayload::IntPair(a, b) => Ok((a, b)),
            ref other => Err(self.mismatch("int pair", other)),
        }
    }

    pub fn double_value(&self) -> Result<f64, TokenError> {
        match self.payload {
            TokenPayload::Double(v) => Ok(v),
            ref other => Err(self.mismatch("double", other)),
        }
    }

    /// Downcast an object payload to `T`.
    pub fn object_value<T: std::any::Any + Send + Sync>(&self) -> Result<&T, TokenError> {
        match &self.payload {
            TokenPayload::Object(obj) => obj
                .downcast_ref::<T>()
                .ok_or_else(|| self.mismatch(std::any::type_name::<T>(), &self.payload)),
            other => Err(self.mismatch("object", other)),
        }
    }

    /// Replace the payload of a settable token.
    pub fn set_payload(&mut self, payload: TokenPayload) -> Result<(), TokenError> {
        self.check_settable()?;
        self.payload = payload;
        Ok(())
    }

    /// Replace the flags of a settable token. `SETTABLE` itself is kept.
    pub fn set_flags(&mut self, flags: TokenFlags) -> Result<(), TokenError> {
        self.check_settable()?;
        self.flags = flags | TokenFlags::SETTABLE;
        Ok(())
    }

    fn check_settable(&self) -> Result<(), TokenError> {
        if self.flags.contains(TokenFlags::SETTABLE) {
            Ok(())
        } else {
            Err(TokenError::NotSettable { id: self.id })
        }
    }

    #[cold]
    fn mismatch(&self, expected: &'static str, found: &TokenPayload) -> TokenError {
        TokenError::PayloadMismatch {
            id: self.id,
            expected,
            found: found.kind_name(),
        }
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.location == other.location
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.location.hash(state);
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.id, self.location)?;
        if !self.payload.is_none() {
            write!(f, " {:?}", self.payload)?;
        }
        Ok(())
    }
}
