//! Typed token payloads.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Optional typed value attached to a token.
#[derive(Clone, Default)]
pub enum TokenPayload {
    #[default]
    None,
    Str(Arc<str>),
    Int(i64),
    IntPair(i64, i64),
    Double(f64),
    /// Arbitrary grammar-defined value.
    Object(Arc<dyn Any + Send + Sync>),
}

impl TokenPayload {
    /// Create a string payload.
    pub fn string(value: impl Into<Arc<str>>) -> Self {
        TokenPayload::Str(value.into())
    }

    /// Create an object payload.
    pub fn object<T: Any + Send + Sync>(value: T) -> Self {
        TokenPayload::Object(Arc::new(value))
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, TokenPayload::None)
    }

    /// Human-readable name of the payload kind, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            TokenPayload::None => "no",
            TokenPayload::Str(_) => "string",
            TokenPayload::Int(_) => "int",
            TokenPayload::IntPair(..) => "int pair",
            TokenPayload::Double(_) => "double",
            TokenPayload::Object(_) => "object",
        }
    }
}

impl fmt::Debug for TokenPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenPayload::None => f.write_str("None"),
            TokenPayload::Str(s) => write!(f, "{s:?}"),
            TokenPayload::Int(v) => write!(f, "{v}"),
            TokenPayload::IntPair(a, b) => write!(f, "({a}, {b})"),
            TokenPayload::Double(v) => write!(f, "{v:?}"),
            TokenPayload::Object(_) => f.write_str("<object>"),
        }
    }
}
