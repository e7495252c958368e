//! Identity keys for recognising the same logical error twice.
//!
//! An [`ErrorKey`] wraps any caller-chosen value with `Eq + Hash`. Two keys
//! are equal when they wrap values of the same type that compare equal, no
//! matter which errors they are attached to. Handlers use this to suppress
//! a defect reported once per pass, or once per phase.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use rustc_hash::FxHasher;

/// Object-safe view of a key value.
trait KeyValue: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn eq_key(&self, other: &dyn KeyValue) -> bool;
}

impl<T: Any + Eq + Hash + fmt::Debug + Send + Sync> KeyValue for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_key(&self, other: &dyn KeyValue) -> bool {
        other.as_any().downcast_ref::<T>().is_some_and(|o| o == self)
    }
}

/// Identity of an error, independent of the error's own contents.
///
/// Cheap to clone. The hash is computed once, at construction.
#[derive(Clone)]
pub struct ErrorKey {
    value: Arc<dyn KeyValue>,
    hash: u64,
}

impl ErrorKey {
    /// Key wrapping `value`. Keys of different value types never compare equal.
    pub fn new<T: Any + Eq + Hash + fmt::Debug + Send + Sync>(value: T) -> Self {
        let mut hasher = FxHasher::default();
        TypeId::of::<T>().hash(&mut hasher);
        value.hash(&mut hasher);
        ErrorKey {
            value: Arc::new(value),
            hash: hasher.finish(),
        }
    }

    /// Key from a category name and a discriminating string,
    /// e.g. `("undefined-name", "foo")`.
    pub fn named(category: &'static str, discriminator: impl Into<String>) -> Self {
        Self::new((category, discriminator.into()))
    }

    /// The wrapped value, if it has type `T`.
    pub fn value<T: Any>(&self) -> Option<&T> {
        self.value.as_any().downcast_ref::<T>()
    }
}

impl PartialEq for ErrorKey {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.value.eq_key(&*other.value)
    }
}

impl Eq for ErrorKey {}

impl Hash for ErrorKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl fmt::Debug for ErrorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ErrorKey({:?})", self.value)
    }
}

#[cfg(test)]
mod tests;
