use super::*;
use std::collections::HashSet;

#[test]
fn equal_values_make_equal_keys() {
    let a = ErrorKey::named("undefined-name", "foo");
    let b = ErrorKey::named("undefined-name", "foo");
    let c = ErrorKey::named("undefined-name", "bar");
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn different_types_never_match() {
    #[derive(Debug, PartialEq, Eq, Hash)]
    struct Line(u32);
    #[derive(Debug, PartialEq, Eq, Hash)]
    struct Column(u32);

    assert_ne!(ErrorKey::new(Line(3)), ErrorKey::new(Column(3)));
    assert_eq!(ErrorKey::new(Line(3)), ErrorKey::new(Line(3)));
}

#[test]
fn keys_deduplicate_in_sets() {
    let mut seen = HashSet::new();
    assert!(seen.insert(ErrorKey::new(17_u32)));
    assert!(!seen.insert(ErrorKey::new(17_u32)));
    assert!(seen.insert(ErrorKey::new(18_u32)));
    assert_eq!(seen.len(), 2);
}

#[test]
fn value_downcasts() {
    let key = ErrorKey::new(5_i64);
    assert_eq!(key.value::<i64>(), Some(&5));
    assert_eq!(key.value::<u64>(), None);
    assert_eq!(format!("{key:?}"), "ErrorKey(5)");
}
