use super::*;

#[test]
fn levels_are_contiguous_indices() {
    for (i, level) in ErrorSeverityLevel::ALL.iter().enumerate() {
        assert_eq!(level.index(), i);
        assert_eq!(ErrorSeverityLevel::from_index(i), Some(*level));
    }
    assert_eq!(ErrorSeverityLevel::from_index(ErrorSeverityLevel::COUNT), None);
}

#[test]
fn fatal_is_maximal() {
    let max = ErrorSeverityLevel::ALL.iter().max().copied();
    assert_eq!(max, Some(ErrorSeverityLevel::Fatal));
    assert!(ErrorSeverityLevel::Fatal.is_fatal());
    assert!(!ErrorSeverityLevel::NonFatal.is_fatal());
}

#[test]
fn order_matches_declaration() {
    assert!(ErrorSeverityLevel::Debug < ErrorSeverityLevel::Info);
    assert!(ErrorSeverityLevel::Info < ErrorSeverityLevel::Notice);
    assert!(ErrorSeverityLevel::Notice < ErrorSeverityLevel::Warning);
    assert!(ErrorSeverityLevel::Warning < ErrorSeverityLevel::NonFatal);
    assert!(ErrorSeverityLevel::NonFatal < ErrorSeverityLevel::Fatal);
}

#[test]
fn only_non_fatal_and_fatal_are_errors() {
    assert!(!ErrorSeverityLevel::Warning.is_error());
    assert!(ErrorSeverityLevel::NonFatal.is_error());
    assert!(ErrorSeverityLevel::Fatal.is_error());
}

#[test]
fn message_keys_are_distinct() {
    let keys: std::collections::HashSet<_> = ErrorSeverityLevel::ALL
        .iter()
        .map(|l| l.message_key())
        .collect();
    assert_eq!(keys.len(), ErrorSeverityLevel::COUNT);
}
