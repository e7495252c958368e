use super::*;
use crate::test_support::{ids, tok};
use crate::{ListSource, ListTokenizer, Lookahead, RemovalFilter};
use plack_ir::{SourceCode, TokenId};
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;

fn source(raw_ids: &[u32]) -> Box<dyn Tokenizer> {
    let offsets = 0_u32..;
    Box::new(ListTokenizer::from_tokens(
        raw_ids.iter().zip(offsets).map(|(&id, offset)| tok(id, offset)),
    ))
}

fn dropping(id: u32) -> Box<dyn FilterTokenizer> {
    Box::new(RemovalFilter::removing(move |t: &Token| t.is(TokenId(id))))
}

#[test]
fn empty_shell_is_a_null_filter() {
    let mut shell = Shell::new(Vec::new());
    assert_eq!(shell.stage_count(), 1);
    assert!(!shell.is_initialized());
    shell.initialize(source(&[20, 21]));
    assert!(shell.is_initialized());
    assert_eq!(ids(&shell.remaining().unwrap()), vec![20, 21]);
}

#[test]
fn stages_apply_in_order() {
    let mut shell = Shell::new(vec![dropping(21), dropping(22)]);
    shell.initialize(source(&[20, 21, 22, 23, 21]));
    assert!(shell.has_token_after_next().unwrap());
    assert_eq!(shell.peek_token_after_next().unwrap().id(), TokenId(23));
    assert_eq!(ids(&shell.remaining().unwrap()), vec![20, 23]);
}

#[test]
fn source_and_filter_pair() {
    let mut shell = Shell::with_source(source(&[20, 21, 22]), dropping(20));
    assert!(shell.is_initialized());
    assert_eq!(ids(&shell.remaining().unwrap()), vec![21, 22]);
}

#[test]
fn source_code_comes_from_the_first_stage() {
    let code = SourceCode::shared_text("a.plack", "x");
    let mut shell = Shell::new(vec![dropping(21)]);
    assert_eq!(shell.source_code(), None);
    shell.initialize(Box::new(Lookahead::new(
        ListSource::new([tok(20, 0)]).with_source_code(code.clone()),
    )));
    assert_eq!(shell.source_code(), Some(code));
}

#[test]
fn shells_nest() {
    let inner = Shell::new(vec![dropping(21)]);
    let mut outer = Shell::new(vec![Box::new(inner), dropping(22)]);
    outer.initialize(source(&[20, 21, 22, 23]));
    assert_eq!(ids(&outer.remaining().unwrap()), vec![20, 23]);
}

#[test]
fn listener_sees_tokens_of_the_last_stage() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut shell = Shell::new(vec![dropping(21)]);
    shell.add_listener(Box::new(move |t: &Token| sink.borrow_mut().push(t.id().raw())));
    shell.initialize(source(&[20, 21, 22]));
    shell.remaining().unwrap();
    assert_eq!(*seen.borrow(), vec![20, 22]);
}

#[test]
fn discard_stops_the_whole_chain() {
    let mut shell = Shell::new(vec![dropping(21)]);
    shell.initialize(source(&[20, 22]));
    shell.discard_remaining();
    assert!(!shell.has_next().unwrap());
}

#[test]
#[should_panic(expected = "used before `initialize`")]
fn cursor_before_initialize_panics() {
    let mut shell = Shell::new(Vec::new());
    let _ = shell.has_next();
}

#[test]
#[should_panic(expected = "initialized twice")]
fn second_initialize_panics() {
    let mut shell = Shell::new(Vec::new());
    shell.initialize(source(&[]));
    shell.initialize(source(&[]));
}
