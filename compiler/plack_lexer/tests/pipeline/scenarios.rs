use std::sync::Arc;

use plack_diagnostic::{
    CountingErrorHandler, ErrorHandler, ErrorKey, ErrorSeverityLevel, PlackError,
    RecordingErrorHandler,
};
use plack_ir::{SourceCode, TokenFlags};
use plack_lexer::{
    tokenize, DispatchTableTokenizer, FilterTokenizer, PipelineConfig, PushbackTokenizer,
    StageContext, StageRegistry, Tokenizer,
};
use pretty_assertions::assert_eq;

use crate::common::{self, Invalid, IDENT, INT, LET, PLUS, SLASH};

#[test]
fn single_invalid_character() {
    let handler = Arc::new(CountingErrorHandler::new());
    let mut tokens = common::source("one.plack", "\u{1}", Invalid::Report, handler.clone());

    let list = tokenize(&mut tokens).unwrap();
    assert!(list.is_empty());
    assert_eq!(handler.counters().non_fatal_count(), 1);
    assert_eq!(handler.counters().fatal_and_above_count(), 0);
}

#[test]
fn duplicate_keys_are_reported_once() {
    let (handler, buffer) = common::writer();
    let key = ErrorKey::named("unused-variable", "x");
    let first = PlackError::semantic(ErrorSeverityLevel::Warning, "`x` is never used")
        .with_key(key.clone());
    let second = PlackError::semantic(ErrorSeverityLevel::Warning, "variable `x` unused")
        .with_key(key);

    handler.handle(first, None).unwrap();
    handler.handle(second, None).unwrap();

    assert_eq!(buffer.text(), "warning: `x` is never used\n");
    assert_eq!(handler.seen_key_count(), 1);
    assert_eq!(handler.counters().warning_count(), 1);
}

#[test]
fn invalid_characters_through_a_configured_pipeline() {
    let (handler, buffer) = common::writer();
    let registry = StageRegistry::standard();
    let config = PipelineConfig::new(["remove-invalid-characters", "null"]);
    let mut shell = config
        .build_shell(&registry, &StageContext::new(handler.clone()))
        .unwrap();
    shell.initialize(Box::new(common::source(
        "mixed.plack",
        "a\u{1}\u{2}+b",
        Invalid::Emit,
        handler.clone(),
    )));

    let list = tokenize(&mut shell).unwrap();
    assert_eq!(list.ids(), vec![IDENT, PLUS, IDENT]);
    assert_eq!(
        buffer.text(),
        "mixed.plack:1:2: error: invalid characters \"\\u{1}\\u{2}\"\n\
         a\u{1}\u{2}+b\n \
         ^\n  \
         = note: while tokenizing mixed.plack at 1:2\n"
    );
    assert_eq!(handler.counters().non_fatal_count(), 1);
}

#[test]
fn speculative_errors_replay_in_order() {
    let recorder = Arc::new(RecordingErrorHandler::new());
    let mut tokens = common::source(
        "replay.plack",
        "\u{1} 99999999999999999999 \u{2}",
        Invalid::Report,
        recorder.clone(),
    );
    assert_eq!(tokenize(&mut tokens).unwrap().ids(), vec![INT]);
    assert_eq!(recorder.record_count(), 3);

    let (handler, buffer) = common::writer();
    recorder.transfer_errors_to(&*handler).unwrap();

    assert!(recorder.is_empty());
    assert_eq!(handler.counters().non_fatal_count(), 3);
    let headers: Vec<String> = buffer
        .text()
        .lines()
        .filter(|line| line.starts_with("replay.plack:"))
        .map(str::to_owned)
        .collect();
    assert_eq!(
        headers,
        vec![
            "replay.plack:1:1: error: invalid character '\\u{1}'",
            "replay.plack:1:3: error: integer literal `99999999999999999999` is too large",
            "replay.plack:1:24: error: invalid character '\\u{2}'",
        ]
    );
}

#[test]
fn fatal_error_aborts_the_pipeline() {
    let (handler, buffer) = common::writer();
    let mut shell = StageRegistry::standard()
        .build_shell(&["null"], &StageContext::new(handler.clone()))
        .unwrap();
    shell.initialize(Box::new(DispatchTableTokenizer::dispatching(
        Arc::new(SourceCode::from_path("/nonexistent/plack/gone.plack")),
        common::grammar(Invalid::Report),
        handler.clone(),
    )));

    let abort = tokenize(&mut shell).unwrap_err();
    assert!(abort.reason().contains("cannot read /nonexistent/plack/gone.plack"));
    assert!(buffer
        .text()
        .starts_with("fatal error: cannot read /nonexistent/plack/gone.plack"));
    assert_eq!(handler.counters().fatal_count(), 1);
}

#[test]
fn parser_style_pushback_over_a_shell() {
    let handler = Arc::new(CountingErrorHandler::new());
    let mut shell = StageRegistry::standard()
        .build_shell(&["remove-invalid-characters"], &StageContext::new(handler.clone()))
        .unwrap();
    shell.initialize(Box::new(common::source(
        "push.plack",
        "let n = 1 // one\n/ n",
        Invalid::Emit,
        handler.clone(),
    )));
    let mut tokens = PushbackTokenizer::new(shell);

    let keyword = tokens.next().unwrap();
    assert_eq!(keyword.id(), LET);
    assert!(keyword.flags().contains(TokenFlags::RESERVED_WORD));
    let name = tokens.next().unwrap();
    assert_eq!(name.string_value().unwrap(), "n");

    // Speculatively read two tokens, then put them back.
    let speculative = vec![tokens.next().unwrap(), tokens.next().unwrap()];
    tokens.push_all(speculative);
    assert_eq!(tokens.pushed_count(), 2);

    let rest = tokens.remaining().unwrap();
    assert_eq!(rest.ids(), vec![INT, SLASH, IDENT]);
    assert!(rest[1].flags().contains(TokenFlags::NEWLINE_BEFORE));
    // `=` is outside the grammar.
    assert_eq!(handler.counters().non_fatal_count(), 1);
}

#[test]
fn tracing_setup_can_run_twice() {
    plack_lexer::init_tracing();
    plack_lexer::init_tracing();

    let handler = Arc::new(CountingErrorHandler::new());
    let mut tokens = common::source("traced.plack", "a + b", Invalid::Report, handler);
    assert_eq!(tokenize(&mut tokens).unwrap().ids(), vec![IDENT, PLUS, IDENT]);
}
