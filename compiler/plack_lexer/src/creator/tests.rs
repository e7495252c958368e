use super::*;
use plack_diagnostic::{CountingErrorHandler, ErrorSeverityLevel, Messages, RecordingErrorHandler};
use plack_ir::{SourceCode, TokenFlags, TokenId, TokenPayload};
use pretty_assertions::assert_eq;
use std::sync::Arc;

const IDENT: TokenId = TokenId(20);
const INT: TokenId = TokenId(21);
const SLASH: TokenId = TokenId(22);
const LET: TokenId = TokenId(23);

struct Run {
    created: CreatedTokens,
    cursor: CharCursor,
}

fn create_with(creator: &dyn TokenCreator, text: &str, handler: &dyn ErrorHandler) -> Run {
    let source = SourceCode::shared_text("test.plack", text);
    let messages = Messages::english();
    let context = CreatorContext {
        source_code: &source,
        handler,
        messages: &messages,
    };
    let mut cursor = CharCursor::new(text);
    let created = creator
        .create(&mut cursor, SourcePosition::START, &context)
        .unwrap();
    Run { created, cursor }
}

#[test]
fn whitespace_eats_the_run_and_makes_nothing() {
    let run = create_with(&WhitespaceCreator, " \t\n  x", &CountingErrorHandler::new());
    assert!(run.created.first.is_none());
    assert!(run.created.spacing);
    assert_eq!(run.created.next_start, SourcePosition::new(2, 2));
    assert_eq!(run.cursor.current(), Some('x'));
}

#[test]
fn single_char_token() {
    let run = create_with(&SingleCharCreator(SLASH), "/x", &CountingErrorHandler::new());
    let token = run.created.first.unwrap();
    assert_eq!(token.id(), SLASH);
    assert_eq!(
        token.location(),
        SourceLocation::new(SourcePosition::START, SourcePosition::new(1, 1))
    );
}

#[test]
fn identifier_carries_its_text() {
    let creator = IdentifierCreator::new(IDENT);
    let run = create_with(&creator, "foo_1 bar", &CountingErrorHandler::new());
    let token = run.created.first.unwrap();
    assert_eq!(token.id(), IDENT);
    assert_eq!(token.string_value().unwrap(), "foo_1");
    assert_eq!(run.created.next_start, SourcePosition::new(1, 5));
}

#[test]
fn reserved_word_is_its_prototype_relocated() {
    let creator = IdentifierCreator::new(IDENT).reserve("let", LET);
    assert!(creator.is_reserved("let"));
    let run = create_with(&creator, "let", &CountingErrorHandler::new());
    let token = run.created.first.unwrap();
    assert_eq!(token.id(), LET);
    assert!(token.flags().contains(TokenFlags::RESERVED_WORD));
    assert_eq!(token.position_after(), SourcePosition::new(1, 3));

    let run = create_with(&creator, "letter", &CountingErrorHandler::new());
    assert_eq!(run.created.first.unwrap().id(), IDENT);
}

#[test]
fn integer_literal() {
    let run = create_with(&IntegerCreator(INT), "1234+", &CountingErrorHandler::new());
    let token = run.created.first.unwrap();
    assert_eq!(token.int_value().unwrap(), 1234);
    assert_eq!(run.cursor.current(), Some('+'));
}

#[test]
fn integer_overflow_is_reported_and_saturates() {
    let handler = RecordingErrorHandler::new();
    let run = create_with(&IntegerCreator(INT), "99999999999999999999", &handler);
    assert!(matches!(
        run.created.first.unwrap().payload(),
        TokenPayload::Int(i64::MAX)
    ));
    let records = handler.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].error.level(), ErrorSeverityLevel::NonFatal);
    assert_eq!(
        records[0].error.description(),
        "integer literal `99999999999999999999` is too large"
    );
}

#[test]
fn line_comment_skips_to_newline() {
    let creator = LineCommentCreator::new("//", Arc::new(SingleCharCreator(SLASH)));
    let run = create_with(&creator, "// note\nx", &CountingErrorHandler::new());
    assert!(run.created.first.is_none());
    assert!(run.created.spacing);
    assert_eq!(run.cursor.current(), Some('\n'));
}

#[test]
fn line_comment_falls_back_without_prefix() {
    let creator = LineCommentCreator::new("//", Arc::new(SingleCharCreator(SLASH)));
    assert_eq!(creator.prefix(), "//");
    let run = create_with(&creator, "/x", &CountingErrorHandler::new());
    assert_eq!(run.created.first.unwrap().id(), SLASH);
}

#[test]
fn invalid_character_is_reported_and_dropped() {
    let handler = RecordingErrorHandler::new();
    let run = create_with(&InvalidCharacterCreator::default(), "\u{1}x", &handler);
    assert!(run.created.first.is_none());
    assert!(!run.created.spacing);
    assert_eq!(run.cursor.current(), Some('x'));

    let records = handler.records();
    assert_eq!(records.len(), 1);
    let error = &records[0].error;
    assert_eq!(error.level(), ErrorSeverityLevel::NonFatal);
    assert_eq!(error.description(), "invalid character '\\u{1}'");
    assert_eq!(error.location(), Some(SourceLocation::single(SourcePosition::START)));
    assert_eq!(
        records[0].context.as_ref().unwrap().position,
        Some(SourcePosition::START)
    );
}

#[test]
fn invalid_character_level_is_configurable() {
    assert_eq!(
        InvalidCharacterCreator::default().level(),
        ErrorSeverityLevel::NonFatal
    );
    let handler = CountingErrorHandler::new();
    let creator = InvalidCharacterCreator::with_level(ErrorSeverityLevel::Warning);
    create_with(&creator, "\u{1}", &handler);
    assert_eq!(handler.counters().warning_count(), 1);
    assert_eq!(handler.counters().non_fatal_count(), 0);
}

#[test]
fn invalid_character_token_keeps_the_character() {
    let run = create_with(&InvalidCharacterTokenCreator, "\u{7f}", &CountingErrorHandler::new());
    let token = run.created.first.unwrap();
    assert_eq!(token.id(), TokenId::INVALID_CHARACTER);
    assert_eq!(token.string_value().unwrap(), "\u{7f}");
}

#[test]
fn extra_tokens_follow_the_first() {
    let first = Token::new(INT, SourceLocation::single(SourcePosition::START));
    let second = Token::new(SLASH, SourceLocation::single(SourcePosition::new(1, 1)));
    let mut created = CreatedTokens::single(first, SourcePosition::new(1, 2))
        .with_extra(std::iter::once(second.clone()));
    assert_eq!(created.extra.next(), Some(second));
    assert_eq!(created.extra.next(), None);
}
