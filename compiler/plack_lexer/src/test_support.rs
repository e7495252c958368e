//! Token builders and a small grammar shared by the unit tests.

use std::sync::Arc;

use plack_ir::{SourceLocation, SourcePosition, Token, TokenId, TokenList};

use crate::creator::{
    IdentifierCreator, IntegerCreator, LineCommentCreator, SingleCharCreator, TokenCreator,
    WhitespaceCreator,
};
use crate::DispatchTable;

pub const IDENT: TokenId = TokenId(20);
pub const INT: TokenId = TokenId(21);
pub const PLUS: TokenId = TokenId(22);
pub const SLASH: TokenId = TokenId(23);
pub const EQ: TokenId = TokenId(24);
pub const LET: TokenId = TokenId(25);

/// One-character token with id `id` at line 1, column `offset`.
pub fn tok(id: u32, offset: u32) -> Token {
    Token::new(
        TokenId(id),
        SourceLocation::single(SourcePosition::new(1, offset)),
    )
}

/// Raw ids of `tokens`, in order.
pub fn ids(tokens: &TokenList) -> Vec<u32> {
    tokens.iter().map(|token| token.id().raw()).collect()
}

/// Identifiers (with `let` reserved), integers, `+`, `=`, `/` and `//`
/// comments. Everything else goes to `default`.
pub fn sample_table(default: Arc<dyn TokenCreator>) -> DispatchTable {
    let whitespace: Arc<dyn TokenCreator> = Arc::new(WhitespaceCreator);
    let ident: Arc<dyn TokenCreator> = Arc::new(IdentifierCreator::new(IDENT).reserve("let", LET));
    let int: Arc<dyn TokenCreator> = Arc::new(IntegerCreator(INT));

    let mut table = DispatchTable::new(128, default);
    table
        .set_all(" \t\r\n", &whitespace)
        .set_range('a'..='z', &ident)
        .set_range('A'..='Z', &ident)
        .set('_', Arc::clone(&ident))
        .set_range('0'..='9', &int)
        .set('+', Arc::new(SingleCharCreator(PLUS)))
        .set('=', Arc::new(SingleCharCreator(EQ)))
        .set(
            '/',
            Arc::new(LineCommentCreator::new("//", Arc::new(SingleCharCreator(SLASH)))),
        );
    table
}
