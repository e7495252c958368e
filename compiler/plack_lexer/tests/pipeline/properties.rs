use std::sync::Arc;

use plack_diagnostic::{CountingErrorHandler, ErrorHandler};
use plack_ir::TokenId;
use plack_lexer::{FilterTokenizer, StageContext, StageRegistry, Tokenizer};
use proptest::prelude::*;

use crate::common::{self, Invalid};

proptest! {
    #[test]
    fn pipeline_keeps_the_cursor_contract(
        text in "[a-z0-9 +/\\n\u{1}-\u{4}=#]{0,60}",
        peeks in prop::collection::vec(any::<bool>(), 0..60),
    ) {
        let handler = Arc::new(CountingErrorHandler::new());
        let mut shell = StageRegistry::standard()
            .build_shell(&["remove-invalid-characters", "null"], &StageContext::new(handler.clone()))
            .unwrap();
        shell.initialize(Box::new(common::source("prop.plack", &text, Invalid::Emit, handler.clone())));

        let mut previous = None;
        let mut peeks = peeks.into_iter();
        while shell.has_next().unwrap() {
            if peeks.next().unwrap_or(false) && shell.has_token_after_next().unwrap() {
                prop_assert!(shell.has_next().unwrap());
                let second = shell.peek_token_after_next().unwrap().start_position();
                prop_assert!(second > shell.peek().unwrap().start_position());
            }
            let token = shell.next().unwrap();
            prop_assert!(!token.is(TokenId::INVALID_CHARACTER));
            if let Some(previous) = previous {
                // Source order: never the same token twice.
                prop_assert!(token.start_position() > previous);
            }
            previous = Some(token.start_position());
        }
        prop_assert!(!shell.has_token_after_next().unwrap());
        prop_assert_eq!(handler.counters().fatal_count(), 0);
    }
}
