//! Grammar and helpers shared by the pipeline tests.

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;
use plack_diagnostic::{ColorMode, ErrorHandler, WriterConfig, WriterErrorHandler};
use plack_ir::{SourceCode, TokenId};
use plack_lexer::creator::{
    IdentifierCreator, IntegerCreator, InvalidCharacterCreator, InvalidCharacterTokenCreator,
    LineCommentCreator, SingleCharCreator, TokenCreator, WhitespaceCreator,
};
use plack_lexer::{DispatchTable, DispatchTableTokenizer};

pub const IDENT: TokenId = TokenId(20);
pub const INT: TokenId = TokenId(21);
pub const PLUS: TokenId = TokenId(22);
pub const SLASH: TokenId = TokenId(23);
pub const LET: TokenId = TokenId(24);

/// How characters outside the grammar are handled.
#[derive(Copy, Clone)]
pub enum Invalid {
    /// Report each one from the source.
    Report,
    /// Emit invalid-character tokens for a later stage.
    Emit,
}

pub fn grammar(invalid: Invalid) -> Arc<DispatchTable> {
    let default: Arc<dyn TokenCreator> = match invalid {
        Invalid::Report => Arc::new(InvalidCharacterCreator::default()),
        Invalid::Emit => Arc::new(InvalidCharacterTokenCreator),
    };
    let whitespace: Arc<dyn TokenCreator> = Arc::new(WhitespaceCreator);
    let ident: Arc<dyn TokenCreator> = Arc::new(IdentifierCreator::new(IDENT).reserve("let", LET));
    let int: Arc<dyn TokenCreator> = Arc::new(IntegerCreator(INT));

    let mut table = DispatchTable::new(128, default);
    table
        .set_all(" \t\r\n", &whitespace)
        .set_range('a'..='z', &ident)
        .set_range('A'..='Z', &ident)
        .set_range('0'..='9', &int)
        .set('+', Arc::new(SingleCharCreator(PLUS)))
        .set(
            '/',
            Arc::new(LineCommentCreator::new("//", Arc::new(SingleCharCreator(SLASH)))),
        );
    Arc::new(table)
}

pub fn source(
    name: &str,
    text: &str,
    invalid: Invalid,
    handler: Arc<dyn ErrorHandler>,
) -> DispatchTableTokenizer {
    DispatchTableTokenizer::dispatching(SourceCode::shared_text(name, text), grammar(invalid), handler)
}

/// Writer sink the test can read back while a handler owns it.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn text(&self) -> String {
        String::from_utf8(self.0.lock().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Uncoloured writer handler over a fresh buffer.
pub fn writer() -> (Arc<WriterErrorHandler<SharedBuffer>>, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let config = WriterConfig {
        color: ColorMode::Never,
        ..WriterConfig::default()
    };
    (
        Arc::new(WriterErrorHandler::new(buffer.clone(), config)),
        buffer,
    )
}
