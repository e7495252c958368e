//! Source tokenizer driven by a character dispatch table.
//!
//! Each token request looks at the next character, picks its creator from
//! the table and lets it consume the token. Creators that make nothing
//! (whitespace, comments, reported garbage) just repeat the loop.
//! Whitespace and comments mark the next token with
//! [`TokenFlags::SPACE_BEFORE`] or [`TokenFlags::NEWLINE_BEFORE`].

use std::ops::RangeInclusive;
use std::sync::Arc;

use plack_diagnostic::{
    Abort, ErrorHandler, ErrorSeverityLevel, MessageFormatter, Messages, PhaseContext, PlackError,
};
use plack_ir::{SourceCodeRef, Token, TokenFlags};
use plack_lexer_core::CharCursor;
use tracing::debug;

use crate::creator::{cursor_position, CreatorContext, TokenCreator};
use crate::{Lookahead, TokenSource, Tokenizer};

/// Maps a leading character to the creator of its token.
///
/// Characters outside the table, or never set, use the default creator.
#[derive(Clone)]
pub struct DispatchTable {
    creators: Vec<Option<Arc<dyn TokenCreator>>>,
    default: Arc<dyn TokenCreator>,
}

impl DispatchTable {
    /// A table covering characters `0..size`, all unmapped.
    pub fn new(size: usize, default: Arc<dyn TokenCreator>) -> Self {
        DispatchTable {
            creators: vec![None; size],
            default,
        }
    }

    /// Number of directly indexed characters.
    pub fn len(&self) -> usize {
        self.creators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creators.is_empty()
    }

    /// Map `ch` to `creator`, growing the table if needed.
    pub fn set(&mut self, ch: char, creator: Arc<dyn TokenCreator>) -> &mut Self {
        let index = ch as usize;
        if index >= self.creators.len() {
            self.creators.resize(index + 1, None);
        }
        self.creators[index] = Some(creator);
        self
    }

    pub fn set_range(&mut self, range: RangeInclusive<char>, creator: &Arc<dyn TokenCreator>) -> &mut Self {
        for ch in range {
            self.set(ch, Arc::clone(creator));
        }
        self
    }

    /// Map every character of `chars` to `creator`.
    pub fn set_all(&mut self, chars: &str, creator: &Arc<dyn TokenCreator>) -> &mut Self {
        for ch in chars.chars() {
            self.set(ch, Arc::clone(creator));
        }
        self
    }

    pub fn creator_for(&self, ch: char) -> &dyn TokenCreator {
        match self.creators.get(ch as usize) {
            Some(Some(creator)) => &**creator,
            _ => &*self.default,
        }
    }
}

/// Lifecycle of a [`DispatchTableSource`].
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum SourceState {
    Uninitialized,
    Open,
    Closed,
}

/// Token source reading a [`SourceCode`](plack_ir::SourceCode) through a
/// [`DispatchTable`].
pub struct DispatchTableSource {
    source_code: SourceCodeRef,
    table: Arc<DispatchTable>,
    handler: Arc<dyn ErrorHandler>,
    messages: Arc<dyn MessageFormatter>,
    state: SourceState,
    cursor: Option<CharCursor>,
    /// Tokens still owed from the last creator call.
    extra: Option<Box<dyn Iterator<Item = Token>>>,
}

impl DispatchTableSource {
    pub fn new(
        source_code: SourceCodeRef,
        table: Arc<DispatchTable>,
        handler: Arc<dyn ErrorHandler>,
    ) -> Self {
        DispatchTableSource {
            source_code,
            table,
            handler,
            messages: Arc::new(Messages::english()),
            state: SourceState::Uninitialized,
            cursor: None,
            extra: None,
        }
    }

    #[must_use]
    pub fn with_messages(mut self, messages: Arc<dyn MessageFormatter>) -> Self {
        self.messages = messages;
        self
    }

    pub fn state(&self) -> SourceState {
        self.state
    }

    /// Open the source text.
    ///
    /// An unreadable source is reported as a fatal read error and leaves
    /// the source closed. Only the handler's verdict is returned. Calling
    /// this on a source that is not uninitialized does nothing.
    pub fn initialize(&mut self) -> Result<(), Abort> {
        if self.state != SourceState::Uninitialized {
            return Ok(());
        }
        match self.source_code.text() {
            Ok(text) => {
                debug!(source = self.source_code.full_name(), "opened source");
                self.cursor = Some(CharCursor::new(text));
                self.state = SourceState::Open;
                Ok(())
            }
            Err(error) => {
                self.close();
                let description = self.messages.format_optional(
                    "source.unreadable",
                    &[&self.source_code.full_name(), &error],
                );
                let context = PhaseContext::tokenizing(Some(self.source_code.clone()));
                self.handler.handle(
                    PlackError::read(ErrorSeverityLevel::Fatal, description)
                        .in_source(self.source_code.clone()),
                    Some(&context),
                )
            }
        }
    }

    /// Release the source text. Idempotent.
    pub fn close(&mut self) {
        if self.state != SourceState::Closed {
            debug!(source = self.source_code.full_name(), "closed source");
        }
        self.state = SourceState::Closed;
        self.cursor = None;
        self.extra = None;
    }

    fn produce(&mut self) -> Result<Option<Token>, Abort> {
        if let Some(extra) = &mut self.extra {
            if let Some(token) = extra.next() {
                return Ok(Some(token));
            }
            self.extra = None;
        }

        let Some(cursor) = &mut self.cursor else {
            return Ok(None);
        };
        let context = CreatorContext {
            source_code: &self.source_code,
            handler: &*self.handler,
            messages: &*self.messages,
        };
        let mut skipped = TokenFlags::empty();
        while let Some(ch) = cursor.current() {
            let start = cursor_position(cursor);
            let before = cursor.byte_pos();
            let created = self.table.creator_for(ch).create(cursor, start, &context)?;
            assert!(
                cursor.byte_pos() > before,
                "token creator consumed nothing at {start}"
            );
            match created.first {
                Some(token) => {
                    self.extra = Some(created.extra);
                    return Ok(Some(token.flagged(skipped)));
                }
                None if !created.spacing => {}
                None if created.next_start.line > start.line => {
                    skipped |= TokenFlags::NEWLINE_BEFORE;
                }
                None => skipped |= TokenFlags::SPACE_BEFORE,
            }
        }
        Ok(None)
    }
}

impl TokenSource for DispatchTableSource {
    fn get_next_token(&mut self) -> Result<Option<Token>, Abort> {
        if self.state == SourceState::Uninitialized {
            self.initialize()?;
        }
        self.produce()
    }

    fn source_code(&self) -> Option<SourceCodeRef> {
        Some(self.source_code.clone())
    }

    fn discard_remaining(&mut self) {
        self.close();
    }
}

/// Source tokenizer over a dispatch table.
pub type DispatchTableTokenizer = Lookahead<DispatchTableSource>;

impl Lookahead<DispatchTableSource> {
    pub fn dispatching(
        source_code: SourceCodeRef,
        table: Arc<DispatchTable>,
        handler: Arc<dyn ErrorHandler>,
    ) -> Self {
        Lookahead::new(DispatchTableSource::new(source_code, table, handler))
    }

    /// Open the source. See [`DispatchTableSource::initialize`].
    pub fn initialize(&mut self) -> Result<(), Abort> {
        self.source_mut().initialize()
    }

    /// Stop tokenizing and release the source text. Idempotent.
    pub fn close(&mut self) {
        self.discard_remaining();
        self.source_mut().close();
    }

    pub fn state(&self) -> SourceState {
        self.source().state()
    }
}
