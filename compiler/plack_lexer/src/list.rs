//! Tokenizer over tokens that already exist.

use plack_diagnostic::Abort;
use plack_ir::{SourceCodeRef, Token};

use crate::{Lookahead, TokenSource};

/// Source yielding a fixed sequence of tokens, e.g. a fragment being
/// re-read by a later phase.
pub struct ListSource {
    tokens: std::vec::IntoIter<Token>,
    source_code: Option<SourceCodeRef>,
}

impl ListSource {
    pub fn new(tokens: impl IntoIterator<Item = Token>) -> Self {
        ListSource {
            tokens: tokens.into_iter().collect::<Vec<_>>().into_iter(),
            source_code: None,
        }
    }

    /// Report `source_code` as the origin of the tokens.
    #[must_use]
    pub fn with_source_code(mut self, source_code: SourceCodeRef) -> Self {
        self.source_code = Some(source_code);
        self
    }
}

impl TokenSource for ListSource {
    fn get_next_token(&mut self) -> Result<Option<Token>, Abort> {
        Ok(self.tokens.next())
    }

    fn source_code(&self) -> Option<SourceCodeRef> {
        self.source_code.clone()
    }

    fn discard_remaining(&mut self) {
        self.tokens = Vec::new().into_iter();
    }
}

/// A [`Tokenizer`](crate::Tokenizer) over a fixed token sequence.
pub type ListTokenizer = Lookahead<ListSource>;

impl Lookahead<ListSource> {
    pub fn from_tokens(tokens: impl IntoIterator<Item = Token>) -> Self {
        Lookahead::new(ListSource::new(tokens))
    }
}
