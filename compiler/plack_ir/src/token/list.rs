//! Ordered token sequences.

use std::ops::{Index, Range};

use super::{Token, TokenId};
use crate::SourcePosition;

/// An ordered, index-addressable list of tokens.
///
/// Sub-lists are borrowed slices of the backing store; filtering produces a
/// new list. No uniqueness is enforced.
#[derive(Clone, Default, PartialEq, Eq, Hash, Debug)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    /// Create a new empty token list.
    #[inline]
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    /// Create a new token list with pre-allocated capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        TokenList {
            tokens: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn from_vec(tokens: Vec<Token>) -> Self {
        TokenList { tokens }
    }

    #[inline]
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    #[inline]
    pub fn extend(&mut self, tokens: impl IntoIterator<Item = Token>) {
        self.tokens.extend(tokens);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    #[inline]
    pub fn first(&self) -> Option<&Token> {
        self.tokens.first()
    }

    #[inline]
    pub fn last(&self) -> Option<&Token> {
        self.tokens.last()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Borrow a range of the list without copying.
    ///
    /// Returns `None` if the range is out of bounds.
    #[inline]
    pub fn sub_list(&self, range: Range<usize>) -> Option<&[Token]> {
        self.tokens.get(range)
    }

    /// New list holding the tokens for which `keep` returns `true`.
    pub fn filtered(&self, mut keep: impl FnMut(&Token) -> bool) -> TokenList {
        self.tokens.iter().filter(|t| keep(t)).cloned().collect()
    }

    /// Index of the first token matching `pred` (linear search).
    pub fn position(&self, pred: impl FnMut(&Token) -> bool) -> Option<usize> {
        self.tokens.iter().position(pred)
    }

    /// Binary search by start position.
    ///
    /// The list must be ordered by start position, as tokenizer output is.
    /// Returns `Ok(index)` for a token starting exactly at `position`, or
    /// `Err(insert)` with the index where such a token would go.
    pub fn binary_search_position(&self, position: SourcePosition) -> Result<usize, usize> {
        self.tokens
            .binary_search_by(|t| t.start_position().cmp(&position))
    }

    /// Ids of all tokens, in order.
    pub fn ids(&self) -> Vec<TokenId> {
        self.tokens.iter().map(Token::id).collect()
    }

    #[inline]
    pub fn into_vec(self) -> Vec<Token> {
        self.tokens
    }
}

impl Index<usize> for TokenList {
    type Output = Token;

    #[inline]
    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl FromIterator<Token> for TokenList {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        TokenList {
            tokens: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for TokenList {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl From<Vec<Token>> for TokenList {
    fn from(tokens: Vec<Token>) -> Self {
        TokenList { tokens }
    }
}
