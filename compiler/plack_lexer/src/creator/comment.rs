use std::sync::Arc;

use plack_diagnostic::Abort;
use plack_ir::SourcePosition;
use plack_lexer_core::CharCursor;

use super::{cursor_position, CreatedTokens, CreatorContext, TokenCreator};

/// Skips a comment running from `prefix` to the end of the line.
///
/// Dispatched on the first character of the prefix; when the prefix does
/// not follow, the character is handed to `otherwise` (e.g. `/` as an
/// operator when the prefix is `//`).
#[derive(Clone)]
pub struct LineCommentCreator {
    prefix: Box<str>,
    otherwise: Arc<dyn TokenCreator>,
}

impl LineCommentCreator {
    /// # Panics
    /// Panics if `prefix` is empty.
    pub fn new(prefix: &str, otherwise: Arc<dyn TokenCreator>) -> Self {
        assert!(!prefix.is_empty(), "line comment prefix must not be empty");
        LineCommentCreator {
            prefix: prefix.into(),
            otherwise,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl TokenCreator for LineCommentCreator {
    fn create(
        &self,
        cursor: &mut CharCursor,
        start: SourcePosition,
        context: &CreatorContext<'_>,
    ) -> Result<CreatedTokens, Abort> {
        if !cursor.starts_with(&self.prefix) {
            return self.otherwise.create(cursor, start, context);
        }
        for _ in self.prefix.chars() {
            cursor.bump();
        }
        cursor.eat_until_newline();
        Ok(CreatedTokens::spacing(cursor_position(cursor)))
    }
}
