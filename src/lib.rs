// bbcode-lexer - A context-sensitive tokenizer for BBCode-style markup
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! BBCode Lexer Library
//!
//! A hand-written, context-sensitive tokenizer for BBCode-style bracket
//! markup with a fixed tag vocabulary (`url`, `img`, `b`, `i`, `u`, `s`,
//! `quote`, `code`). Its token stream feeds a grammar parser that builds the
//! document tree.
//!
//! # Modules
//!
//! - [`error`] - Error types and error reporting
//! - [`lexer`] - Tag registry, lexer state machine and tokens
//!
//! # Example
//!
//! ```
//! use bbcode_lexer::{Lexer, Token, TokenValue};
//!
//! let mut lexer = Lexer::new("[b]hi[/b]");
//! let mut value = TokenValue::new();
//!
//! assert_eq!(lexer.lex(&mut value).unwrap(), Token::LeftBracket);
//! assert_eq!(lexer.lex(&mut value).unwrap(), Token::Id);
//! assert_eq!(value.as_str(), "b");
//! ```

pub mod error;
pub mod lexer;

// Re-export commonly used types
pub use error::{format_error, ErrorCode, LexError, Result, SourceLocation, Span};
pub use lexer::{render, tokenize, Lexer, SpannedToken, Tag, Token, TokenSource, TokenValue};

/// The version of the lexer.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of the lexer.
pub const NAME: &str = "bbcode-lexer";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "bbcode-lexer");
    }
}
