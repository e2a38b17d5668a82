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

//! Lexer module for the BBCode tokenizer.
//!
//! This module turns bracket markup into a stream of tokens for a grammar
//! parser. It handles:
//! - Plain text runs and line breaks
//! - Opening and closing tags from a fixed vocabulary
//! - Bare identifiers and `name=value` arguments inside tags
//! - Open tag bookkeeping (MISSING_OPENING / MISSING_CLOSING tokens)
//!
//! The parser pulls one token per [`Lexer::lex`] call, passing a
//! [`TokenValue`] that receives the payload of `TEXT` and `ID` tokens.

mod state;
mod tags;
mod tokens;

pub use state::{transition, LexState, Mode, Step};
pub use tags::{match_tag_name, match_tag_start, Tag};
pub use tokens::{SpannedToken, Token, TokenValue};

use crate::error::{ErrorCode, LexError, Result, Span};

/// The interface a grammar parser drives.
///
/// `lex` is called until it returns [`Token::End`]. `error` lets the parser
/// hand back a syntax error it detected on its own.
pub trait TokenSource {
    /// Produce the next token, writing any payload into `value`.
    fn lex(&mut self, value: &mut TokenValue) -> Result<Token>;

    /// Record a syntax error found by the parser.
    fn error(&mut self, message: &str);
}

/// The lexer state for tokenizing one document.
pub struct Lexer<'source> {
    /// The full document.
    source: &'source str,
    /// Start of the unconsumed input.
    position: usize,
    /// Current mode and open tag count.
    state: LexState,
    /// Span of the most recent token.
    last_span: Span,
    /// Latest error reported by the parser.
    last_error: Option<LexError>,
    /// Set once the iterator has yielded `End` or an error.
    done: bool,
}

impl<'source> Lexer<'source> {
    /// Create a new lexer for the given document.
    pub fn new(source: &'source str) -> Self {
        Self {
            source,
            position: 0,
            state: LexState::default(),
            last_span: Span::point(0),
            last_error: None,
            done: false,
        }
    }

    /// The input not consumed yet.
    pub fn remaining(&self) -> &'source str {
        &self.source[self.position..]
    }

    /// Get the current byte position in the document.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Check if all input has been consumed.
    ///
    /// Unclosed tags may still be pending even when this is true.
    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Mode the next call starts in.
    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    /// Number of tags opened and not closed so far.
    pub fn open_depth(&self) -> usize {
        self.state.open_depth
    }

    /// Span of the token returned by the last successful call.
    pub fn span(&self) -> Span {
        self.last_span
    }

    /// Latest syntax error recorded through [`Lexer::error`].
    pub fn last_error(&self) -> Option<&LexError> {
        self.last_error.as_ref()
    }

    /// Get the next token, writing its payload into `value`.
    ///
    /// `value` is only written for `TEXT` and `ID` tokens. On error nothing
    /// is consumed, so calling again reports the same error.
    pub fn lex(&mut self, value: &mut TokenValue) -> Result<Token> {
        let step = self.step()?;
        if let Some(payload) = step.payload {
            value.set(payload);
        }
        Ok(step.token)
    }

    /// Get the next token together with its payload and span.
    pub fn next_token(&mut self) -> Result<SpannedToken> {
        let step = self.step()?;
        Ok(SpannedToken::new(
            step.token,
            step.payload.map(str::to_string),
            self.last_span,
        ))
    }

    /// Record a syntax error reported by the parser.
    ///
    /// The message is kept for the caller; lexing continues unchanged.
    pub fn error(&mut self, message: impl Into<String>) {
        let error = LexError::new(ErrorCode::Syntax, message, self.last_span);
        tracing::debug!(span = ?error.span, message = %error.message, "parser reported error");
        self.last_error = Some(error);
    }

    fn step(&mut self) -> Result<Step<'source>> {
        let source = self.source;
        let step = transition(self.state, &source[self.position..], self.position)?;

        let start = self.position + step.skipped;
        self.position += step.consumed;
        self.state = step.state;
        self.last_span = Span::new(start, self.position);

        match step.token {
            Token::MissingClosing | Token::MissingOpening => tracing::debug!(
                token = %step.token,
                depth = self.state.open_depth,
                at = start,
                "tag imbalance"
            ),
            _ => tracing::trace!(
                token = %step.token,
                payload = step.payload,
                span = ?self.last_span,
                mode = ?self.state.mode,
                "token"
            ),
        }

        Ok(step)
    }
}

impl TokenSource for Lexer<'_> {
    fn lex(&mut self, value: &mut TokenValue) -> Result<Token> {
        Lexer::lex(self, value)
    }

    fn error(&mut self, message: &str) {
        Lexer::error(self, message);
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<SpannedToken>;

    /// Yields every token up to and including `End`, or up to the first error.
    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.next_token();
        self.done = matches!(&item, Ok(t) if t.token == Token::End) || item.is_err();
        Some(item)
    }
}

/// Tokenize a document into a vector of tokens, ending with [`Token::End`].
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn tokenize(source: &str) -> Result<Vec<SpannedToken>> {
    let tokens = Lexer::new(source).collect::<Result<Vec<_>>>()?;
    tracing::debug!(count = tokens.len(), "tokenized");
    Ok(tokens)
}

/// Rebuild markup from a token stream.
///
/// The result lexes to the same tokens as the original document. Tag names
/// come out lowercase and blanks inside tags are normalized to one space
/// between arguments.
pub fn render(tokens: &[SpannedToken]) -> String {
    let mut output = String::new();
    let mut in_tag = false;
    let mut need_space = false;
    // A tag name cut off by the end of input still needs a delimiter
    let mut name_open = false;
    let mut prev: Option<Token> = None;

    for token in tokens {
        match token.token {
            Token::LeftBracket | Token::ClosingTagOpening | Token::MissingOpening => {
                in_tag = true;
                need_space = false;
            }
            Token::RightBracket => in_tag = false,
            Token::Equal => {
                // "v =x" must not become "v=x", which lexes as one value
                if in_tag && prev == Some(Token::Text) {
                    output.push(' ');
                }
                need_space = false;
            }
            Token::Text | Token::Id if in_tag => {
                if need_space {
                    output.push(' ');
                }
                need_space = true;
            }
            Token::MissingClosing | Token::End if name_open => output.push(' '),
            _ => {}
        }
        name_open = token.token == Token::Id
            && matches!(
                prev,
                Some(Token::LeftBracket | Token::ClosingTagOpening | Token::MissingOpening)
            );
        prev = Some(token.token);
        output.push_str(token.markup());
    }

    output
}
