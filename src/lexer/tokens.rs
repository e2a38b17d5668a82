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

//! Token kinds and the value carrier for the BBCode lexer.

use serde::Serialize;

use crate::error::Span;

/// Base of the named token codes. Matches the numbering a yacc-style
/// parser assigns to declared tokens, so codes below 256 stay free for
/// literal characters.
const NAMED_TOKEN_BASE: i32 = 57346;

/// A token kind produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Token {
    /// End of input. Returned again on every call once reached.
    End,
    /// Literal content, or an unquoted argument value.
    Text,
    /// Tag name or bare argument identifier.
    Id,
    /// Line break in document content.
    Newline,
    /// `[` starting an opening tag.
    LeftBracket,
    /// `]` closing a tag.
    RightBracket,
    /// `=` between a tag name or argument and its value.
    Equal,
    /// `[/` of a closing tag that matches an open tag.
    ClosingTagOpening,
    /// Synthesized at end of input, once per unclosed tag.
    MissingClosing,
    /// `[/` of a closing tag with no open tag to close.
    MissingOpening,
}

impl Token {
    /// Numeric code handed to the parser.
    ///
    /// End of input is 0 and punctuation tokens use their byte value.
    pub fn code(&self) -> i32 {
        match self {
            Token::End => 0,
            Token::LeftBracket => i32::from(b'['),
            Token::RightBracket => i32::from(b']'),
            Token::Equal => i32::from(b'='),
            Token::Text => NAMED_TOKEN_BASE,
            Token::Id => NAMED_TOKEN_BASE + 1,
            Token::Newline => NAMED_TOKEN_BASE + 2,
            Token::ClosingTagOpening => NAMED_TOKEN_BASE + 3,
            Token::MissingClosing => NAMED_TOKEN_BASE + 4,
            Token::MissingOpening => NAMED_TOKEN_BASE + 5,
        }
    }

    /// Look up a token kind by its numeric code.
    pub fn from_code(code: i32) -> Option<Token> {
        ALL_TOKENS.iter().copied().find(|t| t.code() == code)
    }

    /// Whether this kind carries a string payload.
    pub fn has_payload(&self) -> bool {
        matches!(self, Token::Text | Token::Id)
    }

    /// Check if this token reports a tag imbalance.
    pub fn is_imbalance(&self) -> bool {
        matches!(self, Token::MissingClosing | Token::MissingOpening)
    }

    /// The markup this token stands for, if it is fixed.
    ///
    /// A missing opening is still written as `[/` in the source.
    pub fn literal(&self) -> Option<&'static str> {
        match self {
            Token::Newline => Some("\n"),
            Token::LeftBracket => Some("["),
            Token::RightBracket => Some("]"),
            Token::Equal => Some("="),
            Token::ClosingTagOpening | Token::MissingOpening => Some("[/"),
            Token::End | Token::MissingClosing => Some(""),
            Token::Text | Token::Id => None,
        }
    }

    /// Get a human-readable name for this token.
    pub fn name(&self) -> &'static str {
        match self {
            Token::End => "end of input",
            Token::Text => "TEXT",
            Token::Id => "ID",
            Token::Newline => "NEWLINE",
            Token::LeftBracket => "'['",
            Token::RightBracket => "']'",
            Token::Equal => "'='",
            Token::ClosingTagOpening => "CLOSING_TAG_OPENING",
            Token::MissingClosing => "MISSING_CLOSING",
            Token::MissingOpening => "MISSING_OPENING",
        }
    }
}

const ALL_TOKENS: [Token; 10] = [
    Token::End,
    Token::Text,
    Token::Id,
    Token::Newline,
    Token::LeftBracket,
    Token::RightBracket,
    Token::Equal,
    Token::ClosingTagOpening,
    Token::MissingClosing,
    Token::MissingOpening,
];

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Payload slot filled in by [`Lexer::lex`](super::Lexer::lex).
///
/// Only `TEXT` and `ID` tokens write to it. Other tokens leave the previous
/// payload in place, so read it right after a call that returned one of
/// those two kinds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenValue {
    text: String,
}

impl TokenValue {
    /// Create an empty value slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the payload.
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Borrow the payload.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Take the payload out, leaving the slot empty.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.text)
    }
}

/// A token with its payload and location, as collected by
/// [`tokenize`](super::tokenize).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpannedToken {
    pub token: Token,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub span: Span,
}

impl SpannedToken {
    pub fn new(token: Token, value: Option<String>, span: Span) -> Self {
        Self { token, value, span }
    }

    /// The text this token contributes when markup is rebuilt.
    pub fn markup(&self) -> &str {
        match (self.token.literal(), &self.value) {
            (Some(literal), _) => literal,
            (None, Some(value)) => value,
            (None, None) => "",
        }
    }
}

impl std::fmt::Display for SpannedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Some(value) => write!(
                f,
                "{} {:?} @ {}..{}",
                self.token, value, self.span.start, self.span.end
            ),
            None => write!(f, "{} @ {}..{}", self.token, self.span.start, self.span.end),
        }
    }
}
