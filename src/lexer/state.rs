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

//! Lexer modes and the transition function between them.
//!
//! [`transition`] is pure: it looks at the current state and the unconsumed
//! input and says which token comes next, how many bytes it used, and what
//! the state becomes. [`Lexer`](super::Lexer) only applies the result.

use super::tags::{is_blank, match_tag_name, match_tag_start};
use super::tokens::Token;
use crate::error::{ErrorCode, LexError, Result, Span};

/// The sub-grammar the lexer is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Ordinary document content.
    #[default]
    Init,
    /// Right after `[` or `[/`, expecting a tag name.
    TagStart,
    /// After the tag name, expecting `]`, `=`, or an identifier.
    TagArgs,
    /// After `=`, expecting an argument value.
    ArgValue,
}

/// Everything the lexer tracks besides its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LexState {
    pub mode: Mode,
    /// Tags opened but not closed yet.
    pub open_depth: usize,
}

impl LexState {
    fn with_mode(self, mode: Mode) -> Self {
        Self { mode, ..self }
    }

    fn with_depth(self, open_depth: usize) -> Self {
        Self { open_depth, ..self }
    }
}

/// The outcome of one transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step<'a> {
    /// State for the next call.
    pub state: LexState,
    pub token: Token,
    /// Payload for `TEXT` and `ID` tokens.
    pub payload: Option<&'a str>,
    /// Whitespace skipped before the token.
    pub skipped: usize,
    /// Total bytes consumed, including `skipped`.
    pub consumed: usize,
}

impl<'a> Step<'a> {
    fn new(state: LexState, token: Token, skipped: usize, len: usize) -> Self {
        Self {
            state,
            token,
            payload: None,
            skipped,
            consumed: skipped + len,
        }
    }

    fn with_payload(mut self, payload: &'a str) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// Compute the next token from `state` and the unconsumed `input`.
///
/// `offset` is the position of `input` in the whole document and is only
/// used to place error spans.
pub fn transition(state: LexState, input: &str, offset: usize) -> Result<Step<'_>> {
    let skipped = match state.mode {
        Mode::Init => 0,
        Mode::TagStart => count_while(input.as_bytes(), is_blank),
        Mode::TagArgs | Mode::ArgValue => count_while(input.as_bytes(), is_space),
    };
    let rest = &input[skipped..];

    if rest.is_empty() {
        return Ok(end_of_input(state, skipped));
    }

    let at = offset + skipped;
    match state.mode {
        Mode::Init => Ok(scan_content(state, rest)),
        Mode::TagStart => scan_tag_name(state, rest, skipped, at),
        Mode::TagArgs => scan_tag_args(state, rest, skipped, at),
        Mode::ArgValue => scan_arg_value(state, rest, skipped, at),
    }
}

/// Drain one unclosed tag per call, then report the end.
fn end_of_input<'a>(state: LexState, skipped: usize) -> Step<'a> {
    if state.open_depth > 0 {
        Step::new(
            state.with_depth(state.open_depth - 1),
            Token::MissingClosing,
            skipped,
            0,
        )
    } else {
        Step::new(state, Token::End, skipped, 0)
    }
}

fn scan_content(state: LexState, rest: &str) -> Step<'_> {
    let bytes = rest.as_bytes();

    if bytes[0] == b'\n' {
        return Step::new(state, Token::Newline, 0, 1);
    }

    if bytes[0] == b'[' && match_tag_start(rest).is_some() {
        let state = state.with_mode(Mode::TagStart);
        if bytes.get(1) == Some(&b'/') {
            if state.open_depth == 0 {
                return Step::new(state, Token::MissingOpening, 0, 2);
            }
            let state = state.with_depth(state.open_depth - 1);
            return Step::new(state, Token::ClosingTagOpening, 0, 2);
        }
        let state = state.with_depth(state.open_depth + 1);
        return Step::new(state, Token::LeftBracket, 0, 1);
    }

    // The first byte always belongs to the run, even a stray `[`.
    let len = bytes[1..]
        .iter()
        .position(|&b| b == b'[' || b == b'\n')
        .map_or(bytes.len(), |p| p + 1);
    Step::new(state, Token::Text, 0, len).with_payload(&rest[..len])
}

fn scan_tag_name(state: LexState, rest: &str, skipped: usize, at: usize) -> Result<Step<'_>> {
    match match_tag_name(rest) {
        Some(tag) => {
            let name = tag.name();
            let state = state.with_mode(Mode::TagArgs);
            Ok(Step::new(state, Token::Id, skipped, name.len()).with_payload(name))
        }
        None => Err(LexError::new(
            ErrorCode::UnknownTagName,
            "Expected a tag name",
            Span::new(at, at + first_char_len(rest)),
        )),
    }
}

fn scan_tag_args(state: LexState, rest: &str, skipped: usize, at: usize) -> Result<Step<'_>> {
    match rest.as_bytes()[0] {
        b']' => {
            let state = state.with_mode(Mode::Init);
            Ok(Step::new(state, Token::RightBracket, skipped, 1))
        }
        b'=' => {
            let state = state.with_mode(Mode::ArgValue);
            Ok(Step::new(state, Token::Equal, skipped, 1))
        }
        _ => {
            let len = count_while(rest.as_bytes(), is_identifier_byte);
            if len == 0 {
                let ch = rest.chars().next().unwrap_or('\u{fffd}');
                return Err(LexError::new(
                    ErrorCode::InvalidArgumentCharacter,
                    format!("Unexpected character '{}' inside a tag", ch),
                    Span::new(at, at + ch.len_utf8()),
                )
                .with_hint("Tag arguments are letters, digits and '_', or name=value pairs"));
            }
            Ok(Step::new(state, Token::Id, skipped, len).with_payload(&rest[..len]))
        }
    }
}

fn scan_arg_value(state: LexState, rest: &str, skipped: usize, at: usize) -> Result<Step<'_>> {
    let bytes = rest.as_bytes();

    if bytes[0] == b'"' || bytes[0] == b'\'' {
        return Err(LexError::new(
            ErrorCode::UnsupportedQuotedValue,
            "Quoted argument values are not supported",
            Span::new(at, at + 1),
        )
        .with_hint("Write the value without quotes, e.g. [url=http://example.com]"));
    }

    let len = count_while(bytes, |b| !matches!(b, b' ' | b']' | b'\n'));
    if len == 0 {
        return Err(LexError::new(
            ErrorCode::EmptyArgumentValue,
            "Missing value after '='",
            Span::new(at, at + 1),
        ));
    }

    let state = state.with_mode(Mode::TagArgs);
    Ok(Step::new(state, Token::Text, skipped, len).with_payload(&rest[..len]))
}

fn count_while(bytes: &[u8], pred: impl Fn(u8) -> bool) -> usize {
    bytes.iter().take_while(|&&b| pred(b)).count()
}

/// ASCII whitespace including vertical tab.
fn is_space(b: u8) -> bool {
    b.is_ascii_whitespace() || b == b'\x0B'
}

fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn first_char_len(s: &str) -> usize {
    s.chars().next().map_or(0, char::len_utf8)
}
