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

//! Error types for the BBCode lexer.
//!
//! Tag imbalance is never an error here: unclosed and stray closing tags are
//! reported in-band as token codes. The types in this module cover input the
//! lexer refuses to tokenize, plus syntax errors handed back by a parser.

use ariadne::{Config, Label, Report, ReportKind, Source};
use thiserror::Error;

/// A source span representing a range in the source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Create an empty span at a position.
    pub fn point(at: usize) -> Self {
        Self { start: at, end: at }
    }

    /// Get the length of this span.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Error codes reported by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Lexical errors (E001-E004)
    UnsupportedQuotedValue,
    EmptyArgumentValue,
    InvalidArgumentCharacter,
    UnknownTagName,

    // Reported by the parser (E100)
    Syntax,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl ErrorCode {
    /// Get the string code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::UnsupportedQuotedValue => "E001",
            ErrorCode::EmptyArgumentValue => "E002",
            ErrorCode::InvalidArgumentCharacter => "E003",
            ErrorCode::UnknownTagName => "E004",
            ErrorCode::Syntax => "E100",
        }
    }
}

/// A lexer error with source location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{code}] {message}")]
pub struct LexError {
    /// The error code.
    pub code: ErrorCode,
    /// The error message.
    pub message: String,
    /// The source span where the error occurred.
    pub span: Span,
    /// Optional hint for fixing the error.
    pub hint: Option<String>,
}

impl LexError {
    /// Create a new lexer error.
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        Self {
            code,
            message: message.into(),
            span,
            hint: None,
        }
    }

    /// Add a hint to this error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Get the error code string.
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }
}

/// Result type for lexer operations.
pub type Result<T> = std::result::Result<T, LexError>;

/// Source location with line and column information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
}

impl SourceLocation {
    /// Calculate line and column from a byte offset in source code.
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let mut offset = offset.min(source.len());
        while !source.is_char_boundary(offset) {
            offset -= 1;
        }
        let before = &source[..offset];

        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[line_start..].chars().count() + 1;

        Self { line, column }
    }
}

/// Format an error with source context.
pub fn format_error(error: &LexError, source: &str, filename: Option<&str>) -> String {
    let filename = filename.unwrap_or("<input>");
    let start = error.span.start.min(source.len());
    let end = error.span.end.clamp(start, source.len());

    let mut report = Report::build(ReportKind::Error, filename, start)
        .with_code(error.code_str())
        .with_message(&error.message)
        .with_label(Label::new((filename, start..end)).with_message(error.code.label()))
        .with_config(Config::default().with_color(false));

    if let Some(hint) = &error.hint {
        report = report.with_help(hint);
    }

    let mut output = Vec::new();
    match report
        .finish()
        .write((filename, Source::from(source)), &mut output)
    {
        Ok(()) => String::from_utf8_lossy(&output).into_owned(),
        Err(_) => {
            let loc = SourceLocation::from_offset(source, start);
            format!(
                "error[{}]: {}\n  --> {}:{}:{}\n",
                error.code_str(),
                error.message,
                filename,
                loc.line,
                loc.column
            )
        }
    }
}

impl ErrorCode {
    /// Short label shown under the offending span.
    fn label(&self) -> &'static str {
        match self {
            ErrorCode::UnsupportedQuotedValue => "quoted value",
            ErrorCode::EmptyArgumentValue => "expected a value after '='",
            ErrorCode::InvalidArgumentCharacter => "not valid inside a tag",
            ErrorCode::UnknownTagName => "expected a tag name",
            ErrorCode::Syntax => "reported here",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_creation() {
        let span = Span::new(10, 20);
        assert_eq!(span.start, 10);
        assert_eq!(span.end, 20);
        assert_eq!(span.len(), 10);
        assert!(!span.is_empty());
        assert!(Span::point(4).is_empty());
    }

    #[test]
    fn test_error_code() {
        assert_eq!(ErrorCode::UnsupportedQuotedValue.code(), "E001");
        assert_eq!(ErrorCode::UnknownTagName.code(), "E004");
        assert_eq!(ErrorCode::Syntax.code(), "E100");
    }

    #[test]
    fn test_lex_error_display() {
        let error = LexError::new(
            ErrorCode::EmptyArgumentValue,
            "Missing value after '='",
            Span::new(4, 5),
        )
        .with_hint("Write a value such as [url=http://example.com]");

        assert_eq!(error.to_string(), "[E002] Missing value after '='");
        assert_eq!(error.code_str(), "E002");
        assert!(error.hint.is_some());
    }

    #[test]
    fn test_source_location() {
        let source = "first\nsecond [b]";
        let loc = SourceLocation::from_offset(source, 13);
        assert_eq!(loc, SourceLocation { line: 2, column: 8 });
        assert_eq!(
            SourceLocation::from_offset(source, 999),
            SourceLocation { line: 2, column: 11 }
        );
    }

    #[test]
    fn test_format_error_mentions_code_and_file() {
        let source = "[url=\"x\"]";
        let error = LexError::new(
            ErrorCode::UnsupportedQuotedValue,
            "Quoted argument values are not supported",
            Span::new(5, 6),
        );
        let output = format_error(&error, source, Some("post.bb"));
        assert!(output.contains("E001"));
        assert!(output.contains("post.bb"));
        assert!(output.contains("Quoted argument values are not supported"));
    }
}
