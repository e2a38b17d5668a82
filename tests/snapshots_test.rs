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

//! Snapshot tests for the BBCode lexer.
//!
//! These tests use the `insta` crate to capture and verify the token
//! streams produced for the conformance documents.

use bbcode_lexer::{tokenize, SpannedToken};

/// Format tokens for snapshot comparison.
fn format_tokens(tokens: &[SpannedToken]) -> String {
    tokens
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format tokens as JSON lines, the way `bblex --format json` prints them.
fn format_json(tokens: &[SpannedToken]) -> String {
    tokens
        .iter()
        .map(|t| serde_json::to_string(t).unwrap())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_lexer_snapshot_forum_post() {
    let tokens = tokenize(include_str!("conformance/forum_post.bb")).unwrap();
    insta::assert_snapshot!("lexer_forum_post", format_tokens(&tokens));
}

#[test]
fn test_lexer_snapshot_images() {
    let tokens = tokenize(include_str!("conformance/images.bb")).unwrap();
    insta::assert_snapshot!("lexer_images", format_tokens(&tokens));
}

#[test]
fn test_lexer_snapshot_code_block() {
    let tokens = tokenize(include_str!("conformance/code_block.bb")).unwrap();
    insta::assert_snapshot!("lexer_code_block", format_tokens(&tokens));
}

#[test]
fn test_lexer_snapshot_unbalanced() {
    let tokens = tokenize("[quote][b]x[/i][/b][/u]\n[s]end").unwrap();
    insta::assert_snapshot!("lexer_unbalanced", format_tokens(&tokens));
}

#[test]
fn test_lexer_snapshot_json() {
    let tokens = tokenize("[url=http://x]go[/url]").unwrap();
    insta::assert_snapshot!("lexer_json", format_json(&tokens));
}
