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

//! Fuzz target for the BBCode lexer.
//!
//! This fuzzer feeds random bytes to the lexer to find crashes, panics,
//! or token streams that never reach the end.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_lexer
//!
//! Run for a specific duration:
//!   cargo +nightly fuzz run fuzz_lexer -- -max_total_time=60

#![no_main]

use bbcode_lexer::{render, tokenize, Lexer, Token, TokenValue};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };

    // Each call consumes input or drains one open tag
    let mut lexer = Lexer::new(source);
    let mut value = TokenValue::new();
    let mut calls = 0;
    loop {
        match lexer.lex(&mut value) {
            Ok(Token::End) | Err(_) => break,
            Ok(_) => {}
        }
        calls += 1;
        assert!(calls <= 2 * source.len() + 1, "lexer does not terminate");
    }

    // Rebuilt markup must lex to the same tokens
    if let Ok(tokens) = tokenize(source) {
        let again = tokenize(&render(&tokens)).expect("rendered markup lexes");
        let kinds = |ts: &[bbcode_lexer::SpannedToken]| {
            ts.iter()
                .map(|t| (t.token, t.value.clone()))
                .collect::<Vec<_>>()
        };
        assert_eq!(kinds(&again), kinds(&tokens));
    }
});
