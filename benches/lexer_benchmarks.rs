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

//! Performance benchmarks for the BBCode lexer.
//!
//! Run with: cargo bench
//!
//! Results are saved to target/criterion/ with HTML reports.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use bbcode_lexer::{Lexer, Token, TokenValue};

// ============================================================================
// Benchmark Inputs
// ============================================================================

const POST: &str = "[quote=alice]Has anyone tried the [b]new[/b] release?[/quote]\n\
Yes! See [url=https://example.com/notes]the notes[/url] and [foo] brackets.\n\
[img width=320 height=200]https://example.com/cat.png[/img]\n";

/// A document made of `copies` forum posts.
fn build_input(copies: usize) -> String {
    POST.repeat(copies)
}

// ============================================================================
// Lexer Benchmarks
// ============================================================================

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer");

    for (name, copies) in [("small", 1), ("medium", 100), ("large", 10_000)] {
        let input = build_input(copies);
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::new("tokenize", name), &input, |b, src| {
            b.iter(|| bbcode_lexer::tokenize(black_box(src)))
        });
    }

    group.finish();
}

/// The pull interface a parser uses, without collecting tokens.
fn bench_pull(c: &mut Criterion) {
    let input = build_input(100);
    let mut group = c.benchmark_group("lexer");
    group.throughput(Throughput::Bytes(input.len() as u64));

    group.bench_function("pull/medium", |b| {
        b.iter(|| {
            let mut lexer = Lexer::new(black_box(&input));
            let mut value = TokenValue::new();
            let mut count = 0usize;
            while let Ok(token) = lexer.lex(&mut value) {
                count += 1;
                if token == Token::End {
                    break;
                }
            }
            count
        })
    });

    group.finish();
}

fn bench_unclosed(c: &mut Criterion) {
    let input = "[b][i][u]".repeat(1_000);
    c.bench_function("lexer/unclosed_drain", |b| {
        b.iter(|| bbcode_lexer::tokenize(black_box(&input)))
    });
}

criterion_group!(benches, bench_tokenize, bench_pull, bench_unclosed);
criterion_main!(benches);
