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

//! bblex - dump the token stream of a BBCode document.

use clap::{Parser, ValueEnum};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use bbcode_lexer::{format_error, render, tokenize};

/// bblex - Tokenize BBCode-style markup
#[derive(Parser, Debug)]
#[command(name = "bblex")]
#[command(version)]
#[command(about = "Tokenize BBCode-style markup and print the token stream")]
#[command(long_about = r#"
bblex runs the BBCode lexer over a document and prints one token per line,
the way a grammar parser would receive them.

Recognized tags: url, img, b, i, u, s, quote, code

Example usage:
  bblex post.bb
  bblex post.bb --format json
  cat post.bb | bblex -
  bblex post.bb --render
"#)]
struct Cli {
    /// Document to tokenize, or '-' for standard input
    input: PathBuf,

    /// Output format for the token stream
    #[arg(short, long, value_enum, default_value_t = Format::Plain)]
    format: Format,

    /// Print the markup rebuilt from the tokens instead of the tokens
    #[arg(short, long)]
    render: bool,

    /// Enable verbose (debug) logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// `KIND "payload" @ start..end`
    Plain,
    /// One JSON object per line
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_directive = if cli.verbose {
        "bbcode_lexer=debug,bblex=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with_writer(std::io::stderr)
        .init();

    let is_stdin = cli.input.as_os_str() == "-";
    let filename = if is_stdin {
        "<stdin>".to_string()
    } else {
        cli.input
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "<input>".to_string())
    };

    let source = match read_source(&cli.input, is_stdin) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: Cannot read {}: {}", cli.input.display(), e);
            return ExitCode::from(3);
        }
    };
    tracing::debug!(file = %filename, bytes = source.len(), "read input");

    let tokens = match tokenize(&source) {
        Ok(tokens) => tokens,
        Err(e) => {
            eprint!("{}", format_error(&e, &source, Some(&filename)));
            return ExitCode::from(1);
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let written = if cli.render {
        out.write_all(render(&tokens).as_bytes())
    } else {
        tokens.iter().try_for_each(|token| match cli.format {
            Format::Plain => writeln!(out, "{}", token),
            Format::Json => {
                let line = serde_json::to_string(token).map_err(std::io::Error::from)?;
                writeln!(out, "{}", line)
            }
        })
    };

    if let Err(e) = written.and_then(|()| out.flush()) {
        eprintln!("Error: Cannot write output: {}", e);
        return ExitCode::from(3);
    }

    ExitCode::SUCCESS
}

fn read_source(path: &Path, is_stdin: bool) -> std::io::Result<String> {
    if is_stdin {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        std::fs::read_to_string(path)
    }
}
