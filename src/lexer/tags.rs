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

//! The closed set of recognized tags and their matchers.
//!
//! A `[` only starts markup when one of these matchers accepts the bytes
//! that follow it. Anything else, such as `[foo]`, stays plain text.

use once_cell::sync::Lazy;
use regex::Regex;

/// A recognized tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// `[url]` - hyperlink.
    Url,
    /// `[img]` - inline image.
    Img,
    /// `[b]` - bold.
    Bold,
    /// `[i]` - italic.
    Italic,
    /// `[u]` - underline.
    Underline,
    /// `[s]` - strikethrough.
    Strike,
    /// `[quote]` - block quote.
    Quote,
    /// `[code]` - preformatted code.
    Code,
}

impl Tag {
    /// All tags in registry order. Matching tries them in this order and
    /// the first hit wins.
    pub const ALL: [Tag; 8] = [
        Tag::Url,
        Tag::Img,
        Tag::Bold,
        Tag::Italic,
        Tag::Underline,
        Tag::Strike,
        Tag::Quote,
        Tag::Code,
    ];

    /// The canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Tag::Url => "url",
            Tag::Img => "img",
            Tag::Bold => "b",
            Tag::Italic => "i",
            Tag::Underline => "u",
            Tag::Strike => "s",
            Tag::Quote => "quote",
            Tag::Code => "code",
        }
    }

    /// Look up a tag by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Tag> {
        Tag::ALL
            .iter()
            .copied()
            .find(|tag| tag.name().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One matcher per tag, in registry order.
///
/// Each accepts `[name` or `[/name`, with optional blanks before the name,
/// followed by `]`, `=`, or a blank.
static TAG_MATCHERS: Lazy<Vec<(Tag, Regex)>> = Lazy::new(|| {
    Tag::ALL
        .iter()
        .map(|&tag| {
            let pattern = format!(r"(?i-u)^\[/?[ \t]*{}[\]= \t]", regex::escape(tag.name()));
            let regex = Regex::new(&pattern).expect("tag matcher pattern is valid");
            (tag, regex)
        })
        .collect()
});

/// Check whether `input`, which starts at a `[`, opens or closes a
/// recognized tag.
pub fn match_tag_start(input: &str) -> Option<Tag> {
    TAG_MATCHERS
        .iter()
        .find(|(_, regex)| regex.is_match(input))
        .map(|(tag, _)| *tag)
}

/// Match a tag name at the start of `input`, ignoring ASCII case.
///
/// The name must be followed by a tag delimiter or the end of input, so
/// `url` never matches as `u`.
pub fn match_tag_name(input: &str) -> Option<Tag> {
    let bytes = input.as_bytes();
    Tag::ALL.iter().copied().find(|tag| {
        let name = tag.name().as_bytes();
        bytes.len() >= name.len()
            && bytes[..name.len()].eq_ignore_ascii_case(name)
            && bytes.get(name.len()).map_or(true, |&b| is_tag_delimiter(b))
    })
}

/// Bytes that may follow a tag name.
pub fn is_tag_delimiter(b: u8) -> bool {
    matches!(b, b']' | b'=' | b' ' | b'\t')
}

/// Blanks allowed between `[` or `[/` and the tag name.
pub fn is_blank(b: u8) -> bool {
    matches!(b, b' ' | b'\t')
}
