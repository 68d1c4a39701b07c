//! Query and document text normalization.
//!
//! Text is split on Unicode word boundaries (UAX #29), every character that
//! is not a letter, digit, or whitespace is removed from each segment, and
//! the surviving segments are joined with single spaces. Stripping can join
//! two characters that segment apart (`a_ァ` becomes `aァ`), so the pass is
//! repeated until the output is stable. The output is safe to hash and to
//! feed into the ranking index.

use std::sync::LazyLock;

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::traits::INormalizer;

/// Everything that is not a Unicode letter, digit, or whitespace.
static STRIP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}\s]").unwrap());

/// Default normalizer backed by `unicode-segmentation` word bounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeNormalizer;

impl UnicodeNormalizer {
    pub fn new() -> Self {
        Self
    }
}

impl INormalizer for UnicodeNormalizer {
    fn normalize(&self, raw: &str) -> String {
        normalize(raw)
    }
}

/// Normalize `raw` into a canonical token string.
///
/// Only the first pass removes characters; later passes can only insert
/// spaces at word boundaries, so this settles after a few passes.
pub fn normalize(raw: &str) -> String {
    let mut current = segment_and_strip(raw);
    loop {
        let next = segment_and_strip(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn segment_and_strip(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for segment in raw.split_word_bounds() {
        let cleaned = STRIP_RE.replace_all(segment, "");
        // Whitespace-only segments carry no token.
        let token = cleaned.trim();
        if token.is_empty() {
            continue;
        }
        // Keep separators to exactly one space.
        for part in token.split_whitespace() {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(part);
        }
    }
    out
}
