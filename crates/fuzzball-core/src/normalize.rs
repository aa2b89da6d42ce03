//! Ignore-pattern stripping and code point decomposition
//!
//! Platform-specific implementations:
//! - Native: SIMD substring search via memchr
//! - Fallback: `str::find`
//!
//! Patterns are removed in a single left-to-right pass. At each step the
//! earliest occurrence of any pattern is removed; when two patterns start at
//! the same offset the one listed first wins. Text produced by a removal is
//! never rescanned for new occurrences.

use std::borrow::Cow;

use crate::sequence::CodePointSequence;

#[derive(Debug, Clone)]
struct Pattern {
    text: String,
    #[cfg(feature = "simd")]
    finder: memchr::memmem::Finder<'static>,
}

impl Pattern {
    fn new(text: String) -> Self {
        Self {
            #[cfg(feature = "simd")]
            finder: memchr::memmem::Finder::new(text.as_bytes()).into_owned(),
            text,
        }
    }

    #[cfg(feature = "simd")]
    #[inline]
    fn find(&self, haystack: &str) -> Option<usize> {
        self.finder.find(haystack.as_bytes())
    }

    #[cfg(not(feature = "simd"))]
    #[inline]
    fn find(&self, haystack: &str) -> Option<usize> {
        haystack.find(self.text.as_str())
    }
}

/// Turns raw entries into code point sequences
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    patterns: Vec<Pattern>,
}

impl Normalizer {
    /// Build a normalizer from literal ignore patterns.
    ///
    /// Empty patterns are dropped; they would match everywhere and remove nothing.
    pub fn new<I, S>(ignore: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns = ignore
            .into_iter()
            .map(Into::into)
            .filter(|p: &String| !p.is_empty())
            .map(Pattern::new)
            .collect();
        Self { patterns }
    }

    /// Patterns in application order
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.text.as_str())
    }

    pub fn is_passthrough(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Remove every occurrence of every ignore pattern
    pub fn strip<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.patterns.is_empty() {
            return Cow::Borrowed(text);
        }

        let mut out: Option<String> = None;
        let mut rest = text;

        loop {
            let mut earliest: Option<(usize, usize)> = None;
            for pattern in &self.patterns {
                if let Some(pos) = pattern.find(rest) {
                    if earliest.map_or(true, |(best, _)| pos < best) {
                        earliest = Some((pos, pattern.text.len()));
                    }
                }
            }

            match earliest {
                Some((pos, len)) => {
                    let buf = out.get_or_insert_with(|| String::with_capacity(text.len()));
                    buf.push_str(&rest[..pos]);
                    rest = &rest[pos + len..];
                }
                None => break,
            }
        }

        match out {
            Some(mut buf) => {
                buf.push_str(rest);
                Cow::Owned(buf)
            }
            None => Cow::Borrowed(text),
        }
    }

    /// Strip ignore patterns, then decompose into code points
    pub fn sequence(&self, text: &str) -> CodePointSequence {
        CodePointSequence::new(&self.strip(text))
    }
}
