//! Boundary segmentation feeding the tokenizer.
//!
//! A segmenter turns text into a flat stream of [`Marker`]s: the codepoints
//! themselves, interleaved with word, sentence and paragraph boundaries, and
//! terminated by exactly one [`Marker::End`]. The tokenizer only relies on that
//! contract, so alternative segmenters can be plugged in.

use std::collections::VecDeque;
use std::str::Chars;
use unicode_segmentation::{UnicodeSegmentation, USentenceBounds, UWordBounds};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Char(char),
    WordBoundary,
    SentenceBoundary,
    ParagraphBoundary,
    End,
}

pub trait Segmenter: Send + Sync {
    fn segment<'a>(&self, text: &'a str) -> Box<dyn Iterator<Item = Marker> + 'a>;

    fn name(&self) -> &str;
}

/// UAX #29 segmenter
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeSegmenter;

impl Segmenter for UnicodeSegmenter {
    fn segment<'a>(&self, text: &'a str) -> Box<dyn Iterator<Item = Marker> + 'a> {
        Box::new(UnicodeMarkers::new(text))
    }

    fn name(&self) -> &str {
        "unicode"
    }
}

/// Lazy marker stream over sentence bounds, then word bounds, then codepoints.
pub struct UnicodeMarkers<'a> {
    sentences: USentenceBounds<'a>,
    words: Option<UWordBounds<'a>>,
    chars: Option<Chars<'a>>,
    pending: VecDeque<Marker>,
    seen_word: bool,
    sentence_has_word: bool,
    line_breaks: u32,
    paragraph_separator: bool,
    wrapped: bool,
    ended: bool,
}

impl<'a> UnicodeMarkers<'a> {
    pub fn new(text: &'a str) -> Self {
        UnicodeMarkers {
            sentences: text.split_sentence_bounds(),
            words: None,
            chars: None,
            pending: VecDeque::new(),
            seen_word: false,
            sentence_has_word: false,
            line_breaks: 0,
            paragraph_separator: false,
            wrapped: false,
            ended: false,
        }
    }

    fn start_segment(&mut self, segment: &'a str) {
        if segment.chars().any(char::is_alphanumeric) {
            // Boundaries are only reported between sentences and paragraphs that hold words
            if self.seen_word {
                if !self.sentence_has_word {
                    self.pending.push_back(Marker::SentenceBoundary);
                }
                if self.line_breaks >= 2 || self.paragraph_separator {
                    self.pending.push_back(Marker::ParagraphBoundary);
                }
            }
            self.line_breaks = 0;
            self.paragraph_separator = false;
            self.seen_word = true;
            self.sentence_has_word = true;
        } else {
            self.line_breaks += count_line_breaks(segment);
            if segment.contains('\u{2029}') {
                self.paragraph_separator = true;
            }
        }

        self.pending.push_back(Marker::WordBoundary);
        self.chars = Some(segment.chars());
    }
}

impl<'a> Iterator for UnicodeMarkers<'a> {
    type Item = Marker;

    fn next(&mut self) -> Option<Marker> {
        loop {
            if let Some(marker) = self.pending.pop_front() {
                return Some(marker);
            }

            if let Some(chars) = self.chars.as_mut() {
                match chars.next() {
                    Some(c) => return Some(Marker::Char(c)),
                    None => {
                        self.chars = None;
                        return Some(Marker::WordBoundary);
                    }
                }
            }

            if let Some(words) = self.words.as_mut() {
                match words.next() {
                    Some(segment) => {
                        self.start_segment(segment);
                        continue;
                    }
                    None => self.words = None,
                }
            }

            match self.sentences.next() {
                Some(sentence) => {
                    self.words = Some(sentence.split_word_bounds());
                    // A sentence cut only by a line wrap continues into the next bound
                    if !self.wrapped {
                        self.sentence_has_word = false;
                    }
                    self.wrapped = is_line_wrap(sentence);
                }
                None => {
                    if self.ended {
                        return None;
                    }
                    self.ended = true;
                    return Some(Marker::End);
                }
            }
        }
    }
}

/// True when a sentence bound ends in one line break with no terminal punctuation before it.
fn is_line_wrap(sentence: &str) -> bool {
    let body = sentence.trim_end();
    if body.is_empty() {
        return false;
    }
    let trailing = &sentence[body.len()..];
    let body = body.trim_end_matches(['"', '\'', ')', ']', '\u{201D}', '\u{2019}']);
    count_line_breaks(trailing) == 1
        && !trailing.contains('\u{2029}')
        && !body.ends_with(['.', '!', '?', '\u{2026}'])
}

/// CR LF counts once.
fn count_line_breaks(segment: &str) -> u32 {
    let mut count = 0;
    let mut chars = segment.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                count += 1;
            }
            '\n' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' => count += 1,
            _ => {}
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boundaries(text: &str) -> Vec<Marker> {
        UnicodeSegmenter
            .segment(text)
            .filter(|m| !matches!(m, Marker::Char(_) | Marker::WordBoundary))
            .collect()
    }

    #[test]
    fn test_single_end_marker() {
        let markers: Vec<Marker> = UnicodeSegmenter.segment("").collect();
        assert_eq!(markers, vec![Marker::End]);
    }

    #[test]
    fn test_word_is_bracketed() {
        let markers: Vec<Marker> = UnicodeSegmenter.segment("hi").collect();
        assert_eq!(
            markers,
            vec![
                Marker::WordBoundary,
                Marker::Char('h'),
                Marker::Char('i'),
                Marker::WordBoundary,
                Marker::End,
            ]
        );
    }

    #[test]
    fn test_sentence_and_paragraph_boundaries() {
        assert_eq!(
            boundaries("One two. Three.\n\nFour."),
            vec![
                Marker::SentenceBoundary,
                Marker::SentenceBoundary,
                Marker::ParagraphBoundary,
                Marker::End,
            ]
        );
    }

    #[test]
    fn test_wrapped_line_stays_in_sentence() {
        assert_eq!(boundaries("The quick\nbrown fox"), vec![Marker::End]);
        assert_eq!(boundaries("The quick\r\nbrown\nfox jumps"), vec![Marker::End]);
        assert_eq!(
            boundaries("The quick.\nBrown fox"),
            vec![Marker::SentenceBoundary, Marker::End]
        );
        assert_eq!(
            boundaries("The quick\n\nbrown fox"),
            vec![Marker::SentenceBoundary, Marker::ParagraphBoundary, Marker::End]
        );
    }

    #[test]
    fn test_line_wrap_detection() {
        assert!(is_line_wrap("The quick\n"));
        assert!(is_line_wrap("The quick \r\n"));
        assert!(!is_line_wrap("The quick.\n"));
        assert!(!is_line_wrap("\"Stop!\"\n"));
        assert!(!is_line_wrap("The quick\n\n"));
        assert!(!is_line_wrap("\n"));
        assert!(!is_line_wrap("The quick"));
    }

    #[test]
    fn test_leading_blank_lines_are_not_boundaries() {
        assert_eq!(boundaries("\n\n\nword"), vec![Marker::End]);
    }

    #[test]
    fn test_crlf_counts_once() {
        assert_eq!(count_line_breaks("\r\n"), 1);
        assert_eq!(count_line_breaks("\r\n\r\n"), 2);
        assert_eq!(count_line_breaks(" \n"), 1);
    }
}
