use log::warn;
use crate::analysis::segmenter::{Marker, Segmenter, UnicodeSegmenter};
use crate::analysis::token::Token;
use crate::core::error::{Error, ErrorKind, Result};

pub trait Tokenizer: Send + Sync {
    fn tokenize<'a>(&'a self, text: &'a str) -> TokenStream<'a>;

    fn name(&self) -> &str;

    /// Words of a query string, in order.
    fn words(&self, text: &str) -> Result<Vec<String>> {
        self.tokenize(text)
            .map(|token| token.map(|t| t.word))
            .collect()
    }
}

/// Standard Unicode tokenizer
pub struct StandardTokenizer {
    pub segmenter: Box<dyn Segmenter>,
    pub max_token_length: usize,
}

impl Default for StandardTokenizer {
    fn default() -> Self {
        StandardTokenizer {
            segmenter: Box::new(UnicodeSegmenter),
            max_token_length: 255,
        }
    }
}

impl StandardTokenizer {
    pub fn new(segmenter: Box<dyn Segmenter>, max_token_length: usize) -> Self {
        StandardTokenizer {
            segmenter,
            max_token_length,
        }
    }
}

impl Tokenizer for StandardTokenizer {
    fn tokenize<'a>(&'a self, text: &'a str) -> TokenStream<'a> {
        TokenStream::new(self.segmenter.segment(text), self.max_token_length)
    }

    fn name(&self) -> &str {
        "standard"
    }
}

/// Lazy, single-pass token sequence over a marker stream.
pub struct TokenStream<'a> {
    markers: Box<dyn Iterator<Item = Marker> + 'a>,
    max_token_length: usize,
    span: String,
    position: u32,
    sentence: u32,
    paragraph: u32,
    ended: bool,
    finished: bool,
}

impl<'a> TokenStream<'a> {
    pub fn new(markers: Box<dyn Iterator<Item = Marker> + 'a>, max_token_length: usize) -> Self {
        TokenStream {
            markers,
            max_token_length,
            span: String::new(),
            position: 0,
            sentence: 0,
            paragraph: 0,
            ended: false,
            finished: false,
        }
    }

    /// Closes the accumulated span, returning a token unless it is empty, noise or oversized.
    fn close_span(&mut self) -> Option<Token> {
        if self.span.is_empty() {
            return None;
        }
        let word = std::mem::take(&mut self.span);

        // Whitespace and punctuation runs between word boundaries carry no word
        if !word.chars().any(char::is_alphanumeric) {
            return None;
        }
        if word.len() > self.max_token_length {
            return None;
        }

        let token = Token::new(word, self.position, self.sentence, self.paragraph);
        self.position += 1;
        Some(token)
    }

    fn violation(&mut self, marker: Marker) -> Option<Result<Token>> {
        self.finished = true;
        warn!("segmenter produced {:?} after the end of stream", marker);
        Some(Err(Error::new(
            ErrorKind::UnsupportedSegmenterOutput,
            format!("marker {:?} after end of stream", marker),
        )))
    }
}

impl<'a> Iterator for TokenStream<'a> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Result<Token>> {
        if self.finished {
            return None;
        }

        loop {
            let marker = match self.markers.next() {
                Some(marker) => marker,
                None => {
                    // A stream that stops without End is treated as ended
                    self.finished = true;
                    return self.close_span().map(Ok);
                }
            };

            if self.ended {
                return self.violation(marker);
            }

            match marker {
                Marker::Char(c) => self.span.push(c),
                Marker::WordBoundary => {
                    if let Some(token) = self.close_span() {
                        return Some(Ok(token));
                    }
                }
                Marker::SentenceBoundary => {
                    let token = self.close_span();
                    self.sentence += 1;
                    if let Some(token) = token {
                        return Some(Ok(token));
                    }
                }
                Marker::ParagraphBoundary => {
                    let token = self.close_span();
                    self.paragraph += 1;
                    if let Some(token) = token {
                        return Some(Ok(token));
                    }
                }
                Marker::End => {
                    self.ended = true;
                    if let Some(token) = self.close_span() {
                        return Some(Ok(token));
                    }
                }
            }
        }
    }
}
