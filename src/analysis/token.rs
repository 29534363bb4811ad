use std::borrow::Cow;
use serde::{Serialize, Deserialize};

/// A single word occurrence inside a searchable scope
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub word: String,      // Word as it appears in the text
    pub position: u32,     // Sequential word position, starting at 0
    pub sentence: u32,     // Sentence index, non-decreasing
    pub paragraph: u32,    // Paragraph index, non-decreasing
}

impl Token {
    pub fn new(word: String, position: u32, sentence: u32, paragraph: u32) -> Self {
        Token {
            word,
            position,
            sentence,
            paragraph,
        }
    }
}

/// Case handling applied to words before they are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CasePolicy {
    Sensitive,
    Upper,
    Lower,
    #[default]
    Fold,
}

impl CasePolicy {
    pub fn fold<'a>(&self, word: &'a str) -> Cow<'a, str> {
        match self {
            CasePolicy::Sensitive => Cow::Borrowed(word),
            CasePolicy::Upper => {
                if word.chars().any(|c| c.is_lowercase()) {
                    Cow::Owned(word.to_uppercase())
                } else {
                    Cow::Borrowed(word)
                }
            }
            CasePolicy::Lower => {
                if word.chars().any(|c| c.is_uppercase()) {
                    Cow::Owned(word.to_lowercase())
                } else {
                    Cow::Borrowed(word)
                }
            }
            // Uppercasing first expands ligatures and sharp s before lowering
            CasePolicy::Fold => {
                if word.is_ascii() && !word.bytes().any(|b| b.is_ascii_uppercase()) {
                    Cow::Borrowed(word)
                } else {
                    Cow::Owned(word.to_uppercase().to_lowercase())
                }
            }
        }
    }

    /// True when words equal under `other` are also equal under `self`,
    /// so a store keyed by `self` can answer lookups made under `other`.
    pub fn covers(&self, other: CasePolicy) -> bool {
        match (self, other) {
            (a, b) if *a == b => true,
            (CasePolicy::Fold, _) => true,
            (_, CasePolicy::Sensitive) => true,
            _ => false,
        }
    }
}

/// Granularity used by scope, distance and window predicates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    Word,
    Sentence,
    Paragraph,
}

pub fn token_unit(token: &Token, unit: Unit) -> u32 {
    match unit {
        Unit::Word => token.position,
        Unit::Sentence => token.sentence,
        Unit::Paragraph => token.paragraph,
    }
}

/// Number of units strictly between two tokens (0 when adjacent or shared).
pub fn token_distance(a: &Token, b: &Token, unit: Unit) -> u32 {
    let a = token_unit(a, unit);
    let b = token_unit(b, unit);
    a.abs_diff(b).saturating_sub(1)
}
