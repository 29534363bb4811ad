use serde::{Serialize, Deserialize};
use crate::analysis::token::Unit;
use crate::core::error::{Error, ErrorKind, Result};

/// Full-text selection tree handed over by the query compiler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    Word(String),                                 // Single query word
    Words(WordsQuery),                            // Query strings, tokenized at optimize time
    And(Vec<Selection>),                          // ftand
    Or(Vec<Selection>),                           // ftor
    MildNot(Box<Selection>, Box<Selection>),      // left not in right
    Not(Box<Selection>),                          // ftnot
    Order(Box<Selection>),                        // ordered
    Scope(ScopeQuery),                            // same/different sentence|paragraph
    Content(ContentQuery),                        // at start, at end, entire content
    Distance(DistanceQuery),                      // distance <range> <unit>
    Window(WindowQuery),                          // window <n> <unit>
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnyAllOption {
    AnyWord,
    AllWords,
    Phrase,
    Any,
    All,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordsQuery {
    pub terms: Vec<String>,
    pub option: AnyAllOption,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScopeKind {
    Same,
    Different,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeQuery {
    pub arg: Box<Selection>,
    pub kind: ScopeKind,
    pub unit: Unit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentKind {
    AtStart,
    AtEnd,
    Entire,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentQuery {
    pub arg: Box<Selection>,
    pub kind: ContentKind,
}

/// Bounds on a unit distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Range {
    Exactly(u32),
    AtLeast(u32),
    AtMost(u32),
    FromTo(u32, u32),
}

impl Range {
    pub fn contains(&self, actual: u32) -> bool {
        match *self {
            Range::Exactly(n) => actual == n,
            Range::AtLeast(n) => actual >= n,
            Range::AtMost(n) => actual <= n,
            Range::FromTo(from, to) => from <= actual && actual <= to,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceQuery {
    pub arg: Box<Selection>,
    pub range: Range,
    pub unit: Unit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowQuery {
    pub arg: Box<Selection>,
    pub width: u32,
    pub unit: Unit,
}

impl Selection {
    pub fn word(term: impl Into<String>) -> Self {
        Selection::Word(term.into())
    }

    pub fn words<S: Into<String>>(terms: impl IntoIterator<Item = S>, option: AnyAllOption) -> Self {
        Selection::Words(WordsQuery {
            terms: terms.into_iter().map(Into::into).collect(),
            option,
        })
    }

    pub fn phrase(text: impl Into<String>) -> Self {
        let text: String = text.into();
        Selection::words([text], AnyAllOption::Phrase)
    }

    pub fn and(args: Vec<Selection>) -> Self {
        Selection::And(args)
    }

    pub fn or(args: Vec<Selection>) -> Self {
        Selection::Or(args)
    }

    pub fn mild_not(left: Selection, right: Selection) -> Self {
        Selection::MildNot(Box::new(left), Box::new(right))
    }

    pub fn not(arg: Selection) -> Self {
        Selection::Not(Box::new(arg))
    }

    pub fn order(arg: Selection) -> Self {
        Selection::Order(Box::new(arg))
    }

    pub fn scope(arg: Selection, kind: ScopeKind, unit: Unit) -> Self {
        Selection::Scope(ScopeQuery {
            arg: Box::new(arg),
            kind,
            unit,
        })
    }

    pub fn content(arg: Selection, kind: ContentKind) -> Self {
        Selection::Content(ContentQuery {
            arg: Box::new(arg),
            kind,
        })
    }

    pub fn distance(arg: Selection, range: Range, unit: Unit) -> Self {
        Selection::Distance(DistanceQuery {
            arg: Box::new(arg),
            range,
            unit,
        })
    }

    pub fn window(arg: Selection, width: u32, unit: Unit) -> Self {
        Selection::Window(WindowQuery {
            arg: Box::new(arg),
            width,
            unit,
        })
    }

    pub fn is_word(&self) -> bool {
        matches!(self, Selection::Word(_))
    }

    pub fn children(&self) -> Vec<&Selection> {
        match self {
            Selection::Word(_) | Selection::Words(_) => Vec::new(),
            Selection::And(args) | Selection::Or(args) => args.iter().collect(),
            Selection::MildNot(left, right) => vec![left.as_ref(), right.as_ref()],
            Selection::Not(arg) | Selection::Order(arg) => vec![arg.as_ref()],
            Selection::Scope(q) => vec![q.arg.as_ref()],
            Selection::Content(q) => vec![q.arg.as_ref()],
            Selection::Distance(q) => vec![q.arg.as_ref()],
            Selection::Window(q) => vec![q.arg.as_ref()],
        }
    }

    /// Reject parameters no evaluation could honour.
    pub fn validate(&self) -> Result<()> {
        match self {
            Selection::Distance(q) => {
                if let Range::FromTo(from, to) = q.range {
                    if from > to {
                        return Err(Error::new(
                            ErrorKind::InvalidInput,
                            format!("distance range from {} to {} is empty", from, to),
                        ));
                    }
                }
            }
            Selection::Window(q) if q.width == 0 => {
                return Err(Error::new(
                    ErrorKind::InvalidInput,
                    "window width must be at least 1".to_string(),
                ));
            }
            _ => {}
        }

        for child in self.children() {
            child.validate()?;
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let selection: Selection = serde_json::from_str(json)?;
        selection.validate()?;
        Ok(selection)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_contains() {
        assert!(Range::Exactly(0).contains(0));
        assert!(!Range::Exactly(0).contains(1));
        assert!(Range::AtLeast(2).contains(5));
        assert!(Range::AtMost(2).contains(0));
        assert!(Range::FromTo(1, 3).contains(3));
        assert!(!Range::FromTo(1, 3).contains(4));
    }

    #[test]
    fn test_validate_rejects_bad_parameters() {
        let bad_range = Selection::distance(Selection::word("a"), Range::FromTo(4, 2), Unit::Word);
        assert_eq!(bad_range.validate().unwrap_err().kind, ErrorKind::InvalidInput);

        let nested = Selection::or(vec![
            Selection::word("a"),
            Selection::window(Selection::word("b"), 0, Unit::Sentence),
        ]);
        assert_eq!(nested.validate().unwrap_err().kind, ErrorKind::InvalidInput);
    }

    #[test]
    fn test_from_json() {
        let json = r#"{"Or":[{"Word":"cat"},{"Word":"dog"}]}"#;
        let selection = Selection::from_json(json).unwrap();
        assert_eq!(selection, Selection::or(vec![Selection::word("cat"), Selection::word("dog")]));

        let err = Selection::from_json("{\"Word\":").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Parse);
    }
}
