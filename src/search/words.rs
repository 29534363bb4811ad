use crate::core::context::EvalContext;
use crate::core::error::Result;
use crate::index::store::Occurrences;
use crate::search::matches::{StringMatch, StringMatches};

/// Leaf cursor: one match per stored occurrence of a query word
pub struct StringSearchMatches<'a> {
    query_pos: u32,
    occurrences: Option<Occurrences<'a>>,
    includes: StringMatches<'a>,
}

impl<'a> StringSearchMatches<'a> {
    pub fn new(query_pos: u32, occurrences: Option<Occurrences<'a>>) -> Self {
        StringSearchMatches {
            query_pos,
            occurrences,
            includes: Vec::with_capacity(1),
        }
    }

    pub fn next(&mut self, _ctx: &EvalContext) -> Result<bool> {
        self.includes.clear();
        let Some(occurrences) = self.occurrences.as_mut() else {
            return Ok(false);
        };

        match occurrences.next() {
            Some(token) => {
                self.includes.push(StringMatch::new(token, self.query_pos));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn includes(&self) -> &[StringMatch<'a>] {
        &self.includes
    }

    pub fn excludes(&self) -> &[StringMatch<'a>] {
        &[]
    }
}
