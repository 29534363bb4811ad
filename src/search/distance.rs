use log::trace;
use crate::analysis::token::{token_distance, Unit};
use crate::core::context::EvalContext;
use crate::core::error::Result;
use crate::query::ast::Range;
use crate::search::matches::{AllMatches, StringMatch, StringMatches};

/// distance: consecutive includes, in document order, are a permitted number of units apart
pub struct DistanceMatches<'a> {
    range: Range,
    unit: Unit,
    arg: Box<AllMatches<'a>>,
    excludes: StringMatches<'a>,
}

impl<'a> DistanceMatches<'a> {
    pub fn new(range: Range, unit: Unit, arg: AllMatches<'a>) -> Self {
        DistanceMatches {
            range,
            unit,
            arg: Box::new(arg),
            excludes: Vec::new(),
        }
    }

    pub fn next(&mut self, ctx: &EvalContext) -> Result<bool> {
        self.excludes.clear();

        loop {
            if !self.arg.next(ctx)? {
                return Ok(false);
            }

            let includes = self.arg.includes();
            if self.gaps_in_range(includes) {
                let (range, unit) = (self.range, self.unit);
                self.excludes.extend(self.arg.excludes().iter().filter(|e| {
                    includes
                        .iter()
                        .any(|i| range.contains(token_distance(e.token, i.token, unit)))
                }));
                return Ok(true);
            }

            trace!("distance {:?} {:?} rejected a match", self.range, self.unit);
            ctx.check_interrupt()?;
        }
    }

    fn gaps_in_range(&self, includes: &[StringMatch]) -> bool {
        if includes.len() < 2 {
            return true;
        }
        let mut sorted: Vec<&StringMatch> = includes.iter().collect();
        sorted.sort_by_key(|m| m.position());
        sorted.windows(2).all(|pair| {
            // Two includes on one word occurrence are never a distance apart
            if self.unit == Unit::Word && pair[0].position() == pair[1].position() {
                return false;
            }
            self.range.contains(token_distance(pair[0].token, pair[1].token, self.unit))
        })
    }

    pub fn includes(&self) -> &[StringMatch<'a>] {
        self.arg.includes()
    }

    pub fn excludes(&self) -> &[StringMatch<'a>] {
        &self.excludes
    }
}
