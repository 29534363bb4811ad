use std::collections::HashSet;
use log::trace;
use crate::analysis::token::{token_unit, Unit};
use crate::core::context::EvalContext;
use crate::core::error::Result;
use crate::search::matches::{AllMatches, StringMatch, StringMatches};

/// same sentence/paragraph: every include shares one unit value
pub struct ScopeSameMatches<'a> {
    unit: Unit,
    arg: Box<AllMatches<'a>>,
    excludes: StringMatches<'a>,
}

impl<'a> ScopeSameMatches<'a> {
    pub fn new(unit: Unit, arg: AllMatches<'a>) -> Self {
        ScopeSameMatches {
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
            let shared = includes.first().map(|m| token_unit(m.token, self.unit));
            let same = includes
                .iter()
                .all(|m| Some(token_unit(m.token, self.unit)) == shared);

            if same {
                let excludes = self.arg.excludes().iter();
                match shared {
                    Some(value) => self.excludes.extend(
                        excludes.filter(|m| token_unit(m.token, self.unit) == value),
                    ),
                    None => self.excludes.extend(excludes),
                }
                return Ok(true);
            }

            trace!("same {:?} rejected a match", self.unit);
            ctx.check_interrupt()?;
        }
    }

    pub fn includes(&self) -> &[StringMatch<'a>] {
        self.arg.includes()
    }

    pub fn excludes(&self) -> &[StringMatch<'a>] {
        &self.excludes
    }
}

/// different sentence/paragraph: includes have pairwise distinct unit values
pub struct ScopeDifferentMatches<'a> {
    unit: Unit,
    arg: Box<AllMatches<'a>>,
    seen: HashSet<u32>,
    excludes: StringMatches<'a>,
}

impl<'a> ScopeDifferentMatches<'a> {
    pub fn new(unit: Unit, arg: AllMatches<'a>) -> Self {
        ScopeDifferentMatches {
            unit,
            arg: Box::new(arg),
            seen: HashSet::new(),
            excludes: Vec::new(),
        }
    }

    pub fn next(&mut self, ctx: &EvalContext) -> Result<bool> {
        self.excludes.clear();

        loop {
            if !self.arg.next(ctx)? {
                return Ok(false);
            }

            self.seen.clear();
            let unit = self.unit;
            let seen = &mut self.seen;
            let distinct = self
                .arg
                .includes()
                .iter()
                .all(|m| seen.insert(token_unit(m.token, unit)));

            if distinct {
                let excludes = self.arg.excludes().iter();
                if self.seen.is_empty() {
                    self.excludes.extend(excludes);
                } else {
                    let seen = &self.seen;
                    self.excludes
                        .extend(excludes.filter(|m| seen.contains(&token_unit(m.token, unit))));
                }
                return Ok(true);
            }

            trace!("different {:?} rejected a match", self.unit);
            ctx.check_interrupt()?;
        }
    }

    pub fn includes(&self) -> &[StringMatch<'a>] {
        self.arg.includes()
    }

    pub fn excludes(&self) -> &[StringMatch<'a>] {
        &self.excludes
    }
}
