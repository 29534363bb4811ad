use std::collections::HashSet;
use log::{trace, warn};
use crate::core::context::EvalContext;
use crate::core::error::{Error, Result};
use crate::search::matches::{AllMatches, StringMatch};

enum RightOperand<'a> {
    Pending(Box<AllMatches<'a>>),
    Drained,
}

/// `left not in right`: left matches sharing no included position with any right match
pub struct MildNotMatches<'a> {
    left: Box<AllMatches<'a>>,
    right: RightOperand<'a>,
    bad_positions: HashSet<u32>,
}

impl<'a> MildNotMatches<'a> {
    pub fn new(left: AllMatches<'a>, right: AllMatches<'a>) -> Self {
        MildNotMatches {
            left: Box::new(left),
            right: RightOperand::Pending(Box::new(right)),
            bad_positions: HashSet::new(),
        }
    }

    pub fn next(&mut self, ctx: &EvalContext) -> Result<bool> {
        if let RightOperand::Pending(mut right) = std::mem::replace(&mut self.right, RightOperand::Drained) {
            while right.next(ctx)? {
                ctx.check_interrupt()?;
                if !right.excludes().is_empty() {
                    warn!("right operand of 'not in' produced exclusions");
                    return Err(Error::invalid_mild_not("right"));
                }
                self.bad_positions
                    .extend(right.includes().iter().map(StringMatch::position));
            }
        }

        loop {
            if !self.left.next(ctx)? {
                return Ok(false);
            }
            if !self.left.excludes().is_empty() {
                warn!("left operand of 'not in' produced exclusions");
                return Err(Error::invalid_mild_not("left"));
            }

            let clashes = self
                .left
                .includes()
                .iter()
                .any(|m| self.bad_positions.contains(&m.position()));
            if !clashes {
                return Ok(true);
            }

            trace!("'not in' rejected a match overlapping the right operand");
            ctx.check_interrupt()?;
        }
    }

    pub fn includes(&self) -> &[StringMatch<'a>] {
        self.left.includes()
    }

    pub fn excludes(&self) -> &[StringMatch<'a>] {
        self.left.excludes()
    }
}
