use crate::core::context::EvalContext;
use crate::core::error::Result;
use crate::search::matches::{AllMatches, StringMatch, StringMatches};

enum Operand<'a> {
    Pending(Box<AllMatches<'a>>),
    Done,
}

/// ftnot: a single match with the operand's includes and excludes swapped
pub struct UnaryNotMatches<'a> {
    arg: Operand<'a>,
    includes: StringMatches<'a>,
    excludes: StringMatches<'a>,
}

impl<'a> UnaryNotMatches<'a> {
    pub fn new(arg: AllMatches<'a>) -> Self {
        UnaryNotMatches {
            arg: Operand::Pending(Box::new(arg)),
            includes: Vec::new(),
            excludes: Vec::new(),
        }
    }

    pub fn next(&mut self, ctx: &EvalContext) -> Result<bool> {
        let Operand::Pending(mut arg) = std::mem::replace(&mut self.arg, Operand::Done) else {
            return Ok(false);
        };

        while arg.next(ctx)? {
            ctx.check_interrupt()?;
            self.excludes.extend_from_slice(arg.includes());
            self.includes.extend_from_slice(arg.excludes());
        }
        Ok(true)
    }

    pub fn includes(&self) -> &[StringMatch<'a>] {
        &self.includes
    }

    pub fn excludes(&self) -> &[StringMatch<'a>] {
        &self.excludes
    }
}
