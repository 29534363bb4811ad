use std::collections::VecDeque;
use crate::core::context::EvalContext;
use crate::core::error::Result;
use crate::search::matches::{AllMatches, StringMatch};

/// ftor: the operands' match streams, concatenated in declaration order
pub struct DisjunctionMatches<'a> {
    args: VecDeque<AllMatches<'a>>,   // Front is the operand being drained
}

impl<'a> DisjunctionMatches<'a> {
    pub fn new(args: Vec<AllMatches<'a>>) -> Self {
        DisjunctionMatches { args: args.into() }
    }

    pub fn next(&mut self, ctx: &EvalContext) -> Result<bool> {
        while let Some(current) = self.args.front_mut() {
            if current.next(ctx)? {
                return Ok(true);
            }
            self.args.pop_front();
        }
        Ok(false)
    }

    pub fn includes(&self) -> &[StringMatch<'a>] {
        self.current().includes()
    }

    pub fn excludes(&self) -> &[StringMatch<'a>] {
        self.current().excludes()
    }

    fn current(&self) -> &AllMatches<'a> {
        match self.args.front() {
            Some(current) => current,
            None => unreachable!("ftor has no current operand"),
        }
    }
}
