use crate::core::context::EvalContext;
use crate::core::error::Result;
use crate::search::matches::{AllMatches, Match, StringMatch, StringMatches};

/// Replayable view over an operand's match stream.
///
/// Matches are pulled from the operand at most once and remembered, so the
/// conjunction can rewind an operand for every combination of the others.
struct BufferedMatches<'a> {
    arg: AllMatches<'a>,
    buffer: Vec<Match<'a>>,
    next_index: usize,
    current: usize,
}

impl<'a> BufferedMatches<'a> {
    fn new(arg: AllMatches<'a>) -> Self {
        BufferedMatches {
            arg,
            buffer: Vec::new(),
            next_index: 0,
            current: 0,
        }
    }

    fn reset(&mut self) {
        self.next_index = 0;
    }

    fn next(&mut self, ctx: &EvalContext) -> Result<bool> {
        if self.next_index < self.buffer.len() {
            self.current = self.next_index;
            self.next_index += 1;
            return Ok(true);
        }

        if self.arg.is_exhausted() || !self.arg.next(ctx)? {
            return Ok(false);
        }

        self.buffer.push(self.arg.current());
        self.current = self.buffer.len() - 1;
        self.next_index = self.buffer.len();
        Ok(true)
    }

    fn current(&self) -> &Match<'a> {
        &self.buffer[self.current]
    }
}

/// ftand: every combination of one match from each operand.
///
/// Operands are advanced like an odometer, the last one turning fastest.
pub struct ConjunctionMatches<'a> {
    args: Vec<BufferedMatches<'a>>,
    started: bool,
    includes: StringMatches<'a>,
    excludes: StringMatches<'a>,
}

impl<'a> ConjunctionMatches<'a> {
    pub fn new(args: Vec<AllMatches<'a>>) -> Self {
        ConjunctionMatches {
            args: args.into_iter().map(BufferedMatches::new).collect(),
            started: false,
            includes: Vec::new(),
            excludes: Vec::new(),
        }
    }

    pub fn next(&mut self, ctx: &EvalContext) -> Result<bool> {
        self.includes.clear();
        self.excludes.clear();

        let count = self.args.len();
        if count == 0 {
            return Ok(false);
        }

        // Either position every operand from the first, or advance the last one
        let (mut index, mut filling) = if self.started {
            (count - 1, false)
        } else {
            self.started = true;
            (0, true)
        };

        loop {
            ctx.check_interrupt()?;

            if filling {
                if index == count {
                    break;
                }
                self.args[index].reset();
                if self.args[index].next(ctx)? {
                    index += 1;
                    continue;
                }
                filling = false;
                if index == 0 {
                    return Ok(false);
                }
                index -= 1;
            } else if self.args[index].next(ctx)? {
                filling = true;
                index += 1;
            } else if index == 0 {
                return Ok(false);
            } else {
                index -= 1;
            }
        }

        for arg in &self.args {
            let current = arg.current();
            self.includes.extend_from_slice(&current.includes);
            self.excludes.extend_from_slice(&current.excludes);
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
