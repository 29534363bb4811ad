use crate::core::context::EvalContext;
use crate::core::error::Result;
use crate::search::matches::{AllMatches, StringMatch, StringMatches};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Start,
    End,
}

/// at start / at end: flags the first or last included token of each match.
///
/// Whether the flagged token really sits at the edge of the scope is decided
/// by the evaluator, which knows the scope's token range.
pub struct ContentMatches<'a> {
    edge: Edge,
    arg: Box<AllMatches<'a>>,
    includes: StringMatches<'a>,
}

impl<'a> ContentMatches<'a> {
    pub fn new(edge: Edge, arg: AllMatches<'a>) -> Self {
        ContentMatches {
            edge,
            arg: Box::new(arg),
            includes: Vec::new(),
        }
    }

    pub fn next(&mut self, ctx: &EvalContext) -> Result<bool> {
        loop {
            if !self.arg.next(ctx)? {
                return Ok(false);
            }

            let includes = self.arg.includes();
            if let Some(marked) = edge_index(includes, self.edge) {
                self.includes.clear();
                self.includes.extend_from_slice(includes);
                match self.edge {
                    Edge::Start => self.includes[marked].start_token = true,
                    Edge::End => self.includes[marked].end_token = true,
                }
                return Ok(true);
            }

            ctx.check_interrupt()?;
        }
    }

    pub fn includes(&self) -> &[StringMatch<'a>] {
        &self.includes
    }

    pub fn excludes(&self) -> &[StringMatch<'a>] {
        self.arg.excludes()
    }
}

/// Index of the smallest (start) or largest (end) position; first one wins ties.
fn edge_index(includes: &[StringMatch], edge: Edge) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, m) in includes.iter().enumerate() {
        let better = match best {
            None => true,
            Some(b) => match edge {
                Edge::Start => m.position() < includes[b].position(),
                Edge::End => m.position() > includes[b].position(),
            },
        };
        if better {
            best = Some(i);
        }
    }
    best
}
