use log::trace;
use crate::core::context::EvalContext;
use crate::core::error::Result;
use crate::search::matches::{AllMatches, StringMatch};

/// ordered: matches whose document order agrees with query order
pub struct OrderMatches<'a> {
    arg: Box<AllMatches<'a>>,
}

impl<'a> OrderMatches<'a> {
    pub fn new(arg: AllMatches<'a>) -> Self {
        OrderMatches { arg: Box::new(arg) }
    }

    pub fn next(&mut self, ctx: &EvalContext) -> Result<bool> {
        loop {
            if !self.arg.next(ctx)? {
                return Ok(false);
            }
            if in_query_order(self.arg.includes()) {
                return Ok(true);
            }

            trace!("ordered rejected a match");
            ctx.check_interrupt()?;
        }
    }

    pub fn includes(&self) -> &[StringMatch<'a>] {
        self.arg.includes()
    }

    pub fn excludes(&self) -> &[StringMatch<'a>] {
        self.arg.excludes()
    }
}

pub fn in_query_order(includes: &[StringMatch]) -> bool {
    for (i, a) in includes.iter().enumerate() {
        for b in &includes[i + 1..] {
            let inverted = (a.query_pos > b.query_pos && a.position() < b.position())
                || (a.query_pos < b.query_pos && a.position() > b.position());
            if inverted {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_in_query_order() {
        let fox = Token::new("fox".to_string(), 1, 0, 0);
        let jumps = Token::new("jumps".to_string(), 2, 0, 0);
        let early = Token::new("jumps".to_string(), 0, 0, 0);

        assert!(in_query_order(&[StringMatch::new(&fox, 0), StringMatch::new(&jumps, 1)]));
        assert!(!in_query_order(&[StringMatch::new(&fox, 0), StringMatch::new(&early, 1)]));
        assert!(in_query_order(&[]));
    }
}
