use log::trace;
use crate::analysis::token::{token_unit, Unit};
use crate::core::context::EvalContext;
use crate::core::error::Result;
use crate::search::matches::{AllMatches, StringMatch, StringMatches};

/// window: all includes fit inside `width` consecutive units.
///
/// A match carrying excludes is repeated once per window start that still
/// covers every include, each time keeping only the excludes inside that window.
pub struct WindowMatches<'a> {
    width: u32,
    unit: Unit,
    arg: Box<AllMatches<'a>>,
    pending_starts: Option<(u32, u32)>,    // Next and last window start for the current match
    excludes: StringMatches<'a>,
}

impl<'a> WindowMatches<'a> {
    pub fn new(width: u32, unit: Unit, arg: AllMatches<'a>) -> Self {
        WindowMatches {
            width,
            unit,
            arg: Box::new(arg),
            pending_starts: None,
            excludes: Vec::new(),
        }
    }

    pub fn next(&mut self, ctx: &EvalContext) -> Result<bool> {
        if let Some((start, last)) = self.pending_starts.take() {
            self.select_window(start, last);
            return Ok(true);
        }

        loop {
            if !self.arg.next(ctx)? {
                return Ok(false);
            }

            let mut units = self.arg.includes().iter().map(|m| token_unit(m.token, self.unit));
            if let Some(first) = units.next() {
                let (min, max) = units.fold((first, first), |(lo, hi), u| (lo.min(u), hi.max(u)));

                if max - min < self.width {
                    if self.arg.excludes().is_empty() {
                        self.excludes.clear();
                    } else {
                        let first_start = (max + 1).saturating_sub(self.width);
                        self.select_window(first_start, min);
                    }
                    return Ok(true);
                }
            }

            trace!("window {} {:?} rejected a match", self.width, self.unit);
            ctx.check_interrupt()?;
        }
    }

    fn select_window(&mut self, start: u32, last: u32) {
        let end = start.saturating_add(self.width - 1);
        let unit = self.unit;

        self.excludes.clear();
        self.excludes.extend(self.arg.excludes().iter().filter(|m| {
            let value = token_unit(m.token, unit);
            start <= value && value <= end
        }));

        self.pending_starts = if start < last { Some((start + 1, last)) } else { None };
    }

    pub fn includes(&self) -> &[StringMatch<'a>] {
        self.arg.includes()
    }

    pub fn excludes(&self) -> &[StringMatch<'a>] {
        &self.excludes
    }
}
