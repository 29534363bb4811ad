//! Match records and the cursor tree that produces them.
//!
//! Every selection node executes into one [`AllMatches`] variant. A cursor is
//! pulled with [`AllMatches::next`]; after a `true` result its includes and
//! excludes describe that match only. Once `next` returns `false` the variant is
//! replaced by [`AllMatches::Exhausted`], which drops the whole child subtree.

use crate::analysis::token::Token;
use crate::core::context::EvalContext;
use crate::core::error::Result;
use crate::search::conjunction::ConjunctionMatches;
use crate::search::content::ContentMatches;
use crate::search::disjunction::DisjunctionMatches;
use crate::search::distance::DistanceMatches;
use crate::search::mild_not::MildNotMatches;
use crate::search::not::UnaryNotMatches;
use crate::search::order::OrderMatches;
use crate::search::scope::{ScopeDifferentMatches, ScopeSameMatches};
use crate::search::window::WindowMatches;
use crate::search::words::StringSearchMatches;

/// One matched document token, tagged with the query word it answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringMatch<'a> {
    pub token: &'a Token,
    pub query_pos: u32,       // Position of the word within the query
    pub start_token: bool,    // Set by "at start"
    pub end_token: bool,      // Set by "at end"
}

impl<'a> StringMatch<'a> {
    pub fn new(token: &'a Token, query_pos: u32) -> Self {
        StringMatch {
            token,
            query_pos,
            start_token: false,
            end_token: false,
        }
    }

    pub fn position(&self) -> u32 {
        self.token.position
    }
}

pub type StringMatches<'a> = Vec<StringMatch<'a>>;

/// Owned snapshot of a cursor's current match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<'a> {
    pub includes: StringMatches<'a>,
    pub excludes: StringMatches<'a>,
}

impl<'a> Match<'a> {
    pub fn include_positions(&self) -> Vec<u32> {
        self.includes.iter().map(StringMatch::position).collect()
    }

    pub fn exclude_positions(&self) -> Vec<u32> {
        self.excludes.iter().map(StringMatch::position).collect()
    }
}

pub enum AllMatches<'a> {
    Words(StringSearchMatches<'a>),
    Or(DisjunctionMatches<'a>),
    And(ConjunctionMatches<'a>),
    MildNot(MildNotMatches<'a>),
    Not(UnaryNotMatches<'a>),
    Order(OrderMatches<'a>),
    ScopeSame(ScopeSameMatches<'a>),
    ScopeDifferent(ScopeDifferentMatches<'a>),
    Content(ContentMatches<'a>),
    Distance(DistanceMatches<'a>),
    Window(WindowMatches<'a>),
    Exhausted,
}

impl<'a> AllMatches<'a> {
    pub fn next(&mut self, ctx: &EvalContext) -> Result<bool> {
        let found = match self {
            AllMatches::Words(m) => m.next(ctx)?,
            AllMatches::Or(m) => m.next(ctx)?,
            AllMatches::And(m) => m.next(ctx)?,
            AllMatches::MildNot(m) => m.next(ctx)?,
            AllMatches::Not(m) => m.next(ctx)?,
            AllMatches::Order(m) => m.next(ctx)?,
            AllMatches::ScopeSame(m) => m.next(ctx)?,
            AllMatches::ScopeDifferent(m) => m.next(ctx)?,
            AllMatches::Content(m) => m.next(ctx)?,
            AllMatches::Distance(m) => m.next(ctx)?,
            AllMatches::Window(m) => m.next(ctx)?,
            AllMatches::Exhausted => return Ok(false),
        };

        if !found {
            *self = AllMatches::Exhausted;
        }
        Ok(found)
    }

    pub fn includes(&self) -> &[StringMatch<'a>] {
        match self {
            AllMatches::Words(m) => m.includes(),
            AllMatches::Or(m) => m.includes(),
            AllMatches::And(m) => m.includes(),
            AllMatches::MildNot(m) => m.includes(),
            AllMatches::Not(m) => m.includes(),
            AllMatches::Order(m) => m.includes(),
            AllMatches::ScopeSame(m) => m.includes(),
            AllMatches::ScopeDifferent(m) => m.includes(),
            AllMatches::Content(m) => m.includes(),
            AllMatches::Distance(m) => m.includes(),
            AllMatches::Window(m) => m.includes(),
            AllMatches::Exhausted => unreachable!("includes requested from an exhausted cursor"),
        }
    }

    pub fn excludes(&self) -> &[StringMatch<'a>] {
        match self {
            AllMatches::Words(m) => m.excludes(),
            AllMatches::Or(m) => m.excludes(),
            AllMatches::And(m) => m.excludes(),
            AllMatches::MildNot(m) => m.excludes(),
            AllMatches::Not(m) => m.excludes(),
            AllMatches::Order(m) => m.excludes(),
            AllMatches::ScopeSame(m) => m.excludes(),
            AllMatches::ScopeDifferent(m) => m.excludes(),
            AllMatches::Content(m) => m.excludes(),
            AllMatches::Distance(m) => m.excludes(),
            AllMatches::Window(m) => m.excludes(),
            AllMatches::Exhausted => unreachable!("excludes requested from an exhausted cursor"),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, AllMatches::Exhausted)
    }

    /// Snapshot of the current match.
    pub fn current(&self) -> Match<'a> {
        Match {
            includes: self.includes().to_vec(),
            excludes: self.excludes().to_vec(),
        }
    }

    /// Pulls every remaining match.
    pub fn collect_all(mut self, ctx: &EvalContext) -> Result<Vec<Match<'a>>> {
        let mut all = Vec::new();
        while self.next(ctx)? {
            all.push(self.current());
        }
        Ok(all)
    }
}
