use crate::analysis::token::{CasePolicy, Unit};
use crate::analysis::tokenizer::Tokenizer;
use crate::core::error::Result;
use crate::index::store::TokenStore;
use crate::query::ast::{ContentKind, Range, ScopeKind, Selection};
use crate::query::optimizer::SelectionOptimizer;
use crate::search::conjunction::ConjunctionMatches;
use crate::search::content::{ContentMatches, Edge};
use crate::search::disjunction::DisjunctionMatches;
use crate::search::distance::DistanceMatches;
use crate::search::matches::AllMatches;
use crate::search::mild_not::MildNotMatches;
use crate::search::not::UnaryNotMatches;
use crate::search::order::OrderMatches;
use crate::search::scope::{ScopeDifferentMatches, ScopeSameMatches};
use crate::search::window::WindowMatches;
use crate::search::words::StringSearchMatches;

/// Static inputs for turning a selection into a cursor tree over one scope
pub struct FtContext<'a> {
    pub store: &'a TokenStore,
    pub tokenizer: &'a dyn Tokenizer,
    pub case_policy: CasePolicy,
    query_pos: u32,
}

impl<'a> FtContext<'a> {
    pub fn new(store: &'a TokenStore, tokenizer: &'a dyn Tokenizer, case_policy: CasePolicy) -> Self {
        FtContext {
            store,
            tokenizer,
            case_policy,
            query_pos: 0,
        }
    }

    /// Query words are numbered in the order their cursors are created.
    fn next_query_pos(&mut self) -> u32 {
        let pos = self.query_pos;
        self.query_pos += 1;
        pos
    }
}

impl Selection {
    /// Builds an independent cursor tree; the selection itself is left untouched.
    pub fn execute<'a>(&self, ctx: &mut FtContext<'a>) -> Result<AllMatches<'a>> {
        let matches = match self {
            Selection::Word(term) => {
                let query_pos = ctx.next_query_pos();
                let occurrences = ctx.store.lookup(term, ctx.case_policy);
                AllMatches::Words(StringSearchMatches::new(query_pos, occurrences))
            }

            // Unoptimized trees still evaluate, expanding on the fly
            Selection::Words(query) => {
                let expanded = SelectionOptimizer::new(ctx.tokenizer).expand_words(query)?;
                expanded.execute(ctx)?
            }

            Selection::And(args) => {
                AllMatches::And(ConjunctionMatches::new(execute_all(args, ctx)?))
            }

            Selection::Or(args) => {
                AllMatches::Or(DisjunctionMatches::new(execute_all(args, ctx)?))
            }

            Selection::MildNot(left, right) => {
                let left = left.execute(ctx)?;
                let right = right.execute(ctx)?;
                AllMatches::MildNot(MildNotMatches::new(left, right))
            }

            Selection::Not(arg) => AllMatches::Not(UnaryNotMatches::new(arg.execute(ctx)?)),

            Selection::Order(arg) => AllMatches::Order(OrderMatches::new(arg.execute(ctx)?)),

            Selection::Scope(query) => {
                let arg = query.arg.execute(ctx)?;
                match query.kind {
                    ScopeKind::Same => AllMatches::ScopeSame(ScopeSameMatches::new(query.unit, arg)),
                    ScopeKind::Different => {
                        AllMatches::ScopeDifferent(ScopeDifferentMatches::new(query.unit, arg))
                    }
                }
            }

            Selection::Content(query) => match query.kind {
                ContentKind::AtStart => {
                    AllMatches::Content(ContentMatches::new(Edge::Start, query.arg.execute(ctx)?))
                }
                ContentKind::AtEnd => {
                    AllMatches::Content(ContentMatches::new(Edge::End, query.arg.execute(ctx)?))
                }
                ContentKind::Entire => {
                    let span = Selection::distance((*query.arg).clone(), Range::Exactly(0), Unit::Word);
                    let start = Selection::content(span, ContentKind::AtStart);
                    Selection::content(start, ContentKind::AtEnd).execute(ctx)?
                }
            },

            Selection::Distance(query) => AllMatches::Distance(DistanceMatches::new(
                query.range,
                query.unit,
                query.arg.execute(ctx)?,
            )),

            Selection::Window(query) => AllMatches::Window(WindowMatches::new(
                query.width,
                query.unit,
                query.arg.execute(ctx)?,
            )),
        };

        Ok(matches)
    }
}

fn execute_all<'a>(args: &[Selection], ctx: &mut FtContext<'a>) -> Result<Vec<AllMatches<'a>>> {
    args.iter().map(|arg| arg.execute(ctx)).collect()
}
