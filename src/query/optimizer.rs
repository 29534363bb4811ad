use log::debug;
use crate::analysis::token::Unit;
use crate::analysis::tokenizer::Tokenizer;
use crate::core::error::Result;
use crate::query::ast::{AnyAllOption, ContentKind, Range, Selection, WordsQuery};

/// Rewrites a selection tree once before evaluation.
///
/// `None` means the selection can never match, whatever the content.
pub struct SelectionOptimizer<'t> {
    tokenizer: &'t dyn Tokenizer,
}

impl<'t> SelectionOptimizer<'t> {
    pub fn new(tokenizer: &'t dyn Tokenizer) -> Self {
        SelectionOptimizer { tokenizer }
    }

    pub fn optimize(&self, selection: &Selection) -> Result<Option<Selection>> {
        match selection {
            Selection::Word(_) => Ok(Some(selection.clone())),

            Selection::Words(query) => {
                let expanded = self.expand_words(query)?;
                self.optimize(&expanded)
            }

            Selection::And(args) => {
                let mut kept = Vec::with_capacity(args.len());
                for arg in args {
                    match self.optimize(arg)? {
                        Some(arg) => kept.push(arg),
                        None => {
                            debug!("ftand operand can never match, dropping conjunction");
                            return Ok(None);
                        }
                    }
                }
                Ok(collapse(kept, Selection::And))
            }

            Selection::Or(args) => {
                let mut kept = Vec::with_capacity(args.len());
                for arg in args {
                    match self.optimize(arg)? {
                        Some(arg) => kept.push(arg),
                        None => debug!("dropping ftor operand that can never match"),
                    }
                }
                Ok(collapse(kept, Selection::Or))
            }

            Selection::MildNot(left, right) => {
                let Some(left) = self.optimize(left)? else {
                    return Ok(None);
                };
                match self.optimize(right)? {
                    Some(right) => Ok(Some(Selection::mild_not(left, right))),
                    None => Ok(Some(left)),
                }
            }

            // The empty disjunction keeps "not <impossible>" alive as one empty match
            Selection::Not(arg) => {
                let arg = self.optimize(arg)?.unwrap_or_else(|| Selection::Or(Vec::new()));
                Ok(Some(Selection::not(arg)))
            }

            Selection::Order(arg) => self.positional(arg, Selection::order),

            Selection::Scope(query) => {
                self.positional(&query.arg, |arg| Selection::scope(arg, query.kind, query.unit))
            }

            Selection::Distance(query) => {
                self.positional(&query.arg, |arg| Selection::distance(arg, query.range, query.unit))
            }

            Selection::Window(query) => {
                self.positional(&query.arg, |arg| Selection::window(arg, query.width, query.unit))
            }

            Selection::Content(query) => {
                let Some(arg) = self.optimize(&query.arg)? else {
                    return Ok(None);
                };
                match query.kind {
                    ContentKind::Entire => {
                        let span = elide_single_word(arg, |arg| {
                            Selection::distance(arg, Range::Exactly(0), Unit::Word)
                        });
                        let start = Selection::content(span, ContentKind::AtStart);
                        Ok(Some(Selection::content(start, ContentKind::AtEnd)))
                    }
                    kind => Ok(Some(Selection::content(arg, kind))),
                }
            }
        }
    }

    fn positional(
        &self,
        arg: &Selection,
        rebuild: impl FnOnce(Selection) -> Selection,
    ) -> Result<Option<Selection>> {
        Ok(self.optimize(arg)?.map(|arg| elide_single_word(arg, rebuild)))
    }

    /// Turns query strings into word leaves combined per the any/all option.
    pub fn expand_words(&self, query: &WordsQuery) -> Result<Selection> {
        let expanded = match query.option {
            AnyAllOption::AnyWord => Selection::Or(self.all_words(&query.terms)?),
            AnyAllOption::AllWords => Selection::And(self.all_words(&query.terms)?),
            AnyAllOption::Phrase => phrase(self.all_words(&query.terms)?),
            AnyAllOption::Any => Selection::Or(self.phrases(&query.terms)?),
            AnyAllOption::All => Selection::And(self.phrases(&query.terms)?),
        };
        Ok(expanded)
    }

    fn all_words(&self, terms: &[String]) -> Result<Vec<Selection>> {
        let mut words = Vec::new();
        for term in terms {
            words.extend(self.tokenizer.words(term)?.into_iter().map(Selection::Word));
        }
        Ok(words)
    }

    fn phrases(&self, terms: &[String]) -> Result<Vec<Selection>> {
        terms
            .iter()
            .map(|term| self.all_words(std::slice::from_ref(term)).map(phrase))
            .collect()
    }
}

/// Adjacent words in query order.
fn phrase(words: Vec<Selection>) -> Selection {
    Selection::distance(
        Selection::order(Selection::And(words)),
        Range::Exactly(0),
        Unit::Word,
    )
}

fn collapse(mut args: Vec<Selection>, rebuild: fn(Vec<Selection>) -> Selection) -> Option<Selection> {
    match args.len() {
        0 => None,
        1 => args.pop(),
        _ => Some(rebuild(args)),
    }
}

/// Positional filters over a lone word are trivially satisfied.
fn elide_single_word(arg: Selection, rebuild: impl FnOnce(Selection) -> Selection) -> Selection {
    if arg.is_word() {
        debug!("eliding positional filter over a single word");
        arg
    } else {
        rebuild(arg)
    }
}
