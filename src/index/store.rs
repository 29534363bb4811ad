use std::borrow::Cow;
use std::collections::HashMap;
use log::debug;
use crate::analysis::token::{CasePolicy, Token};
use crate::analysis::tokenizer::Tokenizer;
use crate::core::error::Result;

/// Positional word index for a single searchable scope.
///
/// Built once from a full tokenizer pass and read-only afterwards, so any
/// number of cursors may evaluate against it at the same time.
#[derive(Debug, Clone)]
pub struct TokenStore {
    tokens: Vec<Token>,                  // Indexed by position
    index: HashMap<String, Vec<u32>>,    // Folded word -> positions, ascending
    case_policy: CasePolicy,
}

impl TokenStore {
    pub fn build(text: &str, tokenizer: &dyn Tokenizer, case_policy: CasePolicy) -> Result<Self> {
        let mut tokens = Vec::new();
        let mut index: HashMap<String, Vec<u32>> = HashMap::new();

        for token in tokenizer.tokenize(text) {
            let token = token?;
            index
                .entry(case_policy.fold(&token.word).into_owned())
                .or_default()
                .push(token.position);
            tokens.push(token);
        }

        debug!(
            "built token store: {} tokens, {} distinct words ({:?})",
            tokens.len(),
            index.len(),
            case_policy
        );

        Ok(TokenStore {
            tokens,
            index,
            case_policy,
        })
    }

    /// Occurrences of `term` compared under `case_policy`, in document order.
    ///
    /// Returns `None` when the term does not occur.
    pub fn lookup(&self, term: &str, case_policy: CasePolicy) -> Option<Occurrences<'_>> {
        let wanted = case_policy.fold(term);

        if case_policy == self.case_policy {
            return self
                .index
                .get(&*wanted)
                .map(|positions| Occurrences::new(&self.tokens, Cow::Borrowed(positions.as_slice())));
        }

        let positions: Vec<u32> = if self.case_policy.covers(case_policy) {
            // Stored keys are coarser: narrow the bucket by re-folding the stored words
            let key = self.case_policy.fold(term);
            self.index
                .get(&*key)?
                .iter()
                .copied()
                .filter(|&p| case_policy.fold(&self.tokens[p as usize].word) == wanted)
                .collect()
        } else {
            self.tokens
                .iter()
                .filter(|t| case_policy.fold(&t.word) == wanted)
                .map(|t| t.position)
                .collect()
        };

        if positions.is_empty() {
            None
        } else {
            Some(Occurrences::new(&self.tokens, Cow::Owned(positions)))
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn token_at(&self, position: u32) -> Option<&Token> {
        self.tokens.get(position as usize)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn term_count(&self) -> usize {
        self.index.len()
    }

    pub fn case_policy(&self) -> CasePolicy {
        self.case_policy
    }

    pub fn first_position(&self) -> Option<u32> {
        self.tokens.first().map(|t| t.position)
    }

    pub fn last_position(&self) -> Option<u32> {
        self.tokens.last().map(|t| t.position)
    }
}

/// Lazy walk over one term's occurrence list
pub struct Occurrences<'a> {
    tokens: &'a [Token],
    positions: Cow<'a, [u32]>,
    next: usize,
}

impl<'a> Occurrences<'a> {
    fn new(tokens: &'a [Token], positions: Cow<'a, [u32]>) -> Self {
        Occurrences {
            tokens,
            positions,
            next: 0,
        }
    }

    pub fn remaining(&self) -> usize {
        self.positions.len() - self.next
    }
}

impl<'a> Iterator for Occurrences<'a> {
    type Item = &'a Token;

    fn next(&mut self) -> Option<&'a Token> {
        let position = *self.positions.get(self.next)?;
        self.next += 1;
        self.tokens.get(position as usize)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::tokenizer::StandardTokenizer;

    fn positions(store: &TokenStore, term: &str, policy: CasePolicy) -> Vec<u32> {
        store
            .lookup(term, policy)
            .map(|occ| occ.map(|t| t.position).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_duplicates_share_a_bucket() {
        let tokenizer = StandardTokenizer::default();
        let store = TokenStore::build("Cat dog cat CAT", &tokenizer, CasePolicy::Fold).unwrap();

        assert_eq!(store.len(), 4);
        assert_eq!(store.term_count(), 2);
        assert_eq!(positions(&store, "cat", CasePolicy::Fold), vec![0, 2, 3]);
        assert!(store.lookup("bird", CasePolicy::Fold).is_none());
    }

    #[test]
    fn test_lookup_with_finer_policy() {
        let tokenizer = StandardTokenizer::default();
        let store = TokenStore::build("Cat dog cat CAT", &tokenizer, CasePolicy::Fold).unwrap();

        assert_eq!(positions(&store, "cat", CasePolicy::Sensitive), vec![2]);
        assert_eq!(positions(&store, "Cat", CasePolicy::Sensitive), vec![0]);
        assert!(store.lookup("cAt", CasePolicy::Sensitive).is_none());
    }

    #[test]
    fn test_lookup_with_coarser_policy_scans() {
        let tokenizer = StandardTokenizer::default();
        let store = TokenStore::build("Cat dog cat CAT", &tokenizer, CasePolicy::Sensitive).unwrap();

        assert_eq!(positions(&store, "cat", CasePolicy::Sensitive), vec![2]);
        assert_eq!(positions(&store, "cAT", CasePolicy::Lower), vec![0, 2, 3]);
        assert_eq!(positions(&store, "cat", CasePolicy::Upper), vec![0, 2, 3]);
    }
}
