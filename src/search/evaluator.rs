use std::sync::Arc;
use log::{debug, trace};
use crate::analysis::tokenizer::{StandardTokenizer, Tokenizer};
use crate::analysis::segmenter::UnicodeSegmenter;
use crate::core::config::Config;
use crate::core::context::EvalContext;
use crate::core::error::Result;
use crate::core::types::SearchScope;
use crate::index::cache::{StoreCache, StoreCacheStats};
use crate::index::store::TokenStore;
use crate::query::ast::Selection;
use crate::query::optimizer::SelectionOptimizer;
use crate::search::executor::FtContext;
use crate::search::matches::{AllMatches, StringMatch};

/// A validated, optimized selection ready to run against any number of scopes.
///
/// `None` means the optimizer proved the selection can never match.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedQuery {
    selection: Option<Selection>,
}

impl PreparedQuery {
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn is_satisfiable(&self) -> bool {
        self.selection.is_some()
    }
}

/// Entry point for full-text evaluation
pub struct FtEvaluator {
    config: Config,
    tokenizer: StandardTokenizer,
    cache: StoreCache,
}

impl FtEvaluator {
    pub fn new(config: Config) -> Self {
        let tokenizer = StandardTokenizer::new(Box::new(UnicodeSegmenter), config.max_token_length);
        let cache = StoreCache::new(config.store_cache_size);
        FtEvaluator {
            config,
            tokenizer,
            cache,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tokenizer(&self) -> &dyn Tokenizer {
        &self.tokenizer
    }

    /// Tokenize and index text outside the cache
    pub fn build_store(&self, text: &str) -> Result<TokenStore> {
        TokenStore::build(text, &self.tokenizer, self.config.case_policy)
    }

    pub fn store_for(&self, scope: &dyn SearchScope) -> Result<Arc<TokenStore>> {
        self.cache.get_or_build(scope, &self.tokenizer, self.config.case_policy)
    }

    pub fn invalidate(&self, scope: &dyn SearchScope) {
        self.cache.invalidate(scope.scope_id());
    }

    pub fn prepare(&self, selection: &Selection) -> Result<PreparedQuery> {
        selection.validate()?;
        let optimized = SelectionOptimizer::new(&self.tokenizer).optimize(selection)?;
        match &optimized {
            Some(s) => debug!("prepared selection: {:?}", s),
            None => debug!("selection can never match"),
        }
        Ok(PreparedQuery { selection: optimized })
    }

    /// Cursor over every match of a prepared query in one store
    pub fn matches<'a>(
        &'a self,
        prepared: &PreparedQuery,
        store: &'a TokenStore,
        ctx: &EvalContext,
    ) -> Result<AllMatches<'a>> {
        ctx.check_interrupt()?;
        match &prepared.selection {
            Some(selection) => {
                debug!("evaluating against {} tokens ({:?})", store.len(), ctx.case_policy);
                let mut ft = FtContext::new(store, &self.tokenizer, ctx.case_policy);
                selection.execute(&mut ft)
            }
            None => Ok(AllMatches::Exhausted),
        }
    }

    /// True on the first match with no excludes whose content anchors hold.
    pub fn contains(&self, prepared: &PreparedQuery, store: &TokenStore, ctx: &EvalContext) -> Result<bool> {
        let mut matches = self.matches(prepared, store, ctx)?;

        while matches.next(ctx)? {
            if matches.excludes().is_empty() && anchored(matches.includes(), store) {
                return Ok(true);
            }
            trace!("match rejected by excludes or content anchors");
            ctx.check_interrupt()?;
        }

        Ok(false)
    }

    pub fn contains_in(
        &self,
        prepared: &PreparedQuery,
        scope: &dyn SearchScope,
        ctx: &EvalContext,
    ) -> Result<bool> {
        let store = self.store_for(scope)?;
        self.contains(prepared, &store, ctx)
    }

    pub fn cache_stats(&self) -> StoreCacheStats {
        self.cache.stats()
    }
}

impl Default for FtEvaluator {
    fn default() -> Self {
        FtEvaluator::new(Config::default())
    }
}

fn anchored(includes: &[StringMatch], store: &TokenStore) -> bool {
    includes.iter().all(|m| {
        (!m.start_token || Some(m.position()) == store.first_position())
            && (!m.end_token || Some(m.position()) == store.last_position())
    })
}
