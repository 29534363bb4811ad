use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use log::debug;
use lru::LruCache;
use parking_lot::Mutex;
use crate::analysis::token::CasePolicy;
use crate::analysis::tokenizer::Tokenizer;
use crate::core::error::Result;
use crate::core::types::{ScopeId, SearchScope};
use crate::index::store::TokenStore;

/// LRU cache of token stores, one per searchable scope
pub struct StoreCache {
    cache: Arc<Mutex<LruCache<(ScopeId, CasePolicy), Arc<TokenStore>>>>,
    pub size_limit: usize,
    lookups: AtomicUsize,
    builds: AtomicUsize,
}

impl StoreCache {
    pub fn new(size_limit: usize) -> Self {
        let cap = NonZeroUsize::new(size_limit).unwrap_or(NonZeroUsize::MIN);
        StoreCache {
            cache: Arc::new(Mutex::new(LruCache::new(cap))),
            size_limit: cap.get(),
            lookups: AtomicUsize::new(0),
            builds: AtomicUsize::new(0),
        }
    }

    /// Get or build the store for a scope
    pub fn get_or_build(
        &self,
        scope: &dyn SearchScope,
        tokenizer: &dyn Tokenizer,
        case_policy: CasePolicy,
    ) -> Result<Arc<TokenStore>> {
        let key = (scope.scope_id(), case_policy);
        self.lookups.fetch_add(1, Ordering::Relaxed);

        // Fast path: already built
        if let Some(store) = self.cache.lock().get(&key) {
            debug!("token store cache hit for scope {:?}", key.0);
            return Ok(store.clone());
        }
        self.builds.fetch_add(1, Ordering::Relaxed);
        debug!("token store cache miss for scope {:?}", key.0);

        // Slow path: tokenize outside the lock
        let store = Arc::new(TokenStore::build(&scope.text_content(), tokenizer, case_policy)?);

        let mut cache = self.cache.lock();
        if let Some((evicted, _)) = cache.push(key, store.clone()) {
            if evicted != key {
                debug!("evicted token store for scope {:?}", evicted.0);
            }
        }
        Ok(store)
    }

    /// Invalidate every store built for a scope
    pub fn invalidate(&self, scope_id: ScopeId) {
        let mut cache = self.cache.lock();
        let stale: Vec<_> = cache
            .iter()
            .map(|(key, _)| *key)
            .filter(|(id, _)| *id == scope_id)
            .collect();
        for key in stale {
            cache.pop(&key);
        }
    }

    pub fn clear(&self) {
        self.cache.lock().clear();
    }

    /// Snapshot of reuse counters and of what the cache currently holds
    pub fn stats(&self) -> StoreCacheStats {
        let cache = self.cache.lock();
        StoreCacheStats {
            lookups: self.lookups.load(Ordering::Relaxed),
            builds: self.builds.load(Ordering::Relaxed),
            stores: cache.len(),
            cached_tokens: cache.iter().map(|(_, store)| store.len()).sum(),
            capacity: self.size_limit,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCacheStats {
    /// Calls to `get_or_build`
    pub lookups: usize,
    /// Lookups that had to tokenize the scope
    pub builds: usize,
    pub stores: usize,
    /// Tokens held across every cached store
    pub cached_tokens: usize,
    pub capacity: usize,
}

impl StoreCacheStats {
    /// Lookups answered with an already built store
    pub fn reused(&self) -> usize {
        self.lookups.saturating_sub(self.builds)
    }

    /// Share of lookups that skipped tokenization; `None` before the first lookup.
    pub fn reuse_ratio(&self) -> Option<f64> {
        (self.lookups > 0).then(|| self.reused() as f64 / self.lookups as f64)
    }
}
