use crate::analysis::token::CasePolicy;

#[derive(Debug, Clone)]
pub struct Config {
    pub case_policy: CasePolicy,        // Folding applied to stored words
    pub max_token_length: usize,        // Longer words are dropped by the tokenizer
    pub store_cache_size: usize,        // Token stores kept per evaluator
}

impl Default for Config {
    fn default() -> Self {
        Config {
            case_policy: CasePolicy::Fold,
            max_token_length: 255,
            store_cache_size: 128,
        }
    }
}

impl Config {
    pub fn with_case_policy(mut self, case_policy: CasePolicy) -> Self {
        self.case_policy = case_policy;
        self
    }

    pub fn with_max_token_length(mut self, max_token_length: usize) -> Self {
        self.max_token_length = max_token_length;
        self
    }

    pub fn with_store_cache_size(mut self, store_cache_size: usize) -> Self {
        self.store_cache_size = store_cache_size;
        self
    }
}
