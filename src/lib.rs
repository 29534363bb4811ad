pub mod core;
pub mod analysis;
pub mod index;
pub mod query;
pub mod search;

pub use crate::analysis::token::{CasePolicy, Token, Unit};
pub use crate::core::config::Config;
pub use crate::core::context::{EvalContext, InterruptHandle};
pub use crate::core::error::{Error, ErrorKind, Result};
pub use crate::core::types::{ScopeId, SearchScope, TextScope};
pub use crate::query::ast::Selection;
pub use crate::search::evaluator::{FtEvaluator, PreparedQuery};

/*
┌──────────────────────────────────────────────────────────────────────────────────┐
│                            FTMATCH STRUCT ARCHITECTURE                            │
└──────────────────────────────────────────────────────────────────────────────────┘

┌──────────────────────────────────── CORE LAYER ──────────────────────────────────┐
│                                                                                    │
│  ┌──────────────────────┐  ┌──────────────────────┐  ┌──────────────────────┐    │
│  │ struct Config        │  │ struct EvalContext   │  │ struct Error         │    │
│  │ • case_policy        │  │ • case_policy        │  │ • kind: ErrorKind    │    │
│  │ • max_token_length   │  │ • interrupt:         │  │ • context: String    │    │
│  │ • store_cache_size   │  │   Arc<AtomicBool>    │  └──────────────────────┘    │
│  └──────────────────────┘  └──────────────────────┘                               │
│                                                                                    │
│  ┌──────────────────────┐  ┌──────────────────────────────────────────────┐      │
│  │ struct ScopeId(u64)  │  │ trait SearchScope                            │      │
│  └──────────────────────┘  │ • scope_id() -> ScopeId                      │      │
│                            │ • text_content() -> Cow<str>                 │      │
│                            └──────────────────────────────────────────────┘      │
└────────────────────────────────────────────────────────────────────────────────────┘

┌────────────────────────────────── ANALYSIS LAYER ────────────────────────────────┐
│                                                                                    │
│   text ──► Segmenter ──► Marker stream ──► TokenStream ──► Token                  │
│            (UnicodeSegmenter)  Char / WordBoundary /        word, position,       │
│                                SentenceBoundary /           sentence, paragraph   │
│                                ParagraphBoundary / End                            │
└────────────────────────────────────────────────────────────────────────────────────┘

┌─────────────────────────────────── INDEX LAYER ──────────────────────────────────┐
│                                                                                    │
│  ┌──────────────────────────────────────┐  ┌────────────────────────────────┐    │
│  │ struct TokenStore                    │  │ struct StoreCache              │    │
│  │ • tokens: Vec<Token>                 │  │ • LruCache<(ScopeId,           │    │
│  │ • index: HashMap<String, Vec<u32>>   │  │   CasePolicy), Arc<TokenStore>>│    │
│  │ • case_policy                        │  │ • lookups / builds             │    │
│  └──────────────────────────────────────┘  └────────────────────────────────┘    │
└────────────────────────────────────────────────────────────────────────────────────┘

┌─────────────────────────────────── QUERY LAYER ──────────────────────────────────┐
│                                                                                    │
│   enum Selection ──► SelectionOptimizer::optimize ──► Option<Selection>           │
│   Word, Words, And, Or, MildNot, Not, Order, Scope, Content, Distance, Window      │
└────────────────────────────────────────────────────────────────────────────────────┘

┌─────────────────────────────────── SEARCH LAYER ─────────────────────────────────┐
│                                                                                    │
│   Selection::execute(FtContext) ──► enum AllMatches (cursor tree)                 │
│                                                                                    │
│   Words ─ Or ─ And ─ MildNot ─ Not ─ Order ─ ScopeSame ─ ScopeDifferent           │
│   Content ─ Distance ─ Window ─ Exhausted                                          │
│                                                                                    │
│   next(&EvalContext) -> Result<bool>, includes(), excludes()                       │
│                                                                                    │
│   FtEvaluator: prepare ─► matches / contains (per scope, via StoreCache)          │
└────────────────────────────────────────────────────────────────────────────────────┘
*/
