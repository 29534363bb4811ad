use std::borrow::Cow;
use serde::{Serialize, Deserialize};

/// Identity of a searchable scope (an element, an attribute, a document...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ScopeId(pub u64);

impl ScopeId {
    pub fn new(id: u64) -> Self {
        ScopeId(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ScopeId {
    fn from(id: u64) -> Self {
        ScopeId(id)
    }
}

/// Content accessor for the unit of text a full-text query is evaluated against.
pub trait SearchScope {
    fn scope_id(&self) -> ScopeId;

    fn text_content(&self) -> Cow<'_, str>;
}

/// A scope whose content is plain text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextScope {
    pub id: ScopeId,
    pub text: String,
}

impl TextScope {
    pub fn new(id: impl Into<ScopeId>, text: impl Into<String>) -> Self {
        TextScope {
            id: id.into(),
            text: text.into(),
        }
    }
}

impl SearchScope for TextScope {
    fn scope_id(&self) -> ScopeId {
        self.id
    }

    fn text_content(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.text)
    }
}
