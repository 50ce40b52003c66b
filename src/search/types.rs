// src/search/types.rs
use serde::{Deserialize, Serialize};

/// One extracted news hit. Identity is the link.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    pub link: String,
    pub source: String,
}
