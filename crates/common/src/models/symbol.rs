use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Descriptive value attached to a supported symbol: either a free-form
/// label or the list of provider tickers tried for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SymbolMapping {
    Label(String),
    Candidates(Vec<String>),
}

impl fmt::Display for SymbolMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Label(label) => f.write_str(label),
            Self::Candidates(c) => f.write_str(&c.join(", ")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolCatalog {
    #[serde(default)]
    pub supported: Vec<String>,
    #[serde(default)]
    pub mapping: BTreeMap<String, SymbolMapping>,
}

impl SymbolCatalog {
    /// First `limit` supported symbols, plus whether anything was cut off.
    pub fn preview(&self, limit: usize) -> (&[String], bool) {
        let shown = self.supported.len().min(limit);
        (&self.supported[..shown], self.supported.len() > limit)
    }

    pub fn describe(&self, symbol: &str) -> Option<&SymbolMapping> {
        self.mapping.get(symbol)
    }
}
