use serde::{Deserialize, Serialize};

/// One title-page directive and the value lines collected under it.
///
/// Keys are stored canonicalized: trimmed, lowercased, with `author`
/// folded into `authors` so consumers only ever look up one spelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitlePageEntry {
    pub key: String,
    pub values: Vec<String>,
}

impl TitlePageEntry {
    pub fn new(key: &str) -> Self {
        TitlePageEntry {
            key: TitlePageEntry::canonical_key(key),
            values: Vec::new(),
        }
    }

    pub fn canonical_key(raw: &str) -> String {
        let key = raw.trim().to_lowercase();
        if key == "author" {
            "authors".to_string()
        } else {
            key
        }
    }
}
