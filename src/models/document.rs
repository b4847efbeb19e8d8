use serde::{Deserialize, Serialize};

use crate::models::element::{ElementKind, ScreenplayElement};
use crate::models::title_page::TitlePageEntry;

/// The result of parsing one screenplay document, whichever format it
/// came from. Body elements appear in source order; title-page entries
/// keep the order their directives appeared in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedDocument {
    pub elements: Vec<ScreenplayElement>,
    pub title_page: Vec<TitlePageEntry>,
    pub filename: Option<String>,
    /// Carried for consumers that render scene numbers; nothing in the
    /// parsers flips it today.
    pub suppress_scene_numbers: bool,
}

impl ParsedDocument {
    pub fn new() -> Self {
        ParsedDocument {
            elements: Vec::new(),
            title_page: Vec::new(),
            filename: None,
            suppress_scene_numbers: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty() && self.title_page.is_empty()
    }

    /// Scene headings in document order, the raw material for outlines.
    pub fn scene_headings(&self) -> impl Iterator<Item = &ScreenplayElement> {
        self.elements
            .iter()
            .filter(|e| e.kind == ElementKind::SceneHeading)
    }

    /// Every value collected under `key` across all entries, so repeated
    /// directives (several `Author:` lines, say) read as one list.
    pub fn title_values(&self, key: &str) -> Vec<&str> {
        let wanted = TitlePageEntry::canonical_key(key);
        self.title_page
            .iter()
            .filter(|entry| entry.key == wanted)
            .flat_map(|entry| entry.values.iter().map(|v| v.as_str()))
            .collect()
    }
}

impl Default for ParsedDocument {
    fn default() -> Self {
        ParsedDocument::new()
    }
}
