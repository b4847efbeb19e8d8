use serde::{Deserialize, Serialize};

/// Lighting context named by a scene heading's prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lighting {
    Interior,
    Exterior,
    InteriorExterior,
    /// No recognizable prefix; the whole heading text is kept as the scene.
    Unknown,
}

/// Structured form of one scene heading's location text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneLocation {
    pub lighting: Lighting,
    /// Primary place, e.g. `COFFEE SHOP` in `COFFEE SHOP - KITCHEN`.
    pub scene: String,
    /// Sub-area within the scene, when a known keyword splits one off.
    pub setup: Option<String>,
    pub time_of_day: Option<String>,
    /// Parenthesized or bracketed annotations lifted out of the time part.
    pub modifiers: Vec<String>,
    /// The heading text exactly as it was handed to the parser.
    pub original_text: String,
}

impl SceneLocation {
    /// Fallback when no lighting prefix is recognized.
    pub fn unknown(text: &str) -> Self {
        SceneLocation {
            lighting: Lighting::Unknown,
            scene: text.trim().to_string(),
            setup: None,
            time_of_day: None,
            modifiers: Vec::new(),
            original_text: text.to_string(),
        }
    }

    /// Normalized key for grouping headings that name the same place.
    ///
    /// Two headings that differ only in lighting, time of day or
    /// typographic apostrophes produce the same key.
    pub fn location_key(&self) -> String {
        let joined = match &self.setup {
            Some(setup) => format!("{} - {}", self.scene, setup),
            None => self.scene.clone(),
        };
        normalize_apostrophes(joined.to_uppercase().trim())
    }
}

/// Folds the typographic apostrophe variants into the ASCII one.
fn normalize_apostrophes(text: &str) -> String {
    text.replace(['\u{2019}', '\u{2018}', '\u{02BC}'], "'")
}
