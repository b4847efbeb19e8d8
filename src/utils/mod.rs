pub mod fountain_constants;

pub use fountain_constants::{FIXED_TRANSITIONS, OVER_BLACK, RULE_REGEX};

/// Folds Windows and classic Mac line endings into `\n`.
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
