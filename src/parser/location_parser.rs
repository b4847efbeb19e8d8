use lazy_static::lazy_static;
use regex::Regex;

use crate::models::{Lighting, SceneLocation};

lazy_static! {
    // Compound forms first so "INT./EXT." is never claimed by plain "INT".
    // A period counts as its own boundary; a bare form needs a word break,
    // which keeps "INTERIOR" from reading as a prefix.
    static ref LIGHTING_PREFIX: Regex =
        Regex::new(r"^[ \t]*((?i:int\./ext|int/ext|i/e|int|ext))(?:\.|\b)[ \t]*").unwrap();

    static ref MODIFIER_GROUP: Regex = Regex::new(r"\(([^)]*)\)|\[([^\]]*)\]").unwrap();

    // Multi-word phrases before the single words they contain, then the
    // generic terms last.
    static ref SETUP_KEYWORDS: Vec<Regex> = [
        "MASTER BEDROOM",
        "FRONT HALL",
        "BACK YARD",
        "FRONT YARD",
        "LIVING ROOM",
        "DINING ROOM",
        "KITCHEN",
        "BEDROOM",
        "BATHROOM",
        "HALLWAY",
        "GARAGE",
        "BASEMENT",
        "ATTIC",
        "OFFICE",
        "LOBBY",
        "ROOM",
        "ENTRANCE",
        "EXIT",
    ]
    .iter()
    .map(|kw| Regex::new(&format!("(?i){}", regex::escape(kw))).unwrap())
    .collect();
}

/// Breaks a scene heading's text into lighting, scene, setup, time of day
/// and modifiers. Total over every input: text with no recognizable
/// lighting prefix comes back as `Unknown` with the whole line kept as
/// the scene.
pub fn parse_scene_location(text: &str) -> SceneLocation {
    let caps = match LIGHTING_PREFIX.captures(text) {
        Some(caps) => caps,
        None => return SceneLocation::unknown(text),
    };

    let lighting = lighting_for_prefix(&caps[1]);
    let remainder = &text[caps[0].len()..];

    let parts: Vec<&str> = remainder.split(" - ").collect();
    let (location_segment, time_segment) = if parts.len() >= 2 {
        (parts[..parts.len() - 1].join(" - "), Some(parts[parts.len() - 1]))
    } else {
        (remainder.to_string(), None)
    };

    let mut modifiers = Vec::new();
    let time_of_day = time_segment.and_then(|segment| {
        for group in MODIFIER_GROUP.captures_iter(segment) {
            let inner = group.get(1).or_else(|| group.get(2));
            if let Some(inner) = inner {
                let inner = inner.as_str().trim();
                if !inner.is_empty() {
                    modifiers.push(inner.to_string());
                }
            }
        }
        let cleaned = MODIFIER_GROUP.replace_all(segment, "");
        let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
        if cleaned.is_empty() {
            None
        } else {
            Some(cleaned)
        }
    });

    let (scene, setup) = split_scene_setup(&location_segment);

    SceneLocation {
        lighting,
        scene,
        setup,
        time_of_day,
        modifiers,
        original_text: text.to_string(),
    }
}

fn lighting_for_prefix(prefix: &str) -> Lighting {
    let prefix = prefix.to_lowercase();
    if prefix.contains('/') {
        Lighting::InteriorExterior
    } else if prefix == "int" {
        Lighting::Interior
    } else {
        Lighting::Exterior
    }
}

/// Splits on the first known sub-area keyword. Text before the keyword
/// becomes the scene, the keyword and everything after it the setup; a
/// keyword that opens the segment leaves it unsplit.
fn split_scene_setup(segment: &str) -> (String, Option<String>) {
    for keyword in SETUP_KEYWORDS.iter() {
        if let Some(found) = keyword.find(segment) {
            let before = &segment[..found.start()];
            if before.trim().is_empty() {
                break;
            }
            let scene = before.trim().trim_end_matches('-').trim_end().to_string();
            let setup = segment[found.start()..].trim().to_string();
            return (scene, Some(setup));
        }
    }
    (segment.trim().to_string(), None)
}
