use std::collections::HashMap;
use lazy_static::lazy_static;
use regex::Regex;

/// Transitions that do not end in `TO:` but are recognized verbatim.
pub const FIXED_TRANSITIONS: [&str; 3] = ["FADE OUT.", "CUT TO BLACK.", "FADE TO BLACK."];

/// The one scene heading that carries no lighting prefix.
pub const OVER_BLACK: &str = "OVER BLACK";

lazy_static! {
    // Line classification regexes. The parser consults these in a fixed
    // order, so a pattern only has to reject what an earlier rule has not
    // already claimed.
    pub static ref RULE_REGEX: HashMap<&'static str, Regex> = {
        let mut map = HashMap::new();
        map.insert("lyric", Regex::new(r"^[ \t]*~(.*)$").unwrap());
        map.insert("action_force", Regex::new(r"^([ \t]*)!(.*)$").unwrap());
        map.insert("character_force", Regex::new(r"^[ \t]*@(.*)$").unwrap());
        map.insert("page_break", Regex::new(r"^\s*={3,}\s*$").unwrap());
        map.insert("synopsis", Regex::new(r"^[ \t]*=\s*(.*)$").unwrap());
        map.insert("comment", Regex::new(r"^\s*\[\[\s*(.*?)\s*\]\]\s*$").unwrap());
        // At most six hashes; a seventh makes the line ordinary text.
        map.insert("section", Regex::new(r"^[ \t]*(#{1,6})([^#].*)?$").unwrap());
        // A lone leading dot forces a heading, but `..` stays prose.
        map.insert("scene_heading_force", Regex::new(r"^[ \t]*\.([^.].*)$").unwrap());
        map.insert(
            "scene_heading",
            Regex::new(r"^[ \t]*(?i:int\.?/ext|i\.?/e|int|ext|est)(?:\.|[ \t]).*$").unwrap(),
        );
        map.insert("scene_number", Regex::new(r"#\s*([^#\n]*?)\s*#\s*$").unwrap());
        map.insert("centered", Regex::new(r"^[ \t]*>\s*(.*?)\s*<\s*$").unwrap());
        map.insert("transition_force", Regex::new(r"^[ \t]*>\s*(.*)$").unwrap());
        map.insert("character_cue", Regex::new(r"^\p{Lu}[^\p{Ll}]*$").unwrap());
        map.insert("title_directive", Regex::new(r"^([^\s:][^:]*?)\s*:\s*(.*)$").unwrap());
        map
    };
}
