use log::debug;

use crate::models::{ElementKind, ParsedDocument, ScreenplayElement};
use crate::parser::title_page::parse_title_page;
use crate::utils::{normalize_line_endings, FIXED_TRANSITIONS, OVER_BLACK, RULE_REGEX};

/// Mutable context threaded through the line scan.
#[derive(Debug)]
struct ParserState {
    /// Blank lines seen since the last content line. Starts at 1 so the
    /// document opening counts as a blank boundary.
    blank_lines: u32,
    /// A character cue opened a dialogue block that nothing has closed yet.
    in_dialogue: bool,
    /// Buffered interior lines of an open `/* ... */` block.
    boneyard: Option<Vec<String>>,
}

impl ParserState {
    fn new() -> Self {
        ParserState {
            blank_lines: 1,
            in_dialogue: false,
            boneyard: None,
        }
    }
}

/// Single-pass, line-oriented Fountain classifier.
///
/// Lines are matched against a fixed-order rule list; the first rule that
/// fires decides the line. The only lookbehind is editing the most recent
/// element (continuation joins, heading demotion, dual-dialogue marking),
/// and the only lookahead is one line, for character cues.
pub struct FountainParser {
    elements: Vec<ScreenplayElement>,
    state: ParserState,
}

impl FountainParser {
    pub fn new() -> Self {
        FountainParser {
            elements: Vec::new(),
            state: ParserState::new(),
        }
    }

    /// Parses a complete Fountain document. Never fails: every line lands
    /// in some element, with unclassifiable text degrading to Action.
    pub fn parse(&mut self, script: &str) -> ParsedDocument {
        self.elements = Vec::new();
        self.state = ParserState::new();

        let normalized = normalize_line_endings(script);
        let mut lines: Vec<&str> = normalized.split('\n').collect();
        // Two trailing blanks so the final element and the title-page
        // boundary are always properly terminated.
        lines.push("");
        lines.push("");

        let mut start = 0;
        while start < lines.len() && lines[start].trim().is_empty() {
            start += 1;
        }

        let mut document = ParsedDocument::new();
        if let Some(title) = parse_title_page(&lines[start..]) {
            debug!("title page claimed {} lines", title.consumed_lines);
            start += title.consumed_lines;
            document.title_page = title.entries;
        }

        let mut index = start;
        while index < lines.len() {
            let next = lines.get(index + 1).copied();
            self.classify_line(lines[index], next);
            index += 1;
        }
        self.flush_boneyard();

        debug!("parsed {} elements", self.elements.len());
        document.elements = std::mem::take(&mut self.elements);
        document
    }

    /// Classifies one body line. Order matters: the first matching rule
    /// wins, so each rule only has to reject what earlier ones passed on.
    fn classify_line(&mut self, line: &str, next: Option<&str>) {
        // An open boneyard swallows every line until its closing marker.
        if self.state.boneyard.is_some() {
            self.capture_boneyard_line(line);
            return;
        }

        // Lyric. Keeps any open dialogue block open, and restores a
        // stanza break the blank-line rule would otherwise swallow.
        if let Some(caps) = RULE_REGEX["lyric"].captures(line) {
            if self.state.blank_lines > 0 && self.last_kind() == Some(ElementKind::Lyric) {
                self.elements
                    .push(ScreenplayElement::new(ElementKind::Lyric, ""));
            }
            self.elements
                .push(ScreenplayElement::new(ElementKind::Lyric, caps[1].trim()));
            self.state.blank_lines = 0;
            return;
        }

        // Forced action; always its own element, never merged.
        if let Some(caps) = RULE_REGEX["action_force"].captures(line) {
            let text = format!("{}{}", &caps[1], &caps[2]);
            self.elements
                .push(ScreenplayElement::new(ElementKind::Action, text));
            self.state.in_dialogue = false;
            self.state.blank_lines = 0;
            return;
        }

        // Forced character cue.
        if let Some(caps) = RULE_REGEX["character_force"].captures(line) {
            self.push_character(caps[1].trim());
            return;
        }

        // A two-space "beat" keeps a dialogue block alive.
        if self.state.in_dialogue && line == "  " {
            self.append_dialogue(line);
            return;
        }

        // Two or more whitespace characters are deliberate spacing:
        // literal action. A single one separates like an empty line.
        if line.trim().is_empty() && line.chars().count() > 1 {
            self.elements
                .push(ScreenplayElement::new(ElementKind::Action, line));
            self.state.in_dialogue = false;
            return;
        }

        if line.trim().is_empty() {
            self.state.blank_lines += 1;
            self.state.in_dialogue = false;
            return;
        }

        if line.trim_start().starts_with("/*") {
            self.open_boneyard(line);
            return;
        }

        // `===` must be checked before the single-`=` synopsis rule.
        if RULE_REGEX["page_break"].is_match(line) {
            self.elements
                .push(ScreenplayElement::new(ElementKind::PageBreak, ""));
            self.state.in_dialogue = false;
            self.state.blank_lines = 0;
            return;
        }

        if let Some(caps) = RULE_REGEX["synopsis"].captures(line) {
            self.elements
                .push(ScreenplayElement::new(ElementKind::Synopsis, caps[1].trim()));
            self.state.in_dialogue = false;
            self.state.blank_lines = 0;
            return;
        }

        // `[[...]]` on its own isolated line.
        if self.state.blank_lines > 0 {
            if let Some(caps) = RULE_REGEX["comment"].captures(line) {
                self.elements
                    .push(ScreenplayElement::new(ElementKind::Comment, &caps[1]));
                self.state.in_dialogue = false;
                self.state.blank_lines = 0;
                return;
            }
        }

        if let Some(caps) = RULE_REGEX["section"].captures(line) {
            let level = caps[1].len() as u8;
            let text = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");
            self.elements
                .push(ScreenplayElement::new(ElementKind::SectionHeading(level), text));
            self.state.in_dialogue = false;
            self.state.blank_lines = 0;
            return;
        }

        // A leading dot forces a heading with no blank line required.
        if let Some(caps) = RULE_REGEX["scene_heading_force"].captures(line) {
            self.push_scene_heading(&caps[1]);
            return;
        }

        // Natural scene heading, only after a blank boundary.
        if self.state.blank_lines > 0
            && (RULE_REGEX["scene_heading"].is_match(line) || line.trim() == OVER_BLACK)
        {
            self.push_scene_heading(line);
            return;
        }

        // Transition: an uppercase line ending `TO:`, or one of the fixed set.
        let trimmed = line.trim();
        if (trimmed.ends_with("TO:") && !line.chars().any(|c| c.is_lowercase()))
            || FIXED_TRANSITIONS.contains(&trimmed)
        {
            self.elements
                .push(ScreenplayElement::new(ElementKind::Transition, trimmed));
            self.state.in_dialogue = false;
            self.state.blank_lines = 0;
            return;
        }

        // `>` forms: centered text when the line also ends `<`, else a
        // forced transition.
        if let Some(caps) = RULE_REGEX["centered"].captures(line) {
            let mut element = ScreenplayElement::new(ElementKind::Action, caps[1].trim());
            element.is_centered = true;
            self.elements.push(element);
            self.state.in_dialogue = false;
            self.state.blank_lines = 0;
            return;
        }
        if let Some(caps) = RULE_REGEX["transition_force"].captures(line) {
            self.elements
                .push(ScreenplayElement::new(ElementKind::Transition, caps[1].trim()));
            self.state.in_dialogue = false;
            self.state.blank_lines = 0;
            return;
        }

        // Natural character cue: isolated, uppercase, and actually
        // followed by something to say.
        if self.state.blank_lines > 0 {
            let cue = trimmed.trim_end_matches('^').trim_end();
            let next_is_content = next.map(|l| !l.trim().is_empty()).unwrap_or(false);
            if !cue.is_empty() && RULE_REGEX["character_cue"].is_match(cue) && next_is_content {
                self.push_character(trimmed);
                return;
            }
        }

        if self.state.in_dialogue && self.state.blank_lines == 0 && trimmed.starts_with('(') {
            self.elements
                .push(ScreenplayElement::new(ElementKind::Parenthetical, trimmed));
            self.state.blank_lines = 0;
            return;
        }

        if self.state.in_dialogue {
            self.append_dialogue(line);
            return;
        }

        // Nothing claimed the line. If it touches its predecessor, join
        // them, demoting a heading that turned out not to be isolated.
        if self.state.blank_lines == 0 {
            if let Some(last) = self.elements.last_mut() {
                if last.kind == ElementKind::SceneHeading {
                    last.demote_to_action();
                }
                last.append_line(line);
                return;
            }
        }

        self.elements
            .push(ScreenplayElement::new(ElementKind::Action, line));
        self.state.blank_lines = 0;
    }

    /// Pushes a character cue, handling the trailing `^` dual-dialogue
    /// marker for both natural and `@`-forced cues.
    fn push_character(&mut self, raw: &str) {
        let has_dual_marker = raw.ends_with('^');
        let cue = raw.trim_end_matches('^').trim_end();
        let mut element = ScreenplayElement::new(ElementKind::Character, cue);
        if has_dual_marker {
            element.is_dual_dialogue = true;
            self.mark_previous_character_dual();
        }
        self.elements.push(element);
        self.state.in_dialogue = true;
        self.state.blank_lines = 0;
    }

    /// The `^` cue marks its partner retroactively: the nearest previous
    /// Character element becomes the left half of the pair.
    fn mark_previous_character_dual(&mut self) {
        if let Some(previous) = self
            .elements
            .iter_mut()
            .rev()
            .find(|e| e.kind == ElementKind::Character)
        {
            previous.is_dual_dialogue = true;
        }
    }

    /// Extends the block's current Dialogue element, or starts one when
    /// the block has none yet (right after the cue or a parenthetical).
    fn append_dialogue(&mut self, line: &str) {
        if let Some(last) = self.elements.last_mut() {
            if last.kind == ElementKind::Dialogue {
                last.append_line(line);
                self.state.blank_lines = 0;
                return;
            }
        }
        self.elements
            .push(ScreenplayElement::new(ElementKind::Dialogue, line));
        self.state.blank_lines = 0;
    }

    fn push_scene_heading(&mut self, raw: &str) {
        let (text, scene_number) = split_scene_number(raw);
        self.elements
            .push(ScreenplayElement::scene_heading(text.trim(), scene_number));
        self.state.in_dialogue = false;
        self.state.blank_lines = 0;
    }

    fn open_boneyard(&mut self, line: &str) {
        let trimmed = line.trim();
        self.state.in_dialogue = false;
        // Closed on the same line: a one-line boneyard. The length guard
        // keeps `/*/` from reading its own opener as the closer.
        if trimmed.len() >= 4 && trimmed.ends_with("*/") {
            let inner = trimmed[2..trimmed.len() - 2].trim();
            self.elements
                .push(ScreenplayElement::new(ElementKind::Boneyard, inner));
            self.state.blank_lines = 0;
            return;
        }
        let mut buffer = Vec::new();
        let remnant = trimmed[2..].trim();
        if !remnant.is_empty() {
            buffer.push(remnant.to_string());
        }
        self.state.boneyard = Some(buffer);
        self.state.blank_lines = 0;
    }

    /// Inside an open boneyard: buffer until a line ends `*/`, then emit
    /// the whole capture as one element.
    fn capture_boneyard_line(&mut self, line: &str) {
        if !line.trim_end().ends_with("*/") {
            if let Some(buffer) = self.state.boneyard.as_mut() {
                buffer.push(line.to_string());
            }
            return;
        }
        let remnant = line.trim_end();
        let remnant = remnant[..remnant.len() - 2].trim();
        if let Some(mut buffer) = self.state.boneyard.take() {
            if !remnant.is_empty() {
                buffer.push(remnant.to_string());
            }
            self.elements
                .push(ScreenplayElement::new(ElementKind::Boneyard, buffer.join("\n")));
        }
        self.state.blank_lines = 0;
    }

    /// A boneyard still open at end of input is emitted with whatever it
    /// captured rather than dropped. Trailing blanks are padding, not
    /// content.
    fn flush_boneyard(&mut self) {
        if let Some(buffer) = self.state.boneyard.take() {
            let text = buffer.join("\n");
            self.elements.push(ScreenplayElement::new(
                ElementKind::Boneyard,
                text.trim_end_matches('\n'),
            ));
        }
    }

    fn last_kind(&self) -> Option<ElementKind> {
        self.elements.last().map(|e| e.kind)
    }
}

impl Default for FountainParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Splits trailing `#...#` scene-number markup off a heading line. The
/// markup is always removed from the text; an empty label (`# #`) yields
/// no scene number.
fn split_scene_number(raw: &str) -> (String, Option<String>) {
    if let Some(caps) = RULE_REGEX["scene_number"].captures(raw) {
        if let (Some(whole), Some(label)) = (caps.get(0), caps.get(1)) {
            let text = raw[..whole.start()].to_string();
            let label = label.as_str().trim();
            let number = if label.is_empty() {
                None
            } else {
                Some(label.to_string())
            };
            return (text, number);
        }
    }
    (raw.to_string(), None)
}
